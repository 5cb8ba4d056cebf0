//! Impurity measures over the target distribution of a dataset.

use crate::data::dataset::Dataset;
use crate::error::{Result, TreeError};
use std::fmt::{self, Display};
use std::str::FromStr;

fn frequencies(dataset: &Dataset) -> Result<Vec<f64>> {
    if dataset.is_empty() {
        return Err(TreeError::EmptyDataset);
    }
    let total = dataset.len() as f64;
    Ok(dataset
        .target_counts()
        .into_values()
        .map(|count| count as f64 / total)
        .collect())
}

/// Gini impurity: the probability that two targets drawn with replacement differ.
///
/// Computed as the sum of `p_i * p_j` over every ordered pair of distinct
/// target values.
///
/// # Errors
///
/// Returns `TreeError::EmptyDataset` if the dataset has no records.
pub fn gini_impurity(dataset: &Dataset) -> Result<f64> {
    let p = frequencies(dataset)?;
    let mut impurity = 0.0;
    for (i, p_i) in p.iter().enumerate() {
        for (j, p_j) in p.iter().enumerate() {
            if i != j {
                impurity += p_i * p_j;
            }
        }
    }
    Ok(impurity)
}

/// Shannon entropy of the target values, in bits.
///
/// # Errors
///
/// Returns `TreeError::EmptyDataset` if the dataset has no records.
pub fn entropy(dataset: &Dataset) -> Result<f64> {
    let p = frequencies(dataset)?;
    Ok(p.iter().fold(0.0, |acc, p_k| acc - p_k * p_k.log2()))
}

/// The score minimized by the tree builder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Criterion {
    Gini,
    #[default]
    Entropy,
}

impl Criterion {
    pub fn score(&self, dataset: &Dataset) -> Result<f64> {
        match self {
            Self::Gini => gini_impurity(dataset),
            Self::Entropy => entropy(dataset),
        }
    }

    /// Reduction from `parent_score` when a parent is divided into `left` and
    /// `right`, each side weighted by its share of the parent's records.
    ///
    /// # Errors
    ///
    /// Returns an error if either side is empty.
    pub fn information_gain(&self, parent_score: f64, left: &Dataset, right: &Dataset) -> Result<f64> {
        let total = (left.len() + right.len()) as f64;
        let weight_left = left.len() as f64 / total;
        let weight_right = right.len() as f64 / total;

        Ok(parent_score - weight_left * self.score(left)? - weight_right * self.score(right)?)
    }
}

impl FromStr for Criterion {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gini" => Ok(Self::Gini),
            "entropy" => Ok(Self::Entropy),
            _ => Err(TreeError::InvalidParameter(
                "The criterion must be either 'gini' or 'entropy'.".into(),
            )),
        }
    }
}

impl Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gini => write!(f, "gini"),
            Self::Entropy => write!(f, "entropy"),
        }
    }
}
