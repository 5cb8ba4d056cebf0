//! Binary partitioning of a dataset with mode imputation of missing values.

use super::dataset::Dataset;
use super::value::AttributeValue;
use crate::error::{Result, TreeError};
use std::collections::HashMap;

impl Dataset {
    /// The most frequent non-missing value of `attribute`.
    ///
    /// Ties go to the value that appears first. Returns `None` when every value
    /// of the attribute is missing (or the dataset is empty).
    pub fn mode(&self, attribute: usize) -> Option<&AttributeValue> {
        let mut positions: HashMap<&AttributeValue, usize> = HashMap::new();
        let mut counts: Vec<(&AttributeValue, usize)> = Vec::new();

        for value in self.iter().filter_map(|record| record.get(attribute)) {
            if value.is_missing() {
                continue;
            }
            match positions.get(value).and_then(|&i| counts.get_mut(i)) {
                Some((_, count)) => *count += 1,
                None => {
                    positions.insert(value, counts.len());
                    counts.push((value, 1));
                }
            }
        }

        counts
            .into_iter()
            .fold(None, |best: Option<(&AttributeValue, usize)>, (value, count)| match best {
                Some((_, best_count)) if count <= best_count => best,
                _ => Some((value, count)),
            })
            .map(|(value, _)| value)
    }

    /// Splits the dataset on `attribute` against `split_value`.
    ///
    /// Missing values are replaced by the attribute's mode in this dataset
    /// before the test is evaluated, so every record lands in exactly one
    /// side. Numeric splits send values `>= split_value` left, categorical
    /// splits send equal tokens left. Both sides keep the original order.
    ///
    /// # Errors
    ///
    /// * `AttributeOutOfRange` if `attribute` is not a column of the dataset.
    /// * `InvalidParameter` if `split_value` is `Missing`.
    /// * `Imputation` if the dataset has records but no observed value for `attribute`.
    pub fn divide(&self, attribute: usize, split_value: &AttributeValue) -> Result<(Self, Self)> {
        if attribute >= self.width() {
            return Err(TreeError::AttributeOutOfRange {
                attribute,
                width: self.width(),
            });
        }
        if split_value.is_missing() {
            return Err(TreeError::InvalidParameter(
                "Can't split on a missing value.".into(),
            ));
        }
        if self.is_empty() {
            return Ok((Self::empty(self.width()), Self::empty(self.width())));
        }

        let mode = self
            .mode(attribute)
            .ok_or(TreeError::Imputation { attribute })?;
        let impute = |value: &AttributeValue| -> bool {
            if value.is_missing() {
                mode.satisfies(split_value)
            } else {
                value.satisfies(split_value)
            }
        };

        let (left, right): (Vec<_>, Vec<_>) = self
            .iter()
            .cloned()
            .partition(|record| impute(&record[attribute]));

        Ok((
            Self::from_parts(left, self.width()),
            Self::from_parts(right, self.width()),
        ))
    }
}
