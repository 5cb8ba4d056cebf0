//! Decision Tree Classifier
use super::builder::build_tree;
use super::classify::Distribution;
use super::node::{DecisionTree, Node};
use super::params::TreeParams;
use crate::data::dataset::{Dataset, Record};
use crate::data::value::AttributeValue;
use crate::error::{Result, TreeError};
use crate::metrics::confusion::ClassificationMetrics;
use crate::metrics::impurity::Criterion;
use nalgebra::DMatrix;
use rayon::prelude::*;
use std::collections::BTreeSet;
use tracing::info;

/// Decision Tree Classifier
#[derive(Clone, Debug, Default)]
pub struct DecisionTreeClassifier {
    tree: Option<DecisionTree>,
    tree_params: TreeParams,
}

impl ClassificationMetrics for DecisionTreeClassifier {}

impl DecisionTreeClassifier {
    /// Creates a new classifier scoring splits by entropy.
    pub fn new() -> Self {
        Self {
            tree: None,
            tree_params: TreeParams::new(),
        }
    }

    /// Creates a new classifier with a custom split criterion.
    ///
    /// # Arguments
    ///
    /// * `criterion` - Either `"gini"` or `"entropy"`; defaults to `"entropy"`.
    ///
    /// # Errors
    ///
    /// This method will return an error if the criterion is not recognized.
    pub fn with_params(criterion: Option<&str>) -> Result<Self> {
        let mut classifier = Self::new();
        if let Some(criterion) = criterion {
            classifier.set_criterion(criterion)?;
        }
        Ok(classifier)
    }

    pub fn set_criterion(&mut self, criterion: &str) -> Result<()> {
        self.tree_params.set_criterion(criterion)
    }

    pub fn criterion(&self) -> Criterion {
        self.tree_params.criterion()
    }

    /// The built tree, if `fit` has been called.
    pub fn tree(&self) -> Option<&DecisionTree> {
        self.tree.as_ref()
    }

    /// Builds the decision tree from a dataset.
    ///
    /// # Errors
    ///
    /// This method will return an error if the tree couldn't be built.
    pub fn fit(&mut self, dataset: &Dataset) -> Result<String> {
        let tree = build_tree(dataset, self.criterion())?;
        info!(
            records = dataset.len(),
            nodes = tree.len(),
            leaves = tree.leaf_count(),
            depth = tree.depth(),
            criterion = %self.criterion(),
            "Built decision tree"
        );
        self.tree = Some(tree);
        Ok("Finished building the tree.".into())
    }

    fn fitted(&self) -> Result<&DecisionTree> {
        self.tree.as_ref().ok_or(TreeError::NotFitted)
    }

    /// Label distribution of one observation, merging by training counts.
    pub fn classify(&self, observation: &[AttributeValue]) -> Result<Distribution> {
        self.fitted()?.classify(observation)
    }

    /// Label distribution of one observation, merging by returned weights.
    pub fn mdclassify(&self, observation: &[AttributeValue]) -> Result<Distribution> {
        self.fitted()?.mdclassify(observation)
    }

    /// Predicts the most likely label of each observation.
    ///
    /// Ties go to the label that sorts first.
    ///
    /// # Errors
    ///
    /// This method will return an error if the tree wasn't built yet or an
    /// observation is too short for the tree.
    pub fn predict(&self, observations: &[Record]) -> Result<Vec<String>> {
        let tree = self.fitted()?;
        observations
            .par_iter()
            .map(|observation| -> Result<String> {
                let distribution = tree.classify(observation)?;
                Ok(most_likely(&distribution).unwrap_or_default())
            })
            .collect()
    }

    /// Predicts label probabilities for each observation.
    ///
    /// # Returns
    ///
    /// The labels seen in training, sorted, and a matrix with one row per
    /// observation and one column per label.
    ///
    /// # Errors
    ///
    /// This method will return an error if the tree wasn't built yet or an
    /// observation is too short for the tree.
    pub fn predict_proba(&self, observations: &[Record]) -> Result<(Vec<String>, DMatrix<f64>)> {
        let tree = self.fitted()?;
        let labels = training_labels(tree);

        let rows = observations
            .par_iter()
            .map(|observation| -> Result<Vec<f64>> {
                let distribution = tree.classify(observation)?;
                Ok(labels
                    .iter()
                    .map(|label| distribution.get(label).copied().unwrap_or(0.0))
                    .collect::<Vec<_>>())
            })
            .collect::<Result<Vec<_>>>()?;

        let probabilities = DMatrix::from_row_slice(rows.len(), labels.len(), &rows.concat());
        Ok((labels, probabilities))
    }
}

fn most_likely(distribution: &Distribution) -> Option<String> {
    distribution
        .iter()
        .fold(None, |best: Option<(&String, f64)>, (label, &weight)| match best {
            Some((_, best_weight)) if weight <= best_weight => best,
            _ => Some((label, weight)),
        })
        .map(|(label, _)| label.clone())
}

fn training_labels(tree: &DecisionTree) -> Vec<String> {
    tree.nodes()
        .iter()
        .filter_map(|node| match node {
            Node::Leaf { distribution, .. } => Some(distribution.keys()),
            Node::Decision { .. } => None,
        })
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
