//! Classification of observations by walking a built tree.
//!
//! When an observation lacks the attribute a decision node tests, both
//! branches are followed and their results merged. `classify` weights the
//! branches by the training counts stored in the tree. `mdclassify` weights
//! them by the totals the branches return at classification time; once
//! several missing attributes stack along a path the two give different
//! answers.

use super::node::{DecisionTree, Node, NodeId};
use crate::data::value::AttributeValue;
use crate::error::{Result, TreeError};
use std::collections::BTreeMap;

/// Weight of each target label.
pub type Distribution = BTreeMap<String, f64>;

/// Merges two distributions as `left_weight * left + right_weight * right`,
/// labels absent on one side counting as zero.
pub fn merge_weighted(
    left: &Distribution,
    left_weight: f64,
    right: &Distribution,
    right_weight: f64,
) -> Distribution {
    let mut merged = Distribution::new();
    for (label, weight) in left {
        *merged.entry(label.clone()).or_insert(0.0) += left_weight * weight;
    }
    for (label, weight) in right {
        *merged.entry(label.clone()).or_insert(0.0) += right_weight * weight;
    }
    merged
}

/// Scales a distribution so its weights sum to one. Empty and all-zero
/// distributions are returned unchanged.
pub fn normalize(distribution: Distribution) -> Distribution {
    let total: f64 = distribution.values().sum();
    if total <= 0.0 {
        return distribution;
    }
    distribution
        .into_iter()
        .map(|(label, weight)| (label, weight / total))
        .collect()
}

enum Branch {
    Left,
    Right,
    Both,
}

impl DecisionTree {
    /// Distribution of target labels for `observation`, weights summing to one.
    ///
    /// Missing attributes are resolved by following both branches and
    /// weighting them by the share of training records each received.
    /// `observation` may be a full record or just its attributes.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree tests an attribute the observation doesn't have.
    pub fn classify(&self, observation: &[AttributeValue]) -> Result<Distribution> {
        self.classify_from(self.root(), observation)
    }

    /// Like [`classify`](Self::classify), but weights the two branches of a
    /// missing attribute by the total weight each one returns.
    ///
    /// Raw leaf counts travel up the recursion and the result is normalized
    /// once at the end.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree tests an attribute the observation doesn't have.
    pub fn mdclassify(&self, observation: &[AttributeValue]) -> Result<Distribution> {
        Ok(normalize(self.mdclassify_from(self.root(), observation)?))
    }

    fn classify_from(&self, id: NodeId, observation: &[AttributeValue]) -> Result<Distribution> {
        let node = self.resolve(id)?;
        match (node, route(node, observation)?) {
            (Node::Leaf { distribution, .. }, _) => Ok(normalize(as_weights(distribution))),
            (Node::Decision { left, .. }, Branch::Left) => self.classify_from(*left, observation),
            (Node::Decision { right, .. }, Branch::Right) => self.classify_from(*right, observation),
            (
                Node::Decision {
                    left, right, count, ..
                },
                Branch::Both,
            ) => {
                let total = *count as f64;
                let left_weight = self.resolve(*left)?.count() as f64 / total;
                let right_weight = self.resolve(*right)?.count() as f64 / total;

                let left_result = self.classify_from(*left, observation)?;
                let right_result = self.classify_from(*right, observation)?;
                Ok(merge_weighted(&left_result, left_weight, &right_result, right_weight))
            }
        }
    }

    fn mdclassify_from(&self, id: NodeId, observation: &[AttributeValue]) -> Result<Distribution> {
        let node = self.resolve(id)?;
        match (node, route(node, observation)?) {
            (Node::Leaf { distribution, .. }, _) => Ok(as_weights(distribution)),
            (Node::Decision { left, .. }, Branch::Left) => self.mdclassify_from(*left, observation),
            (Node::Decision { right, .. }, Branch::Right) => {
                self.mdclassify_from(*right, observation)
            }
            (Node::Decision { left, right, .. }, Branch::Both) => {
                let left_result = self.mdclassify_from(*left, observation)?;
                let right_result = self.mdclassify_from(*right, observation)?;

                let left_total: f64 = left_result.values().sum();
                let right_total: f64 = right_result.values().sum();
                let total = left_total + right_total;
                if total <= 0.0 {
                    return Ok(Distribution::new());
                }
                Ok(merge_weighted(
                    &left_result,
                    left_total / total,
                    &right_result,
                    right_total / total,
                ))
            }
        }
    }

    fn resolve(&self, id: NodeId) -> Result<&Node> {
        self.node(id)
            .ok_or_else(|| TreeError::InvalidParameter(format!("Node {} doesn't exist.", id)))
    }
}

/// Which branches `observation` follows at `node`. Leaves always report `Both`.
fn route(node: &Node, observation: &[AttributeValue]) -> Result<Branch> {
    let (attribute, split_value) = match node {
        Node::Leaf { .. } => return Ok(Branch::Both),
        Node::Decision {
            attribute, value, ..
        } => (*attribute, value),
    };

    let observed = observation
        .get(attribute)
        .ok_or(TreeError::AttributeOutOfRange {
            attribute,
            width: observation.len(),
        })?;

    Ok(if observed.is_missing() {
        Branch::Both
    } else if observed.satisfies(split_value) {
        Branch::Left
    } else {
        Branch::Right
    })
}

fn as_weights(counts: &BTreeMap<String, usize>) -> Distribution {
    counts
        .iter()
        .map(|(label, count)| (label.clone(), *count as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::{Dataset, Record};
    use crate::metrics::impurity::Criterion;
    use crate::test_support::example_dataset;
    use crate::trees::builder::build_tree;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn example_tree() -> DecisionTree {
        build_tree(&example_dataset(), Criterion::Entropy).unwrap()
    }

    fn observation(values: &[Option<&str>]) -> Vec<AttributeValue> {
        values
            .iter()
            .map(|value| match value {
                Some(token) => match token.parse::<i64>() {
                    Ok(n) => AttributeValue::from(n),
                    Err(_) => AttributeValue::from(*token),
                },
                None => AttributeValue::Missing,
            })
            .collect()
    }

    fn weight(distribution: &Distribution, label: &str) -> f64 {
        distribution.get(label).copied().unwrap_or(0.0)
    }

    #[test]
    fn test_merge_weighted_takes_key_union() {
        let left: Distribution = [("a".to_string(), 1.0)].into_iter().collect();
        let right: Distribution = [("a".to_string(), 0.5), ("b".to_string(), 0.5)]
            .into_iter()
            .collect();
        let merged = merge_weighted(&left, 0.25, &right, 0.75);
        assert_abs_diff_eq!(weight(&merged, "a"), 0.625, epsilon = 1e-12);
        assert_abs_diff_eq!(weight(&merged, "b"), 0.375, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize() {
        let counts: Distribution = [("a".to_string(), 3.0), ("b".to_string(), 1.0)]
            .into_iter()
            .collect();
        let normalized = normalize(counts);
        assert_abs_diff_eq!(weight(&normalized, "a"), 0.75, epsilon = 1e-12);
        assert!(normalize(Distribution::new()).is_empty());
    }

    #[test]
    fn test_classify_fully_specified() {
        let tree = example_tree();
        let result = tree
            .classify(&observation(&[Some("(direct)"), Some("USA"), Some("yes"), Some("5")]))
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_abs_diff_eq!(weight(&result, "Basic"), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_classify_accepts_full_records() {
        let tree = example_tree();
        let dataset = example_dataset();
        for record in &dataset {
            let result = tree.classify(record).unwrap();
            let label = Dataset::target_label(record);
            assert_abs_diff_eq!(weight(&result, &label), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_classify_one_missing_attribute() {
        let tree = example_tree();
        let query = observation(&[Some("google"), None, Some("yes"), None]);

        let result = tree.classify(&query).unwrap();
        assert_abs_diff_eq!(weight(&result, "Premium"), 0.6, epsilon = 1e-9);
        assert_abs_diff_eq!(weight(&result, "Basic"), 0.4, epsilon = 1e-9);

        let result = tree.mdclassify(&query).unwrap();
        assert_abs_diff_eq!(weight(&result, "Premium"), 0.9, epsilon = 1e-9);
        assert_abs_diff_eq!(weight(&result, "Basic"), 0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_classify_stacked_missing_attributes() {
        let tree = example_tree();
        let query = observation(&[Some("google"), Some("France"), None, None]);

        let result = tree.classify(&query).unwrap();
        assert_abs_diff_eq!(weight(&result, "Premium"), 0.6, epsilon = 1e-9);
        assert_abs_diff_eq!(weight(&result, "Basic"), 0.2, epsilon = 1e-9);
        assert_abs_diff_eq!(weight(&result, "None"), 0.2, epsilon = 1e-9);

        let result = tree.mdclassify(&query).unwrap();
        assert_abs_diff_eq!(weight(&result, "Premium"), 0.9, epsilon = 1e-9);
        assert_abs_diff_eq!(weight(&result, "Basic"), 0.05, epsilon = 1e-9);
        assert_abs_diff_eq!(weight(&result, "None"), 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_classify_all_missing_returns_training_frequencies() {
        let tree = example_tree();
        let query = observation(&[None, None, None, None]);

        let result = tree.classify(&query).unwrap();
        assert_abs_diff_eq!(weight(&result, "None"), 7.0 / 16.0, epsilon = 1e-9);
        assert_abs_diff_eq!(weight(&result, "Basic"), 6.0 / 16.0, epsilon = 1e-9);
        assert_abs_diff_eq!(weight(&result, "Premium"), 3.0 / 16.0, epsilon = 1e-9);

        let result = tree.mdclassify(&query).unwrap();
        assert_abs_diff_eq!(weight(&result, "None"), 0.3794712402624382, epsilon = 1e-9);
        assert_abs_diff_eq!(weight(&result, "Basic"), 0.2827653815534904, epsilon = 1e-9);
        assert_abs_diff_eq!(weight(&result, "Premium"), 0.33776337818407143, epsilon = 1e-9);
    }

    #[test]
    fn test_short_observation_is_an_error() {
        let tree = example_tree();
        assert!(matches!(
            tree.classify(&observation(&[Some("digg")])),
            Err(TreeError::AttributeOutOfRange { .. })
        ));
        assert!(tree.mdclassify(&[]).is_err());
    }

    #[test]
    fn test_empty_tree_classifies_to_nothing() {
        let tree = build_tree(&Dataset::empty(3), Criterion::Entropy).unwrap();
        assert!(tree.classify(&observation(&[None, None])).unwrap().is_empty());
        assert!(tree.mdclassify(&observation(&[None, None])).unwrap().is_empty());
    }

    fn arb_value() -> impl Strategy<Value = AttributeValue> {
        prop_oneof![
            (0i64..4).prop_map(AttributeValue::from),
            prop::sample::select(vec!["a", "b", "c"]).prop_map(AttributeValue::from),
            Just(AttributeValue::Missing),
        ]
    }

    fn arb_dataset() -> impl Strategy<Value = Dataset> {
        let record = (
            prop::collection::vec(arb_value(), 3),
            prop::sample::select(vec!["x", "y", "z"]),
        )
            .prop_map(|(mut record, label): (Record, &str)| {
                record.push(AttributeValue::from(label));
                record
            });
        prop::collection::vec(record, 1..40).prop_map(|records| Dataset::new(records).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_classify_sums_to_one(
            dataset in arb_dataset(),
            query in prop::collection::vec(arb_value(), 3),
        ) {
            let tree = build_tree(&dataset, Criterion::Entropy).unwrap();
            let total: f64 = tree.classify(&query).unwrap().values().sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
            let total: f64 = tree.mdclassify(&query).unwrap().values().sum();
            prop_assert!((total - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_fully_specified_reaches_one_leaf(
            dataset in arb_dataset(),
            query in prop::collection::vec(
                prop_oneof![
                    (0i64..4).prop_map(AttributeValue::from),
                    prop::sample::select(vec!["a", "b", "c"]).prop_map(AttributeValue::from),
                ],
                3,
            ),
        ) {
            let tree = build_tree(&dataset, Criterion::Gini).unwrap();
            let result = tree.classify(&query).unwrap();
            let labels: Vec<&String> = result.keys().collect();
            let leaf_matches = tree.nodes().iter().any(|node| match node {
                Node::Leaf { distribution, .. } => distribution.keys().collect::<Vec<_>>() == labels,
                _ => false,
            });
            prop_assert!(leaf_matches);
            prop_assert_eq!(tree.mdclassify(&query).unwrap(), result);
        }
    }
}
