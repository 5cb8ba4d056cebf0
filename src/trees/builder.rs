//! Greedy top-down induction of a binary decision tree.

use super::node::{DecisionTree, Node, NodeId};
use crate::data::dataset::Dataset;
use crate::data::value::AttributeValue;
use crate::error::Result;
use crate::metrics::impurity::Criterion;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use std::collections::BTreeMap;
use tracing::{debug, trace};

struct SplitData {
    attribute: usize,
    value: AttributeValue,
    left: Dataset,
    right: Dataset,
    information_gain: f64,
}

/// Builds a decision tree from `dataset`, scoring candidate splits with `criterion`.
///
/// Every attribute (the target excluded) is tried against each of its
/// distinct observed values. The split with the largest gain is kept, the
/// first one found winning ties, and only if that gain is strictly positive
/// and both sides are non-empty; otherwise the records form a leaf. An empty
/// dataset builds a tree made of a single empty leaf.
///
/// # Errors
///
/// Returns an error if a candidate split can't be evaluated.
pub fn build_tree(dataset: &Dataset, criterion: Criterion) -> Result<DecisionTree> {
    let mut builder = TreeBuilder {
        criterion,
        nodes: Vec::new(),
    };
    let root = builder.build_node(dataset)?;
    Ok(DecisionTree::from_arena(builder.nodes, root))
}

struct TreeBuilder {
    criterion: Criterion,
    nodes: Vec<Node>,
}

impl TreeBuilder {
    fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn build_node(&mut self, dataset: &Dataset) -> Result<NodeId> {
        if dataset.is_not_empty() {
            let criterion = self.criterion;
            let current_score = criterion.score(dataset)?;

            // attributes are searched in parallel, but reduced in order so the
            // first best candidate wins exactly as in a sequential scan
            let splits = (0..dataset.num_attributes())
                .into_par_iter()
                .map(|attribute| get_split(criterion, dataset, attribute, current_score))
                .collect::<Result<Vec<_>>>()?;

            let best_split = splits.into_iter().flatten().fold(None, |best, split| match best {
                Some(best) if !better(&split, &best) => Some(best),
                _ => Some(split),
            });

            if let Some(split) = best_split.filter(|split| split.information_gain > 0.0) {
                debug!(
                    attribute = split.attribute,
                    value = %split.value,
                    gain = split.information_gain,
                    left = split.left.len(),
                    right = split.right.len(),
                    "Accepted split"
                );
                let left = self.build_node(&split.left)?;
                let right = self.build_node(&split.right)?;
                return Ok(self.push(Node::Decision {
                    attribute: split.attribute,
                    value: split.value,
                    left,
                    right,
                    count: dataset.len(),
                }));
            }
        }

        let distribution: BTreeMap<String, usize> = dataset.target_counts();
        trace!(count = dataset.len(), ?distribution, "Leaf");
        Ok(self.push(Node::Leaf {
            distribution,
            count: dataset.len(),
        }))
    }
}

fn better(candidate: &SplitData, best: &SplitData) -> bool {
    candidate.information_gain > best.information_gain
}

/// Best split of a single attribute, if any candidate leaves both sides non-empty.
fn get_split(
    criterion: Criterion,
    dataset: &Dataset,
    attribute: usize,
    current_score: f64,
) -> Result<Option<SplitData>> {
    let mut best_split: Option<SplitData> = None;

    for value in dataset.distinct_values(attribute) {
        let (left, right) = dataset.divide(attribute, &value)?;
        if left.is_empty() || right.is_empty() {
            continue;
        }

        let information_gain = criterion.information_gain(current_score, &left, &right)?;

        let candidate = SplitData {
            attribute,
            value,
            left,
            right,
            information_gain,
        };
        if best_split.as_ref().map_or(true, |best| better(&candidate, best)) {
            best_split = Some(candidate);
        }
    }

    Ok(best_split)
}
