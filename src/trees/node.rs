use crate::data::value::AttributeValue;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

/// Index of a node inside a tree's arena.
pub type NodeId = usize;

/// Decision tree node
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    /// Records satisfying `value` on `attribute` go to `left`, the rest to `right`.
    Decision {
        attribute: usize,
        value: AttributeValue,
        left: NodeId,
        right: NodeId,
        count: usize,
    },
    /// Target label counts of the training records that reached this leaf.
    Leaf {
        distribution: BTreeMap<String, usize>,
        count: usize,
    },
}

impl Node {
    /// Number of training records that reached the node.
    pub fn count(&self) -> usize {
        match self {
            Self::Decision { count, .. } | Self::Leaf { count, .. } => *count,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf { .. })
    }
}

/// An immutable binary decision tree stored as an arena of nodes.
///
/// Children always precede their parent in the arena, so the root is the
/// last node pushed.
#[derive(Clone, Debug, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl DecisionTree {
    pub(crate) fn from_arena(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of training records the tree was built from.
    pub fn count(&self) -> usize {
        self.node(self.root).map_or(0, Node::count)
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Number of decision levels on the longest root to leaf path.
    pub fn depth(&self) -> usize {
        self.depth_from(self.root)
    }

    fn depth_from(&self, id: NodeId) -> usize {
        match self.node(id) {
            Some(Node::Decision { left, right, .. }) => {
                1 + self.depth_from(*left).max(self.depth_from(*right))
            }
            _ => 0,
        }
    }

    /// Checks that every decision node's count is the sum of its children's
    /// and that every leaf's label counts add up to its own count.
    pub fn is_consistent(&self) -> bool {
        self.is_consistent_from(self.root)
    }

    fn is_consistent_from(&self, id: NodeId) -> bool {
        match self.node(id) {
            Some(Node::Decision {
                left, right, count, ..
            }) => match (self.node(*left), self.node(*right)) {
                (Some(l), Some(r)) => {
                    *count == l.count() + r.count()
                        && self.is_consistent_from(*left)
                        && self.is_consistent_from(*right)
                }
                _ => false,
            },
            Some(Node::Leaf {
                distribution,
                count,
            }) => distribution.values().sum::<usize>() == *count,
            None => false,
        }
    }

    fn fmt_node(&self, f: &mut Formatter<'_>, id: NodeId, indent: &str) -> fmt::Result {
        match self.node(id) {
            Some(Node::Decision {
                attribute,
                value,
                left,
                right,
                count,
            }) => {
                writeln!(f, "{}:{}? ({})", attribute, value, count)?;
                let nested = format!("{}   ", indent);
                write!(f, "{}T-> ", indent)?;
                self.fmt_node(f, *left, &nested)?;
                write!(f, "{}F-> ", indent)?;
                self.fmt_node(f, *right, &nested)
            }
            Some(Node::Leaf { distribution, .. }) => {
                let entries: Vec<_> = distribution
                    .iter()
                    .map(|(label, count)| format!("{}: {}", label, count))
                    .collect();
                writeln!(f, "{{{}}}", entries.join(", "))
            }
            None => writeln!(f, "<missing node {}>", id),
        }
    }
}

impl Display for DecisionTree {
    /// Indented dump of the tree, one node per line.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.fmt_node(f, self.root, "")
    }
}
