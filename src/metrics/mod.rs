/// Evaluation of predicted labels
pub mod confusion;
/// Gini impurity and entropy
pub mod impurity;
