/// Greedy tree induction
pub mod builder;
/// Traversal of a built tree
pub mod classify;
/// Fit/predict interface
pub mod classifier;
/// Arena tree structure
pub mod node;
/// Tree parameters
pub mod params;
