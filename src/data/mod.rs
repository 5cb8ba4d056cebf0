/// Records and datasets
pub mod dataset;
/// Reading datasets from delimited text
pub mod loader;
/// Mode imputation and binary splits
pub mod split;
/// Attribute values
pub mod value;
