//! Error types shared by every stage of the tree pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Impurity is undefined for an empty dataset.")]
    EmptyDataset,

    #[error("Record {row} has {found} values, expected {expected}.")]
    Format {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Attribute {attribute} has no non-missing values to impute from.")]
    Imputation { attribute: usize },

    #[error("Attribute index {attribute} is out of range for records of width {width}.")]
    AttributeOutOfRange { attribute: usize, width: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Tree wasn't built yet.")]
    NotFitted,

    #[error("Couldn't read dataset: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, TreeError>;
