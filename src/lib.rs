//! # Rusty-dtree
//!
//! `rusty-dtree` builds binary decision trees over records whose attributes may be
//! numeric, categorical or missing, and classifies new observations with them.
//! Missing training values are imputed with the attribute's mode while splitting;
//! missing values in an observation send it down both branches and the two
//! results are merged.
//!
//! ## Getting Started
//!
//! To use `rusty-dtree`, add the following to your `Cargo.toml` file:
//!
//! ```toml
//! [dependencies]
//! rusty-dtree = "*"
//! ```
//!
//! ## Example Usage
//!
//! ```rust
//! use rusty_dtree::data::dataset::Dataset;
//! use rusty_dtree::data::value::AttributeValue;
//! use rusty_dtree::trees::classifier::DecisionTreeClassifier;
//!
//! let records = vec![
//!     vec![AttributeValue::from("google"), AttributeValue::from(23), AttributeValue::from("Premium")],
//!     vec![AttributeValue::from("digg"), AttributeValue::from(24), AttributeValue::from("Basic")],
//!     vec![AttributeValue::from("slashdot"), AttributeValue::from(18), AttributeValue::from("None")],
//! ];
//! let dataset = Dataset::new(records).unwrap();
//!
//! let mut model = DecisionTreeClassifier::new();
//! model.fit(&dataset).unwrap();
//! println!("{}", model.tree().unwrap());
//!
//! let weights = model
//!     .classify(&[AttributeValue::from("google"), AttributeValue::Missing])
//!     .unwrap();
//! assert!((weights.values().sum::<f64>() - 1.0).abs() < 1e-9);
//! ```

/// Datasets, attribute values and loading
pub mod data;
/// Crate error type
pub mod error;
/// Impurity measures and evaluation metrics
pub mod metrics;
/// Decision trees
pub mod trees;

#[cfg(test)]
pub(crate) mod test_support;
