use super::value::AttributeValue;
use crate::error::{Result, TreeError};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};
use std::collections::{BTreeMap, HashSet};
use std::fmt::{self, Debug, Formatter};

/// A fixed-width sequence of attribute values whose last position is the target.
pub type Record = Vec<AttributeValue>;

/// An ordered, immutable collection of records sharing one width.
#[derive(Clone, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
    width: usize,
}

impl Debug for Dataset {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dataset {{")?;
        for record in &self.records {
            write!(f, "    [")?;
            for value in record {
                write!(f, "{}, ", value)?;
            }
            writeln!(f, "],")?;
        }
        write!(f, "}}")
    }
}

impl Dataset {
    /// Creates a dataset, checking that every record has the same width.
    ///
    /// # Errors
    ///
    /// Returns `TreeError::Format` if a record differs in length from the first
    /// one, or if the records have no target column at all.
    ///
    /// A `Numeric(NaN)` is stored as `Missing`, as `AttributeValue::numeric` does.
    pub fn new(mut records: Vec<Record>) -> Result<Self> {
        let width = match records.first() {
            Some(first) => first.len(),
            None => return Ok(Self::empty(0)),
        };

        for (row, record) in records.iter().enumerate() {
            if record.len() != width || width == 0 {
                return Err(TreeError::Format {
                    row,
                    expected: width.max(1),
                    found: record.len(),
                });
            }
        }

        for value in records.iter_mut().flatten() {
            if matches!(value, AttributeValue::Numeric(x) if x.is_nan()) {
                *value = AttributeValue::Missing;
            }
        }

        Ok(Self { records, width })
    }

    pub fn empty(width: usize) -> Self {
        Self {
            records: Vec::new(),
            width,
        }
    }

    // Only called with records already known to share `width`.
    pub(crate) fn from_parts(records: Vec<Record>, width: usize) -> Self {
        Self { records, width }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn is_not_empty(&self) -> bool {
        !self.is_empty()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Index of the target column.
    pub fn target_index(&self) -> usize {
        self.width.saturating_sub(1)
    }

    /// Number of attribute columns, the target excluded.
    pub fn num_attributes(&self) -> usize {
        self.target_index()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn get(&self, row: usize) -> Option<&Record> {
        self.records.get(row)
    }

    /// The target label of a record, read as a categorical token.
    pub fn target_label(record: &[AttributeValue]) -> String {
        match record.last() {
            Some(value) => value
                .as_categorical()
                .map_or_else(|| value.to_string(), str::to_string),
            None => AttributeValue::Missing.to_string(),
        }
    }

    /// Counts how many records carry each target label.
    pub fn target_counts(&self) -> BTreeMap<String, usize> {
        self.records
            .iter()
            .fold(BTreeMap::new(), |mut counts, record| {
                *counts.entry(Self::target_label(record)).or_insert(0) += 1;
                counts
            })
    }

    /// Distinct non-missing values of an attribute, in order of first appearance.
    pub fn distinct_values(&self, attribute: usize) -> Vec<AttributeValue> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter_map(|record| record.get(attribute))
            .filter(|value| !value.is_missing() && seen.insert(*value))
            .cloned()
            .collect()
    }

    /// Selects the given rows, keeping the order of `rows`.
    pub fn select(&self, rows: &[usize]) -> Self {
        let records = rows
            .iter()
            .filter_map(|&row| self.get(row).cloned())
            .collect();
        Self::from_parts(records, self.width)
    }

    /// Shuffles the records and splits them into a training and a test dataset.
    ///
    /// # Errors
    ///
    /// Returns an error if `train_size` is outside `[0.0, 1.0]`.
    pub fn train_test_split(&self, train_size: f64, seed: Option<u64>) -> Result<(Self, Self)> {
        if !(0.0..=1.0).contains(&train_size) {
            return Err(TreeError::InvalidParameter(
                "Train size should be between 0.0 and 1.0".into(),
            ));
        }
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut indices = (0..self.len()).collect::<Vec<_>>();
        indices.shuffle(&mut rng);
        let train_size = (self.len() as f64 * train_size).floor() as usize;
        let (train_indices, test_indices) = indices.split_at(train_size);

        Ok((self.select(train_indices), self.select(test_indices)))
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(values: &[&str]) -> Record {
        values.iter().map(|&v| AttributeValue::from(v)).collect()
    }

    #[test]
    fn test_dataset_new() {
        let dataset = Dataset::new(vec![record(&["a", "x"]), record(&["b", "y"])]).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.width(), 2);
        assert_eq!(dataset.target_index(), 1);
        assert_eq!(dataset.num_attributes(), 1);
    }

    #[test]
    fn test_dataset_new_rejects_ragged_records() {
        let result = Dataset::new(vec![record(&["a", "x"]), record(&["b"])]);
        match result {
            Err(TreeError::Format {
                row,
                expected,
                found,
            }) => {
                assert_eq!(row, 1);
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("expected a format error, got {:?}", other),
        }
    }

    #[test]
    fn test_dataset_new_rejects_zero_width() {
        assert!(matches!(
            Dataset::new(vec![Vec::new()]),
            Err(TreeError::Format { .. })
        ));
    }

    #[test]
    fn test_dataset_new_empty() {
        let dataset = Dataset::new(Vec::new()).unwrap();
        assert!(dataset.is_empty());
        assert!(!dataset.is_not_empty());
    }

    #[test]
    fn test_dataset_new_stores_nan_as_missing() {
        let dataset = Dataset::new(vec![
            vec![AttributeValue::Numeric(f64::NAN), AttributeValue::from("x")],
            vec![AttributeValue::from(1), AttributeValue::Numeric(f64::NAN)],
        ])
        .unwrap();
        assert!(dataset.get(0).unwrap()[0].is_missing());
        assert_eq!(Dataset::target_label(dataset.get(1).unwrap()), "None");
        assert_eq!(dataset.distinct_values(0), vec![AttributeValue::from(1)]);
        assert!(dataset.get(2).is_none());
    }

    #[test]
    fn test_select_keeps_requested_order() {
        let dataset = Dataset::new(vec![record(&["a", "x"]), record(&["b", "y"])]).unwrap();
        let selected = dataset.select(&[1, 0, 5]);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected.get(0), dataset.get(1));
    }

    #[test]
    fn test_target_label_is_categorical() {
        let record = vec![AttributeValue::from("a"), AttributeValue::from(7)];
        assert_eq!(Dataset::target_label(&record), "7");
    }

    #[test]
    fn test_target_counts() {
        let dataset = Dataset::new(vec![
            record(&["a", "x"]),
            record(&["b", "y"]),
            record(&["c", "x"]),
        ])
        .unwrap();
        let counts = dataset.target_counts();
        assert_eq!(counts.get("x"), Some(&2));
        assert_eq!(counts.get("y"), Some(&1));
    }

    #[test]
    fn test_distinct_values_skip_missing_and_keep_order() {
        let dataset = Dataset::new(vec![
            vec![AttributeValue::from(3), AttributeValue::from("x")],
            vec![AttributeValue::Missing, AttributeValue::from("x")],
            vec![AttributeValue::from(1), AttributeValue::from("y")],
            vec![AttributeValue::from(3), AttributeValue::from("y")],
        ])
        .unwrap();
        assert_eq!(
            dataset.distinct_values(0),
            vec![AttributeValue::from(3), AttributeValue::from(1)]
        );
    }

    #[test]
    fn test_dataset_formatting() {
        let dataset = Dataset::new(vec![
            vec![AttributeValue::from(1), AttributeValue::Missing, AttributeValue::from("x")],
        ])
        .unwrap();
        assert_eq!(format!("{:?}", dataset), "Dataset {\n    [1, None, x, ],\n}");
    }

    #[test]
    fn test_dataset_train_test_split() {
        let records = (0..8).map(|i| vec![AttributeValue::from(i), AttributeValue::from("x")]);
        let dataset = Dataset::new(records.collect()).unwrap();

        let (train, test) = dataset.train_test_split(0.75, Some(1000)).unwrap();
        assert_eq!(train.len(), 6);
        assert_eq!(test.len(), 2);
        assert_eq!(train.width(), 2);
    }

    #[test]
    fn test_dataset_train_test_split_is_seeded() {
        let records = (0..20).map(|i| vec![AttributeValue::from(i), AttributeValue::from("x")]);
        let dataset = Dataset::new(records.collect()).unwrap();

        let first = dataset.train_test_split(0.5, Some(7)).unwrap();
        let second = dataset.train_test_split(0.5, Some(7)).unwrap();
        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
    }

    #[test]
    fn test_dataset_train_test_split_rejects_bad_size() {
        let dataset = Dataset::new(vec![record(&["a", "x"])]).unwrap();
        assert!(dataset.train_test_split(1.5, None).is_err());
    }
}
