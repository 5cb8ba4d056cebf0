use super::dataset::{Dataset, Record};
use super::value::AttributeValue;
use crate::error::{Result, TreeError};
use csv::{ReaderBuilder, Trim};
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// How a delimited text file is tokenized into records.
#[derive(Clone, Debug)]
pub struct LoaderOptions {
    pub delimiter: u8,
    pub has_headers: bool,
    pub missing_token: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl LoaderOptions {
    /// Tab separated, no header row, `None` marks a missing value.
    pub fn new() -> Self {
        Self {
            delimiter: b'\t',
            has_headers: false,
            missing_token: "None".to_string(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    pub fn with_missing_token(mut self, missing_token: &str) -> Self {
        self.missing_token = missing_token.to_string();
        self
    }

    fn parse_attribute(&self, token: &str) -> AttributeValue {
        if token == self.missing_token {
            return AttributeValue::Missing;
        }
        match token.parse::<i64>() {
            Ok(n) => AttributeValue::from(n),
            Err(_) => AttributeValue::categorical(token),
        }
    }
}

/// Reads a delimited file into a dataset.
///
/// # Errors
///
/// Returns an error if the file can't be read or if its rows have different lengths.
pub fn read_dataset<P: AsRef<Path>>(path: P, options: &LoaderOptions) -> Result<Dataset> {
    let file = std::fs::File::open(path.as_ref()).map_err(csv::Error::from)?;
    debug!(path = %path.as_ref().display(), "Reading dataset");
    read_dataset_from(file, options)
}

/// Reads delimited text from any reader into a dataset.
///
/// Attribute tokens equal to the missing token become `Missing`, integer
/// tokens become `Numeric` and everything else stays `Categorical`. The
/// last column is the target and is always kept as a categorical token.
pub fn read_dataset_from<R: Read>(reader: R, options: &LoaderOptions) -> Result<Dataset> {
    let mut reader = ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(options.has_headers)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records: Vec<Record> = Vec::new();
    let mut width = None;

    for (row, result) in reader.records().enumerate() {
        let raw = result?;
        if raw.iter().all(str::is_empty) {
            continue;
        }

        let expected = *width.get_or_insert(raw.len());
        if raw.len() != expected {
            return Err(TreeError::Format {
                row,
                expected,
                found: raw.len(),
            });
        }

        let target = raw.len() - 1;
        let record = raw
            .iter()
            .enumerate()
            .map(|(column, token)| {
                if column == target {
                    AttributeValue::categorical(token)
                } else {
                    options.parse_attribute(token)
                }
            })
            .collect();
        records.push(record);
    }

    debug!(rows = records.len(), width = width.unwrap_or(0), "Loaded dataset");
    Dataset::new(records)
}
