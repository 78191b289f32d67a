use std::fmt;

use crate::error::DedupError;
use crate::model::{NormalizedKey, Record};
use crate::normalize::normalize;

// ---------------------------------------------------------------------------
// KeySpec
// ---------------------------------------------------------------------------

/// Which columns identify a record, and which of those are normalized before
/// comparison. Column order fixes the order of the key tuple.
#[derive(Debug, Clone)]
pub struct KeySpec {
    pub columns: Vec<String>,
    pub normalized: Vec<String>,
}

impl KeySpec {
    pub fn new(columns: Vec<String>, normalized: Vec<String>) -> Result<Self, DedupError> {
        let spec = Self { columns, normalized };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> Result<(), DedupError> {
        if self.columns.is_empty() {
            return Err(DedupError::ConfigValidation(
                "at least one key column is required".into(),
            ));
        }

        for (i, col) in self.columns.iter().enumerate() {
            if self.columns[..i].contains(col) {
                return Err(DedupError::ConfigValidation(format!(
                    "duplicate key column '{col}'"
                )));
            }
        }

        for col in &self.normalized {
            if !self.columns.contains(col) {
                return Err(DedupError::ConfigValidation(format!(
                    "normalized column '{col}' is not a key column"
                )));
            }
        }

        Ok(())
    }

    pub fn is_normalized(&self, column: &str) -> bool {
        self.normalized.iter().any(|c| c == column)
    }

    /// Header position of each key column, in key order. `None` means the
    /// header does not carry that column at all.
    pub fn column_indices(&self, headers: &[String]) -> Vec<Option<usize>> {
        self.columns
            .iter()
            .map(|col| headers.iter().position(|h| h == col))
            .collect()
    }

    /// Comparison key for one record. Fails with the first key column the
    /// record has no value for; same record + same spec always yields the
    /// same key or the same error.
    pub fn build_key(
        &self,
        indices: &[Option<usize>],
        record: &Record,
    ) -> Result<NormalizedKey, MissingColumn> {
        let mut parts = Vec::with_capacity(self.columns.len());

        for (col, idx) in self.columns.iter().zip(indices.iter().copied()) {
            let value = idx
                .and_then(|i| record.fields.get(i))
                .ok_or_else(|| MissingColumn {
                    column: col.clone(),
                    row: record.row,
                })?;

            if self.is_normalized(col) {
                parts.push(normalize(value));
            } else {
                parts.push(value.clone());
            }
        }

        Ok(NormalizedKey(parts))
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A key column a record carries no value for. Recovered locally by the
/// engine: the record is routed to the unprocessable bucket and the pass
/// continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingColumn {
    pub column: String,
    pub row: usize,
}

impl fmt::Display for MissingColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record {}: missing key column '{}'", self.row, self.column)
    }
}

impl std::error::Error for MissingColumn {}
