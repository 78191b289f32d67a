use std::fmt;

use serde::Serialize;

use crate::config::KeepPolicy;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single raw row from the input table. Values are kept as read, in column
/// order; no type coercion.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    /// 1-based position in the input sequence (header excluded).
    pub row: usize,
    pub fields: Vec<String>,
}

/// Pre-loaded records plus the header that names their columns.
#[derive(Debug, Clone)]
pub struct RecordSet {
    pub headers: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Value of `column` for `record`. `None` when the header does not carry
    /// the column, or the row is too short to reach it.
    pub fn value<'a>(&self, record: &'a Record, column: &str) -> Option<&'a str> {
        let idx = self.headers.iter().position(|h| h == column)?;
        record.fields.get(idx).map(String::as_str)
    }
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Comparison identity for a record: one canonical value per key column, in
/// key-column order. Two records are duplicates iff their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NormalizedKey(pub Vec<String>);

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(" | "))
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// A duplicate row together with the key it collided on.
#[derive(Debug, Clone, Serialize)]
pub struct DroppedRecord {
    pub record: Record,
    pub key: NormalizedKey,
    /// Row of the kept record this one collided with. Under keep policy
    /// `none`, the reclassified first occurrence points at itself.
    pub first_row: usize,
}

/// A row no key could be built for. Excluded from both kept and dropped.
#[derive(Debug, Clone, Serialize)]
pub struct UnprocessableRecord {
    pub record: Record,
    /// The key column the record had no value for.
    pub column: String,
}

/// All input rows sharing one normalized key, when there is more than one.
#[derive(Debug, Clone, Serialize)]
pub struct DuplicateGroup {
    pub key: NormalizedKey,
    pub count: usize,
    pub rows: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub kept: usize,
    pub duplicates: usize,
    pub unprocessable: usize,
    pub duplicate_groups: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub engine_version: String,
    pub run_at: String,
    pub keep: KeepPolicy,
}

#[derive(Debug, Clone, Serialize)]
pub struct DedupResult {
    pub meta: RunMeta,
    pub summary: RunSummary,
    pub kept: Vec<Record>,
    pub dropped: Vec<DroppedRecord>,
    pub unprocessable: Vec<UnprocessableRecord>,
    pub groups: Vec<DuplicateGroup>,
}
