use serde::{Deserialize, Serialize};

use crate::error::DedupError;
use crate::key::KeySpec;

// ---------------------------------------------------------------------------
// Job config
// ---------------------------------------------------------------------------

/// A clean job: where the rows come from, where they go, and how they are
/// keyed. Paths are interpreted relative to the config file by the caller.
#[derive(Debug, Deserialize)]
pub struct CleanConfig {
    pub input: String,
    pub output: String,
    #[serde(default)]
    pub report: Option<String>,
    #[serde(default)]
    pub dropped: Option<String>,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
    pub keys: Vec<String>,
    #[serde(default)]
    pub normalize: Vec<String>,
    #[serde(default)]
    pub keep: KeepPolicy,
}

fn default_delimiter() -> char {
    ','
}

// ---------------------------------------------------------------------------
// Keep policy
// ---------------------------------------------------------------------------

/// Which records of a duplicate group survive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeepPolicy {
    /// Keep the earliest record of each key group.
    First,
    /// Drop every member of any key group with more than one record.
    None,
}

impl Default for KeepPolicy {
    fn default() -> Self {
        Self::First
    }
}

impl std::fmt::Display for KeepPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::First => write!(f, "first"),
            Self::None => write!(f, "none"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl CleanConfig {
    pub fn from_toml(input: &str) -> Result<Self, DedupError> {
        let config: CleanConfig =
            toml::from_str(input).map_err(|e| DedupError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), DedupError> {
        if !self.delimiter.is_ascii() {
            return Err(DedupError::ConfigValidation(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )));
        }
        self.key_spec().map(|_| ())
    }

    /// The KeySpec this job dedupes under.
    pub fn key_spec(&self) -> Result<KeySpec, DedupError> {
        KeySpec::new(self.keys.clone(), self.normalize.clone())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"
input = "vendors.csv"
output = "cleaned.csv"
report = "report.txt"
keys = ["VendorName", "ProductID"]
normalize = ["VendorName"]
keep = "first"
"#;

    #[test]
    fn parse_valid() {
        let config = CleanConfig::from_toml(VALID).unwrap();
        assert_eq!(config.input, "vendors.csv");
        assert_eq!(config.output, "cleaned.csv");
        assert_eq!(config.report.as_deref(), Some("report.txt"));
        assert_eq!(config.dropped, None);
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.keys, vec!["VendorName", "ProductID"]);
        assert_eq!(config.normalize, vec!["VendorName"]);
        assert_eq!(config.keep, KeepPolicy::First);
    }

    #[test]
    fn parse_minimal_defaults() {
        let config = CleanConfig::from_toml(
            r#"
input = "in.csv"
output = "out.csv"
keys = ["Id"]
"#,
        )
        .unwrap();
        assert_eq!(config.delimiter, ',');
        assert!(config.normalize.is_empty());
        assert_eq!(config.keep, KeepPolicy::First);
        assert_eq!(config.report, None);
    }

    #[test]
    fn parse_keep_none_and_tab_delimiter() {
        let config = CleanConfig::from_toml(
            r#"
input = "in.tsv"
output = "out.tsv"
delimiter = "\t"
keys = ["Id"]
keep = "none"
"#,
        )
        .unwrap();
        assert_eq!(config.delimiter, '\t');
        assert_eq!(config.keep, KeepPolicy::None);
    }

    #[test]
    fn reject_empty_keys() {
        let err = CleanConfig::from_toml(
            r#"
input = "in.csv"
output = "out.csv"
keys = []
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("at least one key column"));
    }

    #[test]
    fn reject_duplicate_keys() {
        let err = CleanConfig::from_toml(
            r#"
input = "in.csv"
output = "out.csv"
keys = ["Id", "Id"]
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate key column"));
    }

    #[test]
    fn reject_normalize_outside_keys() {
        let err = CleanConfig::from_toml(
            r#"
input = "in.csv"
output = "out.csv"
keys = ["Id"]
normalize = ["VendorName"]
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("not a key column"));
    }

    #[test]
    fn reject_unknown_keep_value() {
        let err = CleanConfig::from_toml(
            r#"
input = "in.csv"
output = "out.csv"
keys = ["Id"]
keep = "last"
"#,
        );
        assert!(err.is_err(), "unknown keep policy should fail deserialization");
    }

    #[test]
    fn reject_non_ascii_delimiter() {
        let err = CleanConfig::from_toml(
            r#"
input = "in.csv"
output = "out.csv"
delimiter = "§"
keys = ["Id"]
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("ASCII"));
    }
}
