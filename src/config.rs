use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Knobs for the ingestion pipeline. Column names are matched against
/// headers ignoring ASCII case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Columns a reservation export is allowed to carry. A non-empty list
    /// projects the table down to these columns, in list order, before any
    /// row rule runs; an empty list keeps every parsed column.
    #[serde(default)]
    pub known_columns: Vec<String>,

    /// Case-insensitive substrings that mark a key-column value as a
    /// non-data row (spreadsheet section headers, blank-week dividers).
    #[serde(default = "default_junk_tokens")]
    pub junk_tokens: Vec<String>,

    /// Name of the column the junk tokens are matched against.
    #[serde(default = "default_key_column")]
    pub key_column: String,

    /// The two identifying columns. A row missing both is dropped; a header
    /// containing neither is rejected outright.
    #[serde(default = "default_required_columns")]
    pub required_columns: [String; 2],

    /// Columns whose non-missing fraction falls below this are dropped.
    #[serde(default = "default_min_present_fraction")]
    pub min_present_fraction: f64,

    /// How many non-empty values the date detector samples per column.
    #[serde(default = "default_date_sample_size")]
    pub date_sample_size: usize,
}

fn default_junk_tokens() -> Vec<String> {
    vec!["WEEK".to_string(), "NONE".to_string()]
}

fn default_key_column() -> String {
    "date".to_string()
}

fn default_required_columns() -> [String; 2] {
    ["date".to_string(), "villa".to_string()]
}

fn default_min_present_fraction() -> f64 {
    0.1
}

fn default_date_sample_size() -> usize {
    10
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            known_columns: Vec::new(),
            junk_tokens: default_junk_tokens(),
            key_column: default_key_column(),
            required_columns: default_required_columns(),
            min_present_fraction: default_min_present_fraction(),
            date_sample_size: default_date_sample_size(),
        }
    }
}

impl IngestConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, TableError> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }
}
