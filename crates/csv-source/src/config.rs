//! Reader configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use structer_core::SchemaOptions;

/// Configuration for reading a CSV source into records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Whether the CSV has a header row (default: true)
    pub has_headers: bool,

    /// CSV delimiter character (default: ','), must be ASCII
    pub delimiter: char,

    /// Column names to use when has_headers is false
    pub column_names: Option<Vec<String>>,

    /// Header row the schema is built from
    /// When set, the source's header must match it exactly
    pub expected_columns: Option<Vec<String>>,

    /// Fail on header mismatch instead of logging a warning (default: true)
    pub strict_headers: bool,

    /// Trim whitespace around every field while reading
    pub trim: bool,

    /// Options forwarded to the record schema
    pub schema: SchemaOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            has_headers: true,
            delimiter: ',',
            column_names: None,
            expected_columns: None,
            strict_headers: true,
            trim: false,
            schema: SchemaOptions::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml).context("Failed to parse YAML config")?;
        config.delimiter_byte()?;
        Ok(config)
    }

    /// The delimiter as the single byte the csv reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            anyhow::bail!("CSV delimiter must be an ASCII character, got '{}'", self.delimiter)
        }
    }
}
