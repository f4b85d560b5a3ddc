use crate::result::{Result, SplitError};
use serde::{Deserialize, Serialize};
use std::fs;

pub const DEFAULT_DELIMITER: &str = ";";
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tokenizer and splitter settings, loadable from JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitOptions {
    /// Drop comment atoms before flattening statements
    pub strip_comments: bool,
    /// Statement delimiter in effect at the start of the input
    pub delimiter: String,
    /// Honour `DELIMITER <text>` directives (MySQL client scripts)
    pub delimiter_directive: bool,
    /// Maximum nesting depth of bracket groups; at least 1
    pub max_depth: usize,
}

impl Default for SplitOptions {
    fn default() -> Self {
        SplitOptions {
            strip_comments: true,
            delimiter: DEFAULT_DELIMITER.to_string(),
            delimiter_directive: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl SplitOptions {
    /// Load options from a JSON file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let json: serde_json::Value = serde_json::from_str(&content)?;
        Self::from_json(json)
    }

    /// Load options from a serde_json::Value object; missing keys take their defaults,
    /// unknown keys are rejected
    pub fn from_json(json: serde_json::Value) -> Result<Self> {
        if !json.is_object() {
            return Err(SplitError::InvalidOptions(format!(
                "expected object, got {json}"
            )));
        }
        let options: SplitOptions = serde_json::from_value(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn with_strip_comments(mut self, strip_comments: bool) -> Self {
        self.strip_comments = strip_comments;
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    pub fn with_delimiter_directive(mut self, enabled: bool) -> Self {
        self.delimiter_directive = enabled;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Reject settings the tokenizer cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.delimiter.is_empty() {
            return Err(SplitError::InvalidOptions(
                "delimiter must not be empty".to_string(),
            ));
        }
        if self.delimiter.chars().any(char::is_whitespace) {
            return Err(SplitError::InvalidOptions(format!(
                "delimiter must not contain whitespace, got {:?}",
                self.delimiter
            )));
        }
        if self.max_depth == 0 {
            return Err(SplitError::InvalidOptions(
                "max_depth must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
