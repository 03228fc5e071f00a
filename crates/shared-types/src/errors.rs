//! Common error types used across the interactivity crates

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base error type for interactivity operations
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum ChartError {
    #[error("Unknown element type token: {token}")]
    InvalidElementId { token: String },

    #[error("Malformed element id '{id}': {message}")]
    MalformedElementId { id: String, message: String },

    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: String,
        index: usize,
        len: usize,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: String,
        field: Option<String>,
    },
}

/// Result type alias for interactivity operations
pub type Result<T> = std::result::Result<T, ChartError>;

/// Validation outcome for a chart definition or chart state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn from_lists(errors: Vec<String>, warnings: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChartError::IndexOutOfRange {
            kind: "serie".to_string(),
            index: 5,
            len: 2,
        };
        assert_eq!(err.to_string(), "serie index 5 out of range (len 2)");
    }

    #[test]
    fn test_validation_result() {
        assert!(ValidationResult::ok().is_valid);
        let failed =
            ValidationResult::from_lists(vec!["bad".to_string()], vec!["meh".to_string()]);
        assert!(!failed.is_valid);
        assert_eq!(failed.warnings.len(), 1);
    }
}
