//! Configuration-related errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{ValidationErrors, ValidationErrorsKind};

/// Errors that can occur while loading configuration or credential files.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "details")]
pub enum ConfigError {
    /// Config file not found at expected path
    #[error("Config not found: {path}")]
    NotFound {
        /// Filesystem path where config was expected
        path: String,
    },

    /// Config file could not be read
    #[error("Config read error for {path}: {message}")]
    ReadError {
        /// Filesystem path that failed
        path: String,
        /// Description of the IO failure
        message: String,
    },

    /// Config file parse error (JSON)
    #[error("Config parse error: {message}")]
    ParseError {
        /// Description of the parse failure
        message: String,
    },

    /// Config validation error (invalid values)
    #[error("Config validation error for {field}: {message}")]
    ValidationError {
        /// Name of the field that failed validation
        field: String,
        /// Description of the validation failure
        message: String,
    },
}

impl ConfigError {
    /// Create a parse error from a serde_json error.
    pub fn from_json_error(e: &serde_json::Error) -> Self {
        Self::ParseError { message: e.to_string() }
    }

    /// Create a read error from an IO error.
    pub fn from_io_error(path: &std::path::Path, e: &std::io::Error) -> Self {
        Self::ReadError { path: path.display().to_string(), message: e.to_string() }
    }

    /// Collapse validator output into the first offending field (dotted path for nested structs).
    pub fn from_validation_errors(errors: &ValidationErrors) -> Self {
        match first_field_error(errors, "") {
            Some((field, message)) => Self::ValidationError { field, message },
            None => Self::ValidationError { field: "config".to_string(), message: errors.to_string() },
        }
    }
}

fn first_field_error(errors: &ValidationErrors, prefix: &str) -> Option<(String, String)> {
    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() { field.to_string() } else { format!("{}.{}", prefix, field) };
        match kind {
            ValidationErrorsKind::Field(errs) => {
                let message = errs
                    .iter()
                    .map(|e| e.message.as_ref().map_or_else(|| e.code.to_string(), |m| m.to_string()))
                    .collect::<Vec<_>>()
                    .join(", ");
                return Some((path, message));
            },
            ValidationErrorsKind::Struct(inner) => {
                if let Some(found) = first_field_error(inner, &path) {
                    return Some(found);
                }
            },
            ValidationErrorsKind::List(entries) => {
                for (idx, inner) in entries {
                    if let Some(found) = first_field_error(inner, &format!("{}[{}]", path, idx)) {
                        return Some(found);
                    }
                }
            },
        }
    }
    None
}
