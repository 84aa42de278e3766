//! Error types for billtags.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Remediation hints for humans
//!
//! Categorization itself never fails: an input that matches no rule is an
//! empty result, not an error. Everything here is about configuration,
//! lookup, and I/O around the categorizer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for billtags operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Rule-table files, schema, config resolution.
    Config,
    /// Rule compilation (bad patterns, empty rules).
    Rules,
    /// Caller-supplied input (unknown jurisdiction, bad id).
    Input,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Rules => write!(f, "rules"),
            ErrorCategory::Input => write!(f, "input"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for billtags.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid rule table: {0}")]
    InvalidRuleTable(String),

    #[error("schema validation failed: {0}")]
    SchemaValidation(String),

    // Rule errors (20-29)
    #[error("invalid pattern in rule {rule}: {message}")]
    InvalidPattern { rule: usize, message: String },

    // Input errors (30-39)
    #[error("unknown jurisdiction: {jurisdiction}")]
    UnknownJurisdiction { jurisdiction: String },

    #[error("invalid jurisdiction id: {0}")]
    InvalidJurisdiction(String),

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Configuration errors
    /// - 20-29: Rule errors
    /// - 30-39: Input errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidRuleTable(_) => 11,
            Error::SchemaValidation(_) => 12,
            Error::InvalidPattern { .. } => 20,
            Error::UnknownJurisdiction { .. } => 30,
            Error::InvalidJurisdiction(_) => 31,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(_) | Error::InvalidRuleTable(_) | Error::SchemaValidation(_) => {
                ErrorCategory::Config
            }
            Error::InvalidPattern { .. } => ErrorCategory::Rules,
            Error::UnknownJurisdiction { .. } | Error::InvalidJurisdiction(_) => {
                ErrorCategory::Input
            }
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(_) | Error::SchemaValidation(_) => {
                "Run 'billtags check' to validate rule-table files"
            }
            Error::InvalidRuleTable(_) | Error::InvalidPattern { .. } => {
                "Fix the reported rule; tables are compiled eagerly at startup"
            }
            Error::UnknownJurisdiction { .. } => {
                "Run 'billtags jurisdictions' to list available rule tables"
            }
            Error::InvalidJurisdiction(_) => "Use a 2-3 letter postal abbreviation such as 'ny'",
            Error::Io(_) => "Check file permissions and paths",
            Error::Json(_) => "Check the JSON syntax of the rule-table file",
        }
    }

    /// Structured form for machine consumers.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "code": self.code(),
            "category": self.category(),
            "message": self.to_string(),
            "remediation": self.remediation(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_grouped_by_category() {
        let errors = vec![
            Error::Config("x".into()),
            Error::InvalidRuleTable("x".into()),
            Error::SchemaValidation("x".into()),
            Error::InvalidPattern {
                rule: 3,
                message: "x".into(),
            },
            Error::UnknownJurisdiction {
                jurisdiction: "zz".into(),
            },
            Error::InvalidJurisdiction("x".into()),
            Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "x")),
        ];

        for err in errors {
            let code = err.code();
            let expected = match err.category() {
                ErrorCategory::Config => 10..20,
                ErrorCategory::Rules => 20..30,
                ErrorCategory::Input => 30..40,
                ErrorCategory::Io => 60..70,
            };
            assert!(expected.contains(&code), "{} has code {}", err, code);
        }
    }

    #[test]
    fn test_display() {
        let err = Error::UnknownJurisdiction {
            jurisdiction: "zz".into(),
        };
        assert_eq!(err.to_string(), "unknown jurisdiction: zz");
    }

    #[test]
    fn test_to_json() {
        let err = Error::InvalidPattern {
            rule: 4,
            message: "unclosed group".into(),
        };
        let json = err.to_json();
        assert_eq!(json["code"], 20);
        assert_eq!(json["category"], "rules");
        assert!(json["message"].as_str().unwrap().contains("rule 4"));
    }
}
