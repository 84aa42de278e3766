//! Configuration validation errors and semantic validation.

use std::path::PathBuf;

use bt_rules::RuleError;
use thiserror::Error;

use crate::RuleTableFile;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Semantic validation failed: {0}")]
    SemanticError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Version mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },

    #[error("Invalid rule: {0}")]
    Rule(#[from] RuleError),
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::SemanticError(_) => 63,
            ValidationError::InvalidValue { .. } => 65,
            ValidationError::VersionMismatch { .. } => 66,
            ValidationError::Rule(_) => 67,
        }
    }
}

/// A validation error tied to the file it came from.
#[derive(Error, Debug)]
#[error("{}: {source}", path.display())]
pub struct ConfigError {
    pub path: PathBuf,
    #[source]
    pub source: ValidationError,
}

impl ConfigError {
    pub fn new(path: impl Into<PathBuf>, source: ValidationError) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

impl From<ConfigError> for bt_common::Error {
    fn from(err: ConfigError) -> Self {
        let text = err.to_string();
        match err.source {
            ValidationError::Rule(RuleError::Pattern { rule, message, .. }) => {
                bt_common::Error::InvalidPattern {
                    rule,
                    message: format!("{}: {}", err.path.display(), message),
                }
            }
            ValidationError::VersionMismatch { .. } | ValidationError::ParseError(_) => {
                bt_common::Error::SchemaValidation(text)
            }
            ValidationError::IoError(_) => bt_common::Error::Config(text),
            _ => bt_common::Error::InvalidRuleTable(text),
        }
    }
}

/// Validate a rule-table file semantically.
///
/// Checks the schema version and the shape of each rule. Patterns are not
/// compiled here; [`RuleTableFile::compile`] does that.
pub fn validate_table_file(file: &RuleTableFile) -> ValidationResult<()> {
    if file.schema_version != crate::CONFIG_SCHEMA_VERSION {
        return Err(ValidationError::VersionMismatch {
            expected: crate::CONFIG_SCHEMA_VERSION.to_string(),
            actual: file.schema_version.clone(),
        });
    }

    if file.rules.is_empty() {
        return Err(ValidationError::SemanticError(format!(
            "rule table for {} has no rules",
            file.jurisdiction
        )));
    }

    for (idx, rule) in file.rules.iter().enumerate() {
        for (pos, pattern) in rule.patterns.iter().enumerate() {
            if pattern.trim().is_empty() {
                return Err(ValidationError::InvalidValue {
                    field: format!("rules[{}].patterns[{}]", idx, pos),
                    message: "Must not be blank".to_string(),
                });
            }
        }

        for tag in &rule.tags {
            if tag != tag.trim() || tag.chars().any(char::is_uppercase) {
                return Err(ValidationError::InvalidValue {
                    field: format!("rules[{}].tags", idx),
                    message: format!("Tags are lower-case without padding, got {:?}", tag),
                });
            }
        }

        if rule.stop && rule.is_untagged() && rule.attrs.is_empty() {
            return Err(ValidationError::SemanticError(format!(
                "rules[{}] stops evaluation but adds no tags or attributes",
                idx
            )));
        }
    }

    Ok(())
}

/// Tags used by the file that are outside the known vocabulary.
///
/// The vocabulary is open, so these are warnings rather than errors.
pub fn unknown_tags(file: &RuleTableFile) -> Vec<(usize, &str)> {
    file.rules
        .iter()
        .enumerate()
        .flat_map(|(idx, rule)| {
            rule.tags
                .iter()
                .filter(|t| !bt_common::is_known_tag(t))
                .map(move |t| (idx, t.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bt_common::JurisdictionId;
    use bt_rules::Rule;

    fn file(rules: Vec<Rule>) -> RuleTableFile {
        RuleTableFile::new(JurisdictionId::parse("nh").unwrap(), rules)
    }

    #[test]
    fn test_valid_file() {
        let f = file(vec![Rule::new("Ought to Pass").tag("passage")]);
        assert!(validate_table_file(&f).is_ok());
    }

    #[test]
    fn test_version_mismatch() {
        let mut f = file(vec![Rule::new("x")]);
        f.schema_version = "0.9.0".to_string();
        let err = validate_table_file(&f).unwrap_err();
        assert!(matches!(err, ValidationError::VersionMismatch { .. }));
        assert_eq!(err.code(), 66);
    }

    #[test]
    fn test_empty_rules() {
        let err = validate_table_file(&file(vec![])).unwrap_err();
        assert!(matches!(err, ValidationError::SemanticError(_)));
    }

    #[test]
    fn test_blank_pattern_field() {
        let err = validate_table_file(&file(vec![Rule::new("x"), Rule::new("  ")])).unwrap_err();
        match err {
            ValidationError::InvalidValue { field, .. } => {
                assert_eq!(field, "rules[1].patterns[0]")
            }
            other => panic!("unexpected: {other}"),
        }
    }

    #[test]
    fn test_uppercase_tag_rejected() {
        let err = validate_table_file(&file(vec![Rule::new("x").tag("Passage")])).unwrap_err();
        assert_eq!(err.code(), 65);
    }

    #[test]
    fn test_useless_stop_rejected() {
        let err = validate_table_file(&file(vec![Rule::new("x").stop()])).unwrap_err();
        assert!(matches!(err, ValidationError::SemanticError(_)));
    }

    #[test]
    fn test_unknown_tags_are_reported() {
        let f = file(vec![
            Rule::new("a").tag("passage"),
            Rule::new("b").tags(["consent-calendar", "reading-2"]),
        ]);
        assert_eq!(unknown_tags(&f), vec![(1, "consent-calendar")]);
    }

    #[test]
    fn test_config_error_into_common() {
        let err = ConfigError::new(
            "/tmp/nh.json",
            ValidationError::Rule(RuleError::Pattern {
                rule: 3,
                pattern: "(".into(),
                message: "unclosed group".into(),
            }),
        );
        assert!(err.to_string().starts_with("/tmp/nh.json: "));
        let common: bt_common::Error = err.into();
        assert_eq!(common.code(), 20);
    }
}
