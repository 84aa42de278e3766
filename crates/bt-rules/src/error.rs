//! Error types for rule compilation.
//!
//! Every variant is raised while a table is being built. Once a
//! [`RuleTable`](crate::RuleTable) exists, categorizing text cannot fail.

use thiserror::Error;

/// Result type for rule compilation.
pub type Result<T> = std::result::Result<T, RuleError>;

/// Errors that can occur while compiling a rule table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// A pattern failed to compile.
    #[error("rule {rule}: pattern {pattern:?} failed to compile: {message}")]
    Pattern {
        rule: usize,
        pattern: String,
        message: String,
    },

    /// A rule has no patterns at all.
    #[error("rule {rule} has no patterns")]
    EmptyPatterns { rule: usize },

    /// A rule has an empty pattern string, which would match everything.
    #[error("rule {rule} has an empty pattern")]
    EmptyPattern { rule: usize },

    /// A rule lists an empty tag.
    #[error("rule {rule} has an empty tag")]
    EmptyTag { rule: usize },

    /// A rule has a static attribute with an empty name.
    #[error("rule {rule} has a static attribute with an empty name")]
    EmptyAttrName { rule: usize },
}

impl RuleError {
    /// Index of the offending rule within its table.
    pub fn rule_index(&self) -> usize {
        match self {
            RuleError::Pattern { rule, .. }
            | RuleError::EmptyPatterns { rule }
            | RuleError::EmptyPattern { rule }
            | RuleError::EmptyTag { rule }
            | RuleError::EmptyAttrName { rule } => *rule,
        }
    }
}

impl From<RuleError> for bt_common::Error {
    fn from(err: RuleError) -> Self {
        match err {
            RuleError::Pattern { rule, message, .. } => {
                bt_common::Error::InvalidPattern { rule, message }
            }
            other => bt_common::Error::InvalidRuleTable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_index() {
        assert_eq!(RuleError::EmptyTag { rule: 7 }.rule_index(), 7);
        let err = RuleError::Pattern {
            rule: 2,
            pattern: "(".into(),
            message: "unclosed".into(),
        };
        assert_eq!(err.rule_index(), 2);
    }

    #[test]
    fn test_into_common_error() {
        let err: bt_common::Error = RuleError::Pattern {
            rule: 2,
            pattern: "(".into(),
            message: "unclosed".into(),
        }
        .into();
        assert_eq!(err.code(), 20);

        let err: bt_common::Error = RuleError::EmptyPatterns { rule: 0 }.into();
        assert_eq!(err.code(), 11);
    }
}
