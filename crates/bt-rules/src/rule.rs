//! Rule definitions.
//!
//! A [`Rule`] pairs one or more patterns with the tags to apply when any of
//! them matches. A rule with no tags is legal: it exists to capture
//! attributes, or to document that a phrase is known and deliberately
//! untagged.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// A single categorization rule.
///
/// Rules are plain data; they are compiled into a [`RuleTable`](crate::RuleTable)
/// before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Patterns searched for anywhere in the action text. The rule matches
    /// when any of them matches.
    #[serde(alias = "pattern", deserialize_with = "one_or_many")]
    pub patterns: Vec<String>,

    /// Tags added to the result on match. May be empty.
    #[serde(default, deserialize_with = "one_or_many")]
    pub tags: Vec<String>,

    /// Stop evaluating later rules once this one matches.
    #[serde(default, skip_serializing_if = "is_false")]
    pub stop: bool,

    /// Static attributes added to the result on match.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,

    /// Overrides the table's whitespace relaxation for this rule's patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relax_whitespace: Option<bool>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(s) => vec![s],
        OneOrMany::Many(v) => v,
    })
}

impl Rule {
    /// Create an untagged rule with a single pattern.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            patterns: vec![pattern.into()],
            tags: Vec::new(),
            stop: false,
            attrs: BTreeMap::new(),
            relax_whitespace: None,
        }
    }

    /// Create an untagged rule that matches if any of `patterns` matches.
    pub fn any<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns.into_iter().map(Into::into).collect(),
            tags: Vec::new(),
            stop: false,
            attrs: BTreeMap::new(),
            relax_whitespace: None,
        }
    }

    /// Add one tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add several tags.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Mark the rule as terminal.
    pub fn stop(mut self) -> Self {
        self.stop = true;
        self
    }

    /// Set the terminal flag explicitly.
    pub fn with_stop(mut self, stop: bool) -> Self {
        self.stop = stop;
        self
    }

    /// Add a static attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Compile this rule's patterns with or without whitespace relaxation,
    /// whatever the table default is.
    pub fn relax_whitespace(mut self, relax: bool) -> Self {
        self.relax_whitespace = Some(relax);
        self
    }

    /// True if this rule adds no tags.
    pub fn is_untagged(&self) -> bool {
        self.tags.is_empty()
    }
}
