//! Categorization results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::Attributes;

/// The outcome of categorizing one action string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Category tags that apply. Empty means uncategorized.
    pub tags: BTreeSet<String>,

    /// Attributes extracted from the text and from matching rules.
    #[serde(default, skip_serializing_if = "Attributes::is_empty")]
    pub attrs: Attributes,

    /// Indices of the rules that matched, in evaluation order.
    #[serde(default)]
    pub matched_rules: Vec<usize>,
}

impl Classification {
    /// True if no tag applies. Callers treat this as a data-quality signal.
    pub fn is_uncategorized(&self) -> bool {
        self.tags.is_empty()
    }

    /// True if `tag` applies.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Tags as borrowed strings, sorted.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags.iter().map(String::as_str).collect()
    }

    /// Actor attribute, falling back to the actor implied by the tags.
    pub fn actor(&self) -> Option<&str> {
        self.attrs
            .single("actor")
            .or_else(|| bt_common::implied_actor(self.tags.iter().map(String::as_str)))
    }
}
