//! A rule table plus jurisdiction-specific processing.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::{Classification, Result, Rule, RuleTable};

/// Pre- and post-processing around rule evaluation.
///
/// Hooks carry what cannot be expressed as a pattern: acronym expansion
/// before matching, or splitting and cleaning captured names afterwards.
pub trait CategorizerHooks: Send + Sync {
    /// Rewrite the text before any rule is evaluated.
    fn before_categorize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        Cow::Borrowed(text)
    }

    /// Adjust the result after all rules were evaluated.
    ///
    /// `text` is the rewritten text that rules were matched against.
    fn after_categorize(&self, _text: &str, _result: &mut Classification) {}
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHooks;

impl CategorizerHooks for NoHooks {}

/// Categorizes action text for one jurisdiction.
///
/// Cheap to clone; the table and hooks are shared.
#[derive(Clone)]
pub struct Categorizer {
    table: Arc<RuleTable>,
    hooks: Arc<dyn CategorizerHooks>,
}

impl Categorizer {
    /// Compile `rules` into a categorizer without hooks.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        Ok(Self::from_table(RuleTable::new(rules)?))
    }

    /// Compile `rules` into a categorizer with `hooks`.
    pub fn with_hooks(rules: Vec<Rule>, hooks: impl CategorizerHooks + 'static) -> Result<Self> {
        Ok(Self::from_parts(
            Arc::new(RuleTable::new(rules)?),
            Arc::new(hooks),
        ))
    }

    /// Wrap an already compiled table.
    pub fn from_table(table: RuleTable) -> Self {
        Self::from_parts(Arc::new(table), Arc::new(NoHooks))
    }

    /// Assemble from shared parts.
    pub fn from_parts(table: Arc<RuleTable>, hooks: Arc<dyn CategorizerHooks>) -> Self {
        Self { table, hooks }
    }

    /// The compiled table.
    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    /// Shared handle to the hooks, for building a derived categorizer.
    pub fn hooks(&self) -> Arc<dyn CategorizerHooks> {
        Arc::clone(&self.hooks)
    }

    /// Categorize one action string.
    pub fn categorize(&self, text: &str) -> Classification {
        let prepared = self.hooks.before_categorize(text);
        if let Cow::Owned(ref rewritten) = prepared {
            tracing::trace!(
                target: "bt_rules::categorizer",
                original = text,
                rewritten = rewritten.as_str(),
                "text rewritten before categorizing"
            );
        }

        let mut result = self.table.categorize(&prepared);
        self.hooks.after_categorize(&prepared, &mut result);
        result.attrs.finalize();
        result
    }
}

impl fmt::Debug for Categorizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Categorizer")
            .field("rules", &self.table.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl CategorizerHooks for Upper {
        fn before_categorize<'a>(&self, text: &'a str) -> Cow<'a, str> {
            Cow::Owned(text.to_uppercase())
        }

        fn after_categorize(&self, _text: &str, result: &mut Classification) {
            if result.has_tag("executive-signature") {
                result.attrs.insert("actor", "governor");
            }
            result.attrs.insert("blank", " ");
        }
    }

    #[test]
    fn test_no_hooks_matches_table() {
        let cat = Categorizer::new(vec![Rule::new("Signed by the Governor")
            .tag("executive-signature")])
        .unwrap();
        assert_eq!(
            cat.categorize("Signed by the Governor"),
            cat.table().categorize("Signed by the Governor")
        );
    }

    #[test]
    fn test_hooks_run_in_order() {
        let cat = Categorizer::with_hooks(
            vec![Rule::new("SIGNED BY THE GOVERNOR").tag("executive-signature")],
            Upper,
        )
        .unwrap();

        let result = cat.categorize("signed by the governor");
        assert!(result.has_tag("executive-signature"));
        assert_eq!(result.attrs.single("actor"), Some("governor"));
        assert!(!result.attrs.contains_key("blank"));
    }

    #[test]
    fn test_clone_shares_table() {
        let cat = Categorizer::new(vec![Rule::new("x")]).unwrap();
        let other = cat.clone();
        assert!(std::ptr::eq(cat.table(), other.table()));
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Categorizer>();
        assert_send_sync::<RuleTable>();
    }
}
