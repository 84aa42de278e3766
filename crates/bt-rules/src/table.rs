//! Compiled rule tables.
//!
//! A [`RuleTable`] is built once, validated eagerly, and then shared
//! read-only. All rules are evaluated in order and their tags are unioned;
//! the only short-circuit is a matching rule with `stop` set. Tables written
//! for this engine express precedence through pattern specificity (for
//! example a negative look-ahead) rather than through rule order.

use std::collections::BTreeSet;

use crate::{Classification, CompiledPattern, Result, Rule, RuleError};

/// Default regex backtracking budget per pattern evaluation.
pub const DEFAULT_BACKTRACK_LIMIT: usize = 1_000_000;

/// Compilation options for a rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableOptions {
    /// Rewrite whitespace runs in patterns to `\s{0,4}`. A rule's own
    /// `relax_whitespace` wins over this.
    pub relax_whitespace: bool,
    /// Backtracking budget for patterns using look-around or backreferences.
    pub backtrack_limit: usize,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            relax_whitespace: true,
            backtrack_limit: DEFAULT_BACKTRACK_LIMIT,
        }
    }
}

#[derive(Debug, Clone)]
struct CompiledRule {
    rule: Rule,
    patterns: Vec<CompiledPattern>,
    relax_whitespace: bool,
}

/// An ordered, compiled, immutable list of rules.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<CompiledRule>,
    options: TableOptions,
}

impl RuleTable {
    /// Compile `rules` with default options.
    pub fn new(rules: Vec<Rule>) -> Result<Self> {
        Self::with_options(rules, TableOptions::default())
    }

    /// Compile `rules` with explicit options.
    ///
    /// Fails on the first invalid rule; the error carries its index.
    pub fn with_options(rules: Vec<Rule>, options: TableOptions) -> Result<Self> {
        let compiled = rules
            .into_iter()
            .enumerate()
            .map(|(idx, rule)| compile_rule(idx, rule, &options))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            target: "bt_rules::table",
            rules = compiled.len(),
            relax_whitespace = options.relax_whitespace,
            "compiled rule table"
        );

        Ok(Self {
            rules: compiled,
            options,
        })
    }

    /// Build a new table with `more` appended after the existing rules.
    pub fn extended(&self, more: Vec<Rule>) -> Result<Self> {
        let mut rules: Vec<Rule> = self.rules().cloned().collect();
        rules.extend(more);
        Self::with_options(rules, self.options)
    }

    /// Build a new table with the already compiled rules of `other` appended.
    ///
    /// Each half keeps the patterns it was compiled with, so `other` may use
    /// different options. The result reports this table's options; appended
    /// rules whose relaxation differs from it carry their own override, so
    /// [`rules`](Self::rules) still describes the table exactly.
    pub fn concat(&self, other: &RuleTable) -> Self {
        let default_relax = self.options.relax_whitespace;
        let mut rules = self.rules.clone();
        rules.extend(other.rules.iter().map(|compiled| {
            let mut compiled = compiled.clone();
            compiled.rule.relax_whitespace =
                (compiled.relax_whitespace != default_relax).then_some(compiled.relax_whitespace);
            compiled
        }));
        Self {
            rules,
            options: self.options,
        }
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True if the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Options the table was compiled with.
    pub fn options(&self) -> TableOptions {
        self.options
    }

    /// The rules as authored, in order.
    pub fn rules(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().map(|c| &c.rule)
    }

    /// Rule at `index`.
    pub fn rule(&self, index: usize) -> Option<&Rule> {
        self.rules.get(index).map(|c| &c.rule)
    }

    /// Every tag any rule in the table can produce.
    pub fn vocabulary(&self) -> BTreeSet<&str> {
        self.rules()
            .flat_map(|r| r.tags.iter().map(String::as_str))
            .collect()
    }

    /// Categorize one action string.
    pub fn categorize(&self, text: &str) -> Classification {
        let mut result = Classification::default();

        for (idx, compiled) in self.rules.iter().enumerate() {
            let mut matched = false;

            for pattern in &compiled.patterns {
                if let Some(hit) = pattern.search(text) {
                    matched = true;
                    for (name, value) in hit.captures {
                        result.attrs.insert(name, value);
                    }
                }
            }

            if !matched {
                continue;
            }

            let rule = &compiled.rule;
            result.tags.extend(rule.tags.iter().cloned());
            for (key, value) in &rule.attrs {
                result.attrs.insert(key.clone(), value.clone());
            }
            result.matched_rules.push(idx);

            tracing::trace!(
                target: "bt_rules::table",
                rule = idx,
                tags = ?rule.tags,
                stop = rule.stop,
                "rule matched"
            );

            if rule.stop {
                break;
            }
        }

        result.attrs.finalize();
        result
    }

    /// Tags only.
    pub fn tags(&self, text: &str) -> BTreeSet<String> {
        self.categorize(text).tags
    }
}

fn compile_rule(idx: usize, rule: Rule, options: &TableOptions) -> Result<CompiledRule> {
    if rule.patterns.is_empty() {
        return Err(RuleError::EmptyPatterns { rule: idx });
    }
    if rule.tags.iter().any(|t| t.trim().is_empty()) {
        return Err(RuleError::EmptyTag { rule: idx });
    }
    if rule.attrs.keys().any(|k| k.trim().is_empty()) {
        return Err(RuleError::EmptyAttrName { rule: idx });
    }

    let relax_whitespace = rule.relax_whitespace.unwrap_or(options.relax_whitespace);
    let patterns = rule
        .patterns
        .iter()
        .map(|raw| CompiledPattern::compile(raw, idx, relax_whitespace, options.backtrack_limit))
        .collect::<Result<Vec<_>>>()?;

    Ok(CompiledRule {
        rule,
        patterns,
        relax_whitespace,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(table: &RuleTable, text: &str) -> Vec<String> {
        table.tags(text).into_iter().collect()
    }

    #[test]
    fn test_union_of_matching_rules() {
        let table = RuleTable::new(vec![
            Rule::new("Introduced").tag("introduction"),
            Rule::new("Referred to").tag("referral-committee"),
        ])
        .unwrap();

        assert_eq!(
            tags(&table, "Introduced and Referred to Committee on Finance"),
            vec!["introduction", "referral-committee"]
        );
    }

    #[test]
    fn test_no_match_is_empty() {
        let table = RuleTable::new(vec![Rule::new("Introduced").tag("introduction")]).unwrap();
        let result = table.categorize("Laid on the table");
        assert!(result.is_uncategorized());
        assert!(result.matched_rules.is_empty());
        assert!(result.attrs.is_empty());
    }

    #[test]
    fn test_multi_tag_rule() {
        let table = RuleTable::new(vec![
            Rule::new("Third reading, adopted").tags(["reading-3", "passage"])
        ])
        .unwrap();
        assert_eq!(
            tags(&table, "Third reading, adopted; yeas, 90"),
            vec!["passage", "reading-3"]
        );
    }

    #[test]
    fn test_stop_halts_evaluation() {
        let table = RuleTable::new(vec![
            Rule::new("Filed for intro").tags(["introduction", "reading-1"]).stop(),
            Rule::new("Intro").tag("introduction"),
            Rule::new("intro").tag("filing"),
        ])
        .unwrap();

        let result = table.categorize("Filed for intro.");
        assert_eq!(result.matched_rules, vec![0]);
        assert!(!result.has_tag("filing"));
    }

    #[test]
    fn test_untagged_rule_does_not_suppress_later_rules() {
        let table = RuleTable::new(vec![
            Rule::new("Rejected"),
            Rule::new("Be rejected").tag("failure"),
        ])
        .unwrap();
        assert_eq!(tags(&table, "Be rejected"), vec!["failure"]);
    }

    #[test]
    fn test_static_attrs_and_captures() {
        let table = RuleTable::new(vec![
            Rule::new(r"^Vetoed").tag("executive-veto").attr("actor", "governor"),
            Rule::new(r"memo\.(?P<veto_memo>\d+)"),
        ])
        .unwrap();

        let result = table.categorize("Vetoed memo.132");
        assert_eq!(result.attrs.single("actor"), Some("governor"));
        assert_eq!(result.attrs.single("veto_memo"), Some("132"));
        assert_eq!(result.matched_rules, vec![0, 1]);
    }

    #[test]
    fn test_captures_from_all_matching_patterns_of_a_rule() {
        let table = RuleTable::new(vec![Rule::any([
            r"To (?P<committees>.+?) then",
            r"then (?P<committees>[^;]+)",
        ])])
        .unwrap();
        let result = table.categorize("To Education then Finance");
        assert_eq!(
            result.attrs.values("committees").collect::<Vec<_>>(),
            vec!["Education", "Finance"]
        );
    }

    #[test]
    fn test_invalid_pattern_reports_rule_index() {
        let err = RuleTable::new(vec![
            Rule::new("ok").tag("passage"),
            Rule::new("ok too"),
            Rule::new("(?P<broken").tag("failure"),
        ])
        .unwrap_err();
        assert_eq!(err.rule_index(), 2);
    }

    #[test]
    fn test_structural_validation() {
        let empty = Rule {
            patterns: vec![],
            ..Rule::new("x")
        };
        assert_eq!(
            RuleTable::new(vec![empty]).unwrap_err(),
            RuleError::EmptyPatterns { rule: 0 }
        );
        assert_eq!(
            RuleTable::new(vec![Rule::new("x").tag(" ")]).unwrap_err(),
            RuleError::EmptyTag { rule: 0 }
        );
        assert_eq!(
            RuleTable::new(vec![Rule::new("x").attr("", "v")]).unwrap_err(),
            RuleError::EmptyAttrName { rule: 0 }
        );
    }

    #[test]
    fn test_extended_appends() {
        let base = RuleTable::new(vec![Rule::new("Introduced").tag("introduction")]).unwrap();
        let ext = base
            .extended(vec![Rule::new("Enrolled").tag("enrolled")])
            .unwrap();
        assert_eq!(base.len(), 1);
        assert_eq!(ext.len(), 2);
        assert_eq!(ext.rule(1).unwrap().tags, vec!["enrolled"]);
        assert_eq!(ext.options(), base.options());
    }

    #[test]
    fn test_concat_keeps_each_side_compiled_as_is() {
        let relaxed = RuleTable::new(vec![Rule::new("Read 1st time").tag("reading-1")]).unwrap();
        let strict = RuleTable::with_options(
            vec![Rule::new("Read 2nd time").tag("reading-2")],
            TableOptions {
                relax_whitespace: false,
                ..TableOptions::default()
            },
        )
        .unwrap();

        let both = relaxed.concat(&strict);
        assert_eq!(both.len(), 2);
        assert!(both.tags("Read  1st time").contains("reading-1"));
        assert!(both.tags("Read  2nd time").is_empty());
        assert!(both.tags("Read 2nd time").contains("reading-2"));
    }

    #[test]
    fn test_concat_records_overrides_on_appended_rules() {
        let strict = TableOptions {
            relax_whitespace: false,
            ..TableOptions::default()
        };
        let base =
            RuleTable::with_options(vec![Rule::new("Passed S.").tag("passage")], strict).unwrap();
        let file = RuleTable::new(vec![
            Rule::new("Held on desk").tag("deferral"),
            Rule::new("Taken off notice").relax_whitespace(false),
        ])
        .unwrap();

        let both = base.concat(&file);
        let overrides: Vec<_> = both.rules().map(|r| r.relax_whitespace).collect();
        assert_eq!(overrides, vec![None, Some(true), None]);

        // Recompiling the described rules gives the same behaviour.
        let rebuilt = RuleTable::with_options(both.rules().cloned().collect(), strict).unwrap();
        for text in ["Held  on desk", "Passed  S.", "Taken  off notice"] {
            assert_eq!(rebuilt.tags(text), both.tags(text), "{text:?}");
        }
        assert!(rebuilt.tags("Held  on desk").contains("deferral"));
    }

    #[test]
    fn test_rule_override_beats_table_option() {
        let table = RuleTable::new(vec![
            Rule::new("Read 1st time").tag("reading-1").relax_whitespace(false),
            Rule::new("Read 2nd time").tag("reading-2"),
        ])
        .unwrap();
        assert!(table.tags("Read  1st time").is_empty());
        assert!(table.tags("Read  2nd time").contains("reading-2"));
    }

    #[test]
    fn test_backtrack_limit_counts_as_no_match() {
        let options = TableOptions {
            backtrack_limit: 50,
            ..TableOptions::default()
        };
        let table = RuleTable::with_options(
            vec![
                Rule::new("(?=(a+)+b)a").tag("passage"),
                Rule::new("c$").tag("failure"),
            ],
            options,
        )
        .unwrap();

        let text = format!("{}c", "a".repeat(30));
        let result = table.categorize(&text);
        assert_eq!(result.tag_list(), vec!["failure"]);
        assert_eq!(result.matched_rules, vec![1]);
    }

    #[test]
    fn test_vocabulary() {
        let table = RuleTable::new(vec![
            Rule::new("a").tags(["passage", "reading-3"]),
            Rule::new("b").tag("passage"),
            Rule::new("c"),
        ])
        .unwrap();
        assert_eq!(
            table.vocabulary().into_iter().collect::<Vec<_>>(),
            vec!["passage", "reading-3"]
        );
    }

    #[test]
    fn test_strict_whitespace_option() {
        let options = TableOptions {
            relax_whitespace: false,
            ..TableOptions::default()
        };
        let table =
            RuleTable::with_options(vec![Rule::new("Read 1st time").tag("reading-1")], options)
                .unwrap();
        assert!(table.tags("Read  1st time").is_empty());
        assert!(!table.tags("Read 1st time").is_empty());
    }
}
