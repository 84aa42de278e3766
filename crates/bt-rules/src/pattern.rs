//! Pattern preparation and matching.
//!
//! Rule patterns are regular expressions with look-around support. Before
//! compiling, a pattern is prepared:
//!
//! 1. Open-ended `{,n}` quantifiers become `{0,n}`.
//! 2. If whitespace relaxation is on, each run of 1-4 whitespace characters
//!    becomes `\s{0,4}`, so "Read  1st time" and "Read 1st time" both match.
//!    Whitespace inside a character class or right after a `\` is kept.
//!
//! Matching is a search anywhere in the text. If the regex does not match
//! but the raw pattern occurs literally in the text, the pattern still
//! matches (without captures). This keeps phrase-style patterns such as
//! `"Rec. For Pass."` working even when they are not valid the way the
//! author intended.

use fancy_regex::{Regex, RegexBuilder};
use once_cell::sync::Lazy;

use crate::RuleError;

static RE_OPEN_QUANTIFIER: Lazy<regex::Regex> =
    Lazy::new(|| regex::Regex::new(r"\{,(\d+)\}").unwrap());

/// Longest whitespace run folded into one `\s{0,4}`.
const MAX_RUN: usize = 4;

/// Rewrite a raw pattern into the form that is actually compiled.
pub fn prepare(raw: &str, relax_whitespace: bool) -> String {
    let normalized = RE_OPEN_QUANTIFIER.replace_all(raw, "{0,$1}");
    if relax_whitespace {
        relax(&normalized)
    } else {
        normalized.into_owned()
    }
}

/// Replace whitespace runs outside character classes and escapes.
fn relax(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + 16);
    let mut chars = pattern.chars().peekable();
    let mut class_depth = 0usize;
    // Just opened a class: a `]` here is literal.
    let mut class_start = false;

    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(c);
            if let Some(escaped) = chars.next() {
                out.push(escaped);
            }
            class_start = false;
            continue;
        }

        if class_depth > 0 {
            out.push(c);
            match c {
                '^' if class_start => continue,
                ']' if !class_start => class_depth -= 1,
                '[' => {
                    class_depth += 1;
                    class_start = true;
                    continue;
                }
                _ => {}
            }
            class_start = false;
            continue;
        }

        if c == '[' {
            out.push(c);
            class_depth = 1;
            class_start = true;
            continue;
        }

        if c.is_whitespace() {
            let mut run = 1;
            while run < MAX_RUN && chars.peek().is_some_and(|n| n.is_whitespace()) {
                chars.next();
                run += 1;
            }
            out.push_str(r"\s{0,4}");
            continue;
        }

        out.push(c);
    }

    out
}

/// A compiled rule pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    raw: String,
    regex: Regex,
    group_names: Vec<String>,
}

/// A successful pattern match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternMatch {
    /// Named groups that participated in the match, in pattern order.
    pub captures: Vec<(String, String)>,
    /// True if the match came from the literal-substring fallback.
    pub literal: bool,
}

impl CompiledPattern {
    /// Prepare and compile a pattern belonging to rule `rule`.
    pub fn compile(
        raw: &str,
        rule: usize,
        relax_whitespace: bool,
        backtrack_limit: usize,
    ) -> Result<Self, RuleError> {
        if raw.is_empty() {
            return Err(RuleError::EmptyPattern { rule });
        }

        let prepared = prepare(raw, relax_whitespace);
        let regex = RegexBuilder::new(&prepared)
            .backtrack_limit(backtrack_limit)
            .build()
            .map_err(|e| RuleError::Pattern {
                rule,
                pattern: raw.to_string(),
                message: e.to_string(),
            })?;

        let group_names = regex
            .capture_names()
            .flatten()
            .map(str::to_string)
            .collect();

        Ok(Self {
            raw: raw.to_string(),
            regex,
            group_names,
        })
    }

    /// The pattern as authored.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The pattern as compiled.
    pub fn compiled(&self) -> &str {
        self.regex.as_str()
    }

    /// Names of the capture groups in this pattern.
    pub fn group_names(&self) -> &[String] {
        &self.group_names
    }

    /// Search `text` for this pattern.
    ///
    /// A regex runtime failure (backtrack limit) is logged and treated as a
    /// non-match so that categorization never fails.
    pub fn search(&self, text: &str) -> Option<PatternMatch> {
        match self.regex.captures(text) {
            Ok(Some(caps)) => {
                let captures = self
                    .group_names
                    .iter()
                    .filter_map(|name| {
                        caps.name(name)
                            .map(|m| (name.clone(), m.as_str().to_string()))
                    })
                    .collect();
                return Some(PatternMatch {
                    captures,
                    literal: false,
                });
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    target: "bt_rules::pattern",
                    pattern = %self.raw,
                    error = %e,
                    "pattern evaluation failed; treating as no match"
                );
            }
        }

        text.contains(self.raw.as_str()).then(|| PatternMatch {
            captures: Vec::new(),
            literal: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compile(raw: &str) -> CompiledPattern {
        CompiledPattern::compile(raw, 0, true, 1_000_000).unwrap()
    }

    #[test]
    fn test_prepare_open_quantifier() {
        assert_eq!(prepare(r"as\s{,10}author", false), r"as\s{0,10}author");
    }

    #[test]
    fn test_prepare_relaxes_whitespace() {
        assert_eq!(prepare("Read 1st time", true), r"Read\s{0,4}1st\s{0,4}time");
        assert_eq!(prepare("Read 1st time", false), "Read 1st time");
    }

    #[test]
    fn test_prepare_long_run_splits() {
        // Six spaces are two runs of at most four.
        assert_eq!(prepare("a      b", true), r"a\s{0,4}\s{0,4}b");
    }

    #[test]
    fn test_prepare_keeps_class_and_escaped_whitespace() {
        assert_eq!(
            prepare(r"Chapter (?P<num>[^ ]+)", true),
            r"Chapter\s{0,4}(?P<num>[^ ]+)"
        );
        assert_eq!(prepare(r"a\ b [ \]x ] c", true), r"a\ b\s{0,4}[ \]x ]\s{0,4}c");
        assert_eq!(prepare("[] ] x", true), r"[] ]\s{0,4}x");
        assert_eq!(prepare("[[:alpha:] ] x", true), r"[[:alpha:] ]\s{0,4}x");
    }

    #[test]
    fn test_negated_space_class_captures_whole_word() {
        let p = compile(r"Chapter (?P<num>[^ ]+)");
        let m = p.search("Chapter 104").unwrap();
        assert_eq!(m.captures, vec![("num".to_string(), "104".to_string())]);
    }

    #[test]
    fn test_search_is_substring() {
        let p = compile("Referred to");
        assert!(p.search("Introduced and Referred to Committee on Finance").is_some());
        assert!(p.search("referred to").is_none());
    }

    #[test]
    fn test_search_relaxed_whitespace_matches_irregular_spacing() {
        let p = compile("Read 1st time");
        assert!(p.search("Read  1st   time").is_some());
        assert!(p.search("Read1st time").is_some());
    }

    #[test]
    fn test_search_named_captures() {
        let p = compile(r"(?i)REFERRED TO (?P<committees>.+)");
        let m = p.search("referred to Finance").unwrap();
        assert_eq!(
            m.captures,
            vec![("committees".to_string(), "Finance".to_string())]
        );
        assert!(!m.literal);
        assert_eq!(p.group_names(), &["committees".to_string()]);
    }

    #[test]
    fn test_search_skips_non_participating_groups() {
        let p = compile(r"(?P<a>alpha)|(?P<b>beta)");
        let m = p.search("beta").unwrap();
        assert_eq!(m.captures, vec![("b".to_string(), "beta".to_string())]);
    }

    #[test]
    fn test_search_angle_bracket_group_syntax() {
        let p = compile(r"signed chap.(?<session_laws>\d+)");
        let m = p.search("signed chap.123").unwrap();
        assert_eq!(m.captures[0].1, "123");
    }

    #[test]
    fn test_negative_lookahead() {
        let p = compile(r"Ought to Pass(?!.* without amendment)");
        assert!(p.search("Ought to Pass with Amendment 1234").is_some());
        assert!(p.search("Ought to Pass without amendment").is_none());
    }

    #[test]
    fn test_literal_fallback() {
        // Parentheses are groups to the regex, but the author meant them literally.
        let p = compile("(s) transmitted to (h)");
        let m = p.search("(s) transmitted to (h)").unwrap();
        assert!(m.literal);

        let p = compile("a+b");
        let m = p.search("x a+b y").unwrap();
        assert!(m.literal);
        assert!(m.captures.is_empty());
    }

    #[test]
    fn test_compile_errors() {
        let err = CompiledPattern::compile("(unclosed", 5, true, 1_000_000).unwrap_err();
        assert_eq!(err.rule_index(), 5);
        assert!(matches!(err, RuleError::Pattern { .. }));

        let err = CompiledPattern::compile("", 1, true, 1_000_000).unwrap_err();
        assert_eq!(err, RuleError::EmptyPattern { rule: 1 });
    }

    #[test]
    fn test_raw_and_compiled() {
        let p = compile("Read 1st time");
        assert_eq!(p.raw(), "Read 1st time");
        assert_eq!(p.compiled(), r"Read\s{0,4}1st\s{0,4}time");
    }
}
