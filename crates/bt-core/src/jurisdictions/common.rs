//! Helpers shared by the built-in jurisdiction hooks.

use fancy_regex::Regex as FancyRegex;
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

use bt_rules::Attributes;

/// Separators between names in a captured legislator list.
///
/// A comma followed by an initial such as `j.` is part of a name.
static RE_NAME_SEPARATOR: Lazy<FancyRegex> =
    Lazy::new(|| FancyRegex::new(r",\s+(?![a-z]\.)|\s+and\s+").unwrap());

/// Split a captured list of names on commas and `and`.
///
/// Pieces are trimmed and blanks dropped.
pub fn split_names(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut last = 0;

    for sep in RE_NAME_SEPARATOR.find_iter(text) {
        match sep {
            Ok(m) => {
                names.push(&text[last..m.start()]);
                last = m.end();
            }
            Err(e) => {
                tracing::warn!(error = %e, "name split aborted");
                break;
            }
        }
    }
    names.push(&text[last..]);

    names
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Case-insensitive matcher for a fixed list of committee names.
///
/// Longer names are tried first so that "Banking and Insurance" wins over
/// "Banking".
#[derive(Debug, Clone)]
pub struct CommitteeMatcher {
    regex: Regex,
    rule_pattern: String,
}

impl CommitteeMatcher {
    /// Build a matcher for `names`.
    pub fn new<'a, I>(names: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut names: Vec<&str> = names.into_iter().collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        names.dedup();

        let alternation = names
            .iter()
            .map(|n| regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");
        let regex = RegexBuilder::new(&format!("({alternation})"))
            .case_insensitive(true)
            .build()?;

        let rule_alternation = names
            .iter()
            .map(|n| fancy_regex::escape(n))
            .collect::<Vec<_>>()
            .join("|");

        Ok(Self {
            regex,
            rule_pattern: format!("({rule_alternation})"),
        })
    }

    /// The alternation in rule-pattern syntax. Case-sensitive.
    pub fn pattern(&self) -> &str {
        &self.rule_pattern
    }

    /// Every committee name found in `text`, as written in the text.
    pub fn find_all<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.regex.find_iter(text).map(|m| m.as_str())
    }

    /// Add committees named in `text` to the `committees` attribute.
    pub fn add_known_committees(&self, text: &str, attrs: &mut Attributes) {
        for name in self.find_all(text) {
            attrs.insert("committees", name);
        }
    }
}

/// Rewrite every value of `key` through `f`, which may yield several values.
pub fn rewrite_values<F, I>(attrs: &mut Attributes, key: &str, f: F)
where
    F: Fn(&str) -> I,
    I: IntoIterator<Item = String>,
{
    let Some(values) = attrs.remove(key) else {
        return;
    };
    let rewritten: Vec<String> = values.iter().flat_map(|v| f(v)).collect();
    attrs.replace(key, rewritten);
}
