//! Vermont.
//!
//! Journal entries name the senators or representatives who moved, offered
//! or explained something, so most of the table is one large capture rule.
//! Vote tallies come with the threshold needed to pass. The after-hook
//! strips the trailing "; text" marker from legislator captures and splits
//! them into names.
//!
//! Amendment outcomes appear as "agreed to" and "disagreed to". With relaxed
//! whitespace "Smith disagreed" would also satisfy ".+? agreed", so passage
//! patterns with an open capture before "agreed" refuse a preceding "dis".

use once_cell::sync::Lazy;
use regex::Regex;

use bt_rules::{Categorizer, CategorizerHooks, Classification, Rule};

use super::common::rewrite_values;

static RE_TEXT_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r";\s*text\s*$").unwrap());

static RE_LEGISLATOR_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r",?\s+and\s+|,\s+").unwrap());

/// Rule table for Vermont.
pub fn rules() -> Vec<Rule> {
    vec![
        // Vote tallies
        Rule::new(
            r"-- Needed (?P<vote_threshold>\d+) of \d+ to Pass -- Yeas = (?P<yes_votes>\d+), Nays = (?P<no_votes>\d+)",
        ),
        // Who moved, offered, explained or reported
        Rule::any([
            r"(?i)motion by (?P<legislators>.+?) to",
            r"(?P<legislators>.+) moved to",
            r"(?P<legislators>.+) spoke for",
            r"Amendment as offered by (?P<legislators>.+?) of (.+?) ((dis)?agreed to|withdrawn)",
            r"Amendment of (?P<committees>Committee on.+?) agreed to",
            r"Rep. (?P<legislators>.+?) of",
            r"requested by (?P<legislators>.+), Passed",
            r"(?i)floor amendment by (?P<legislators>.+?)( of .+?) (dis)?agreed to",
            r"(?P<legislators>.+?) explained vote",
            r"(?P<committees>Committee on .+?) relieved",
            r"(?i)as moved by (?P<legislators>.+?) of .+",
            r"(?i)Proposal of amendment\s+by Senator\(s\)(?P<legislators>.+?); text",
            r"submitted by (Rep\.|Senator) (?P<legislators>.+?) for",
            r"on motion of (Rep\.|Senator) (?P<legislators>.+)",
            r"Senator(\(s\))? (?P<legislators>.+)",
            r"Remarks of Senator (?P<legislators>[A-Z].+?) journalized",
            r"Senator\(s\) (?P<legislators>.+?) (motion|on|divided)",
            r"by Senator(\(s\))? (?P<legislators>.+?),? (&|Passed|on|divided|;|to|Failed|dis)",
            r"(by|of) Senator(\(s\))? (?P<legislators>.+?) (sustained|overruled|journalized)",
            r"^Senator(\(s\))? (?P<legislators>.+?) [a-z]",
        ]),
        // Readings
        Rule::any(["Read First time", "Read 1st time"]).tag("reading-1"),
        Rule::any([
            "(?i)read 2nd time",
            "(?i)read second time",
            "Second Reading",
        ])
        .tag("reading-2"),
        Rule::new("(?i)read (third|3rd) time (and|&) passed").tags(["passage", "reading-3"]),
        // Resolutions and floor passage
        Rule::any([
            "^(Read (and|&) )?Adopted",
            "Read 3rd time & adopted",
            "^Passed on roll call",
            "(?i)^roll call results passed",
            "(?i)^roll call.+?passed",
            "^Passed",
            "(?i)^(passed|adopted) in concurrence",
        ])
        .tag("passage"),
        // Committees
        Rule::any([
            "(?i)referred to (?P<committees>.+)",
            r"with the report of (?P<committees>Committee on.+?)\s+intact",
            r"bill (re)?committed to (?P<committees>Committee on.+?)\b(with|on)\b",
            "Committed to( the)? (?P<committees>Committee .+?) (by|with|on)",
        ])
        .tag("referral-committee"),
        Rule::any([
            "Reported favorably by Senator (?P<legislators>\\S+) for (?P<committees>Committee on .+?), read 2nd time and 3rd reading ordered",
            "(?i)favorable report( with recommendation of amendment)? by (?P<committees>.+)",
            "(?i)Favorable report with proposal of amendment by (?P<committees>Committee on .+)",
        ])
        .tags(["committee-passage-favorable", "reading-2"]),
        Rule::new(
            "Reported favorably by Senator (?P<legislators>.+?) for (?P<committees>.+?) with recommendation of amendment",
        )
        .tag("committee-passage-favorable"),
        Rule::any([
            "(?i)reported without recommendation by( (?P<legislators>Senator.+?) for)? (?P<committees>.+)",
            "proposal of amendment concurred in",
            r"(?i)proposal of amendment\s+by (?P<committees>Committee on .+?) agreed to",
        ])
        .tag("committee-passage"),
        Rule::new("Reported favorably by Senator (?P<legislators>.+?) for (?P<committees>[^,]+)")
            .tag("committee-passage-favorable"),
        // Amendments
        Rule::any([
            "floor amendment by (.*) (?<!dis)agreed to",
            "motion to amend bill agreed to",
            "Proposal of amendment agreed to",
            r"Amendment as offered by Rep\.(?P<legislators>.+?) of .+? (?<!dis)agreed",
            r"bill amended as moved by Senator\(s\) (?P<legislators>.+)",
            r"Floor Amendment by Rep\. (?P<legislators>.+?) (?<!dis)agreed to",
            "Recommendation of amendment by (?P<committees>Committee.+?)(, as amended,)? (?<!dis)agreed",
            r"Recommendation of amendment by Senator(\(s\))?(?P<legislators>.+?) on behalf of (?P<committees>Committee.+) (?<!dis)agreed",
        ])
        .tag("amendment-passage"),
        Rule::any([
            "Proposal of amendment disagreed to",
            "Motion to amend disagreed to",
            r"Amendment as offered by Rep\.(?P<legislators>.+?) of .+? disagreed",
            r"Floor Amendment by Rep\. (?P<legislators>.+?) disagreed to",
        ])
        .tag("amendment-failure"),
        Rule::new(r"Amendment as offered by Rep\.(?P<legislators>.+?) of .+? withdrawn")
            .tag("amendment-withdrawal"),
        // Governor
        Rule::new("Signed by Governor on .+").tag("executive-signature"),
        Rule::any(["(?i)Governor vetoed", "(?i)Vetoed by governor"])
            .tag("executive-veto")
            .attr("actor", "executive"),
        Rule::new("Delivered to the Governor").tag("executive-receipt"),
    ]
}

/// Split a legislator capture into names.
///
/// A trailing "; text" marker is dropped; names are separated by commas
/// and "and".
pub fn split_legislators(text: &str) -> Vec<String> {
    let text = RE_TEXT_SUFFIX.replace(text, "");
    RE_LEGISLATOR_SEPARATOR
        .split(&text)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Legislator post-processing.
#[derive(Debug, Clone, Copy, Default)]
pub struct VtHooks;

impl CategorizerHooks for VtHooks {
    fn after_categorize(&self, _text: &str, result: &mut Classification) {
        rewrite_values(&mut result.attrs, "legislators", split_legislators);
    }
}

/// Compile the Vermont categorizer.
pub fn categorizer() -> bt_rules::Result<Categorizer> {
    Categorizer::with_hooks(rules(), VtHooks)
}
