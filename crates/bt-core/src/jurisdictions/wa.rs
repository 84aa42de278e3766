//! Washington.
//!
//! Most rules only extract vote counts and committee names. After the rules
//! run, any standing committee named in the text is added to `committees`
//! when a rule already captured one.

use once_cell::sync::Lazy;

use bt_rules::{Categorizer, CategorizerHooks, Classification, Rule};

use super::common::CommitteeMatcher;

/// Standing committee names, keyed by the abbreviation used in the feed.
pub const COMMITTEES: &[(&str, &str)] = &[
    ("AGNR", "Agriculture & Natural Resources"),
    ("AWRD", "Agriculture, Water & Rural Economic Development"),
    ("BFS", "Business & Financial Services"),
    ("CB", "Capital Budget"),
    ("CDH", "Community & Economic Development & Housing"),
    ("ED", "Education"),
    ("EDTI", "Economic Development, Trade & Innovation"),
    ("EDU", "Education"),
    ("ELHS", "Early Learning & Human Services"),
    ("ENRM", "Energy, Natural Resources & Marine Waters"),
    ("ENV", "Environment"),
    ("ENVI", "Environment"),
    ("EWE", "Health & Human Services Appropriations & Oversight"),
    ("FIHI", "Financial Institutions, Housing & Insurance"),
    ("GO", "Government Operations, Tribal Relations & Elections"),
    ("HCW", "Health Care & Wellness"),
    ("HE", "Higher Education"),
    ("HEA", "Homeowners' Association Act"),
    ("HEWD", "Higher Education & Workforce Development"),
    ("HSC", "Human Services & Corrections"),
    ("JUD", "Judiciary"),
    ("JUDI", "Judiciary"),
    ("LCCP", "Labor, Commerce & Consumer Protection"),
    ("LG", "Local Government"),
    ("LWD", "Labor & Workforce Development"),
    ("PSEP", "Public Safety & Emergency Preparedness"),
    ("SGTA", "State Government & Tribal Affairs"),
    ("TEC", "Technology, Energy & Communications"),
    ("TR", "Transportation"),
    ("TRAN", "Transportation"),
    ("WAYS", "Ways & Means"),
];

static KNOWN_COMMITTEES: Lazy<CommitteeMatcher> =
    Lazy::new(|| CommitteeMatcher::new(COMMITTEES.iter().map(|(_, name)| *name)).unwrap());

/// Full committee name for a feed abbreviation.
pub fn committee_name(abbr: &str) -> Option<&'static str> {
    COMMITTEES
        .iter()
        .find(|(a, _)| a.eq_ignore_ascii_case(abbr))
        .map(|(_, name)| *name)
}

/// Rule table for Washington.
pub fn rules() -> Vec<Rule> {
    vec![
        // Vote counts
        Rule::new(
            r"yeas, (?P<yes_votes>\d+); nays, (?P<no_votes>\d+); absent, (?P<absent_voters>\d+); excused, (?P<excused_voters>\d+)",
        ),
        // Committee captures
        Rule::new(r"Committee on (?P<committees>.+?) at \d"),
        Rule::new(r"(?P<committees>.+?) relieved of further"),
        Rule::new(r"Passed to (?P<committees>.+?) for \S+ reading"),
        Rule::new(r"by (?P<committees>.+?) Committee"),
        // Floor
        Rule::new(r"^Adopted").tag("passage"),
        Rule::new(r"^Introduced").tag("introduction"),
        Rule::new(r"Third reading, adopted").tags(["reading-3", "passage"]),
        Rule::new(r"Prefiled for introduction").tag("filing"),
        Rule::new(r"amendment adopted").tag("amendment-passage"),
        Rule::new(r"amendment not adopted").tag("amendment-failure"),
        Rule::new(r"(?i)third reading, (?P<pass_fail>(passed|failed))").tag("reading-3"),
        Rule::new(r"Read first time").tag("reading-1"),
        Rule::new(r"(?i)first reading, referred to (?P<committees>.*)\.").tag("reading-1"),
        Rule::new(r"(?i)And refer to (?P<committees>.*)").tag("referral-committee"),
        Rule::new(r"(?i).* substitute bill substituted.*").tag("substitution"),
        // Known phrases with no category of their own
        Rule::new(r"(?i)chapter (((\d+),?)+) \d+ laws.( .+)?"),
        Rule::new(r"(?i)effective date \d{1,2}/\d{1,2}/\d{4}.*"),
        // Committee reports
        Rule::new(
            r"(?i)(?P<committees>\w+) - majority; do pass with amendment\(s\)( but without amendments\(s\))?.*\.",
        )
        .tags(["committee-passage-favorable", "committee-passage"]),
        Rule::new(
            r"(?i)Executive action taken in the (House|Senate) committee on (?P<committees>.*) (at)? .*\.",
        ),
        Rule::new(r"(?i)(?P<committees>\w+) \- Majority; do pass .* \(Majority Report\)")
            .tag("passage"),
        Rule::new(r"(?i)Conference committee appointed."),
        Rule::new(r"(?i)Conference committee report;"),
        Rule::new(r"(?i).+ - Majority; \d+.+ substitute bill be substituted, do pass")
            .tag("passage"),
        // Signatures
        Rule::new(r"President signed").tag("passage"),
        Rule::new(r"Speaker signed").tag("passage"),
        Rule::new(
            r"(?i)Signed by (?P<signed_chamber>(Representatives|Senators)) (?P<legislators>.*)",
        )
        .tag("passage"),
        Rule::new(r"(?i)Referred to (?P<committees>.*)(\.)?"),
        Rule::new(
            r"(?i)(?P<from_committee>.*) relieved of further consideration. On motion, referred to (?P<committees>.*)",
        )
        .tag("referral-committee"),
        // Governor
        Rule::new(r"(?i)Governor partially vetoed").tag("executive-veto-line-item"),
        Rule::new(r"(?i)Governor vetoed").tag("executive-veto"),
        Rule::new(r"(?i)Governor signed").tag("executive-signature"),
        Rule::new(r"(?i)Passed final passage;").tag("passage"),
        Rule::new(r"(?i)Failed final passage;").tag("failure"),
        Rule::new(r"Effective date").tag("became-law"),
        Rule::new(r"Chapter .* Laws").tag("became-law"),
    ]
}

/// Adds standing committees named anywhere in the text.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaHooks;

impl CategorizerHooks for WaHooks {
    fn after_categorize(&self, text: &str, result: &mut Classification) {
        if result.attrs.contains_key("committees") {
            KNOWN_COMMITTEES.add_known_committees(text, &mut result.attrs);
        }
    }
}

/// Compile the Washington categorizer.
pub fn categorizer() -> bt_rules::Result<Categorizer> {
    Categorizer::with_hooks(rules(), WaHooks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat() -> Categorizer {
        categorizer().expect("wa rules compile")
    }

    #[test]
    fn test_vote_counts() {
        let result = cat().categorize(
            "Third reading, passed; yeas, 97; nays, 0; absent, 0; excused, 1.",
        );
        assert_eq!(result.tag_list(), vec!["reading-3"]);
        assert_eq!(result.attrs.single("yes_votes"), Some("97"));
        assert_eq!(result.attrs.single("no_votes"), Some("0"));
        assert_eq!(result.attrs.single("excused_voters"), Some("1"));
        assert_eq!(result.attrs.single("pass_fail"), Some("passed"));
    }

    #[test]
    fn test_first_reading_referral_adds_known_committee() {
        let result = cat().categorize("First reading, referred to Ways & Means.");
        assert!(result.has_tag("reading-1"));
        let committees: Vec<_> = result.attrs.values("committees").collect();
        assert!(committees.contains(&"Ways & Means"));
    }

    #[test]
    fn test_known_committee_only_added_when_captured() {
        let result = cat().categorize("Governor signed. Ways & Means notified");
        assert!(result.has_tag("executive-signature"));
        assert!(!result.attrs.contains_key("committees"));
    }

    #[test]
    fn test_majority_report_is_favorable() {
        let result = cat().categorize("APP - Majority; do pass with amendment(s).");
        assert!(result.has_tag("committee-passage-favorable"));
        assert!(result.has_tag("committee-passage"));
        assert!(result.attrs.values("committees").any(|c| c == "APP"));
    }

    #[test]
    fn test_partial_veto_is_line_item_only() {
        let result = cat().categorize("Governor partially vetoed.");
        assert!(result.has_tag("executive-veto-line-item"));
        assert!(!result.has_tag("executive-veto"));
    }

    #[test]
    fn test_effective_date() {
        let result = cat().categorize("Effective date 7/1/2024.");
        assert_eq!(result.tag_list(), vec!["became-law"]);
    }

    #[test]
    fn test_committee_name_lookup() {
        assert_eq!(committee_name("ways"), Some("Ways & Means"));
        assert_eq!(committee_name("JUDI"), Some("Judiciary"));
        assert_eq!(committee_name("XYZ"), None);
    }
}
