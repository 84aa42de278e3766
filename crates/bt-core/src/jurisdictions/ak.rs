//! Alaska.
//!
//! The Alaska journal abbreviates heavily: fiscal notes, committee
//! recommendations and referrals arrive as codes. The before-hook expands
//! them into plain phrases, and the rules then match those phrases
//! case-insensitively.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use bt_rules::{Categorizer, CategorizerHooks, Classification, Rule};

use super::common::rewrite_values;

/// Fiscal-note department codes.
pub const FISCAL_DEPARTMENTS: &[(&str, &str)] = &[
    ("ADM", "Administration"),
    ("CED", "Commerce, Community & Economic Development"),
    ("COR", "Corrections"),
    ("CRT", "Court System"),
    ("EED", "Education and Early Development"),
    ("DEC", "Environmental Conservation"),
    ("DFG", "Fish and Game"),
    ("GOV", "Governor's Office"),
    ("DHS", "Health and Social Services"),
    ("LWF", "Labor and Workforce Development"),
    ("LAW", "Law"),
    ("LEG", "Legislative Agency"),
    ("MVA", "Military and Veterans' Affairs"),
    ("DNR", "Natural Resources"),
    ("DPS", "Public Safety"),
    ("REV", "Revenue"),
    ("DOT", "Transportation and Public Facilities"),
    ("UA", "University of Alaska"),
    ("ALL", "All Departments"),
];

/// Committee codes.
pub const COMMITTEES: &[(&str, &str)] = &[
    ("AET", "Arctic Policy, Economic Development, & Tourism"),
    ("CRA", "Community & Regional Affairs"),
    ("EDC", "Education"),
    ("FIN", "Finance"),
    ("HSS", "Health & Social Services"),
    ("JUD", "Judiciary"),
    ("L&C", "Labor & Commerce"),
    ("RES", "Resources"),
    ("RLS", "Rules"),
    ("STA", "State Affairs"),
    ("TRA", "Transportation"),
    ("EDT", "Economic Development, Trade & Tourism"),
    ("NRG", "Energy"),
    ("FSH", "Fisheries"),
    ("MLV", "Military & Veterans"),
    ("WTR", "World Trade"),
    ("ARR", "Administrative Regulation Review"),
    ("ASC", "Armed Services Committee"),
    ("BUD", "Legislative Budget & Audit"),
    ("ECR", "Higher Education/Career Readiness Task Force"),
    ("EFF", "Education Funding District Cost Factor Committee"),
    ("ETH", "Select Committee on Legislative Ethics"),
    ("LEC", "Legislative Council"),
    ("ARC", "Special Committee on the Arctic"),
    ("EDA", "Economic Development, Trade, Tourism & Arctic Policy"),
    ("ENE", "Energy"),
];

/// Committee recommendation codes.
const RECOMMENDATIONS: &[(&str, &str)] = &[
    ("DP", "Do Pass"),
    ("DNP", "Do Not Pass"),
    ("NR", "No Recommendation"),
    ("AM", "Amend"),
];

static RE_FISCAL_NOTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^FN(\d+): (ZERO|INDETERMINATE)?\((\w+)\)").unwrap());

static RE_RECOMMENDATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(DP|DNP|NR|AM):\s(.*)$").unwrap());

static RE_COSPONSORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^COSPONSOR\(S\): (.*)$").unwrap());

static RE_TWO_COMMITTEES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{3}), ([A-Z]{3})$").unwrap());

static RE_ONE_COMMITTEE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Z]{3})$").unwrap());

static RE_REFERRED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^REFERRED TO (.*)$").unwrap());

static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

fn lookup(table: &[(&str, &'static str)], code: &str) -> Option<&'static str> {
    table.iter().find(|(c, _)| *c == code).map(|(_, name)| *name)
}

/// Full committee name for a committee code.
pub fn committee_name(code: &str) -> Option<&'static str> {
    lookup(COMMITTEES, code)
}

/// Full department name for a fiscal-note department code.
pub fn department_name(code: &str) -> Option<&'static str> {
    lookup(FISCAL_DEPARTMENTS, code)
}

/// Capitalize the first letter of each word and lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if prev_alpha {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_alpha = c.is_alphabetic();
    }
    out
}

/// Expand Alaska journal abbreviations into plain phrases.
///
/// Text that needs no expansion is returned borrowed.
pub fn clean_action(text: &str) -> Cow<'_, str> {
    let mut action = text.to_string();

    if let Some(caps) = RE_FISCAL_NOTE.captures(&action) {
        let impact = match caps.get(2).map(|m| m.as_str()) {
            Some("ZERO") => "No fiscal impact",
            Some("INDETERMINATE") => "Indeterminate fiscal impact",
            _ => "",
        };
        let dept = department_name(&caps[3]).unwrap_or(&caps[3]);
        action = format!("Fiscal Note {}: {} ({})", &caps[1], impact, dept);
    }

    if let Some(caps) = RE_RECOMMENDATION.captures(&action) {
        if let Some(vote) = lookup(RECOMMENDATIONS, &caps[1]) {
            action = format!("{}: {}", vote, &caps[2]);
        }
    }

    if let Some(caps) = RE_COSPONSORS.captures(&action) {
        action = format!("Cosponsors added: {}", &caps[1]);
    }

    if let Some(caps) = RE_TWO_COMMITTEES.captures(&action) {
        if let (Some(a), Some(b)) = (committee_name(&caps[1]), committee_name(&caps[2])) {
            action = format!("REFERRED TO {a} and {b}");
        }
    }

    if RE_ONE_COMMITTEE.is_match(&action) {
        if let Some(name) = committee_name(&action) {
            action = format!("REFERRED TO {name}");
        }
    }

    if let Some(caps) = RE_REFERRED.captures(&action) {
        let committees = title_case(&caps[1]).replace(" And ", " and ");
        action = format!("REFERRED TO {committees}");
    }

    let mut action = RE_WHITESPACE.replace_all(&action, " ").into_owned();
    for (shout, plain) in [
        ("PREFILE RELEASED", "Prefile released"),
        ("TRANSMITTED TO GOVERNOR", "Transmitted to Governor"),
        ("SIGNED INTO LAW", "Signed into law"),
    ] {
        if action.contains(shout) {
            action = action.replace(shout, plain);
        }
    }

    if action == text {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(action)
    }
}

/// Rule table for Alaska.
pub fn rules() -> Vec<Rule> {
    vec![
        // Readings
        Rule::new("(?i)read the first time").tag("reading-1"),
        Rule::new("(?i)read the second time").tag("reading-2"),
        Rule::any([
            "(?i)read the third time",
            "(?i)in third",
            "(?i)advanced to third reading",
        ])
        .tag("reading-3"),
        // Governor
        Rule::new("(?i)transmitted to governor").tag("executive-receipt"),
        Rule::any(["(?i)signed into law", "(?i)approved by the governor"])
            .tag("executive-signature"),
        Rule::new("(?i)veto").tag("executive-veto"),
        Rule::any(["(?i)law w/o gov", r"(?i)effective date\(s\) of law"]).tag("became-law"),
        // Committees
        Rule::new("(?i)do pass").tag("committee-passage"),
        Rule::new("(?i)do not pass").tag("committee-failure"),
        Rule::new("(?i)referred to (?P<committees>.+)").tag("referral-committee"),
        // Floor
        Rule::any([
            r"(?i)\(s\) transmitted to \(h\)",
            r"(?i)\(h\) transmitted to \(s\)",
            "(?i)passed",
        ])
        .tag("passage"),
        Rule::new("(?i)prefile released").tag("filing"),
        // Amendment outcomes mention the amendment number ("Am No 2").
        Rule::new("(?i)^(?!.*am no).*failed").tag("failure"),
        Rule::new("(?i)^(?=.*am no).*failed").tag("amendment-failure"),
        Rule::new("(?i)^(?=.*am no)(?!.*failed).*adopted").tag("amendment-passage"),
    ]
}

/// Abbreviation expansion before matching; committee splitting after.
#[derive(Debug, Clone, Copy, Default)]
pub struct AkHooks;

impl CategorizerHooks for AkHooks {
    fn before_categorize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        clean_action(text)
    }

    fn after_categorize(&self, _text: &str, result: &mut Classification) {
        rewrite_values(&mut result.attrs, "committees", |text| {
            text.split(" and ")
                .map(|c| c.trim().to_string())
                .collect::<Vec<_>>()
        });
    }
}

/// Compile the Alaska categorizer.
pub fn categorizer() -> bt_rules::Result<Categorizer> {
    Categorizer::with_hooks(rules(), AkHooks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat() -> Categorizer {
        categorizer().expect("ak rules compile")
    }

    #[test]
    fn test_clean_fiscal_note() {
        assert_eq!(
            clean_action("FN1: ZERO(CED)"),
            "Fiscal Note 1: No fiscal impact (Commerce, Community & Economic Development)"
        );
        assert_eq!(clean_action("FN2: (XYZ)"), "Fiscal Note 2: (XYZ)");
    }

    #[test]
    fn test_clean_recommendation() {
        assert_eq!(clean_action("DP: SMITH, JONES"), "Do Pass: SMITH, JONES");
        assert_eq!(clean_action("DNP: WOOL"), "Do Not Pass: WOOL");
    }

    #[test]
    fn test_clean_committee_codes() {
        assert_eq!(clean_action("FIN"), "REFERRED TO Finance");
        assert_eq!(clean_action("HSS, FIN"), "REFERRED TO Health & Social Services and Finance");
        assert_eq!(clean_action("XYZ"), "XYZ");
    }

    #[test]
    fn test_clean_referred_to_title_case() {
        assert_eq!(
            clean_action("REFERRED TO STATE AFFAIRS AND JUDICIARY"),
            "REFERRED TO State Affairs and Judiciary"
        );
    }

    #[test]
    fn test_clean_collapses_whitespace_and_borrows_when_unchanged() {
        assert_eq!(clean_action("READ  THE FIRST   TIME"), "READ THE FIRST TIME");
        assert!(matches!(clean_action("Read the first time"), Cow::Borrowed(_)));
        assert_eq!(clean_action("PREFILE RELEASED 1/8/24"), "Prefile released 1/8/24");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("HEALTH & SOCIAL SERVICES"), "Health & Social Services");
        assert_eq!(title_case("L&C"), "L&C");
    }

    #[test]
    fn test_committee_codes_categorize_as_referral() {
        let result = cat().categorize("HSS, FIN");
        assert_eq!(result.tag_list(), vec!["referral-committee"]);
        let committees: Vec<_> = result.attrs.values("committees").collect();
        assert_eq!(committees, vec!["Finance", "Health & Social Services"]);
    }

    #[test]
    fn test_recommendation_codes() {
        assert_eq!(
            cat().categorize("DP: SMITH, JONES").tag_list(),
            vec!["committee-passage"]
        );
        assert_eq!(
            cat().categorize("DNP: WOOL").tag_list(),
            vec!["committee-failure"]
        );
    }

    #[test]
    fn test_failed_vs_amendment_failed() {
        assert_eq!(
            cat().categorize("PASSED Y17 N3; FAILED RECONSIDERATION").tag_list(),
            vec!["failure", "passage"]
        );
        assert_eq!(
            cat().categorize("AM NO 2 FAILED Y5 N14").tag_list(),
            vec!["amendment-failure"]
        );
        assert_eq!(
            cat().categorize("AM NO 1 ADOPTED Y20 N0").tag_list(),
            vec!["amendment-passage"]
        );
    }

    #[test]
    fn test_governor_actions() {
        let result = cat().categorize("TRANSMITTED TO GOVERNOR 6/30");
        assert_eq!(result.tag_list(), vec!["executive-receipt"]);
        assert_eq!(result.actor(), Some("executive"));
        assert!(cat()
            .categorize("SIGNED INTO LAW 7/1 CHAPTER 12 SLA 24")
            .has_tag("executive-signature"));
    }

    #[test]
    fn test_chamber_transmittal_is_passage() {
        assert_eq!(
            cat().categorize("(H) TRANSMITTED TO (S)").tag_list(),
            vec!["passage"]
        );
    }
}
