//! West Virginia.
//!
//! Routing actions name a chain of committees ("To Finance then Judiciary").
//! The post-processing hook adds standing committees found in the text,
//! splits `then` chains, strips reading qualifiers ("Rules on 1st reading")
//! and splits legislator lists.

use once_cell::sync::Lazy;
use regex::Regex;

use bt_rules::{Categorizer, CategorizerHooks, Classification, Rule};

use super::common::{rewrite_values, split_names, CommitteeMatcher};

/// Standing and interim committees.
pub const COMMITTEES: &[&str] = &[
    "Veterans' Affairs",
    "Agriculture and Agri-business Committee",
    "Agriculture",
    "Banking and Insurance",
    "Banking",
    "Children, Juveniles and Other Issues",
    "Constitutional Revision",
    "Council of Finance and Administration",
    "Economic Development and Small Business",
    "Economic Development",
    "Education Accountability",
    "Education",
    "Employee Suggestion Award Board",
    "Energy, Industry and Labor",
    "Energy, Industry and Labor/Economic Development and Small Business",
    "Enrolled Bills",
    "Equal Pay Commission",
    "Finance",
    "Forest Management Review Commission",
    "Government and Finance",
    "Government Operations",
    "Government Organization",
    "Health and Human Resources Accountability",
    "Health and Human Resources",
    "Health",
    "Homeland Security",
    "House Rules",
    "House Select Committee on Redistricting",
    "Infrastructure",
    "Insurance",
    "Intern Committee",
    "Interstate Cooperation",
    "Judiciary",
    "Law Institute",
    "Minority Issues",
    "Natural Resources",
    "Outcomes-Based Funding Models in Higher Education",
    "Parks, Recreation and Natural Resources",
    "PEIA, Seniors and Long Term Care",
    "Pensions and Retirement",
    "Political Subdivisions",
    "Post Audits",
    "Regional Jail and Correctional Facility Authority",
    "Roads and Transportation",
    "Rule-Making Review Committee",
    "Senior Citizen Issues",
    "Special Investigations",
    "Technology",
    "Veterans Affairs",
    "Veterans Affairs/ Homeland Security",
    "Water Resources",
    "Workforce Investment for Economic Development",
];

static KNOWN_COMMITTEES: Lazy<CommitteeMatcher> =
    Lazy::new(|| CommitteeMatcher::new(COMMITTEES.iter().copied()).unwrap());

static RE_READING_QUALIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r" on .+").unwrap());

/// Rule table for West Virginia.
pub fn rules() -> Vec<Rule> {
    vec![
        // Messages between chambers fix the actor.
        Rule::any(["Communicated to Senate", "Senate received", "Ordered to Senate"])
            .attr("actor", "upper"),
        Rule::any(["Communicated to House", "House received", "Ordered to House"])
            .attr("actor", "lower"),
        // Readings and introduction
        Rule::new("Read 1st time").tag("reading-1"),
        Rule::new("Read 2nd time").tag("reading-2"),
        Rule::new("Read 3rd time").tag("reading-3"),
        Rule::new("Filed for introduction").tag("filing"),
        Rule::new("^Introduced in").tag("introduction"),
        Rule::any(["Passed Senate", "Passed House"]).tag("passage"),
        Rule::any(["Reported do pass", "With amendment, do pass"]).tag("committee-passage"),
        // Committee routing
        Rule::any([
            ", but first to .+?; then (?P<committees>[^;]+)",
            "To (?P<committees>.+?) then",
        ]),
        Rule::new("(?i)voice vote").attr("voice_vote", "true"),
        Rule::new("Amendment rejected").tag("amendment-failure"),
        Rule::new("To Governor").tag("executive-receipt"),
        Rule::any([", but first to (?P<committees>[^;]+)", "Rejected"]),
        Rule::new(r"Approved by Governor \d{1,2}/\d{1,2}/\d{1,2}$").tag("executive-signature"),
        Rule::new("^Introduced").tag("introduction"),
        Rule::new("To .+? then (?P<committees>.+)"),
        Rule::new("^Filed for intro").tag("filing"),
        Rule::new("(?i)referred to (?P<committees>.+)").tag("referral-committee"),
        Rule::new("Senator (?P<legislators>.+? )requests to be removed as sponsor of bill"),
        Rule::new("To House (?P<committees>[A-Z].+)").tag("referral-committee"),
        Rule::new("(?i)committed to (?P<committees>.+?) on"),
        Rule::new("Vetoed by Governor").tag("executive-veto"),
        Rule::new("(?i)House concurred in senate amendment"),
        Rule::new("Be rejected").tag("failure"),
        Rule::any([
            "To .+? then (?P<committees>.+) then",
            "reading to (?P<committees>.+)",
        ]),
        Rule::new("Adopted by").tag("passage"),
        Rule::new("House appointed conferees:  (?P<legislators>.+)"),
        Rule::new("Be adopted$").tag("passage"),
        Rule::any([
            "(?i)originating in (House|Senate) (?P<committees>.+)",
            "(?i)to house (?P<committees>.+)",
        ]),
        Rule::new("To .+? then .+? then (?P<committees>.+)"),
        Rule::new(format!("To {}", KNOWN_COMMITTEES.pattern())).tag("referral-committee"),
    ]
}

/// Split a committee capture into individual committee names.
pub fn clean_committees(text: &str) -> Vec<String> {
    text.split("then")
        .map(|part| RE_READING_QUALIFIER.replace(part, "").trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Committee and legislator post-processing.
#[derive(Debug, Clone, Copy, Default)]
pub struct WvHooks;

impl CategorizerHooks for WvHooks {
    fn after_categorize(&self, text: &str, result: &mut Classification) {
        KNOWN_COMMITTEES.add_known_committees(text, &mut result.attrs);
        rewrite_values(&mut result.attrs, "legislators", split_names);
        rewrite_values(&mut result.attrs, "committees", clean_committees);
    }
}

/// Compile the West Virginia categorizer.
pub fn categorizer() -> bt_rules::Result<Categorizer> {
    Categorizer::with_hooks(rules(), WvHooks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat() -> Categorizer {
        categorizer().expect("wv rules compile")
    }

    #[test]
    fn test_committee_chain_is_split() {
        let result = cat().categorize("To Government Organization then Finance");
        assert!(result.has_tag("referral-committee"));
        let committees: Vec<_> = result.attrs.values("committees").collect();
        assert_eq!(committees, vec!["Finance", "Government Organization"]);
    }

    #[test]
    fn test_reading_qualifier_stripped() {
        assert_eq!(
            clean_committees("Rules on 1st reading"),
            vec!["Rules".to_string()]
        );
        assert_eq!(
            clean_committees("Judiciary then Finance on 2nd reading"),
            vec!["Judiciary".to_string(), "Finance".to_string()]
        );
    }

    #[test]
    fn test_actor_from_message() {
        let result = cat().categorize("Communicated to Senate");
        assert!(result.is_uncategorized());
        assert_eq!(result.actor(), Some("upper"));
    }

    #[test]
    fn test_voice_vote_attribute() {
        let result = cat().categorize("Passed House (Voice vote)");
        assert!(result.has_tag("passage"));
        assert_eq!(result.attrs.single("voice_vote"), Some("true"));
    }

    #[test]
    fn test_conferees_split() {
        let result =
            cat().categorize("House appointed conferees:  Shott, Hanshaw and Fleischauer");
        let legislators: Vec<_> = result.attrs.values("legislators").collect();
        assert_eq!(legislators, vec!["Fleischauer", "Hanshaw", "Shott"]);
    }

    #[test]
    fn test_governor_approval_requires_date() {
        assert!(cat()
            .categorize("Approved by Governor 3/25/19")
            .has_tag("executive-signature"));
        assert!(cat()
            .categorize("Approved by Governor 3/25/19 - House Journal")
            .is_uncategorized());
    }
}
