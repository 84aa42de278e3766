//! New York.
//!
//! Action text is upper case in the Senate feed and mixed case in the
//! Assembly feed, so every pattern is case-insensitive. Bill ids, session
//! law chapters and veto memo numbers are captured as attributes.

use bt_rules::{Categorizer, Rule};

/// Rule table for New York.
pub fn rules() -> Vec<Rule> {
    vec![
        // Floor
        Rule::new(r"(?i)^(RE)?PASSED").tag("passage"),
        Rule::new(r"(?i)^ADOPTED").tag("passage"),
        // Amendments
        Rule::new(r"(?i)AMENDED (?P<bill_id>\d+)").tag("amendment-passage"),
        Rule::new(r"(?i)AMEND AND RECOMMIT TO (?P<committees>.+)")
            .tags(["amendment-passage", "referral-committee"]),
        Rule::new(r"(?i)amend .+? and recommit to (?P<committees>.+)")
            .tags(["amendment-passage", "referral-committee"]),
        Rule::new(r"(?i)AMENDED ON THIRD READING (\(T\) )?(?P<bill_id>.+)")
            .tag("amendment-passage"),
        Rule::new(r"(?i)print number (?P<bill_id>\d+)").tag("amendment-passage"),
        Rule::new(r"(?i)tabled").tag("amendment-deferral"),
        // Committees
        Rule::new(r"(?i)held .+? in (?P<committees>.+)").tag("failure"),
        Rule::new(r"(?i)REFERRED TO (?P<committees>.+)").tag("referral-committee"),
        Rule::new(r"(?i)reference changed to (?P<committees>.+)").tag("referral-committee"),
        Rule::new(r"(?i) committed to (?P<committees>.+)").tag("referral-committee"),
        Rule::new(r"(?i)^reported$"),
        // Governor
        Rule::new(r"(?i)signed chap.(?P<session_laws>\d+)").tag("executive-signature"),
        Rule::new(r"(?i)vetoed memo.(?P<veto_memo>.+)").tag("executive-veto"),
        Rule::new(r"(?i)DELIVERED TO GOVERNOR").tag("executive-receipt"),
        // Substitutions carry the other house's bill id.
        Rule::new(r"(?i)substituted by (?P<bill_id>\w\d+)"),
    ]
}

/// Compile the New York categorizer.
pub fn categorizer() -> bt_rules::Result<Categorizer> {
    Categorizer::new(rules())
}
