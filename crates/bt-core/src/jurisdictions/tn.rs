//! Tennessee.
//!
//! Tennessee's feed lists some actions under the wrong chamber, so a few
//! untagged rules only fix `chamber`. Every tagged rule is terminal: the
//! table is ordered from most to least specific and the first tagged match
//! decides. Patterns are matched exactly as written, without whitespace
//! relaxation.

use bt_rules::{Categorizer, Rule, RuleTable, TableOptions};

/// A rule that stops evaluation when it carries tags.
fn typed<I, S>(pattern: &str, tags: I) -> Rule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let rule = Rule::new(pattern).tags(tags);
    let stop = !rule.is_untagged();
    rule.with_stop(stop)
}

/// An untagged rule that only extracts attributes.
fn capture(pattern: &str) -> Rule {
    Rule::new(pattern)
}

/// Rule table for Tennessee.
pub fn rules() -> Vec<Rule> {
    vec![
        typed("Filed for introduction", ["filing"]),
        typed("Introduced, passed on first", ["introduction", "reading-1"]),
        // Chamber fixes
        capture(r"^H\.\s").attr("chamber", "lower"),
        capture(r"^S\.\s").attr("chamber", "upper"),
        capture(r"Signed by S(\.|enate) Speaker").attr("chamber", "upper"),
        capture(r"Signed by H(\.|ouse) Speaker").attr("chamber", "lower"),
        // Vote counts help disambiguate chambers downstream.
        capture(r"Ayes\s*(?P<yes_votes>\d+),\s*Nays\s*(?P<no_votes>\d+)"),
        // Committees
        typed(r"(?i)ref\. to (?P<committees>.+?Comm\.)", ["referral-committee"]),
        typed(r"^Failed In S\.(?P<committees>.+?Comm\.)", ["committee-failure"]),
        typed(r"^Failed In s/c (?P<committees>.+)", ["committee-failure"]),
        typed(
            r"Rcvd\. from H., ref\. to S\. (?P<committees>.+)",
            ["referral-committee"],
        )
        .attr("chamber", "upper"),
        capture(r"Placed on cal\. (?P<committees>.+?) for"),
        capture(r"Taken off notice for cal in s/c (?P<committees>.+)"),
        capture(r"to be heard in (?P<committees>.+?Comm\.)"),
        capture(r"Action Def. in S. (?P<committees>.+?Comm.)").attr("chamber", "upper"),
        capture(r"(?i)Placed on S. (?P<committees>.+?Comm\.) cal. for").attr("chamber", "upper"),
        capture(r"(?i)Assigned to (?P<committees>.+?comm\.)"),
        capture(r"(?i)Placed on S. (?P<committees>.+?Comm.) cal.").attr("chamber", "upper"),
        capture(r"(?i)Taken off Notice For cal\. in s/c.+?\sof\s(?P<committees>.+?)"),
        capture(r"(?i)Taken off Notice For cal\. in[: ]+(?!s/c)(?P<committees>.+)"),
        typed(r"(?i)Re-referred To:\s+(?P<committees>.+)", ["referral-committee"]),
        capture(r"Recalled from S. (?P<committees>.+?Comm.)"),
        // Amendments
        typed(r"^Am\..+?tabled", ["amendment-deferral"]),
        typed(
            r"^Am\. withdrawn\.\(Amendment \d+ \- (?P<version>\S+)",
            ["amendment-withdrawal"],
        ),
        typed(
            r"^Am\. reconsidered(, withdrawn)?\.\(Amendment \d \- (?P<version>.+?\))",
            ["amendment-withdrawal"],
        ),
        typed(
            r"adopted am\.\(Amendment \d+ of \d+ - (?P<version>\S+)\)",
            ["amendment-passage"],
        ),
        typed(r"refused to concur.+?in.+?am", ["amendment-failure"]),
        // Passage
        typed(r"^Passed H\.", ["passage"]).attr("chamber", "lower"),
        typed(r"^Passed S\.", ["passage"]).attr("chamber", "upper"),
        typed(r"^Passed Senate", ["passage"]).attr("chamber", "upper"),
        typed(r"^R/S Adopted", ["passage"]),
        typed(r"R/S Intro., adopted", ["passage"]),
        typed(r"R/S Concurred", ["passage"]),
        // Veto
        typed(r"(?i)veto", ["executive-veto"]),
        // General phrases, least specific last
        typed("Amendment adopted", ["amendment-passage"]),
        typed("Amendment failed", ["amendment-failure"]),
        typed("Amendment proposed", ["amendment-introduction"]),
        typed("adopted am.", ["amendment-passage"]),
        typed("Am. withdrawn", ["amendment-withdrawal"]),
        typed("Divided committee report", ["committee-passage"]),
        typed("Filed for intro.", ["introduction", "reading-1"]),
        // Passing on first consideration is part of introduction, not a vote.
        typed("Intro., P1C", ["introduction"]),
        typed("Introduced, Passed on First Consideration", ["introduction"]),
        typed(
            "Reported back amended, do not pass",
            ["committee-passage-unfavorable"],
        ),
        typed(
            "Reported back amended, do pass",
            ["committee-passage-favorable"],
        ),
        typed("Rec. For Pass.", ["committee-passage-favorable"]),
        typed("Rec. For pass.", ["committee-passage-favorable"]),
        typed("Rec. for pass.", ["committee-passage-favorable"]),
        typed(
            "Reported back amended, without recommendation",
            ["committee-passage"],
        ),
        typed("Reported back, do not pass", ["committee-passage-unfavorable"]),
        typed("w/ recommend", ["committee-passage-favorable"]),
        typed("Ref. to", ["referral-committee"]),
        typed("ref. to", ["referral-committee"]),
        typed("Assigned to", ["referral-committee"]),
        typed("Received from House", ["introduction"]),
        typed("Received from Senate", ["introduction"]),
        typed("Adopted, ", ["passage"]),
        typed("Concurred, ", ["passage"]),
        typed("Passed H., ", ["passage"]),
        typed("Passed S., ", ["passage"]),
        typed("Passed", ["passage"]),
        typed("Second reading, adopted", ["passage", "reading-2"]),
        typed("Second reading, failed", ["failure", "reading-2"]),
        typed("Second reading, passed", ["passage", "reading-2"]),
        typed("Transmitted to Gov. for action.", ["executive-receipt"]),
        typed("Transmitted to Governor for.* action.", ["executive-receipt"]),
        typed(
            "Signed by Governor, but item veto",
            ["executive-veto-line-item"],
        ),
        typed("Signed by Governor", ["executive-signature"]),
        typed("Signed by.* Speaker", ["passage"]),
        typed("Withdrawn", ["withdrawal"]),
        typed("tabled", ["amendment-deferral"]),
        typed("widthrawn", ["amendment-withdrawal"]),
        typed("Intro", ["introduction"]),
        typed("ready for transmission", ["receipt"]),
        typed("Subst", ["substitution"]),
        typed("substituted", ["substitution"]),
        typed("Enrolled", ["enrolled"]),
        typed("Sponsor", ["sponsorship"]),
    ]
}

/// Compile options for Tennessee: patterns are used verbatim.
pub fn table_options() -> TableOptions {
    TableOptions {
        relax_whitespace: false,
        ..TableOptions::default()
    }
}

/// Compile the Tennessee categorizer.
pub fn categorizer() -> bt_rules::Result<Categorizer> {
    let table = RuleTable::with_options(rules(), table_options())?;
    Ok(Categorizer::from_table(table))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat() -> Categorizer {
        categorizer().expect("tn rules compile")
    }

    #[test]
    fn test_chamber_fix_then_passage() {
        let result = cat().categorize("H. Passed H., as am., Ayes 93, Nays 0");
        assert_eq!(result.tag_list(), vec!["passage"]);
        assert_eq!(result.attrs.single("chamber"), Some("lower"));
        assert_eq!(result.attrs.single("yes_votes"), Some("93"));
    }

    #[test]
    fn test_first_tagged_rule_stops() {
        let result = cat().categorize("Signed by Governor, but item veto");
        assert_eq!(result.tag_list(), vec!["executive-veto"]);
    }

    #[test]
    fn test_referral_captures_committee() {
        let result = cat().categorize("Ref. to S. Judiciary Comm.");
        assert_eq!(result.tag_list(), vec!["referral-committee"]);
        assert_eq!(result.attrs.single("committees"), Some("S. Judiciary Comm."));
    }

    #[test]
    fn test_referral_outranks_recommendation() {
        let result = cat().categorize("Rec. for pass. ref. to Calendar & Rules Comm.");
        assert_eq!(result.tag_list(), vec!["referral-committee"]);
        let plain = cat().categorize("Rec. For Pass.; Ayes 9");
        assert_eq!(plain.tag_list(), vec!["committee-passage-favorable"]);
    }

    #[test]
    fn test_amendment_version() {
        let result = cat().categorize("Am. withdrawn.(Amendment 1 - SA0123)");
        assert_eq!(result.tag_list(), vec!["amendment-withdrawal"]);
        assert_eq!(result.attrs.single("version"), Some("SA0123)"));
    }

    #[test]
    fn test_whitespace_not_relaxed() {
        assert!(!table_options().relax_whitespace);
        assert!(cat().categorize("Transmitted to  Gov. for action.").is_uncategorized());
    }
}
