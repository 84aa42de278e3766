//! Oklahoma.
//!
//! The first rule is a wide net of capture-only patterns for authors,
//! committees and vote counts. The hook then splits author lists and
//! strips boilerplate from committee captures.

use bt_rules::{Categorizer, CategorizerHooks, Classification, Rule};

use super::common::{rewrite_values, split_names};

/// Rule table for Oklahoma.
pub fn rules() -> Vec<Rule> {
    vec![
        Rule::any([
            r"SCs (changed|removed) (?P<legislators>.+)",
            r"Conference Committee on (?P<committees>.+)",
            r"Conference granted, naming:?\s+Conference Committee on (?P<committees>.+)",
            r"vote by Representative(?P<legislators>.+)",
            r"amended (?P<committees>.+?) committee",
            r"coauthored by (?P<legislators>.+)",
            r"Remove Senator .+? as principal Senate author and substitute with Senator (?P<legislators>.+?)",
            r"(?i)committee substitute (?P<committees>.+)",
            r"(?i)remove\s{,10}as\s{,10}author\s{,10}(?P<legislators>.+);",
            r"(?i)SCs\s{,10}named\s{,10}(?P<legislators>.+)",
            r"Pending removal author Senator (?P<legislators>.+?) and replace with Senator",
            r"(?i)Representative\(s\)\s{,10}(?P<legislators>.+)",
            r"Withdrawn from Calendar; (?P<committees>.+)",
            r"Pending removal author Senator .+? and replace with Senator (?P<legislators>.+)",
            r"Ayes:\s+(?P<yes_votes>\d+)\s+Nays:\s+(?P<no_votes>\d+)",
            r"remove as principal author Representative .+? and substitute with Representative (?P<legislators>.+?)",
            r"Pending coauthorship Senator\(s\) (?P<legislators>.+)",
            r"Remove Representative (?P<legislators>.+?) as principal House author and substitute with Representative",
            r"Pending removal principal author Representative .+? and replace with Representative (?P<legislators>.+)",
            r"(?i)(co)?authored\s{,10}by\s{,10}(?P<legislators>.+)",
            r"Second Reading referred to (?P<committees>.+? Committee)",
            r"Notice served to reconsider vote on measure (?P<legislators>.+)",
            r"Pending removal principal author Representative (?P<legislators>.+) and replace with Representative .+",
            r"remove as principal author Representative (?P<legislators>.+?) and substitute with Representative",
            r"CR; Do Pass(, as amended,|, amended by)? (?P<committees>.+)",
            r"coauthor (Senator|Representative) (?P<legislators>.+)",
        ]),
        Rule::new("Introduced").tag("introduction"),
        Rule::new("Adopted").tag("passage"),
        Rule::new("HAs rejected").tag("amendment-failure"),
        Rule::new("(?i)Measure.+?passed").tag("passage"),
        Rule::new("Engrossed").tag("passage"),
        Rule::new("Third Reading, Measure passed").tags(["passage", "reading-3"]),
        Rule::new("^Amendment withdrawn").tag("amendment-withdrawal"),
        Rule::new("^Amended$").tag("amendment-passage"),
        Rule::new("^Amendment failed").tag("amendment-failure"),
        Rule::new("^Amendment restore").tag("amendment-passage"),
        Rule::new("First Reading").tags(["introduction", "reading-1"]),
        // Second reading routes the bill to one or more committees.
        Rule::any([
            "Second Reading referred to (?P<committees>.+? Committee)",
            "Second Reading referred to (?P<committees>.+?) then to ",
            "Second Reading referred to .+? then to (?P<committees>.+)",
        ])
        .tags(["referral-committee", "reading-2"]),
        Rule::new("(?i)Placed on Third Reading").tag("reading-3"),
        Rule::new("^(?i)Third Reading").tag("reading-3"),
        Rule::new(r"committee substitute (?P<committees>.+?);"),
        // Committee outcomes
        Rule::new("Do Pass (as amended )?(?P<committees>.+)").tag("committee-passage"),
        Rule::new("Failed in Committee - (?P<committees>.+)").tag("committee-failure"),
        Rule::new("CR; Do not pass (?P<committees>.+)").tag("committee-failure"),
        Rule::new("rereferred to (?P<committees>.+)").tag("referral-committee"),
        Rule::new("Referred to (?P<committees>.+?)").tag("referral-committee"),
        Rule::new("Reported Do Pass, amended by committee substitute (?P<committees>.+?);")
            .tag("committee-passage"),
        Rule::new("^(?i)Reported Do Pass").tag("committee-passage"),
        Rule::new("Do pass, amended by committee substitute").tag("committee-passage"),
        // Governor
        Rule::new("Sent to Governor")
            .tag("executive-receipt")
            .attr("actor", "governor"),
        Rule::new("^(Signed|Approved) by Governor")
            .tag("executive-signature")
            .attr("actor", "governor"),
        Rule::new("^Vetoed")
            .tag("executive-veto")
            .attr("actor", "governor"),
        Rule::new("^Pocket veto")
            .tag("executive-veto")
            .attr("actor", "executive"),
        Rule::new("Veto overridden").tag("veto-override-passage"),
    ]
}

/// Strip author-list boilerplate and split on commas and `and`.
pub fn clean_legislators(text: &str) -> Vec<String> {
    let text = text
        .replace("Representative(s)", "")
        .replace("(principal House author) ", "");
    split_names(&text)
}

/// Strip committee-report boilerplate from a committee capture.
pub fn clean_committee(text: &str) -> Vec<String> {
    let text = text
        .replace("by committee substitute", "")
        .replace("CR filed;", "")
        .replace("; pending CR", "");
    vec![text.trim().to_string()]
}

/// Legislator and committee post-processing.
#[derive(Debug, Clone, Copy, Default)]
pub struct OkHooks;

impl CategorizerHooks for OkHooks {
    fn after_categorize(&self, _text: &str, result: &mut Classification) {
        rewrite_values(&mut result.attrs, "legislators", clean_legislators);
        rewrite_values(&mut result.attrs, "committees", clean_committee);
    }
}

/// Compile the Oklahoma categorizer.
pub fn categorizer() -> bt_rules::Result<Categorizer> {
    Categorizer::with_hooks(rules(), OkHooks)
}
