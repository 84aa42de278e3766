//! Category-tag vocabulary for legislative actions.
//!
//! Tags are an open string set: rule tables may emit tags that are not listed
//! here, and nothing in the categorizer rejects them. The list below is the
//! controlled vocabulary the downstream importer understands, and is used by
//! table validation to flag likely typos.
//!
//! # Families
//!
//! Tags are grouped into [`TagFamily`] values by prefix so that callers can
//! make coarse decisions (for example, attributing executive actions to the
//! governor) without enumerating every tag.

use serde::{Deserialize, Serialize};

/// Controlled vocabulary of action category tags.
pub const KNOWN_TAGS: &[&str] = &[
    "filing",
    "introduction",
    "reading-1",
    "reading-2",
    "reading-3",
    "passage",
    "failure",
    "withdrawal",
    "substitution",
    "deferral",
    "receipt",
    "referral",
    "referral-committee",
    "amendment-introduction",
    "amendment-passage",
    "amendment-withdrawal",
    "amendment-failure",
    "amendment-amendment",
    "amendment-deferral",
    "committee-passage",
    "committee-passage-favorable",
    "committee-passage-unfavorable",
    "committee-failure",
    "executive-receipt",
    "executive-signature",
    "executive-veto",
    "executive-veto-line-item",
    "became-law",
    "veto-override-passage",
    "veto-override-failure",
    "enrolled",
    "sponsorship",
    "carried-over",
];

/// Returns true if `tag` is part of the controlled vocabulary.
pub fn is_known_tag(tag: &str) -> bool {
    KNOWN_TAGS.contains(&tag)
}

/// Coarse grouping of tags by the stage of the legislative process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagFamily {
    /// Filing and introduction of the bill.
    Introduction,
    /// Readings on the floor.
    Reading,
    /// Floor outcomes: passage, failure, withdrawal, substitution.
    Floor,
    /// Committee referrals and committee outcomes.
    Committee,
    /// Amendment lifecycle.
    Amendment,
    /// Governor receipt, signature, veto; enactment.
    Executive,
    /// Veto override votes.
    VetoOverride,
    /// Anything not in the controlled vocabulary.
    Other,
}

impl TagFamily {
    /// Classify a tag into its family.
    pub fn of(tag: &str) -> Self {
        match tag {
            "filing" | "introduction" | "sponsorship" => TagFamily::Introduction,
            t if t.starts_with("reading-") => TagFamily::Reading,
            t if t.starts_with("amendment-") => TagFamily::Amendment,
            t if t.starts_with("committee-") || t.starts_with("referral") => {
                TagFamily::Committee
            }
            t if t.starts_with("executive-") || t == "became-law" => TagFamily::Executive,
            t if t.starts_with("veto-override-") => TagFamily::VetoOverride,
            "passage" | "failure" | "withdrawal" | "substitution" | "deferral" | "receipt"
            | "enrolled" | "carried-over" => TagFamily::Floor,
            _ => TagFamily::Other,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            TagFamily::Introduction => "introduction",
            TagFamily::Reading => "reading",
            TagFamily::Floor => "floor",
            TagFamily::Committee => "committee",
            TagFamily::Amendment => "amendment",
            TagFamily::Executive => "executive",
            TagFamily::VetoOverride => "veto_override",
            TagFamily::Other => "other",
        }
    }
}

impl std::fmt::Display for TagFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Actor implied by a set of tags, if any.
///
/// Executive-family tags mean the action was taken by the executive branch
/// regardless of which chamber's column the scraper found it in.
pub fn implied_actor<'a, I>(tags: I) -> Option<&'static str>
where
    I: IntoIterator<Item = &'a str>,
{
    tags.into_iter()
        .any(|t| TagFamily::of(t) == TagFamily::Executive)
        .then_some("executive")
}
