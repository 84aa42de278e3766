//! Jurisdiction identifiers.
//!
//! A jurisdiction is keyed by its lower-case postal abbreviation (`ny`, `wa`)
//! or a three-letter code for federal/territorial bodies (`usa`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validated jurisdiction identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JurisdictionId(String);

impl JurisdictionId {
    /// Parse and normalize a jurisdiction id.
    ///
    /// Accepts 2 or 3 ASCII letters in any case; stores lower case.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if !(2..=3).contains(&s.len()) || !s.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        Some(JurisdictionId(s.to_ascii_lowercase()))
    }

    /// The normalized id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JurisdictionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JurisdictionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JurisdictionId::parse(s).ok_or_else(|| format!("invalid jurisdiction id: {:?}", s))
    }
}

impl TryFrom<String> for JurisdictionId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<JurisdictionId> for String {
    fn from(id: JurisdictionId) -> Self {
        id.0
    }
}
