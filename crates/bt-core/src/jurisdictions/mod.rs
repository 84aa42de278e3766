//! Built-in jurisdiction rule tables.
//!
//! Each submodule exposes `rules()` and a `categorizer()` that attaches the
//! jurisdiction's hooks. Tables are compiled on demand; the registry
//! compiles all of them once at startup.

pub mod ak;
pub mod common;
pub mod ny;
pub mod ok;
pub mod tn;
pub mod vt;
pub mod wa;
pub mod wv;

use bt_common::JurisdictionId;
use bt_rules::Categorizer;

/// A built-in jurisdiction.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinJurisdiction {
    /// Jurisdiction code.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Compiles the jurisdiction's categorizer.
    pub build: fn() -> bt_rules::Result<Categorizer>,
}

impl BuiltinJurisdiction {
    /// Parsed jurisdiction id.
    pub fn jurisdiction(&self) -> bt_common::Result<JurisdictionId> {
        JurisdictionId::parse(self.id)
            .ok_or_else(|| bt_common::Error::InvalidJurisdiction(self.id.to_string()))
    }
}

/// Every built-in jurisdiction, sorted by id.
pub const BUILTIN_JURISDICTIONS: &[BuiltinJurisdiction] = &[
    BuiltinJurisdiction {
        id: "ak",
        name: "Alaska",
        build: ak::categorizer,
    },
    BuiltinJurisdiction {
        id: "ny",
        name: "New York",
        build: ny::categorizer,
    },
    BuiltinJurisdiction {
        id: "ok",
        name: "Oklahoma",
        build: ok::categorizer,
    },
    BuiltinJurisdiction {
        id: "tn",
        name: "Tennessee",
        build: tn::categorizer,
    },
    BuiltinJurisdiction {
        id: "vt",
        name: "Vermont",
        build: vt::categorizer,
    },
    BuiltinJurisdiction {
        id: "wa",
        name: "Washington",
        build: wa::categorizer,
    },
    BuiltinJurisdiction {
        id: "wv",
        name: "West Virginia",
        build: wv::categorizer,
    },
];

/// Look up a built-in jurisdiction by id.
pub fn find(id: &str) -> Option<&'static BuiltinJurisdiction> {
    BUILTIN_JURISDICTIONS.iter().find(|j| j.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_builtin_compiles() {
        for builtin in BUILTIN_JURISDICTIONS {
            let cat = (builtin.build)()
                .unwrap_or_else(|e| panic!("{} failed to compile: {e}", builtin.id));
            assert!(!cat.table().is_empty(), "{} has no rules", builtin.id);
        }
    }

    #[test]
    fn test_ids_sorted_and_valid() {
        let ids: Vec<_> = BUILTIN_JURISDICTIONS.iter().map(|j| j.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        assert_eq!(ids, sorted);
        for builtin in BUILTIN_JURISDICTIONS {
            assert_eq!(builtin.jurisdiction().unwrap().as_str(), builtin.id);
        }
    }

    #[test]
    fn test_builtin_tags_are_known() {
        for builtin in BUILTIN_JURISDICTIONS {
            let cat = (builtin.build)().unwrap();
            for tag in cat.table().vocabulary() {
                assert!(
                    bt_common::is_known_tag(tag),
                    "{} emits unknown tag {tag}",
                    builtin.id
                );
            }
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("wa").map(|j| j.name), Some("Washington"));
        assert!(find("zz").is_none());
    }
}
