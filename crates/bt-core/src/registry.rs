//! Categorizers keyed by jurisdiction.
//!
//! The registry is built once at startup from the built-in tables and any
//! rule-table files, then shared read-only. Every pattern is compiled while
//! building, so a defective table fails here and never at call time.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bt_common::{Error, JurisdictionId, Result};
use bt_config::{load_dir, LoadedFile, RulesDir};
use bt_rules::{Categorizer, Classification};
use serde::Serialize;

use crate::jurisdictions::BUILTIN_JURISDICTIONS;

/// Where a jurisdiction's rules came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum Provenance {
    /// Compiled into the binary.
    Builtin,
    /// Replaced or added by a rule-table file.
    File(PathBuf),
    /// Built-in rules followed by the rules of a file.
    Extended(PathBuf),
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Builtin => write!(f, "builtin"),
            Provenance::File(path) => write!(f, "file {}", path.display()),
            Provenance::Extended(path) => write!(f, "builtin + {}", path.display()),
        }
    }
}

/// One registered jurisdiction.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    /// The compiled categorizer.
    pub categorizer: Categorizer,
    /// Display name, when known.
    pub name: Option<&'static str>,
    /// Where the rules came from.
    pub provenance: Provenance,
}

/// Immutable map from jurisdiction to categorizer.
#[derive(Debug, Clone, Default)]
pub struct CategorizerRegistry {
    entries: BTreeMap<JurisdictionId, RegistryEntry>,
}

impl CategorizerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile every built-in jurisdiction.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        for builtin in BUILTIN_JURISDICTIONS {
            let categorizer = (builtin.build)()?;
            registry.entries.insert(
                builtin.jurisdiction()?,
                RegistryEntry {
                    categorizer,
                    name: Some(builtin.name),
                    provenance: Provenance::Builtin,
                },
            );
        }
        tracing::debug!(jurisdictions = registry.len(), "compiled built-in tables");
        Ok(registry)
    }

    /// Built-in tables overlaid with the files in `rules_dir`, if any.
    pub fn with_rules_dir(rules_dir: &RulesDir) -> Result<Self> {
        let mut registry = Self::builtin()?;
        if let Some(dir) = &rules_dir.path {
            registry.load_dir(dir)?;
        }
        Ok(registry)
    }

    /// Load every rule-table file in `dir`. Returns the number applied.
    ///
    /// Fails on the first invalid file; nothing from `dir` is applied then.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize> {
        let files = load_dir(dir)?;
        let count = files.len();
        for file in files {
            self.apply_file(file);
        }
        Ok(count)
    }

    /// Register the rules of one loaded file.
    ///
    /// A file with `extends_builtin` appends its rules to the existing table
    /// and keeps that jurisdiction's hooks. Otherwise it replaces the table
    /// (hooks included) or adds a new jurisdiction.
    pub fn apply_file(&mut self, loaded: LoadedFile) {
        let LoadedFile { path, file, table } = loaded;
        let id = file.jurisdiction;

        if file.extends_builtin {
            if let Some(existing) = self.entries.get(&id) {
                let merged = existing.categorizer.table().concat(&table);
                let categorizer =
                    Categorizer::from_parts(Arc::new(merged), existing.categorizer.hooks());
                tracing::debug!(
                    jurisdiction = %id,
                    path = %path.display(),
                    rules = categorizer.table().len(),
                    "extended table"
                );
                let name = existing.name;
                self.entries.insert(
                    id,
                    RegistryEntry {
                        categorizer,
                        name,
                        provenance: Provenance::Extended(path),
                    },
                );
                return;
            }
            tracing::warn!(
                jurisdiction = %id,
                path = %path.display(),
                "extends_builtin set but there is no built-in table; using file rules alone"
            );
        }

        let name = self.entries.get(&id).and_then(|e| e.name);
        tracing::debug!(
            jurisdiction = %id,
            path = %path.display(),
            rules = table.len(),
            replaced = name.is_some(),
            "registered table from file"
        );
        self.entries.insert(
            id,
            RegistryEntry {
                categorizer: Categorizer::from_table(table),
                name,
                provenance: Provenance::File(path),
            },
        );
    }

    /// Register a categorizer directly.
    pub fn insert(&mut self, id: JurisdictionId, categorizer: Categorizer, provenance: Provenance) {
        self.entries.insert(
            id,
            RegistryEntry {
                categorizer,
                name: None,
                provenance,
            },
        );
    }

    /// Categorizer for `id`.
    pub fn get(&self, id: &JurisdictionId) -> Option<&Categorizer> {
        self.entries.get(id).map(|e| &e.categorizer)
    }

    /// Full entry for `id`.
    pub fn entry(&self, id: &JurisdictionId) -> Option<&RegistryEntry> {
        self.entries.get(id)
    }

    /// Registered jurisdictions, sorted by id.
    pub fn jurisdictions(&self) -> impl Iterator<Item = (&JurisdictionId, &RegistryEntry)> {
        self.entries.iter()
    }

    /// Number of jurisdictions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Categorize `text` with the rules for `jurisdiction`.
    ///
    /// The only error is an unknown jurisdiction.
    pub fn categorize(&self, jurisdiction: &JurisdictionId, text: &str) -> Result<Classification> {
        self.get(jurisdiction)
            .map(|c| c.categorize(text))
            .ok_or_else(|| Error::UnknownJurisdiction {
                jurisdiction: jurisdiction.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bt_config::RuleTableFile;
    use bt_rules::{Rule, RuleTable};

    fn id(s: &str) -> JurisdictionId {
        JurisdictionId::parse(s).unwrap()
    }

    fn loaded(jur: &str, rules: Vec<Rule>, extends: bool) -> LoadedFile {
        let mut file = RuleTableFile::new(id(jur), rules);
        file.extends_builtin = extends;
        let table = file.compile().unwrap();
        LoadedFile {
            path: PathBuf::from(format!("/tmp/{jur}.json")),
            file,
            table,
        }
    }

    #[test]
    fn test_builtin_has_all_jurisdictions() {
        let registry = CategorizerRegistry::builtin().unwrap();
        assert_eq!(registry.len(), BUILTIN_JURISDICTIONS.len());
        for (_, entry) in registry.jurisdictions() {
            assert_eq!(entry.provenance, Provenance::Builtin);
            assert!(entry.name.is_some());
        }
    }

    #[test]
    fn test_unknown_jurisdiction_is_error() {
        let registry = CategorizerRegistry::builtin().unwrap();
        let err = registry.categorize(&id("zz"), "Passed").unwrap_err();
        assert!(matches!(err, Error::UnknownJurisdiction { ref jurisdiction } if jurisdiction == "zz"));
    }

    #[test]
    fn test_file_adds_jurisdiction() {
        let mut registry = CategorizerRegistry::builtin().unwrap();
        registry.apply_file(loaded(
            "nh",
            vec![Rule::new("Ought to Pass").tag("committee-passage-favorable")],
            false,
        ));
        let result = registry.categorize(&id("nh"), "Ought to Pass").unwrap();
        assert!(result.has_tag("committee-passage-favorable"));
        assert!(matches!(
            registry.entry(&id("nh")).unwrap().provenance,
            Provenance::File(_)
        ));
    }

    #[test]
    fn test_file_replaces_builtin() {
        let mut registry = CategorizerRegistry::builtin().unwrap();
        registry.apply_file(loaded("ny", vec![Rule::new("^Custom").tag("filing")], false));

        assert!(registry.categorize(&id("ny"), "PASSED SENATE").unwrap().is_uncategorized());
        assert!(registry.categorize(&id("ny"), "Custom").unwrap().has_tag("filing"));
        assert_eq!(registry.entry(&id("ny")).unwrap().name, Some("New York"));
    }

    #[test]
    fn test_extends_keeps_builtin_rules_and_hooks() {
        let mut registry = CategorizerRegistry::builtin().unwrap();
        let builtin_len = registry.get(&id("wa")).unwrap().table().len();
        registry.apply_file(loaded(
            "wa",
            vec![Rule::new("Placed on consent calendar").tag("consent-calendar")],
            true,
        ));

        let cat = registry.get(&id("wa")).unwrap();
        assert_eq!(cat.table().len(), builtin_len + 1);
        assert!(cat.categorize("Governor signed.").has_tag("executive-signature"));
        assert!(cat
            .categorize("Placed on consent calendar")
            .has_tag("consent-calendar"));

        // WA hook still adds known committees.
        let result = cat.categorize("First reading, referred to Ways & Means.");
        assert!(result.attrs.values("committees").any(|c| c == "Ways & Means"));
    }

    #[test]
    fn test_extends_without_builtin_uses_file_alone() {
        let mut registry = CategorizerRegistry::new();
        registry.apply_file(loaded("vt", vec![Rule::new("Read First time").tag("reading-1")], true));
        assert_eq!(
            registry.entry(&id("vt")).unwrap().provenance,
            Provenance::File(PathBuf::from("/tmp/vt.json"))
        );
    }

    #[test]
    fn test_insert() {
        let mut registry = CategorizerRegistry::new();
        let table = RuleTable::new(vec![Rule::new("x").tag("passage")]).unwrap();
        registry.insert(id("zz"), Categorizer::from_table(table), Provenance::Builtin);
        assert!(registry.categorize(&id("zz"), "x").unwrap().has_tag("passage"));
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CategorizerRegistry>();
    }

    #[test]
    fn test_provenance_display() {
        assert_eq!(Provenance::Builtin.to_string(), "builtin");
        assert_eq!(
            Provenance::Extended(PathBuf::from("wa.json")).to_string(),
            "builtin + wa.json"
        );
    }
}
