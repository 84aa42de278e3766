//! Rule-table files.
//!
//! A rule-table file holds the rules for one jurisdiction as JSON:
//!
//! ```json
//! {
//!   "schema_version": "1.0.0",
//!   "jurisdiction": "nh",
//!   "description": "New Hampshire House and Senate journals",
//!   "relax_whitespace": true,
//!   "extends_builtin": false,
//!   "rules": [
//!     {"patterns": ["Ought to Pass(?!.* without amendment)"], "tags": ["passage"]},
//!     {"pattern": "Minority Committee Report"}
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use bt_common::JurisdictionId;
use bt_rules::{Rule, RuleTable, TableOptions};
use serde::{Deserialize, Serialize};

use crate::resolve::list_config_files;
use crate::validate::{unknown_tags, validate_table_file, ConfigError, ValidationError};

fn default_true() -> bool {
    true
}

fn is_true(b: &bool) -> bool {
    *b
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A rule table as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTableFile {
    /// Schema version (must match `CONFIG_SCHEMA_VERSION`).
    pub schema_version: String,

    /// Jurisdiction the rules apply to.
    pub jurisdiction: JurisdictionId,

    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Rewrite whitespace runs in patterns to `\s{0,4}`.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub relax_whitespace: bool,

    /// Append these rules after the built-in table instead of replacing it.
    #[serde(default, skip_serializing_if = "is_false")]
    pub extends_builtin: bool,

    /// Ordered rules.
    pub rules: Vec<Rule>,
}

impl RuleTableFile {
    /// A file for `jurisdiction` with default settings.
    pub fn new(jurisdiction: JurisdictionId, rules: Vec<Rule>) -> Self {
        Self {
            schema_version: crate::CONFIG_SCHEMA_VERSION.to_string(),
            jurisdiction,
            description: None,
            relax_whitespace: true,
            extends_builtin: false,
            rules,
        }
    }

    /// Describe an existing compiled table in file form.
    ///
    /// Rules compiled with a different whitespace setting than the table
    /// carry their own `relax_whitespace`, so compiling the result behaves
    /// like `table`.
    pub fn from_table(jurisdiction: JurisdictionId, table: &RuleTable) -> Self {
        Self {
            relax_whitespace: table.options().relax_whitespace,
            ..Self::new(jurisdiction, table.rules().cloned().collect())
        }
    }

    /// Load a rule-table file from disk.
    pub fn from_file(path: &Path) -> Result<Self, ValidationError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_json(&content)
    }

    /// Parse a rule-table file from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ValidationError> {
        serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))
    }

    /// Serialize as pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, ValidationError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ValidationError::ParseError(format!("Failed to serialize: {}", e)))
    }

    /// Compilation options declared by the file.
    pub fn table_options(&self) -> TableOptions {
        TableOptions {
            relax_whitespace: self.relax_whitespace,
            ..TableOptions::default()
        }
    }

    /// Validate and compile the rules.
    pub fn compile(&self) -> Result<RuleTable, ValidationError> {
        validate_table_file(self)?;
        Ok(RuleTable::with_options(
            self.rules.clone(),
            self.table_options(),
        )?)
    }
}

/// A rule-table file that parsed, validated, and compiled.
#[derive(Debug, Clone)]
pub struct LoadedFile {
    pub path: PathBuf,
    pub file: RuleTableFile,
    pub table: RuleTable,
}

impl LoadedFile {
    /// Read, validate, and compile one file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = RuleTableFile::from_file(path).map_err(|e| ConfigError::new(path, e))?;
        let table = file.compile().map_err(|e| ConfigError::new(path, e))?;

        for (rule, tag) in unknown_tags(&file) {
            tracing::warn!(
                path = %path.display(),
                rule,
                tag,
                "tag is outside the known vocabulary"
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            file,
            table,
        })
    }

    pub fn jurisdiction(&self) -> &JurisdictionId {
        &self.file.jurisdiction
    }
}

/// Load every `*.json` file in `dir`, reporting each file separately.
///
/// Used by diagnostics that want every problem rather than the first.
pub fn scan_dir(dir: &Path) -> Vec<Result<LoadedFile, ConfigError>> {
    list_config_files(dir)
        .iter()
        .map(|path| LoadedFile::load(path))
        .collect()
}

/// Load every `*.json` file in `dir`, failing on the first bad file.
///
/// Two files for the same jurisdiction are an error.
pub fn load_dir(dir: &Path) -> Result<Vec<LoadedFile>, ConfigError> {
    let mut seen: BTreeMap<JurisdictionId, PathBuf> = BTreeMap::new();
    let mut loaded = Vec::new();

    for result in scan_dir(dir) {
        let file = result?;
        if let Some(first) = seen.get(file.jurisdiction()) {
            return Err(ConfigError::new(
                &file.path,
                ValidationError::SemanticError(format!(
                    "jurisdiction {} is already defined by {}",
                    file.jurisdiction(),
                    first.display()
                )),
            ));
        }
        seen.insert(file.jurisdiction().clone(), file.path.clone());
        tracing::debug!(
            path = %file.path.display(),
            jurisdiction = %file.jurisdiction(),
            rules = file.table.len(),
            extends_builtin = file.file.extends_builtin,
            "loaded rule table file"
        );
        loaded.push(file);
    }

    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NH: &str = r#"{
        "schema_version": "1.0.0",
        "jurisdiction": "NH",
        "rules": [
            {"pattern": "Minority Committee Report"},
            {"patterns": ["Ought to Pass"], "tags": ["passage"]}
        ]
    }"#;

    #[test]
    fn test_parse_with_defaults() {
        let file = RuleTableFile::from_json(NH).unwrap();
        assert_eq!(file.jurisdiction.as_str(), "nh");
        assert!(file.relax_whitespace);
        assert!(!file.extends_builtin);
        assert_eq!(file.rules.len(), 2);
        assert!(file.rules[0].is_untagged());
    }

    #[test]
    fn test_compile() {
        let table = RuleTableFile::from_json(NH).unwrap().compile().unwrap();
        assert!(table.tags("Minority Committee Report").is_empty());
        assert!(table.tags("Ought to Pass").contains("passage"));
    }

    #[test]
    fn test_compile_reports_bad_pattern() {
        let json = NH.replace("Ought to Pass", "Ought to (Pass");
        let err = RuleTableFile::from_json(&json).unwrap().compile().unwrap_err();
        assert!(matches!(err, ValidationError::Rule(_)));
    }

    #[test]
    fn test_parse_errors() {
        let err = RuleTableFile::from_json("{").unwrap_err();
        assert_eq!(err.code(), 61);

        let err = RuleTableFile::from_json(&NH.replace("\"NH\"", "\"new hampshire\"")).unwrap_err();
        assert!(matches!(err, ValidationError::ParseError(_)));
    }

    #[test]
    fn test_from_table_round_trip() {
        let original = RuleTableFile::from_json(NH).unwrap();
        let table = original.compile().unwrap();
        let dumped = RuleTableFile::from_table(original.jurisdiction.clone(), &table);
        let json = dumped.to_json_pretty().unwrap();
        assert!(!json.contains("relax_whitespace"));
        assert_eq!(RuleTableFile::from_json(&json).unwrap().rules, original.rules);
    }

    #[test]
    fn test_from_table_keeps_mixed_whitespace_options() {
        let strict = RuleTableFile {
            relax_whitespace: false,
            ..RuleTableFile::from_json(NH).unwrap()
        };
        let relaxed = RuleTableFile::new(
            JurisdictionId::parse("nh").unwrap(),
            vec![Rule::new("Held on desk").tag("deferral")],
        );
        let table = strict.compile().unwrap().concat(&relaxed.compile().unwrap());
        assert!(table.tags("Held  on desk").contains("deferral"));

        let json = RuleTableFile::from_table(strict.jurisdiction.clone(), &table)
            .to_json_pretty()
            .unwrap();
        let reloaded = RuleTableFile::from_json(&json).unwrap();
        assert!(!reloaded.relax_whitespace);

        let reloaded = reloaded.compile().unwrap();
        for text in ["Held  on desk", "Ought  to Pass", "Ought to Pass"] {
            assert_eq!(reloaded.tags(text), table.tags(text), "{text:?}");
        }
    }

    #[test]
    fn test_missing_file() {
        let err = RuleTableFile::from_file(Path::new("/nonexistent/billtags/nh.json")).unwrap_err();
        assert!(matches!(err, ValidationError::IoError(_)));
    }
}
