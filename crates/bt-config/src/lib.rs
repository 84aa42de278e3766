//! billtags configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for rule-table JSON files
//! - Rules directory resolution (CLI → env → XDG → system → builtin)
//! - Schema and semantic validation, with compilation of every pattern

pub mod resolve;
pub mod table_file;
pub mod validate;

pub use resolve::{resolve_rules_dir, ConfigSource, RulesDir};
pub use table_file::{load_dir, scan_dir, LoadedFile, RuleTableFile};
pub use validate::{ConfigError, ValidationError, ValidationResult};

/// Schema version for rule-table files.
pub const CONFIG_SCHEMA_VERSION: &str = bt_common::SCHEMA_VERSION;
