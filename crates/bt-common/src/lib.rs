//! billtags common types, ids, and errors.
//!
//! This crate provides foundational types shared across the billtags crates:
//! - The category-tag vocabulary used to label legislative actions
//! - Jurisdiction identifiers used to key rule tables
//! - Output format specifications for the CLI
//! - The unified error type with stable codes

pub mod error;
pub mod jurisdiction;
pub mod output;
pub mod tags;

pub use error::{Error, ErrorCategory, Result};
pub use jurisdiction::JurisdictionId;
pub use output::OutputFormat;
pub use tags::{implied_actor, is_known_tag, TagFamily, KNOWN_TAGS};

/// Schema version shared by rule-table files and CLI payloads.
pub const SCHEMA_VERSION: &str = "1.0.0";
