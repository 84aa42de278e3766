//! billtags core library
//!
//! This library ties the rule engine to concrete jurisdictions:
//! - Built-in per-jurisdiction rule tables and hooks
//! - The categorizer registry keyed by jurisdiction
//! - Exit codes for CLI operations
//! - Structured logging
//!
//! The binary entry point is in `main.rs`.

pub mod exit_codes;
pub mod jurisdictions;
pub mod logging;
pub mod registry;

pub use registry::{CategorizerRegistry, Provenance, RegistryEntry};
