//! Rule-based categorization of legislative action text.
//!
//! An upstream scraper hands over a free-text description of one action
//! ("Referred to Committee on Finance") and this crate answers with the
//! category tags that apply, plus attributes pulled out of the text.
//!
//! # Key Features
//!
//! - **Union semantics**: every rule is evaluated and the tags of all matching
//!   rules are unioned. Precedence is expressed through pattern specificity,
//!   typically a negative look-ahead. A rule with `stop` set ends evaluation.
//! - **Eager validation**: patterns are compiled when the table is built.
//!   Categorizing never fails.
//! - **Attribute capture**: named groups and static rule attributes are
//!   collected into [`Attributes`].
//! - **Hooks**: [`CategorizerHooks`] rewrite text before matching and adjust
//!   results afterwards, for conventions that patterns cannot express.
//!
//! # Example
//!
//! ```
//! use bt_rules::{Rule, RuleTable};
//!
//! let table = RuleTable::new(vec![
//!     Rule::new("Introduced").tag("introduction"),
//!     Rule::new("Referred to").tag("referral-committee"),
//! ])
//! .unwrap();
//!
//! let tags = table.tags("Introduced and Referred to Committee on Finance");
//! assert!(tags.contains("introduction"));
//! assert!(tags.contains("referral-committee"));
//! ```

pub mod attrs;
pub mod categorizer;
pub mod classification;
pub mod error;
pub mod pattern;
pub mod rule;
pub mod table;

pub use attrs::Attributes;
pub use categorizer::{Categorizer, CategorizerHooks, NoHooks};
pub use classification::Classification;
pub use error::{Result, RuleError};
pub use pattern::{CompiledPattern, PatternMatch};
pub use rule::Rule;
pub use table::{RuleTable, TableOptions, DEFAULT_BACKTRACK_LIMIT};
