//! docfill-core - Placeholder substitution semantics
//!
//! Format-agnostic building blocks for filling placeholder tokens
//! (e.g. `{company_name}`) in run-structured text: the ordered value
//! map, the replacement ledger that enforces at-most-once
//! substitution, the pure run-splicing functions, style override
//! options, and the status report.
//!
//! The DOCX-specific machinery lives in `docfill-ooxml`; nothing in
//! this crate touches XML or the filesystem.
//!
//! # Example
//!
//! ```
//! use docfill_core::{
//!     flatten_runs, splice_paragraph, PlaceholderMap, ReplaceMode,
//!     ReplacementLedger,
//! };
//!
//! let mut values = PlaceholderMap::new();
//! values.insert("{company_name}", "marketian");
//!
//! // A placeholder split across two runs still matches once flattened.
//! let flat = flatten_runs(["{compa", "ny_name}"]);
//! let ledger = ReplacementLedger::new();
//! let spliced = splice_paragraph(&flat, &values, ReplaceMode::FirstMatch, &ledger)
//!     .expect("token present");
//! assert_eq!(spliced.text, "marketian");
//! assert_eq!(spliced.matched, vec!["{company_name}".to_string()]);
//! ```

pub mod ledger;
pub mod map;
pub mod report;
pub mod splice;
pub mod style;

// Re-export main types and functions
pub use ledger::{Location, ReplaceMode, ReplacementLedger};
pub use map::PlaceholderMap;
pub use report::{PlaceholderOutcome, SubstitutionReport};
pub use splice::{flatten_runs, splice, splice_paragraph, SplicedText};
pub use style::{Rgb, StyleError, StyleOverride};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
