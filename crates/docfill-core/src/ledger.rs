//! Replacement bookkeeping
//!
//! The ledger records which placeholders have already been satisfied
//! and where, so a token replaced in body text is skipped when tables
//! are scanned (and vice versa). It is an explicit value threaded by
//! `&mut` through the scan passes rather than shared hidden state.

use std::fmt;

use serde::Serialize;

/// Where a placeholder was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// A paragraph in the main document body
    Body,
    /// A paragraph inside a table cell
    Table,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Body => write!(f, "body text"),
            Location::Table => write!(f, "table"),
        }
    }
}

/// Whether a satisfied placeholder suppresses later occurrences
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplaceMode {
    /// Replace each placeholder at most once per document, at its
    /// first occurrence in scan order. Compatibility default.
    #[default]
    FirstMatch,
    /// Replace every occurrence everywhere. The ledger still records
    /// the first location per token for reporting.
    EveryOccurrence,
}

/// Record of satisfied placeholders, in the order they were satisfied.
///
/// Invariant: a token appears at most once; `record` keeps the first
/// entry and reports duplicates back to the caller.
#[derive(Debug, Clone, Default)]
pub struct ReplacementLedger {
    entries: Vec<(String, Location)>,
}

impl ReplacementLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a satisfied token.
    ///
    /// Returns `true` if this was the first time the token was
    /// recorded; `false` leaves the earlier entry untouched.
    pub fn record(&mut self, token: impl Into<String>, location: Location) -> bool {
        let token = token.into();
        if self.contains(&token) {
            return false;
        }
        self.entries.push((token, location));
        true
    }

    /// Whether a token has already been satisfied
    pub fn contains(&self, token: &str) -> bool {
        self.entries.iter().any(|(t, _)| t == token)
    }

    /// Where a token was first satisfied, if it was
    pub fn location_of(&self, token: &str) -> Option<Location> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, loc)| *loc)
    }

    /// Number of satisfied tokens
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been satisfied yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(token, location)` entries in satisfaction order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Location)> {
        self.entries.iter().map(|(t, loc)| (t.as_str(), *loc))
    }
}
