//! Substitution status reporting
//!
//! Built from the placeholder map and the final ledger after a run.
//! Purely informational: it never affects document content. Renders
//! as human-readable text via `Display` or as JSON via `Serialize`.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::ledger::{Location, ReplacementLedger};
use crate::map::PlaceholderMap;

/// Outcome for a single configured placeholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderOutcome {
    /// The placeholder token
    pub token: String,
    /// Whether the token was found and replaced
    pub replaced: bool,
    /// Where the token was first satisfied, if it was
    pub location: Option<Location>,
}

/// Summary of one substitution run
#[derive(Debug, Clone, Serialize)]
pub struct SubstitutionReport {
    /// Per-token outcomes, in map order
    pub outcomes: Vec<PlaceholderOutcome>,
    /// Count of replaced tokens
    pub replaced: usize,
    /// Count of tokens never found
    pub missing: usize,
    /// Wall-clock time of the whole run
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl SubstitutionReport {
    /// Tally the ledger against the configured map.
    ///
    /// Outcomes follow map order, not satisfaction order, so the
    /// report lines up with the caller's configuration.
    pub fn new(values: &PlaceholderMap, ledger: &ReplacementLedger, elapsed: Duration) -> Self {
        let outcomes: Vec<PlaceholderOutcome> = values
            .tokens()
            .map(|token| {
                let location = ledger.location_of(token);
                PlaceholderOutcome {
                    token: token.to_string(),
                    replaced: location.is_some(),
                    location,
                }
            })
            .collect();

        let replaced = outcomes.iter().filter(|o| o.replaced).count();
        let missing = outcomes.len() - replaced;
        Self {
            outcomes,
            replaced,
            missing,
            elapsed,
        }
    }

    /// Whether every configured placeholder was replaced
    pub fn is_complete(&self) -> bool {
        self.missing == 0
    }
}

impl fmt::Display for SubstitutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            match outcome.location {
                Some(location) => writeln!(f, "{}: replaced in {}", outcome.token, location)?,
                None => writeln!(f, "{}: not found", outcome.token)?,
            }
        }
        write!(
            f,
            "replaced {} of {} placeholders in {:.1} ms",
            self.replaced,
            self.outcomes.len(),
            self.elapsed.as_secs_f64() * 1000.0
        )
    }
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64() * 1000.0)
}
