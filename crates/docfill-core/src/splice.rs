//! Run flattening and placeholder splicing
//!
//! A placeholder token may straddle run boundaries (editors split
//! runs on spell-check marks and incremental edits), so matching
//! operates on the concatenated run text and a successful replacement
//! rebuilds the paragraph text wholesale. These functions are pure:
//! they know nothing about XML or documents, which keeps them
//! unit-testable in isolation.

use crate::ledger::{ReplaceMode, ReplacementLedger};
use crate::map::PlaceholderMap;

/// Concatenate run texts in order, without separators.
///
/// The caller is responsible for mapping non-text run content to
/// characters first (tabs to `\t`, line breaks to `\n`).
pub fn flatten_runs<'a, I>(runs: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut flat = String::new();
    for run in runs {
        flat.push_str(run);
    }
    flat
}

/// Replace every occurrence of `token` in `text`.
///
/// Returns `None` when the token does not occur, so the caller can
/// leave the paragraph untouched (no rebuild, no formatting side
/// effect). All occurrences are replaced in one pass.
pub fn splice(text: &str, token: &str, value: &str) -> Option<String> {
    if token.is_empty() || !text.contains(token) {
        return None;
    }
    Some(text.replace(token, value))
}

/// Result of splicing a paragraph's flattened text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplicedText {
    /// The paragraph text after all matching tokens were replaced
    pub text: String,
    /// The tokens that matched, in map order
    pub matched: Vec<String>,
}

/// Apply every eligible placeholder to a paragraph's flattened text.
///
/// Tokens are attempted in map order; in [`ReplaceMode::FirstMatch`]
/// tokens already in the ledger are skipped. Each match replaces all
/// of its occurrences, and later tokens see the already-spliced text.
/// Returns `None` when nothing matched.
pub fn splice_paragraph(
    flat: &str,
    values: &PlaceholderMap,
    mode: ReplaceMode,
    ledger: &ReplacementLedger,
) -> Option<SplicedText> {
    let mut text = std::borrow::Cow::Borrowed(flat);
    let mut matched = Vec::new();

    for (token, value) in values.iter() {
        if mode == ReplaceMode::FirstMatch && ledger.contains(token) {
            continue;
        }
        if let Some(spliced) = splice(&text, token, value) {
            text = std::borrow::Cow::Owned(spliced);
            matched.push(token.to_string());
        }
    }

    if matched.is_empty() {
        return None;
    }
    Some(SplicedText {
        text: text.into_owned(),
        matched,
    })
}
