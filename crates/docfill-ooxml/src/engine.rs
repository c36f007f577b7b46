//! The substitution engine
//!
//! Ties the pieces together: a [`Substitutor`] holds the immutable
//! run configuration (value map, optional style override, replace
//! mode) and applies it to an archive in two passes — body text
//! first, then tables — threading one [`ReplacementLedger`] through
//! both so each placeholder is satisfied at most once, body before
//! table.

use std::path::Path;
use std::time::Instant;

use tracing::debug;

use docfill_core::{
    Location, PlaceholderMap, ReplaceMode, ReplacementLedger, StyleOverride, SubstitutionReport,
};

use crate::archive::{DocxArchive, DOCUMENT_PART};
use crate::error::Result;
use crate::rewrite::rewrite_part;

/// Placeholder substitution over a DOCX archive.
///
/// Configuration is fixed at construction; one value can be applied
/// to any number of documents.
#[derive(Debug, Clone)]
pub struct Substitutor {
    values: PlaceholderMap,
    style: Option<StyleOverride>,
    mode: ReplaceMode,
}

impl Substitutor {
    /// Create an engine for the given placeholder values
    pub fn new(values: PlaceholderMap) -> Self {
        Self {
            values,
            style: None,
            mode: ReplaceMode::default(),
        }
    }

    /// Style the replaced text; an all-unset override changes nothing
    pub fn with_style(mut self, style: StyleOverride) -> Self {
        self.style = Some(style);
        self
    }

    /// Choose between single-shot and replace-everywhere semantics
    pub fn with_mode(mut self, mode: ReplaceMode) -> Self {
        self.mode = mode;
        self
    }

    /// The configured placeholder values
    pub fn values(&self) -> &PlaceholderMap {
        &self.values
    }

    /// Run both scan passes over the archive's main document part.
    ///
    /// Satisfied tokens are recorded in `ledger`; the rewritten part
    /// replaces `word/document.xml` in the archive. Nothing is saved
    /// to disk here.
    pub fn apply(&self, archive: &mut DocxArchive, ledger: &mut ReplacementLedger) -> Result<()> {
        let xml = archive.document_xml()?.to_vec();

        debug!(placeholders = self.values.len(), "starting body pass");
        let xml = rewrite_part(
            &xml,
            Location::Body,
            &self.values,
            self.style.as_ref(),
            self.mode,
            ledger,
        )?;

        debug!(satisfied = ledger.len(), "starting table pass");
        let xml = rewrite_part(
            &xml,
            Location::Table,
            &self.values,
            self.style.as_ref(),
            self.mode,
            ledger,
        )?;

        archive.set(DOCUMENT_PART, xml);
        Ok(())
    }
}

/// Fill a document on disk in one call.
///
/// Opens `input`, applies `substitutor`, saves atomically to
/// `output`, and returns the status report. The input file is never
/// modified.
pub fn fill_document<P, Q>(
    input: P,
    output: Q,
    substitutor: &Substitutor,
) -> Result<SubstitutionReport>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let started = Instant::now();

    let mut archive = DocxArchive::open(input)?;
    let mut ledger = ReplacementLedger::new();
    substitutor.apply(&mut archive, &mut ledger)?;
    archive.save(output)?;

    Ok(SubstitutionReport::new(
        substitutor.values(),
        &ledger,
        started.elapsed(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::test_utils::{docx_from_document_xml, extract_document_xml};

    fn values() -> PlaceholderMap {
        let mut map = PlaceholderMap::new();
        map.insert("{company_name}", "marketian");
        map.insert("{dba}", "hello, world");
        map
    }

    #[test]
    fn test_apply_body_before_table() {
        let docx = docx_from_document_xml(
            "<w:p><w:r><w:t>{company_name}</w:t></w:r></w:p>\
             <w:tbl><w:tr><w:tc><w:p><w:r><w:t>{company_name} and {dba}</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
        );
        let mut archive = DocxArchive::from_reader(Cursor::new(docx)).unwrap();
        let mut ledger = ReplacementLedger::new();

        Substitutor::new(values())
            .apply(&mut archive, &mut ledger)
            .unwrap();

        let xml = String::from_utf8(archive.document_xml().unwrap().to_vec()).unwrap();
        assert!(xml.contains("<w:t>marketian</w:t>"));
        // Table keeps the literal token satisfied in the body, but
        // its own token is replaced.
        assert!(xml.contains("{company_name} and hello, world"));
        assert_eq!(
            ledger.location_of("{company_name}"),
            Some(Location::Body)
        );
        assert_eq!(ledger.location_of("{dba}"), Some(Location::Table));
    }

    #[test]
    fn test_fill_document_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.docx");
        let output = dir.path().join("out.docx");
        std::fs::write(
            &input,
            docx_from_document_xml("<w:p><w:r><w:t>{compa</w:t></w:r><w:r><w:t>ny_name}</w:t></w:r></w:p>"),
        )
        .unwrap();

        let substitutor = Substitutor::new(values());
        let report = fill_document(&input, &output, &substitutor).unwrap();

        assert_eq!(report.replaced, 1);
        assert_eq!(report.missing, 1);

        let xml = extract_document_xml(&std::fs::read(&output).unwrap());
        assert!(xml.contains("<w:t>marketian</w:t>"));
    }

    #[test]
    fn test_fill_missing_input_is_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let result = fill_document(
            dir.path().join("nope.docx"),
            dir.path().join("out.docx"),
            &Substitutor::new(values()),
        );
        assert!(result.is_err());
        assert!(!dir.path().join("out.docx").exists());
    }
}
