//! Shared test utilities for docfill-ooxml
//!
//! Common fixtures and helpers used across tests: in-memory DOCX
//! packages with a caller-supplied document body, and part
//! extraction for assertions.

use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::ZipWriter;

use crate::archive::DocxArchive;

/// Build a minimal valid DOCX package around the given body XML.
///
/// The package carries `[Content_Types].xml`, the package
/// relationships and `word/document.xml` with `body` inserted
/// between `<w:body>` tags.
///
/// # Example
/// ```ignore
/// use docfill_ooxml::test_utils::docx_from_document_xml;
/// let docx = docx_from_document_xml("<w:p><w:r><w:t>{name}</w:t></w:r></w:p>");
/// ```
pub fn docx_from_document_xml(body: &str) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    // [Content_Types].xml
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#,
    )
    .unwrap();

    // _rels/.rels
    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#,
    )
    .unwrap();

    // word/document.xml
    zip.start_file("word/document.xml", options).unwrap();
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    zip.write_all(document.as_bytes()).unwrap();

    zip.finish().unwrap();
    buffer.into_inner()
}

/// Extract document.xml content from a DOCX byte array
pub fn extract_document_xml(docx: &[u8]) -> String {
    let cursor = Cursor::new(docx);
    let archive = DocxArchive::from_reader(cursor).unwrap();
    String::from_utf8(archive.document_xml().unwrap().to_vec()).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_is_valid_package() {
        let docx = docx_from_document_xml("<w:p><w:r><w:t>hello</w:t></w:r></w:p>");
        assert!(!docx.is_empty());

        let archive = DocxArchive::from_reader(Cursor::new(&docx)).unwrap();
        assert!(archive.contains("[Content_Types].xml"));
        assert!(archive.contains("_rels/.rels"));
        assert!(archive.contains("word/document.xml"));
    }

    #[test]
    fn test_extract_document_xml() {
        let docx = docx_from_document_xml("<w:p><w:r><w:t>hello</w:t></w:r></w:p>");
        let xml = extract_document_xml(&docx);
        assert!(xml.contains("<w:t>hello</w:t>"));
    }
}
