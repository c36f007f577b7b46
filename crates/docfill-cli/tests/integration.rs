//! Integration tests for the docfill CLI
//!
//! These tests verify the full pipeline the CLI drives: values file
//! parsing, substitution through the engine, and the saved output.

use std::fs;
use std::io::{Cursor, Write};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use docfill_cli::app::{load_values, parse_set_pair};
use docfill_core::StyleOverride;
use docfill_ooxml::{fill_document, DocxArchive, Substitutor};

/// Create a minimal DOCX template with placeholders in body and table
fn create_test_template() -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(&mut buffer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    // [Content_Types].xml
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#).unwrap();

    // _rels/.rels
    zip.start_file("_rels/.rels", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#).unwrap();

    // word/document.xml
    zip.start_file("word/document.xml", options).unwrap();
    zip.write_all(
        br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body><w:p><w:r><w:t>Company: </w:t></w:r><w:r><w:t>{compa</w:t></w:r><w:r><w:t>ny_name}</w:t></w:r></w:p><w:tbl><w:tr><w:tc><w:p><w:r><w:t>DBA: {dba} Inc.</w:t></w:r></w:p></w:tc></w:tr></w:tbl></w:body></w:document>"#,
    )
    .unwrap();

    zip.finish().unwrap();
    buffer.into_inner()
}

fn document_xml_of(path: &std::path::Path) -> String {
    let archive = DocxArchive::open(path).unwrap();
    String::from_utf8(archive.document_xml().unwrap().to_vec()).unwrap()
}

#[test]
fn test_values_file_drives_substitution() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("template.docx");
    let output = dir.path().join("filled.docx");
    let values_path = dir.path().join("values.toml");

    fs::write(&input, create_test_template()).unwrap();
    fs::write(
        &values_path,
        r#"
"{company_name}" = "marketian"
"{dba}" = "hello, world"
"#,
    )
    .unwrap();

    let values = load_values(&values_path).unwrap();
    assert_eq!(values.get("{company_name}"), Some("marketian"));

    let report = fill_document(&input, &output, &Substitutor::new(values)).unwrap();
    assert_eq!(report.replaced, 2);
    assert_eq!(report.missing, 0);

    let xml = document_xml_of(&output);
    assert!(xml.contains("<w:t>Company: marketian</w:t>"));
    assert!(xml.contains("<w:t>DBA: hello, world Inc.</w:t>"));
}

#[test]
fn test_values_file_preserves_order() {
    let dir = TempDir::new().unwrap();
    let values_path = dir.path().join("values.toml");
    fs::write(
        &values_path,
        r#"
"{zebra}" = "1"
"{alpha}" = "2"
"#,
    )
    .unwrap();

    let values = load_values(&values_path).unwrap();
    let tokens: Vec<&str> = values.tokens().collect();
    assert_eq!(tokens, vec!["{zebra}", "{alpha}"]);
}

#[test]
fn test_values_file_rejects_non_string_values() {
    let dir = TempDir::new().unwrap();
    let values_path = dir.path().join("values.toml");
    fs::write(&values_path, "\"{count}\" = 3\n").unwrap();

    assert!(load_values(&values_path).is_err());
}

#[test]
fn test_set_pairs_compose_with_style() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("template.docx");
    let output = dir.path().join("filled.docx");
    fs::write(&input, create_test_template()).unwrap();

    let mut values = docfill_core::PlaceholderMap::new();
    let (token, value) = parse_set_pair("{company_name}=Acme").unwrap();
    values.insert(token, value);

    let style = StyleOverride::new().with_font("Batang").with_size(9.0);
    let substitutor = Substitutor::new(values).with_style(style);
    let report = fill_document(&input, &output, &substitutor).unwrap();
    assert_eq!(report.replaced, 1);

    let xml = document_xml_of(&output);
    assert!(xml.contains("<w:t>Company: Acme</w:t>"));
    assert!(xml.contains("w:eastAsia=\"Batang\""));
    assert!(xml.contains("<w:sz w:val=\"18\"/>"));
}

#[test]
fn test_report_serializes_to_json() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("template.docx");
    let output = dir.path().join("filled.docx");
    fs::write(&input, create_test_template()).unwrap();

    let mut values = docfill_core::PlaceholderMap::new();
    values.insert("{company_name}", "marketian");
    values.insert("{missing}", "x");

    let report = fill_document(&input, &output, &Substitutor::new(values)).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&report).unwrap()).unwrap();

    assert_eq!(json["replaced"], 1);
    assert_eq!(json["missing"], 1);
    assert_eq!(json["outcomes"][0]["token"], "{company_name}");
    assert_eq!(json["outcomes"][0]["location"], "body");
    assert_eq!(json["outcomes"][1]["replaced"], false);
    assert!(json["elapsed_ms"].is_number());
}
