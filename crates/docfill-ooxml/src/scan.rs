//! Placeholder discovery
//!
//! Walks the same flattened paragraph text the substitution sees and
//! collects every well-formed `{identifier}` token, so an operator
//! can find out what a template expects before building a value map.

use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;

use docfill_core::Location;

use crate::archive::DocxArchive;
use crate::error::Result;

/// A placeholder token found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundPlaceholder {
    /// The token, braces included
    pub token: String,
    /// Location category of its first occurrence
    pub location: Location,
}

/// List the distinct placeholder tokens in a document's main part,
/// in document order, each tagged with the location of its first
/// occurrence.
pub fn scan_document(archive: &DocxArchive) -> Result<Vec<FoundPlaceholder>> {
    scan_part(archive.document_xml()?)
}

fn scan_part(xml: &[u8]) -> Result<Vec<FoundPlaceholder>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();

    let mut found: Vec<FoundPlaceholder> = Vec::new();
    let mut table_depth = 0usize;
    let mut p_depth = 0usize;
    let mut in_ppr = false;
    let mut in_text = false;
    // Flattened text of the paragraph currently open, with its location
    let mut paragraph: Option<(Location, String)> = None;

    loop {
        let event = reader.read_event_into(&mut buf)?;
        match &event {
            Event::Eof => break,
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" if p_depth == 0 => table_depth += 1,
                b"w:p" => {
                    p_depth += 1;
                    if p_depth == 1 {
                        let location = if table_depth > 0 {
                            Location::Table
                        } else {
                            Location::Body
                        };
                        paragraph = Some((location, String::new()));
                    }
                }
                b"w:pPr" => in_ppr = true,
                b"w:t" if p_depth == 1 && !in_ppr => in_text = true,
                b"w:br" | b"w:cr" if p_depth == 1 && !in_ppr => {
                    if let Some((_, text)) = paragraph.as_mut() {
                        text.push('\n');
                    }
                }
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:tbl" if p_depth == 0 => table_depth = table_depth.saturating_sub(1),
                b"w:p" => {
                    p_depth = p_depth.saturating_sub(1);
                    if p_depth == 0 {
                        if let Some((location, text)) = paragraph.take() {
                            collect_tokens(&text, location, &mut found);
                        }
                    }
                }
                b"w:pPr" => in_ppr = false,
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) if p_depth == 1 && !in_ppr => {
                if let Some((_, text)) = paragraph.as_mut() {
                    match e.name().as_ref() {
                        b"w:tab" => text.push('\t'),
                        b"w:br" | b"w:cr" => text.push('\n'),
                        _ => {}
                    }
                }
            }
            Event::Text(t) if in_text => {
                if let Some((_, text)) = paragraph.as_mut() {
                    text.push_str(&t.unescape()?);
                }
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(found)
}

fn collect_tokens(text: &str, location: Location, found: &mut Vec<FoundPlaceholder>) {
    for token in tokens_in(text) {
        if !found.iter().any(|f| f.token == token) {
            found.push(FoundPlaceholder {
                token: token.to_string(),
                location,
            });
        }
    }
}

/// Extract well-formed placeholder tokens from flattened text.
///
/// A token is `{` followed by one or more ASCII alphanumerics or
/// underscores, closed by `}`. Anything else (empty braces, spaces,
/// nested braces) is not a placeholder.
fn tokens_in(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut rest = text;
    let mut base = 0usize;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        // Identifier characters are ASCII, so char count == byte count
        let ident_len = after
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .count();
        if ident_len > 0 && after[ident_len..].starts_with('}') {
            let start = base + open;
            tokens.push(&text[start..start + ident_len + 2]);
            let consumed = open + ident_len + 2;
            base += consumed;
            rest = &rest[consumed..];
        } else {
            base += open + 1;
            rest = &rest[open + 1..];
        }
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::test_utils::docx_from_document_xml;

    #[test]
    fn test_tokens_in_text() {
        assert_eq!(
            tokens_in("Dear {company_name}, DBA {dba}."),
            vec!["{company_name}", "{dba}"]
        );
        assert_eq!(tokens_in("{a}{b}"), vec!["{a}", "{b}"]);
    }

    #[test]
    fn test_tokens_rejects_malformed() {
        assert!(tokens_in("no braces").is_empty());
        assert!(tokens_in("{}").is_empty());
        assert!(tokens_in("{not closed").is_empty());
        assert!(tokens_in("{has space}").is_empty());
        assert_eq!(tokens_in("{{inner}}"), vec!["{inner}"]);
    }

    #[test]
    fn test_scan_reports_first_location() {
        let docx = docx_from_document_xml(
            "<w:p><w:r><w:t>{compa</w:t></w:r><w:r><w:t>ny_name}</w:t></w:r></w:p>\
             <w:tbl><w:tr><w:tc><w:p><w:r><w:t>{company_name} {dba}</w:t></w:r></w:p></w:tc></w:tr></w:tbl>",
        );
        let archive = DocxArchive::from_reader(Cursor::new(docx)).unwrap();
        let found = scan_document(&archive).unwrap();

        assert_eq!(
            found,
            vec![
                FoundPlaceholder {
                    token: "{company_name}".to_string(),
                    location: Location::Body,
                },
                FoundPlaceholder {
                    token: "{dba}".to_string(),
                    location: Location::Table,
                },
            ]
        );
    }
}
