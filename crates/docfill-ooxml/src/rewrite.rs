//! Streaming rewrite of the main document part
//!
//! One pass walks `word/document.xml` event by event and copies
//! everything through untouched, except paragraphs selected by the
//! pass's location filter (body pass: paragraphs outside any table;
//! table pass: paragraphs at table depth >= 1). A selected paragraph
//! is buffered, its visible run text flattened, and the placeholder
//! map applied; on a match the whole paragraph body is rebuilt as a
//! single run carrying the spliced text, keeping the original
//! `<w:pPr>` verbatim.
//!
//! Elements are matched by qualified name (`w:p`, `w:t`, ...) so
//! DrawingML content (`a:p`, `a:t`) inside drawings is never mistaken
//! for WordprocessingML paragraphs.

use std::io::Cursor;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use tracing::debug;

use docfill_core::{
    splice_paragraph, Location, PlaceholderMap, ReplaceMode, ReplacementLedger, StyleOverride,
};

use crate::error::Result;

const W_P: &[u8] = b"w:p";
const W_TBL: &[u8] = b"w:tbl";
const W_PPR: &[u8] = b"w:pPr";
const W_T: &[u8] = b"w:t";
const W_TAB: &[u8] = b"w:tab";
const W_BR: &[u8] = b"w:br";
const W_CR: &[u8] = b"w:cr";

/// Rewrite one pass over a document part.
///
/// Paragraphs whose location matches `target` are scanned and, where
/// a placeholder matches, rebuilt; everything else round-trips
/// unchanged. Satisfied tokens are recorded in `ledger`.
pub(crate) fn rewrite_part(
    xml: &[u8],
    target: Location,
    values: &PlaceholderMap,
    style: Option<&StyleOverride>,
    mode: ReplaceMode,
    ledger: &mut ReplacementLedger,
) -> Result<Vec<u8>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut buf = Vec::new();

    let mut table_depth = 0usize;
    let mut paragraph: Option<ParagraphSpan> = None;

    loop {
        let event = reader.read_event_into(&mut buf)?;
        if matches!(event, Event::Eof) {
            break;
        }

        if let Some(span) = paragraph.as_mut() {
            // Paragraphs nest through text-box content, so track depth
            // until the outer <w:p> closes.
            match &event {
                Event::Start(e) if e.name().as_ref() == W_P => span.depth += 1,
                Event::End(e) if e.name().as_ref() == W_P => span.depth -= 1,
                _ => {}
            }
            span.events.push(event.into_owned());
            let closed = span.depth == 0;
            if closed {
                if let Some(span) = paragraph.take() {
                    span.finish(target, values, style, mode, ledger, &mut writer)?;
                }
            }
        } else {
            match &event {
                Event::Start(e) if e.name().as_ref() == W_TBL => {
                    table_depth += 1;
                    writer.write_event(event.into_owned())?;
                }
                Event::End(e) if e.name().as_ref() == W_TBL => {
                    table_depth = table_depth.saturating_sub(1);
                    writer.write_event(event.into_owned())?;
                }
                Event::Start(e) if e.name().as_ref() == W_P && in_scope(target, table_depth) => {
                    paragraph = Some(ParagraphSpan {
                        depth: 1,
                        events: vec![event.into_owned()],
                    });
                }
                _ => writer.write_event(event.into_owned())?,
            }
        }

        buf.clear();
    }

    Ok(writer.into_inner().into_inner())
}

fn in_scope(target: Location, table_depth: usize) -> bool {
    match target {
        Location::Body => table_depth == 0,
        Location::Table => table_depth > 0,
    }
}

/// The buffered events of one `<w:p>` element, start tag included
struct ParagraphSpan {
    depth: usize,
    events: Vec<Event<'static>>,
}

impl ParagraphSpan {
    /// Concatenate the paragraph's visible run text.
    ///
    /// `<w:t>` content plus `\t` for tabs and `\n` for line breaks,
    /// in document order. Content of the `<w:pPr>` block (tab stops
    /// live there) and of paragraphs nested inside text boxes is
    /// excluded.
    fn flatten(&self) -> Result<String> {
        let mut text = String::new();
        let mut p_depth = 0usize;
        let mut in_ppr = false;
        let mut in_text = false;

        for event in &self.events {
            match event {
                Event::Start(e) => match e.name().as_ref() {
                    W_P => p_depth += 1,
                    W_PPR => in_ppr = true,
                    W_T if p_depth == 1 && !in_ppr => in_text = true,
                    W_BR | W_CR if p_depth == 1 && !in_ppr => text.push('\n'),
                    _ => {}
                },
                Event::End(e) => match e.name().as_ref() {
                    W_P => p_depth -= 1,
                    W_PPR => in_ppr = false,
                    W_T => in_text = false,
                    _ => {}
                },
                Event::Empty(e) if p_depth == 1 && !in_ppr => match e.name().as_ref() {
                    W_TAB => text.push('\t'),
                    W_BR | W_CR => text.push('\n'),
                    _ => {}
                },
                Event::Text(t) if in_text => text.push_str(&t.unescape()?),
                _ => {}
            }
        }

        Ok(text)
    }

    /// Apply the placeholder map to this paragraph and emit it.
    fn finish<W: std::io::Write>(
        self,
        location: Location,
        values: &PlaceholderMap,
        style: Option<&StyleOverride>,
        mode: ReplaceMode,
        ledger: &mut ReplacementLedger,
        writer: &mut Writer<W>,
    ) -> Result<()> {
        let flat = self.flatten()?;
        match splice_paragraph(&flat, values, mode, ledger) {
            None => {
                for event in self.events {
                    writer.write_event(event)?;
                }
            }
            Some(spliced) => {
                for token in &spliced.matched {
                    ledger.record(token.as_str(), location);
                    debug!(token = %token, location = %location, "substituted placeholder");
                }
                self.emit_rebuilt(&spliced.text, style, writer)?;
            }
        }
        Ok(())
    }

    /// Emit the paragraph as its original start tag, the original
    /// `<w:pPr>` if present, and a single new run with `text`.
    fn emit_rebuilt<W: std::io::Write>(
        self,
        text: &str,
        style: Option<&StyleOverride>,
        writer: &mut Writer<W>,
    ) -> Result<()> {
        let mut events = self.events.into_iter();
        let start = events.next().expect("span starts with the w:p tag");
        writer.write_event(start)?;

        // The schema puts pPr first; copy its subtree verbatim and
        // drop everything after it.
        let mut in_ppr = false;
        for event in events {
            match &event {
                Event::Start(e) if !in_ppr && e.name().as_ref() == W_PPR => {
                    in_ppr = true;
                    writer.write_event(event)?;
                }
                Event::End(e) if in_ppr && e.name().as_ref() == W_PPR => {
                    writer.write_event(event)?;
                    break;
                }
                Event::Empty(e) if !in_ppr && e.name().as_ref() == W_PPR => {
                    writer.write_event(event)?;
                    break;
                }
                _ if in_ppr => writer.write_event(event)?,
                Event::Text(_) => continue,
                _ => break,
            }
        }

        write_run(writer, text, style)?;
        writer.write_event(Event::End(BytesEnd::new("w:p")))?;
        Ok(())
    }
}

/// Write a single `<w:r>` holding `text`, with the style override's
/// run properties when one is configured.
fn write_run<W: std::io::Write>(
    writer: &mut Writer<W>,
    text: &str,
    style: Option<&StyleOverride>,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;

    if let Some(style) = style.filter(|s| !s.is_empty()) {
        write_run_properties(writer, style)?;
    }

    // Map tabs and breaks back to their elements, as the flattening
    // mapped them to characters.
    let mut chunk = String::new();
    for ch in text.chars() {
        match ch {
            '\t' => {
                write_text_chunk(writer, &mut chunk)?;
                writer.write_event(Event::Empty(BytesStart::new("w:tab")))?;
            }
            '\n' => {
                write_text_chunk(writer, &mut chunk)?;
                writer.write_event(Event::Empty(BytesStart::new("w:br")))?;
            }
            '\r' => {
                write_text_chunk(writer, &mut chunk)?;
                writer.write_event(Event::Empty(BytesStart::new("w:cr")))?;
            }
            _ => chunk.push(ch),
        }
    }
    write_text_chunk(writer, &mut chunk)?;

    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    Ok(())
}

fn write_run_properties<W: std::io::Write>(
    writer: &mut Writer<W>,
    style: &StyleOverride,
) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new("w:rPr")))?;

    if let Some(font) = &style.font_name {
        // Cover the eastAsia channel too, so non-Latin text follows
        // the override.
        let mut fonts = BytesStart::new("w:rFonts");
        fonts.push_attribute(("w:ascii", font.as_str()));
        fonts.push_attribute(("w:hAnsi", font.as_str()));
        fonts.push_attribute(("w:eastAsia", font.as_str()));
        writer.write_event(Event::Empty(fonts))?;
    }
    if let Some(color) = style.color {
        let mut elem = BytesStart::new("w:color");
        elem.push_attribute(("w:val", color.to_hex().as_str()));
        writer.write_event(Event::Empty(elem))?;
    }
    if let Some(half_points) = style.half_points() {
        let val = half_points.to_string();
        let mut sz = BytesStart::new("w:sz");
        sz.push_attribute(("w:val", val.as_str()));
        writer.write_event(Event::Empty(sz))?;
        let mut sz_cs = BytesStart::new("w:szCs");
        sz_cs.push_attribute(("w:val", val.as_str()));
        writer.write_event(Event::Empty(sz_cs))?;
    }

    writer.write_event(Event::End(BytesEnd::new("w:rPr")))?;
    Ok(())
}

fn write_text_chunk<W: std::io::Write>(writer: &mut Writer<W>, chunk: &mut String) -> Result<()> {
    if chunk.is_empty() {
        return Ok(());
    }
    let mut elem = BytesStart::new("w:t");
    if chunk.trim() != chunk.as_str() {
        elem.push_attribute(("xml:space", "preserve"));
    }
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::new(chunk)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    chunk.clear();
    Ok(())
}
