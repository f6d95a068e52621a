//! Paragraph write-back for DOCX packages.
//!
//! The main document part is streamed through `quick-xml`. Body paragraphs
//! listed in the replacement table keep their `w:pPr` and get fresh runs;
//! every other event and every other archive entry is copied unchanged.

use std::io::{Cursor, Read, Write};

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::citation::{normalize_color, CitationFormatter, TextChunk};
use crate::error::{Error, Result};

use super::{ReplacementTable, RewriteOutcome, DOCUMENT_PART};

/// Rewrite the given body paragraphs of a DOCX package.
///
/// Indices beyond the last body paragraph are ignored.
pub fn rewrite_paragraphs(
    data: &[u8],
    replacements: &ReplacementTable,
    citations: &CitationFormatter,
    citation_color: &str,
) -> Result<RewriteOutcome> {
    if !data.starts_with(b"PK") {
        return Err(Error::UnknownFormat);
    }
    let mut archive = ZipArchive::new(Cursor::new(data))?;
    let mut output = ZipWriter::new(Cursor::new(Vec::new()));
    let mut outcome = RewriteOutcome::default();
    let mut saw_document = false;

    for index in 0..archive.len() {
        let mut file = archive.by_index(index)?;
        if file.name() != DOCUMENT_PART {
            output.raw_copy_file(file)?;
            continue;
        }

        saw_document = true;
        let mut xml = String::new();
        file.read_to_string(&mut xml)?;
        drop(file);

        let rewritten = rewrite_document_xml(&xml, replacements, citations, citation_color)?;
        outcome.citation_runs = rewritten.citation_runs;
        outcome.paragraphs_rewritten = rewritten.paragraphs_rewritten;

        let options =
            SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        output.start_file(DOCUMENT_PART, options)?;
        output.write_all(&rewritten.xml)?;
    }

    if !saw_document {
        return Err(Error::MissingPart(DOCUMENT_PART.to_string()));
    }

    outcome.data = output.finish()?.into_inner();
    log::debug!(
        "Rewrote {} paragraphs with {} citation runs",
        outcome.paragraphs_rewritten,
        outcome.citation_runs
    );
    Ok(outcome)
}

/// Rewritten main document part.
pub(crate) struct RewrittenXml {
    pub xml: Vec<u8>,
    pub citation_runs: usize,
    pub paragraphs_rewritten: usize,
}

/// State while inside a paragraph whose runs are being replaced.
struct Replacing<'t> {
    text: &'t str,
    prefix: Option<String>,
    /// Open elements below the paragraph
    depth: usize,
    /// Inside the paragraph's `pPr`, which is kept
    keeping: bool,
}

/// Stream `word/document.xml`, replacing the runs of selected body paragraphs.
pub(crate) fn rewrite_document_xml(
    xml: &str,
    replacements: &ReplacementTable,
    citations: &CitationFormatter,
    citation_color: &str,
) -> Result<RewrittenXml> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let color = normalize_color(citation_color);

    let mut depth = 0usize;
    let mut body_depth: Option<usize> = None;
    let mut paragraph_index = 0usize;
    let mut replacing: Option<Replacing> = None;
    let mut citation_runs = 0usize;
    let mut paragraphs_rewritten = 0usize;

    loop {
        let event = reader.read_event()?;

        if let Some(state) = replacing.as_mut() {
            match event {
                Event::Start(e) => {
                    if state.depth == 0 && e.local_name().as_ref() == b"pPr" {
                        state.keeping = true;
                    }
                    if state.keeping {
                        writer.write_event(Event::Start(e))?;
                    }
                    state.depth += 1;
                }
                Event::End(e) if state.depth == 0 => {
                    let chunks = citations.split(state.text);
                    citation_runs +=
                        write_runs(&mut writer, state.prefix.as_deref(), &chunks, color)?;
                    writer.write_event(Event::End(e))?;
                    paragraphs_rewritten += 1;
                    replacing = None;
                }
                Event::End(e) => {
                    state.depth -= 1;
                    if state.keeping {
                        writer.write_event(Event::End(e))?;
                    }
                    if state.depth == 0 {
                        state.keeping = false;
                    }
                }
                Event::Empty(e) => {
                    if state.keeping || (state.depth == 0 && e.local_name().as_ref() == b"pPr") {
                        writer.write_event(Event::Empty(e))?;
                    }
                }
                Event::Eof => {
                    return Err(Error::Write("unexpected end of document part".to_string()))
                }
                other => {
                    if state.keeping {
                        writer.write_event(other)?;
                    }
                }
            }
            continue;
        }

        match event {
            Event::Start(e) => {
                let parent_depth = depth;
                let local = e.local_name();
                if local.as_ref() == b"body" {
                    body_depth = Some(parent_depth + 1);
                } else if local.as_ref() == b"p" && body_depth == Some(parent_depth) {
                    let index = paragraph_index;
                    paragraph_index += 1;
                    if let Some(text) = replacements.get(&index) {
                        let prefix = prefix_of(&e);
                        writer.write_event(Event::Start(e))?;
                        replacing = Some(Replacing {
                            text,
                            prefix,
                            depth: 0,
                            keeping: false,
                        });
                        continue;
                    }
                }
                depth += 1;
                writer.write_event(Event::Start(e))?;
            }
            Event::End(e) => {
                if body_depth == Some(depth) && e.local_name().as_ref() == b"body" {
                    body_depth = None;
                }
                depth = depth.saturating_sub(1);
                writer.write_event(Event::End(e))?;
            }
            Event::Empty(e) => {
                if e.local_name().as_ref() == b"p" && body_depth == Some(depth) {
                    let index = paragraph_index;
                    paragraph_index += 1;
                    if let Some(text) = replacements.get(&index) {
                        let prefix = prefix_of(&e);
                        let end = BytesEnd::new(
                            String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                        );
                        writer.write_event(Event::Start(e))?;
                        let chunks = citations.split(text);
                        citation_runs += write_runs(&mut writer, prefix.as_deref(), &chunks, color)?;
                        writer.write_event(Event::End(end))?;
                        paragraphs_rewritten += 1;
                        continue;
                    }
                }
                writer.write_event(Event::Empty(e))?;
            }
            Event::Eof => break,
            other => writer.write_event(other)?,
        }
    }

    Ok(RewrittenXml {
        xml: writer.into_inner().into_inner(),
        citation_runs,
        paragraphs_rewritten,
    })
}

/// Namespace prefix of an element, e.g. `w` for `w:p`.
fn prefix_of(e: &BytesStart) -> Option<String> {
    e.name()
        .prefix()
        .map(|p| String::from_utf8_lossy(p.as_ref()).into_owned())
}

fn qualified(prefix: Option<&str>, local: &str) -> String {
    match prefix {
        Some(p) => format!("{p}:{local}"),
        None => local.to_string(),
    }
}

/// Emit one run per chunk; returns the number of citation runs written.
fn write_runs<W: Write>(
    writer: &mut Writer<W>,
    prefix: Option<&str>,
    chunks: &[TextChunk],
    color: &str,
) -> Result<usize> {
    let tag = |local: &str| qualified(prefix, local);
    let val = tag("val");
    let mut written = 0;

    for chunk in chunks {
        writer.write_event(Event::Start(BytesStart::new(tag("r"))))?;
        writer.write_event(Event::Start(BytesStart::new(tag("rPr"))))?;
        if chunk.is_citation() {
            let mut vert_align = BytesStart::new(tag("vertAlign"));
            vert_align.push_attribute((val.as_str(), "superscript"));
            writer.write_event(Event::Empty(vert_align))?;

            let mut run_color = BytesStart::new(tag("color"));
            run_color.push_attribute((val.as_str(), color));
            writer.write_event(Event::Empty(run_color))?;
            written += 1;
        }
        writer.write_event(Event::End(BytesEnd::new(tag("rPr"))))?;

        let mut text = BytesStart::new(tag("t"));
        text.push_attribute(("xml:space", "preserve"));
        writer.write_event(Event::Start(text))?;
        writer.write_event(Event::Text(BytesText::new(&chunk.text)))?;
        writer.write_event(Event::End(BytesEnd::new(tag("t"))))?;
        writer.write_event(Event::End(BytesEnd::new(tag("r"))))?;
    }

    Ok(written)
}
