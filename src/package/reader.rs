//! DOCX structural extraction.

use std::io::{Cursor, Read, Seek};

use roxmltree::Node;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::detect::is_numbered_part;
use crate::error::{Error, Result};
use crate::model::{ParsedDocument, ParsedParagraph, ParsedTable, DEFAULT_STYLE};

use super::{DOCUMENT_PART, WORD_NS};

/// Parse a DOCX package into its structural tree.
///
/// `word/document.xml` is required; header and footer parts are read in
/// archive order.
pub fn read_document(data: &[u8]) -> Result<ParsedDocument> {
    if !data.starts_with(b"PK") {
        return Err(Error::UnknownFormat);
    }
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    let document_xml = read_part(&mut archive, DOCUMENT_PART)?
        .ok_or_else(|| Error::MissingPart(DOCUMENT_PART.to_string()))?;
    let mut document = parse_document_xml(&document_xml)?;

    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    for name in &names {
        let is_header = is_numbered_part(name, "header");
        let is_footer = is_numbered_part(name, "footer");
        if !is_header && !is_footer {
            continue;
        }
        let xml = read_part(&mut archive, name)?
            .ok_or_else(|| Error::MissingPart(name.clone()))?;
        let text = parse_part_text(&xml)?;
        if is_header {
            document.headers.push(text);
        } else {
            document.footers.push(text);
        }
    }

    log::debug!(
        "Extracted {} paragraphs, {} tables, {} headers, {} footers",
        document.paragraphs.len(),
        document.tables.len(),
        document.headers.len(),
        document.footers.len()
    );

    Ok(document)
}

/// Read a zip entry as UTF-8 text, `None` when the entry does not exist.
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(Some(content))
}

/// Parse the main document part.
pub(crate) fn parse_document_xml(xml: &str) -> Result<ParsedDocument> {
    let doc = roxmltree::Document::parse(xml)?;
    let mut document = ParsedDocument::new();

    if let Some(body) = doc.descendants().find(|n| is_word(n, "body")) {
        document.paragraphs = body
            .children()
            .filter(|n| is_word(n, "p"))
            .map(|n| parse_paragraph(&n))
            .collect();
    }

    document.tables = doc
        .descendants()
        .filter(|n| is_word(n, "tbl"))
        .map(|n| parse_table(&n))
        .collect();

    document.section_columns = doc
        .descendants()
        .filter(|n| is_word(n, "sectPr"))
        .flat_map(|sect| sect.children().filter(|n| is_word(n, "cols")))
        .filter_map(|cols| cols.attribute((WORD_NS, "num")))
        .map(|num| num.parse::<u32>().unwrap_or(1))
        .collect();

    Ok(document)
}

/// Text of a header or footer part: its paragraphs joined by newlines.
fn parse_part_text(xml: &str) -> Result<String> {
    let doc = roxmltree::Document::parse(xml)?;
    Ok(doc
        .descendants()
        .filter(|n| is_word(n, "p"))
        .map(|p| node_text(&p))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn parse_paragraph(p: &Node) -> ParsedParagraph {
    let properties = word_child(p, "pPr");

    let style = properties
        .and_then(|ppr| word_child(&ppr, "pStyle"))
        .and_then(|s| s.attribute((WORD_NS, "val")))
        .unwrap_or(DEFAULT_STYLE);

    let has_shading = properties
        .map(|ppr| word_child(&ppr, "shd").is_some())
        .unwrap_or(false);

    let font_size = p
        .descendants()
        .filter(|n| is_word(n, "rPr"))
        .flat_map(|rpr| rpr.children().filter(|n| is_word(n, "sz")))
        .find_map(|sz| sz.attribute((WORD_NS, "val")))
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0);

    let mut paragraph = ParsedParagraph::new(node_text(p), style).shaded(has_shading);
    paragraph.font_size_half_points = font_size;
    paragraph
}

fn parse_table(tbl: &Node) -> ParsedTable {
    let rows: Vec<Node> = tbl.children().filter(|n| is_word(n, "tr")).collect();
    let cols = rows
        .iter()
        .map(|row| row.children().filter(|n| is_word(n, "tc")).count())
        .max()
        .unwrap_or(0);

    let has_shading = tbl
        .descendants()
        .filter(|n| is_word(n, "tcPr"))
        .any(|tcpr| word_child(&tcpr, "shd").is_some());

    let text = tbl
        .descendants()
        .filter(|n| is_word(n, "p"))
        .map(|p| node_text(&p))
        .collect();

    ParsedTable {
        rows: rows.len(),
        cols,
        has_shading,
        text,
    }
}

/// Concatenated text of every `w:t` below `node`.
fn node_text(node: &Node) -> String {
    node.descendants()
        .filter(|n| is_word(n, "t"))
        .filter_map(|t| t.text())
        .collect()
}

fn is_word(node: &Node, name: &str) -> bool {
    node.is_element() && node.has_tag_name((WORD_NS, name))
}

fn word_child<'a, 'input>(node: &Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| is_word(n, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::test_package;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:rPr><w:sz w:val="40"/></w:rPr><w:t>Paper </w:t></w:r><w:r><w:t>A</w:t></w:r></w:p>
    <w:p><w:pPr><w:pStyle w:val="Heading1"/><w:shd w:val="clear" w:fill="EAEAEA"/></w:pPr><w:r><w:t>ABSTRACT</w:t></w:r></w:p>
    <w:p><w:r><w:t>Body text</w:t></w:r></w:p>
    <w:tbl>
      <w:tr><w:tc><w:tcPr><w:shd w:val="clear" w:fill="D9E1F2"/></w:tcPr><w:p><w:r><w:t>Cell one</w:t></w:r></w:p></w:tc><w:tc><w:p/></w:tc></w:tr>
      <w:tr><w:tc><w:p><w:r><w:t>Cell two</w:t></w:r></w:p></w:tc></w:tr>
    </w:tbl>
    <w:sectPr><w:cols w:num="2"/></w:sectPr>
  </w:body>
</w:document>"#;

    #[test]
    fn test_parse_body_paragraphs() {
        let doc = parse_document_xml(DOC).unwrap();
        assert_eq!(doc.paragraphs.len(), 3);

        let title = &doc.paragraphs[0];
        assert_eq!(title.text, "Paper A");
        assert_eq!(title.style, "Title");
        assert_eq!(title.font_size_half_points, Some(40));
        assert!(!title.has_shading);

        let heading = &doc.paragraphs[1];
        assert_eq!(heading.style, "Heading1");
        assert!(heading.has_shading);
        assert!(heading.all_caps);

        assert_eq!(doc.paragraphs[2].style, DEFAULT_STYLE);
    }

    #[test]
    fn test_parse_tables_and_columns() {
        let doc = parse_document_xml(DOC).unwrap();
        assert_eq!(doc.tables.len(), 1);
        let table = &doc.tables[0];
        assert_eq!(table.shape(), "2x2");
        assert!(table.has_shading);
        assert_eq!(table.text, vec!["Cell one", "", "Cell two"]);
        assert_eq!(doc.section_columns, vec![2]);
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let result = parse_document_xml("<w:document><w:body>");
        assert!(matches!(result, Err(Error::Xml(_))));
    }

    #[test]
    fn test_read_document_with_header_and_footer() {
        let data = test_package(DOC, Some("Running head"), Some("Page"));
        let doc = read_document(&data).unwrap();
        assert_eq!(doc.paragraphs.len(), 3);
        assert_eq!(doc.headers, vec!["Running head"]);
        assert_eq!(doc.footers, vec!["Page"]);
    }

    #[test]
    fn test_read_document_missing_main_part() {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_file("word/styles.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(b"<w:styles/>").unwrap();
        let data = zip.finish().unwrap().into_inner();

        let result = read_document(&data);
        assert!(matches!(result, Err(Error::MissingPart(part)) if part == DOCUMENT_PART));
    }

    #[test]
    fn test_read_document_not_a_zip() {
        assert!(matches!(
            read_document(b"plain text"),
            Err(Error::UnknownFormat)
        ));
    }
}
