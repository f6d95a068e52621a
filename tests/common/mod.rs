//! Shared DOCX fixtures for integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// A body paragraph of a fixture document.
pub struct Para {
    pub text: String,
    pub style: Option<&'static str>,
    pub shaded: bool,
}

pub fn para(text: impl Into<String>) -> Para {
    Para {
        text: text.into(),
        style: None,
        shaded: false,
    }
}

pub fn styled(text: impl Into<String>, style: &'static str) -> Para {
    Para {
        text: text.into(),
        style: Some(style),
        shaded: false,
    }
}

pub fn shaded(text: impl Into<String>, style: &'static str) -> Para {
    Para {
        text: text.into(),
        style: Some(style),
        shaded: true,
    }
}

/// Description of a fixture document.
pub struct DocSpec {
    pub paragraphs: Vec<Para>,
    /// Single-cell table text and shading
    pub table: Option<(String, bool)>,
    pub header: Option<String>,
    pub footer: Option<String>,
    pub columns: u32,
}

impl DocSpec {
    pub fn new(paragraphs: Vec<Para>) -> Self {
        Self {
            paragraphs,
            table: None,
            header: Some("Header".to_string()),
            footer: Some("Footer".to_string()),
            columns: 1,
        }
    }

    pub fn with_table(mut self, text: &str, shaded: bool) -> Self {
        self.table = Some((text.to_string(), shaded));
        self
    }

    pub fn with_columns(mut self, columns: u32) -> Self {
        self.columns = columns;
        self
    }

    /// Build the package bytes.
    pub fn build(&self) -> Vec<u8> {
        let paragraphs: String = self
            .paragraphs
            .iter()
            .map(|p| {
                let style = p
                    .style
                    .map(|s| format!(r#"<w:pStyle w:val="{s}"/>"#))
                    .unwrap_or_default();
                let shading = if p.shaded {
                    r#"<w:shd w:val="clear" w:fill="EAEAEA"/>"#
                } else {
                    ""
                };
                format!(
                    r#"<w:p><w:pPr>{style}{shading}</w:pPr><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
                    p.text
                )
            })
            .collect();

        let table = self
            .table
            .as_ref()
            .map(|(text, shaded)| {
                let shading = if *shaded {
                    r#"<w:shd w:val="clear" w:fill="D9E1F2"/>"#
                } else {
                    ""
                };
                format!(
                    r#"<w:tbl><w:tr><w:tc><w:tcPr>{shading}</w:tcPr><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:tc></w:tr></w:tbl>"#
                )
            })
            .unwrap_or_default();

        let document = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="{WORD_NS}" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
  <w:body>
    {paragraphs}
    {table}
    <w:sectPr><w:cols w:num="{}"/></w:sectPr>
  </w:body>
</w:document>"#,
            self.columns
        );

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();

        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(
            br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="xml" ContentType="application/xml"/>
</Types>"#,
        )
        .unwrap();

        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(document.as_bytes()).unwrap();

        if let Some(text) = &self.header {
            zip.start_file("word/header1.xml", options).unwrap();
            zip.write_all(part("hdr", text).as_bytes()).unwrap();
        }
        if let Some(text) = &self.footer {
            zip.start_file("word/footer1.xml", options).unwrap();
            zip.write_all(part("ftr", text).as_bytes()).unwrap();
        }

        zip.finish().unwrap().into_inner()
    }
}

fn part(tag: &str, text: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><w:{tag} xmlns:w="{WORD_NS}"><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:{tag}>"#
    )
}

/// Exemplar in the house style: title, shaded ABSTRACT heading, body,
/// shaded single-cell table, two columns.
pub fn exemplar(label: &str) -> Vec<u8> {
    DocSpec::new(vec![
        styled(format!("Paper {label}"), "Title"),
        shaded("ABSTRACT", "Heading1"),
        para(format!("Body {label}")),
    ])
    .with_table(&format!("Abstract box {label}"), true)
    .with_columns(2)
    .build()
}

/// The standard three exemplars.
pub fn exemplars() -> Vec<Vec<u8>> {
    ["A", "B", "C"].iter().map(|l| exemplar(l)).collect()
}

/// Content document: title plus one INTRODUCTION section with `body`.
pub fn content_with_body(body: &str) -> Vec<u8> {
    DocSpec::new(vec![
        styled("New Paper", "Title"),
        styled("INTRODUCTION", "Heading1"),
        para(body),
    ])
    .build()
}

/// The standard content document.
pub fn content() -> Vec<u8> {
    content_with_body("Fresh text [2–4] and (1,2).")
}

/// Read `word/document.xml` out of a package.
pub fn document_xml(data: &[u8]) -> String {
    let mut archive = ZipArchive::new(Cursor::new(data)).unwrap();
    let mut file = archive.by_name("word/document.xml").unwrap();
    let mut xml = String::new();
    file.read_to_string(&mut xml).unwrap();
    xml
}
