//! Document package layer.
//!
//! Reads the structural tree out of a WordprocessingML (DOCX) package and
//! writes replacement paragraph text back into it. The style-family engine
//! only talks to this layer through [`PackageBackend`].

mod backend;
mod reader;
mod writer;

pub use backend::{DocxBackend, PackageBackend, ReplacementTable, RewriteOutcome};
pub use reader::read_document;
pub use writer::rewrite_paragraphs;

/// The main document part every DOCX package must contain.
pub const DOCUMENT_PART: &str = "word/document.xml";

/// WordprocessingML main namespace.
pub const WORD_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Build an in-memory DOCX package around a document part.
#[cfg(test)]
pub(crate) fn test_package(document_xml: &str, header: Option<&str>, footer: Option<&str>) -> Vec<u8> {
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    let part = |tag: &str, text: &str| {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><w:{tag} xmlns:w="{WORD_NS}"><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:{tag}>"#
        )
    };

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    zip.start_file("[Content_Types].xml", options).unwrap();
    zip.write_all(br#"<?xml version="1.0" encoding="UTF-8"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"/>"#)
        .unwrap();
    zip.start_file(DOCUMENT_PART, options).unwrap();
    zip.write_all(document_xml.as_bytes()).unwrap();
    if let Some(text) = header {
        zip.start_file("word/header1.xml", options).unwrap();
        zip.write_all(part("hdr", text).as_bytes()).unwrap();
    }
    if let Some(text) = footer {
        zip.start_file("word/footer1.xml", options).unwrap();
        zip.write_all(part("ftr", text).as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}
