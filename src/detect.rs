//! DOCX format detection and validation.

use crate::error::{Error, Result};
use crate::package::DOCUMENT_PART;
use std::io::Cursor;
use std::path::Path;
use zip::ZipArchive;

/// DOCX package information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxFormat {
    /// Number of entries in the zip container
    pub entry_count: usize,
    /// Number of `word/header*.xml` parts
    pub header_parts: usize,
    /// Number of `word/footer*.xml` parts
    pub footer_parts: usize,
}

impl std::fmt::Display for DocxFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DOCX ({} parts, {} headers, {} footers)",
            self.entry_count, self.header_parts, self.footer_parts
        )
    }
}

/// Zip local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Detect DOCX format from a file path.
///
/// # Example
/// ```no_run
/// use stylefamily::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("exemplar.docx").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<DocxFormat> {
    let data = std::fs::read(path)?;
    detect_format_from_bytes(&data)
}

/// Detect DOCX format from bytes.
///
/// # Returns
/// * `Ok(DocxFormat)` if the data is a zip container with a main document part
/// * `Err(Error::UnknownFormat)` if the data is not a zip container
/// * `Err(Error::MissingPart)` if the container has no `word/document.xml`
pub fn detect_format_from_bytes(data: &[u8]) -> Result<DocxFormat> {
    if !data.starts_with(ZIP_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    let archive = ZipArchive::new(Cursor::new(data)).map_err(|_| Error::UnknownFormat)?;
    let names: Vec<&str> = archive.file_names().collect();

    if !names.iter().any(|n| *n == DOCUMENT_PART) {
        return Err(Error::MissingPart(DOCUMENT_PART.to_string()));
    }

    Ok(DocxFormat {
        entry_count: names.len(),
        header_parts: names.iter().filter(|n| is_numbered_part(n, "header")).count(),
        footer_parts: names.iter().filter(|n| is_numbered_part(n, "footer")).count(),
    })
}

/// Check whether a zip entry name is `word/<kind><digits>.xml`.
pub(crate) fn is_numbered_part(name: &str, kind: &str) -> bool {
    name.strip_prefix("word/")
        .and_then(|rest| rest.strip_prefix(kind))
        .and_then(|rest| rest.strip_suffix(".xml"))
        .map(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}

/// Check if a file is a DOCX package.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes represent a DOCX package.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}
