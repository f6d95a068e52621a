//! Error types for the stylefamily library.

use std::io;
use thiserror::Error;

/// Result type alias for stylefamily operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during inference or generation.
///
/// Only hard conditions live here. Unmapped content, overflowing text and
/// low-confidence mappings are recorded in the [`Audit`](crate::Audit) instead.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input is not recognized as a DOCX package.
    #[error("Unknown file format: not a valid DOCX package")]
    UnknownFormat,

    /// The zip container could not be read or written.
    #[error("Package error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A package part is not well-formed XML.
    #[error("XML parsing error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// Streaming XML rewrite failed.
    #[error("XML rewrite error: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    /// A required part of the package is absent.
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// Inference was called with an unsupported number of exemplars.
    #[error("Expected 3-5 exemplar documents, got {0}")]
    ExemplarCount(usize),

    /// None of the exemplars contains a paragraph, table, header or footer.
    #[error("Exemplar documents contain no blocks to infer regions from")]
    EmptyExemplars,

    /// A style family model or audit failed strict validation.
    #[error("Schema violation: {0}")]
    Schema(String),

    /// The skeleton payload is not valid base64.
    #[error("Base64 decoding error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// JSON serialization or parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error while writing the output document.
    #[error("Write error: {0}")]
    Write(String),

    /// Failure reported by a custom [`PackageBackend`](crate::PackageBackend)
    /// that fits no other variant.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error rejects the caller's input before any processing.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::ExemplarCount(_)
                | Error::EmptyExemplars
                | Error::Schema(_)
                | Error::UnknownFormat
                | Error::MissingPart(_)
        )
    }
}
