//! Package backend abstraction layer.
//!
//! Provides a trait-based interface for document package operations,
//! isolating the concrete container format (DOCX) from the inference and
//! generation logic.

use std::collections::BTreeMap;

use crate::citation::CitationFormatter;
use crate::error::Result;
use crate::model::ParsedDocument;

use super::{reader, writer};

/// Body paragraph index → replacement text, iterated in index order.
pub type ReplacementTable = BTreeMap<usize, String>;

/// Result of writing replacement text back into a package.
#[derive(Debug, Clone, Default)]
pub struct RewriteOutcome {
    /// The rewritten package bytes
    pub data: Vec<u8>,

    /// Number of citation runs actually written
    pub citation_runs: usize,

    /// Number of paragraphs whose runs were replaced
    pub paragraphs_rewritten: usize,
}

/// Abstract interface for document package access.
///
/// Implementations must be free of cross-call state: inference parses
/// exemplars from several threads through one shared backend.
pub trait PackageBackend: Send + Sync {
    /// Name of the package format handled by this backend.
    fn name(&self) -> &str;

    /// Parse a package into its structural tree.
    fn extract(&self, data: &[u8]) -> Result<ParsedDocument>;

    /// Replace the runs of the given body paragraphs, styling citation
    /// chunks with `citation_color`.
    fn rewrite_paragraphs(
        &self,
        data: &[u8],
        replacements: &ReplacementTable,
        citation_color: &str,
    ) -> Result<RewriteOutcome>;
}

/// Concrete [`PackageBackend`] for WordprocessingML (DOCX) packages.
///
/// Citation chunking uses [`CitationFormatter::shared`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxBackend;

impl DocxBackend {
    /// Create a new DOCX backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl PackageBackend for DocxBackend {
    fn name(&self) -> &str {
        "docx"
    }

    fn extract(&self, data: &[u8]) -> Result<ParsedDocument> {
        reader::read_document(data)
    }

    fn rewrite_paragraphs(
        &self,
        data: &[u8],
        replacements: &ReplacementTable,
        citation_color: &str,
    ) -> Result<RewriteOutcome> {
        writer::rewrite_paragraphs(
            data,
            replacements,
            CitationFormatter::shared(),
            citation_color,
        )
    }
}
