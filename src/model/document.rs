//! Document-level types.

use super::{ParsedParagraph, ParsedTable};
use serde::{Deserialize, Serialize};

/// The structural tree of one document package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedDocument {
    /// Body paragraphs in document order (direct children of the body)
    pub paragraphs: Vec<ParsedParagraph>,

    /// Tables in document order
    pub tables: Vec<ParsedTable>,

    /// Header part texts, in package order
    pub headers: Vec<String>,

    /// Footer part texts, in package order
    pub footers: Vec<String>,

    /// Declared column count of every section
    pub section_columns: Vec<u32>,
}

impl ParsedDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body paragraph.
    pub fn add_paragraph(&mut self, paragraph: ParsedParagraph) {
        self.paragraphs.push(paragraph);
    }

    /// Add a table.
    pub fn add_table(&mut self, table: ParsedTable) {
        self.tables.push(table);
    }

    /// Number of body paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Check if the document has no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
            && self.tables.is_empty()
            && self.headers.is_empty()
            && self.footers.is_empty()
    }

    /// Index of the first body paragraph whose style name contains `needle`
    /// (case-insensitive), starting the scan at `from`.
    pub fn find_styled(&self, needle: &str, from: usize) -> Option<usize> {
        self.paragraphs
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, p)| p.style_contains(needle))
            .map(|(idx, _)| idx)
    }

    /// Highest declared section column count (1 when none is declared).
    pub fn max_columns(&self) -> u32 {
        self.section_columns.iter().copied().max().unwrap_or(1).max(1)
    }

    /// Get plain text of the body paragraphs.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParsedDocument {
        let mut doc = ParsedDocument::new();
        doc.add_paragraph(ParsedParagraph::new("Paper", "Title"));
        doc.add_paragraph(ParsedParagraph::new("ABSTRACT", "Heading1").shaded(true));
        doc.add_paragraph(ParsedParagraph::with_text("Body"));
        doc.add_paragraph(ParsedParagraph::new("Methods", "heading2"));
        doc
    }

    #[test]
    fn test_document_new() {
        let doc = ParsedDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.paragraph_count(), 0);
        assert_eq!(doc.max_columns(), 1);
    }

    #[test]
    fn test_find_styled() {
        let doc = sample();
        assert_eq!(doc.find_styled("title", 0), Some(0));
        assert_eq!(doc.find_styled("heading", 0), Some(1));
        assert_eq!(doc.find_styled("heading", 2), Some(3));
        assert_eq!(doc.find_styled("heading", 4), None);
    }

    #[test]
    fn test_max_columns() {
        let mut doc = sample();
        doc.section_columns = vec![1, 2, 1];
        assert_eq!(doc.max_columns(), 2);
        doc.section_columns = vec![0];
        assert_eq!(doc.max_columns(), 1);
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(sample().plain_text(), "Paper\nABSTRACT\nBody\nMethods");
    }
}
