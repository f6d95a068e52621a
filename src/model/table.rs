//! Table types.

use serde::{Deserialize, Serialize};

/// A table as read from a document package.
///
/// Only the shape, shading and cell paragraph texts are kept; the
/// style-family engine never looks inside individual cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTable {
    /// Number of rows
    pub rows: usize,

    /// Widest row, in cells
    pub cols: usize,

    /// Whether any cell carries shading
    pub has_shading: bool,

    /// Text of every paragraph inside the table, in document order
    pub text: Vec<String>,
}

impl ParsedTable {
    /// Create an unshaded table with the given shape and no text.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            has_shading: false,
            text: Vec::new(),
        }
    }

    /// Set the shading flag and return self.
    pub fn shaded(mut self, shaded: bool) -> Self {
        self.has_shading = shaded;
        self
    }

    /// Append a cell paragraph and return self.
    pub fn with_paragraph(mut self, text: impl Into<String>) -> Self {
        self.text.push(text.into());
        self
    }

    /// Shape string in "RxC" form.
    pub fn shape(&self) -> String {
        format!("{}x{}", self.rows, self.cols)
    }

    /// Number of paragraphs inside the table.
    pub fn paragraph_count(&self) -> usize {
        self.text.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        let table = ParsedTable::new(3, 2);
        assert_eq!(table.shape(), "3x2");
        assert_eq!(table.paragraph_count(), 0);
    }

    #[test]
    fn test_table_builder() {
        let table = ParsedTable::new(1, 1)
            .shaded(true)
            .with_paragraph("Abstract box");
        assert!(table.has_shading);
        assert_eq!(table.paragraph_count(), 1);
    }
}
