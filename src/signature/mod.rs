//! Block signatures: compact structural fingerprints of document blocks.

mod similarity;

pub use similarity::{
    signature_similarity, PARAGRAPH_WEIGHT, PART_WEIGHT, POSITION_WEIGHT, SHADING_WEIGHT,
    STYLE_WEIGHT, TABLE_WEIGHT,
};

use serde::{Deserialize, Serialize};

use crate::model::ParsedDocument;

/// Source part of body paragraphs and tables.
pub const DOCUMENT_PART_NAME: &str = "document";

/// Style sentinel given to every table block.
pub const TABLE_STYLE: &str = "TableText";

/// Fingerprint of one paragraph, table, header or footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSignature {
    /// Style names, without duplicates
    pub dominant_styles: Vec<String>,

    pub has_shading: bool,

    pub paragraph_count: usize,

    /// `RxC` for tables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_shape: Option<String>,

    /// Relative position in [0, 1]
    pub position_percentile: f64,

    /// `document`, `header{n}` or `footer{n}`
    pub part: String,
}

impl BlockSignature {
    /// Check whether any dominant style contains `needle` (lower case), ignoring case.
    pub fn has_style_like(&self, needle: &str) -> bool {
        self.dominant_styles
            .iter()
            .any(|s| s.to_lowercase().contains(needle))
    }

    /// Check if this block is a table.
    pub fn is_table(&self) -> bool {
        self.table_shape.is_some()
    }
}

/// Build the ordered signatures of a document: body paragraphs, then
/// tables, then headers, then footers.
pub fn build_signatures(document: &ParsedDocument) -> Vec<BlockSignature> {
    let mut out = Vec::with_capacity(
        document.paragraphs.len()
            + document.tables.len()
            + document.headers.len()
            + document.footers.len(),
    );

    let paragraph_total = document.paragraphs.len().max(1) as f64;
    for (i, p) in document.paragraphs.iter().enumerate() {
        out.push(BlockSignature {
            dominant_styles: vec![p.style.clone()],
            has_shading: p.has_shading,
            paragraph_count: 1,
            table_shape: None,
            position_percentile: i as f64 / paragraph_total,
            part: DOCUMENT_PART_NAME.to_string(),
        });
    }

    let table_total = document.tables.len().max(1) as f64;
    for (i, t) in document.tables.iter().enumerate() {
        out.push(BlockSignature {
            dominant_styles: vec![TABLE_STYLE.to_string()],
            has_shading: t.has_shading,
            paragraph_count: t.paragraph_count(),
            table_shape: Some(t.shape()),
            position_percentile: (i + 1) as f64 / table_total,
            part: DOCUMENT_PART_NAME.to_string(),
        });
    }

    for i in 0..document.headers.len() {
        out.push(fixed_block("Header", 0.0, format!("header{i}")));
    }
    for i in 0..document.footers.len() {
        out.push(fixed_block("Footer", 1.0, format!("footer{i}")));
    }

    out
}

fn fixed_block(style: &str, position: f64, part: String) -> BlockSignature {
    BlockSignature {
        dominant_styles: vec![style.to_string()],
        has_shading: false,
        paragraph_count: 1,
        table_shape: None,
        position_percentile: position,
        part,
    }
}
