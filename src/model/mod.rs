//! Structural document model.
//!
//! This module defines the intermediate representation that bridges the
//! package layer and the style-family engine: ordered body paragraphs,
//! tables, header/footer blocks and section column counts, plus the
//! title/sections content model derived from a content document.

mod content;
mod document;
mod paragraph;
mod table;

pub use content::{ContentModel, ContentSection, UNTITLED_SECTION};
pub use document::ParsedDocument;
pub use paragraph::{ParsedParagraph, DEFAULT_STYLE};
pub use table::ParsedTable;
