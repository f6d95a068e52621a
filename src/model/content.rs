//! Content model: the title and sections supplied by a content document.

use serde::{Deserialize, Serialize};

/// Heading given to body text that appears before any heading.
pub const UNTITLED_SECTION: &str = "UNTITLED";

/// Title plus ordered (heading, body) sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentModel {
    /// Document title, if one was found near the start
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Sections in document order
    pub sections: Vec<ContentSection>,
}

impl ContentModel {
    /// Create an empty content model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Check if there is neither a title nor any section.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.sections.is_empty()
    }
}

/// One heading and the body paragraphs that follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentSection {
    /// Heading text
    pub heading: String,

    /// Body paragraph texts
    pub body: Vec<String>,
}

impl ContentSection {
    /// Create a section with no body yet.
    pub fn new(heading: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            body: Vec::new(),
        }
    }

    /// Body paragraphs joined with single spaces.
    pub fn joined_body(&self) -> String {
        self.body.join(" ")
    }
}
