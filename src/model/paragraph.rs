//! Paragraph-level types.

use serde::{Deserialize, Serialize};

/// Style name assumed when a paragraph declares none.
pub const DEFAULT_STYLE: &str = "Normal";

/// A body paragraph as read from a document package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedParagraph {
    /// Concatenated run text
    pub text: String,

    /// Named paragraph style (e.g. "Title", "Heading1")
    pub style: String,

    /// Whether the paragraph carries paragraph-level shading
    pub has_shading: bool,

    /// Whether the text is non-empty and entirely upper case
    pub all_caps: bool,

    /// First explicit run font size, in half points
    pub font_size_half_points: Option<u32>,
}

impl ParsedParagraph {
    /// Create a paragraph with the given text and style.
    ///
    /// The all-caps flag is derived from the text.
    pub fn new(text: impl Into<String>, style: impl Into<String>) -> Self {
        let text = text.into();
        let all_caps = is_all_caps(&text);
        Self {
            text,
            style: style.into(),
            has_shading: false,
            all_caps,
            font_size_half_points: None,
        }
    }

    /// Create a paragraph with the default style.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(text, DEFAULT_STYLE)
    }

    /// Set the shading flag and return self.
    pub fn shaded(mut self, shaded: bool) -> Self {
        self.has_shading = shaded;
        self
    }

    /// Set the font size (half points) and return self.
    pub fn font_size(mut self, half_points: u32) -> Self {
        self.font_size_half_points = Some(half_points);
        self
    }

    /// Check if the paragraph has no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Case-insensitive check of the style name.
    pub fn style_contains(&self, needle: &str) -> bool {
        contains_ignore_case(&self.style, needle)
    }
}

/// Non-empty text equal to its upper-case form.
pub(crate) fn is_all_caps(text: &str) -> bool {
    !text.is_empty() && text == text.to_uppercase()
}

/// Case-insensitive substring match; `needle` must be lower case.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
