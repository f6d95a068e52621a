//! Citation marker detection and run chunking.
//!
//! A citation token is a bracketed or parenthesized list of integers,
//! optionally ranges (`2-4`, `2–4`), separated by commas: `[2–4]`, `(1,2)`,
//! `[8, 10-12]`. Detection reports character offsets; chunking splits a
//! replacement text into alternating plain and citation-like runs for the
//! package writer.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default colour applied to citation runs (RRGGBB, no leading `#`).
pub const DEFAULT_CITATION_COLOR: &str = "2E5AAC";

/// A citation token found in a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Citation {
    /// Matched text, e.g. `[2–4]`
    pub text: String,

    /// Start offset, in characters
    pub start: usize,

    /// End offset (exclusive), in characters
    pub end: usize,
}

/// Kind of a text chunk produced by [`CitationFormatter::split`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    /// Rendered as a plain run
    Plain,
    /// Rendered as a superscript run in the citation colour
    Citation,
}

/// A run-sized piece of replacement text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Chunk text
    pub text: String,

    /// How the chunk is rendered
    pub kind: ChunkKind,
}

impl TextChunk {
    /// Check if this chunk is rendered as a citation.
    pub fn is_citation(&self) -> bool {
        self.kind == ChunkKind::Citation
    }
}

/// Compiled citation patterns.
#[derive(Debug, Clone)]
pub struct CitationFormatter {
    token: Regex,
    chunk: Regex,
    inline_bracket: Regex,
    inline_paren: Regex,
}

static SHARED: OnceLock<CitationFormatter> = OnceLock::new();

impl CitationFormatter {
    /// Compile the citation patterns.
    pub fn new() -> Self {
        Self {
            token: Regex::new(
                r"\[[0-9]+(?:[-–][0-9]+)?(?:\s*,\s*[0-9]+(?:[-–][0-9]+)?)*\]|\([0-9]+(?:[-–][0-9]+)?(?:\s*,\s*[0-9]+(?:[-–][0-9]+)?)*\)",
            )
            .unwrap(),
            chunk: Regex::new(r"\[[^\]]+\]|\([^)]+\)").unwrap(),
            inline_bracket: Regex::new(r"^\[[0-9,\s\-–]+\]$").unwrap(),
            inline_paren: Regex::new(r"^\([0-9,\s\-–]+\)$").unwrap(),
        }
    }

    /// Process-wide formatter, compiled on first use.
    pub fn shared() -> &'static CitationFormatter {
        SHARED.get_or_init(CitationFormatter::new)
    }

    /// Find all non-overlapping citation tokens, left to right.
    pub fn find(&self, input: &str) -> Vec<Citation> {
        let mut citations = Vec::new();
        let mut chars_before = 0;
        let mut byte_cursor = 0;

        for m in self.token.find_iter(input) {
            chars_before += input[byte_cursor..m.start()].chars().count();
            let len = m.as_str().chars().count();
            citations.push(Citation {
                text: m.as_str().to_string(),
                start: chars_before,
                end: chars_before + len,
            });
            chars_before += len;
            byte_cursor = m.end();
        }

        citations
    }

    /// Number of citation tokens in `input`.
    pub fn count(&self, input: &str) -> usize {
        self.token.find_iter(input).count()
    }

    /// Check whether a chunk has the inline citation shape.
    pub fn is_inline_citation(&self, chunk: &str) -> bool {
        self.inline_bracket.is_match(chunk) || self.inline_paren.is_match(chunk)
    }

    /// Split text into alternating plain and bracketed chunks.
    ///
    /// Empty chunks are dropped. A bracketed chunk is only marked as a
    /// citation when it has the inline citation shape; `(see above)` stays
    /// plain.
    pub fn split(&self, input: &str) -> Vec<TextChunk> {
        let mut chunks = Vec::new();
        let mut cursor = 0;

        for m in self.chunk.find_iter(input) {
            if m.start() > cursor {
                chunks.push(TextChunk {
                    text: input[cursor..m.start()].to_string(),
                    kind: ChunkKind::Plain,
                });
            }
            let kind = if self.is_inline_citation(m.as_str()) {
                ChunkKind::Citation
            } else {
                ChunkKind::Plain
            };
            chunks.push(TextChunk {
                text: m.as_str().to_string(),
                kind,
            });
            cursor = m.end();
        }

        if cursor < input.len() {
            chunks.push(TextChunk {
                text: input[cursor..].to_string(),
                kind: ChunkKind::Plain,
            });
        }

        chunks
    }
}

impl Default for CitationFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Find all citation tokens in `input`.
///
/// # Example
///
/// ```
/// use stylefamily::citation::find_citations;
///
/// let found = find_citations("See [1] and (2,3).");
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].start, 4);
/// ```
pub fn find_citations(input: &str) -> Vec<Citation> {
    CitationFormatter::shared().find(input)
}

/// Strip a leading `#` from a colour value.
pub fn normalize_color(color: &str) -> &str {
    color.strip_prefix('#').unwrap_or(color)
}

/// Check for a six-digit hex colour, with or without a leading `#`.
pub fn is_valid_color(color: &str) -> bool {
    let hex = normalize_color(color);
    hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_ranges_and_comma_variants() {
        let found = find_citations("Alpha [2–4], beta (1,2) and [8, 10-12].");
        let texts: Vec<&str> = found.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["[2–4]", "(1,2)", "[8, 10-12]"]);

        assert_eq!((found[0].start, found[0].end), (6, 11));
        assert_eq!((found[1].start, found[1].end), (18, 23));
        assert_eq!((found[2].start, found[2].end), (28, 38));
    }

    #[test]
    fn test_find_ignores_non_numeric_brackets() {
        assert!(find_citations("A note (see above) and [citation needed].").is_empty());
        assert!(find_citations("Empty [] and ()").is_empty());
    }

    #[test]
    fn test_split_marks_citations() {
        let formatter = CitationFormatter::new();
        let chunks = formatter.split("Fresh text [2–4] and (1,2).");
        let kinds: Vec<ChunkKind> = chunks.iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ChunkKind::Plain,
                ChunkKind::Citation,
                ChunkKind::Plain,
                ChunkKind::Citation,
                ChunkKind::Plain
            ]
        );
        let rebuilt: String = chunks.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(rebuilt, "Fresh text [2–4] and (1,2).");
    }

    #[test]
    fn test_split_keeps_parenthetical_plain() {
        let formatter = CitationFormatter::new();
        let chunks = formatter.split("(see above)");
        assert_eq!(chunks.len(), 1);
        assert!(!chunks[0].is_citation());
    }

    #[test]
    fn test_split_plain_text() {
        let formatter = CitationFormatter::new();
        assert!(formatter.split("").is_empty());
        let chunks = formatter.split("no markers here");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].kind, ChunkKind::Plain);
    }

    #[test]
    fn test_inline_shape_is_looser_than_token() {
        let formatter = CitationFormatter::new();
        // spaces after the bracket fail token detection but pass the inline shape
        assert_eq!(formatter.count("[ 3 ]"), 0);
        assert!(formatter.is_inline_citation("[ 3 ]"));
    }

    #[test]
    fn test_shared_formatter_is_compiled_once() {
        let first = CitationFormatter::shared();
        let second = CitationFormatter::shared();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.count("See [1] and (2,3)."), 2);
    }

    #[test]
    fn test_color_helpers() {
        assert_eq!(normalize_color("#2E5AAC"), "2E5AAC");
        assert!(is_valid_color("2e5aac"));
        assert!(is_valid_color("#2E5AAC"));
        assert!(!is_valid_color("blue"));
        assert!(!is_valid_color("#12345"));
    }
}
