//! Content extraction from a content document.

use crate::model::{ContentModel, ContentSection, ParsedDocument, ParsedParagraph, UNTITLED_SECTION};

/// Headings are shorter than this many characters when detected by case alone.
const MAX_CAPS_HEADING_CHARS: usize = 100;

/// Split a content document into a title and (heading, body) sections.
///
/// Blank paragraphs are skipped. The first non-blank paragraph among the
/// first two becomes the title. Body text before the first heading is
/// collected under [`UNTITLED_SECTION`].
pub fn extract_content(document: &ParsedDocument) -> ContentModel {
    let mut content = ContentModel::new();
    let mut current: Option<ContentSection> = None;

    for (idx, paragraph) in document.paragraphs.iter().enumerate() {
        let text = paragraph.text.trim();
        if text.is_empty() {
            continue;
        }

        if content.title.is_none() && idx < 2 {
            content.title = Some(text.to_string());
            continue;
        }

        if is_heading(paragraph, text) {
            content.sections.extend(current.take());
            current = Some(ContentSection::new(text));
            continue;
        }

        current
            .get_or_insert_with(|| ContentSection::new(UNTITLED_SECTION))
            .body
            .push(text.to_string());
    }
    content.sections.extend(current);

    log::debug!(
        "Extracted content: title={}, {} sections",
        content.title.is_some(),
        content.sections.len()
    );

    content
}

fn is_heading(paragraph: &ParsedParagraph, trimmed: &str) -> bool {
    paragraph.style_contains("heading")
        || (paragraph.all_caps && trimmed.chars().count() < MAX_CAPS_HEADING_CHARS)
}
