//! Engine behaviour against a non-DOCX backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use stylefamily::{
    Error, PackageBackend, ParsedDocument, ParsedParagraph, ReplacementTable, Result,
    RewriteOutcome, StyleFamily,
};

/// Treats each input line as a paragraph: `Style|text`.
#[derive(Default)]
struct LineBackend {
    rewrites: Arc<AtomicUsize>,
}

impl PackageBackend for LineBackend {
    fn name(&self) -> &str {
        "lines"
    }

    fn extract(&self, data: &[u8]) -> Result<ParsedDocument> {
        let text = std::str::from_utf8(data).map_err(|e| Error::Other(e.to_string()))?;
        let mut doc = ParsedDocument::new();
        for line in text.lines() {
            let (style, body) = line
                .split_once('|')
                .ok_or_else(|| Error::Other(format!("bad line: {line}")))?;
            doc.add_paragraph(ParsedParagraph::new(body, style));
        }
        Ok(doc)
    }

    fn rewrite_paragraphs(
        &self,
        data: &[u8],
        replacements: &ReplacementTable,
        _citation_color: &str,
    ) -> Result<RewriteOutcome> {
        self.rewrites.fetch_add(1, Ordering::SeqCst);
        let mut lines: Vec<String> = std::str::from_utf8(data)
            .map_err(|e| Error::Other(e.to_string()))?
            .lines()
            .map(str::to_string)
            .collect();
        for (idx, text) in replacements {
            if let Some(line) = lines.get_mut(*idx) {
                let style = line.split('|').next().unwrap_or("Normal").to_string();
                *line = format!("{style}|{text}");
            }
        }
        Ok(RewriteOutcome {
            data: lines.join("\n").into_bytes(),
            citation_runs: 0,
            paragraphs_rewritten: replacements.len(),
        })
    }
}

const EXEMPLAR: &str = "Title|Paper\nHeading1|Intro\nNormal|Body\nHeading1|Method\nNormal|Body";

#[test]
fn test_custom_backend_round_trip() {
    let rewrites = Arc::new(AtomicUsize::new(0));
    let family = StyleFamily::new().with_backend(LineBackend {
        rewrites: Arc::clone(&rewrites),
    });
    assert_eq!(family.backend_name(), "lines");

    let exemplars = vec![EXEMPLAR.as_bytes(); 3];
    let model = family.infer(&exemplars).unwrap();
    assert_eq!(model.skeleton, EXEMPLAR.as_bytes());

    let content = "Title|Fresh\nHeading1|One\nNormal|First [1]\nHeading1|Two\nNormal|Second";
    let result = family.generate(&model, content.as_bytes()).unwrap();

    assert_eq!(rewrites.load(Ordering::SeqCst), 1);
    assert_eq!(
        String::from_utf8(result.output).unwrap(),
        "Title|Fresh\nHeading1|One\nNormal|First [1]\nHeading1|Two\nNormal|Second"
    );
    // the backend wrote no runs, so the scanned count wins
    assert_eq!(result.audit.citations_formatted_count, 1);
    assert_eq!(result.audit.mapping_decisions.len(), 3);
}

#[test]
fn test_backend_errors_propagate() {
    let family = StyleFamily::new().with_backend(LineBackend::default());
    let exemplars = vec![EXEMPLAR.as_bytes(), b"no separator".as_slice(), EXEMPLAR.as_bytes()];
    assert!(matches!(family.infer(&exemplars), Err(Error::Other(_))));
}
