//! Content composition: reflowing a content document into a skeleton.

mod audit;
mod content;
mod mapper;

pub use audit::{AuditBuilder, UNMAPPED_WARNING};
pub use content::extract_content;
pub use mapper::{
    check_constraints, map_content, Mapping, FALLBACK_BODY_REGION, FALLBACK_TITLE_REGION,
    OVERFLOW_FACTOR, SECTION_CONFIDENCE, TITLE_CONFIDENCE,
};

use crate::citation::CitationFormatter;
use crate::error::Result;
use crate::package::PackageBackend;
use crate::schema::{Audit, StyleFamilyModel};

/// Similarity against the skeleton reported when none is measured.
pub const DEFAULT_SIMILARITY_SCORE: f64 = 0.9;

/// Options for generation.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Value reported as `similarityScoreVsSkeleton`
    pub similarity_score: f64,
}

impl GenerateOptions {
    /// Create new generation options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reported similarity score.
    pub fn with_similarity_score(mut self, score: f64) -> Self {
        self.similarity_score = score;
        self
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            similarity_score: DEFAULT_SIMILARITY_SCORE,
        }
    }
}

/// Output document plus the record of how it was produced.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Output package bytes
    pub output: Vec<u8>,
    pub audit: Audit,
}

/// Reflow `content` into the model's skeleton.
///
/// The model is validated first and nothing runs if it is invalid.
/// Unplaced sections and overlong text end up in the audit, not in an error.
pub fn generate(
    backend: &dyn PackageBackend,
    model: &StyleFamilyModel,
    content: &[u8],
    options: &GenerateOptions,
) -> Result<GenerationResult> {
    model.validate()?;

    let skeleton = backend.extract(&model.skeleton)?;
    let content = extract_content(&backend.extract(content)?);

    let mapping = map_content(model, &skeleton, &content);
    let rewrite = backend.rewrite_paragraphs(
        &model.skeleton,
        &mapping.replacements,
        &model.citation_color,
    )?;

    let formatter = CitationFormatter::shared();
    let found: usize = mapping
        .replacements
        .values()
        .map(|text| formatter.count(text))
        .sum();

    log::debug!(
        "Generated {} bytes: {} replacements, {} citations found, {} written",
        rewrite.data.len(),
        mapping.replacements.len(),
        found,
        rewrite.citation_runs
    );

    let audit = AuditBuilder::new(model)
        .decisions(mapping.decisions)
        .constraint_actions(mapping.constraint_actions)
        .unmapped(mapping.unmapped)
        .warnings(mapping.warnings)
        .citations(found, rewrite.citation_runs)
        .similarity(options.similarity_score)
        .build()?;

    Ok(GenerationResult {
        output: rewrite.data,
        audit,
    })
}
