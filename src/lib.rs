//! # stylefamily
//!
//! Style-family inference and content composition for DOCX documents.
//!
//! A handful of exemplar documents sharing one visual template is reduced
//! to a [`StyleFamilyModel`]: the recurring regions of the template plus a
//! representative skeleton document. New content is then reflowed into that
//! skeleton, keeping its paragraph formatting, styling citation markers and
//! recording every decision in an [`Audit`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use stylefamily::{generate_from_style_family, infer_style_family, to_json, JsonFormat};
//!
//! fn main() -> stylefamily::Result<()> {
//!     let exemplars: Vec<Vec<u8>> = ["a.docx", "b.docx", "c.docx"]
//!         .iter()
//!         .map(std::fs::read)
//!         .collect::<Result<_, _>>()?;
//!
//!     let model = infer_style_family(&exemplars)?;
//!     let result = generate_from_style_family(&model, &std::fs::read("content.docx")?)?;
//!
//!     std::fs::write("out.docx", &result.output)?;
//!     println!("{}", to_json(&result.audit, JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Deterministic inference**: greedy clustering and medoid selection in exemplar order
//! - **Strict artifacts**: models and audits only parse through validating constructors
//! - **Citation styling**: `[2–4]`, `(1,2)` and friends become coloured superscript runs
//! - **Transparent overflow**: long text is never truncated, only reported
//! - **Parallel parsing**: exemplars are parsed on the Rayon pool

pub mod citation;
pub mod compose;
pub mod detect;
pub mod error;
pub mod infer;
pub mod model;
pub mod package;
pub mod schema;
pub mod signature;

// Re-export commonly used types
pub use citation::{find_citations, Citation, CitationFormatter, DEFAULT_CITATION_COLOR};
pub use compose::{extract_content, map_content, GenerateOptions, GenerationResult, Mapping};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, DocxFormat};
pub use error::{Error, Result};
pub use infer::{choose_medoid, cluster_blocks, Cluster, InferOptions};
pub use model::{ContentModel, ContentSection, ParsedDocument, ParsedParagraph, ParsedTable};
pub use package::{DocxBackend, PackageBackend, ReplacementTable, RewriteOutcome};
pub use schema::{
    decode_document, encode_document, to_json, Audit, ConstraintAction, ConstraintKind,
    JsonFormat, MappingDecision, Region, RegionConstraints, RegionType, SignatureSummary,
    StyleFamilyModel,
};
pub use signature::{build_signatures, signature_similarity, BlockSignature};

use std::path::Path;

/// Infer a style family from 3 to 5 exemplar DOCX packages.
///
/// # Example
///
/// ```no_run
/// let exemplars = vec![
///     std::fs::read("style-1.docx")?,
///     std::fs::read("style-2.docx")?,
///     std::fs::read("style-3.docx")?,
/// ];
/// let model = stylefamily::infer_style_family(&exemplars)?;
/// println!("{} regions", model.regions.len());
/// # Ok::<(), stylefamily::Error>(())
/// ```
pub fn infer_style_family<B: AsRef<[u8]> + Sync>(exemplars: &[B]) -> Result<StyleFamilyModel> {
    StyleFamily::new().infer(exemplars)
}

/// Reflow a content DOCX into the model's skeleton.
pub fn generate_from_style_family(
    model: &StyleFamilyModel,
    content: &[u8],
) -> Result<GenerationResult> {
    StyleFamily::new().generate(model, content)
}

/// Parse a content DOCX into its title and sections.
pub fn extract_content_model(content: &[u8]) -> Result<ContentModel> {
    let document = DocxBackend::new().extract(content)?;
    Ok(extract_content(&document))
}

/// Infer from exemplar files, generate from a content file, and write both
/// the output document and the pretty-printed audit.
pub fn generate_from_files<P, Q, R, S>(
    exemplars: &[P],
    content: Q,
    output: R,
    audit: S,
) -> Result<Audit>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
    S: AsRef<Path>,
{
    let exemplars = exemplars
        .iter()
        .map(std::fs::read)
        .collect::<std::io::Result<Vec<_>>>()?;
    let content = std::fs::read(content)?;

    let family = StyleFamily::new();
    let model = family.infer(&exemplars)?;
    let result = family.generate(&model, &content)?;

    std::fs::write(output, &result.output)?;
    std::fs::write(audit, to_json(&result.audit, JsonFormat::Pretty)?)?;

    Ok(result.audit)
}

/// Builder bundling a package backend with inference and generation options.
///
/// # Example
///
/// ```no_run
/// use stylefamily::StyleFamily;
///
/// let exemplars: Vec<Vec<u8>> = vec![/* 3 to 5 DOCX packages */];
/// let family = StyleFamily::new()
///     .sequential()
///     .with_citation_color("#AA0000");
/// let model = family.infer(&exemplars)?;
/// let result = family.generate(&model, &std::fs::read("content.docx")?)?;
/// # Ok::<(), stylefamily::Error>(())
/// ```
pub struct StyleFamily {
    backend: Box<dyn PackageBackend>,
    infer_options: InferOptions,
    generate_options: GenerateOptions,
}

impl StyleFamily {
    /// Create a builder using the DOCX backend.
    pub fn new() -> Self {
        Self {
            backend: Box::new(DocxBackend::new()),
            infer_options: InferOptions::default(),
            generate_options: GenerateOptions::default(),
        }
    }

    /// Use a different package backend.
    pub fn with_backend(mut self, backend: impl PackageBackend + 'static) -> Self {
        self.backend = Box::new(backend);
        self
    }

    /// Disable parallel exemplar parsing.
    pub fn sequential(mut self) -> Self {
        self.infer_options = self.infer_options.sequential();
        self
    }

    /// Set the clustering threshold.
    pub fn with_cluster_threshold(mut self, threshold: f64) -> Self {
        self.infer_options = self.infer_options.with_cluster_threshold(threshold);
        self
    }

    /// Set the citation colour recorded in inferred models.
    pub fn with_citation_color(mut self, color: impl Into<String>) -> Self {
        self.infer_options = self.infer_options.with_citation_color(color);
        self
    }

    /// Set the similarity score reported in audits.
    pub fn with_similarity_score(mut self, score: f64) -> Self {
        self.generate_options = self.generate_options.with_similarity_score(score);
        self
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Infer a style family model.
    pub fn infer<B: AsRef<[u8]> + Sync>(&self, exemplars: &[B]) -> Result<StyleFamilyModel> {
        infer::infer(self.backend.as_ref(), exemplars, &self.infer_options)
    }

    /// Generate a document from a model and content bytes.
    pub fn generate(&self, model: &StyleFamilyModel, content: &[u8]) -> Result<GenerationResult> {
        compose::generate(self.backend.as_ref(), model, content, &self.generate_options)
    }

    /// Parse a package and return its block signatures.
    pub fn signatures(&self, data: &[u8]) -> Result<Vec<BlockSignature>> {
        Ok(build_signatures(&self.backend.extract(data)?))
    }
}

impl Default for StyleFamily {
    fn default() -> Self {
        Self::new()
    }
}
