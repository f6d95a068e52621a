//! Style family inference.
//!
//! Exemplars are parsed (optionally in parallel), fingerprinted, clustered
//! into regions and reduced to a single skeleton. Everything after parsing
//! runs sequentially in exemplar order so the model is reproducible.

mod classify;
mod cluster;
mod medoid;

pub use classify::{
    build_region, classify, p90, RegionRule, BODY_MIN_FONT, CHARS_PER_PARAGRAPH, RULES,
    TITLE_MIN_FONT,
};
pub use cluster::{cluster_blocks, Cluster, DEFAULT_CLUSTER_THRESHOLD};
pub use medoid::{choose_medoid, document_distance};

use rayon::prelude::*;

use crate::citation::{normalize_color, DEFAULT_CITATION_COLOR};
use crate::error::{Error, Result};
use crate::model::ParsedDocument;
use crate::package::PackageBackend;
use crate::schema::{Region, StyleFamilyModel};
use crate::signature::{build_signatures, BlockSignature};

/// Smallest accepted exemplar set.
pub const MIN_EXEMPLARS: usize = 3;

/// Largest accepted exemplar set.
pub const MAX_EXEMPLARS: usize = 5;

/// Warning carried by every inferred model.
pub const DRAWINGML_WARNING: &str = "v1 defers floating DrawingML text boxes/shapes.";

/// Options for style family inference.
#[derive(Debug, Clone)]
pub struct InferOptions {
    /// Parse exemplars on the rayon pool
    pub parallel: bool,

    /// Minimum similarity for joining a cluster
    pub cluster_threshold: f64,

    /// Colour recorded in the model for citation runs (RRGGBB)
    pub citation_color: String,
}

impl InferOptions {
    /// Create new inference options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable parallel parsing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set the clustering threshold.
    pub fn with_cluster_threshold(mut self, threshold: f64) -> Self {
        self.cluster_threshold = threshold;
        self
    }

    /// Set the citation colour; a leading `#` is dropped.
    pub fn with_citation_color(mut self, color: impl Into<String>) -> Self {
        let color = color.into();
        self.citation_color = normalize_color(&color).to_string();
        self
    }
}

impl Default for InferOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            cluster_threshold: DEFAULT_CLUSTER_THRESHOLD,
            citation_color: DEFAULT_CITATION_COLOR.to_string(),
        }
    }
}

/// Reject exemplar sets outside [`MIN_EXEMPLARS`]..=[`MAX_EXEMPLARS`].
pub fn validate_exemplar_count(count: usize) -> Result<()> {
    if (MIN_EXEMPLARS..=MAX_EXEMPLARS).contains(&count) {
        Ok(())
    } else {
        Err(Error::ExemplarCount(count))
    }
}

/// Infer a style family model from 3 to 5 exemplar packages.
///
/// Any exemplar that fails to parse aborts the whole call.
pub fn infer<B: AsRef<[u8]> + Sync>(
    backend: &dyn PackageBackend,
    exemplars: &[B],
    options: &InferOptions,
) -> Result<StyleFamilyModel> {
    validate_exemplar_count(exemplars.len())?;

    let documents: Vec<ParsedDocument> = if options.parallel {
        exemplars
            .par_iter()
            .map(|data| backend.extract(data.as_ref()))
            .collect::<Result<Vec<_>>>()?
    } else {
        exemplars
            .iter()
            .map(|data| backend.extract(data.as_ref()))
            .collect::<Result<Vec<_>>>()?
    };

    let per_document: Vec<Vec<BlockSignature>> = documents.iter().map(build_signatures).collect();
    log::debug!(
        "Built signatures for {} exemplars: {:?}",
        per_document.len(),
        per_document.iter().map(Vec::len).collect::<Vec<_>>()
    );

    let medoid = choose_medoid(&per_document);

    let pooled: Vec<BlockSignature> = per_document.into_iter().flatten().collect();
    if pooled.is_empty() {
        return Err(Error::EmptyExemplars);
    }
    let clusters = cluster_blocks(&pooled, options.cluster_threshold);

    let regions: Vec<Region> = clusters
        .iter()
        .map(|cluster| build_region(cluster, exemplars.len()))
        .collect();

    let model = StyleFamilyModel::new(
        exemplars[medoid].as_ref().to_vec(),
        options.citation_color.clone(),
        regions,
        inference_warnings(&documents),
    )?;

    log::debug!(
        "Inferred {} regions using exemplar {} as skeleton",
        model.regions.len(),
        medoid
    );

    Ok(model)
}

fn inference_warnings(documents: &[ParsedDocument]) -> Vec<String> {
    let mut warnings = vec![DRAWINGML_WARNING.to_string()];

    let columns = documents
        .iter()
        .map(ParsedDocument::max_columns)
        .max()
        .unwrap_or(1);
    if columns > 1 {
        warnings.push(format!(
            "v1 does not reflow multi-column sections (up to {columns} columns found)."
        ));
    }

    warnings
}
