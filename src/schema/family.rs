//! Style family model and region types.

use std::collections::HashSet;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::citation::is_valid_color;
use crate::error::{Error, Result};

use super::check_unit_interval;

/// Semantic type of a template region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegionType {
    Title,
    Abstract,
    SectionHeader,
    Body,
    References,
    Header,
    Footer,
    TableContainer,
    Unknown,
}

impl RegionType {
    /// Wire name, e.g. `SECTION_HEADER`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionType::Title => "TITLE",
            RegionType::Abstract => "ABSTRACT",
            RegionType::SectionHeader => "SECTION_HEADER",
            RegionType::Body => "BODY",
            RegionType::References => "REFERENCES",
            RegionType::Header => "HEADER",
            RegionType::Footer => "FOOTER",
            RegionType::TableContainer => "TABLE_CONTAINER",
            RegionType::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for RegionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated signature statistics of a region's cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SignatureSummary {
    /// Union of member styles, in first-seen order
    pub dominant_styles: Vec<String>,

    /// Whether any member is shaded
    pub has_shading: bool,

    /// Rounded mean member paragraph count
    pub paragraph_count: usize,

    /// Representative's table shape
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_shape: Option<String>,
}

/// Layout constraints derived from a region's members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegionConstraints {
    pub max_chars_p90: usize,
    pub max_paragraphs_p90: usize,
    pub min_font_size_half_points: u32,
}

/// A semantically classified cluster of structurally similar blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Region {
    /// Unique id within the model, e.g. `region-0`
    pub id: String,

    /// Semantic type
    #[serde(rename = "type")]
    pub region_type: RegionType,

    /// Source part of the cluster representative
    pub source_part: String,

    /// Share of exemplars that contributed a member, in [0, 1]
    pub confidence: f64,

    pub signature_summary: SignatureSummary,

    pub constraints: RegionConstraints,
}

impl Region {
    /// Validate a single region.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::Schema("region id must not be empty".to_string()));
        }
        check_unit_interval(self.confidence, &format!("confidence of {}", self.id))
    }
}

/// Model format version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelVersion {
    #[default]
    #[serde(rename = "v1")]
    V1,
}

/// The artifact passed from inference to generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StyleFamilyModel {
    pub version: ModelVersion,

    /// The medoid exemplar's raw package bytes
    #[serde(rename = "skeletonDocxBase64", with = "base64_bytes")]
    pub skeleton: Vec<u8>,

    /// Citation run colour, RRGGBB
    pub citation_color: String,

    pub regions: Vec<Region>,

    /// Inference-time warnings
    pub warnings: Vec<String>,
}

impl StyleFamilyModel {
    /// Build a model, rejecting anything that would not pass [`validate`](Self::validate).
    pub fn new(
        skeleton: Vec<u8>,
        citation_color: impl Into<String>,
        regions: Vec<Region>,
        warnings: Vec<String>,
    ) -> Result<Self> {
        let model = Self {
            version: ModelVersion::V1,
            skeleton,
            citation_color: citation_color.into(),
            regions,
            warnings,
        };
        model.validate()?;
        Ok(model)
    }

    /// Parse and validate a model from JSON.
    ///
    /// Unknown fields, missing fields, a wrong version literal, malformed
    /// base64 and out-of-range values are all rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let model: Self =
            serde_json::from_str(json).map_err(|e| Error::Schema(e.to_string()))?;
        model.validate()?;
        Ok(model)
    }

    /// Check every structural invariant of the model.
    pub fn validate(&self) -> Result<()> {
        if self.skeleton.is_empty() {
            return Err(Error::Schema("skeleton document is empty".to_string()));
        }
        if !is_valid_color(&self.citation_color) {
            return Err(Error::Schema(format!(
                "citation colour {:?} is not an RRGGBB hex value",
                self.citation_color
            )));
        }
        if self.regions.is_empty() {
            return Err(Error::Schema("model has no regions".to_string()));
        }

        let mut seen = HashSet::new();
        for region in &self.regions {
            region.validate()?;
            if !seen.insert(region.id.as_str()) {
                return Err(Error::Schema(format!("duplicate region id {}", region.id)));
            }
        }
        Ok(())
    }

    /// First region of the given type.
    pub fn region_of_type(&self, region_type: RegionType) -> Option<&Region> {
        self.regions.iter().find(|r| r.region_type == region_type)
    }

    /// Region ids in model order.
    pub fn region_ids(&self) -> Vec<&str> {
        self.regions.iter().map(|r| r.id.as_str()).collect()
    }
}

mod base64_bytes {
    use super::*;

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
