//! Generation audit.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::check_unit_interval;
use super::family::Region;

/// Where one content field was placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MappingDecision {
    /// Content field, e.g. `title` or `section:INTRODUCTION`
    pub content_field: String,

    /// Region the field was attributed to
    pub region_id: String,

    pub confidence: f64,

    /// Human-readable reason
    pub explanation: String,
}

/// Kind of a constraint action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Text longer than the region's p90 character budget
    FontShrink,
    /// Text far beyond the budget, kept in full
    OverflowWarning,
}

/// A constraint check that fired during generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ConstraintAction {
    pub region_id: String,
    pub action: ConstraintKind,
    pub detail: String,
}

/// Complete record of one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Audit {
    pub inferred_regions: Vec<Region>,
    pub mapping_decisions: Vec<MappingDecision>,
    pub constraint_actions: Vec<ConstraintAction>,
    pub citations_formatted_count: usize,
    pub unmapped_content: Vec<String>,
    pub warnings: Vec<String>,
    pub similarity_score_vs_skeleton: f64,
}

impl Audit {
    /// Parse and validate an audit from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let audit: Self = serde_json::from_str(json).map_err(|e| Error::Schema(e.to_string()))?;
        audit.validate()?;
        Ok(audit)
    }

    /// Check ranges and region-id uniqueness.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for region in &self.inferred_regions {
            region.validate()?;
            if !seen.insert(region.id.as_str()) {
                return Err(Error::Schema(format!("duplicate region id {}", region.id)));
            }
        }
        for decision in &self.mapping_decisions {
            check_unit_interval(
                decision.confidence,
                &format!("confidence of {}", decision.content_field),
            )?;
        }
        check_unit_interval(self.similarity_score_vs_skeleton, "similarityScoreVsSkeleton")
    }

    /// Check if any content could not be placed.
    pub fn has_unmapped(&self) -> bool {
        !self.unmapped_content.is_empty()
    }

    /// Number of overflow warnings recorded.
    pub fn overflow_count(&self) -> usize {
        self.constraint_actions
            .iter()
            .filter(|a| a.action == ConstraintKind::OverflowWarning)
            .count()
    }
}
