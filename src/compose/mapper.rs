//! Content-to-skeleton slot mapping.

use crate::model::{ContentModel, ParsedDocument};
use crate::package::ReplacementTable;
use crate::schema::{
    ConstraintAction, ConstraintKind, MappingDecision, Region, RegionType, StyleFamilyModel,
};

/// Region id used for the title when the model has no TITLE region.
pub const FALLBACK_TITLE_REGION: &str = "region-title";

/// Region id used for sections when the model has no BODY region.
pub const FALLBACK_BODY_REGION: &str = "region-body";

pub const TITLE_CONFIDENCE: f64 = 0.85;
pub const SECTION_CONFIDENCE: f64 = 0.76;

/// Text longer than this multiple of `maxCharsP90` raises an overflow warning.
pub const OVERFLOW_FACTOR: f64 = 1.4;

/// Outcome of mapping content onto a skeleton.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    /// Body paragraph index → replacement text
    pub replacements: ReplacementTable,
    pub decisions: Vec<MappingDecision>,
    pub constraint_actions: Vec<ConstraintAction>,
    /// Section headings that found no heading slot
    pub unmapped: Vec<String>,
    /// Placement problems that are not whole unmapped sections
    pub warnings: Vec<String>,
}

/// Place the content's title and sections into skeleton paragraph slots.
///
/// Sections are placed in order: each takes the next heading-styled slot at
/// or after the cursor for its heading and the slot right after it for its
/// joined body. Nothing is truncated; overlong text produces constraint
/// actions instead.
pub fn map_content(
    model: &StyleFamilyModel,
    skeleton: &ParsedDocument,
    content: &ContentModel,
) -> Mapping {
    let mut mapping = Mapping::default();

    let title_index = skeleton.find_styled("title", 0);
    if let (Some(idx), Some(title)) = (title_index, content.title.as_ref()) {
        mapping.replacements.insert(idx, title.clone());
        mapping.decisions.push(MappingDecision {
            content_field: "title".to_string(),
            region_id: region_id_or(model, RegionType::Title, FALLBACK_TITLE_REGION),
            confidence: TITLE_CONFIDENCE,
            explanation: "Title-like style near start.".to_string(),
        });
    }

    let mut cursor = title_index.map_or(1, |idx| idx + 1);
    for section in &content.sections {
        let Some(heading_idx) = skeleton.find_styled("heading", cursor) else {
            log::warn!("No heading slot left for section {:?}", section.heading);
            mapping.unmapped.push(section.heading.clone());
            continue;
        };

        mapping.replacements.insert(heading_idx, section.heading.clone());
        let body_idx = heading_idx + 1;
        if body_idx < skeleton.paragraph_count() {
            mapping.replacements.insert(body_idx, section.joined_body());
        } else if !section.body.is_empty() {
            log::warn!(
                "No body slot after heading slot {} for {:?}",
                heading_idx,
                section.heading
            );
            mapping.warnings.push(format!(
                "Body of section \"{}\" had no paragraph slot after its heading.",
                section.heading
            ));
        }
        mapping.decisions.push(MappingDecision {
            content_field: format!("section:{}", section.heading),
            region_id: region_id_or(model, RegionType::Body, FALLBACK_BODY_REGION),
            confidence: SECTION_CONFIDENCE,
            explanation: "Sequential heading/body mapping.".to_string(),
        });

        cursor = heading_idx + 2;
        log::debug!("Mapped section {:?} at slot {}", section.heading, heading_idx);
    }

    if let Some(region) = constraint_region(model) {
        mapping.constraint_actions = check_constraints(region, &mapping.replacements);
    }

    mapping
}

/// Constraint actions for every replacement text, checked against `region`.
pub fn check_constraints(region: &Region, replacements: &ReplacementTable) -> Vec<ConstraintAction> {
    let limit = region.constraints.max_chars_p90;
    let mut actions = Vec::new();

    for text in replacements.values() {
        let len = text.chars().count();
        if len > limit {
            actions.push(ConstraintAction {
                region_id: region.id.clone(),
                action: ConstraintKind::FontShrink,
                detail: format!(
                    "Requested shrink toward min {}.",
                    region.constraints.min_font_size_half_points
                ),
            });
        }
        if len as f64 > limit as f64 * OVERFLOW_FACTOR {
            log::warn!("Text of {} chars overflows {} (limit {})", len, region.id, limit);
            actions.push(ConstraintAction {
                region_id: region.id.clone(),
                action: ConstraintKind::OverflowWarning,
                detail: "No continuation region inferred; kept full text.".to_string(),
            });
        }
    }

    actions
}

/// BODY region, or the first region when none is typed BODY.
fn constraint_region(model: &StyleFamilyModel) -> Option<&Region> {
    model
        .region_of_type(RegionType::Body)
        .or_else(|| model.regions.first())
}

fn region_id_or(model: &StyleFamilyModel, region_type: RegionType, fallback: &str) -> String {
    model
        .region_of_type(region_type)
        .map(|r| r.id.clone())
        .unwrap_or_else(|| fallback.to_string())
}
