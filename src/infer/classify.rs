//! Region classification and constraint derivation.

use crate::schema::{Region, RegionConstraints, RegionType, SignatureSummary};
use crate::signature::BlockSignature;

use super::cluster::Cluster;

/// Characters budgeted per paragraph when deriving `maxCharsP90`.
pub const CHARS_PER_PARAGRAPH: usize = 120;

/// Minimum font size for title regions, in half points.
pub const TITLE_MIN_FONT: u32 = 20;

/// Minimum font size for every other region, in half points.
pub const BODY_MIN_FONT: u32 = 16;

/// One step of the classification chain.
pub struct RegionRule {
    pub name: &'static str,
    pub matches: fn(&BlockSignature) -> bool,
    pub region: RegionType,
}

/// Classification rules, evaluated top to bottom; the first match wins.
pub const RULES: &[RegionRule] = &[
    RegionRule {
        name: "header part",
        matches: |s| s.part.starts_with("header"),
        region: RegionType::Header,
    },
    RegionRule {
        name: "footer part",
        matches: |s| s.part.starts_with("footer"),
        region: RegionType::Footer,
    },
    RegionRule {
        name: "shaded table",
        matches: |s| s.is_table() && s.has_shading,
        region: RegionType::Abstract,
    },
    RegionRule {
        name: "title style near start",
        matches: |s| s.position_percentile < 0.12 && s.has_style_like("title"),
        region: RegionType::Title,
    },
    RegionRule {
        name: "shaded heading",
        matches: |s| s.has_style_like("heading") && s.has_shading,
        region: RegionType::SectionHeader,
    },
    RegionRule {
        name: "reference style near end",
        matches: |s| s.position_percentile > 0.82 && s.has_style_like("reference"),
        region: RegionType::References,
    },
    RegionRule {
        name: "table",
        matches: |s| s.is_table(),
        region: RegionType::TableContainer,
    },
];

/// Semantic type of a cluster representative.
pub fn classify(signature: &BlockSignature) -> RegionType {
    RULES
        .iter()
        .find(|rule| (rule.matches)(signature))
        .map(|rule| rule.region)
        .unwrap_or(RegionType::Body)
}

/// 90th percentile: the sorted value at `floor(0.9 n)`, clamped to the
/// last index; 0 for no values.
pub fn p90(values: &[usize]) -> usize {
    if values.is_empty() {
        return 0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let idx = ((sorted.len() as f64 * 0.9).floor() as usize).min(sorted.len() - 1);
    sorted[idx]
}

/// Turn a cluster into a region of the style family model.
pub fn build_region(cluster: &Cluster, exemplar_count: usize) -> Region {
    let rep = cluster.representative();
    let region_type = classify(rep);

    let counts: Vec<usize> = cluster.members.iter().map(|s| s.paragraph_count).collect();
    let chars: Vec<usize> = counts.iter().map(|c| c * CHARS_PER_PARAGRAPH).collect();

    let confidence = (cluster.len() as f64 / exemplar_count.max(1) as f64).min(1.0);

    Region {
        id: format!("region-{}", cluster.label),
        region_type,
        source_part: rep.part.clone(),
        confidence: (confidence * 100.0).round() / 100.0,
        signature_summary: summarize(cluster),
        constraints: RegionConstraints {
            max_chars_p90: p90(&chars),
            max_paragraphs_p90: p90(&counts),
            min_font_size_half_points: if region_type == RegionType::Title {
                TITLE_MIN_FONT
            } else {
                BODY_MIN_FONT
            },
        },
    }
}

fn summarize(cluster: &Cluster) -> SignatureSummary {
    let mut styles: Vec<String> = Vec::new();
    for style in cluster.members.iter().flat_map(|s| &s.dominant_styles) {
        if !styles.contains(style) {
            styles.push(style.clone());
        }
    }

    let total: usize = cluster.members.iter().map(|s| s.paragraph_count).sum();
    let mean = total as f64 / cluster.len().max(1) as f64;

    SignatureSummary {
        dominant_styles: styles,
        has_shading: cluster.members.iter().any(|s| s.has_shading),
        paragraph_count: mean.round() as usize,
        table_shape: cluster.representative().table_shape.clone(),
    }
}
