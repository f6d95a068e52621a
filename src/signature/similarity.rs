//! Weighted similarity between two block signatures.

use super::BlockSignature;

pub const STYLE_WEIGHT: f64 = 0.25;
pub const SHADING_WEIGHT: f64 = 0.15;
pub const PARAGRAPH_WEIGHT: f64 = 0.20;
pub const TABLE_WEIGHT: f64 = 0.15;
pub const POSITION_WEIGHT: f64 = 0.15;
pub const PART_WEIGHT: f64 = 0.10;

/// Score two signatures in [0, 1], rounded to four decimals.
///
/// Symmetric, but not a metric; only used for ranking.
pub fn signature_similarity(a: &BlockSignature, b: &BlockSignature) -> f64 {
    let shared = a
        .dominant_styles
        .iter()
        .filter(|s| b.dominant_styles.contains(s))
        .count();
    let style = shared as f64
        / a.dominant_styles
            .len()
            .max(b.dominant_styles.len())
            .max(1) as f64;

    let shading = if a.has_shading == b.has_shading { 1.0 } else { 0.0 };

    let count_gap = a.paragraph_count.abs_diff(b.paragraph_count) as f64;
    let count_span = a.paragraph_count.max(b.paragraph_count).max(1) as f64;
    let paragraphs = 1.0 - (count_gap / count_span).min(1.0);

    let table = match (&a.table_shape, &b.table_shape) {
        (Some(x), Some(y)) if x == y => 1.0,
        (None, None) => 1.0,
        _ => 0.0,
    };

    let position = 1.0 - (a.position_percentile - b.position_percentile).abs().min(1.0);

    let part = if a.part == b.part { 1.0 } else { 0.0 };

    let score = style * STYLE_WEIGHT
        + shading * SHADING_WEIGHT
        + paragraphs * PARAGRAPH_WEIGHT
        + table * TABLE_WEIGHT
        + position * POSITION_WEIGHT
        + part * PART_WEIGHT;

    round_to(score, 4)
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
