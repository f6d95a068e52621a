//! Skeleton selection among exemplars.

use crate::signature::{signature_similarity, BlockSignature};

/// Mean `1 - similarity` over index-aligned signatures.
///
/// The shorter sequence is padded by repeating its last element. Two empty
/// sequences are identical; an empty sequence is maximally far from any
/// non-empty one.
pub fn document_distance(a: &[BlockSignature], b: &[BlockSignature]) -> f64 {
    let (last_a, last_b) = match (a.last(), b.last()) {
        (None, None) => return 0.0,
        (Some(x), Some(y)) => (x, y),
        _ => return 1.0,
    };

    let len = a.len().max(b.len());
    let total: f64 = (0..len)
        .map(|i| {
            let x = a.get(i).unwrap_or(last_a);
            let y = b.get(i).unwrap_or(last_b);
            1.0 - signature_similarity(x, y)
        })
        .sum();

    total / len as f64
}

/// Index of the exemplar with the lowest summed distance to all others.
///
/// Ties resolve to the earliest exemplar; a single exemplar is its own medoid.
pub fn choose_medoid(documents: &[Vec<BlockSignature>]) -> usize {
    if documents.len() <= 1 {
        return 0;
    }

    let mut best = 0;
    let mut best_score = f64::INFINITY;
    for (i, doc) in documents.iter().enumerate() {
        let score: f64 = documents
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, other)| document_distance(doc, other))
            .sum();
        if score < best_score {
            best_score = score;
            best = i;
        }
    }

    log::debug!("Selected exemplar {} as skeleton (distance {:.4})", best, best_score);
    best
}
