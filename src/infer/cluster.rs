//! Greedy single-pass clustering of block signatures.

use crate::signature::{signature_similarity, BlockSignature};

/// Minimum similarity for joining an existing cluster.
pub const DEFAULT_CLUSTER_THRESHOLD: f64 = 0.72;

/// A group of structurally similar blocks.
///
/// The first member is the representative and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Creation order of the cluster
    pub label: usize,

    /// Members in input order
    pub members: Vec<BlockSignature>,
}

impl Cluster {
    /// First-seen member.
    pub fn representative(&self) -> &BlockSignature {
        &self.members[0]
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the cluster has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Cluster signatures in input order.
///
/// Each signature joins the cluster whose representative scores highest
/// (earliest cluster on ties) when that score reaches `threshold`, and
/// starts a new cluster otherwise. Clusters are returned in creation order.
pub fn cluster_blocks(signatures: &[BlockSignature], threshold: f64) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = Vec::new();

    for sig in signatures {
        let mut best: Option<(usize, f64)> = None;
        for (idx, cluster) in clusters.iter().enumerate() {
            let score = signature_similarity(sig, cluster.representative());
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((idx, score));
            }
        }

        match best {
            Some((idx, score)) if score >= threshold => clusters[idx].members.push(sig.clone()),
            _ => clusters.push(Cluster {
                label: clusters.len(),
                members: vec![sig.clone()],
            }),
        }
    }

    log::debug!(
        "Clustered {} signatures into {} clusters",
        signatures.len(),
        clusters.len()
    );

    clusters
}
