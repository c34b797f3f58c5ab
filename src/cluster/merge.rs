//! Merging of clusters whose centers ended up too close together.

use tracing::trace;

use super::entity::Cluster;
use super::traits::MapEvent;
use super::util::distance;

/// One merge sweep.
///
/// Clusters are visited in order. Each cluster not yet absorbed takes in every
/// later unabsorbed cluster whose centroid lies within `merge_threshold` of its
/// own (pre-merge) centroid. Returns new clusters; unmerged ones are copied
/// through unchanged and in order.
pub fn merge_pass<'a, E: MapEvent>(
    clusters: &[Cluster<'a, E>],
    merge_threshold: f64,
) -> Vec<Cluster<'a, E>> {
    let k = clusters.len();
    let centroids: Vec<_> = clusters.iter().map(Cluster::centroid).collect();

    let mut processed = vec![false; k];
    let mut out = Vec::with_capacity(k);

    for i in 0..k {
        if processed[i] {
            continue;
        }
        processed[i] = true;

        let mut absorbed = Vec::new();
        for j in 0..k {
            if processed[j] {
                continue;
            }
            if distance(centroids[i], centroids[j]) <= merge_threshold {
                processed[j] = true;
                absorbed.push(j);
            }
        }

        if absorbed.is_empty() {
            out.push(clusters[i].clone());
            continue;
        }

        let mut members = clusters[i].members().to_vec();
        for j in absorbed {
            members.extend_from_slice(clusters[j].members());
        }
        out.push(Cluster::from_members(members));
    }

    out
}

/// Merge until no two cluster centers are within `merge_threshold`.
///
/// Repeats [`merge_pass`] until a sweep absorbs nothing, so merging the result
/// again returns an equal list.
pub fn merge_clusters<'a, E: MapEvent>(
    clusters: &[Cluster<'a, E>],
    merge_threshold: f64,
) -> Vec<Cluster<'a, E>> {
    let mut before = clusters.len();
    let mut current = merge_pass(clusters, merge_threshold);
    let mut sweeps = 1;

    while current.len() < before {
        trace!(before, after = current.len(), sweeps, "merge sweep absorbed clusters");
        before = current.len();
        current = merge_pass(&current, merge_threshold);
        sweeps += 1;
    }

    current
}
