//! Popularity-seeded greedy clustering.
//!
//! Events are visited by descending popularity. Each event not yet assigned
//! seeds a new cluster and immediately claims every unassigned event within
//! the threshold of the seed. The scan covers all located events, including
//! ones that sort before the seed.
//!
//! Only seed-to-candidate distances are checked, so two clusters grown from
//! nearby seeds can end up with close centroids; see [`merge_clusters`].
//!
//! ## Complexity
//!
//! O(n²) distance evaluations. Intended for the few hundred events visible in
//! one viewport.
//!
//! [`merge_clusters`]: super::merge_clusters

use std::cmp::Reverse;

use super::entity::{Cluster, Member};
use super::traits::MapEvent;
use super::util::{distance, Located};

/// Partition located events into clusters.
///
/// Every event ends up in exactly one cluster. Ties in popularity keep input
/// order, so the result is deterministic.
pub fn build_clusters<'a, E: MapEvent>(
    located: &[Located<'a, E>],
    threshold: f64,
) -> Vec<Cluster<'a, E>> {
    let n = located.len();

    // `sort_by_key` is stable: equal popularity keeps input order.
    let mut seeds: Vec<usize> = (0..n).collect();
    seeds.sort_by_key(|&i| Reverse(located[i].event.popularity()));

    let member = |i: usize| Member {
        index: located[i].index,
        event: located[i].event,
    };

    let mut clustered = vec![false; n];
    let mut clusters = Vec::new();

    for seed in seeds {
        if clustered[seed] {
            continue;
        }
        clustered[seed] = true;

        let origin = located[seed].coordinate;
        let mut members = vec![member(seed)];

        for candidate in 0..n {
            if clustered[candidate] {
                continue;
            }
            if distance(origin, located[candidate].coordinate) <= threshold {
                clustered[candidate] = true;
                members.push(member(candidate));
            }
        }

        clusters.push(Cluster::from_members(members));
    }

    clusters
}
