//! Per-cluster records for the marker renderer.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cluster::{Categorized, Cluster, MapEvent};
use crate::event::Coordinate;

/// What the renderer needs to draw one cluster.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusterSummary<C> {
    /// Number of events in the cluster.
    pub count: usize,
    /// Most common member category (the event's own for standalone clusters).
    pub category: C,
    /// Marker position: the centroid, or the event's own coordinate when standalone.
    pub position: Coordinate,
    /// Whether the cluster holds a single event.
    pub standalone: bool,
}

/// Plurality category over `events`.
///
/// Ties go to the tied category seen first in iteration order. `None` for no
/// events.
pub fn dominant_category<'a, E>(events: impl IntoIterator<Item = &'a E>) -> Option<E::Category>
where
    E: Categorized + 'a,
{
    // category -> (count, first position)
    let mut tally: HashMap<E::Category, (usize, usize)> = HashMap::new();
    for (pos, event) in events.into_iter().enumerate() {
        tally.entry(event.category()).or_insert((0, pos)).0 += 1;
    }

    tally
        .into_iter()
        .max_by(|(_, (n_a, first_a)), (_, (n_b, first_b))| {
            n_a.cmp(n_b).then(first_b.cmp(first_a))
        })
        .map(|(category, _)| category)
}

/// Summarize one cluster.
pub fn summarize_cluster<E>(cluster: &Cluster<'_, E>) -> ClusterSummary<E::Category>
where
    E: MapEvent + Categorized,
{
    let category =
        dominant_category(cluster.events()).unwrap_or_else(|| cluster.first().category());

    ClusterSummary {
        count: cluster.len(),
        category,
        position: cluster.centroid(),
        standalone: cluster.is_standalone(),
    }
}

/// Summarize clusters, keeping their order.
pub fn summarize<E>(clusters: &[Cluster<'_, E>]) -> Vec<ClusterSummary<E::Category>>
where
    E: MapEvent + Categorized,
{
    clusters.iter().map(summarize_cluster).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Category, Event};

    fn ev(id: u64, category: Category) -> Event {
        Event::new(id, 16.37 + id as f64 * 1e-5, 48.21, 1).with_category(category)
    }

    #[test]
    fn test_plurality_wins() {
        let events = [
            ev(1, Category::Music),
            ev(2, Category::Food),
            ev(3, Category::Food),
        ];
        assert_eq!(dominant_category(&events), Some(Category::Food));
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let events = [
            ev(1, Category::Sports),
            ev(2, Category::Party),
            ev(3, Category::Party),
            ev(4, Category::Sports),
        ];
        assert_eq!(dominant_category(&events), Some(Category::Sports));

        let events = [
            ev(1, Category::Culture),
            ev(2, Category::Party),
            ev(3, Category::Sports),
            ev(4, Category::Sports),
            ev(5, Category::Party),
        ];
        assert_eq!(dominant_category(&events), Some(Category::Party));
    }

    #[test]
    fn test_empty_has_no_category() {
        let events: [Event; 0] = [];
        assert_eq!(dominant_category(&events), None);
    }

    #[test]
    fn test_summaries() {
        let events = [
            ev(1, Category::Music),
            ev(2, Category::Food),
            ev(3, Category::Food),
            Event::new(4, 16.50, 48.30, 1).with_category(Category::Education),
        ];
        let clusters = vec![
            Cluster::new(&events, 0..3).unwrap(),
            Cluster::new(&events, [3]).unwrap(),
        ];
        let summaries = summarize(&clusters);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].count, 3);
        assert_eq!(summaries[0].category, Category::Food);
        assert!(!summaries[0].standalone);

        assert_eq!(summaries[1].count, 1);
        assert_eq!(summaries[1].category, Category::Education);
        assert_eq!(summaries[1].position, Coordinate::new(16.50, 48.30));
        assert!(summaries[1].standalone);
    }
}
