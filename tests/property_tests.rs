use std::collections::HashSet;

use mapclump::{
    cluster_events, merge_clusters, Category, ClusterParams, Coordinate, Event, Viewport,
};
use proptest::prelude::*;

fn coordinate() -> impl Strategy<Value = Option<Coordinate>> {
    prop_oneof![
        8 => (16.30f64..16.45, 48.15f64..48.25)
            .prop_map(|(lng, lat)| Some(Coordinate::new(lng, lat))),
        1 => Just(None),
        1 => Just(Some(Coordinate::new(0.0, 0.0))),
        1 => Just(Some(Coordinate::new(f64::NAN, 48.2))),
        1 => Just(Some(Coordinate::new(16.4, f64::INFINITY))),
    ]
}

fn events() -> impl Strategy<Value = Vec<Event>> {
    prop::collection::vec((coordinate(), 0u32..50), 0..80).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (coordinate, popularity))| Event {
                id: Some(i as u64),
                coordinate,
                popularity,
                category: Category::Other,
            })
            .collect()
    })
}

fn viewport() -> impl Strategy<Value = Viewport> {
    (200u32..4000, 200u32..4000).prop_map(|(w, h)| Viewport::new(w, h).unwrap())
}

fn valid_ids(events: &[Event]) -> HashSet<u64> {
    events
        .iter()
        .filter(|e| e.coordinate.is_some_and(|c| c.is_valid()))
        .filter_map(|e| e.id)
        .collect()
}

proptest! {
    #[test]
    fn prop_clusters_partition_valid_events(
        events in events(),
        zoom in 0.0f64..21.0,
        vp in viewport(),
    ) {
        let clusters = cluster_events(&events, zoom, Some(vp)).unwrap();

        let members: Vec<u64> = clusters.iter().flat_map(|c| c.ids().copied()).collect();
        let unique: HashSet<u64> = members.iter().copied().collect();

        prop_assert_eq!(members.len(), unique.len(), "an event appears twice");
        prop_assert_eq!(unique, valid_ids(&events));
        prop_assert!(clusters.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn prop_single_member_centroid_is_own_coordinate(
        events in events(),
        zoom in 0.0f64..21.0,
    ) {
        let clusters = cluster_events(&events, zoom, None).unwrap();
        for c in clusters.iter().filter(|c| c.is_standalone()) {
            let own = c.first().coordinate.unwrap();
            prop_assert!(c.centroid().approx_eq(&own, 1e-12));
        }
    }

    #[test]
    fn prop_threshold_decreases_with_zoom(count in 0usize..400, vp in viewport()) {
        let p = ClusterParams::default();
        prop_assert!(p.threshold(18.0, count, vp) < p.threshold(8.0, count, vp));
        prop_assert!(p.threshold(8.0, count, vp) < p.threshold(1.0, count, vp));
    }

    #[test]
    fn prop_merge_reaches_fixed_point(
        events in events(),
        zoom in 0.0f64..21.0,
        vp in viewport(),
    ) {
        let clusters = cluster_events(&events, zoom, Some(vp)).unwrap();

        let p = ClusterParams::default();
        let valid = valid_ids(&events).len();
        let merge_threshold = p.merge_threshold(p.threshold(zoom, valid, vp));

        let again = merge_clusters(&clusters, merge_threshold);
        prop_assert_eq!(again, clusters);
    }

    #[test]
    fn prop_clustering_is_deterministic(
        events in events(),
        zoom in 0.0f64..21.0,
    ) {
        let a = cluster_events(&events, zoom, None).unwrap();
        let b = cluster_events(&events, zoom, None).unwrap();

        prop_assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            prop_assert_eq!(x.indices().collect::<Vec<_>>(), y.indices().collect::<Vec<_>>());
            prop_assert_eq!(x.centroid(), y.centroid());
        }
    }
}
