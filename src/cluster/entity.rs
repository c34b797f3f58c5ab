use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use super::traits::MapEvent;
use crate::error::{Error, Result};
use crate::event::{validate, Coordinate, DEFAULT_LOCATION};

/// Centroids closer than this (in degrees, per axis) compare equal.
pub const CENTROID_TOLERANCE: f64 = 1e-4;

pub(crate) struct Member<'a, E> {
    pub(crate) index: usize,
    pub(crate) event: &'a E,
}

impl<E> Clone for Member<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Member<'_, E> {}

/// A group of events shown as one marker.
///
/// Members borrow from the caller's event slice and are kept in input order.
/// The centroid is computed on first access and cached.
pub struct Cluster<'a, E> {
    members: Vec<Member<'a, E>>,
    centroid: OnceLock<Coordinate>,
}

impl<'a, E: MapEvent> Cluster<'a, E> {
    /// Build a cluster from the events at `positions` in `source`.
    ///
    /// Repeated positions are kept once. Clusters that may later be merged
    /// must be built over the same `source` slice.
    pub fn new(source: &'a [E], positions: impl IntoIterator<Item = usize>) -> Result<Self> {
        let mut members = Vec::new();
        for index in positions {
            let event = source.get(index).ok_or(Error::PositionOutOfRange {
                position: index,
                len: source.len(),
            })?;
            members.push(Member { index, event });
        }
        if members.is_empty() {
            return Err(Error::EmptyCluster);
        }
        Ok(Self::from_members(members))
    }

    /// Build a cluster holding every event in `source`.
    pub fn from_slice(source: &'a [E]) -> Result<Self> {
        Self::new(source, 0..source.len())
    }

    /// Members must be non-empty and drawn from one source slice.
    pub(crate) fn from_members(mut members: Vec<Member<'a, E>>) -> Self {
        debug_assert!(!members.is_empty());
        members.sort_by_key(|m| m.index);
        members.dedup_by_key(|m| m.index);
        Self {
            members,
            centroid: OnceLock::new(),
        }
    }

    pub(crate) fn members(&self) -> &[Member<'a, E>] {
        &self.members
    }

    /// Number of events in the cluster.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false` for clusters built by this crate.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// A cluster with exactly one event, rendered as a plain event marker.
    pub fn is_standalone(&self) -> bool {
        self.members.len() == 1
    }

    /// The member that comes first in input order.
    pub fn first(&self) -> &'a E {
        self.members[0].event
    }

    /// Member events in input order.
    pub fn events(&self) -> impl Iterator<Item = &'a E> + '_ {
        self.members.iter().map(|m| m.event)
    }

    /// Positions of the members in the source slice, ascending and unique.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.members.iter().map(|m| m.index)
    }

    /// Identifiers of the members that have one.
    pub fn ids(&self) -> impl Iterator<Item = &'a E::Id> + '_ {
        self.members.iter().filter_map(|m| m.event.id())
    }

    /// Whether an event with this identifier is a member.
    pub fn contains_id(&self, id: &E::Id) -> bool {
        self.ids().any(|member| member == id)
    }

    /// Representative position of the cluster.
    ///
    /// A single member's own coordinate, otherwise the mean of the members'
    /// valid coordinates. Falls back to [`DEFAULT_LOCATION`] when no member
    /// has a valid coordinate.
    pub fn centroid(&self) -> Coordinate {
        *self.centroid.get_or_init(|| self.compute_centroid())
    }

    fn compute_centroid(&self) -> Coordinate {
        if let [only] = self.members.as_slice() {
            return validate(only.event.coordinate()).unwrap_or(DEFAULT_LOCATION);
        }

        let (mut lng, mut lat, mut n) = (0.0, 0.0, 0usize);
        for c in self.members.iter().filter_map(|m| validate(m.event.coordinate())) {
            lng += c.longitude;
            lat += c.latitude;
            n += 1;
        }

        if n == 0 {
            return DEFAULT_LOCATION;
        }
        Coordinate::new(lng / n as f64, lat / n as f64)
    }
}

impl<E: MapEvent> PartialEq for Cluster<'_, E> {
    /// Same member identifiers, and centroids within [`CENTROID_TOLERANCE`].
    fn eq(&self, other: &Self) -> bool {
        let ours: HashSet<Option<&E::Id>> = self.members.iter().map(|m| m.event.id()).collect();
        let theirs: HashSet<Option<&E::Id>> =
            other.members.iter().map(|m| m.event.id()).collect();

        ours == theirs
            && self
                .centroid()
                .approx_eq(&other.centroid(), CENTROID_TOLERANCE)
    }
}

impl<E> Clone for Cluster<'_, E> {
    fn clone(&self) -> Self {
        Self {
            members: self.members.clone(),
            centroid: self.centroid.clone(),
        }
    }
}

impl<E: fmt::Debug> fmt::Debug for Cluster<'_, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cluster")
            .field("members", &self.members.iter().map(|m| m.event).collect::<Vec<_>>())
            .field("centroid", &self.centroid.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;

    #[test]
    fn test_single_member_centroid_is_exact() {
        let events = [Event::new(1, 16.370123456, 48.208987654, 3)];
        let c = Cluster::from_slice(&events).unwrap();
        assert_eq!(c.centroid(), Coordinate::new(16.370123456, 48.208987654));
        assert!(c.is_standalone());
    }

    #[test]
    fn test_centroid_is_mean_of_valid_members() {
        let events = [
            Event::new(1, 16.0, 48.0, 1),
            Event::new(2, 17.0, 49.0, 1),
            Event::new(3, 0.0, 0.0, 1),
        ];
        let c = Cluster::from_slice(&events).unwrap();
        let centroid = c.centroid();
        assert!((centroid.longitude - 16.5).abs() < 1e-12);
        assert!((centroid.latitude - 48.5).abs() < 1e-12);
    }

    #[test]
    fn test_centroid_falls_back_to_default_location() {
        let lone = [Event {
            id: Some(1),
            coordinate: None,
            popularity: 0,
            category: Default::default(),
        }];
        assert_eq!(Cluster::from_slice(&lone).unwrap().centroid(), DEFAULT_LOCATION);

        let both = [Event::new(1, 0.0, 0.0, 0), Event::new(2, f64::NAN, 48.0, 0)];
        assert_eq!(Cluster::from_slice(&both).unwrap().centroid(), DEFAULT_LOCATION);
    }

    #[test]
    fn test_empty_cluster_is_rejected() {
        let none: [Event; 0] = [];
        assert!(matches!(Cluster::from_slice(&none), Err(Error::EmptyCluster)));

        let events = [Event::new(1, 16.0, 48.0, 1)];
        assert!(matches!(
            Cluster::new(&events, std::iter::empty()),
            Err(Error::EmptyCluster)
        ));
    }

    #[test]
    fn test_out_of_range_position_is_rejected() {
        let events = [Event::new(1, 16.0, 48.0, 1)];
        assert!(matches!(
            Cluster::new(&events, [0, 3]),
            Err(Error::PositionOutOfRange { position: 3, len: 1 })
        ));
    }

    #[test]
    fn test_repeated_positions_are_kept_once() {
        let events = [Event::new(1, 16.0, 48.0, 1), Event::new(2, 16.1, 48.1, 1)];
        let c = Cluster::new(&events, [1, 0, 1, 1]).unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.ids().copied().collect::<Vec<_>>(), vec![1, 2]);

        let single = Cluster::new(&events, [0, 0]).unwrap();
        assert!(single.is_standalone());
        assert_eq!(single.centroid(), Coordinate::new(16.0, 48.0));
    }

    #[test]
    fn test_indices_are_source_positions() {
        let events = [
            Event::new(1, 16.0, 48.0, 1),
            Event::new(2, 16.1, 48.1, 1),
            Event::new(3, 16.2, 48.2, 1),
        ];
        let c = Cluster::new(&events, [2, 0]).unwrap();
        assert_eq!(c.indices().collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(c.first().id, Some(1));

        let tail = Cluster::new(&events, [2]).unwrap();
        assert_eq!(tail.indices().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_equality_ignores_order_and_small_centroid_noise() {
        let events = [
            Event::new(1, 16.0, 48.0, 1),
            Event::new(2, 16.2, 48.2, 1),
            Event::new(2, 16.20005, 48.20005, 1),
            Event::new(2, 16.3, 48.3, 1),
        ];

        let x = Cluster::new(&events, [0, 1]).unwrap();
        let y = Cluster::new(&events, [2, 0]).unwrap();
        assert_eq!(x, y);

        let z = Cluster::new(&events, [0, 3]).unwrap();
        assert_ne!(x, z);

        let w = Cluster::new(&events, [0]).unwrap();
        assert_ne!(x, w);
    }

    #[test]
    fn test_lookup_by_id() {
        let events = [Event::new(10, 16.0, 48.0, 1), Event::new(20, 16.1, 48.1, 1)];
        let c = Cluster::from_slice(&events).unwrap();
        assert!(c.contains_id(&10));
        assert!(c.contains_id(&20));
        assert!(!c.contains_id(&30));
        assert_eq!(c.ids().copied().collect::<Vec<_>>(), vec![10, 20]);
        assert_eq!(c.first().id, Some(10));
    }
}
