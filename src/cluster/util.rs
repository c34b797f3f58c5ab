use std::f64::consts::PI;

use super::traits::MapEvent;
use crate::event::{validate, Coordinate};

/// Distance between two coordinates in the engine's threshold unit.
///
/// This is the haversine central angle `c` (radians) mapped through
/// `c * (180 / π) / π`, i.e. degrees divided by π once more. It is *not* a
/// great-circle distance in degrees or kilometres. Every threshold constant in
/// [`ClusterParams`](super::ClusterParams) is tuned against this exact value;
/// changing the formula means re-tuning all of them.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push `h` a hair above 1 for antipodal points.
    let h = h.min(1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    c * (180.0 / PI) / PI
}

/// An event that passed coordinate validation.
#[derive(Debug)]
pub struct Located<'a, E> {
    /// Position of the event in the caller's input slice.
    pub index: usize,
    /// The event itself.
    pub event: &'a E,
    /// The event's validated coordinate.
    pub coordinate: Coordinate,
}

// Manual impls: `E` itself need not be `Clone`.
impl<E> Clone for Located<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Located<'_, E> {}

/// Keep the events that have a valid coordinate, in input order.
pub fn locate<E: MapEvent>(events: &[E]) -> Vec<Located<'_, E>> {
    events
        .iter()
        .enumerate()
        .filter_map(|(index, event)| {
            validate(event.coordinate()).map(|coordinate| Located {
                index,
                event,
                coordinate,
            })
        })
        .collect()
}
