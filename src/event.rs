//! Event and coordinate types.
//!
//! The clustering core only reads an event through the [`MapEvent`] trait, so
//! callers can cluster their own types. [`Event`] is a ready-made owned event
//! for callers that don't have one.
//!
//! [`MapEvent`]: crate::cluster::MapEvent

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cluster::{Categorized, MapEvent};

/// Fallback location used when a cluster has no member with a valid coordinate.
///
/// Central Vienna (Stephansplatz). Clusters built by the engine never need it
/// because invalid events are dropped before clustering.
pub const DEFAULT_LOCATION: Coordinate = Coordinate {
    longitude: 16.3738,
    latitude: 48.2082,
};

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
}

impl Coordinate {
    /// Create a coordinate from longitude and latitude (in that order).
    #[inline]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Whether this coordinate denotes a real location.
    ///
    /// Both components must be finite and neither may be exactly `0.0`: a zero
    /// component is how an unset location is stored upstream, so `(0, 0)` and
    /// any point on the equator or prime meridian are rejected.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && self.longitude != 0.0
            && self.latitude != 0.0
    }

    /// Componentwise comparison with an absolute tolerance in degrees.
    #[inline]
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.longitude - other.longitude).abs() <= tolerance
            && (self.latitude - other.latitude).abs() <= tolerance
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((longitude, latitude): (f64, f64)) -> Self {
        Self::new(longitude, latitude)
    }
}

/// Return the coordinate only if it is present and valid.
#[inline]
pub fn validate(coordinate: Option<Coordinate>) -> Option<Coordinate> {
    coordinate.filter(Coordinate::is_valid)
}

/// Kind of event, used to pick marker icons and colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Category {
    /// Parties and nightlife.
    Party,
    /// Concerts and other live music.
    Music,
    /// Games, matches and workouts.
    Sports,
    /// Exhibitions, theatre and museums.
    Culture,
    /// Meals, markets and tastings.
    Food,
    /// Lectures, workshops and study groups.
    Education,
    /// Meetups and professional gatherings.
    Networking,
    /// Anything else.
    #[default]
    Other,
}

/// An owned, geolocated event.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event {
    /// Identifier; `None` for events that haven't been persisted yet.
    pub id: Option<u64>,
    /// Location, if known.
    pub coordinate: Option<Coordinate>,
    /// Popularity score (e.g. attendee count).
    pub popularity: u32,
    /// Event kind.
    #[cfg_attr(feature = "serde", serde(default))]
    pub category: Category,
}

impl Event {
    /// Create a persisted event at `(longitude, latitude)`.
    pub fn new(id: u64, longitude: f64, latitude: f64, popularity: u32) -> Self {
        Self {
            id: Some(id),
            coordinate: Some(Coordinate::new(longitude, latitude)),
            popularity,
            category: Category::Other,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }
}

impl MapEvent for Event {
    type Id = u64;

    fn id(&self) -> Option<&u64> {
        self.id.as_ref()
    }

    fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    fn popularity(&self) -> u32 {
        self.popularity
    }
}

impl Categorized for Event {
    type Category = Category;

    fn category(&self) -> Category {
        self.category
    }
}
