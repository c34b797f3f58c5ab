use std::hash::Hash;

use crate::event::Coordinate;

/// What the clustering engine needs to know about an event.
pub trait MapEvent {
    /// Opaque, comparable identifier.
    type Id: Eq + Hash;

    /// The event's identifier, or `None` if it hasn't been assigned one yet.
    fn id(&self) -> Option<&Self::Id>;

    /// The event's location, if any. Validity is checked by the engine.
    fn coordinate(&self) -> Option<Coordinate>;

    /// Popularity score; more popular events seed clusters first.
    fn popularity(&self) -> u32;
}

/// Events that carry a category for marker rendering.
pub trait Categorized {
    /// Category type (usually a small enum).
    type Category: Eq + Hash + Clone;

    /// The event's category.
    fn category(&self) -> Self::Category;
}

impl<T: MapEvent + ?Sized> MapEvent for &T {
    type Id = T::Id;

    fn id(&self) -> Option<&Self::Id> {
        (**self).id()
    }

    fn coordinate(&self) -> Option<Coordinate> {
        (**self).coordinate()
    }

    fn popularity(&self) -> u32 {
        (**self).popularity()
    }
}

impl<T: Categorized + ?Sized> Categorized for &T {
    type Category = T::Category;

    fn category(&self) -> Self::Category {
        (**self).category()
    }
}
