//! Zoom-adaptive clustering of map events.
//!
//! The pipeline is a pure function of `(events, zoom, viewport)`:
//!
//! 1. **Locate**: drop events without a usable coordinate ([`locate`]).
//! 2. **Threshold**: derive a grouping distance from zoom, event count and
//!    viewport size ([`ClusterParams::threshold`]).
//! 3. **Build**: greedy, popularity-seeded assignment ([`build_clusters`]).
//! 4. **Merge**: collapse clusters whose centers are still too close
//!    ([`merge_clusters`]).
//!
//! Nothing is cached across calls: a zoom change, data refresh or viewport
//! resize reruns the whole pipeline.
//!
//! ## Distance unit
//!
//! [`distance`] returns the haversine central angle converted as
//! `c * (180 / π) / π`. That is degrees divided by π, not degrees and not
//! kilometres. The default thresholds were tuned against exactly this value,
//! so the formula and [`ClusterParams::default`] only make sense together.
//!
//! ## Usage
//!
//! ```rust
//! use mapclump::{ClusterEngine, Event};
//!
//! let events = vec![
//!     Event::new(1, 16.3700, 48.2080, 5),
//!     Event::new(2, 16.3701, 48.2081, 1),
//!     Event::new(3, 16.3900, 48.2200, 10),
//! ];
//!
//! let clusters = ClusterEngine::new().cluster(&events, 16.0, None).unwrap();
//! assert_eq!(clusters.len(), 2);
//!
//! let mut sizes: Vec<usize> = clusters.iter().map(|c| c.len()).collect();
//! sizes.sort();
//! assert_eq!(sizes, vec![1, 2]);
//! ```
//!
//! ## Complexity
//!
//! O(n²) for the build pass and O(k²) per merge sweep. Fine for the few
//! hundred events a viewport shows; a spatial grid would be needed well
//! beyond that.

mod engine;
mod entity;
mod greedy;
mod merge;
mod params;
mod traits;
mod util;

pub use engine::{cluster_events, find_cluster, ClusterEngine};
pub use entity::{Cluster, CENTROID_TOLERANCE};
pub use greedy::build_clusters;
pub use merge::{merge_clusters, merge_pass};
pub use params::{ClusterParams, DensityTier, Viewport, ZoomBand};
pub use traits::{Categorized, MapEvent};
pub use util::{distance, locate, Located};
