//! Map marker clustering for geolocated events.
//!
//! `mapclump` groups events into clusters sized for the current zoom level,
//! event density and screen size, so a map can show one marker per group
//! instead of a pile of overlapping pins.
//!
//! The primary public API is under [`cluster`], which provides:
//! - coordinate validation and the clustering distance metric
//! - the adaptive threshold ([`ClusterParams`])
//! - the greedy build and merge passes, wrapped by [`ClusterEngine`]
//!
//! [`summary`] turns clusters into what a marker renderer needs.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod event;
pub mod summary;

pub use cluster::{
    build_clusters, cluster_events, distance, find_cluster, locate, merge_clusters, merge_pass,
    Categorized, Cluster, ClusterEngine, ClusterParams, DensityTier, Located, MapEvent, Viewport,
    ZoomBand,
};
pub use error::{Error, Result};
pub use event::{validate, Category, Coordinate, Event, DEFAULT_LOCATION};
pub use summary::{dominant_category, summarize, summarize_cluster, ClusterSummary};
