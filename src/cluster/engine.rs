use tracing::debug;

use super::entity::Cluster;
use super::greedy::build_clusters;
use super::merge::merge_clusters;
use super::params::{ClusterParams, Viewport};
use super::traits::MapEvent;
use super::util::locate;
use crate::error::{Error, Result};

/// Zoom-adaptive event clusterer.
///
/// Holds only its parameters; every call recomputes clusters from scratch
/// and can run concurrently with others.
#[derive(Debug, Clone, Default)]
pub struct ClusterEngine {
    params: ClusterParams,
}

impl ClusterEngine {
    /// Create an engine with the default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom parameters.
    pub fn with_params(params: ClusterParams) -> Self {
        Self { params }
    }

    /// The engine's parameters.
    pub fn params(&self) -> &ClusterParams {
        &self.params
    }

    /// Cluster `events` for display at `zoom` in `viewport`.
    ///
    /// Events without a valid coordinate are left out. No valid events yields
    /// an empty list. `viewport` defaults to [`Viewport::default`].
    pub fn cluster<'a, E: MapEvent>(
        &self,
        events: &'a [E],
        zoom: f64,
        viewport: Option<Viewport>,
    ) -> Result<Vec<Cluster<'a, E>>> {
        if !zoom.is_finite() {
            return Err(Error::InvalidParameter {
                name: "zoom",
                message: "must be finite",
            });
        }
        self.params.validate()?;
        let viewport = viewport.unwrap_or_default();
        viewport.validate()?;

        let located = locate(events);
        debug!(
            total = events.len(),
            valid = located.len(),
            dropped = events.len() - located.len(),
            "located events"
        );
        if located.is_empty() {
            return Ok(Vec::new());
        }

        let threshold = self.params.threshold(zoom, located.len(), viewport);
        let merge_threshold = self.params.merge_threshold(threshold);
        debug!(zoom, threshold, merge_threshold, "computed clustering threshold");

        let initial = build_clusters(&located, threshold);
        let merged = merge_clusters(&initial, merge_threshold);
        debug!(
            initial = initial.len(),
            merged = merged.len(),
            "clustered events"
        );

        Ok(merged)
    }
}

/// Cluster `events` with the default parameters.
pub fn cluster_events<E: MapEvent>(
    events: &[E],
    zoom: f64,
    viewport: Option<Viewport>,
) -> Result<Vec<Cluster<'_, E>>> {
    ClusterEngine::new().cluster(events, zoom, viewport)
}

/// The cluster that holds the event with identifier `id`.
pub fn find_cluster<'c, 'a, E: MapEvent>(
    clusters: &'c [Cluster<'a, E>],
    id: &E::Id,
) -> Option<&'c Cluster<'a, E>> {
    clusters.iter().find(|c| c.contains_id(id))
}
