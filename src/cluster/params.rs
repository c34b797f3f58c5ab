//! Clustering parameters and the adaptive distance threshold.
//!
//! The threshold is `base(zoom) * density(count) * viewport_factor`:
//!
//! - **base**: tight at street level, loose when zoomed out, where decluttering
//!   matters more than exact proximity.
//! - **density**: grows with the number of visible events so the marker count
//!   stays manageable.
//! - **viewport**: `sqrt(w * h / (w_ref * h_ref))`, so a bigger screen groups
//!   over a proportionally bigger area.
//!
//! All values are in the unit produced by [`distance`](super::distance).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Map display size in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Create a viewport. Both dimensions must be non-zero.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let viewport = Self { width, height };
        viewport.validate()?;
        Ok(viewport)
    }

    /// Check both dimensions are non-zero, for viewports built field by field
    /// or deserialized.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Pixel area.
    #[inline]
    pub fn area(&self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }
}

impl Default for Viewport {
    /// Portrait 1080x1920, used when the map hasn't reported its size.
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
        }
    }
}

/// Base threshold for every zoom level at or above `min_zoom`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoomBand {
    /// Lowest zoom level this band applies to.
    pub min_zoom: f64,
    /// Base threshold.
    pub threshold: f64,
}

/// Threshold multiplier for event counts strictly above `above`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DensityTier {
    /// The tier applies when the event count exceeds this value.
    pub above: usize,
    /// Multiplier.
    pub factor: f64,
}

/// Parameters of the clustering pipeline.
///
/// The defaults were tuned empirically against [`distance`](super::distance);
/// treat them as a set.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClusterParams {
    /// Base thresholds by zoom. The band with the highest `min_zoom` not above
    /// the current zoom wins; order doesn't matter.
    pub zoom_bands: Vec<ZoomBand>,

    /// Base threshold below the lowest band.
    pub fallback_threshold: f64,

    /// Density multipliers. The tier with the highest `above` still below the
    /// event count wins; 1.0 if none does.
    pub density_tiers: Vec<DensityTier>,

    /// Viewport the base thresholds were tuned for.
    pub reference_viewport: Viewport,

    /// Cluster centers closer than `threshold * merge_factor` are merged.
    pub merge_factor: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        let band = |min_zoom, threshold| ZoomBand {
            min_zoom,
            threshold,
        };
        let tier = |above, factor| DensityTier { above, factor };

        Self {
            zoom_bands: vec![
                band(18.0, 0.0003),
                band(16.0, 0.0008),
                band(14.0, 0.0020),
                band(12.0, 0.0045),
                band(10.0, 0.0100),
                band(8.0, 0.0180),
            ],
            fallback_threshold: 0.0300,
            density_tiers: vec![tier(100, 1.5), tier(50, 1.3), tier(20, 1.1)],
            reference_viewport: Viewport::default(),
            merge_factor: 1.2,
        }
    }
}

impl ClusterParams {
    /// Create the default parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the zoom bands.
    pub fn with_zoom_bands(mut self, zoom_bands: Vec<ZoomBand>) -> Self {
        self.zoom_bands = zoom_bands;
        self
    }

    /// Set the base threshold used below the lowest zoom band.
    pub fn with_fallback_threshold(mut self, threshold: f64) -> Self {
        self.fallback_threshold = threshold;
        self
    }

    /// Replace the density tiers.
    pub fn with_density_tiers(mut self, density_tiers: Vec<DensityTier>) -> Self {
        self.density_tiers = density_tiers;
        self
    }

    /// Set the reference viewport.
    pub fn with_reference_viewport(mut self, viewport: Viewport) -> Self {
        self.reference_viewport = viewport;
        self
    }

    /// Set the merge factor.
    pub fn with_merge_factor(mut self, merge_factor: f64) -> Self {
        self.merge_factor = merge_factor;
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<()> {
        for band in &self.zoom_bands {
            if !band.min_zoom.is_finite() {
                return Err(Error::InvalidParameter {
                    name: "zoom_bands.min_zoom",
                    message: "must be finite",
                });
            }
            if !is_positive(band.threshold) {
                return Err(Error::InvalidParameter {
                    name: "zoom_bands.threshold",
                    message: "must be positive and finite",
                });
            }
        }

        if !is_positive(self.fallback_threshold) {
            return Err(Error::InvalidParameter {
                name: "fallback_threshold",
                message: "must be positive and finite",
            });
        }

        if self.density_tiers.iter().any(|t| !is_positive(t.factor)) {
            return Err(Error::InvalidParameter {
                name: "density_tiers.factor",
                message: "must be positive and finite",
            });
        }

        self.reference_viewport.validate()?;

        if !(self.merge_factor.is_finite() && self.merge_factor >= 1.0) {
            return Err(Error::InvalidParameter {
                name: "merge_factor",
                message: "must be finite and at least 1.0",
            });
        }

        Ok(())
    }

    /// Base threshold for a zoom level.
    pub fn base_threshold(&self, zoom: f64) -> f64 {
        self.zoom_bands
            .iter()
            .filter(|b| zoom >= b.min_zoom)
            .max_by(|a, b| a.min_zoom.total_cmp(&b.min_zoom))
            .map_or(self.fallback_threshold, |b| b.threshold)
    }

    /// Multiplier for the number of visible events.
    pub fn density_factor(&self, count: usize) -> f64 {
        self.density_tiers
            .iter()
            .filter(|t| count > t.above)
            .max_by_key(|t| t.above)
            .map_or(1.0, |t| t.factor)
    }

    /// Multiplier for the viewport size relative to the reference viewport.
    pub fn viewport_factor(&self, viewport: Viewport) -> f64 {
        (viewport.area() / self.reference_viewport.area()).sqrt()
    }

    /// Clustering threshold for a zoom level, event count and viewport.
    pub fn threshold(&self, zoom: f64, count: usize, viewport: Viewport) -> f64 {
        self.base_threshold(zoom) * self.density_factor(count) * self.viewport_factor(viewport)
    }

    /// Distance under which cluster centers are merged.
    #[inline]
    pub fn merge_threshold(&self, threshold: f64) -> f64 {
        threshold * self.merge_factor
    }
}

#[inline]
fn is_positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}
