use thiserror::Error;

/// Errors returned by the clustering engine.
///
/// Events with a missing or unusable coordinate are not errors; they are
/// filtered out before clustering.
#[derive(Debug, Error)]
pub enum Error {
    /// A cluster was constructed without members.
    #[error("a cluster must have at least one member")]
    EmptyCluster,

    /// A cluster member position lies outside the source slice.
    #[error("position {position} out of range for {len} events")]
    PositionOutOfRange {
        /// Requested position.
        position: usize,
        /// Length of the source slice.
        len: usize,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Viewport with a zero dimension.
    #[error("invalid viewport {width}x{height}: both dimensions must be non-zero")]
    InvalidViewport {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
