//! Error types for triangulation and rendering operations.

use thiserror::Error;

/// Errors that can occur while building or rendering a triangulation.
///
/// Numerical degeneracies (collinear or coincident input) are never errors;
/// they are resolved by the algorithms themselves.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DelaunayError {
    /// A flat coordinate buffer must hold `x, y` pairs.
    #[error("coordinate buffer has odd length {len}")]
    OddCoordinateCount {
        /// Length of the rejected buffer.
        len: usize,
    },

    /// A coordinate is NaN, infinite, or not representable as `f64`.
    #[error("coordinate {index} is not a finite number")]
    InvalidCoordinate {
        /// Index of the offending value in the flat buffer.
        index: usize,
    },

    /// Clip bounds with `xmax < xmin` or `ymax < ymin`.
    #[error("invalid bounds [{xmin}, {ymin}, {xmax}, {ymax}]")]
    InvalidBounds {
        /// Left edge.
        xmin: f64,
        /// Top edge.
        ymin: f64,
        /// Right edge.
        xmax: f64,
        /// Bottom edge.
        ymax: f64,
    },

    /// An arc was requested with a negative radius.
    #[error("negative radius: {radius}")]
    NegativeRadius {
        /// The rejected radius.
        radius: f64,
    },
}
