//! Delaunay triangulation and its Voronoi dual.
//!
//! - [`Delaunator`] builds the half-edge mesh from a flat coordinate buffer.
//! - [`Delaunay`] adds point location, neighbor queries and rendering, and
//!   resolves all-collinear input.
//! - [`Voronoi`] derives cells clipped to a [`Bounds`](crate::bounds::Bounds)
//!   rectangle.
//!
//! Adjacency arrays use [`EMPTY`] as the "no half-edge" sentinel.

mod delaunator;
mod delaunay;
mod sort;
mod voronoi;

pub use delaunator::Delaunator;
pub use delaunay::{CollinearOptions, Delaunay, Neighbors, DEFAULT_POINT_RADIUS};
pub use voronoi::Voronoi;

use crate::error::DelaunayError;
use num_traits::ToPrimitive;

/// Sentinel for a missing half-edge, vertex or triangle.
pub const EMPTY: usize = usize::MAX;

/// Next half-edge within the same triangle.
#[inline]
pub fn next_halfedge(e: usize) -> usize {
    if e % 3 == 2 {
        e - 2
    } else {
        e + 1
    }
}

/// Previous half-edge within the same triangle.
#[inline]
pub fn prev_halfedge(e: usize) -> usize {
    if e % 3 == 0 {
        e + 2
    } else {
        e - 1
    }
}

/// Flattens records into `[x0, y0, x1, y1, …]` using accessor functions.
///
/// Each accessor receives the record, its index and the whole slice. Any
/// numeric type convertible to `f64` may be returned.
///
/// # Errors
///
/// Returns [`DelaunayError::InvalidCoordinate`] (indexed into the flat
/// output) if a value cannot be represented as a finite `f64`.
///
/// # Example
///
/// ```
/// use delaunay_voronoi::triangulation::flat_coords;
///
/// let points = [(1_i32, 2_i32), (3, 4)];
/// let coords = flat_coords(&points, |p, _, _| p.0, |p, _, _| p.1).unwrap();
/// assert_eq!(coords, vec![1.0, 2.0, 3.0, 4.0]);
/// ```
pub fn flat_coords<P, T, U, FX, FY>(points: &[P], fx: FX, fy: FY) -> Result<Vec<f64>, DelaunayError>
where
    T: ToPrimitive,
    U: ToPrimitive,
    FX: Fn(&P, usize, &[P]) -> T,
    FY: Fn(&P, usize, &[P]) -> U,
{
    let mut coords = Vec::with_capacity(points.len() * 2);
    for (i, p) in points.iter().enumerate() {
        coords.push(to_finite(fx(p, i, points), 2 * i)?);
        coords.push(to_finite(fy(p, i, points), 2 * i + 1)?);
    }
    Ok(coords)
}

fn to_finite<T: ToPrimitive>(value: T, index: usize) -> Result<f64, DelaunayError> {
    value
        .to_f64()
        .filter(|v| v.is_finite())
        .ok_or(DelaunayError::InvalidCoordinate { index })
}

/// Checks that `coords` holds whole pairs of finite values.
pub(crate) fn validate_coords(coords: &[f64]) -> Result<(), DelaunayError> {
    if coords.len() % 2 != 0 {
        return Err(DelaunayError::OddCoordinateCount { len: coords.len() });
    }
    match coords.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(DelaunayError::InvalidCoordinate { index }),
        None => Ok(()),
    }
}
