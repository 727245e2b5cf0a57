//! 2D point type.

use num_traits::Float;
use std::fmt;

/// A point in the plane.
///
/// Generic over floating-point types (`f32` or `f64`). Triangulation works in
/// `f64` internally; other precisions are widened on input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2<F> {
    /// Horizontal coordinate.
    pub x: F,
    /// Vertical coordinate, increasing downward when rendered to SVG.
    pub y: F,
}

impl<F: Float> Point2<F> {
    /// Creates a new point.
    #[inline]
    pub fn new(x: F, y: F) -> Self {
        Self { x, y }
    }
}

impl<F> From<[F; 2]> for Point2<F> {
    #[inline]
    fn from([x, y]: [F; 2]) -> Self {
        Self { x, y }
    }
}

impl<F> From<(F, F)> for Point2<F> {
    #[inline]
    fn from((x, y): (F, F)) -> Self {
        Self { x, y }
    }
}

impl<F> From<Point2<F>> for [F; 2] {
    #[inline]
    fn from(p: Point2<F>) -> Self {
        [p.x, p.y]
    }
}

impl<F: fmt::Display> fmt::Display for Point2<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions() {
        let p: Point2<f64> = [1.5, -2.0].into();
        assert_eq!(p, Point2::new(1.5, -2.0));
        let q: Point2<f32> = (0.5_f32, 0.25_f32).into();
        assert_eq!(q.x, 0.5);
        let arr: [f64; 2] = p.into();
        assert_eq!(arr, [1.5, -2.0]);
    }
}
