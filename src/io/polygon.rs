//! Vertex-collecting sink.

use super::context::Context;
use crate::error::DelaunayError;
use crate::primitives::Point2;
use std::f64::consts::TAU;

/// Default maximum distance between a flattened arc and the true circle.
const DEFAULT_ARC_TOLERANCE: f64 = 0.25;

/// Collects drawn vertices into a polygon ring.
///
/// `move_to` and `line_to` append a vertex, `close_path` repeats the first
/// vertex so closed shapes come back as closed rings. Arcs are flattened to
/// line segments within [`tolerance`](Self::with_tolerance).
///
/// # Example
///
/// ```
/// use delaunay_voronoi::io::{Context, PolygonContext};
/// use delaunay_voronoi::Point2;
///
/// let mut ring = PolygonContext::new();
/// ring.move_to(0.0, 0.0);
/// ring.line_to(1.0, 0.0);
/// ring.line_to(0.0, 1.0);
/// ring.close_path();
///
/// let points = ring.value().unwrap();
/// assert_eq!(points.len(), 4);
/// assert_eq!(points[0], points[3]);
/// assert_eq!(points[1], Point2::new(1.0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonContext {
    points: Vec<Point2<f64>>,
    tolerance: f64,
}

impl Default for PolygonContext {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            tolerance: DEFAULT_ARC_TOLERANCE,
        }
    }
}

impl PolygonContext {
    /// Creates an empty polygon sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the arc flattening tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The collected vertices, or `None` if nothing was drawn.
    pub fn value(self) -> Option<Vec<Point2<f64>>> {
        if self.points.is_empty() {
            None
        } else {
            Some(self.points)
        }
    }

    /// The collected vertices so far.
    pub fn points(&self) -> &[Point2<f64>] {
        &self.points
    }

    /// Segments needed so the sagitta of each stays within tolerance.
    fn segments_for_sweep(&self, r: f64, sweep: f64) -> usize {
        if self.tolerance >= r {
            return 1;
        }
        let ratio = (1.0 - self.tolerance / r).clamp(-1.0, 1.0);
        let max_angle = 2.0 * ratio.acos();
        if max_angle <= f64::EPSILON {
            return 1;
        }
        ((sweep / max_angle).ceil() as usize).max(1)
    }
}

impl Context for PolygonContext {
    fn move_to(&mut self, x: f64, y: f64) {
        self.points.push(Point2::new(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.points.push(Point2::new(x, y));
    }

    fn arc(&mut self, x: f64, y: f64, r: f64, start_angle: f64, end_angle: f64) -> Result<(), DelaunayError> {
        if r < 0.0 {
            return Err(DelaunayError::NegativeRadius { radius: r });
        }

        let start = Point2::new(x + r * start_angle.cos(), y + r * start_angle.sin());
        if self.points.last() != Some(&start) {
            self.points.push(start);
        }
        if r == 0.0 {
            return Ok(());
        }

        let mut sweep = end_angle - start_angle;
        if sweep < 0.0 {
            sweep = sweep % TAU + TAU;
        }
        let sweep = sweep.min(TAU);
        if sweep <= f64::EPSILON {
            return Ok(());
        }

        let segments = self.segments_for_sweep(r, sweep);
        let step = sweep / segments as f64;
        for i in 1..=segments {
            let angle = start_angle + step * i as f64;
            self.points
                .push(Point2::new(x + r * angle.cos(), y + r * angle.sin()));
        }
        Ok(())
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.move_to(x, y);
        self.line_to(x + w, y);
        self.line_to(x + w, y + h);
        self.line_to(x, y + h);
        self.close_path();
    }

    fn close_path(&mut self) {
        if let Some(&first) = self.points.first() {
            self.points.push(first);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_is_none() {
        assert_eq!(PolygonContext::new().value(), None);
    }

    #[test]
    fn test_rect_ring() {
        let mut ring = PolygonContext::new();
        ring.rect(1.0, 2.0, 3.0, 4.0);
        let points = ring.value().unwrap();
        assert_eq!(
            points,
            vec![
                Point2::new(1.0, 2.0),
                Point2::new(4.0, 2.0),
                Point2::new(4.0, 6.0),
                Point2::new(1.0, 6.0),
                Point2::new(1.0, 2.0),
            ]
        );
    }

    #[test]
    fn test_arc_flattening_stays_on_circle() {
        let mut ring = PolygonContext::new().with_tolerance(0.01);
        ring.arc(3.0, -1.0, 5.0, 0.0, TAU).unwrap();
        let points = ring.value().unwrap();
        assert!(points.len() > 8);
        for p in &points {
            assert_relative_eq!((p.x - 3.0).hypot(p.y + 1.0), 5.0, epsilon = 1e-9);
        }
        let first = points[0];
        let last = points[points.len() - 1];
        assert_relative_eq!(first.x, last.x, epsilon = 1e-9);
        assert_relative_eq!(first.y, last.y, epsilon = 1e-9);
    }

    #[test]
    fn test_arc_negative_radius() {
        let mut ring = PolygonContext::new();
        assert!(ring.arc(0.0, 0.0, -0.5, 0.0, 1.0).is_err());
        assert!(ring.points().is_empty());
    }
}
