//! SVG path-data sink.

use super::context::Context;
use crate::error::DelaunayError;
use std::f64::consts::{PI, TAU};
use std::fmt;

/// Movements shorter than this are not emitted as separate segments.
const EPSILON: f64 = 1e-6;

/// Builds an SVG path `d` attribute from drawing commands.
///
/// Numbers are written in their shortest round-trip form with no
/// separating spaces, e.g. `M0,1L1,1L1,0Z`.
///
/// # Example
///
/// ```
/// use delaunay_voronoi::io::{Context, Path};
///
/// let mut path = Path::new();
/// path.move_to(0.0, 0.0);
/// path.line_to(10.0, 0.5);
/// path.close_path();
/// assert_eq!(path.value(), Some("M0,0L10,0.5Z"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    data: String,
    start: Option<(f64, f64)>,
    current: Option<(f64, f64)>,
}

impl Path {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// The accumulated path data, or `None` if nothing was drawn.
    pub fn value(&self) -> Option<&str> {
        if self.data.is_empty() {
            None
        } else {
            Some(&self.data)
        }
    }

    /// Consumes the path and returns its data, or `None` if nothing was drawn.
    pub fn into_value(self) -> Option<String> {
        if self.data.is_empty() {
            None
        } else {
            Some(self.data)
        }
    }

    /// Returns `true` if no command has been emitted.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn command(&mut self, op: char, values: &[f64]) {
        self.data.push(op);
        for (i, &v) in values.iter().enumerate() {
            if i > 0 {
                self.data.push(',');
            }
            self.data.push_str(&format_number(v));
        }
    }
}

impl Context for Path {
    fn move_to(&mut self, x: f64, y: f64) {
        self.command('M', &[x, y]);
        self.start = Some((x, y));
        self.current = Some((x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.command('L', &[x, y]);
        self.current = Some((x, y));
    }

    fn arc(&mut self, x: f64, y: f64, r: f64, start_angle: f64, end_angle: f64) -> Result<(), DelaunayError> {
        if r < 0.0 {
            return Err(DelaunayError::NegativeRadius { radius: r });
        }

        let dx = r * start_angle.cos();
        let dy = r * start_angle.sin();
        let x0 = x + dx;
        let y0 = y + dy;

        match self.current {
            None => {
                self.command('M', &[x0, y0]);
                self.start = Some((x0, y0));
            }
            Some((cx, cy)) if (cx - x0).abs() > EPSILON || (cy - y0).abs() > EPSILON => {
                self.command('L', &[x0, y0]);
            }
            Some(_) => {}
        }
        self.current = Some((x0, y0));

        if r == 0.0 {
            return Ok(());
        }

        let mut da = end_angle - start_angle;
        if da < 0.0 {
            da = da % TAU + TAU;
        }

        if da > TAU - EPSILON {
            // full circle as two half-circle arcs
            self.command('A', &[r, r, 0.0, 1.0, 1.0, x - dx, y - dy]);
            self.command('A', &[r, r, 0.0, 1.0, 1.0, x0, y0]);
        } else if da > EPSILON {
            let large_arc = if da >= PI { 1.0 } else { 0.0 };
            let x1 = x + r * end_angle.cos();
            let y1 = y + r * end_angle.sin();
            self.command('A', &[r, r, 0.0, large_arc, 1.0, x1, y1]);
            self.current = Some((x1, y1));
        }
        Ok(())
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.command('M', &[x, y]);
        self.command('h', &[w]);
        self.command('v', &[h]);
        self.command('h', &[-w]);
        self.data.push('Z');
        self.start = Some((x, y));
        self.current = Some((x, y));
    }

    fn close_path(&mut self) {
        if self.current.is_some() {
            self.current = self.start;
            self.data.push('Z');
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data)
    }
}

/// Shortest round-trip decimal form, with negative zero printed as `0`.
fn format_number(v: f64) -> String {
    if v == 0.0 {
        "0".to_string()
    } else {
        v.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_has_no_value() {
        let path = Path::new();
        assert_eq!(path.value(), None);
        assert_eq!(path.into_value(), None);
    }

    #[test]
    fn test_lines_and_close() {
        let mut path = Path::new();
        path.move_to(0.0, 1.0);
        path.line_to(1.0, 1.0);
        path.line_to(1.0, 0.0);
        path.line_to(0.0, 0.0);
        path.close_path();
        assert_eq!(path.value(), Some("M0,1L1,1L1,0L0,0Z"));
    }

    #[test]
    fn test_close_without_point_is_ignored() {
        let mut path = Path::new();
        path.close_path();
        assert!(path.is_empty());
    }

    #[test]
    fn test_number_format() {
        let mut path = Path::new();
        path.move_to(-0.0, 0.5);
        path.line_to(-2.25, 1e-7);
        assert_eq!(path.to_string(), "M0,0.5L-2.25,0.0000001");
    }

    #[test]
    fn test_full_circle() {
        let mut path = Path::new();
        path.move_to(2.0, 0.0);
        path.arc(0.0, 0.0, 2.0, 0.0, TAU).unwrap();
        assert_eq!(path.value(), Some("M2,0A2,2,0,1,1,-2,0A2,2,0,1,1,2,0"));
    }

    #[test]
    fn test_arc_moves_to_start_on_empty_path() {
        let mut path = Path::new();
        path.arc(1.0, 3.0, 2.0, 0.0, TAU).unwrap();
        assert_eq!(path.value(), Some("M3,3A2,2,0,1,1,-1,3A2,2,0,1,1,3,3"));
    }

    #[test]
    fn test_arc_connects_with_line() {
        let mut path = Path::new();
        path.move_to(0.0, 0.0);
        path.arc(5.0, 0.0, 1.0, 0.0, TAU).unwrap();
        assert!(path.to_string().starts_with("M0,0L6,0A1,1"));
    }

    #[test]
    fn test_zero_radius_arc() {
        let mut path = Path::new();
        path.arc(4.0, 5.0, 0.0, 0.0, TAU).unwrap();
        assert_eq!(path.value(), Some("M4,5"));
    }

    #[test]
    fn test_negative_radius() {
        let mut path = Path::new();
        let err = path.arc(0.0, 0.0, -1.0, 0.0, TAU).unwrap_err();
        assert_eq!(err, DelaunayError::NegativeRadius { radius: -1.0 });
        assert!(path.is_empty());
    }

    #[test]
    fn test_rect() {
        let mut path = Path::new();
        path.rect(0.0, 0.0, 960.0, 500.0);
        assert_eq!(path.value(), Some("M0,0h960v500h-960Z"));
    }
}
