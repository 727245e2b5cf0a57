//! Drawing sink interface.

use crate::error::DelaunayError;

/// Receiver of drawing primitives.
///
/// Mirrors the subset of the HTML canvas path API that triangulations and
/// Voronoi diagrams need. Implement it to draw directly into a canvas,
/// a vector backend, or any other target.
///
/// Angles are in radians; arcs sweep clockwise on screen (y down) from
/// `start_angle` to `end_angle`.
pub trait Context {
    /// Starts a new subpath at `(x, y)`.
    fn move_to(&mut self, x: f64, y: f64);

    /// Adds a straight segment to `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64);

    /// Adds a circular arc centered at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`DelaunayError::NegativeRadius`] if `r` is negative.
    fn arc(&mut self, x: f64, y: f64, r: f64, start_angle: f64, end_angle: f64) -> Result<(), DelaunayError>;

    /// Adds a closed axis-aligned rectangle.
    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    /// Closes the current subpath.
    fn close_path(&mut self);
}
