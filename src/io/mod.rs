//! Rendering sinks.
//!
//! Drawing operations take any [`Context`]. Two sinks are provided:
//! [`Path`] writes SVG path data and [`PolygonContext`] collects vertices.

mod context;
mod path;
mod polygon;

pub use context::Context;
pub use path::Path;
pub use polygon::PolygonContext;
