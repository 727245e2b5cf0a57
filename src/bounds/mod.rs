//! Clip rectangle and Cohen–Sutherland outcodes.

mod rect;

pub use rect::{Bounds, X_MAX, X_MIN, Y_MAX, Y_MIN};
