//! Geometric predicates.
//!
//! [`orient2d`] is exact in sign: it uses a fast floating-point filter and
//! falls back to adaptive expansion arithmetic only for near-degenerate
//! input. The circle helpers are plain floating-point evaluations.

mod circle;
mod expansion;
mod orient;

pub use circle::{circumcenter, circumradius, in_circle};
pub use orient::{orient2d, orient2dfast, orientation, Orientation};
