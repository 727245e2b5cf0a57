//! Circumcircle helpers.
//!
//! These are plain floating-point evaluations. Legalization tolerates the
//! occasional misclassified in-circle test; only orientation must be exact.

use crate::primitives::Point2;

/// Returns `true` if `p` lies strictly inside the circumcircle of `a, b, c`.
///
/// The triangle must be counter-clockwise in the y-down convention of
/// [`orient2d`](super::orient2d).
#[inline]
#[allow(clippy::too_many_arguments)]
pub fn in_circle(ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64, px: f64, py: f64) -> bool {
    let dx = ax - px;
    let dy = ay - py;
    let ex = bx - px;
    let ey = by - py;
    let fx = cx - px;
    let fy = cy - py;

    let ap = dx * dx + dy * dy;
    let bp = ex * ex + ey * ey;
    let cp = fx * fx + fy * fy;

    dx * (ey * cp - bp * fy) - dy * (ex * cp - bp * fx) + ap * (ex * fy - ey * fx) < 0.0
}

/// Squared circumradius of the triangle `a, b, c`.
///
/// Degenerate (collinear) triangles yield `+∞` or NaN; both compare as
/// "not smaller" against any finite radius.
#[inline]
pub fn circumradius(ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64) -> f64 {
    let dx = bx - ax;
    let dy = by - ay;
    let ex = cx - ax;
    let ey = cy - ay;

    let bl = dx * dx + dy * dy;
    let cl = ex * ex + ey * ey;
    let d = 0.5 / (dx * ey - dy * ex);

    let x = (ey * bl - dy * cl) * d;
    let y = (dx * cl - ex * bl) * d;

    x * x + y * y
}

/// Circumcenter of the triangle `a, b, c`.
///
/// Not finite for collinear input.
#[inline]
pub fn circumcenter(ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64) -> Point2<f64> {
    let dx = bx - ax;
    let dy = by - ay;
    let ex = cx - ax;
    let ey = cy - ay;

    let bl = dx * dx + dy * dy;
    let cl = ex * ex + ey * ey;
    let d = 0.5 / (dx * ey - dy * ex);

    Point2::new(ax + (ey * bl - dy * cl) * d, ay + (dx * cl - ex * bl) * d)
}
