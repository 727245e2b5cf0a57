//! Adaptive-precision orientation test.

use super::expansion::{
    estimate, expansion_sum, two_diff_tail, two_product, two_two_diff, EPSILON, RESULT_ERR_BOUND,
};
use crate::primitives::Point2;

const CCW_ERR_BOUND_A: f64 = (3.0 + 16.0 * EPSILON) * EPSILON;
const CCW_ERR_BOUND_B: f64 = (2.0 + 12.0 * EPSILON) * EPSILON;
const CCW_ERR_BOUND_C: f64 = (9.0 + 64.0 * EPSILON) * EPSILON * EPSILON;

/// Result of an orientation test.
///
/// Orientation is reported in a y-down (screen) coordinate system, the
/// convention used throughout the triangulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points wind counter-clockwise on screen (positive determinant).
    CounterClockwise,
    /// Points wind clockwise on screen (negative determinant).
    Clockwise,
    /// Points are exactly collinear.
    Collinear,
}

/// Robust orientation of the triangle `a, b, c`.
///
/// Returns a value whose sign is the sign of
/// `(ay - cy) * (bx - cx) - (ax - cx) * (by - cy)` evaluated exactly:
/// positive if the points are counter-clockwise in a y-down coordinate system,
/// negative if clockwise, zero if collinear. The magnitude approximates twice
/// the signed area.
///
/// The common case costs a handful of flops. Only when the rounded
/// determinant is too close to zero to trust does the test fall back to
/// expansion arithmetic, refining until the sign is certain.
///
/// # Example
///
/// ```
/// use delaunay_voronoi::predicates::orient2d;
///
/// assert!(orient2d(0.0, 0.0, 0.0, 1.0, 1.0, 0.0) > 0.0);
/// assert!(orient2d(0.0, 0.0, 1.0, 0.0, 0.0, 1.0) < 0.0);
/// assert_eq!(orient2d(0.0, 0.0, 1.0, 1.0, 2.0, 2.0), 0.0);
/// ```
#[inline]
pub fn orient2d(ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64) -> f64 {
    let detleft = (ay - cy) * (bx - cx);
    let detright = (ax - cx) * (by - cy);
    let det = detleft - detright;

    let detsum = (detleft + detright).abs();
    if det.abs() >= CCW_ERR_BOUND_A * detsum {
        return det;
    }

    -orient2d_adapt(ax, ay, bx, by, cx, cy, detsum)
}

/// Non-robust orientation: the plain floating-point determinant.
#[inline]
pub fn orient2dfast(ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64) -> f64 {
    (ay - cy) * (bx - cx) - (ax - cx) * (by - cy)
}

/// Classifies the orientation of three points with the robust determinant.
#[inline]
pub fn orientation(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> Orientation {
    let det = orient2d(a.x, a.y, b.x, b.y, c.x, c.y);
    if det > 0.0 {
        Orientation::CounterClockwise
    } else if det < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Computes `(ax - cx) * (by - cy) - (ay - cy) * (bx - cx)` with enough
/// precision to get its sign right.
#[allow(clippy::too_many_arguments)]
fn orient2d_adapt(ax: f64, ay: f64, bx: f64, by: f64, cx: f64, cy: f64, detsum: f64) -> f64 {
    let acx = ax - cx;
    let bcx = bx - cx;
    let acy = ay - cy;
    let bcy = by - cy;

    let (s1, s0) = two_product(acx, bcy);
    let (t1, t0) = two_product(acy, bcx);
    let b = two_two_diff(s1, s0, t1, t0);

    let mut det = estimate(&b);
    let errbound = CCW_ERR_BOUND_B * detsum;
    if det >= errbound || -det >= errbound {
        return det;
    }

    let acxtail = two_diff_tail(ax, cx, acx);
    let bcxtail = two_diff_tail(bx, cx, bcx);
    let acytail = two_diff_tail(ay, cy, acy);
    let bcytail = two_diff_tail(by, cy, bcy);

    if acxtail == 0.0 && acytail == 0.0 && bcxtail == 0.0 && bcytail == 0.0 {
        return det;
    }

    let errbound = CCW_ERR_BOUND_C * detsum + RESULT_ERR_BOUND * det.abs();
    det += (acx * bcytail + bcy * acxtail) - (acy * bcxtail + bcx * acytail);
    if det >= errbound || -det >= errbound {
        return det;
    }

    let (s1, s0) = two_product(acxtail, bcy);
    let (t1, t0) = two_product(acytail, bcx);
    let u = two_two_diff(s1, s0, t1, t0);
    let mut c1 = [0.0; 8];
    let c1len = expansion_sum(&b, &u, &mut c1);

    let (s1, s0) = two_product(acx, bcytail);
    let (t1, t0) = two_product(acy, bcxtail);
    let u = two_two_diff(s1, s0, t1, t0);
    let mut c2 = [0.0; 12];
    let c2len = expansion_sum(&c1[..c1len], &u, &mut c2);

    let (s1, s0) = two_product(acxtail, bcytail);
    let (t1, t0) = two_product(acytail, bcxtail);
    let u = two_two_diff(s1, s0, t1, t0);
    let mut d = [0.0; 16];
    let dlen = expansion_sum(&c2[..c2len], &u, &mut d);

    d[dlen - 1]
}
