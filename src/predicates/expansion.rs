//! Error-free floating-point transformations and expansion arithmetic.
//!
//! An *expansion* is a sequence of non-overlapping `f64` components, ordered by
//! increasing magnitude, whose exact sum is the represented value. The
//! routines here follow Shewchuk's "Adaptive Precision Floating-Point
//! Arithmetic and Fast Robust Geometric Predicates".

/// Machine epsilon for round-to-nearest `f64` arithmetic, 2^-53.
pub(crate) const EPSILON: f64 = 1.1102230246251565e-16;

/// 2^27 + 1, used to split a double into two non-overlapping halves.
pub(crate) const SPLITTER: f64 = 134_217_729.0;

/// Relative error bound for a result estimated from an expansion.
pub(crate) const RESULT_ERR_BOUND: f64 = (3.0 + 8.0 * EPSILON) * EPSILON;

/// Splits `a` into high and low halves, each with at most 26 significant bits.
#[inline]
fn split(a: f64) -> (f64, f64) {
    let c = SPLITTER * a;
    let hi = c - (c - a);
    (hi, a - hi)
}

/// Returns `(x, y)` with `x = fl(a + b)` and `x + y = a + b` exactly.
#[inline]
pub(crate) fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let x = a + b;
    let bvirt = x - a;
    let y = (a - (x - bvirt)) + (b - bvirt);
    (x, y)
}

/// Returns `(x, y)` with `x = fl(a - b)` and `x + y = a - b` exactly.
#[inline]
pub(crate) fn two_diff(a: f64, b: f64) -> (f64, f64) {
    let x = a - b;
    (x, two_diff_tail(a, b, x))
}

/// Roundoff error of `x = fl(a - b)`.
#[inline]
pub(crate) fn two_diff_tail(a: f64, b: f64, x: f64) -> f64 {
    let bvirt = a - x;
    (a - (x + bvirt)) + (bvirt - b)
}

/// Returns `(x, y)` with `x = fl(a * b)` and `x + y = a * b` exactly.
#[inline]
pub(crate) fn two_product(a: f64, b: f64) -> (f64, f64) {
    let x = a * b;
    let (ahi, alo) = split(a);
    let (bhi, blo) = split(b);
    let err = x - ahi * bhi - alo * bhi - ahi * blo;
    (x, alo * blo - err)
}

/// Exact difference of two two-component expansions `(a1 + a0) - (b1 + b0)`.
///
/// The result is a four-component expansion, least significant first.
#[inline]
pub(crate) fn two_two_diff(a1: f64, a0: f64, b1: f64, b0: f64) -> [f64; 4] {
    let (i, x0) = two_diff(a0, b0);
    let (j, r0) = two_sum(a1, i);
    let (i, x1) = two_diff(r0, b1);
    let (x3, x2) = two_sum(j, i);
    [x0, x1, x2, x3]
}

/// Approximates the value of an expansion by summing its components.
#[inline]
pub(crate) fn estimate(e: &[f64]) -> f64 {
    e.iter().sum()
}

/// Sums two expansions, eliminating zero components.
///
/// Writes the result into `h` and returns its length. `h` must have room for
/// `e.len() + f.len()` components. Both inputs must be non-empty.
pub(crate) fn expansion_sum(e: &[f64], f: &[f64], h: &mut [f64]) -> usize {
    let component = |s: &[f64], i: usize| s.get(i).copied().unwrap_or(0.0);

    let mut ei = 0;
    let mut fi = 0;
    let mut enow = e[0];
    let mut fnow = f[0];
    let mut q;

    if (fnow > enow) == (fnow > -enow) {
        q = enow;
        ei += 1;
        enow = component(e, ei);
    } else {
        q = fnow;
        fi += 1;
        fnow = component(f, fi);
    }

    let mut hi = 0;
    let mut emit = |h: &mut [f64], hh: f64| {
        if hh != 0.0 {
            h[hi] = hh;
            hi += 1;
        }
    };

    if ei < e.len() && fi < f.len() {
        let (qnew, hh) = if (fnow > enow) == (fnow > -enow) {
            let qnew = enow + q;
            let hh = q - (qnew - enow);
            ei += 1;
            enow = component(e, ei);
            (qnew, hh)
        } else {
            let qnew = fnow + q;
            let hh = q - (qnew - fnow);
            fi += 1;
            fnow = component(f, fi);
            (qnew, hh)
        };
        q = qnew;
        emit(h, hh);

        while ei < e.len() && fi < f.len() {
            let (qnew, hh) = if (fnow > enow) == (fnow > -enow) {
                let r = two_sum(q, enow);
                ei += 1;
                enow = component(e, ei);
                r
            } else {
                let r = two_sum(q, fnow);
                fi += 1;
                fnow = component(f, fi);
                r
            };
            q = qnew;
            emit(h, hh);
        }
    }

    while ei < e.len() {
        let (qnew, hh) = two_sum(q, enow);
        ei += 1;
        enow = component(e, ei);
        q = qnew;
        emit(h, hh);
    }

    while fi < f.len() {
        let (qnew, hh) = two_sum(q, fnow);
        fi += 1;
        fnow = component(f, fi);
        q = qnew;
        emit(h, hh);
    }

    if q != 0.0 || hi == 0 {
        h[hi] = q;
        hi += 1;
    }
    hi
}
