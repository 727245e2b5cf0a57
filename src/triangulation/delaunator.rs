//! Sweep-hull Delaunay triangulation over an implicit half-edge mesh.
//!
//! Points are inserted in order of distance from the circumcenter of a seed
//! triangle. Each new point lies outside the current convex hull; it is
//! connected to every hull edge visible from it and the new triangles are
//! legalized by edge flips until the Delaunay condition holds again.
//!
//! # Mesh layout
//!
//! Triangle `t` occupies half-edges `3t`, `3t + 1`, `3t + 2`.
//! `triangles[e]` is the vertex half-edge `e` starts from and `halfedges[e]`
//! is its twin in the adjacent triangle, or [`EMPTY`] on the hull.
//!
//! # Complexity
//!
//! - Time: O(n log n) expected
//! - Space: O(n)
//!
//! # Example
//!
//! ```
//! use delaunay_voronoi::triangulation::{Delaunator, EMPTY};
//!
//! let coords = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
//! let d = Delaunator::new(&coords).unwrap();
//!
//! assert_eq!(d.triangles(), &[0, 2, 1, 2, 3, 1]);
//! assert_eq!(d.halfedges(), &[EMPTY, 5, EMPTY, EMPTY, EMPTY, 1]);
//! assert_eq!(d.hull(), &[2, 3, 1, 0]);
//! ```

use super::sort::sort_by_distance;
use super::{validate_coords, EMPTY};
use crate::error::DelaunayError;
use crate::predicates::{circumcenter, circumradius, in_circle, orient2d};
use tracing::{debug, trace};

/// Points closer than this to the previously inserted point are skipped.
const EPSILON: f64 = f64::EPSILON;

/// Initial capacity of the flip stack. The stack grows past it when needed.
const EDGE_STACK_CAPACITY: usize = 512;

/// Incremental sweep-hull Delaunay triangulator.
///
/// The triangulator borrows the flat coordinate buffer `[x0, y0, x1, y1, …]`
/// for the duration of a build and keeps only index arrays. Rebuilding with
/// [`update`](Self::update) reuses every internal buffer.
///
/// All-collinear input produces no triangles; [`hull`](Self::hull) then lists
/// the distinct points in order along the line.
#[derive(Debug, Clone, Default)]
pub struct Delaunator {
    triangles: Vec<usize>,
    halfedges: Vec<usize>,
    hull: Vec<usize>,

    hull_prev: Vec<usize>,
    hull_next: Vec<usize>,
    hull_tri: Vec<usize>,
    hull_hash: Vec<usize>,
    hash_size: usize,
    hull_start: usize,

    ids: Vec<usize>,
    dists: Vec<f64>,
    edge_stack: Vec<usize>,
    cx: f64,
    cy: f64,
}

impl Delaunator {
    /// Triangulates a flat coordinate buffer.
    ///
    /// # Errors
    ///
    /// Returns [`DelaunayError::OddCoordinateCount`] if `coords` does not hold
    /// whole `x, y` pairs and [`DelaunayError::InvalidCoordinate`] if any value
    /// is NaN or infinite.
    pub fn new(coords: &[f64]) -> Result<Self, DelaunayError> {
        let mut delaunator = Self {
            edge_stack: Vec::with_capacity(EDGE_STACK_CAPACITY),
            ..Self::default()
        };
        delaunator.update(coords)?;
        Ok(delaunator)
    }

    /// Rebuilds the triangulation from `coords`, reusing internal buffers.
    ///
    /// On error the previous triangulation is left untouched.
    pub fn update(&mut self, coords: &[f64]) -> Result<(), DelaunayError> {
        validate_coords(coords)?;
        self.triangulate(coords);
        Ok(())
    }

    /// Vertex indices, three per triangle.
    #[inline]
    pub fn triangles(&self) -> &[usize] {
        &self.triangles
    }

    /// Twin half-edge of each half-edge, [`EMPTY`] on the hull.
    #[inline]
    pub fn halfedges(&self) -> &[usize] {
        &self.halfedges
    }

    /// Convex hull vertex indices.
    #[inline]
    pub fn hull(&self) -> &[usize] {
        &self.hull
    }

    /// Number of triangles.
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Returns `true` if the triangulation has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    fn reset(&mut self, n: usize) {
        let max_triangles = (2 * n).saturating_sub(5);
        self.hash_size = (n as f64).sqrt().ceil() as usize;

        self.triangles.clear();
        self.triangles.reserve(max_triangles * 3);
        self.halfedges.clear();
        self.halfedges.reserve(max_triangles * 3);
        self.hull.clear();

        self.hull_prev.clear();
        self.hull_prev.resize(n, 0);
        self.hull_next.clear();
        self.hull_next.resize(n, 0);
        self.hull_tri.clear();
        self.hull_tri.resize(n, 0);
        self.hull_hash.clear();
        self.hull_hash.resize(self.hash_size, EMPTY);

        self.ids.clear();
        self.ids.extend(0..n);
        self.dists.clear();
        self.dists.resize(n, 0.0);
        self.edge_stack.clear();
    }

    fn triangulate(&mut self, coords: &[f64]) {
        let n = coords.len() / 2;
        self.reset(n);
        if n == 0 {
            return;
        }

        let (mut min_x, mut min_y) = (f64::INFINITY, f64::INFINITY);
        let (mut max_x, mut max_y) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in coords.chunks_exact(2) {
            min_x = min_x.min(p[0]);
            min_y = min_y.min(p[1]);
            max_x = max_x.max(p[0]);
            max_y = max_y.max(p[1]);
        }
        let cx = (min_x + max_x) / 2.0;
        let cy = (min_y + max_y) / 2.0;

        // seed point closest to the center
        let mut i0 = 0;
        let mut min_dist = f64::INFINITY;
        for i in 0..n {
            let d = dist(cx, cy, coords[2 * i], coords[2 * i + 1]);
            if d < min_dist {
                i0 = i;
                min_dist = d;
            }
        }
        let (i0x, i0y) = (coords[2 * i0], coords[2 * i0 + 1]);

        // closest distinct point to the seed
        let mut i1 = None;
        let mut min_dist = f64::INFINITY;
        for i in 0..n {
            if i == i0 {
                continue;
            }
            let d = dist(i0x, i0y, coords[2 * i], coords[2 * i + 1]);
            if d < min_dist && d > 0.0 {
                i1 = Some(i);
                min_dist = d;
            }
        }

        // third point forming the smallest circumcircle with the first two
        let mut i2 = None;
        if let Some(i1) = i1 {
            let (i1x, i1y) = (coords[2 * i1], coords[2 * i1 + 1]);
            let mut min_radius = f64::INFINITY;
            for i in 0..n {
                if i == i0 || i == i1 {
                    continue;
                }
                let r = circumradius(i0x, i0y, i1x, i1y, coords[2 * i], coords[2 * i + 1]);
                if r < min_radius {
                    i2 = Some(i);
                    min_radius = r;
                }
            }
        }

        let (mut i1, mut i2) = match (i1, i2) {
            (Some(i1), Some(i2)) => (i1, i2),
            _ => {
                self.collinear_hull(coords);
                return;
            }
        };

        // counter-clockwise seed
        if orient2d(
            i0x,
            i0y,
            coords[2 * i1],
            coords[2 * i1 + 1],
            coords[2 * i2],
            coords[2 * i2 + 1],
        ) < 0.0
        {
            std::mem::swap(&mut i1, &mut i2);
        }
        let (i1x, i1y) = (coords[2 * i1], coords[2 * i1 + 1]);
        let (i2x, i2y) = (coords[2 * i2], coords[2 * i2 + 1]);

        let center = circumcenter(i0x, i0y, i1x, i1y, i2x, i2y);
        self.cx = center.x;
        self.cy = center.y;

        for i in 0..n {
            self.dists[i] = dist(coords[2 * i], coords[2 * i + 1], center.x, center.y);
        }
        sort_by_distance(&mut self.ids, &self.dists);

        self.hull_start = i0;
        let mut hull_size = 3;

        self.hull_next[i0] = i1;
        self.hull_prev[i2] = i1;
        self.hull_next[i1] = i2;
        self.hull_prev[i0] = i2;
        self.hull_next[i2] = i0;
        self.hull_prev[i1] = i0;

        self.hull_tri[i0] = 0;
        self.hull_tri[i1] = 1;
        self.hull_tri[i2] = 2;

        let key = self.hash_key(i0x, i0y);
        self.hull_hash[key] = i0;
        let key = self.hash_key(i1x, i1y);
        self.hull_hash[key] = i1;
        let key = self.hash_key(i2x, i2y);
        self.hull_hash[key] = i2;

        self.add_triangle(i0, i1, i2, EMPTY, EMPTY, EMPTY);

        let (mut xp, mut yp) = (f64::NAN, f64::NAN);
        for k in 0..n {
            let i = self.ids[k];
            let x = coords[2 * i];
            let y = coords[2 * i + 1];

            if k > 0 && (x - xp).abs() <= EPSILON && (y - yp).abs() <= EPSILON {
                continue;
            }
            xp = x;
            yp = y;

            if i == i0 || i == i1 || i == i2 {
                continue;
            }

            let Some((start, mut e)) = self.find_visible_edge(coords, x, y) else {
                // near-duplicate of a hull point
                continue;
            };

            let mut t = self.add_triangle(e, i, self.hull_next[e], EMPTY, EMPTY, self.hull_tri[e]);
            self.hull_tri[i] = self.legalize(coords, t + 2);
            self.hull_tri[e] = t;
            hull_size += 1;

            // walk forward through the hull
            let mut next = self.hull_next[e];
            loop {
                let q = self.hull_next[next];
                if orient2d(
                    x,
                    y,
                    coords[2 * next],
                    coords[2 * next + 1],
                    coords[2 * q],
                    coords[2 * q + 1],
                ) >= 0.0
                {
                    break;
                }
                t = self.add_triangle(next, i, q, self.hull_tri[i], EMPTY, self.hull_tri[next]);
                self.hull_tri[i] = self.legalize(coords, t + 2);
                self.hull_next[next] = next; // removed
                hull_size -= 1;
                next = q;
            }

            // walk backward from the other side
            if e == start {
                loop {
                    let q = self.hull_prev[e];
                    if orient2d(
                        x,
                        y,
                        coords[2 * q],
                        coords[2 * q + 1],
                        coords[2 * e],
                        coords[2 * e + 1],
                    ) >= 0.0
                    {
                        break;
                    }
                    t = self.add_triangle(q, i, e, EMPTY, self.hull_tri[e], self.hull_tri[q]);
                    self.legalize(coords, t + 2);
                    self.hull_tri[q] = t;
                    self.hull_next[e] = e; // removed
                    hull_size -= 1;
                    e = q;
                }
            }

            self.hull_start = e;
            self.hull_prev[i] = e;
            self.hull_next[e] = i;
            self.hull_prev[next] = i;
            self.hull_next[i] = next;

            let key = self.hash_key(x, y);
            self.hull_hash[key] = i;
            let key = self.hash_key(coords[2 * e], coords[2 * e + 1]);
            self.hull_hash[key] = e;
        }

        self.hull.reserve(hull_size);
        let mut e = self.hull_start;
        for _ in 0..hull_size {
            self.hull.push(e);
            e = self.hull_next[e];
        }

        trace!(
            points = n,
            triangles = self.len(),
            hull = self.hull.len(),
            "triangulated"
        );
    }

    /// Orders collinear input along its line and records it as the hull.
    fn collinear_hull(&mut self, coords: &[f64]) {
        let (x0, y0) = (coords[0], coords[1]);
        for (i, p) in coords.chunks_exact(2).enumerate() {
            let dx = p[0] - x0;
            self.dists[i] = if dx != 0.0 { dx } else { p[1] - y0 };
        }
        sort_by_distance(&mut self.ids, &self.dists);

        let mut d0 = f64::NEG_INFINITY;
        for &id in &self.ids {
            let d = self.dists[id];
            if d > d0 {
                self.hull.push(id);
                d0 = d;
            }
        }

        debug!(
            points = self.ids.len(),
            hull = self.hull.len(),
            "collinear input, no triangles"
        );
    }

    /// Finds a hull edge visible from `(x, y)`.
    ///
    /// Returns the hash lookup start and the first visible edge, or `None`
    /// when no edge is visible.
    fn find_visible_edge(&self, coords: &[f64], x: f64, y: f64) -> Option<(usize, usize)> {
        let mut start = EMPTY;
        let key = self.hash_key(x, y);
        for j in 0..self.hash_size {
            start = self.hull_hash[(key + j) % self.hash_size];
            if start != EMPTY && start != self.hull_next[start] {
                break;
            }
        }
        if start == EMPTY || start == self.hull_next[start] {
            start = self.hull_start;
        }

        let start = self.hull_prev[start];
        let mut e = start;
        loop {
            let q = self.hull_next[e];
            if orient2d(
                x,
                y,
                coords[2 * e],
                coords[2 * e + 1],
                coords[2 * q],
                coords[2 * q + 1],
            ) < 0.0
            {
                return Some((start, e));
            }
            e = q;
            if e == start {
                return None;
            }
        }
    }

    fn hash_key(&self, x: f64, y: f64) -> usize {
        let angle = pseudo_angle(x - self.cx, y - self.cy);
        ((angle * self.hash_size as f64).floor() as usize) % self.hash_size
    }

    /// Flips edges until the triangles around `a` are locally Delaunay.
    ///
    /// Returns the half-edge that ends up on the hull side of the last
    /// triangle touched.
    fn legalize(&mut self, coords: &[f64], mut a: usize) -> usize {
        let mut ar;

        loop {
            let b = self.halfedges[a];

            // Triangles [p0, pr, pl] and [p1, pl, pr] share the edge a/b.
            // If p1 lies inside the circumcircle of the first, flip the edge:
            //
            //        pl                    pl
            //       /||\                  /  \
            //    al/ || \bl            al/    \a
            //     /  ||  \              /      \
            //    /  a||b  \    flip    /___ar___\
            //  p0\   ||   /p1   =>   p0\---bl---/p1
            //     \  ||  /              \      /
            //    ar\ || /br             b\    /br
            //       \||/                  \  /
            //        pr                    pr
            let a0 = a - a % 3;
            ar = a0 + (a + 2) % 3;

            if b == EMPTY {
                match self.edge_stack.pop() {
                    Some(next) => {
                        a = next;
                        continue;
                    }
                    None => break,
                }
            }

            let b0 = b - b % 3;
            let al = a0 + (a + 1) % 3;
            let bl = b0 + (b + 2) % 3;

            let p0 = self.triangles[ar];
            let pr = self.triangles[a];
            let pl = self.triangles[al];
            let p1 = self.triangles[bl];

            let illegal = in_circle(
                coords[2 * p0],
                coords[2 * p0 + 1],
                coords[2 * pr],
                coords[2 * pr + 1],
                coords[2 * pl],
                coords[2 * pl + 1],
                coords[2 * p1],
                coords[2 * p1 + 1],
            );

            if illegal {
                self.triangles[a] = p1;
                self.triangles[b] = p0;

                let hbl = self.halfedges[bl];

                // the flipped edge was on the hull; repoint its hull vertex
                if hbl == EMPTY {
                    let mut e = self.hull_start;
                    loop {
                        if self.hull_tri[e] == bl {
                            self.hull_tri[e] = a;
                            break;
                        }
                        e = self.hull_prev[e];
                        if e == self.hull_start {
                            break;
                        }
                    }
                }
                self.link(a, hbl);
                self.link(b, self.halfedges[ar]);
                self.link(ar, bl);

                let br = b0 + (b + 1) % 3;
                self.edge_stack.push(br);
                if self.edge_stack.len() == EDGE_STACK_CAPACITY + 1 {
                    debug!(
                        depth = self.edge_stack.len(),
                        "flip stack grew past its initial capacity"
                    );
                }
            } else {
                match self.edge_stack.pop() {
                    Some(next) => a = next,
                    None => break,
                }
            }
        }

        ar
    }

    #[inline]
    fn link(&mut self, a: usize, b: usize) {
        self.halfedges[a] = b;
        if b != EMPTY {
            self.halfedges[b] = a;
        }
    }

    fn add_triangle(&mut self, i0: usize, i1: usize, i2: usize, a: usize, b: usize, c: usize) -> usize {
        let t = self.triangles.len();

        self.triangles.extend_from_slice(&[i0, i1, i2]);
        self.halfedges.extend_from_slice(&[EMPTY, EMPTY, EMPTY]);

        self.link(t, a);
        self.link(t + 1, b);
        self.link(t + 2, c);

        t
    }
}

/// Monotonically increases with the real angle of `(dx, dy)`, in `[0, 1]`.
#[inline]
fn pseudo_angle(dx: f64, dy: f64) -> f64 {
    let p = dx / (dx.abs() + dy.abs());
    if dy > 0.0 {
        (3.0 - p) / 4.0
    } else {
        (1.0 + p) / 4.0
    }
}

#[inline]
fn dist(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = ax - bx;
    let dy = ay - by;
    dx * dx + dy * dy
}
