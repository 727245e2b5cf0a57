//! Delaunay triangulation with point location and neighbor queries.
//!
//! [`Delaunay`] wraps a [`Delaunator`] mesh and adds:
//! - an incoming half-edge per point, so the edge ring around any point can
//!   be walked in constant time per neighbor;
//! - nearest-point search by greedy walking over the triangulation;
//! - recovery from all-collinear input, which the triangulator alone cannot
//!   mesh;
//! - rendering of edges, hull, triangles and points to any [`Context`].
//!
//! # Example
//!
//! ```
//! use delaunay_voronoi::Delaunay;
//!
//! let delaunay = Delaunay::new(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
//!
//! assert_eq!(delaunay.find(0.1, 0.2, 0), Some(0));
//! assert_eq!(delaunay.neighbors(0).collect::<Vec<_>>(), vec![1, 2]);
//! assert_eq!(delaunay.render_hull_path().as_deref(), Some("M0,1L1,1L1,0L0,0Z"));
//! ```

use super::{flat_coords, next_halfedge, validate_coords, Delaunator, Voronoi, EMPTY};
use crate::bounds::Bounds;
use crate::error::DelaunayError;
use crate::io::{Context, Path, PolygonContext};
use crate::predicates::orient2d;
use crate::primitives::Point2;
use num_traits::{Float, ToPrimitive};
use std::f64::consts::TAU;
use tracing::{debug, warn};

/// Triangles whose doubled area stays below this are considered flat.
const FLAT_TRIANGLE_AREA: f64 = 1e-10;

/// Lower bound on the collinear jitter, in units of the largest coordinate's
/// machine epsilon.
const MIN_JITTER_ULPS: f64 = 8.0;

/// Radius used by [`Delaunay::render_points_path`].
pub const DEFAULT_POINT_RADIUS: f64 = 2.0;

/// Controls how all-collinear input is perturbed into a triangulable set.
///
/// Coordinates are offset by `magnitude * sin(k + 0.5)` for flat index `k`,
/// where `magnitude` starts at `relative_magnitude` times the distance
/// between the extreme points of the line. If the perturbed set is still
/// flat, the magnitude is multiplied by `growth` and the build retried, up to
/// `max_attempts` builds in total.
///
/// A positive magnitude is raised to a few ulps of the largest coordinate so
/// that lines far from the origin still move. A `relative_magnitude` of zero
/// disables the jitter: the points are left unmeshed and queries follow their
/// order along the line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollinearOptions {
    /// Initial jitter as a fraction of the line's length.
    pub relative_magnitude: f64,
    /// Factor applied to the jitter after each flat build.
    pub growth: f64,
    /// Maximum number of builds, counting the first.
    pub max_attempts: usize,
}

impl Default for CollinearOptions {
    fn default() -> Self {
        Self {
            relative_magnitude: 1e-9,
            growth: 10.0,
            max_attempts: 4,
        }
    }
}

impl CollinearOptions {
    /// Default options: `1e-9` of the line length, growing ×10, 4 builds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial jitter as a fraction of the line's length.
    pub fn with_relative_magnitude(mut self, relative_magnitude: f64) -> Self {
        self.relative_magnitude = relative_magnitude;
        self
    }

    /// Sets the factor applied to the jitter between builds.
    pub fn with_growth(mut self, growth: f64) -> Self {
        self.growth = growth;
        self
    }

    /// Sets the maximum number of builds; zero is treated as one.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }
}

/// A Delaunay triangulation of a planar point set.
///
/// Owns its points as a flat `[x0, y0, x1, y1, …]` buffer. Mutate them in
/// place through [`points_mut`](Self::points_mut) and call
/// [`update`](Self::update) to rebuild.
///
/// Degenerate inputs are handled without error:
/// - no points: every array is empty and queries return nothing;
/// - one or two distinct points: a single placeholder triangle
///   `[h0, h1, h1]` (or `[h0, EMPTY, EMPTY]`) with no twins, so the two
///   points are each other's neighbor;
/// - all points on a line: the triangulation is built from slightly
///   perturbed coordinates and neighbors follow the order along the line.
#[derive(Debug, Clone)]
pub struct Delaunay {
    points: Vec<f64>,
    perturbed: Option<Vec<f64>>,
    options: CollinearOptions,
    delaunator: Delaunator,

    triangles: Vec<usize>,
    halfedges: Vec<usize>,
    hull: Vec<usize>,
    inedges: Vec<usize>,
    hull_index: Vec<usize>,

    collinear: Option<Vec<usize>>,
    collinear_rank: Vec<usize>,
}

impl Delaunay {
    /// Triangulates a flat coordinate buffer.
    ///
    /// # Errors
    ///
    /// Fails if the buffer has odd length or holds a non-finite value.
    pub fn new(points: Vec<f64>) -> Result<Self, DelaunayError> {
        Self::with_options(points, CollinearOptions::default())
    }

    /// Triangulates with explicit collinear-recovery options.
    pub fn with_options(points: Vec<f64>, options: CollinearOptions) -> Result<Self, DelaunayError> {
        validate_coords(&points)?;
        let delaunator = Delaunator::new(&points)?;
        let mut delaunay = Self {
            points,
            perturbed: None,
            options,
            delaunator,
            triangles: Vec::new(),
            halfedges: Vec::new(),
            hull: Vec::new(),
            inedges: Vec::new(),
            hull_index: Vec::new(),
            collinear: None,
            collinear_rank: Vec::new(),
        };
        delaunay.init()?;
        Ok(delaunay)
    }

    /// Triangulates records through coordinate accessors.
    ///
    /// Each accessor receives the record, its index and the whole slice.
    ///
    /// ```
    /// use delaunay_voronoi::Delaunay;
    ///
    /// struct City { lon: f32, lat: f32 }
    /// let cities = [
    ///     City { lon: 2.35, lat: 48.86 },
    ///     City { lon: 13.40, lat: 52.52 },
    ///     City { lon: -0.13, lat: 51.51 },
    /// ];
    /// let d = Delaunay::from_points(&cities, |c, _, _| c.lon, |c, _, _| c.lat).unwrap();
    /// assert_eq!(d.triangles().len(), 3);
    /// ```
    pub fn from_points<P, T, U, FX, FY>(points: &[P], fx: FX, fy: FY) -> Result<Self, DelaunayError>
    where
        T: ToPrimitive,
        U: ToPrimitive,
        FX: Fn(&P, usize, &[P]) -> T,
        FY: Fn(&P, usize, &[P]) -> U,
    {
        Self::new(flat_coords(points, fx, fy)?)
    }

    /// Triangulates a slice of [`Point2`].
    pub fn from_point2s<F: Float>(points: &[Point2<F>]) -> Result<Self, DelaunayError> {
        Self::from_points(points, |p, _, _| p.x, |p, _, _| p.y)
    }

    /// Rebuilds the triangulation after the points were mutated.
    ///
    /// Rebuilding unchanged points yields identical arrays.
    ///
    /// # Errors
    ///
    /// Fails if a point was set to a non-finite value; the previous
    /// triangulation is then left in place.
    pub fn update(&mut self) -> Result<(), DelaunayError> {
        validate_coords(&self.points)?;
        self.delaunator.update(&self.points)?;
        self.init()
    }

    fn init(&mut self) -> Result<(), DelaunayError> {
        self.perturbed = None;
        self.collinear = None;
        self.collinear_rank.clear();

        if self.delaunator.hull().len() > 2 && is_flat(self.delaunator.triangles(), &self.points) {
            self.perturb()?;
        }

        let n = self.points.len() / 2;
        self.triangles.clear();
        self.triangles.extend_from_slice(self.delaunator.triangles());
        self.halfedges.clear();
        self.halfedges.extend_from_slice(self.delaunator.halfedges());
        self.hull.clear();
        self.hull.extend_from_slice(self.delaunator.hull());

        self.inedges.clear();
        self.inedges.resize(n, EMPTY);
        self.hull_index.clear();
        self.hull_index.resize(n, EMPTY);

        // Hull points prefer their exterior incoming half-edge so that the
        // ring walk starts at one end of the fan.
        for (e, &twin) in self.halfedges.iter().enumerate() {
            let p = self.triangles[next_halfedge(e)];
            if twin == EMPTY || self.inedges[p] == EMPTY {
                self.inedges[p] = e;
            }
        }
        for (i, &h) in self.hull.iter().enumerate() {
            self.hull_index[h] = i;
        }

        // one or two distinct points
        if !self.hull.is_empty() && self.hull.len() <= 2 {
            let h0 = self.hull[0];
            let h1 = self.hull.get(1).copied().unwrap_or(EMPTY);
            self.triangles.clear();
            self.triangles.extend_from_slice(&[h0, h1, h1]);
            self.halfedges.clear();
            self.halfedges.extend_from_slice(&[EMPTY, EMPTY, EMPTY]);
            self.inedges[h0] = 1;
            if h1 != EMPTY {
                self.inedges[h1] = 0;
            }
        }

        Ok(())
    }

    /// Retriangulates a perturbed copy of all-collinear points.
    fn perturb(&mut self) -> Result<(), DelaunayError> {
        let n = self.points.len() / 2;
        let points = &self.points;

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&i, &j| {
            points[2 * i]
                .total_cmp(&points[2 * j])
                .then(points[2 * i + 1].total_cmp(&points[2 * j + 1]))
        });
        let mut rank = vec![0; n];
        for (r, &i) in order.iter().enumerate() {
            rank[i] = r;
        }

        let first = order[0];
        let last = order[n - 1];
        let span = (points[2 * last] - points[2 * first]).hypot(points[2 * last + 1] - points[2 * first + 1]);
        let mut magnitude = if self.options.relative_magnitude > 0.0 {
            // never below a few ulps of the coordinates, or the offset rounds away
            let max_abs = points.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
            (self.options.relative_magnitude * span).max(MIN_JITTER_ULPS * f64::EPSILON * max_abs)
        } else {
            0.0
        };
        debug!(points = n, span, magnitude, "collinear input, perturbing");

        let attempts = self.options.max_attempts.max(1);
        let mut coords = vec![0.0; points.len()];
        for attempt in 1..=attempts {
            for (k, (c, &p)) in coords.iter_mut().zip(points.iter()).enumerate() {
                *c = p + magnitude * (k as f64 + 0.5).sin();
            }
            self.delaunator.update(&coords)?;

            let hull_len = self.delaunator.hull().len();
            if hull_len <= 2 || !is_flat(self.delaunator.triangles(), &coords) {
                break;
            }
            if attempt == attempts {
                warn!(
                    attempts,
                    magnitude, "collinear input is still flat after perturbation"
                );
            }
            magnitude *= self.options.growth;
        }

        self.perturbed = Some(coords);
        self.collinear = Some(order);
        self.collinear_rank = rank;
        Ok(())
    }

    /// The input coordinates, `[x0, y0, x1, y1, …]`.
    #[inline]
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Mutable access to the coordinates. Call [`update`](Self::update)
    /// afterwards to rebuild.
    #[inline]
    pub fn points_mut(&mut self) -> &mut [f64] {
        &mut self.points
    }

    /// The coordinates the mesh was built from: the input points, or their
    /// perturbed copy for collinear input.
    #[inline]
    pub fn mesh_coords(&self) -> &[f64] {
        self.perturbed.as_deref().unwrap_or(&self.points)
    }

    /// Number of input points.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len() / 2
    }

    /// Returns `true` if there are no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point indices, three per triangle, counter-clockwise. For one or two
    /// distinct points this is the placeholder triangle.
    #[inline]
    pub fn triangles(&self) -> &[usize] {
        &self.triangles
    }

    /// Twin of each half-edge, [`EMPTY`] on the hull.
    #[inline]
    pub fn halfedges(&self) -> &[usize] {
        &self.halfedges
    }

    /// Convex hull point indices.
    #[inline]
    pub fn hull(&self) -> &[usize] {
        &self.hull
    }

    /// One incoming half-edge per point, [`EMPTY`] for coincident points.
    /// Hull points get the half-edge on the hull.
    #[inline]
    pub fn inedges(&self) -> &[usize] {
        &self.inedges
    }

    /// Point indices sorted by x then y, present only for collinear input.
    #[inline]
    pub fn collinear(&self) -> Option<&[usize]> {
        self.collinear.as_deref()
    }

    /// Returns the Voronoi diagram of these points clipped to `bounds`.
    pub fn voronoi(self, bounds: Bounds) -> Voronoi {
        Voronoi::new(self, bounds)
    }

    /// The points sharing a Delaunay edge with point `i`.
    ///
    /// Coincident duplicates and out-of-range indices have no neighbors.
    pub fn neighbors(&self, i: usize) -> Neighbors<'_> {
        let state = if i >= self.len() {
            NeighborState::Done
        } else if let Some(order) = &self.collinear {
            let r = self.collinear_rank[i];
            NeighborState::Collinear {
                before: r.checked_sub(1).map(|r| order[r]),
                after: order.get(r + 1).copied(),
            }
        } else if self.inedges[i] == EMPTY {
            NeighborState::Done
        } else {
            NeighborState::Ring {
                start: self.inedges[i],
                edge: self.inedges[i],
            }
        };
        Neighbors {
            delaunay: self,
            site: i,
            state,
        }
    }

    /// Index of the point nearest to `(x, y)`.
    ///
    /// Walks the triangulation from point `hint`; a hint near the answer
    /// makes the search nearly constant time. Returns `None` for an empty
    /// triangulation or a NaN query.
    pub fn find(&self, x: f64, y: f64, hint: usize) -> Option<usize> {
        let n = self.len();
        if n == 0 || x.is_nan() || y.is_nan() {
            return None;
        }
        let i0 = if hint < n { hint } else { 0 };
        let mut i = i0;
        loop {
            let c = self.step(i, x, y);
            if c == i || c == i0 {
                return Some(c);
            }
            i = c;
        }
    }

    /// One greedy step: the neighbor of `i` nearest to `(x, y)`, or `i`
    /// itself if no neighbor is nearer.
    pub(crate) fn step(&self, i: usize, x: f64, y: f64) -> usize {
        let n = self.len();
        if n == 0 {
            return i;
        }
        if let Some(order) = self.collinear.as_deref().filter(|_| self.triangles.is_empty()) {
            return self.step_along_line(order, i, x, y);
        }
        let e0 = self.inedges[i];
        if e0 == EMPTY {
            return (i + 1) % n;
        }

        let mut c = i;
        let mut dc = self.distance_squared(i, x, y);
        let mut e = e0;
        loop {
            let t = self.triangles[e];
            if t != EMPTY {
                let dt = self.distance_squared(t, x, y);
                if dt < dc {
                    dc = dt;
                    c = t;
                }
            }
            e = next_halfedge(e);
            if self.triangles[e] != i {
                break;
            }
            e = self.halfedges[e];
            if e == EMPTY {
                let h = self.hull[(self.hull_index[i] + 1) % self.hull.len()];
                if h != t && self.distance_squared(h, x, y) < dc {
                    return h;
                }
                break;
            }
            if e == e0 {
                break;
            }
        }
        c
    }

    /// [`step`](Self::step) for collinear points left without a mesh.
    ///
    /// Distance to the query is unimodal along the sorted line, so each side
    /// of `i` is walked while the distance does not increase.
    fn step_along_line(&self, order: &[usize], i: usize, x: f64, y: f64) -> usize {
        let r = self.collinear_rank[i];
        let d0 = self.distance_squared(i, x, y);
        let before = self.descend(order[..r].iter().rev(), d0, x, y);
        let after = self.descend(order[r + 1..].iter(), d0, x, y);
        match (before, after) {
            (Some((b, db)), Some((_, da))) if db <= da => b,
            (_, Some((a, _))) => a,
            (Some((b, _)), None) => b,
            (None, None) => i,
        }
    }

    /// The nearest point strictly closer than `d0` on a non-increasing run.
    fn descend<'a>(&self, ids: impl Iterator<Item = &'a usize>, d0: f64, x: f64, y: f64) -> Option<(usize, f64)> {
        let mut prev = d0;
        let mut best: Option<(usize, f64)> = None;
        for &j in ids {
            let d = self.distance_squared(j, x, y);
            if d > prev {
                break;
            }
            if d < best.map_or(d0, |(_, db)| db) {
                best = Some((j, d));
            }
            prev = d;
        }
        best
    }

    #[inline]
    fn distance_squared(&self, i: usize, x: f64, y: f64) -> f64 {
        let dx = x - self.points[2 * i];
        let dy = y - self.points[2 * i + 1];
        dx * dx + dy * dy
    }

    #[inline]
    fn point(&self, i: usize) -> (f64, f64) {
        (self.points[2 * i], self.points[2 * i + 1])
    }

    /// Draws every Delaunay edge once, then the hull.
    pub fn render<C: Context + ?Sized>(&self, context: &mut C) {
        for (e, &twin) in self.halfedges.iter().enumerate() {
            if twin == EMPTY || twin < e {
                continue;
            }
            let (x0, y0) = self.point(self.triangles[e]);
            let (x1, y1) = self.point(self.triangles[next_halfedge(e)]);
            context.move_to(x0, y0);
            context.line_to(x1, y1);
        }
        self.render_hull(context);
    }

    /// [`render`](Self::render) as SVG path data.
    pub fn render_path(&self) -> Option<String> {
        let mut path = Path::new();
        self.render(&mut path);
        path.into_value()
    }

    /// Draws the convex hull as a closed polygon.
    pub fn render_hull<C: Context + ?Sized>(&self, context: &mut C) {
        let Some((&first, rest)) = self.hull.split_first() else {
            return;
        };
        let (x, y) = self.point(first);
        context.move_to(x, y);
        for &h in rest {
            let (x, y) = self.point(h);
            context.line_to(x, y);
        }
        context.close_path();
    }

    /// [`render_hull`](Self::render_hull) as SVG path data.
    pub fn render_hull_path(&self) -> Option<String> {
        let mut path = Path::new();
        self.render_hull(&mut path);
        path.into_value()
    }

    /// The convex hull as a closed ring.
    pub fn hull_polygon(&self) -> Option<Vec<Point2<f64>>> {
        let mut polygon = PolygonContext::new();
        self.render_hull(&mut polygon);
        polygon.value()
    }

    /// Draws triangle `t` as a closed polygon. Draws nothing if `t` is out of
    /// range or is the placeholder triangle of a one-point set.
    pub fn render_triangle<C: Context + ?Sized>(&self, t: usize, context: &mut C) {
        let Some(tri) = self.triangles.get(3 * t..3 * t + 3) else {
            return;
        };
        if tri.contains(&EMPTY) {
            return;
        }
        let (x0, y0) = self.point(tri[0]);
        let (x1, y1) = self.point(tri[1]);
        let (x2, y2) = self.point(tri[2]);
        context.move_to(x0, y0);
        context.line_to(x1, y1);
        context.line_to(x2, y2);
        context.close_path();
    }

    /// [`render_triangle`](Self::render_triangle) as SVG path data.
    pub fn render_triangle_path(&self, t: usize) -> Option<String> {
        let mut path = Path::new();
        self.render_triangle(t, &mut path);
        path.into_value()
    }

    /// Triangle `t` as a closed ring.
    pub fn triangle_polygon(&self, t: usize) -> Option<Vec<Point2<f64>>> {
        let mut polygon = PolygonContext::new();
        self.render_triangle(t, &mut polygon);
        polygon.value()
    }

    /// Every drawable triangle as a closed ring.
    pub fn triangle_polygons(&self) -> impl Iterator<Item = Vec<Point2<f64>>> + '_ {
        (0..self.triangles.len() / 3).filter_map(move |t| self.triangle_polygon(t))
    }

    /// Draws a circle of radius `r` around every point.
    ///
    /// # Errors
    ///
    /// Returns [`DelaunayError::NegativeRadius`] before drawing anything if
    /// `r` is negative.
    pub fn render_points<C: Context + ?Sized>(&self, context: &mut C, r: f64) -> Result<(), DelaunayError> {
        if r < 0.0 {
            return Err(DelaunayError::NegativeRadius { radius: r });
        }
        for p in self.points.chunks_exact(2) {
            let (x, y) = (p[0], p[1]);
            context.move_to(x + r, y);
            context.arc(x, y, r, 0.0, TAU)?;
        }
        Ok(())
    }

    /// [`render_points`](Self::render_points) as SVG path data.
    pub fn render_points_path(&self, r: f64) -> Result<Option<String>, DelaunayError> {
        let mut path = Path::new();
        self.render_points(&mut path, r)?;
        Ok(path.into_value())
    }
}

/// Returns `true` if no triangle has a meaningful positive area.
fn is_flat(triangles: &[usize], coords: &[f64]) -> bool {
    triangles.chunks_exact(3).all(|t| {
        let (a, b, c) = (2 * t[0], 2 * t[1], 2 * t[2]);
        orient2d(
            coords[a],
            coords[a + 1],
            coords[b],
            coords[b + 1],
            coords[c],
            coords[c + 1],
        ) <= FLAT_TRIANGLE_AREA
    })
}

#[derive(Debug, Clone, Copy)]
enum NeighborState {
    Collinear {
        before: Option<usize>,
        after: Option<usize>,
    },
    Ring {
        start: usize,
        edge: usize,
    },
    Hull(usize),
    Done,
}

/// Iterator over the Delaunay neighbors of a point.
///
/// Created by [`Delaunay::neighbors`].
#[derive(Debug, Clone)]
pub struct Neighbors<'a> {
    delaunay: &'a Delaunay,
    site: usize,
    state: NeighborState,
}

impl Iterator for Neighbors<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let d = self.delaunay;
        loop {
            match self.state {
                NeighborState::Done => return None,
                NeighborState::Hull(p) => {
                    self.state = NeighborState::Done;
                    return Some(p);
                }
                NeighborState::Collinear { before, after } => {
                    if let Some(p) = before {
                        self.state = NeighborState::Collinear {
                            before: None,
                            after,
                        };
                        return Some(p);
                    }
                    self.state = NeighborState::Done;
                    return after;
                }
                NeighborState::Ring { start, edge } => {
                    let p0 = d.triangles[edge];
                    let e = next_halfedge(edge);
                    self.state = if d.triangles[e] != self.site {
                        NeighborState::Done
                    } else {
                        match d.halfedges[e] {
                            EMPTY => {
                                // hit the hull; the last neighbor is the next hull point
                                let p = d.hull[(d.hull_index[self.site] + 1) % d.hull.len()];
                                if p != p0 {
                                    NeighborState::Hull(p)
                                } else {
                                    NeighborState::Done
                                }
                            }
                            twin if twin == start => NeighborState::Done,
                            twin => NeighborState::Ring { start, edge: twin },
                        }
                    };
                    if p0 != EMPTY {
                        return Some(p0);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Delaunay {
        Delaunay::new(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap()
    }

    fn neighbors(d: &Delaunay, i: usize) -> Vec<usize> {
        d.neighbors(i).collect()
    }

    #[test]
    fn test_square_arrays() {
        let d = square();
        assert_eq!(d.points(), &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
        assert_eq!(d.triangles(), &[0, 2, 1, 2, 3, 1]);
        assert_eq!(d.halfedges(), &[EMPTY, 5, EMPTY, EMPTY, EMPTY, 1]);
        assert_eq!(d.hull(), &[2, 3, 1, 0]);
        assert_eq!(d.inedges(), &[2, 4, 0, 3]);
        assert!(d.collinear().is_none());
    }

    #[test]
    fn test_square_neighbors() {
        let d = square();
        assert_eq!(neighbors(&d, 0), vec![1, 2]);
        assert_eq!(neighbors(&d, 1), vec![3, 2, 0]);
        assert_eq!(neighbors(&d, 2), vec![0, 1, 3]);
        assert_eq!(neighbors(&d, 3), vec![2, 1]);
        assert!(neighbors(&d, 4).is_empty());
    }

    #[test]
    fn test_from_points_accessors() {
        let points = [[0, 0], [1, 0], [0, 1], [1, 1]];
        let d = Delaunay::from_points(&points, |p, _, _| p[0], |p, _, _| p[1]).unwrap();
        assert_eq!(d.triangles(), square().triangles());
    }

    #[test]
    fn test_from_point2s() {
        let points = [
            Point2::new(0.0_f32, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        let d = Delaunay::from_point2s(&points).unwrap();
        assert_eq!(d.triangles().len(), 3);
    }

    #[test]
    fn test_from_points_rejects_nan() {
        let points = [(0.0, 0.0), (1.0, f64::NAN)];
        let err = Delaunay::from_points(&points, |p, _, _| p.0, |p, _, _| p.1).unwrap_err();
        assert_eq!(err, DelaunayError::InvalidCoordinate { index: 3 });
    }

    #[test]
    fn test_empty() {
        let d = Delaunay::new(Vec::new()).unwrap();
        assert!(d.is_empty());
        assert!(d.triangles().is_empty());
        assert!(d.hull().is_empty());
        assert_eq!(d.find(0.0, 0.0, 0), None);
        assert_eq!(d.render_path(), None);
        assert_eq!(d.hull_polygon(), None);
        assert_eq!(d.triangle_polygons().count(), 0);
    }

    #[test]
    fn test_single_point() {
        let d = Delaunay::new(vec![3.0, 4.0]).unwrap();
        assert_eq!(d.triangles(), &[0, EMPTY, EMPTY]);
        assert_eq!(d.halfedges(), &[EMPTY, EMPTY, EMPTY]);
        assert_eq!(d.inedges(), &[1]);
        assert_eq!(d.find(100.0, -5.0, 0), Some(0));
        assert!(neighbors(&d, 0).is_empty());
        assert_eq!(d.render_triangle_path(0), None);
    }

    #[test]
    fn test_two_points() {
        let d = Delaunay::new(vec![0.0, 0.0, 1.0, 0.0]).unwrap();
        assert_eq!(d.triangles(), &[0, 1, 1]);
        assert_eq!(d.halfedges(), &[EMPTY, EMPTY, EMPTY]);
        assert_eq!(d.inedges(), &[1, 0]);
        assert_eq!(neighbors(&d, 0), vec![1]);
        assert_eq!(neighbors(&d, 1), vec![0]);
        assert_eq!(d.find(0.9, 0.0, 0), Some(1));
        assert_eq!(d.find(0.1, 5.0, 1), Some(0));
    }

    #[test]
    fn test_collinear_points() {
        let d = Delaunay::new(vec![0.0, 0.0, 1.0, 0.0, 3.0, 0.0, 2.0, 0.0]).unwrap();
        assert_eq!(d.collinear(), Some(&[0, 1, 3, 2][..]));
        assert!(!d.triangles().is_empty());
        assert_eq!(d.points(), &[0.0, 0.0, 1.0, 0.0, 3.0, 0.0, 2.0, 0.0]);
        assert_eq!(neighbors(&d, 0), vec![1]);
        assert_eq!(neighbors(&d, 1), vec![0, 3]);
        assert_eq!(neighbors(&d, 3), vec![1, 2]);
        assert_eq!(neighbors(&d, 2), vec![3]);
    }

    #[test]
    fn test_collinear_find() {
        let d = Delaunay::new(vec![0.0, 0.0, 1.0, 0.0, 3.0, 0.0, 2.0, 0.0]).unwrap();
        assert_eq!(d.find(2.9, 0.3, 0), Some(2));
        assert_eq!(d.find(1.6, -0.2, 0), Some(3));
        assert_eq!(d.find(-10.0, 0.0, 2), Some(0));
    }

    #[test]
    fn test_coincident_collinear_input() {
        // (0, 1), (0, 3), … repeated along the y axis
        let points: Vec<f64> = (0..250).map(|k| if k % 2 == 1 { k as f64 } else { 0.0 }).collect();
        let d = Delaunay::new(points).unwrap();
        assert_eq!(d.collinear().map(<[usize]>::len), Some(125));

        let zeros = Delaunay::new(vec![0.0; 250]).unwrap();
        assert!(zeros.collinear().is_none());
        assert_eq!(zeros.hull(), &[0]);
    }

    #[test]
    fn test_collinear_far_from_origin() {
        let points: Vec<f64> = (0..5).flat_map(|k| [1e12 + k as f64, 1e12 + k as f64]).collect();
        let d = Delaunay::new(points.clone()).unwrap();
        assert_eq!(d.collinear(), Some(&[0, 1, 2, 3, 4][..]));
        assert!(!d.triangles().is_empty());
        assert_ne!(d.mesh_coords(), &points[..]);
        assert_eq!(d.points(), &points[..]);
        assert!(d.inedges().iter().all(|&e| e != EMPTY));
        assert_eq!(d.find(1e12 + 4.0, 1e12 + 4.0, 0), Some(4));
        assert_eq!(d.find(1e12 - 3.0, 1e12 - 3.0, 4), Some(0));
        assert_eq!(neighbors(&d, 2), vec![1, 3]);
    }

    #[test]
    fn test_collinear_still_flat_after_retries() {
        let options = CollinearOptions::new()
            .with_relative_magnitude(1e-15)
            .with_growth(1.0)
            .with_max_attempts(2);
        let points = vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0];
        let d = Delaunay::with_options(points.clone(), options).unwrap();
        assert_eq!(d.collinear(), Some(&[0, 1, 2, 3][..]));
        assert_eq!(d.points(), &points[..]);
        assert_eq!(neighbors(&d, 1), vec![0, 2]);
        assert_eq!(neighbors(&d, 3), vec![2]);
    }

    #[test]
    fn test_collinear_without_jitter() {
        let options = CollinearOptions::new().with_relative_magnitude(0.0);
        let points = vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0, 3.0, 3.0, 4.0, 4.0, 2.0, 2.0];
        let d = Delaunay::with_options(points, options).unwrap();
        assert!(d.triangles().is_empty());
        assert!(d.inedges().iter().all(|&e| e == EMPTY));
        assert_eq!(d.collinear(), Some(&[0, 1, 2, 5, 3, 4][..]));

        assert_eq!(d.find(3.9, 4.2, 0), Some(4));
        assert_eq!(d.find(-5.0, -5.0, 3), Some(0));
        let found = d.find(2.1, 1.9, 4).unwrap();
        assert_eq!(&d.points()[2 * found..2 * found + 2], &[2.0, 2.0]);
        assert_eq!(neighbors(&d, 5), vec![2, 3]);
    }

    #[test]
    fn test_find() {
        let d = Delaunay::new(vec![0.0, 0.0, 300.0, 0.0, 0.0, 300.0, 300.0, 300.0, 100.0, 100.0]).unwrap();
        assert_eq!(d.find(49.0, 49.0, 0), Some(0));
        assert_eq!(d.find(51.0, 51.0, 0), Some(4));
        assert_eq!(d.find(299.0, 1.0, 2), Some(1));
    }

    #[test]
    fn test_find_square_halfway() {
        let d = square();
        assert_eq!(d.find(0.49, 0.49, 0), Some(0));
        assert_eq!(d.find(0.51, 0.51, 0), Some(3));
        assert_eq!(d.find(0.49, 0.49, 3), Some(0));
    }

    #[test]
    fn test_find_nan() {
        let d = square();
        assert_eq!(d.find(f64::NAN, 0.0, 0), None);
        assert_eq!(d.find(0.0, f64::NAN, 0), None);
    }

    #[test]
    fn test_find_with_coincident_points() {
        let d = Delaunay::new(vec![0.0, 0.0, 0.0, 0.0, 10.0, 10.0, 10.0, -10.0]).unwrap();
        assert_eq!(d.find(100.0, 100.0, 0), Some(2));
        assert!(d.find(0.0, 0.0, 1).is_some());
    }

    #[test]
    fn test_find_out_of_range_hint() {
        let d = square();
        assert_eq!(d.find(0.9, 0.1, 99), Some(1));
    }

    #[test]
    fn test_render() {
        let d = square();
        assert_eq!(d.render_path().as_deref(), Some("M0,1L1,0M0,1L1,1L1,0L0,0Z"));
    }

    #[test]
    fn test_render_hull() {
        assert_eq!(square().render_hull_path().as_deref(), Some("M0,1L1,1L1,0L0,0Z"));
    }

    #[test]
    fn test_render_triangle() {
        let d = square();
        assert_eq!(d.render_triangle_path(0).as_deref(), Some("M0,0L0,1L1,0Z"));
        assert_eq!(d.render_triangle_path(1).as_deref(), Some("M0,1L1,1L1,0Z"));
        assert_eq!(d.render_triangle_path(2), None);
    }

    #[test]
    fn test_render_points() {
        let d = square();
        assert_eq!(
            d.render_points_path(DEFAULT_POINT_RADIUS).unwrap().as_deref(),
            Some(concat!(
                "M2,0A2,2,0,1,1,-2,0A2,2,0,1,1,2,0",
                "M3,0A2,2,0,1,1,-1,0A2,2,0,1,1,3,0",
                "M2,1A2,2,0,1,1,-2,1A2,2,0,1,1,2,1",
                "M3,1A2,2,0,1,1,-1,1A2,2,0,1,1,3,1",
            ))
        );
        assert_eq!(
            d.render_points_path(-1.0),
            Err(DelaunayError::NegativeRadius { radius: -1.0 })
        );
    }

    #[test]
    fn test_polygons() {
        let d = square();
        let p = |x, y| Point2::new(x, y);
        assert_eq!(
            d.hull_polygon().unwrap(),
            vec![p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0), p(0.0, 0.0), p(0.0, 1.0)]
        );
        assert_eq!(
            d.triangle_polygon(0).unwrap(),
            vec![p(0.0, 0.0), p(0.0, 1.0), p(1.0, 0.0), p(0.0, 0.0)]
        );
        let all: Vec<_> = d.triangle_polygons().collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1], vec![p(0.0, 1.0), p(1.0, 1.0), p(1.0, 0.0), p(0.0, 1.0)]);
    }

    #[test]
    fn test_update_after_mutation() {
        let mut d = square();
        for v in d.points_mut() {
            *v *= 2.0;
        }
        d.update().unwrap();
        assert_eq!(d.triangles(), &[0, 2, 1, 2, 3, 1]);
        assert_eq!(d.render_hull_path().as_deref(), Some("M0,2L2,2L2,0L0,0Z"));
    }

    #[test]
    fn test_update_is_idempotent() {
        let mut d = Delaunay::new(vec![0.0, 0.0, 1.0, 0.0, 3.0, 0.0, 2.0, 0.0]).unwrap();
        let before = (d.triangles().to_vec(), d.halfedges().to_vec(), d.inedges().to_vec());
        d.update().unwrap();
        d.update().unwrap();
        assert_eq!(before, (d.triangles().to_vec(), d.halfedges().to_vec(), d.inedges().to_vec()));
    }

    #[test]
    fn test_update_rejects_nan() {
        let mut d = square();
        d.points_mut()[3] = f64::NAN;
        assert_eq!(d.update(), Err(DelaunayError::InvalidCoordinate { index: 3 }));
        assert_eq!(d.triangles(), &[0, 2, 1, 2, 3, 1]);
    }

    #[test]
    fn test_collinear_options_builder() {
        let options = CollinearOptions::new()
            .with_relative_magnitude(1e-6)
            .with_growth(2.0)
            .with_max_attempts(1);
        let d = Delaunay::with_options(vec![0.0, 0.0, 0.0, 1.0, 0.0, 2.0], options).unwrap();
        assert_eq!(d.collinear(), Some(&[0, 1, 2][..]));
        assert_eq!(d.triangles().len(), 3);
    }
}
