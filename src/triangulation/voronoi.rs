//! Voronoi diagram clipped to a rectangle.
//!
//! The diagram is derived from a [`Delaunay`] triangulation. Each triangle's
//! circumcenter becomes a Voronoi vertex and each interior Delaunay edge
//! becomes a Voronoi edge. Hull points own unbounded cells, bounded here by
//! rays perpendicular to their hull edges and then clipped to [`Bounds`].
//!
//! # Example
//!
//! ```
//! use delaunay_voronoi::{Bounds, Delaunay};
//!
//! let delaunay = Delaunay::new(vec![10.0, 10.0, 20.0, 10.0]).unwrap();
//! let voronoi = delaunay.voronoi(Bounds::new(0.0, 0.0, 30.0, 20.0).unwrap());
//!
//! assert_eq!(voronoi.render_path().as_deref(), Some("M15,10L15,0M15,10L15,20"));
//! assert!(voronoi.contains(0, 5.0, 5.0));
//! assert!(!voronoi.contains(0, 25.0, 5.0));
//! ```

use super::{next_halfedge, Delaunay, EMPTY};
use crate::bounds::{Bounds, X_MAX, X_MIN, Y_MAX, Y_MIN};
use crate::error::DelaunayError;
use crate::io::{Context, Path, PolygonContext};
use crate::primitives::Point2;

/// Triangles with doubled area below this get a far-away circumcenter.
const DEGENERATE_AREA: f64 = 1e-9;

/// Distance at which the circumcenter of a flat triangle is placed.
const FAR_AWAY: f64 = 1e9;

// Edge codes walked clockwise (on screen) around the rectangle.
const TOP_LEFT: u8 = Y_MIN | X_MIN;
const TOP: u8 = Y_MIN;
const TOP_RIGHT: u8 = Y_MIN | X_MAX;
const RIGHT: u8 = X_MAX;
const BOTTOM_RIGHT: u8 = Y_MAX | X_MAX;
const BOTTOM: u8 = Y_MAX;
const BOTTOM_LEFT: u8 = Y_MAX | X_MIN;
const LEFT: u8 = X_MIN;

/// A Voronoi diagram clipped to a rectangle.
///
/// Cells are returned as flat or point rings in the same winding as the
/// triangulation. A site whose cell misses the rectangle, or a coincident
/// duplicate of another site, has no cell.
#[derive(Debug, Clone)]
pub struct Voronoi {
    delaunay: Delaunay,
    bounds: Bounds,
    circumcenters: Vec<f64>,
    vectors: Vec<f64>,
}

impl Voronoi {
    /// Builds the diagram of `delaunay` clipped to `bounds`.
    pub fn new(delaunay: Delaunay, bounds: Bounds) -> Self {
        let mut voronoi = Self {
            delaunay,
            bounds,
            circumcenters: Vec::new(),
            vectors: Vec::new(),
        };
        voronoi.init();
        voronoi
    }

    /// Builds the diagram clipped to `[xmin, xmax] × [ymin, ymax]`.
    ///
    /// # Errors
    ///
    /// Returns [`DelaunayError::InvalidBounds`] if the extents are inverted or
    /// NaN.
    pub fn with_bounds(
        delaunay: Delaunay,
        xmin: f64,
        ymin: f64,
        xmax: f64,
        ymax: f64,
    ) -> Result<Self, DelaunayError> {
        Ok(Self::new(delaunay, Bounds::new(xmin, ymin, xmax, ymax)?))
    }

    /// Rebuilds the triangulation and the diagram after the points were
    /// mutated through [`delaunay_mut`](Self::delaunay_mut).
    pub fn update(&mut self) -> Result<(), DelaunayError> {
        self.delaunay.update()?;
        self.init();
        Ok(())
    }

    fn init(&mut self) {
        let coords = self.delaunay.mesh_coords();
        let hull = self.delaunay.hull();

        self.circumcenters.clear();
        let mut centroid = None;
        for t in self.delaunay.triangles().chunks_exact(3) {
            if t.contains(&EMPTY) {
                self.circumcenters.extend([f64::NAN, f64::NAN]);
                continue;
            }
            let (x1, y1) = (coords[2 * t[0]], coords[2 * t[0] + 1]);
            let (x2, y2) = (coords[2 * t[1]], coords[2 * t[1] + 1]);
            let (x3, y3) = (coords[2 * t[2]], coords[2 * t[2] + 1]);

            let dx = x2 - x1;
            let dy = y2 - y1;
            let ex = x3 - x1;
            let ey = y3 - y1;
            let ab = (dx * ey - dy * ex) * 2.0;

            let (x, y) = if ab.abs() < DEGENERATE_AREA {
                // push the center away from the hull interior
                let (bx, by) = *centroid.get_or_insert_with(|| hull_centroid(coords, hull));
                let a = FAR_AWAY * sign((bx - x1) * ey - (by - y1) * ex);
                ((x1 + x3) / 2.0 - a * ey, (y1 + y3) / 2.0 + a * ex)
            } else {
                let d = 1.0 / ab;
                let bl = dx * dx + dy * dy;
                let cl = ex * ex + ey * ey;
                (x1 + (ey * bl - dy * cl) * d, y1 + (dx * cl - ex * bl) * d)
            };
            self.circumcenters.extend([x, y]);
        }

        self.vectors.clear();
        self.vectors.resize(4 * self.delaunay.len(), 0.0);
        let Some(&last) = hull.last() else {
            return;
        };
        let (mut p1, mut x1, mut y1) = (4 * last, coords[2 * last], coords[2 * last + 1]);
        for &h in hull {
            let (p0, x0, y0) = (p1, x1, y1);
            p1 = 4 * h;
            x1 = coords[2 * h];
            y1 = coords[2 * h + 1];
            self.vectors[p0 + 2] = y0 - y1;
            self.vectors[p1] = y0 - y1;
            self.vectors[p0 + 3] = x1 - x0;
            self.vectors[p1 + 1] = x1 - x0;
        }
    }

    /// The underlying triangulation.
    #[inline]
    pub fn delaunay(&self) -> &Delaunay {
        &self.delaunay
    }

    /// Mutable access to the triangulation, typically to move points before
    /// calling [`update`](Self::update).
    #[inline]
    pub fn delaunay_mut(&mut self) -> &mut Delaunay {
        &mut self.delaunay
    }

    /// Consumes the diagram and returns its triangulation.
    #[inline]
    pub fn into_delaunay(self) -> Delaunay {
        self.delaunay
    }

    /// The clip rectangle.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Circumcenter coordinates, `[x0, y0, x1, y1, …]` per triangle.
    #[inline]
    pub fn circumcenters(&self) -> &[f64] {
        &self.circumcenters
    }

    /// Ray directions per point: `[vx_in, vy_in, vx_out, vy_out]`, zero for
    /// interior points.
    #[inline]
    pub fn vectors(&self) -> &[f64] {
        &self.vectors
    }

    #[inline]
    fn circumcenter(&self, t: usize) -> (f64, f64) {
        (self.circumcenters[2 * t], self.circumcenters[2 * t + 1])
    }

    /// Draws every Voronoi edge and hull ray, clipped to the bounds.
    pub fn render<C: Context + ?Sized>(&self, context: &mut C) {
        let hull = self.delaunay.hull();
        if hull.len() <= 1 {
            return;
        }

        for (i, &j) in self.delaunay.halfedges().iter().enumerate() {
            if j == EMPTY || j < i {
                continue;
            }
            let (xi, yi) = self.circumcenter(i / 3);
            let (xj, yj) = self.circumcenter(j / 3);
            self.render_segment(xi, yi, xj, yj, context);
        }

        let inedges = self.delaunay.inedges();
        let mut h1 = hull[hull.len() - 1];
        for &h in hull {
            let h0 = h1;
            h1 = h;
            // unmeshed collinear points have no incoming half-edge
            let e = inedges[h1];
            if e == EMPTY {
                continue;
            }
            let (x, y) = self.circumcenter(e / 3);
            let v = 4 * h0;
            if let Some(p) = self
                .bounds
                .project(x, y, self.vectors[v + 2], self.vectors[v + 3])
            {
                self.render_segment(x, y, p.x, p.y, context);
            }
        }
    }

    /// [`render`](Self::render) as SVG path data.
    pub fn render_path(&self) -> Option<String> {
        let mut path = Path::new();
        self.render(&mut path);
        path.into_value()
    }

    /// Draws the clip rectangle.
    pub fn render_bounds<C: Context + ?Sized>(&self, context: &mut C) {
        let b = &self.bounds;
        context.rect(b.xmin(), b.ymin(), b.width(), b.height());
    }

    /// [`render_bounds`](Self::render_bounds) as SVG path data.
    pub fn render_bounds_path(&self) -> Option<String> {
        let mut path = Path::new();
        self.render_bounds(&mut path);
        path.into_value()
    }

    fn render_segment<C: Context + ?Sized>(&self, x0: f64, y0: f64, x1: f64, y1: f64, context: &mut C) {
        let c0 = self.bounds.region_code(x0, y0);
        let c1 = self.bounds.region_code(x1, y1);
        if c0 == 0 && c1 == 0 {
            context.move_to(x0, y0);
            context.line_to(x1, y1);
        } else if let Some([sx0, sy0, sx1, sy1]) = self.bounds.clip_segment(x0, y0, x1, y1, c0, c1) {
            context.move_to(sx0, sy0);
            context.line_to(sx1, sy1);
        }
    }

    /// Draws the clipped cell of site `i` as a closed polygon, skipping
    /// repeated vertices. Draws nothing if the site has no cell.
    pub fn render_cell<C: Context + ?Sized>(&self, i: usize, context: &mut C) {
        let Some(points) = self.clip(i) else {
            return;
        };
        context.move_to(points[0], points[1]);
        let mut n = points.len();
        while n >= 2 && points[0] == points[n - 2] && points[1] == points[n - 1] {
            n -= 2;
        }
        for k in (2..n).step_by(2) {
            if points[k] != points[k - 2] || points[k + 1] != points[k - 1] {
                context.line_to(points[k], points[k + 1]);
            }
        }
        context.close_path();
    }

    /// [`render_cell`](Self::render_cell) as SVG path data.
    pub fn render_cell_path(&self, i: usize) -> Option<String> {
        let mut path = Path::new();
        self.render_cell(i, &mut path);
        path.into_value()
    }

    /// The clipped cell of site `i` as a closed ring.
    pub fn cell_polygon(&self, i: usize) -> Option<Vec<Point2<f64>>> {
        let mut polygon = PolygonContext::new();
        self.render_cell(i, &mut polygon);
        polygon.value()
    }

    /// Every non-empty cell with its site index.
    pub fn cell_polygons(&self) -> impl Iterator<Item = (usize, Vec<Point2<f64>>)> + '_ {
        (0..self.delaunay.len()).filter_map(move |i| self.cell_polygon(i).map(|cell| (i, cell)))
    }

    /// Returns `true` if `(x, y)` is closer to site `i` than to any other
    /// site. Ties may go either way.
    pub fn contains(&self, i: usize, x: f64, y: f64) -> bool {
        if x.is_nan() || y.is_nan() || i >= self.delaunay.len() {
            return false;
        }
        self.delaunay.step(i, x, y) == i
    }

    /// Sites whose clipped cells share an edge with the cell of site `i`.
    ///
    /// A subset of the Delaunay neighbors: two sites whose shared Voronoi
    /// edge falls outside the bounds are not neighbors here.
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        let ci = self.clip(i);
        self.delaunay.neighbors(i).filter(move |&j| {
            ci.as_deref()
                .is_some_and(|ci| self.clip(j).is_some_and(|cj| shares_edge(ci, &cj)))
        })
    }

    /// Circumcenters around site `i`, or `None` for a coincident duplicate.
    fn cell(&self, i: usize) -> Option<Vec<f64>> {
        let inedges = self.delaunay.inedges();
        let triangles = self.delaunay.triangles();
        let halfedges = self.delaunay.halfedges();

        let e0 = inedges.get(i).copied().filter(|&e| e != EMPTY)?;
        let mut points = Vec::new();
        let mut e = e0;
        loop {
            let (x, y) = self.circumcenter(e / 3);
            points.extend([x, y]);
            e = next_halfedge(e);
            if triangles[e] != i {
                break;
            }
            e = halfedges[e];
            if e == e0 || e == EMPTY {
                break;
            }
        }
        Some(points)
    }

    /// The cell of site `i` clipped to the bounds, as flat coordinates.
    fn clip(&self, i: usize) -> Option<Vec<f64>> {
        let hull = self.delaunay.hull();
        if hull.len() == 1 && hull[0] == i {
            let b = &self.bounds;
            return Some(vec![
                b.xmax(),
                b.ymin(),
                b.xmax(),
                b.ymax(),
                b.xmin(),
                b.ymax(),
                b.xmin(),
                b.ymin(),
            ]);
        }

        let points = self.cell(i)?;
        let v = &self.vectors[4 * i..4 * i + 4];
        let clipped = if v[0] != 0.0 || v[1] != 0.0 {
            self.clip_infinite(i, &points, v[0], v[1], v[2], v[3])
        } else {
            self.clip_finite(i, &points)
        };
        simplify(clipped?)
    }

    fn clip_finite(&self, i: usize, points: &[f64]) -> Option<Vec<f64>> {
        let b = &self.bounds;
        let n = points.len();
        if n < 2 {
            return None;
        }

        let mut clipped = Vec::new();
        let (mut x1, mut y1) = (points[n - 2], points[n - 1]);
        let mut c1 = b.region_code(x1, y1);
        let mut e1 = 0;
        for j in (0..n).step_by(2) {
            let (x0, y0) = (x1, y1);
            x1 = points[j];
            y1 = points[j + 1];
            let c0 = c1;
            c1 = b.region_code(x1, y1);

            if c0 == 0 && c1 == 0 {
                e1 = 0;
                clipped.extend([x1, y1]);
                continue;
            }

            let (sx1, sy1) = if c0 == 0 {
                let Some([_, _, sx1, sy1]) = b.clip_segment(x0, y0, x1, y1, c0, c1) else {
                    continue;
                };
                (sx1, sy1)
            } else {
                let Some([sx1, sy1, sx0, sy0]) = b.clip_segment(x1, y1, x0, y0, c1, c0) else {
                    continue;
                };
                let e0 = e1;
                e1 = b.edge_code(sx0, sy0);
                if e0 != 0 && e1 != 0 {
                    let len = clipped.len();
                    self.edge(i, e0, e1, &mut clipped, len);
                }
                clipped.extend([sx0, sy0]);
                (sx1, sy1)
            };

            let e0 = e1;
            e1 = b.edge_code(sx1, sy1);
            if e0 != 0 && e1 != 0 {
                let len = clipped.len();
                self.edge(i, e0, e1, &mut clipped, len);
            }
            clipped.extend([sx1, sy1]);
        }

        if !clipped.is_empty() {
            let e0 = e1;
            e1 = b.edge_code(clipped[0], clipped[1]);
            if e0 != 0 && e1 != 0 {
                let len = clipped.len();
                self.edge(i, e0, e1, &mut clipped, len);
            }
            Some(clipped)
        } else if self.contains(i, b.center().x, b.center().y) {
            Some(vec![
                b.xmax(),
                b.ymin(),
                b.xmax(),
                b.ymax(),
                b.xmin(),
                b.ymax(),
                b.xmin(),
                b.ymin(),
            ])
        } else {
            None
        }
    }

    fn clip_infinite(
        &self,
        i: usize,
        points: &[f64],
        vx0: f64,
        vy0: f64,
        vxn: f64,
        vyn: f64,
    ) -> Option<Vec<f64>> {
        let b = &self.bounds;
        let mut extended = Vec::with_capacity(points.len() + 4);
        if let Some(p) = b.project(points[0], points[1], vx0, vy0) {
            extended.extend([p.x, p.y]);
        }
        extended.extend_from_slice(points);
        let n = points.len();
        if let Some(p) = b.project(points[n - 2], points[n - 1], vxn, vyn) {
            extended.extend([p.x, p.y]);
        }

        let mut clipped = self.clip_finite(i, &extended)?;
        let mut n = clipped.len();
        let mut c1 = b.edge_code(clipped[n - 2], clipped[n - 1]);
        let mut j = 0;
        while j < n {
            let c0 = c1;
            c1 = b.edge_code(clipped[j], clipped[j + 1]);
            if c0 != 0 && c1 != 0 {
                j = self.edge(i, c0, c1, &mut clipped, j);
                n = clipped.len();
            }
            j += 2;
        }
        Some(clipped)
    }

    /// Inserts the rectangle corners passed when walking from edge code `e0`
    /// to `e1`, at index `j`. Returns the index after the inserted corners.
    fn edge(&self, i: usize, mut e0: u8, e1: u8, points: &mut Vec<f64>, mut j: usize) -> usize {
        let b = &self.bounds;
        while e0 != e1 {
            let (next, corner) = match e0 {
                TOP_LEFT => (TOP, None),
                TOP => (TOP_RIGHT, Some((b.xmax(), b.ymin()))),
                TOP_RIGHT => (RIGHT, None),
                RIGHT => (BOTTOM_RIGHT, Some((b.xmax(), b.ymax()))),
                BOTTOM_RIGHT => (BOTTOM, None),
                BOTTOM => (BOTTOM_LEFT, Some((b.xmin(), b.ymax()))),
                BOTTOM_LEFT => (LEFT, None),
                LEFT => (TOP_LEFT, Some((b.xmin(), b.ymin()))),
                _ => break,
            };
            e0 = next;
            let Some((x, y)) = corner else {
                continue;
            };
            if (points.get(j) != Some(&x) || points.get(j + 1) != Some(&y)) && self.contains(i, x, y) {
                points.splice(j..j, [x, y]);
                j += 2;
            }
        }
        j
    }
}

/// Drops the middle of every three consecutive vertices sharing an x or a y.
fn simplify(mut points: Vec<f64>) -> Option<Vec<f64>> {
    if points.len() > 4 {
        let mut i = 0;
        while i < points.len() {
            let n = points.len();
            let j = (i + 2) % n;
            let k = (i + 4) % n;
            if points[i] == points[j] && points[j] == points[k]
                || points[i + 1] == points[j + 1] && points[j + 1] == points[k + 1]
            {
                points.drain(j..j + 2);
            } else {
                i += 2;
            }
        }
    }
    if points.is_empty() {
        None
    } else {
        Some(points)
    }
}

/// Returns `true` if ring `a` has an edge that appears reversed in ring `b`.
fn shares_edge(a: &[f64], b: &[f64]) -> bool {
    let (la, lb) = (a.len(), b.len());
    (0..la).step_by(2).any(|ai| {
        (0..lb).step_by(2).any(|bi| {
            a[ai] == b[bi]
                && a[ai + 1] == b[bi + 1]
                && a[(ai + 2) % la] == b[(bi + lb - 2) % lb]
                && a[(ai + 3) % la] == b[(bi + lb - 1) % lb]
        })
    })
}

fn hull_centroid(coords: &[f64], hull: &[usize]) -> (f64, f64) {
    let (sx, sy) = hull
        .iter()
        .fold((0.0, 0.0), |(sx, sy), &h| (sx + coords[2 * h], sy + coords[2 * h + 1]));
    let n = hull.len() as f64;
    (sx / n, sy / n)
}

/// Sign of `v` as -1, 0 or 1.
#[inline]
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
