//! Axis-aligned clip rectangle.

use crate::error::DelaunayError;
use crate::primitives::Point2;

/// Region code bit: left of `xmin`.
pub const X_MIN: u8 = 0b0001;
/// Region code bit: right of `xmax`.
pub const X_MAX: u8 = 0b0010;
/// Region code bit: below `ymin` (the top edge on screen).
pub const Y_MIN: u8 = 0b0100;
/// Region code bit: above `ymax` (the bottom edge on screen).
pub const Y_MAX: u8 = 0b1000;

/// Default viewport width.
const DEFAULT_WIDTH: f64 = 960.0;
/// Default viewport height.
const DEFAULT_HEIGHT: f64 = 500.0;

/// A clip rectangle `[xmin, xmax] × [ymin, ymax]`.
///
/// Always satisfies `xmin <= xmax` and `ymin <= ymax`; a degenerate
/// rectangle of zero width or height is allowed.
///
/// # Example
///
/// ```
/// use delaunay_voronoi::Bounds;
///
/// let b = Bounds::default();
/// assert_eq!(b.as_array(), [0.0, 0.0, 960.0, 500.0]);
///
/// assert!(Bounds::new(10.0, 0.0, 0.0, 10.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            xmin: 0.0,
            ymin: 0.0,
            xmax: DEFAULT_WIDTH,
            ymax: DEFAULT_HEIGHT,
        }
    }
}

impl Bounds {
    /// Creates a rectangle from its extents.
    ///
    /// # Errors
    ///
    /// Returns [`DelaunayError::InvalidBounds`] if `xmax < xmin`,
    /// `ymax < ymin`, or any extent is NaN.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self, DelaunayError> {
        if !(xmax >= xmin) || !(ymax >= ymin) {
            return Err(DelaunayError::InvalidBounds {
                xmin,
                ymin,
                xmax,
                ymax,
            });
        }
        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    /// Left edge.
    #[inline]
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    /// Top edge.
    #[inline]
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    /// Right edge.
    #[inline]
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    /// Bottom edge.
    #[inline]
    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    /// `[xmin, ymin, xmax, ymax]`.
    #[inline]
    pub fn as_array(&self) -> [f64; 4] {
        [self.xmin, self.ymin, self.xmax, self.ymax]
    }

    /// `xmax - xmin`.
    #[inline]
    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    /// `ymax - ymin`.
    #[inline]
    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    /// Center of the rectangle.
    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            (self.xmin + self.xmax) / 2.0,
            (self.ymin + self.ymax) / 2.0,
        )
    }

    /// Returns `true` if `(x, y)` lies inside or on the boundary.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        self.region_code(x, y) == 0 && !x.is_nan() && !y.is_nan()
    }

    /// Cohen–Sutherland region code: which sides of the rectangle `(x, y)`
    /// lies beyond. Zero means inside or on the boundary.
    #[inline]
    pub fn region_code(&self, x: f64, y: f64) -> u8 {
        let cx = if x < self.xmin {
            X_MIN
        } else if x > self.xmax {
            X_MAX
        } else {
            0
        };
        let cy = if y < self.ymin {
            Y_MIN
        } else if y > self.ymax {
            Y_MAX
        } else {
            0
        };
        cx | cy
    }

    /// Which sides of the rectangle `(x, y)` lies exactly on.
    ///
    /// Corners set two bits; interior and exterior points yield zero.
    #[inline]
    pub fn edge_code(&self, x: f64, y: f64) -> u8 {
        let cx = if x == self.xmin {
            X_MIN
        } else if x == self.xmax {
            X_MAX
        } else {
            0
        };
        let cy = if y == self.ymin {
            Y_MIN
        } else if y == self.ymax {
            Y_MAX
        } else {
            0
        };
        cx | cy
    }

    /// Clips the segment `(x0, y0)–(x1, y1)` to the rectangle.
    ///
    /// Returns the clipped endpoints in input order, or `None` if the segment
    /// misses the rectangle.
    pub fn clip_line(&self, x0: f64, y0: f64, x1: f64, y1: f64) -> Option<[f64; 4]> {
        let c0 = self.region_code(x0, y0);
        let c1 = self.region_code(x1, y1);
        self.clip_segment(x0, y0, x1, y1, c0, c1)
    }

    /// Cohen–Sutherland clipping with precomputed region codes.
    ///
    /// The segment is always processed in the same direction regardless of
    /// argument order, so both orientations clip to identical endpoints.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn clip_segment(
        &self,
        mut x0: f64,
        mut y0: f64,
        mut x1: f64,
        mut y1: f64,
        mut c0: u8,
        mut c1: u8,
    ) -> Option<[f64; 4]> {
        let flip = c0 < c1;
        if flip {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
            std::mem::swap(&mut c0, &mut c1);
        }

        loop {
            if c0 == 0 && c1 == 0 {
                return Some(if flip {
                    [x1, y1, x0, y0]
                } else {
                    [x0, y0, x1, y1]
                });
            }
            if c0 & c1 != 0 {
                return None;
            }

            let c = if c0 != 0 { c0 } else { c1 };
            let (x, y) = if c & Y_MAX != 0 {
                (x0 + (x1 - x0) * (self.ymax - y0) / (y1 - y0), self.ymax)
            } else if c & Y_MIN != 0 {
                (x0 + (x1 - x0) * (self.ymin - y0) / (y1 - y0), self.ymin)
            } else if c & X_MAX != 0 {
                (self.xmax, y0 + (y1 - y0) * (self.xmax - x0) / (x1 - x0))
            } else {
                (self.xmin, y0 + (y1 - y0) * (self.xmin - x0) / (x1 - x0))
            };

            if c0 != 0 {
                x0 = x;
                y0 = y;
                c0 = self.region_code(x0, y0);
            } else {
                x1 = x;
                y1 = y;
                c1 = self.region_code(x1, y1);
            }
        }
    }

    /// Where the ray from `(x0, y0)` along `(vx, vy)` leaves the rectangle.
    ///
    /// Returns `None` if the origin already lies on or beyond the side the
    /// ray points towards, or if the direction is zero.
    pub fn project(&self, x0: f64, y0: f64, vx: f64, vy: f64) -> Option<Point2<f64>> {
        let mut t = f64::INFINITY;
        let mut hit = None;

        if vy < 0.0 {
            if y0 <= self.ymin {
                return None;
            }
            let c = (self.ymin - y0) / vy;
            if c < t {
                t = c;
                hit = Some(Point2::new(x0 + t * vx, self.ymin));
            }
        } else if vy > 0.0 {
            if y0 >= self.ymax {
                return None;
            }
            let c = (self.ymax - y0) / vy;
            if c < t {
                t = c;
                hit = Some(Point2::new(x0 + t * vx, self.ymax));
            }
        }

        if vx > 0.0 {
            if x0 >= self.xmax {
                return None;
            }
            let c = (self.xmax - x0) / vx;
            if c < t {
                hit = Some(Point2::new(self.xmax, y0 + c * vy));
            }
        } else if vx < 0.0 {
            if x0 <= self.xmin {
                return None;
            }
            let c = (self.xmin - x0) / vx;
            if c < t {
                hit = Some(Point2::new(self.xmin, y0 + c * vy));
            }
        }

        hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit() -> Bounds {
        Bounds::new(0.0, 0.0, 10.0, 10.0).unwrap()
    }

    #[test]
    fn test_default_bounds() {
        let b = Bounds::default();
        assert_eq!(b.as_array(), [0.0, 0.0, 960.0, 500.0]);
        assert_eq!(b.width(), 960.0);
        assert_eq!(b.height(), 500.0);
        assert_eq!(b.center(), Point2::new(480.0, 250.0));
    }

    #[test]
    fn test_invalid_bounds() {
        assert!(Bounds::new(0.0, 0.0, -1.0, 1.0).is_err());
        assert!(Bounds::new(0.0, 0.0, 1.0, -1.0).is_err());
        assert!(Bounds::new(f64::NAN, 0.0, 1.0, 1.0).is_err());
        assert!(Bounds::new(0.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_region_code() {
        let b = unit();
        assert_eq!(b.region_code(5.0, 5.0), 0);
        assert_eq!(b.region_code(0.0, 10.0), 0);
        assert_eq!(b.region_code(-1.0, 5.0), X_MIN);
        assert_eq!(b.region_code(11.0, -1.0), X_MAX | Y_MIN);
        assert_eq!(b.region_code(5.0, 12.0), Y_MAX);
    }

    #[test]
    fn test_edge_code() {
        let b = unit();
        assert_eq!(b.edge_code(5.0, 5.0), 0);
        assert_eq!(b.edge_code(0.0, 5.0), X_MIN);
        assert_eq!(b.edge_code(10.0, 10.0), X_MAX | Y_MAX);
        assert_eq!(b.edge_code(0.0, 0.0), X_MIN | Y_MIN);
        assert_eq!(b.edge_code(-1.0, 5.0), 0);
    }

    #[test]
    fn test_contains() {
        let b = unit();
        assert!(b.contains(0.0, 0.0));
        assert!(b.contains(3.0, 7.0));
        assert!(!b.contains(10.5, 7.0));
        assert!(!b.contains(f64::NAN, 7.0));
    }

    #[test]
    fn test_clip_line_inside() {
        assert_eq!(unit().clip_line(1.0, 2.0, 3.0, 4.0), Some([1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn test_clip_line_crossing() {
        let s = unit().clip_line(-5.0, 5.0, 15.0, 5.0).unwrap();
        assert_eq!(s, [0.0, 5.0, 10.0, 5.0]);
        let r = unit().clip_line(15.0, 5.0, -5.0, 5.0).unwrap();
        assert_eq!(r, [10.0, 5.0, 0.0, 5.0]);
    }

    #[test]
    fn test_clip_line_diagonal() {
        let s = unit().clip_line(-5.0, -5.0, 5.0, 5.0).unwrap();
        assert_relative_eq!(s[0], 0.0);
        assert_relative_eq!(s[1], 0.0);
        assert_eq!(&s[2..], &[5.0, 5.0]);
    }

    #[test]
    fn test_clip_line_outside() {
        assert_eq!(unit().clip_line(-5.0, -5.0, -1.0, 20.0), None);
        assert_eq!(unit().clip_line(11.0, 0.0, 20.0, 5.0), None);
    }

    #[test]
    fn test_project() {
        let b = unit();
        assert_eq!(b.project(5.0, 5.0, 1.0, 0.0), Some(Point2::new(10.0, 5.0)));
        assert_eq!(b.project(5.0, 5.0, 0.0, -2.0), Some(Point2::new(5.0, 0.0)));
        // leaves through the nearer side
        assert_eq!(b.project(5.0, 8.0, 1.0, 1.0), Some(Point2::new(7.0, 10.0)));
        assert_eq!(b.project(10.0, 5.0, 1.0, 0.0), None);
        assert_eq!(b.project(5.0, 5.0, 0.0, 0.0), None);
    }

    #[test]
    fn test_project_from_outside_towards_box() {
        let b = unit();
        // origin left of the box heading right: exits through xmax
        assert_eq!(b.project(-5.0, 5.0, 1.0, 0.0), Some(Point2::new(10.0, 5.0)));
    }
}
