//! delaunay-voronoi - Planar Delaunay triangulation and clipped Voronoi diagrams
//!
//! A sweep-hull triangulator over flat `[x0, y0, x1, y1, …]` coordinates, a
//! query layer for nearest-point search and neighbor walks, and Voronoi cells
//! clipped to a rectangle. Orientation tests are exact in sign, so the mesh
//! stays consistent on near-degenerate input.
//!
//! ```
//! use delaunay_voronoi::{Bounds, Delaunay};
//!
//! let delaunay = Delaunay::new(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
//! assert_eq!(delaunay.find(0.9, 0.8, 0), Some(3));
//!
//! let voronoi = delaunay.voronoi(Bounds::new(0.0, 0.0, 1.0, 1.0).unwrap());
//! assert_eq!(voronoi.cell_polygons().count(), 4);
//! ```

pub mod bounds;
pub mod error;
pub mod io;
pub mod predicates;
pub mod primitives;
pub mod triangulation;

pub use bounds::Bounds;
pub use error::DelaunayError;
pub use io::{Context, Path, PolygonContext};
pub use predicates::{orient2d, Orientation};
pub use primitives::Point2;
pub use triangulation::{CollinearOptions, Delaunator, Delaunay, Voronoi, EMPTY};
