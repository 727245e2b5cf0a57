//! Voronoi cells checked against brute-force nearest-site queries.

use delaunay_voronoi::{Bounds, Delaunay, Point2, Voronoi};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_tracing() {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

fn random_voronoi(seed: u64, n: usize) -> Voronoi {
    let mut rng = StdRng::seed_from_u64(seed);
    let bounds = Bounds::default();
    let coords: Vec<f64> = (0..n)
        .flat_map(|_| {
            [
                f64::from(rng.random_range(0..bounds.xmax() as i32)),
                f64::from(rng.random_range(0..bounds.ymax() as i32)),
            ]
        })
        .collect();
    Delaunay::new(coords).unwrap().voronoi(bounds)
}

/// Sites sorted by distance to `(x, y)`, nearest first.
fn nearest_sites(points: &[f64], x: f64, y: f64) -> Vec<(f64, usize)> {
    let mut sites: Vec<(f64, usize)> = points
        .chunks_exact(2)
        .enumerate()
        .map(|(i, p)| ((p[0] - x).powi(2) + (p[1] - y).powi(2), i))
        .collect();
    sites.sort_by(|a, b| a.0.total_cmp(&b.0));
    sites
}

fn ring_area(ring: &[Point2<f64>]) -> f64 {
    ring.windows(2)
        .map(|w| w[0].x * w[1].y - w[1].x * w[0].y)
        .sum::<f64>()
        / 2.0
}

#[test]
fn test_contains_agrees_with_nearest_site() {
    init_tracing();
    let voronoi = random_voronoi(42, 100);
    let points = voronoi.delaunay().points().to_vec();

    let mut y = 0.5;
    while y < 500.0 {
        let mut x = 0.5;
        while x < 960.0 {
            let sites = nearest_sites(&points, x, y);
            if sites[0].0 < sites[1].0 {
                let nearest = sites[0].1;
                for i in 0..voronoi.delaunay().len() {
                    assert_eq!(
                        voronoi.contains(i, x, y),
                        i == nearest,
                        "site {i} at ({x}, {y}), nearest is {nearest}"
                    );
                }
            }
            x += 13.0;
        }
        y += 13.0;
    }
}

#[test]
fn test_cells_stay_within_bounds() {
    init_tracing();
    let voronoi = random_voronoi(7, 200);
    let b = voronoi.bounds();
    for (i, cell) in voronoi.cell_polygons() {
        assert!(cell.len() >= 4, "cell {i} has {} vertices", cell.len());
        assert_eq!(cell.first(), cell.last());
        for p in &cell {
            assert!(b.contains(p.x, p.y), "cell {i} leaves the bounds at {p}");
        }
    }
}

#[test]
fn test_cells_tile_the_bounds() {
    init_tracing();
    let voronoi = random_voronoi(2718, 150);
    let b = voronoi.bounds();
    let total: f64 = voronoi
        .cell_polygons()
        .map(|(_, cell)| ring_area(&cell).abs())
        .sum();
    let expected = b.width() * b.height();
    assert!(
        ((total - expected) / expected).abs() < 1e-9,
        "cells cover {total}, bounds cover {expected}"
    );
}

#[test]
fn test_cell_polygon_encloses_its_site() {
    init_tracing();
    let voronoi = random_voronoi(31, 80);
    let points = voronoi.delaunay().points();
    for (i, cell) in voronoi.cell_polygons() {
        let (x, y) = (points[2 * i], points[2 * i + 1]);
        let xs = cell.iter().map(|p| p.x);
        let (min_x, max_x) = xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        let ys = cell.iter().map(|p| p.y);
        let (min_y, max_y) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        assert!(min_x <= x && x <= max_x && min_y <= y && y <= max_y, "site {i} outside its cell");
    }
}

#[test]
fn test_voronoi_neighbors_are_delaunay_neighbors() {
    init_tracing();
    let voronoi = random_voronoi(11, 120);
    for i in 0..voronoi.delaunay().len() {
        for j in voronoi.neighbors(i) {
            assert!(voronoi.delaunay().neighbors(i).any(|k| k == j));
        }
    }
}

#[test]
fn test_update_after_moving_sites() {
    init_tracing();
    let mut voronoi = random_voronoi(3, 60);
    for v in voronoi.delaunay_mut().points_mut().chunks_exact_mut(2) {
        v[0] = 959.0 - v[0];
    }
    voronoi.update().unwrap();

    let points = voronoi.delaunay().points().to_vec();
    for (x, y) in [(100.5, 100.5), (480.5, 250.5), (900.5, 20.5)] {
        let sites = nearest_sites(&points, x, y);
        if sites[0].0 < sites[1].0 {
            assert!(voronoi.contains(sites[0].1, x, y));
        }
    }
}

#[test]
fn test_default_bounds() {
    let b = Bounds::default();
    assert_eq!(b.as_array(), [0.0, 0.0, 960.0, 500.0]);
    let voronoi = Delaunay::new(vec![1.0, 1.0]).unwrap().voronoi(b);
    assert_eq!(voronoi.render_bounds_path().as_deref(), Some("M0,0h960v500h-960Z"));
    assert_eq!(
        voronoi.render_cell_path(0).as_deref(),
        Some("M960,0L960,500L0,500L0,0Z")
    );
}
