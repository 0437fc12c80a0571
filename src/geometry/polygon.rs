//! Polygon Primitives
//!
//! Area, centroid, containment, and signed-distance queries over simple
//! (non-self-intersecting) polygons. Vertices are ordered `(x, y)` pairs
//! in either winding order; the closing edge from the last vertex back
//! to the first is implicit.

use crate::geometry::{distance, distance_sq};
use crate::{Error, Result};

/// Signed area below which a polygon is considered degenerate.
const DEGENERATE_AREA_EPS: f64 = 1e-9;

/// Shoelace area of a simple polygon, as a non-negative magnitude.
pub fn polygon_area(vertices: &[(f64, f64)]) -> f64 {
    signed_area(vertices).abs()
}

fn signed_area(vertices: &[(f64, f64)]) -> f64 {
    let n = vertices.len();
    if n < 3 {
        return 0.0;
    }
    let mut area = 0.0;
    for i in 0..n {
        let (x0, y0) = vertices[i];
        let (x1, y1) = vertices[(i + 1) % n];
        area += x0 * y1 - x1 * y0;
    }
    area / 2.0
}

/// Shoelace-weighted centroid of a simple polygon.
///
/// Robust for any simple polygon regardless of winding. Returns a
/// `Computation` error when the signed area is too close to zero
/// (collinear or repeated vertices).
pub fn polygon_centroid(vertices: &[(f64, f64)]) -> Result<(f64, f64)> {
    let n = vertices.len();
    if n < 3 {
        return Err(Error::Input(format!(
            "polygon needs at least 3 vertices, got {n}"
        )));
    }
    let area = signed_area(vertices);
    if area.abs() < DEGENERATE_AREA_EPS {
        return Err(Error::Computation(
            "cannot compute centroid of a degenerate polygon".to_string(),
        ));
    }
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let (x0, y0) = vertices[i];
        let (x1, y1) = vertices[(i + 1) % n];
        let cross = x0 * y1 - x1 * y0;
        cx += (x0 + x1) * cross;
        cy += (y0 + y1) * cross;
    }
    Ok((cx / (6.0 * area), cy / (6.0 * area)))
}

/// Even-odd ray-casting containment test.
///
/// Points exactly on an edge are implementation-defined but consistent:
/// the same point against the same polygon always yields the same answer.
pub fn point_in_polygon(vertices: &[(f64, f64)], x: f64, y: f64) -> bool {
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (xi, yi) = vertices[i];
        let (xj, yj) = vertices[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Closest point on the segment `(x0, y0)-(x1, y1)` to the query point.
pub fn closest_point_on_segment(
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    x: f64,
    y: f64,
) -> (f64, f64) {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len_sq = dx * dx + dy * dy;
    if len_sq < 1e-12 {
        // Segment is a point.
        return (x0, y0);
    }
    let t = (((x - x0) * dx + (y - y0) * dy) / len_sq).clamp(0.0, 1.0);
    (x0 + t * dx, y0 + t * dy)
}

/// Closest point on the polygon boundary to the query point.
///
/// Scans every edge and keeps the minimum squared distance; ties resolve
/// to the first-encountered edge in vertex order.
pub fn closest_point_on_polygon(vertices: &[(f64, f64)], x: f64, y: f64) -> (f64, f64) {
    let n = vertices.len();
    let mut best_d2 = f64::INFINITY;
    let mut best = (0.0, 0.0);
    for i in 0..n {
        let (x0, y0) = vertices[i];
        let (x1, y1) = vertices[(i + 1) % n];
        let candidate = closest_point_on_segment(x0, y0, x1, y1, x, y);
        let d2 = distance_sq(x, y, candidate.0, candidate.1);
        if d2 < best_d2 {
            best_d2 = d2;
            best = candidate;
        }
    }
    best
}

/// Signed distance from a point to the polygon boundary.
///
/// Distance to the nearest boundary point, negated when the point is
/// inside (containment convention: inside is negative).
pub fn signed_distance(vertices: &[(f64, f64)], x: f64, y: f64) -> f64 {
    let (cx, cy) = closest_point_on_polygon(vertices, x, y);
    let d = distance(x, y, cx, cy);
    if point_in_polygon(vertices, x, y) {
        -d
    } else {
        d
    }
}
