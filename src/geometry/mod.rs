//! Geometry Kernel
//!
//! Distance metrics, the smooth-falloff intensity kernel, and value
//! remapping. All computation is `f64` throughout to avoid pixel-grid
//! bias when samples land between cells.

pub mod polygon;

pub use polygon::{
    closest_point_on_polygon, closest_point_on_segment, point_in_polygon, polygon_area,
    polygon_centroid, signed_distance,
};

/// Euclidean distance between two points.
pub fn distance(x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    distance_sq(x0, y0, x1, y1).sqrt()
}

/// Squared Euclidean distance between two points.
pub fn distance_sq(x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    let dx = x1 - x0;
    let dy = y1 - y0;
    dx * dx + dy * dy
}

/// Cubic smoothstep of `x` over `[edge0, edge1]`.
pub fn smooth_step(edge0: f64, edge1: f64, x: f64) -> f64 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Intensity contribution of a gaze sample at distance `d`.
///
/// Inverted cubic smoothstep over `[0, radius]`: returns 1 at `d = 0`,
/// 0 at `d >= radius`, monotonically non-increasing in between.
pub fn smooth_falloff(radius: f64, d: f64) -> f64 {
    if radius <= 0.0 {
        // Degenerate kernel: all weight at the center cell.
        return if d <= 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - smooth_step(0.0, radius, d)
}

/// Linearly remap `value` from `[old_lo, old_hi]` to `[new_lo, new_hi]`.
///
/// Ranges may be descending; no clamping is applied.
pub fn remap(value: f64, old_lo: f64, old_hi: f64, new_lo: f64, new_hi: f64) -> f64 {
    (value - old_lo) * (new_hi - new_lo) / (old_hi - old_lo) + new_lo
}
