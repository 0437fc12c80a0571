//! Drawing Primitives
//!
//! Line stroking, disc stamping, and polygon outline/fill on a raster.
//! Lines are walked with a DDA step and stamped with a round brush,
//! which gives consistent joints for polyline rendering.

use crate::color::Rgba;
use crate::geometry::{distance_sq, point_in_polygon};
use crate::render::RasterImage;

/// Stamp a filled disc centered at `(cx, cy)`, overwriting pixels.
pub fn fill_disc(img: &mut RasterImage, cx: f64, cy: f64, radius: f64, color: Rgba) {
    if radius <= 0.5 {
        img.set_pixel(cx.round() as i64, cy.round() as i64, color);
        return;
    }
    let r = radius.ceil() as i64;
    let x0 = cx.round() as i64 - r;
    let y0 = cy.round() as i64 - r;
    let r2 = radius * radius;
    for y in y0..=(y0 + 2 * r) {
        for x in x0..=(x0 + 2 * r) {
            if distance_sq(cx, cy, x as f64, y as f64) <= r2 {
                img.set_pixel(x, y, color);
            }
        }
    }
}

/// Stroke a line segment with a round brush of the given width.
pub fn stroke_line(
    img: &mut RasterImage,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    color: Rgba,
    width: f64,
) {
    if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
        return;
    }
    let dx = x1 - x0;
    let dy = y1 - y0;
    let steps = dx.abs().max(dy.abs()).ceil().max(1.0) as usize;
    let radius = (width / 2.0).max(0.0);
    for s in 0..=steps {
        let t = s as f64 / steps as f64;
        fill_disc(img, x0 + dx * t, y0 + dy * t, radius, color);
    }
}

/// Stroke every edge of a closed polygon.
pub fn stroke_polygon(img: &mut RasterImage, vertices: &[(f64, f64)], color: Rgba, width: f64) {
    let n = vertices.len();
    if n < 2 {
        return;
    }
    for i in 0..n {
        let (x0, y0) = vertices[i];
        let (x1, y1) = vertices[(i + 1) % n];
        stroke_line(img, x0, y0, x1, y1, color, width);
    }
}

/// Fill a polygon interior (even-odd rule), alpha-blending over the
/// existing pixels so a low-opacity fill composes with what is below.
pub fn fill_polygon(img: &mut RasterImage, vertices: &[(f64, f64)], color: Rgba) {
    if vertices.len() < 3 {
        return;
    }
    let min_x = vertices.iter().map(|v| v.0).fold(f64::INFINITY, f64::min);
    let max_x = vertices.iter().map(|v| v.0).fold(f64::NEG_INFINITY, f64::max);
    let min_y = vertices.iter().map(|v| v.1).fold(f64::INFINITY, f64::min);
    let max_y = vertices.iter().map(|v| v.1).fold(f64::NEG_INFINITY, f64::max);
    if !(min_x.is_finite() && max_x.is_finite() && min_y.is_finite() && max_y.is_finite()) {
        return;
    }

    let x0 = (min_x.floor() as i64).max(0);
    let x1 = (max_x.ceil() as i64).min(img.width() as i64 - 1);
    let y0 = (min_y.floor() as i64).max(0);
    let y1 = (max_y.ceil() as i64).min(img.height() as i64 - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            if point_in_polygon(vertices, x as f64, y as f64) {
                img.blend_pixel(x, y, color);
            }
        }
    }
}
