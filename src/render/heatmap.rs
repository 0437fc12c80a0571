//! Heatmap Renderers
//!
//! Turn an accumulated density field into an RGBA image. Every variant
//! normalizes against the field maximum; a field whose maximum is zero
//! (empty or fully skipped input) renders as the zero-value color with
//! no division taking place.

use crate::color::{ease_out_expo, hsb_to_rgba, ColorScale};
use crate::field::{compute_bounds, ScalarField};
use crate::geometry::remap;
use crate::render::RasterImage;

fn field_max(field: &ScalarField) -> f64 {
    compute_bounds(field.data())
        .map(|b| b.max_val as f64)
        .unwrap_or(0.0)
}

/// Opaque grayscale map: cell intensity relative to the field maximum,
/// rounded to the nearest 8-bit level.
pub fn grayscale_map(field: &ScalarField) -> RasterImage {
    let max = field_max(field);
    let mut img = RasterImage::new(field.width(), field.height());

    for (cell, px) in field.data().iter().zip(img.pixels_mut().chunks_exact_mut(4)) {
        let t = if max > 0.0 { *cell as f64 / max } else { 0.0 };
        let c = (t * 255.0 + 0.5).floor().clamp(0.0, 255.0) as u8;
        px[0] = c;
        px[1] = c;
        px[2] = c;
        px[3] = 255;
    }
    img
}

/// Hue-wheel map: intensity sweeps the hue range (which may be
/// descending), with an eased alpha ramp so cold regions fade out.
///
/// `hue_range` is in degrees, `alpha_range` in percent.
pub fn hue_map(field: &ScalarField, hue_range: [f64; 2], alpha_range: [f64; 2]) -> RasterImage {
    let max = field_max(field);
    let mut img = RasterImage::new(field.width(), field.height());

    for (cell, px) in field.data().iter().zip(img.pixels_mut().chunks_exact_mut(4)) {
        let t = if max > 0.0 { *cell as f64 / max } else { 0.0 };
        let hue = remap(t, 0.0, 1.0, hue_range[0], hue_range[1]);
        let alpha = remap(ease_out_expo(t), 0.0, 1.0, alpha_range[0], alpha_range[1]);
        let color = hsb_to_rgba(hue, 100.0, 100.0, alpha);
        px[0] = color.r;
        px[1] = color.g;
        px[2] = color.b;
        px[3] = color.a;
    }
    img
}

/// Map the field through an arbitrary resolved color scale.
pub fn scale_map(field: &ScalarField, scale: &ColorScale) -> RasterImage {
    let max = field_max(field);
    let mut img = RasterImage::new(field.width(), field.height());

    for (cell, px) in field.data().iter().zip(img.pixels_mut().chunks_exact_mut(4)) {
        let t = if max > 0.0 { *cell as f64 / max } else { 0.0 };
        let color = scale.color_for(t);
        px[0] = color.r;
        px[1] = color.g;
        px[2] = color.b;
        px[3] = color.a;
    }
    img
}
