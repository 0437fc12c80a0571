//! Color Primitives
//!
//! Straight-alpha RGBA, HSB conversion for the hue-wheel encoders, and
//! the easing curve used to shape alpha response.

pub mod scale;

pub use scale::{ColorScale, ColorScaleConfig, Easing, InterpolationSpace, ScaleKind};

/// 8-bit RGBA color, straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Exponential ease-out: `1 - 2^(-10x)`, with `x >= 1` pinned to exactly 1
/// to avoid the floating-point residue at the top of the curve.
pub fn ease_out_expo(x: f64) -> f64 {
    if x >= 1.0 {
        1.0
    } else {
        1.0 - (2.0_f64).powf(-10.0 * x)
    }
}

/// Convert HSB to RGBA.
///
/// Hue is in degrees and may be negative or beyond 360 (wrapped onto the
/// wheel); saturation, brightness, and alpha are percentages in `[0, 100]`.
pub fn hsb_to_rgba(h: f64, s: f64, b: f64, a: f64) -> Rgba {
    let s = (s / 100.0).clamp(0.0, 1.0);
    let v = (b / 100.0).clamp(0.0, 1.0);
    let alpha = (a / 100.0).clamp(0.0, 1.0);

    let h = h.rem_euclid(360.0) / 60.0;
    let sector = h.floor();
    let f = h - sector;

    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));

    let (r, g, b) = match sector as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgba::new(
        channel_to_u8(r),
        channel_to_u8(g),
        channel_to_u8(b),
        channel_to_u8(alpha),
    )
}

/// Convert an RGB triple (0..=255 channels) to HSB percentages.
///
/// Returns `(hue_degrees, saturation_pct, brightness_pct)`.
pub fn rgb_to_hsb(r: u8, g: u8, b: u8) -> (f64, f64, f64) {
    let rf = r as f64 / 255.0;
    let gf = g as f64 / 255.0;
    let bf = b as f64 / 255.0;

    let max = rf.max(gf).max(bf);
    let min = rf.min(gf).min(bf);
    let delta = max - min;

    let h = if delta == 0.0 {
        0.0
    } else if max == rf {
        60.0 * (((gf - bf) / delta).rem_euclid(6.0))
    } else if max == gf {
        60.0 * ((bf - rf) / delta + 2.0)
    } else {
        60.0 * ((rf - gf) / delta + 4.0)
    };

    let s = if max == 0.0 { 0.0 } else { delta / max };
    (h, s * 100.0, max * 100.0)
}

fn channel_to_u8(v: f64) -> u8 {
    (v * 255.0 + 0.5).floor().clamp(0.0, 255.0) as u8
}
