//! Color Scales
//!
//! Interchangeable scalar-to-color strategies: grayscale, hue wheel, and
//! named scales (perceptual gradient stops or fixed categorical
//! palettes). A built scale is a pure function of its configuration;
//! there is no ambient coloring state.

use crate::color::{ease_out_expo, hsb_to_rgba, rgb_to_hsb, Rgba};
use crate::geometry::remap;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which encoding strategy a scale uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleKind {
    Grayscale,
    Hue,
    NamedGradient,
    NamedCategorical,
}

/// Color space used to interpolate between gradient stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterpolationSpace {
    Rgb,
    Hsb,
}

/// Easing applied to the alpha response of hue scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    OutExpo,
}

/// Declarative description of a color scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorScaleConfig {
    /// Strategy to use.
    pub kind: ScaleKind,
    /// Scale name for the named kinds (e.g. "viridis", "classic10").
    #[serde(default)]
    pub name: Option<String>,
    /// Output range: hue degrees for `Hue` (may be descending, e.g.
    /// `[240, -50]`), normalized `[lo, hi]` for gradients (may be
    /// inverted).
    pub range: [f64; 2],
    /// Alpha range in `[0, 100]`.
    pub alpha_range: [f64; 2],
    /// Interpolation space for gradient stops.
    pub space: InterpolationSpace,
    /// Alpha easing.
    pub easing: Easing,
}

impl Default for ColorScaleConfig {
    fn default() -> Self {
        Self {
            kind: ScaleKind::Hue,
            name: None,
            range: [240.0, -50.0],
            alpha_range: [0.0, 70.0],
            space: InterpolationSpace::Hsb,
            easing: Easing::OutExpo,
        }
    }
}

impl ColorScaleConfig {
    /// A named-gradient configuration with full opacity, the default for
    /// the speed-coded trajectory renderer.
    pub fn named_gradient(name: &str) -> Self {
        Self {
            kind: ScaleKind::NamedGradient,
            name: Some(name.to_string()),
            range: [0.0, 1.0],
            alpha_range: [100.0, 100.0],
            space: InterpolationSpace::Rgb,
            easing: Easing::Linear,
        }
    }
}

/// Gradient stop tables, normalized RGB.
///
/// The viridis stops follow the common 5-stop simplification (dark
/// purple through teal to bright yellow).
const VIRIDIS: [(f64, f64, f64); 5] = [
    (0.267, 0.004, 0.329),
    (0.282, 0.140, 0.458),
    (0.127, 0.566, 0.551),
    (0.544, 0.774, 0.247),
    (0.993, 0.906, 0.144),
];

const INFERNO: [(f64, f64, f64); 5] = [
    (0.001, 0.000, 0.014),
    (0.341, 0.062, 0.429),
    (0.735, 0.215, 0.330),
    (0.978, 0.557, 0.034),
    (0.988, 0.998, 0.645),
];

/// Fixed categorical palette (tableau-style 10 colors).
const CLASSIC10: [Rgba; 10] = [
    Rgba::new(31, 119, 180, 255),
    Rgba::new(255, 127, 14, 255),
    Rgba::new(44, 160, 44, 255),
    Rgba::new(214, 39, 40, 255),
    Rgba::new(148, 103, 189, 255),
    Rgba::new(140, 86, 75, 255),
    Rgba::new(227, 119, 194, 255),
    Rgba::new(127, 127, 127, 255),
    Rgba::new(188, 189, 34, 255),
    Rgba::new(23, 190, 207, 255),
];

/// A resolved, ready-to-sample color scale.
#[derive(Debug, Clone)]
pub struct ColorScale {
    config: ColorScaleConfig,
    gradient: Option<&'static [(f64, f64, f64)]>,
    palette: Option<&'static [Rgba]>,
}

impl ColorScale {
    /// Resolve a configuration into a sampleable scale.
    ///
    /// Unknown scale names are a `Config` error. Descending ranges are
    /// valid and honored, never rejected.
    pub fn from_config(config: &ColorScaleConfig) -> Result<Self> {
        let mut gradient = None;
        let mut palette = None;
        match config.kind {
            ScaleKind::Grayscale | ScaleKind::Hue => {}
            ScaleKind::NamedGradient => {
                let name = config.name.as_deref().ok_or_else(|| {
                    Error::Config("named gradient scale requires a name".to_string())
                })?;
                gradient = Some(match name {
                    "viridis" => &VIRIDIS[..],
                    "inferno" => &INFERNO[..],
                    other => {
                        return Err(Error::Config(format!("unknown gradient scale '{other}'")))
                    }
                });
            }
            ScaleKind::NamedCategorical => {
                let name = config.name.as_deref().ok_or_else(|| {
                    Error::Config("categorical scale requires a name".to_string())
                })?;
                palette = Some(match name {
                    "classic10" => &CLASSIC10[..],
                    other => {
                        return Err(Error::Config(format!(
                            "unknown categorical scale '{other}'"
                        )))
                    }
                });
            }
        }
        Ok(Self {
            config: config.clone(),
            gradient,
            palette,
        })
    }

    pub fn config(&self) -> &ColorScaleConfig {
        &self.config
    }

    /// Color for a normalized value `t` in `[0, 1]`.
    pub fn color_for(&self, t: f64) -> Rgba {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        match self.config.kind {
            ScaleKind::Grayscale => {
                let c = (t * 255.0 + 0.5).floor() as u8;
                Rgba::new(c, c, c, 255)
            }
            ScaleKind::Hue => {
                let [h0, h1] = self.config.range;
                let hue = remap(t, 0.0, 1.0, h0, h1);
                let alpha = self.alpha_for(t);
                hsb_to_rgba(hue, 100.0, 100.0, alpha)
            }
            ScaleKind::NamedGradient => {
                let [lo, hi] = self.config.range;
                let u = remap(t, 0.0, 1.0, lo, hi).clamp(0.0, 1.0);
                let (r, g, b) = self.sample_gradient(u);
                let alpha = self.alpha_for(t);
                Rgba::new(r, g, b, ((alpha / 100.0) * 255.0 + 0.5) as u8)
            }
            ScaleKind::NamedCategorical => {
                let palette = self.palette.unwrap_or(&CLASSIC10);
                let index = (t * (palette.len() - 1) as f64).round() as usize;
                palette[index.min(palette.len() - 1)]
            }
        }
    }

    /// Color for an item by ordinal position, modulo the palette length.
    ///
    /// Falls back to `color_for` sampling for continuous kinds.
    pub fn categorical(&self, index: usize) -> Rgba {
        match self.palette {
            Some(palette) => palette[index % palette.len()],
            None => {
                let t = (index % 10) as f64 / 9.0;
                self.color_for(t)
            }
        }
    }

    fn alpha_for(&self, t: f64) -> f64 {
        let eased = match self.config.easing {
            Easing::Linear => t,
            Easing::OutExpo => ease_out_expo(t),
        };
        let [a0, a1] = self.config.alpha_range;
        remap(eased, 0.0, 1.0, a0, a1)
    }

    fn sample_gradient(&self, u: f64) -> (u8, u8, u8) {
        let stops = self.gradient.unwrap_or(&VIRIDIS);
        let segments = (stops.len() - 1) as f64;
        let position = (u * segments).min(segments - 1e-9).max(0.0);
        let idx = position.floor() as usize;
        let frac = position - idx as f64;

        let (r0, g0, b0) = stops[idx];
        let (r1, g1, b1) = stops[idx + 1];

        match self.config.space {
            InterpolationSpace::Rgb => {
                let r = r0 + (r1 - r0) * frac;
                let g = g0 + (g1 - g0) * frac;
                let b = b0 + (b1 - b0) * frac;
                (to_u8(r), to_u8(g), to_u8(b))
            }
            InterpolationSpace::Hsb => {
                let (h0, s0, v0) = rgb_to_hsb(to_u8(r0), to_u8(g0), to_u8(b0));
                let (h1, s1, v1) = rgb_to_hsb(to_u8(r1), to_u8(g1), to_u8(b1));
                let c = hsb_to_rgba(
                    h0 + (h1 - h0) * frac,
                    s0 + (s1 - s0) * frac,
                    v0 + (v1 - v0) * frac,
                    100.0,
                );
                (c.r, c.g, c.b)
            }
        }
    }
}

fn to_u8(v: f64) -> u8 {
    (v * 255.0 + 0.5).floor().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grayscale_endpoints() {
        let scale = ColorScale::from_config(&ColorScaleConfig {
            kind: ScaleKind::Grayscale,
            name: None,
            range: [0.0, 1.0],
            alpha_range: [100.0, 100.0],
            space: InterpolationSpace::Rgb,
            easing: Easing::Linear,
        })
        .unwrap();
        assert_eq!(scale.color_for(0.0), Rgba::new(0, 0, 0, 255));
        assert_eq!(scale.color_for(1.0), Rgba::new(255, 255, 255, 255));
    }

    #[test]
    fn test_hue_scale_descending_range() {
        let scale = ColorScale::from_config(&ColorScaleConfig::default()).unwrap();
        // t=0 maps to the range start, 240 degrees = pure blue.
        let start = scale.color_for(0.0);
        assert_eq!((start.r, start.g, start.b), (0, 0, 255));
        // t=1 maps to -50 degrees, wrapped onto the wheel.
        let end = scale.color_for(1.0);
        let expected = hsb_to_rgba(-50.0, 100.0, 100.0, 70.0);
        assert_eq!(end, expected);
    }

    #[test]
    fn test_hue_scale_eased_alpha() {
        let scale = ColorScale::from_config(&ColorScaleConfig::default()).unwrap();
        assert_eq!(scale.color_for(0.0).a, 0);
        // ease_out_expo(1) == 1 exactly, so top of range is exactly 70%.
        assert_eq!(scale.color_for(1.0).a, hsb_to_rgba(0.0, 0.0, 0.0, 70.0).a);
    }

    #[test]
    fn test_viridis_endpoints() {
        let scale =
            ColorScale::from_config(&ColorScaleConfig::named_gradient("viridis")).unwrap();
        let dark = scale.color_for(0.0);
        let bright = scale.color_for(1.0);
        assert!(dark.r < 100);
        assert!(bright.r > 200);
        assert!(bright.g > 200);
        assert_eq!(dark.a, 255);
    }

    #[test]
    fn test_gradient_inverted_range() {
        let mut cfg = ColorScaleConfig::named_gradient("viridis");
        cfg.range = [1.0, 0.0];
        let inverted = ColorScale::from_config(&cfg).unwrap();
        let normal =
            ColorScale::from_config(&ColorScaleConfig::named_gradient("viridis")).unwrap();
        assert_eq!(inverted.color_for(0.0), normal.color_for(1.0));
        assert_eq!(inverted.color_for(1.0), normal.color_for(0.0));
    }

    #[test]
    fn test_unknown_gradient_name_is_config_error() {
        let cfg = ColorScaleConfig::named_gradient("plasma-prime");
        assert!(matches!(
            ColorScale::from_config(&cfg),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_missing_name_is_config_error() {
        let cfg = ColorScaleConfig {
            kind: ScaleKind::NamedGradient,
            name: None,
            ..ColorScaleConfig::default()
        };
        assert!(ColorScale::from_config(&cfg).is_err());
    }

    #[test]
    fn test_categorical_modulo_indexing() {
        let cfg = ColorScaleConfig {
            kind: ScaleKind::NamedCategorical,
            name: Some("classic10".to_string()),
            range: [0.0, 1.0],
            alpha_range: [100.0, 100.0],
            space: InterpolationSpace::Rgb,
            easing: Easing::Linear,
        };
        let scale = ColorScale::from_config(&cfg).unwrap();
        assert_eq!(scale.categorical(0), scale.categorical(10));
        assert_eq!(scale.categorical(3), scale.categorical(13));
        assert_ne!(scale.categorical(0), scale.categorical(1));
    }

    #[test]
    fn test_hsb_space_interpolation_differs_from_rgb() {
        let rgb_cfg = ColorScaleConfig::named_gradient("viridis");
        let mut hsb_cfg = rgb_cfg.clone();
        hsb_cfg.space = InterpolationSpace::Hsb;
        let rgb = ColorScale::from_config(&rgb_cfg).unwrap();
        let hsb = ColorScale::from_config(&hsb_cfg).unwrap();
        // Endpoints agree; midpoints generally do not.
        assert_eq!(rgb.color_for(0.0), hsb.color_for(0.0));
        assert_ne!(rgb.color_for(0.4), hsb.color_for(0.4));
    }

    #[test]
    fn test_pure_function_repeatability() {
        let scale = ColorScale::from_config(&ColorScaleConfig::default()).unwrap();
        for i in 0..20 {
            let t = i as f64 / 19.0;
            assert_eq!(scale.color_for(t), scale.color_for(t));
        }
    }
}
