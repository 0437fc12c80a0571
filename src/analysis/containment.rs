//! Containment Analyzer
//!
//! Counts how many gaze samples fall inside each polygon mask, by
//! signed distance to the mask boundary. A sample counts when
//! `sdf <= -safe_offset`, i.e. it sits inside the polygon by at least
//! `safe_offset` pixels. Masks are independent: overlapping masks each
//! count the same sample, there is no exclusivity.
//!
//! Besides the per-mask tallies, the analyzer renders an annotated
//! raster: each mask outlined and lightly filled in its palette color,
//! contained samples stippled, and a centered label with the mask name,
//! count, and percentage.

use crate::color::{ColorScale, ColorScaleConfig, InterpolationSpace, Rgba, ScaleKind};
use crate::data::{GazeCorpus, PolygonMask};
use crate::geometry::{polygon_centroid, signed_distance};
use crate::render::draw::{fill_disc, fill_polygon, stroke_polygon};
use crate::render::text::draw_text_centered;
use crate::render::RasterImage;
use crate::Result;
use serde::Serialize;
use tracing::debug;

const FILL_ALPHA: u8 = 40;
const OUTLINE_WIDTH: f64 = 2.0;
const STIPPLE_RADIUS: f64 = 1.5;
const LABEL_SCALE: usize = 2;

/// Per-mask containment tally.
#[derive(Debug, Clone, Serialize)]
pub struct MaskAnalysis {
    pub mask_name: String,
    /// Samples inside the mask by at least the safe offset.
    pub count: usize,
    /// `count / total corpus samples`, 0 when the corpus is empty.
    pub ratio: f64,
    /// The contained sample positions, for audit and stippling.
    pub contained: Vec<(f64, f64)>,
}

/// Gaze-inside-mask analyzer.
#[derive(Debug, Clone, Copy)]
pub struct ContainmentAnalyzer {
    /// Minimum distance from the boundary, in pixels, for a sample to
    /// count as contained. Never negative.
    pub safe_offset: f64,
}

impl ContainmentAnalyzer {
    pub fn new(safe_offset: f64) -> Self {
        Self { safe_offset }
    }

    /// Tally containment of every corpus sample against every mask.
    ///
    /// The ratio denominator is the whole corpus, not the per-mask
    /// candidates, so ratios across masks are directly comparable.
    pub fn analyze(&self, corpus: &GazeCorpus, masks: &[PolygonMask]) -> Vec<MaskAnalysis> {
        let total = corpus.sample_count();
        let mut results = Vec::with_capacity(masks.len());

        for mask in masks {
            let mut contained = Vec::new();
            for sample in corpus.samples() {
                if !sample.x.is_finite() || !sample.y.is_finite() {
                    continue;
                }
                let sdf = signed_distance(&mask.vertices, sample.x, sample.y);
                if sdf <= -self.safe_offset {
                    contained.push((sample.x, sample.y));
                }
            }

            let count = contained.len();
            let ratio = if total > 0 {
                count as f64 / total as f64
            } else {
                0.0
            };
            debug!("Mask '{}': {count}/{total} samples contained", mask.name);
            results.push(MaskAnalysis {
                mask_name: mask.name.clone(),
                count,
                ratio,
                contained,
            });
        }

        results
    }

    /// Render the annotated mask raster for a set of analyses.
    ///
    /// `analyses` must pair with `masks` positionally, as produced by
    /// [`analyze`](Self::analyze). With no masks the raster comes back
    /// fully transparent.
    pub fn annotate(
        &self,
        masks: &[PolygonMask],
        analyses: &[MaskAnalysis],
        width: usize,
        height: usize,
    ) -> Result<RasterImage> {
        let mut img = RasterImage::new(width, height);
        let palette = ColorScale::from_config(&ColorScaleConfig {
            kind: ScaleKind::NamedCategorical,
            name: Some("classic10".to_string()),
            range: [0.0, 1.0],
            alpha_range: [100.0, 100.0],
            space: InterpolationSpace::Rgb,
            easing: crate::color::Easing::Linear,
        })?;

        for (i, (mask, analysis)) in masks.iter().zip(analyses).enumerate() {
            let color = palette.categorical(i);
            fill_polygon(&mut img, &mask.vertices, color.with_alpha(FILL_ALPHA));
            stroke_polygon(&mut img, &mask.vertices, color, OUTLINE_WIDTH);

            for &(x, y) in &analysis.contained {
                fill_disc(&mut img, x, y, STIPPLE_RADIUS, color);
            }

            let (cx, cy) = polygon_centroid(&mask.vertices).unwrap_or_else(|_| bbox_center(&mask.vertices));
            let label = format!(
                "{}: {} ({:.2}%)",
                analysis.mask_name,
                analysis.count,
                analysis.ratio * 100.0
            );
            draw_text_centered(&mut img, cx as i64, cy as i64, &label, Rgba::BLACK, LABEL_SCALE);
        }

        Ok(img)
    }
}

fn bbox_center(vertices: &[(f64, f64)]) -> (f64, f64) {
    let min_x = vertices.iter().map(|v| v.0).fold(f64::INFINITY, f64::min);
    let max_x = vertices.iter().map(|v| v.0).fold(f64::NEG_INFINITY, f64::max);
    let min_y = vertices.iter().map(|v| v.1).fold(f64::INFINITY, f64::min);
    let max_y = vertices.iter().map(|v| v.1).fold(f64::NEG_INFINITY, f64::max);
    ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0)
}
