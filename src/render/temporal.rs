//! Temporal Field Renderers
//!
//! Two renderers that paint *when* the gaze visited a region rather
//! than how often. Each sample carries a time-coded hue taken from its
//! ordinal position in the corpus and stamps the falloff kernel:
//!
//! - the hue-blend variant keeps separate hue and alpha planes, blending
//!   hues by kernel strength and keeping the strongest alpha seen;
//! - the color-blend variant paints RGB directly over a buffer that
//!   starts as opaque white, which blends colors more smoothly at the
//!   cost of a fully opaque result.
//!
//! Samples skipped by the fixation filter still advance the time index,
//! so the hue timeline stays aligned with the recording.

use crate::color::hsb_to_rgba;
use crate::data::GazeCorpus;
use crate::geometry::{distance, smooth_falloff};
use crate::render::RasterImage;
use tracing::debug;

/// Shared parameters for the temporal renderers.
#[derive(Debug, Clone, Copy)]
pub struct TemporalRenderer {
    /// Kernel radius in pixels.
    pub radius: u32,
    /// Hue timeline in degrees, start to end of the recording.
    pub hue_range: [f64; 2],
    /// Alpha range in percent (color-blend variant only).
    pub alpha_range: [f64; 2],
    /// Skip samples without a fixation id.
    pub fixation_only: bool,
}

impl TemporalRenderer {
    /// Hue-blend temporal map.
    ///
    /// Hue plane starts at the range start; each stamp blends toward the
    /// sample's time hue weighted by kernel strength. The alpha plane
    /// keeps the strongest kernel value ever seen per pixel.
    pub fn hue_blend_map(
        &self,
        corpus: &GazeCorpus,
        width: usize,
        height: usize,
        progress: &mut dyn FnMut(f64),
    ) -> RasterImage {
        let total = corpus.sample_count();
        let mut img = RasterImage::new(width, height);
        if total == 0 || width == 0 || height == 0 {
            progress(1.0);
            return img;
        }

        let pixel_count = width * height;
        let mut hues = vec![self.hue_range[0]; pixel_count];
        let mut alphas = vec![0.0f64; pixel_count];
        let hue_len = self.hue_range[1] - self.hue_range[0];

        self.for_each_stamp(corpus, width, height, progress, &mut |n, px, py, v| {
            let pid = py * width + px;
            let hue = self.hue_range[0] + n * hue_len;
            alphas[pid] = alphas[pid].max(v);
            hues[pid] = hues[pid] * (1.0 - v) + hue * v;
        });

        for (i, chunk) in img.pixels_mut().chunks_exact_mut(4).enumerate() {
            let color = hsb_to_rgba(hues[i], 100.0, 100.0, alphas[i] * 100.0);
            chunk[0] = color.r;
            chunk[1] = color.g;
            chunk[2] = color.b;
            chunk[3] = color.a;
        }
        img
    }

    /// Color-blend temporal map.
    ///
    /// Works directly on a float RGBA buffer initialized to 255, so the
    /// output is opaque white wherever the gaze never landed. The alpha
    /// channel keeps the strongest stamped value, which on the white
    /// base means the image stays fully opaque throughout.
    pub fn color_blend_map(
        &self,
        corpus: &GazeCorpus,
        width: usize,
        height: usize,
        progress: &mut dyn FnMut(f64),
    ) -> RasterImage {
        let total = corpus.sample_count();
        let mut img = RasterImage::new(width, height);
        if total == 0 || width == 0 || height == 0 {
            progress(1.0);
            for chunk in img.pixels_mut().chunks_exact_mut(4) {
                chunk.fill(255);
            }
            return img;
        }

        let mut buf = vec![255.0f64; width * height * 4];
        let hue_len = self.hue_range[1] - self.hue_range[0];
        let alpha_len = self.alpha_range[1] - self.alpha_range[0];

        let mut last_n = f64::NAN;
        let mut rgb = (0.0, 0.0, 0.0);
        self.for_each_stamp(corpus, width, height, progress, &mut |n, px, py, v| {
            if n != last_n {
                let hue = self.hue_range[0] + n * hue_len;
                let c = hsb_to_rgba(hue, 100.0, 100.0, 100.0);
                rgb = (c.r as f64, c.g as f64, c.b as f64);
                last_n = n;
            }
            let i4 = (py * width + px) * 4;
            buf[i4] = buf[i4] * (1.0 - v) + rgb.0 * v;
            buf[i4 + 1] = buf[i4 + 1] * (1.0 - v) + rgb.1 * v;
            buf[i4 + 2] = buf[i4 + 2] * (1.0 - v) + rgb.2 * v;
            let a = 2.55 * (self.alpha_range[0] + v * alpha_len);
            buf[i4 + 3] = buf[i4 + 3].max(a);
        });

        for (dst, src) in img.pixels_mut().iter_mut().zip(&buf) {
            *dst = (src + 0.5).floor().clamp(0.0, 255.0) as u8;
        }
        img
    }

    /// Drive the kernel over every sample, calling `stamp` with the time
    /// fraction `n` and each affected pixel. Skipped samples (fixation
    /// filter, non-finite coordinates) advance the time index without
    /// stamping.
    fn for_each_stamp(
        &self,
        corpus: &GazeCorpus,
        width: usize,
        height: usize,
        progress: &mut dyn FnMut(f64),
        stamp: &mut dyn FnMut(f64, usize, usize, f64),
    ) {
        let total = corpus.sample_count();
        let r = self.radius as i64;
        let w1 = width as i64 - 1;
        let h1 = height as i64 - 1;

        let mut index = 0usize;
        let mut skipped = 0usize;
        let mut non_finite = 0usize;
        for sample in corpus.samples() {
            if self.fixation_only && !sample.has_fixation() {
                skipped += 1;
                index += 1;
                progress(index as f64 / total as f64);
                continue;
            }
            if !sample.x.is_finite() || !sample.y.is_finite() {
                non_finite += 1;
                index += 1;
                progress(index as f64 / total as f64);
                continue;
            }

            let n = index as f64 / total as f64;
            let cx = sample.x.round() as i64;
            let cy = sample.y.round() as i64;
            let x0 = (cx - r).clamp(0, w1);
            let x1 = (cx + r).clamp(0, w1);
            let y0 = (cy - r).clamp(0, h1);
            let y1 = (cy + r).clamp(0, h1);

            let cxf = cx as f64;
            let cyf = cy as f64;
            for px in x0..=x1 {
                for py in y0..=y1 {
                    let d = distance(cxf, cyf, px as f64, py as f64);
                    let v = smooth_falloff(self.radius as f64, d);
                    stamp(n, px as usize, py as usize, v);
                }
            }

            index += 1;
            progress(index as f64 / total as f64);
        }

        if skipped > 0 {
            debug!("Skipped {skipped} samples without a fixation id");
        }
        if non_finite > 0 {
            debug!("Skipped {non_finite} samples with non-finite coordinates");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{GazeCorpus, GazeSample, GazeSeries};
    use approx::assert_relative_eq;

    fn corpus_of(samples: Vec<GazeSample>) -> GazeCorpus {
        let mut series = GazeSeries::new("test".to_string());
        for s in samples {
            series.push(s);
        }
        let mut corpus = GazeCorpus::new();
        corpus.push(series);
        corpus
    }

    fn renderer() -> TemporalRenderer {
        TemporalRenderer {
            radius: 5,
            hue_range: [240.0, -50.0],
            alpha_range: [0.0, 70.0],
            fixation_only: false,
        }
    }

    #[test]
    fn test_hue_blend_empty_corpus_is_transparent() {
        let img = renderer().hue_blend_map(&GazeCorpus::new(), 8, 8, &mut |_| {});
        assert!(img.pixels().chunks_exact(4).all(|p| p[3] == 0));
    }

    #[test]
    fn test_hue_blend_first_sample_is_range_start() {
        let corpus = corpus_of(vec![GazeSample::new(10.0, 10.0, 0, f64::NAN)]);
        let img = renderer().hue_blend_map(&corpus, 20, 20, &mut |_| {});
        // Time fraction 0: hue 240, kernel center at full strength.
        let expected = hsb_to_rgba(240.0, 100.0, 100.0, 100.0);
        assert_eq!(img.get_pixel(10, 10), Some(expected));
        // Outside kernel reach: untouched, alpha zero.
        assert_eq!(img.get_pixel(18, 2).unwrap().a, 0);
    }

    #[test]
    fn test_hue_blend_later_sample_shifts_hue() {
        let corpus = corpus_of(vec![
            GazeSample::new(10.0, 10.0, 0, f64::NAN),
            GazeSample::new(10.0, 10.0, 1, f64::NAN),
        ]);
        let img = renderer().hue_blend_map(&corpus, 20, 20, &mut |_| {});
        // The second stamp is at time fraction 1/2: hue 240 - 145 = 95,
        // and at full kernel strength it replaces the blended value.
        let expected = hsb_to_rgba(95.0, 100.0, 100.0, 100.0);
        assert_eq!(img.get_pixel(10, 10), Some(expected));
    }

    #[test]
    fn test_hue_blend_skipped_sample_advances_time() {
        let corpus = corpus_of(vec![
            GazeSample::new(5.0, 5.0, 0, f64::NAN),
            GazeSample::new(10.0, 10.0, 1, 7.0),
        ]);
        let mut r = renderer();
        r.fixation_only = true;
        let img = r.hue_blend_map(&corpus, 20, 20, &mut |_| {});
        // The first sample is skipped but still advances the index, so
        // the fixation stamp lands at time fraction 1/2, not 0.
        let expected = hsb_to_rgba(95.0, 100.0, 100.0, 100.0);
        assert_eq!(img.get_pixel(10, 10), Some(expected));
        // The skipped location stays untouched.
        assert_eq!(img.get_pixel(5, 5).unwrap().a, 0);
    }

    #[test]
    fn test_color_blend_empty_corpus_is_opaque_white() {
        let img = renderer().color_blend_map(&GazeCorpus::new(), 4, 4, &mut |_| {});
        assert!(img.pixels().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_color_blend_first_sample_paints_range_start() {
        let corpus = corpus_of(vec![GazeSample::new(10.0, 10.0, 0, f64::NAN)]);
        let img = renderer().color_blend_map(&corpus, 20, 20, &mut |_| {});
        // Full-strength center takes the pure time color, hue 240.
        assert_eq!(img.get_pixel(10, 10), Some(crate::color::Rgba::new(0, 0, 255, 255)));
        // Untouched pixels remain opaque white.
        assert_eq!(img.get_pixel(18, 2), Some(crate::color::Rgba::WHITE));
    }

    #[test]
    fn test_color_blend_result_is_fully_opaque() {
        let corpus = corpus_of(vec![
            GazeSample::new(5.0, 5.0, 0, f64::NAN),
            GazeSample::new(12.0, 12.0, 1, f64::NAN),
        ]);
        let img = renderer().color_blend_map(&corpus, 20, 20, &mut |_| {});
        assert!(img.pixels().chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_color_blend_partial_strength_tints_toward_white() {
        let corpus = corpus_of(vec![GazeSample::new(10.0, 10.0, 0, f64::NAN)]);
        let img = renderer().color_blend_map(&corpus, 20, 20, &mut |_| {});
        // A pixel inside the kernel but off-center is a white/blue mix.
        let p = img.get_pixel(12, 10).unwrap();
        assert_eq!(p.b, 255);
        assert!(p.r > 0 && p.r < 255);
        assert_eq!(p.r, p.g);
    }

    #[test]
    fn test_progress_reaches_one_even_with_trailing_skip() {
        let corpus = corpus_of(vec![
            GazeSample::new(5.0, 5.0, 0, 1.0),
            GazeSample::new(6.0, 6.0, 1, f64::NAN),
        ]);
        let mut r = renderer();
        r.fixation_only = true;
        let mut fractions = Vec::new();
        r.hue_blend_map(&corpus, 16, 16, &mut |f| fractions.push(f));
        assert_eq!(fractions.len(), 2);
        assert_relative_eq!(*fractions.last().unwrap(), 1.0);
    }
}
