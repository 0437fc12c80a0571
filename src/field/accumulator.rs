//! Field Accumulator
//!
//! Converts a gaze corpus into a per-pixel scalar intensity field. Each
//! sample stamps an additive smooth-falloff kernel over the axis-aligned
//! box `[x-radius, x+radius] x [y-radius, y+radius]`, clamped to image
//! bounds. Overlapping samples accumulate: hotspots from repeated
//! fixation are emphasized, not capped.
//!
//! Cost is `O(samples * radius^2)`, which makes the radius the main
//! quality/performance knob; progress is reported incrementally so a
//! caller can surface fraction-complete for large recordings.

use crate::data::GazeCorpus;
use crate::field::ScalarField;
use crate::geometry::{distance, smooth_falloff};
use tracing::debug;

/// Result of an accumulation pass.
#[derive(Debug, Clone)]
pub struct AccumulatedField {
    /// The accumulated density field.
    pub field: ScalarField,
    /// Samples skipped because they carried no fixation id.
    pub skipped: usize,
}

/// Gaze-to-field accumulation kernel.
#[derive(Debug, Clone, Copy)]
pub struct FieldAccumulator {
    /// Kernel radius in pixels.
    pub radius: u32,
    /// Skip samples without a fixation id.
    pub fixation_only: bool,
}

impl FieldAccumulator {
    pub fn new(radius: u32, fixation_only: bool) -> Self {
        Self {
            radius,
            fixation_only,
        }
    }

    /// Accumulate every sample of `corpus` into a `width x height` field.
    ///
    /// `progress` receives a monotonically non-decreasing fraction in
    /// `[0, 1]`, once per consumed sample.
    pub fn accumulate(
        &self,
        corpus: &GazeCorpus,
        width: usize,
        height: usize,
        progress: &mut dyn FnMut(f64),
    ) -> AccumulatedField {
        let mut field = ScalarField::new(width, height);
        let total = corpus.sample_count();
        let mut skipped = 0usize;
        let mut non_finite = 0usize;
        let mut done = 0usize;

        if total == 0 || width == 0 || height == 0 {
            progress(1.0);
            return AccumulatedField { field, skipped };
        }

        let r = self.radius as i64;
        let w1 = width as i64 - 1;
        let h1 = height as i64 - 1;

        for sample in corpus.samples() {
            done += 1;

            if self.fixation_only && !sample.has_fixation() {
                skipped += 1;
                progress(done as f64 / total as f64);
                continue;
            }
            if !sample.x.is_finite() || !sample.y.is_finite() {
                non_finite += 1;
                progress(done as f64 / total as f64);
                continue;
            }

            let cx = sample.x.round() as i64;
            let cy = sample.y.round() as i64;

            // Affected area, clamped to image bounds.
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
                    field.add(px as usize, py as usize, v as f32);
                }
            }

            progress(done as f64 / total as f64);
        }

        if skipped > 0 {
            debug!("Skipped {skipped} samples without a fixation id");
        }
        if non_finite > 0 {
            debug!("Skipped {non_finite} samples with non-finite coordinates");
        }

        AccumulatedField { field, skipped }
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

    #[test]
    fn test_single_sample_center_value_is_one() {
        let corpus = corpus_of(vec![GazeSample::new(50.0, 40.0, 0, f64::NAN)]);
        let acc = FieldAccumulator::new(10, false);
        let out = acc.accumulate(&corpus, 100, 80, &mut |_| {});
        assert_relative_eq!(out.field.get(50, 40) as f64, 1.0);
    }

    #[test]
    fn test_single_sample_nonzero_only_inside_box() {
        let corpus = corpus_of(vec![GazeSample::new(50.0, 40.0, 0, f64::NAN)]);
        let acc = FieldAccumulator::new(10, false);
        let out = acc.accumulate(&corpus, 100, 80, &mut |_| {});

        for y in 0..80 {
            for x in 0..100 {
                let inside_box = (40..=60).contains(&x) && (30..=50).contains(&y);
                if !inside_box {
                    assert_eq!(out.field.get(x, y), 0.0, "nonzero at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_additive_accumulation_doubles() {
        let one = corpus_of(vec![GazeSample::new(30.0, 30.0, 0, f64::NAN)]);
        let two = corpus_of(vec![
            GazeSample::new(30.0, 30.0, 0, f64::NAN),
            GazeSample::new(30.0, 30.0, 1, f64::NAN),
        ]);
        let acc = FieldAccumulator::new(8, false);
        let single = acc.accumulate(&one, 64, 64, &mut |_| {});
        let double = acc.accumulate(&two, 64, 64, &mut |_| {});

        for i in 0..single.field.len() {
            assert_relative_eq!(
                double.field.data()[i] as f64,
                2.0 * single.field.data()[i] as f64,
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn test_fixation_only_skips_and_counts() {
        let corpus = corpus_of(vec![
            GazeSample::new(10.0, 10.0, 0, f64::NAN),
            GazeSample::new(20.0, 20.0, 1, 3.0),
        ]);
        let acc = FieldAccumulator::new(4, true);
        let out = acc.accumulate(&corpus, 40, 40, &mut |_| {});
        assert_eq!(out.skipped, 1);
        assert_eq!(out.field.get(10, 10), 0.0);
        assert_relative_eq!(out.field.get(20, 20) as f64, 1.0);
    }

    #[test]
    fn test_out_of_range_sample_is_clamped() {
        // A sample outside the image contributes only through clamped
        // cells, and only within kernel reach.
        let corpus = corpus_of(vec![GazeSample::new(-5.0, 10.0, 0, f64::NAN)]);
        let acc = FieldAccumulator::new(10, false);
        let out = acc.accumulate(&corpus, 30, 30, &mut |_| {});
        assert!(out.field.get(0, 10) > 0.0);
        assert_eq!(out.field.get(20, 10), 0.0);
    }

    #[test]
    fn test_non_finite_sample_is_skipped() {
        let corpus = corpus_of(vec![GazeSample::new(f64::NAN, 10.0, 0, f64::NAN)]);
        let acc = FieldAccumulator::new(5, false);
        let out = acc.accumulate(&corpus, 20, 20, &mut |_| {});
        assert!(out.field.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_progress_reaches_one() {
        let corpus = corpus_of(vec![
            GazeSample::new(5.0, 5.0, 0, f64::NAN),
            GazeSample::new(6.0, 6.0, 1, f64::NAN),
            GazeSample::new(7.0, 7.0, 2, f64::NAN),
        ]);
        let acc = FieldAccumulator::new(2, false);
        let mut fractions = Vec::new();
        acc.accumulate(&corpus, 16, 16, &mut |f| fractions.push(f));
        assert_eq!(fractions.len(), 3);
        assert_relative_eq!(*fractions.last().unwrap(), 1.0);
        assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_empty_corpus_yields_zero_field() {
        let corpus = GazeCorpus::new();
        let acc = FieldAccumulator::new(10, false);
        let out = acc.accumulate(&corpus, 8, 8, &mut |_| {});
        assert!(out.field.data().iter().all(|&v| v == 0.0));
        assert_eq!(out.skipped, 0);
    }
}
