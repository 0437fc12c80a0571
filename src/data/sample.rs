//! Samples, Series, Corpus
//!
//! A sample is one gaze-tracker row; a series is the ordered samples of
//! one source file (insertion order is temporal order); the corpus is
//! the set of loaded series, consumed either as a union or as the most
//! recently added file only.

/// One gaze sample in absolute image pixel space.
///
/// Coordinates are not bounds-checked at ingestion; out-of-range values
/// are clamped later per operation. `fixation` is `NaN` when the sample
/// is not part of a detected fixation.
#[derive(Debug, Clone, Copy)]
pub struct GazeSample {
    pub x: f64,
    pub y: f64,
    /// Recording timestamp in nanoseconds.
    pub t_ns: i64,
    /// Fixation id, `NaN` when absent.
    pub fixation: f64,
}

impl GazeSample {
    pub fn new(x: f64, y: f64, t_ns: i64, fixation: f64) -> Self {
        Self { x, y, t_ns, fixation }
    }

    /// Whether this sample belongs to a detected fixation.
    pub fn has_fixation(&self) -> bool {
        !self.fixation.is_nan()
    }
}

/// Time-ordered samples from a single source file.
#[derive(Debug, Clone)]
pub struct GazeSeries {
    source: String,
    samples: Vec<GazeSample>,
}

impl GazeSeries {
    pub fn new(source: String) -> Self {
        Self {
            source,
            samples: Vec::new(),
        }
    }

    /// Source file name this series was loaded from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn push(&mut self, sample: GazeSample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[GazeSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// The set of loaded gaze series, in load order.
#[derive(Debug, Clone, Default)]
pub struct GazeCorpus {
    series: Vec<GazeSeries>,
}

impl GazeCorpus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, series: GazeSeries) {
        self.series.push(series);
    }

    pub fn series(&self) -> &[GazeSeries] {
        &self.series
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.is_empty())
    }

    /// Total sample count across every series.
    pub fn sample_count(&self) -> usize {
        self.series.iter().map(|s| s.len()).sum()
    }

    /// Iterate all samples in load order, series by series.
    pub fn samples(&self) -> impl Iterator<Item = &GazeSample> {
        self.series.iter().flat_map(|s| s.samples().iter())
    }

    /// Ordered `(x, y)` pairs across the whole corpus, dropping samples
    /// with non-finite coordinates. This is the polyline the trajectory
    /// renderers draw.
    pub fn flatten(&self) -> Vec<(f64, f64)> {
        self.samples()
            .filter(|s| s.x.is_finite() && s.y.is_finite())
            .map(|s| (s.x, s.y))
            .collect()
    }

    /// A corpus containing only the most recently added series.
    pub fn latest_only(&self) -> GazeCorpus {
        GazeCorpus {
            series: self.series.last().cloned().into_iter().collect(),
        }
    }
}
