//! Gaze Density Field
//!
//! A dense row-major grid of non-negative intensities, one cell per
//! output pixel, plus the bounds scan and the accumulation kernel that
//! builds the field from a gaze corpus.

pub mod accumulator;
pub mod bounds;

pub use accumulator::{AccumulatedField, FieldAccumulator};
pub use bounds::{compute_bounds, Bounds};

/// Dense 2D scalar field, row-major, one `f32` per pixel.
///
/// Invariant: all values are non-negative; a cell approximates the
/// cumulative local gaze density at that pixel.
#[derive(Debug, Clone, Default)]
pub struct ScalarField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl ScalarField {
    /// Create a zero-initialized field of the given dimensions.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of cells (`width * height`).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Row-major cell index for `(x, y)`.
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[self.index(x, y)]
    }

    /// Add `v` to the cell at `(x, y)`.
    pub fn add(&mut self, x: usize, y: usize, v: f32) {
        let i = self.index(x, y);
        self.data[i] += v;
    }

    /// Raw cell buffer in row-major order.
    pub fn data(&self) -> &[f32] {
        &self.data
    }
}
