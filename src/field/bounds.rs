//! Bounds Utility
//!
//! Single-pass min/max scan over a scalar buffer, reporting both the
//! extreme values and their first-occurrence positions.

use crate::{Error, Result};

/// Extremes of a scalar buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds<T> {
    pub min_val: T,
    pub min_pos: usize,
    pub max_val: T,
    pub max_pos: usize,
}

/// Scan `values` once and return min/max with their positions.
///
/// Ties break to the first occurrence for both extremes. Empty input is
/// an error, never a silent default.
pub fn compute_bounds<T: PartialOrd + Copy>(values: &[T]) -> Result<Bounds<T>> {
    let first = *values.first().ok_or_else(|| {
        Error::Input("cannot compute bounds of an empty buffer".to_string())
    })?;

    let mut bounds = Bounds {
        min_val: first,
        min_pos: 0,
        max_val: first,
        max_pos: 0,
    };

    for (i, &v) in values.iter().enumerate().skip(1) {
        if v < bounds.min_val {
            bounds.min_val = v;
            bounds.min_pos = i;
        }
        if v > bounds.max_val {
            bounds.max_val = v;
            bounds.max_pos = i;
        }
    }

    Ok(bounds)
}
