//! Trajectory Renderers
//!
//! Polyline views of the gaze sequence: a plain path, an index-colored
//! path that sweeps the hue range from first to last segment, and a
//! speed-colored path where each segment is shaded by its length.
//!
//! Segment length is a speed proxy, not a speed: samples are treated as
//! uniformly spaced in time, so the coloring is deliberately not
//! normalized by the timestamp deltas.

use crate::color::{hsb_to_rgba, ColorScale};
use crate::field::compute_bounds;
use crate::geometry::{distance, remap};
use crate::render::draw::stroke_line;
use crate::render::RasterImage;

const PATH_STROKE: f64 = 1.0;
const COLORED_STROKE: f64 = 5.0;

/// Plain gaze path: thin black polyline through every point, in order.
pub fn path_map(points: &[(f64, f64)], width: usize, height: usize) -> RasterImage {
    let mut img = RasterImage::new(width, height);
    for pair in points.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        stroke_line(&mut img, x0, y0, x1, y1, crate::color::Rgba::BLACK, PATH_STROKE);
    }
    img
}

/// Index-colored gaze path: segment `i` of `n` takes the hue at `i / n`
/// along `hue_range`, fully opaque. The first segment sits exactly at
/// the range start.
pub fn index_hue_map(
    points: &[(f64, f64)],
    width: usize,
    height: usize,
    hue_range: [f64; 2],
) -> RasterImage {
    let mut img = RasterImage::new(width, height);
    if points.len() < 2 {
        return img;
    }
    let segments = points.len() - 1;
    for (i, pair) in points.windows(2).enumerate() {
        let t = i as f64 / segments as f64;
        let hue = remap(t, 0.0, 1.0, hue_range[0], hue_range[1]);
        let color = hsb_to_rgba(hue, 100.0, 100.0, 100.0);
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        stroke_line(&mut img, x0, y0, x1, y1, color, COLORED_STROKE);
    }
    img
}

/// Speed-colored gaze path: each segment is shaded by its length
/// relative to the longest segment, through the given color scale.
pub fn speed_map(
    points: &[(f64, f64)],
    width: usize,
    height: usize,
    scale: &ColorScale,
) -> RasterImage {
    let mut img = RasterImage::new(width, height);
    if points.len() < 2 {
        return img;
    }

    let lengths: Vec<f64> = points
        .windows(2)
        .map(|pair| distance(pair[0].0, pair[0].1, pair[1].0, pair[1].1))
        .collect();
    let max = compute_bounds(&lengths).map(|b| b.max_val).unwrap_or(0.0);

    for (pair, len) in points.windows(2).zip(&lengths) {
        let t = if max > 0.0 { len / max } else { 0.0 };
        let color = scale.color_for(t);
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];
        stroke_line(&mut img, x0, y0, x1, y1, color, COLORED_STROKE);
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorScaleConfig, Rgba};

    #[test]
    fn test_path_map_draws_black_polyline() {
        let points = [(2.0, 5.0), (12.0, 5.0)];
        let img = path_map(&points, 20, 10);
        assert_eq!(img.get_pixel(7, 5), Some(Rgba::BLACK));
        assert_eq!(img.get_pixel(7, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_path_map_single_point_is_blank() {
        let img = path_map(&[(5.0, 5.0)], 10, 10);
        assert!(img.pixels().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_index_hue_first_segment_is_range_start() {
        // One segment: colored at the start of the default hue range,
        // 240 degrees, pure blue.
        let points = [(5.0, 10.0), (25.0, 10.0)];
        let img = index_hue_map(&points, 40, 20, [240.0, -50.0]);
        assert_eq!(img.get_pixel(15, 10), Some(Rgba::new(0, 0, 255, 255)));
    }

    #[test]
    fn test_index_hue_segments_progress_through_range() {
        let points = [(2.0, 2.0), (20.0, 2.0), (20.0, 20.0), (2.0, 20.0)];
        let img = index_hue_map(&points, 30, 30, [240.0, -50.0]);
        let first = img.get_pixel(10, 2).unwrap();
        let last = img.get_pixel(10, 20).unwrap();
        assert_ne!(first, last);
        assert_eq!(first, hsb_to_rgba(240.0, 100.0, 100.0, 100.0));
        // Last of three segments sits at t = 2/3 along the range.
        let hue = remap(2.0 / 3.0, 0.0, 1.0, 240.0, -50.0);
        assert_eq!(last, hsb_to_rgba(hue, 100.0, 100.0, 100.0));
    }

    #[test]
    fn test_speed_map_longest_segment_is_scale_top() {
        let scale =
            ColorScale::from_config(&ColorScaleConfig::named_gradient("viridis")).unwrap();
        // A short segment then a much longer one.
        let points = [(5.0, 5.0), (10.0, 5.0), (60.0, 5.0)];
        let img = speed_map(&points, 70, 10, &scale);
        assert_eq!(img.get_pixel(40, 5), Some(scale.color_for(1.0)));
    }

    #[test]
    fn test_speed_map_equal_segments_share_color() {
        let scale =
            ColorScale::from_config(&ColorScaleConfig::named_gradient("viridis")).unwrap();
        let points = [(5.0, 5.0), (15.0, 5.0), (25.0, 5.0)];
        let img = speed_map(&points, 30, 10, &scale);
        assert_eq!(img.get_pixel(10, 5), img.get_pixel(20, 5));
        assert_eq!(img.get_pixel(10, 5), Some(scale.color_for(1.0)));
    }

    #[test]
    fn test_speed_map_zero_length_segments() {
        let scale =
            ColorScale::from_config(&ColorScaleConfig::named_gradient("viridis")).unwrap();
        // All points coincide: max length is zero, everything shades at
        // the bottom of the scale without dividing.
        let points = [(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)];
        let img = speed_map(&points, 10, 10, &scale);
        assert_eq!(img.get_pixel(5, 5), Some(scale.color_for(0.0)));
    }

    #[test]
    fn test_empty_input_yields_transparent_raster() {
        let scale =
            ColorScale::from_config(&ColorScaleConfig::named_gradient("viridis")).unwrap();
        assert!(path_map(&[], 8, 8).pixels().iter().all(|&b| b == 0));
        assert!(index_hue_map(&[], 8, 8, [240.0, -50.0])
            .pixels()
            .iter()
            .all(|&b| b == 0));
        assert!(speed_map(&[], 8, 8, &scale).pixels().iter().all(|&b| b == 0));
    }
}
