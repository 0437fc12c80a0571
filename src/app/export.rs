//! Map Export
//!
//! PNG encoding for finished rasters and the filename hygiene for map
//! names that come from user data (CSV file names, mask names).

use crate::render::RasterImage;
use crate::{Error, Result};
use std::path::Path;
use tracing::info;

/// Turn an arbitrary string into a filename-safe slug: lowercase, every
/// run of non-alphanumeric characters collapsed to one underscore, no
/// leading or trailing underscores.
pub fn safe_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_underscore = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            last_underscore = false;
        } else if !last_underscore {
            out.push('_');
            last_underscore = true;
        }
    }
    while out.ends_with('_') {
        out.pop();
    }
    out
}

/// Write a raster to disk as PNG.
pub fn save_raster_png(image: &RasterImage, path: &Path) -> Result<()> {
    let (width, height) = (image.width() as u32, image.height() as u32);
    let buffer = image::RgbaImage::from_raw(width, height, image.pixels().to_vec())
        .ok_or_else(|| {
            Error::Computation(format!(
                "raster buffer does not match {width}x{height} dimensions"
            ))
        })?;
    buffer.save_with_format(path, image::ImageFormat::Png)?;
    info!("Saved {}", path.display());
    Ok(())
}
