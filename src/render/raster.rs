//! RGBA Raster Buffer
//!
//! Dense `width x height x 4` byte buffer with straight (non-premultiplied)
//! alpha. Out-of-bounds writes are silently ignored so callers can stamp
//! kernels near the edges without pre-clipping.

use crate::color::Rgba;

/// Dense RGBA image, row-major, straight alpha.
#[derive(Debug, Clone)]
pub struct RasterImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a fully transparent image.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    /// Create an image filled with a single color.
    pub fn filled(width: usize, height: usize, color: Rgba) -> Self {
        let mut img = Self::new(width, height);
        for chunk in img.pixels.chunks_exact_mut(4) {
            chunk[0] = color.r;
            chunk[1] = color.g;
            chunk[2] = color.b;
            chunk[3] = color.a;
        }
        img
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes in row-major order.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consume the image, returning the raw byte buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some((y as usize * self.width + x as usize) * 4)
    }

    /// Read a pixel; `None` outside the image.
    pub fn get_pixel(&self, x: i64, y: i64) -> Option<Rgba> {
        let i = self.offset(x, y)?;
        Some(Rgba::new(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ))
    }

    /// Overwrite a pixel; out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i64, y: i64, color: Rgba) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = color.r;
            self.pixels[i + 1] = color.g;
            self.pixels[i + 2] = color.b;
            self.pixels[i + 3] = color.a;
        }
    }

    /// Source-over blend a pixel (straight alpha); out-of-bounds ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba) {
        let Some(i) = self.offset(x, y) else {
            return;
        };
        let sa = color.a as f64 / 255.0;
        if sa <= 0.0 {
            return;
        }
        let da = self.pixels[i + 3] as f64 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return;
        }
        for c in 0..3 {
            let src = [color.r, color.g, color.b][c] as f64;
            let dst = self.pixels[i + c] as f64;
            let blended = (src * sa + dst * da * (1.0 - sa)) / out_a;
            self.pixels[i + c] = (blended + 0.5).clamp(0.0, 255.0) as u8;
        }
        self.pixels[i + 3] = (out_a * 255.0 + 0.5).clamp(0.0, 255.0) as u8;
    }
}
