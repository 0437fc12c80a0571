//! Raster Rendering
//!
//! The RGBA raster buffer, drawing primitives, and the map renderers
//! that turn fields and trajectories into images.

pub mod draw;
pub mod heatmap;
pub mod raster;
pub mod temporal;
pub mod text;
pub mod trajectory;

pub use raster::RasterImage;
