//! # Gazemap
//!
//! A gaze-recording visualization engine. Takes streams of gaze samples
//! (screen coordinates, nanosecond timestamps, optional fixation labels)
//! and turns them into raster maps: density heatmaps, hue-coded temporal
//! trajectories, speed-coded paths, and region-containment breakdowns
//! against user-supplied polygon masks.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gazemap::data::{GazeCorpus, GazeSample, GazeSeries};
//! use gazemap::engine::{Engine, EngineConfig};
//!
//! let mut series = GazeSeries::new("session".to_string());
//! series.push(GazeSample::new(800.0, 600.0, 0, f64::NAN));
//!
//! let mut corpus = GazeCorpus::new();
//! corpus.push(series);
//!
//! let mut engine = Engine::new(EngineConfig::default());
//! let (generation, outcomes) = engine.run_all(&corpus, &[]);
//! for outcome in &outcomes {
//!     println!("[{generation}] {}", outcome.name());
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`geometry`]: distance, smooth-falloff kernel, polygon primitives
//! - [`field`]: scalar gaze-density field, bounds, accumulation
//! - [`color`]: HSB conversion, easing, color-scale strategies
//! - [`render`]: raster buffer, drawing primitives, map renderers
//! - [`analysis`]: polygon-mask containment analysis
//! - [`data`]: gaze samples, corpus handling, tabular/mask ingestion
//! - [`engine`]: map-strategy registry and fan-out orchestration
//! - [`app`]: CLI and configuration management
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────┐    ┌─────────────┐    ┌──────────────┐    ┌───────────┐
//! │ CSV rows │───▶│ GazeCorpus  │───▶│ ScalarField  │───▶│ Map units │
//! │ (ingest) │    │ (selection) │    │ (accumulate) │    │ (fan-out) │
//! └──────────┘    └─────────────┘    └──────────────┘    └───────────┘
//! ```
//!
//! Every map unit is an independent pure computation over the shared
//! read-only field and corpus; results arrive in any order, keyed by
//! map name and tagged with the run's generation number.

pub mod geometry;
pub mod field;
pub mod color;
pub mod render;
pub mod analysis;
pub mod data;
pub mod engine;
pub mod app;

// Re-export commonly used types
pub use data::{GazeCorpus, GazeSample, GazeSeries, PolygonMask};
pub use engine::{Engine, EngineConfig, EngineEvent, MapOutcome, MapResult};
pub use field::ScalarField;
pub use render::RasterImage;

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Input error: {0}")]
    Input(String),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
