//! Visualization Engine
//!
//! Named map units over shared read-only inputs. Every map (heatmaps,
//! trajectory variants, temporal fields, region containment) implements
//! [`MapStrategy`] as a pure function of the [`MapContext`]; the
//! orchestrator owns all concurrency and fans the units out over
//! threads.

pub mod orchestrator;
pub mod strategies;

pub use orchestrator::{Engine, EngineEvent, MapOutcome};
pub use strategies::default_registry;

use crate::color::ColorScaleConfig;
use crate::data::{GazeCorpus, PolygonMask};
use crate::field::ScalarField;
use crate::render::RasterImage;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Settings shared by every map unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Output raster width in pixels.
    pub width: usize,
    /// Output raster height in pixels.
    pub height: usize,
    /// Falloff kernel radius in pixels.
    pub radius: u32,
    /// Hue timeline in degrees, possibly descending.
    pub hue_range: [f64; 2],
    /// Alpha range in percent.
    pub alpha_range: [f64; 2],
    /// Color scale for the speed-coded trajectory.
    pub speed_scale: ColorScaleConfig,
    /// Containment margin from mask boundaries, in pixels.
    pub safe_offset: f64,
    /// Skip samples without a fixation id.
    pub fixation_only: bool,
    /// Process every loaded file, or only the most recent one.
    pub include_all_files: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 1200,
            radius: 30,
            hue_range: [240.0, -50.0],
            alpha_range: [0.0, 70.0],
            speed_scale: ColorScaleConfig::named_gradient("viridis"),
            safe_offset: 0.0,
            fixation_only: false,
            include_all_files: true,
        }
    }
}

/// Immutable snapshot every map unit computes against.
///
/// Built once per run, after field accumulation; no unit mutates it.
#[derive(Debug)]
pub struct MapContext {
    pub field: ScalarField,
    pub corpus: GazeCorpus,
    pub masks: Vec<PolygonMask>,
    pub config: EngineConfig,
}

/// One finished map: a raster plus optional structured data.
#[derive(Debug)]
pub struct MapResult {
    pub name: String,
    pub image: RasterImage,
    /// Structured payload, e.g. the containment tallies as JSON.
    pub data: Option<serde_json::Value>,
}

/// A named, independent map computation.
///
/// Implementations must be pure over the context: no unit may depend on
/// another unit's output, which is what lets the orchestrator run them
/// all concurrently.
pub trait MapStrategy: Send + Sync {
    /// Stable map name; results are identified by it, never by arrival
    /// order.
    fn name(&self) -> &'static str;

    /// Compute the map, reporting fractional progress along the way.
    fn compute(&self, ctx: &MapContext, progress: &mut dyn FnMut(f64)) -> Result<MapResult>;
}
