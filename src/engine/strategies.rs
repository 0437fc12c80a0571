//! Map Strategies
//!
//! The built-in map units: two heatmaps, three trajectory views, two
//! temporal fields, and the region-containment analysis. Each is a thin
//! adapter from the shared context onto the pure renderers.

use crate::analysis::ContainmentAnalyzer;
use crate::color::ColorScale;
use crate::engine::{MapContext, MapResult, MapStrategy};
use crate::render::temporal::TemporalRenderer;
use crate::render::{heatmap, trajectory};
use crate::Result;
use std::sync::Arc;

fn result(name: &str, image: crate::render::RasterImage) -> MapResult {
    MapResult {
        name: name.to_string(),
        image,
        data: None,
    }
}

fn temporal_renderer(ctx: &MapContext) -> TemporalRenderer {
    TemporalRenderer {
        radius: ctx.config.radius,
        hue_range: ctx.config.hue_range,
        alpha_range: ctx.config.alpha_range,
        fixation_only: ctx.config.fixation_only,
    }
}

/// Opaque grayscale density heatmap.
pub struct GrayscaleHeatmap;

impl MapStrategy for GrayscaleHeatmap {
    fn name(&self) -> &'static str {
        "heatmap-bw"
    }

    fn compute(&self, ctx: &MapContext, progress: &mut dyn FnMut(f64)) -> Result<MapResult> {
        let image = heatmap::grayscale_map(&ctx.field);
        progress(1.0);
        Ok(result(self.name(), image))
    }
}

/// Hue-wheel density heatmap with eased alpha.
pub struct HueHeatmap;

impl MapStrategy for HueHeatmap {
    fn name(&self) -> &'static str {
        "heatmap-hue"
    }

    fn compute(&self, ctx: &MapContext, progress: &mut dyn FnMut(f64)) -> Result<MapResult> {
        let image = heatmap::hue_map(&ctx.field, ctx.config.hue_range, ctx.config.alpha_range);
        progress(1.0);
        Ok(result(self.name(), image))
    }
}

/// Plain black gaze path.
pub struct PathTrajectory;

impl MapStrategy for PathTrajectory {
    fn name(&self) -> &'static str {
        "trajectory-path"
    }

    fn compute(&self, ctx: &MapContext, progress: &mut dyn FnMut(f64)) -> Result<MapResult> {
        let points = ctx.corpus.flatten();
        let image = trajectory::path_map(&points, ctx.config.width, ctx.config.height);
        progress(1.0);
        Ok(result(self.name(), image))
    }
}

/// Gaze path colored by sample index along the hue range.
pub struct IndexHueTrajectory;

impl MapStrategy for IndexHueTrajectory {
    fn name(&self) -> &'static str {
        "trajectory-hue"
    }

    fn compute(&self, ctx: &MapContext, progress: &mut dyn FnMut(f64)) -> Result<MapResult> {
        let points = ctx.corpus.flatten();
        let image = trajectory::index_hue_map(
            &points,
            ctx.config.width,
            ctx.config.height,
            ctx.config.hue_range,
        );
        progress(1.0);
        Ok(result(self.name(), image))
    }
}

/// Gaze path colored by segment length through the configured scale.
pub struct SpeedTrajectory;

impl MapStrategy for SpeedTrajectory {
    fn name(&self) -> &'static str {
        "trajectory-speed"
    }

    fn compute(&self, ctx: &MapContext, progress: &mut dyn FnMut(f64)) -> Result<MapResult> {
        let scale = ColorScale::from_config(&ctx.config.speed_scale)?;
        let points = ctx.corpus.flatten();
        let image =
            trajectory::speed_map(&points, ctx.config.width, ctx.config.height, &scale);
        progress(1.0);
        Ok(result(self.name(), image))
    }
}

/// Temporal field, hue-blend variant.
pub struct TemporalHueMap;

impl MapStrategy for TemporalHueMap {
    fn name(&self) -> &'static str {
        "temporal-hue"
    }

    fn compute(&self, ctx: &MapContext, progress: &mut dyn FnMut(f64)) -> Result<MapResult> {
        let image = temporal_renderer(ctx).hue_blend_map(
            &ctx.corpus,
            ctx.config.width,
            ctx.config.height,
            progress,
        );
        Ok(result(self.name(), image))
    }
}

/// Temporal field, direct color-blend variant.
pub struct TemporalColorMap;

impl MapStrategy for TemporalColorMap {
    fn name(&self) -> &'static str {
        "temporal-color"
    }

    fn compute(&self, ctx: &MapContext, progress: &mut dyn FnMut(f64)) -> Result<MapResult> {
        let image = temporal_renderer(ctx).color_blend_map(
            &ctx.corpus,
            ctx.config.width,
            ctx.config.height,
            progress,
        );
        Ok(result(self.name(), image))
    }
}

/// Region containment tallies plus the annotated mask raster.
pub struct RegionContainment;

impl MapStrategy for RegionContainment {
    fn name(&self) -> &'static str {
        "region-containment"
    }

    fn compute(&self, ctx: &MapContext, progress: &mut dyn FnMut(f64)) -> Result<MapResult> {
        let analyzer = ContainmentAnalyzer::new(ctx.config.safe_offset);
        let analyses = analyzer.analyze(&ctx.corpus, &ctx.masks);
        let image =
            analyzer.annotate(&ctx.masks, &analyses, ctx.config.width, ctx.config.height)?;
        let data = serde_json::to_value(&analyses)?;
        progress(1.0);
        Ok(MapResult {
            name: self.name().to_string(),
            image,
            data: Some(data),
        })
    }
}

/// Every built-in map unit, in a stable order.
pub fn default_registry() -> Vec<Arc<dyn MapStrategy>> {
    vec![
        Arc::new(GrayscaleHeatmap),
        Arc::new(HueHeatmap),
        Arc::new(PathTrajectory),
        Arc::new(IndexHueTrajectory),
        Arc::new(SpeedTrajectory),
        Arc::new(TemporalHueMap),
        Arc::new(TemporalColorMap),
        Arc::new(RegionContainment),
    ]
}
