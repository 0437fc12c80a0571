//! Gazemap - Gaze Field & Visualization Engine
//!
//! Renders gaze-tracking recordings into density heatmaps, temporal
//! trajectories, and region-containment breakdowns.

use gazemap::app::cli::{Cli, Commands, ConfigAction};
use gazemap::app::config::Config;
use gazemap::app::export::{safe_filename, save_raster_png};
use gazemap::data::{parse_gaze_csv, parse_mask_document, GazeCorpus, PolygonMask};
use gazemap::engine::{Engine, EngineEvent, MapOutcome};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    match cli.command {
        Commands::Render { inputs, masks, out } => {
            run_render(&inputs, masks.as_deref(), out, &config)?;
        }
        Commands::Info { inputs } => {
            run_info(&inputs, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

fn load_corpus(inputs: &[PathBuf], config: &Config) -> anyhow::Result<GazeCorpus> {
    let mut corpus = GazeCorpus::new();
    for path in inputs {
        let text = std::fs::read_to_string(path)?;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let series = parse_gaze_csv(&text, &source, &config.ingest.columns)?;
        info!("Loaded {} samples from {}", series.len(), source);
        corpus.push(series);
    }
    Ok(corpus)
}

fn load_masks(path: Option<&Path>) -> anyhow::Result<Vec<PolygonMask>> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let masks = parse_mask_document(&text)?;
            info!("Loaded {} masks from {}", masks.len(), path.display());
            Ok(masks)
        }
        None => Ok(Vec::new()),
    }
}

fn run_render(
    inputs: &[PathBuf],
    masks: Option<&Path>,
    out: Option<PathBuf>,
    config: &Config,
) -> anyhow::Result<()> {
    let corpus = load_corpus(inputs, config)?;
    let masks = load_masks(masks)?;

    let out_dir = out.unwrap_or_else(|| {
        Cli::maps_dir().join(chrono::Local::now().format("maps_%Y%m%d_%H%M%S").to_string())
    });
    std::fs::create_dir_all(&out_dir)?;

    let mut engine = Engine::new(config.engine_config());
    let rx = engine.run(&corpus, &masks);
    let generation = engine.generation();

    let mut outcomes = Vec::new();
    for event in rx {
        if event.generation() != generation {
            continue;
        }
        match event {
            EngineEvent::FieldProgress { fraction, .. } => {
                debug!("Field accumulation: {:.0}%", fraction * 100.0);
            }
            EngineEvent::FieldReady { skipped, .. } => {
                if skipped > 0 {
                    info!("Field ready ({skipped} samples skipped by the fixation filter)");
                } else {
                    info!("Field ready");
                }
            }
            EngineEvent::MapProgress { map, fraction, .. } => {
                debug!("{map}: {:.0}%", fraction * 100.0);
            }
            EngineEvent::MapReady { result, .. } => outcomes.push(MapOutcome::Ready(result)),
            EngineEvent::MapFailed { map, error, .. } => {
                outcomes.push(MapOutcome::Failed { map, error })
            }
        }
    }

    let mut failures = 0usize;
    for outcome in outcomes {
        match outcome {
            MapOutcome::Ready(result) => {
                let path = out_dir.join(format!("{}.png", safe_filename(&result.name)));
                save_raster_png(&result.image, &path)?;
                if let Some(data) = result.data {
                    let data_path =
                        out_dir.join(format!("{}.json", safe_filename(&result.name)));
                    std::fs::write(&data_path, serde_json::to_string_pretty(&data)?)?;
                    info!("Saved {}", data_path.display());
                }
            }
            MapOutcome::Failed { map, error } => {
                failures += 1;
                warn!("Map '{map}' failed: {error}");
            }
        }
    }

    if failures > 0 {
        warn!("{failures} map(s) failed; the rest were written to {}", out_dir.display());
    } else {
        info!("All maps written to {}", out_dir.display());
    }
    Ok(())
}

fn run_info(inputs: &[PathBuf], config: &Config) -> anyhow::Result<()> {
    let corpus = load_corpus(inputs, config)?;
    println!("Series: {}", corpus.series().len());
    println!("Total samples: {}", corpus.sample_count());
    for series in corpus.series() {
        let fixations = series.samples().iter().filter(|s| s.has_fixation()).count();
        let finite = series
            .samples()
            .iter()
            .filter(|s| s.x.is_finite() && s.y.is_finite())
            .count();
        let span_s = match (
            series.samples().iter().map(|s| s.t_ns).min(),
            series.samples().iter().map(|s| s.t_ns).max(),
        ) {
            (Some(first), Some(last)) => (last - first) as f64 / 1e9,
            _ => 0.0,
        };
        println!(
            "  {}: {} samples over {:.2}s, {} with fixation id, {} with usable coordinates",
            series.source(),
            series.len(),
            span_s,
            fixations,
            finite
        );
    }
    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Init { force } => {
            let path = Config::default_path();
            if path.exists() && !force {
                warn!(
                    "Config already exists at {}; use --force to overwrite",
                    path.display()
                );
            } else {
                Config::default().save(&path)?;
                info!("Wrote default config to {}", path.display());
            }
        }
    }
    Ok(())
}
