//! Engine Orchestrator
//!
//! Owns all concurrency: one run accumulates the density field (the
//! long pole, with incremental progress), snapshots the shared context,
//! then fans every map unit out onto its own thread. Results stream
//! back over a channel in completion order and are identified by map
//! name, never by arrival order.
//!
//! Every event is tagged with the generation of the run that produced
//! it, so a consumer that re-invokes the engine can discard stale
//! results from a superseded run. A failing unit reports a per-map
//! error; its siblings always run to completion.

use crate::data::{GazeCorpus, PolygonMask};
use crate::engine::{default_registry, EngineConfig, MapContext, MapResult, MapStrategy};
use crate::field::FieldAccumulator;
use crate::Error;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, warn};

/// Minimum progress delta between two progress events of one unit.
const PROGRESS_STEP: f64 = 0.01;

/// Streamed engine output, tagged with the producing run's generation.
#[derive(Debug)]
pub enum EngineEvent {
    /// Field accumulation progress, fraction in `[0, 1]`.
    FieldProgress { generation: u64, fraction: f64 },
    /// The field is built; map units are about to start.
    FieldReady { generation: u64, skipped: usize },
    /// Per-map progress, fraction in `[0, 1]`.
    MapProgress {
        generation: u64,
        map: &'static str,
        fraction: f64,
    },
    /// A map unit finished.
    MapReady { generation: u64, result: MapResult },
    /// A map unit failed; siblings keep running.
    MapFailed {
        generation: u64,
        map: &'static str,
        error: Error,
    },
}

impl EngineEvent {
    pub fn generation(&self) -> u64 {
        match self {
            EngineEvent::FieldProgress { generation, .. }
            | EngineEvent::FieldReady { generation, .. }
            | EngineEvent::MapProgress { generation, .. }
            | EngineEvent::MapReady { generation, .. }
            | EngineEvent::MapFailed { generation, .. } => *generation,
        }
    }
}

/// Terminal state of one map unit within a run.
#[derive(Debug)]
pub enum MapOutcome {
    Ready(MapResult),
    Failed { map: &'static str, error: Error },
}

impl MapOutcome {
    pub fn name(&self) -> &str {
        match self {
            MapOutcome::Ready(result) => &result.name,
            MapOutcome::Failed { map, .. } => map,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, MapOutcome::Ready(_))
    }
}

/// The one component aware of threads and channels.
pub struct Engine {
    config: EngineConfig,
    strategies: Vec<Arc<dyn MapStrategy>>,
    generation: u64,
}

impl Engine {
    /// Engine with the built-in map registry.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_strategies(config, default_registry())
    }

    /// Engine with a custom set of map units.
    pub fn with_strategies(config: EngineConfig, strategies: Vec<Arc<dyn MapStrategy>>) -> Self {
        Self {
            config,
            strategies,
            generation: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generation of the most recently started run.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a full recomputation and stream events back.
    ///
    /// The receiver ends when every map unit of this run has reported.
    /// Inputs are snapshotted at call time; the caller may mutate its
    /// own copies immediately.
    pub fn run(&mut self, corpus: &GazeCorpus, masks: &[PolygonMask]) -> Receiver<EngineEvent> {
        self.generation += 1;
        let generation = self.generation;
        let config = self.config.clone();
        let strategies = self.strategies.clone();
        let corpus = if config.include_all_files {
            corpus.clone()
        } else {
            corpus.latest_only()
        };
        let masks = masks.to_vec();

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            run_generation(generation, config, strategies, corpus, masks, tx)
        });
        rx
    }

    /// Run to completion, returning this run's generation and every map
    /// outcome. Events from superseded generations are discarded.
    pub fn run_all(
        &mut self,
        corpus: &GazeCorpus,
        masks: &[PolygonMask],
    ) -> (u64, Vec<MapOutcome>) {
        let rx = self.run(corpus, masks);
        let generation = self.generation;

        let mut outcomes = Vec::new();
        for event in rx {
            if event.generation() != generation {
                continue;
            }
            match event {
                EngineEvent::MapReady { result, .. } => outcomes.push(MapOutcome::Ready(result)),
                EngineEvent::MapFailed { map, error, .. } => {
                    outcomes.push(MapOutcome::Failed { map, error })
                }
                _ => {}
            }
        }
        (generation, outcomes)
    }
}

fn run_generation(
    generation: u64,
    config: EngineConfig,
    strategies: Vec<Arc<dyn MapStrategy>>,
    corpus: GazeCorpus,
    masks: Vec<PolygonMask>,
    tx: Sender<EngineEvent>,
) {
    info!(
        "Run {generation}: {} samples, {} masks, {} map units",
        corpus.sample_count(),
        masks.len(),
        strategies.len()
    );

    let accumulator = FieldAccumulator::new(config.radius, config.fixation_only);
    let mut last = -1.0;
    let accumulated = accumulator.accumulate(&corpus, config.width, config.height, &mut |f| {
        if f - last >= PROGRESS_STEP || f >= 1.0 {
            last = f;
            let _ = tx.send(EngineEvent::FieldProgress {
                generation,
                fraction: f,
            });
        }
    });
    let _ = tx.send(EngineEvent::FieldReady {
        generation,
        skipped: accumulated.skipped,
    });

    let ctx = Arc::new(MapContext {
        field: accumulated.field,
        corpus,
        masks,
        config,
    });

    let handles: Vec<_> = strategies
        .into_iter()
        .map(|strategy| {
            let ctx = Arc::clone(&ctx);
            let tx = tx.clone();
            thread::spawn(move || run_unit(generation, &*strategy, &ctx, &tx))
        })
        .collect();

    for handle in handles {
        if handle.join().is_err() {
            warn!("Run {generation}: a map unit thread panicked");
        }
    }
    debug!("Run {generation}: all map units reported");
}

fn run_unit(
    generation: u64,
    strategy: &dyn MapStrategy,
    ctx: &MapContext,
    tx: &Sender<EngineEvent>,
) {
    let map = strategy.name();
    let mut last = -1.0;
    let outcome = strategy.compute(ctx, &mut |f| {
        if f - last >= PROGRESS_STEP || f >= 1.0 {
            last = f;
            let _ = tx.send(EngineEvent::MapProgress {
                generation,
                map,
                fraction: f,
            });
        }
    });

    let event = match outcome {
        Ok(result) => {
            debug!("Run {generation}: map '{map}' ready");
            EngineEvent::MapReady { generation, result }
        }
        Err(error) => {
            warn!("Run {generation}: map '{map}' failed: {error}");
            EngineEvent::MapFailed {
                generation,
                map,
                error,
            }
        }
    };
    let _ = tx.send(event);
}
