use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::dataset::{Point, PointSet, generate_dataset};
use crate::engine::{DEFAULT_MAX_ITERATIONS, InitStrategy, Snapshot, initialize, run_lloyd};
use crate::error::Result;
use crate::session::run::{RunSession, StepOutcome};

/// Cluster count used when the caller does not specify one
pub const DEFAULT_K: usize = 3;

// Separate RNG stream so dataset sampling never shares randomness with
// centroid seeding.
const DATASET_STREAM: u64 = 0x9e37_79b9_7f4a_7c15;

/// Everything `init` recognizes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitConfig {
    /// Number of clusters; ignored for manual initialization
    pub k: usize,
    pub strategy: InitStrategy,
    /// Required iff the strategy is manual, minimum length 2
    pub manual_centroids: Option<Vec<Point>>,
}

impl Default for InitConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            strategy: InitStrategy::Random,
            manual_centroids: None,
        }
    }
}

/// What `init` reports back to the boundary layer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct InitSummary {
    pub run_id: Uuid,
    /// `len(History) - 1`: how many advances remain before the end
    pub total_steps: usize,
}

/// Observable state of the interaction machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Ready,
    Converged,
}

/// The state machine a client drives: one dataset, at most one live run,
/// a cursor over its history.
///
/// This is an owned context object rather than process-global state; a
/// boundary layer that wants concurrent independent runs allocates one
/// controller per session and owns its lifecycle.
pub struct InteractionController {
    points: PointSet,
    seed: u64,
    dataset_generation: u64,
    max_iterations: usize,
    last_config: InitConfig,
    run: Option<RunSession>,
}

impl InteractionController {
    /// Create a controller with a freshly generated dataset.
    ///
    /// Every stream of randomness below derives from `seed`, so two
    /// controllers built with the same arguments behave identically.
    pub fn new(num_points: usize, seed: u64) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed ^ DATASET_STREAM);
        let points = generate_dataset(num_points, &mut rng)?;
        Ok(Self::with_points(points, seed))
    }

    /// Create a controller over a caller-supplied dataset
    pub fn with_points(points: PointSet, seed: u64) -> Self {
        Self {
            points,
            seed,
            dataset_generation: 0,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            last_config: InitConfig::default(),
            run: None,
        }
    }

    /// Override the Lloyd iteration cap
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn state(&self) -> SessionState {
        match &self.run {
            None => SessionState::Uninitialized,
            Some(run) if run.is_converged() => SessionState::Converged,
            Some(_) => SessionState::Ready,
        }
    }

    /// Read-only dataset accessor, used by manual-selection UIs to render
    /// points before any centroid is chosen
    pub fn data_points(&self) -> &PointSet {
        &self.points
    }

    /// The live run, if any
    pub fn run(&self) -> Option<&RunSession> {
        self.run.as_ref()
    }

    /// The snapshot at the current cursor, if a run exists
    pub fn current(&self) -> Option<&Snapshot> {
        self.run.as_ref().map(|run| run.current())
    }

    /// Compute a fresh run from scratch and park the cursor at snapshot 0.
    /// Valid from any state; a previous run is replaced wholesale.
    pub fn init(&mut self, config: InitConfig) -> Result<InitSummary> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let centroids = initialize(
            &self.points,
            config.k,
            config.strategy,
            config.manual_centroids.as_deref(),
            &mut rng,
        )?;

        let history = run_lloyd(&self.points, centroids, self.max_iterations);
        let run = RunSession::new(history);
        let summary = InitSummary {
            run_id: run.id(),
            total_steps: run.total_steps(),
        };

        info!(
            "run {} ready: {} snapshots, converged: {}",
            summary.run_id,
            run.history().len(),
            run.history().converged
        );

        self.last_config = config;
        self.run = Some(run);
        Ok(summary)
    }

    /// Advance one step. Stepping before any `init` starts a run with the
    /// last-used (or default) configuration instead of failing.
    pub fn step(&mut self) -> Result<StepOutcome> {
        let run = self.ensure_run()?;
        Ok(run.advance())
    }

    /// Jump straight to the final snapshot, initializing first if needed
    pub fn run_to_end(&mut self) -> Result<Snapshot> {
        let run = self.ensure_run()?;
        Ok(run.jump_to_end().clone())
    }

    /// Drop the run but keep the dataset
    pub fn reset(&mut self) {
        self.run = None;
    }

    /// Replace the dataset wholesale; any live run is discarded.
    ///
    /// Each regeneration draws from a distinct derived stream, so repeated
    /// calls produce fresh datasets while the controller as a whole stays
    /// reproducible from its seed.
    pub fn new_dataset(&mut self, num_points: usize) -> Result<&PointSet> {
        let generation = self.dataset_generation + 1;
        let mut rng =
            ChaCha8Rng::seed_from_u64((self.seed ^ DATASET_STREAM).wrapping_add(generation));
        self.points = generate_dataset(num_points, &mut rng)?;
        self.dataset_generation = generation;
        self.reset();
        Ok(&self.points)
    }

    fn ensure_run(&mut self) -> Result<&mut RunSession> {
        if self.run.is_none() {
            self.init(self.last_config.clone())?;
        }
        // init always installs a run on success
        Ok(self.run.as_mut().unwrap())
    }
}
