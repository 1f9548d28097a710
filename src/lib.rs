// Public API exports
pub mod dataset;
pub mod engine;
pub mod error;
pub mod session;

// Re-export main types for convenience
pub use dataset::{DATASET_SPAN, DEFAULT_NUM_POINTS, Point, PointSet, generate_dataset};

pub use engine::{
    Centroid, CentroidId, DEFAULT_MAX_ITERATIONS, History, InitStrategy, Snapshot, initialize,
    run_lloyd,
};

pub use error::{Error, Result};

pub use session::{
    DEFAULT_K, InitConfig, InitSummary, InteractionController, RunSession, SessionState,
    StepOutcome,
};
