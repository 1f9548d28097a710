mod init;
mod lloyd;
mod snapshot;

#[cfg(test)]
mod tests;

pub use init::{InitStrategy, initialize};
pub use lloyd::{DEFAULT_MAX_ITERATIONS, run_lloyd};
pub use snapshot::{Centroid, CentroidId, History, Snapshot};
