use thiserror::Error;

/// Errors surfaced to the boundary layer as rejected requests.
///
/// Every variant is a parameter-validation failure. Clustering itself is
/// deterministic and cannot fail once its inputs are accepted, so nothing
/// is retried internally.
#[derive(Debug, Error)]
pub enum Error {
    /// k is outside 1..=|dataset|
    #[error("invalid cluster count: requested {requested}, dataset has {available} points")]
    InvalidClusterCount { requested: usize, available: usize },

    /// Manual strategy selected without supplying centroids
    #[error("manual initialization selected but no centroids were supplied")]
    MissingManualCentroids,

    /// Manual strategy needs at least two centroids
    #[error("manual initialization needs at least 2 centroids, got {supplied}")]
    TooFewManualCentroids { supplied: usize },

    /// Dataset must contain at least one point
    #[error("dataset size must be at least 1, got {requested}")]
    InvalidDatasetSize { requested: usize },
}

/// Result type used by this crate
pub type Result<T> = std::result::Result<T, Error>;
