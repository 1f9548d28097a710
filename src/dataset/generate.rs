use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::dataset::{Point, PointSet};
use crate::error::{Error, Result};

/// Side length of the square the generator samples from
pub const DATASET_SPAN: f64 = 10.0;

/// Dataset size used when the caller does not specify one
pub const DEFAULT_NUM_POINTS: usize = 300;

/// Generate `n` points uniform in `[0, DATASET_SPAN)` on both axes.
///
/// The caller owns the RNG, so two identically seeded generators always
/// produce the same dataset.
pub fn generate_dataset(n: usize, rng: &mut ChaCha8Rng) -> Result<PointSet> {
    if n == 0 {
        return Err(Error::InvalidDatasetSize { requested: n });
    }

    let points = (0..n)
        .map(|_| {
            Point::new(
                rng.gen_range(0.0..DATASET_SPAN),
                rng.gen_range(0.0..DATASET_SPAN),
            )
        })
        .collect();

    Ok(PointSet::new(points))
}
