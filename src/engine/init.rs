use clap::ValueEnum;
use rand::{Rng, seq::SliceRandom};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::dataset::{Point, PointSet};
use crate::engine::snapshot::Centroid;
use crate::error::{Error, Result};

/// Centroid seeding strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitStrategy {
    /// k distinct dataset points, uniformly without replacement
    Random,
    /// D²-weighted sampling: each new seed is drawn with probability
    /// proportional to its squared distance from the nearest chosen seed
    #[value(name = "kmeans++", alias = "kmeans-plus-plus")]
    #[serde(rename = "kmeans++")]
    KmeansPlusPlus,
    /// Each new seed is the point farthest from the chosen set
    FarthestFirst,
    /// Caller-supplied coordinates, ids assigned by position
    Manual,
}

/// Produce the initial centroid set for one run.
///
/// `manual` is consulted only for [`InitStrategy::Manual`], where it is
/// required; `k` is ignored for manual initialization. Ids are assigned in
/// production order, 0..k.
pub fn initialize(
    points: &PointSet,
    k: usize,
    strategy: InitStrategy,
    manual: Option<&[Point]>,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<Centroid>> {
    let seeds = match strategy {
        InitStrategy::Random => random_seeds(points, k, rng)?,
        InitStrategy::KmeansPlusPlus => kmeans_plus_plus_seeds(points, k, rng)?,
        InitStrategy::FarthestFirst => farthest_first_seeds(points, k, rng)?,
        InitStrategy::Manual => manual_seeds(manual)?,
    };

    Ok(seeds
        .into_iter()
        .enumerate()
        .map(|(id, position)| Centroid {
            id: id as u32,
            position,
        })
        .collect())
}

fn check_cluster_count(points: &PointSet, k: usize) -> Result<()> {
    if k < 1 || k > points.len() {
        return Err(Error::InvalidClusterCount {
            requested: k,
            available: points.len(),
        });
    }
    Ok(())
}

fn random_seeds(points: &PointSet, k: usize, rng: &mut ChaCha8Rng) -> Result<Vec<Point>> {
    check_cluster_count(points, k)?;
    Ok(points.as_slice().choose_multiple(rng, k).copied().collect())
}

/// Squared distance from every point to its nearest seed
fn nearest_seed_distances(points: &PointSet, seeds: &[Point]) -> Vec<f64> {
    points
        .iter()
        .map(|point| {
            seeds
                .iter()
                .map(|seed| point.distance_squared(seed))
                .min_by(|a, b| a.partial_cmp(b).unwrap())
                .unwrap()
        })
        .collect()
}

fn kmeans_plus_plus_seeds(points: &PointSet, k: usize, rng: &mut ChaCha8Rng) -> Result<Vec<Point>> {
    check_cluster_count(points, k)?;

    let data = points.as_slice();
    let mut seeds = vec![data[rng.gen_range(0..data.len())]];

    while seeds.len() < k {
        let weights = nearest_seed_distances(points, &seeds);
        let total: f64 = weights.iter().sum();

        // Every remaining point coincides with a chosen seed; no weighting
        // is left, fall back to a uniform draw.
        let next = if total == 0.0 {
            data[rng.gen_range(0..data.len())]
        } else {
            let r = rng.gen_range(0.0..total);
            let mut cumulative = 0.0;
            let mut chosen = data.len() - 1;
            for (index, weight) in weights.iter().enumerate() {
                cumulative += weight;
                if cumulative >= r {
                    chosen = index;
                    break;
                }
            }
            data[chosen]
        };
        seeds.push(next);
    }

    Ok(seeds)
}

fn farthest_first_seeds(points: &PointSet, k: usize, rng: &mut ChaCha8Rng) -> Result<Vec<Point>> {
    check_cluster_count(points, k)?;

    let data = points.as_slice();
    let mut seeds = vec![data[rng.gen_range(0..data.len())]];

    while seeds.len() < k {
        let distances = nearest_seed_distances(points, &seeds);
        let farthest = distances
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(index, _)| index)
            .unwrap();
        seeds.push(data[farthest]);
    }

    Ok(seeds)
}

fn manual_seeds(manual: Option<&[Point]>) -> Result<Vec<Point>> {
    let supplied = manual.ok_or(Error::MissingManualCentroids)?;
    if supplied.len() < 2 {
        return Err(Error::TooFewManualCentroids {
            supplied: supplied.len(),
        });
    }
    Ok(supplied.to_vec())
}
