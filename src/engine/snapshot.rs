use serde::{Deserialize, Serialize};

use crate::dataset::{Point, PointSet};

/// Identifier of a centroid, stable for the life of a run
pub type CentroidId = u32;

/// A cluster representative tagged with its stable id.
///
/// Ids are handed out in initialization order and never change within a
/// run, which is what makes per-iteration centroid identity (coloring,
/// legends, tie-breaking) meaningful across snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Centroid {
    pub id: CentroidId,
    pub position: Point,
}

/// The clustering state at one iteration: the centroid set plus the
/// point assignment computed from it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub iteration: usize,
    pub centroids: Vec<Centroid>,
    /// One entry per dataset index, value = owning centroid id
    pub assignment: Vec<CentroidId>,
}

impl Snapshot {
    /// Within-cluster sum of squared distances for this state.
    ///
    /// Centroid ids are dense and ordered, so an id doubles as an index
    /// into `centroids`.
    pub fn inertia(&self, points: &PointSet) -> f64 {
        points
            .iter()
            .zip(self.assignment.iter())
            .map(|(point, &id)| point.distance_squared(&self.centroids[id as usize].position))
            .sum()
    }

    /// Number of points owned by each centroid, indexed by id
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.centroids.len()];
        for &id in &self.assignment {
            sizes[id as usize] += 1;
        }
        sizes
    }
}

/// The full ordered snapshot sequence of one completed run
#[derive(Debug, Clone, Serialize)]
pub struct History {
    pub snapshots: Vec<Snapshot>,
    /// True when the run ended at a fixed point rather than the iteration cap
    pub converged: bool,
}

impl History {
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }
}
