use log::{debug, info};

use crate::dataset::{Point, PointSet};
use crate::engine::snapshot::{Centroid, CentroidId, History, Snapshot};

/// Default bound on assignment/update rounds
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Run Lloyd's algorithm from the given centroids, recording one snapshot
/// per assignment round until a fixed point or the iteration cap.
///
/// Snapshot 0 is the state immediately after initialization. The run is
/// converged once an update leaves every centroid exactly in place and the
/// assignment matches the previous round; the history then ends with the
/// snapshot proving the fixed point. The history always holds between 1 and
/// `max_iterations + 1` snapshots.
pub fn run_lloyd(
    points: &PointSet,
    initial_centroids: Vec<Centroid>,
    max_iterations: usize,
) -> History {
    let mut centroids = initial_centroids;
    let mut snapshots: Vec<Snapshot> = Vec::new();
    let mut converged = false;

    for iteration in 0..=max_iterations {
        let assignment = assign(points, &centroids);
        let assignment_stalled = snapshots
            .last()
            .map_or(true, |previous| previous.assignment == assignment);

        let updated = update(points, &centroids, &assignment);
        let moved = updated != centroids;

        snapshots.push(Snapshot {
            iteration,
            centroids: centroids.clone(),
            assignment,
        });

        if !moved && assignment_stalled {
            converged = true;
            info!("converged after {} iterations", iteration);
            break;
        }

        debug!("iteration {}: centroids still moving", iteration);
        centroids = updated;
    }

    if !converged {
        info!(
            "stopped at the iteration cap with {} snapshots recorded",
            snapshots.len()
        );
    }

    History {
        snapshots,
        converged,
    }
}

/// Nearest-centroid assignment. Exact distance ties go to the lowest
/// centroid id: centroids are iterated in id order and `min_by` keeps the
/// first minimum.
fn assign(points: &PointSet, centroids: &[Centroid]) -> Vec<CentroidId> {
    points
        .iter()
        .map(|point| {
            centroids
                .iter()
                .map(|centroid| (centroid.id, point.distance_squared(&centroid.position)))
                .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
                .unwrap()
                .0
        })
        .collect()
}

/// Mean update. A centroid with no assigned points keeps its position so
/// it never degenerates to NaN.
fn update(points: &PointSet, centroids: &[Centroid], assignment: &[CentroidId]) -> Vec<Centroid> {
    centroids
        .iter()
        .map(|centroid| {
            let members: Vec<&Point> = points
                .iter()
                .zip(assignment.iter())
                .filter(|&(_, assigned)| *assigned == centroid.id)
                .map(|(point, _)| point)
                .collect();

            if members.is_empty() {
                *centroid
            } else {
                Centroid {
                    id: centroid.id,
                    position: mean_position(&members),
                }
            }
        })
        .collect()
}

fn mean_position(members: &[&Point]) -> Point {
    let n = members.len() as f64;
    let (sum_x, sum_y) = members
        .iter()
        .fold((0.0, 0.0), |(sx, sy), point| (sx + point.x, sy + point.y));
    Point::new(sum_x / n, sum_y / n)
}
