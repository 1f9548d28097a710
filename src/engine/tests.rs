use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::dataset::{Point, PointSet};
use crate::error::Error;

fn pts(raw: &[(f64, f64)]) -> PointSet {
    PointSet::new(raw.iter().map(|&(x, y)| Point::new(x, y)).collect())
}

fn coords(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

fn rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

#[test]
fn test_two_cluster_manual_fixture() {
    let points = pts(&[(0.0, 0.0), (0.0, 1.0), (10.0, 0.0), (10.0, 1.0)]);
    let seeds = coords(&[(0.0, 0.0), (10.0, 0.0)]);
    let centroids =
        initialize(&points, 0, InitStrategy::Manual, Some(&seeds), &mut rng(1)).unwrap();

    let history = run_lloyd(&points, centroids, 100);

    assert_eq!(history.len(), 2);
    assert!(history.converged);

    let first = &history.snapshots[0];
    assert_eq!(first.iteration, 0);
    assert_eq!(first.assignment, vec![0, 0, 1, 1]);
    assert_eq!(first.centroids[0].position, Point::new(0.0, 0.0));
    assert_eq!(first.centroids[1].position, Point::new(10.0, 0.0));

    let second = &history.snapshots[1];
    assert_eq!(second.assignment, vec![0, 0, 1, 1]);
    assert_eq!(second.centroids[0].position, Point::new(0.0, 0.5));
    assert_eq!(second.centroids[1].position, Point::new(10.0, 0.5));
    assert_eq!(second.cluster_sizes(), vec![2, 2]);
}

#[test]
fn test_exact_tie_goes_to_lowest_id() {
    // (5, 0) is exactly equidistant from both seeds
    let points = pts(&[(5.0, 0.0), (0.0, 0.0), (10.0, 0.0)]);
    let seeds = coords(&[(0.0, 0.0), (10.0, 0.0)]);
    let centroids =
        initialize(&points, 0, InitStrategy::Manual, Some(&seeds), &mut rng(1)).unwrap();

    let history = run_lloyd(&points, centroids, 100);

    assert_eq!(history.snapshots[0].assignment[0], 0);
}

#[test]
fn test_empty_cluster_keeps_position() {
    let points = pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    let seeds = coords(&[(0.0, 0.0), (100.0, 100.0)]);
    let centroids =
        initialize(&points, 0, InitStrategy::Manual, Some(&seeds), &mut rng(1)).unwrap();

    let history = run_lloyd(&points, centroids, 100);

    assert!(history.converged);
    for snapshot in &history.snapshots {
        let far = &snapshot.centroids[1];
        assert_eq!(far.position, Point::new(100.0, 100.0));
        assert!(far.position.x.is_finite());
        assert!(far.position.y.is_finite());
    }
}

#[test]
fn test_initializer_returns_k_ordered_ids() {
    let points = pts(&[
        (0.0, 0.0),
        (1.0, 0.5),
        (2.0, 3.0),
        (8.0, 8.0),
        (9.0, 7.5),
        (5.0, 1.0),
        (4.0, 9.0),
        (6.5, 2.5),
    ]);

    for strategy in [
        InitStrategy::Random,
        InitStrategy::KmeansPlusPlus,
        InitStrategy::FarthestFirst,
    ] {
        let centroids = initialize(&points, 3, strategy, None, &mut rng(9)).unwrap();
        assert_eq!(centroids.len(), 3);
        for (index, centroid) in centroids.iter().enumerate() {
            assert_eq!(centroid.id, index as u32);
        }
    }
}

#[test]
fn test_manual_ids_follow_supplied_order() {
    let points = pts(&[(0.0, 0.0), (1.0, 1.0)]);
    let seeds = coords(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
    let centroids =
        initialize(&points, 0, InitStrategy::Manual, Some(&seeds), &mut rng(9)).unwrap();

    assert_eq!(centroids.len(), 3);
    assert_eq!(centroids[0].position, Point::new(1.0, 1.0));
    assert_eq!(centroids[2].position, Point::new(3.0, 3.0));
}

#[test]
fn test_random_seeds_are_distinct_dataset_points() {
    let points = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
    let centroids = initialize(&points, 4, InitStrategy::Random, None, &mut rng(4)).unwrap();

    let mut xs: Vec<f64> = centroids.iter().map(|c| c.position.x).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(xs, vec![0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn test_rejects_bad_cluster_counts() {
    let points = pts(&[(0.0, 0.0), (1.0, 1.0)]);

    assert!(matches!(
        initialize(&points, 0, InitStrategy::Random, None, &mut rng(3)),
        Err(Error::InvalidClusterCount {
            requested: 0,
            available: 2
        })
    ));
    assert!(matches!(
        initialize(&points, 3, InitStrategy::KmeansPlusPlus, None, &mut rng(3)),
        Err(Error::InvalidClusterCount { requested: 3, .. })
    ));
    assert!(matches!(
        initialize(&points, 3, InitStrategy::FarthestFirst, None, &mut rng(3)),
        Err(Error::InvalidClusterCount { requested: 3, .. })
    ));
}

#[test]
fn test_manual_rejections() {
    let points = pts(&[(0.0, 0.0), (1.0, 1.0)]);
    let single = coords(&[(1.0, 1.0)]);

    assert!(matches!(
        initialize(&points, 2, InitStrategy::Manual, Some(&single), &mut rng(3)),
        Err(Error::TooFewManualCentroids { supplied: 1 })
    ));
    assert!(matches!(
        initialize(&points, 2, InitStrategy::Manual, None, &mut rng(3)),
        Err(Error::MissingManualCentroids)
    ));
}

#[test]
fn test_identical_seeds_identical_histories() {
    let points = pts(&[
        (0.2, 0.4),
        (0.9, 1.1),
        (4.2, 4.0),
        (4.8, 3.7),
        (9.0, 0.5),
        (8.5, 1.2),
        (2.0, 8.0),
        (2.4, 7.1),
    ]);

    for strategy in [
        InitStrategy::Random,
        InitStrategy::KmeansPlusPlus,
        InitStrategy::FarthestFirst,
    ] {
        let a = run_lloyd(
            &points,
            initialize(&points, 3, strategy, None, &mut rng(123)).unwrap(),
            100,
        );
        let b = run_lloyd(
            &points,
            initialize(&points, 3, strategy, None, &mut rng(123)).unwrap(),
            100,
        );

        assert_eq!(a.snapshots, b.snapshots);
        assert_eq!(a.converged, b.converged);
    }
}

#[test]
fn test_iteration_cap_bounds_history() {
    let points = pts(&[(0.0, 0.0), (2.0, 0.0)]);
    // Both points fall to centroid 0, whose first update moves it, so a
    // cap of zero stops before the fixed point.
    let seeds = coords(&[(1.0, 0.5), (5.0, 5.0)]);

    let capped = run_lloyd(
        &points,
        initialize(&points, 0, InitStrategy::Manual, Some(&seeds), &mut rng(1)).unwrap(),
        0,
    );
    assert_eq!(capped.len(), 1);
    assert!(!capped.converged);

    let full = run_lloyd(
        &points,
        initialize(&points, 0, InitStrategy::Manual, Some(&seeds), &mut rng(1)).unwrap(),
        100,
    );
    assert!(full.converged);
    assert!(full.len() >= 2);
    assert!(full.len() <= 101);
}

#[test]
fn test_convergence_is_a_fixed_point() {
    let points = pts(&[
        (0.0, 0.0),
        (0.5, 0.5),
        (1.0, 0.0),
        (8.0, 8.0),
        (8.5, 8.5),
        (9.0, 8.0),
    ]);
    let centroids = initialize(&points, 2, InitStrategy::KmeansPlusPlus, None, &mut rng(5)).unwrap();

    let history = run_lloyd(&points, centroids, 100);
    assert!(history.converged);

    // Resuming from the final centroids reproduces the final snapshot
    // immediately: convergence is a true fixed point.
    let last = history.snapshots.last().unwrap();
    let resumed = run_lloyd(&points, last.centroids.clone(), 100);

    assert_eq!(resumed.len(), 1);
    assert!(resumed.converged);
    assert_eq!(resumed.snapshots[0].assignment, last.assignment);
    assert_eq!(resumed.snapshots[0].centroids, last.centroids);
}

#[test]
fn test_inertia_never_increases() {
    let points = pts(&[
        (0.1, 0.2),
        (0.8, 0.9),
        (1.5, 0.3),
        (5.0, 5.5),
        (5.2, 4.8),
        (6.1, 5.0),
        (9.5, 0.4),
        (8.8, 1.1),
        (9.1, 0.9),
        (3.3, 8.2),
        (2.9, 8.8),
        (3.7, 9.1),
    ]);
    let centroids = initialize(&points, 3, InitStrategy::Random, None, &mut rng(11)).unwrap();

    let history = run_lloyd(&points, centroids, 100);
    let inertias: Vec<f64> = history
        .snapshots
        .iter()
        .map(|snapshot| snapshot.inertia(&points))
        .collect();

    for pair in inertias.windows(2) {
        assert!(pair[1] <= pair[0] + 1e-9, "inertia increased: {:?}", pair);
    }
}

#[test]
fn test_kmeans_plus_plus_on_duplicate_points() {
    // Every D² weight is zero after the first seed; seeding falls back to
    // a uniform draw instead of dividing by zero.
    let points = pts(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]);
    let centroids = initialize(&points, 2, InitStrategy::KmeansPlusPlus, None, &mut rng(2)).unwrap();
    assert_eq!(centroids.len(), 2);

    let history = run_lloyd(&points, centroids, 10);
    assert!(history.converged);
    // Both centroids coincide, so every point ties down to id 0.
    let last = history.snapshots.last().unwrap();
    assert!(last.assignment.iter().all(|&id| id == 0));
}
