use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::error::Error;

#[test]
fn test_generate_count_and_bounds() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let points = generate_dataset(100, &mut rng).unwrap();

    assert_eq!(points.len(), 100);
    for point in points.iter() {
        assert!(point.x >= 0.0 && point.x < DATASET_SPAN);
        assert!(point.y >= 0.0 && point.y < DATASET_SPAN);
    }
}

#[test]
fn test_generate_deterministic_per_seed() {
    let mut a = ChaCha8Rng::seed_from_u64(42);
    let mut b = ChaCha8Rng::seed_from_u64(42);

    assert_eq!(
        generate_dataset(50, &mut a).unwrap(),
        generate_dataset(50, &mut b).unwrap()
    );
}

#[test]
fn test_generate_rejects_empty() {
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    assert!(matches!(
        generate_dataset(0, &mut rng),
        Err(Error::InvalidDatasetSize { requested: 0 })
    ));
}

#[test]
fn test_point_distance_squared() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);

    assert_eq!(a.distance_squared(&b), 25.0);
    assert_eq!(b.distance_squared(&a), 25.0);
    assert_eq!(a.distance_squared(&a), 0.0);
}

#[test]
fn test_point_set_indexing_is_stable() {
    let points = PointSet::new(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]);

    assert_eq!(points.len(), 2);
    assert_eq!(points.get(1), Some(&Point::new(3.0, 4.0)));
    assert_eq!(points.get(2), None);
}
