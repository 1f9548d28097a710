mod generate;
mod point;

#[cfg(test)]
mod tests;

pub use generate::{DATASET_SPAN, DEFAULT_NUM_POINTS, generate_dataset};
pub use point::{Point, PointSet};
