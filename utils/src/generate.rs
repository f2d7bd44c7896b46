//! Reproducible point sets for benchmarks and tests.

use ndarray::Array2;
use pdist::PointSet;
use rand::distr::StandardUniform;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};

fn sample_point_set<D: Distribution<f64>>(
    num_points: usize,
    dim: usize,
    seed: u64,
    distribution: D,
) -> pdist::Result<PointSet> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let coords = Array2::from_shape_simple_fn((num_points, dim), || distribution.sample(&mut rng));
    PointSet::new(coords)
}

/// `num_points` points with coordinates uniform in `[0, 1)`.
pub fn random_point_set(num_points: usize, dim: usize, seed: u64) -> pdist::Result<PointSet> {
    sample_point_set(num_points, dim, seed, StandardUniform)
}

/// `num_points` points with standard normal coordinates.
pub fn gaussian_point_set(num_points: usize, dim: usize, seed: u64) -> pdist::Result<PointSet> {
    sample_point_set(num_points, dim, seed, StandardNormal)
}
