//! Pairwise Euclidean distance matrices.
//!
//! Every [`Variant`] computes the same `n x n` matrix
//! `d[i][j] = sqrt(sum_k (x[i][k] - x[j][k])^2)` for a [`PointSet`] of `n` points in
//! `p` dimensions; they differ only in how the arithmetic is laid out.
//!
//! ```
//! use pdist::{compute, PointSet};
//!
//! let points = PointSet::from_rows(&[[0.0, 0.0], [3.0, 4.0]]).unwrap();
//! let dists = compute(&points);
//! assert_eq!(dists.to_rows(), vec![vec![0.0, 5.0], vec![5.0, 0.0]]);
//! ```

mod distance_matrix;
mod error;
mod kernels;
mod point_set;

pub use distance_matrix::DistanceMatrix;
pub use error::{PdistError, Result};
pub use point_set::PointSet;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Triple nested loop with checked indexing.
    Naive,
    /// `(n, n, p)` broadcast difference array, squared, summed, rooted.
    Broadcast,
    /// Column-at-a-time fused evaluation into the output buffer.
    Fused,
    /// Scalar loop over 4-wide f64 lanes.
    Simd,
    /// Scalar loop over slices without bounds checks.
    Unchecked,
    /// Upper triangle only, mirrored.
    #[default]
    Symmetric,
    /// Rows spread across the rayon thread pool.
    Parallel,
    /// Centred norms and a matrix product, `|a|^2 + |b|^2 - 2a.b`, with
    /// cancelling pairs recomputed directly.
    Gram,
}

impl Variant {
    pub const ALL: [Variant; 8] = [
        Variant::Naive,
        Variant::Broadcast,
        Variant::Fused,
        Variant::Simd,
        Variant::Unchecked,
        Variant::Symmetric,
        Variant::Parallel,
        Variant::Gram,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Variant::Naive => "naive",
            Variant::Broadcast => "broadcast",
            Variant::Fused => "fused",
            Variant::Simd => "simd",
            Variant::Unchecked => "unchecked",
            Variant::Symmetric => "symmetric",
            Variant::Parallel => "parallel",
            Variant::Gram => "gram",
        }
    }

    /// False for variants whose arithmetic differs from the direct difference
    /// formula by more than summation order.
    pub fn is_direct(&self) -> bool {
        !matches!(self, Variant::Gram)
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = PdistError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Variant::ALL
            .into_iter()
            .find(|v| v.name() == wanted)
            .ok_or_else(|| {
                let names: Vec<_> = Variant::ALL.iter().map(Variant::name).collect();
                PdistError::invalid(format!(
                    "unknown variant '{s}', expected one of: {}",
                    names.join(", ")
                ))
            })
    }
}

/// Pairwise distances with the default variant.
pub fn compute(points: &PointSet) -> DistanceMatrix {
    compute_with(points, Variant::default())
}

pub fn compute_with(points: &PointSet, variant: Variant) -> DistanceMatrix {
    log::debug!(
        "{variant}: {} points in {} dimensions",
        points.len(),
        points.dim()
    );

    let dists = match variant {
        Variant::Naive => kernels::scalar::naive(points),
        Variant::Broadcast => kernels::array::broadcast(points),
        Variant::Fused => kernels::array::fused(points),
        Variant::Simd => kernels::simd::simd(points),
        Variant::Unchecked => kernels::scalar::unchecked(points),
        Variant::Symmetric => kernels::scalar::symmetric(points),
        Variant::Parallel => kernels::parallel::parallel(points),
        Variant::Gram => kernels::array::gram(points),
    };

    DistanceMatrix::from_square(dists)
}
