//! Scalar loop kernels: checked triple loop, bounds-check-free loop, upper triangle.

use crate::PointSet;
use ndarray::{Array2, ArrayViewMut1};

/// Euclidean distance between two coordinate slices of equal length.
#[inline]
pub fn euc(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    f64::sqrt(
        a.iter()
            .zip(b.iter())
            .map(|(a, b)| {
                let d = a - b;
                d * d
            })
            .sum(),
    )
}

/// Textbook i, j, k loop over the coordinate table with checked indexing.
pub(crate) fn naive(points: &PointSet) -> Array2<f64> {
    let x = points.view();
    let (n, p) = x.dim();
    let mut result = Array2::zeros((n, n));

    for i in 0..n {
        for j in 0..n {
            let mut acc = 0.0;
            for k in 0..p {
                let d = x[[i, k]] - x[[j, k]];
                acc += d * d;
            }
            result[[i, j]] = acc.sqrt();
        }
    }

    result
}

/// Same loop as [`naive`] without bounds checks.
pub(crate) fn unchecked(points: &PointSet) -> Array2<f64> {
    let n = points.len();
    let mut result = Array2::zeros((n, n));

    for (i, row) in result.rows_mut().into_iter().enumerate() {
        unchecked_row(points, i, row);
    }

    result
}

/// Fills `out` with the distances from point `i` to every point.
///
/// `out` must have `points.len()` elements and `i < points.len()`.
pub(crate) fn unchecked_row(points: &PointSet, i: usize, mut out: ArrayViewMut1<f64>) {
    let data = points.as_slice();
    let n = points.len();
    let p = points.dim();
    assert!(i < n && out.len() == n);

    // SAFETY: data.len() == n * p, i < n, j < n, k < p and out.len() == n.
    unsafe {
        let row_i = data.get_unchecked(i * p..(i + 1) * p);
        for j in 0..n {
            let row_j = data.get_unchecked(j * p..(j + 1) * p);
            let mut acc = 0.0;
            for k in 0..p {
                let d = *row_i.get_unchecked(k) - *row_j.get_unchecked(k);
                acc += d * d;
            }
            *out.uget_mut(j) = acc.sqrt();
        }
    }
}

/// Computes the `n(n-1)/2` pairs above the diagonal and mirrors them. The
/// diagonal is still evaluated so non-finite coordinates show up there too.
pub(crate) fn symmetric(points: &PointSet) -> Array2<f64> {
    let n = points.len();
    let p = points.dim();
    let data = points.as_slice();
    let mut result = Array2::zeros((n, n));

    for (i, row_i) in data.chunks_exact(p).enumerate() {
        result[[i, i]] = euc(row_i, row_i);
        for (j, row_j) in data.chunks_exact(p).enumerate().skip(i + 1) {
            let dist = euc(row_i, row_j);
            result[[i, j]] = dist;
            result[[j, i]] = dist;
        }
    }

    result
}
