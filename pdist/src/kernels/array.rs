//! Whole-array kernels built on ndarray operations.

use crate::kernels::scalar::euc;
use crate::PointSet;
use ndarray::{s, Array2, Axis, NewAxis, Zip};

/// Broadcast `x[:, None, :] - x[None, :, :]` to an `(n, n, p)` difference array,
/// square, sum over the last axis and take the root.
pub(crate) fn broadcast(points: &PointSet) -> Array2<f64> {
    let x = points.view();
    let diffs = &x.slice(s![.., NewAxis, ..]) - &x.slice(s![NewAxis, .., ..]);

    diffs
        .mapv(|d| d * d)
        .sum_axis(Axis(2))
        .mapv(f64::sqrt)
}

/// Evaluates `sum_k (x[i, k] - x[j, k])^2` straight into the output, one
/// coordinate column per pass, without materialising the difference array.
pub(crate) fn fused(points: &PointSet) -> Array2<f64> {
    let x = points.view();
    let n = x.nrows();
    let mut result = Array2::<f64>::zeros((n, n));

    for column in x.columns() {
        let as_rows = column.insert_axis(Axis(1));
        let as_cols = column.insert_axis(Axis(0));

        Zip::from(&mut result)
            .and_broadcast(&as_rows)
            .and_broadcast(&as_cols)
            .for_each(|acc, &a, &b| {
                let d = a - b;
                *acc += d * d;
            });
    }

    result.mapv_inplace(f64::sqrt);
    result
}

/// Squared distances at or below this fraction of `|a|^2 + |b|^2` are dominated
/// by cancellation and are recomputed from the coordinates.
const CANCELLATION_RATIO: f64 = 1e-4;

/// Gram-matrix form: `|a - b|^2 = |a|^2 + |b|^2 - 2 a.b`, with the dot products
/// coming from ndarray's matrix multiply.
///
/// Coordinates are centred on the column means first, which leaves distances
/// unchanged and keeps the norms small. Pairs whose squared distance falls under
/// `CANCELLATION_RATIO` of their norms, and pairs that come out non-finite, are
/// recomputed directly with [`euc`], as is the diagonal. The lower triangle
/// mirrors the upper one.
pub(crate) fn gram(points: &PointSet) -> Array2<f64> {
    let x = points.view();
    let n = x.nrows();
    let mut result = Array2::zeros((n, n));
    let Some(means) = x.mean_axis(Axis(0)) else {
        return result;
    };

    let centred = &x - &means;
    let products = centred.dot(&centred.t());
    let norms = products.diag();
    let rows: Vec<&[f64]> = points.as_slice().chunks_exact(points.dim()).collect();

    for i in 0..n {
        result[[i, i]] = euc(rows[i], rows[i]);
        for j in i + 1..n {
            let scale = norms[i] + norms[j];
            let sq = scale - 2.0 * products[[i, j]];
            let dist = if sq.is_finite() && scale.is_finite() && sq > CANCELLATION_RATIO * scale {
                sq.sqrt()
            } else {
                euc(rows[i], rows[j])
            };
            result[[i, j]] = dist;
            result[[j, i]] = dist;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::scalar::naive;
    use ndarray::array;

    fn sample() -> PointSet {
        PointSet::new(array![
            [0.0, 0.0, 0.0],
            [1.0, 2.0, 2.0],
            [-4.0, 0.5, 3.25],
            [10.0, -7.0, 0.125],
            [1.0, 2.0, 2.0],
        ])
        .unwrap()
    }

    #[test]
    fn broadcast_matches_loop() {
        let points = sample();
        assert_eq!(broadcast(&points), naive(&points));
    }

    #[test]
    fn fused_matches_loop() {
        let points = sample();
        assert_eq!(fused(&points), naive(&points));
    }

    #[test]
    fn gram_close_to_loop() {
        let points = sample();
        let expected = naive(&points);
        let actual = gram(&points);
        assert_close(&expected, &actual);
        assert_eq!(actual[[1, 4]], 0.0);
        assert_eq!(actual[[1, 1]], 0.0);
    }

    fn assert_close(expected: &Array2<f64>, actual: &Array2<f64>) {
        Zip::from(expected).and(actual).for_each(|&e, &a| {
            assert!((e - a).abs() <= 1e-9 * e.abs().max(1.0), "{e} vs {a}");
        });
    }

    #[test]
    fn gram_handles_points_far_from_origin() {
        let points = PointSet::new(array![[1e6, 0.0], [1e6 + 1e-3, 0.0], [1e6, 2e-3]]).unwrap();
        let expected = naive(&points);
        let actual = gram(&points);
        assert_close(&expected, &actual);
        assert!(actual[[0, 1]] > 0.0);
    }

    #[test]
    fn gram_does_not_overflow_on_large_finite_input() {
        let points = PointSet::new(array![[1e155], [1.0000001e155]]).unwrap();
        let actual = gram(&points);
        assert!(actual[[0, 1]].is_finite());
        assert_close(&naive(&points), &actual);
    }

    #[test]
    fn gram_propagates_non_finite_like_the_loop() {
        let points = PointSet::new(array![[0.0, 0.0], [f64::NAN, 1.0], [f64::INFINITY, 0.0]]).unwrap();
        let actual = gram(&points);
        assert!(actual[[1, 1]].is_nan());
        assert!(actual[[0, 1]].is_nan());
        assert_eq!(actual[[0, 2]], f64::INFINITY);
        assert_eq!(actual[[0, 0]], 0.0);
    }

    #[test]
    fn empty_sets() {
        let points = PointSet::empty(3).unwrap();
        assert_eq!(broadcast(&points).dim(), (0, 0));
        assert_eq!(fused(&points).dim(), (0, 0));
        assert_eq!(gram(&points).dim(), (0, 0));
    }
}
