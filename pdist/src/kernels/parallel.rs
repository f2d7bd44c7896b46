use crate::kernels::scalar::unchecked_row;
use crate::PointSet;
use ndarray::{Array2, Axis};
use rayon::prelude::*;

/// Output rows split across the rayon pool; each row is the bounds-check-free
/// scalar kernel, so the result is identical to the sequential one.
pub(crate) fn parallel(points: &PointSet) -> Array2<f64> {
    let n = points.len();
    let mut result = Array2::zeros((n, n));

    result
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(i, row)| unchecked_row(points, i, row));

    result
}
