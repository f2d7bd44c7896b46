use crate::PointSet;
use ndarray::Array2;
use wide::f64x4;

const LANES: usize = 4;

/// The scalar loop with the `j` index spread over four f64 lanes.
///
/// Coordinates are transposed once to column-major so each lane load is contiguous.
pub(crate) fn simd(points: &PointSet) -> Array2<f64> {
    let n = points.len();
    let p = points.dim();
    let x = points.view();
    // columns[k * n + j] == x[[j, k]]
    let columns: Vec<f64> = x.t().iter().copied().collect();
    let mut result = Array2::zeros((n, n));
    let full = n - n % LANES;

    for (i, mut out) in result.rows_mut().into_iter().enumerate() {
        let row_i = x.row(i);

        for j in (0..full).step_by(LANES) {
            let mut acc = f64x4::splat(0.0);
            for (k, &xi) in row_i.iter().enumerate() {
                let c = &columns[k * n + j..k * n + j + LANES];
                let d = f64x4::splat(xi) - f64x4::new([c[0], c[1], c[2], c[3]]);
                acc += d * d;
            }
            for (lane, dist) in acc.sqrt().to_array().into_iter().enumerate() {
                out[j + lane] = dist;
            }
        }

        for j in full..n {
            let mut acc = 0.0;
            for k in 0..p {
                let d = row_i[k] - columns[k * n + j];
                acc += d * d;
            }
            out[j] = acc.sqrt();
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::scalar::naive;

    fn grid(n: usize, p: usize) -> PointSet {
        let data = (0..n * p)
            .map(|v| ((v * 37 % 101) as f64 - 50.0) / 7.0)
            .collect();
        PointSet::from_shape_vec(n, p, data).unwrap()
    }

    #[test]
    fn lanes_and_tail_match_loop() {
        for n in [0, 1, 3, 4, 5, 8, 11] {
            for p in [1, 2, 3, 9] {
                let points = grid(n, p);
                assert_eq!(simd(&points), naive(&points), "n = {n}, p = {p}");
            }
        }
    }
}
