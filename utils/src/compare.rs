use pdist::DistanceMatrix;

/// `|a - b| <= tol * max(1, |a|, |b|)`; two NaNs compare equal.
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a == b {
        return true;
    }
    if a.is_infinite() || b.is_infinite() {
        return false;
    }
    (a - b).abs() <= tol * a.abs().max(b.abs()).max(1.0)
}

/// Same shape and every cell `approx_eq`.
pub fn matrices_agree(a: &DistanceMatrix, b: &DistanceMatrix, tol: f64) -> bool {
    a.shape() == b.shape()
        && a
            .view()
            .iter()
            .zip(b.view().iter())
            .all(|(&x, &y)| approx_eq(x, y, tol))
}

/// Largest absolute cell difference, `None` if the shapes differ.
pub fn max_abs_diff(a: &DistanceMatrix, b: &DistanceMatrix) -> Option<f64> {
    if a.shape() != b.shape() {
        return None;
    }
    Some(
        a.view()
            .iter()
            .zip(b.view().iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f64::max),
    )
}
