use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::Serialize;
use std::ops::Index;

/// Square matrix of pairwise distances; entry `(i, j)` is the distance between
/// points `i` and `j` of the `PointSet` it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistanceMatrix {
    dists: Array2<f64>,
}

impl DistanceMatrix {
    pub(crate) fn from_square(dists: Array2<f64>) -> Self {
        debug_assert_eq!(dists.nrows(), dists.ncols());
        Self { dists }
    }

    /// Number of points (rows and columns).
    pub fn len(&self) -> usize {
        self.dists.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn shape(&self) -> (usize, usize) {
        self.dists.dim()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.dists.get([i, j]).copied()
    }

    pub fn row(&self, i: usize) -> ArrayView1<'_, f64> {
        self.dists.row(i)
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.dists.view()
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.dists
    }

    /// Exact symmetry check, `d[i][j] == d[j][i]` bit for bit (NaN cells compare by bits).
    pub fn is_symmetric(&self) -> bool {
        let n = self.len();
        (0..n).all(|i| {
            (i + 1..n).all(|j| self.dists[[i, j]].to_bits() == self.dists[[j, i]].to_bits())
        })
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.dists.rows().into_iter().map(|row| row.to_vec()).collect()
    }
}

impl Index<[usize; 2]> for DistanceMatrix {
    type Output = f64;

    fn index(&self, index: [usize; 2]) -> &f64 {
        &self.dists[index]
    }
}

impl From<DistanceMatrix> for Array2<f64> {
    fn from(value: DistanceMatrix) -> Self {
        value.into_inner()
    }
}
