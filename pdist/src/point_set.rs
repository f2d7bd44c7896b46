use crate::error::{PdistError, Result};
use ndarray::{Array2, ArrayD, ArrayView1, ArrayView2, Ix2};

/// An ordered set of `n` points in `p` dimensions, held row-major as an `n x p` table.
///
/// Every constructor validates the shape, so a `PointSet` always has at least one
/// coordinate column and is stored in standard (C) layout.
#[derive(Debug, Clone, PartialEq)]
pub struct PointSet {
    coords: Array2<f64>,
}

impl PointSet {
    pub fn new(coords: Array2<f64>) -> Result<Self> {
        if coords.ncols() == 0 {
            return Err(PdistError::invalid(format!(
                "points must have at least one coordinate, got shape {:?}",
                coords.shape()
            )));
        }

        let coords = if coords.is_standard_layout() {
            coords
        } else {
            coords.as_standard_layout().into_owned()
        };

        Ok(Self { coords })
    }

    /// A set with no points in `dim` dimensions.
    pub fn empty(dim: usize) -> Result<Self> {
        Self::new(Array2::zeros((0, dim)))
    }

    /// Builds a set from one slice per point. Fails on ragged rows, and on an empty
    /// list since the dimension cannot be inferred from it (use [`PointSet::empty`]).
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let dim = match rows.first() {
            Some(first) => first.as_ref().len(),
            None => {
                return Err(PdistError::invalid(
                    "cannot infer the dimension of an empty list of rows",
                ))
            }
        };

        let capacity = rows.len().checked_mul(dim).ok_or_else(|| {
            PdistError::invalid(format!("{} x {dim} coordinates overflow usize", rows.len()))
        })?;
        let mut data = Vec::with_capacity(capacity);
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != dim {
                return Err(PdistError::invalid(format!(
                    "ragged rows: row 0 has {dim} coordinates but row {index} has {}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }

        Self::from_shape_vec(rows.len(), dim, data)
    }

    /// Builds a set from `n * dim` row-major coordinates.
    pub fn from_shape_vec(n: usize, dim: usize, data: Vec<f64>) -> Result<Self> {
        let expected = n
            .checked_mul(dim)
            .ok_or_else(|| PdistError::invalid(format!("{n} x {dim} coordinates overflow usize")))?;
        if data.len() != expected {
            return Err(PdistError::invalid(format!(
                "expected {n} x {dim} = {expected} coordinates, got {}",
                data.len()
            )));
        }
        Self::new(Array2::from_shape_vec((n, dim), data)?)
    }

    /// Builds a set from an array of any rank; only rank 2 is accepted.
    pub fn from_dyn(coords: ArrayD<f64>) -> Result<Self> {
        let ndim = coords.ndim();
        let coords = coords.into_dimensionality::<Ix2>().map_err(|_| {
            PdistError::invalid(format!("points must be a 2-dimensional table, got rank {ndim}"))
        })?;
        Self::new(coords)
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.coords.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of coordinates per point.
    pub fn dim(&self) -> usize {
        self.coords.ncols()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.coords.view()
    }

    pub fn point(&self, index: usize) -> ArrayView1<'_, f64> {
        self.coords.row(index)
    }

    /// Row-major coordinates, `len() * dim()` long.
    pub fn as_slice(&self) -> &[f64] {
        self.coords
            .as_slice()
            .expect("PointSet coordinates are kept in standard layout")
    }

    pub fn into_inner(self) -> Array2<f64> {
        self.coords
    }
}

impl TryFrom<Array2<f64>> for PointSet {
    type Error = PdistError;

    fn try_from(coords: Array2<f64>) -> Result<Self> {
        Self::new(coords)
    }
}

impl TryFrom<Vec<Vec<f64>>> for PointSet {
    type Error = PdistError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(&rows)
    }
}
