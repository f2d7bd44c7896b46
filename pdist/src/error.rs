//! Error type for point set construction.

use ndarray::ShapeError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PdistError {
    /// The input is not a rectangular table of coordinates with at least one column.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PdistError {
    pub fn invalid(message: impl Into<String>) -> Self {
        PdistError::InvalidInput(message.into())
    }
}

impl From<ShapeError> for PdistError {
    fn from(err: ShapeError) -> Self {
        PdistError::InvalidInput(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PdistError>;
