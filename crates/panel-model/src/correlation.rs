//! Correlation input in scalar or matrix form.

use nalgebra::DMatrix;

use crate::error::{LinkError, Result};

/// Requested dependency structure among the linking variables.
///
/// `Scalar(rho)` stands for an equicorrelated matrix (1 on the diagonal, `rho`
/// elsewhere). `Matrix` carries an explicit `ndim x ndim` correlation matrix
/// and takes precedence whenever the caller has one.
#[derive(Debug, Clone, PartialEq)]
pub enum CorrelationSpec {
    Scalar(f64),
    Matrix(DMatrix<f64>),
}

impl Default for CorrelationSpec {
    fn default() -> Self {
        CorrelationSpec::Scalar(0.0)
    }
}

impl CorrelationSpec {
    /// Build a matrix spec from row-major data.
    ///
    /// Every row must have as many entries as the first one; a ragged row is
    /// a `DimensionMismatch`. Whether the matrix fits the variable count is
    /// checked later by validation.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let ncols = rows.first().map_or(0, Vec::len);
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != ncols) {
            return Err(LinkError::dimension_mismatch(format!(
                "row {} has {} entries, expected {ncols}",
                idx + 1,
                row.len()
            )));
        }
        let matrix = DMatrix::from_fn(rows.len(), ncols, |i, j| rows[i][j]);
        Ok(CorrelationSpec::Matrix(matrix))
    }

    /// Returns the scalar when this is a scalar spec.
    pub fn scalar(&self) -> Option<f64> {
        match self {
            CorrelationSpec::Scalar(rho) => Some(*rho),
            CorrelationSpec::Matrix(_) => None,
        }
    }

    /// Equicorrelated `ndim x ndim` matrix for a scalar `rho`.
    pub fn equicorrelated(rho: f64, ndim: usize) -> DMatrix<f64> {
        DMatrix::from_fn(ndim, ndim, |i, j| if i == j { 1.0 } else { rho })
    }
}

impl From<f64> for CorrelationSpec {
    fn from(rho: f64) -> Self {
        CorrelationSpec::Scalar(rho)
    }
}

impl From<DMatrix<f64>> for CorrelationSpec {
    fn from(sigma: DMatrix<f64>) -> Self {
        CorrelationSpec::Matrix(sigma)
    }
}
