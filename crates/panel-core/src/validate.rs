//! Correlation validation.
//!
//! Normalizes a [`CorrelationSpec`] into either the independent fast path or
//! a validated [`CorrelationMatrix`]. Checks run cheapest first; the
//! eigendecomposition only happens once shape, symmetry, and range pass.

use nalgebra::{DMatrix, SymmetricEigen};
use panel_model::{CorrelationSpec, LinkError, Result};
use tracing::debug;

/// Eigenvalues above `-PSD_TOLERANCE * ndim` count as non-negative.
///
/// Singular matrices such as `rho = 1` produce eigenvalues that round to tiny
/// negatives.
pub const PSD_TOLERANCE: f64 = 1e-10;

/// A correlation matrix that passed every validation check.
///
/// Square, exactly symmetric, unit diagonal, entries in [-1, 1], and
/// positive semi-definite. Only [`resolve_correlation`] and
/// [`validate_matrix`] construct it.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    matrix: DMatrix<f64>,
}

impl CorrelationMatrix {
    pub fn ndim(&self) -> usize {
        self.matrix.nrows()
    }

    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    pub fn into_inner(self) -> DMatrix<f64> {
        self.matrix
    }
}

/// Outcome of resolving a correlation spec.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedCorrelation {
    /// `rho == 0`: resample every variable independently.
    Independent,
    Correlated(CorrelationMatrix),
}

/// Resolve a correlation spec for `ndim` linking variables.
///
/// # Errors
///
/// - `InvalidCorrelationScalar` for a non-finite scalar
/// - `InvalidHighDimNegativeCorrelation` for a negative scalar with `ndim > 2`
/// - any error from [`validate_matrix`]
pub fn resolve_correlation(spec: &CorrelationSpec, ndim: usize) -> Result<ResolvedCorrelation> {
    match spec {
        CorrelationSpec::Scalar(rho) => {
            let rho = *rho;
            if !rho.is_finite() {
                return Err(LinkError::InvalidCorrelationScalar { value: rho });
            }
            if rho == 0.0 {
                debug!(ndim, "zero correlation, using independent resampling");
                return Ok(ResolvedCorrelation::Independent);
            }
            // Equicorrelation needs rho >= -1/(ndim-1) to be PSD; negative
            // scalars are rejected outright above two dimensions.
            if ndim > 2 && rho < 0.0 {
                return Err(LinkError::InvalidHighDimNegativeCorrelation { rho, ndim });
            }
            let matrix = CorrelationSpec::equicorrelated(rho, ndim);
            validate_matrix(matrix, ndim).map(ResolvedCorrelation::Correlated)
        }
        CorrelationSpec::Matrix(sigma) => {
            validate_matrix(sigma.clone(), ndim).map(ResolvedCorrelation::Correlated)
        }
    }
}

/// Validate an explicit correlation matrix for `ndim` variables.
///
/// # Errors
///
/// `DimensionMismatch`, `AsymmetricMatrix`, `OutOfRangeCorrelation`, or
/// `NonPsd`, in that order of checking.
pub fn validate_matrix(sigma: DMatrix<f64>, ndim: usize) -> Result<CorrelationMatrix> {
    check_shape(&sigma, ndim)?;
    check_symmetry(&sigma)?;
    check_range(&sigma)?;
    check_psd(&sigma)?;
    debug!(ndim, "correlation matrix validated");
    Ok(CorrelationMatrix { matrix: sigma })
}

fn check_shape(sigma: &DMatrix<f64>, ndim: usize) -> Result<()> {
    let (rows, cols) = sigma.shape();
    if rows != ndim || cols != ndim {
        return Err(LinkError::dimension_mismatch(format!(
            "expected {ndim}x{ndim} for {ndim} variables, got {rows}x{cols}"
        )));
    }
    for i in 0..ndim {
        let value = sigma[(i, i)];
        if value != 1.0 {
            return Err(LinkError::dimension_mismatch(format!(
                "diagonal entry sigma[{i}][{i}] = {value}, expected 1"
            )));
        }
    }
    Ok(())
}

fn check_symmetry(sigma: &DMatrix<f64>) -> Result<()> {
    let n = sigma.nrows();
    for row in 0..n {
        for col in (row + 1)..n {
            let upper = sigma[(row, col)];
            let lower = sigma[(col, row)];
            if upper.is_nan() && lower.is_nan() {
                continue;
            }
            if upper != lower {
                return Err(LinkError::AsymmetricMatrix {
                    row,
                    col,
                    upper,
                    lower,
                });
            }
        }
    }
    Ok(())
}

fn check_range(sigma: &DMatrix<f64>) -> Result<()> {
    let n = sigma.nrows();
    for row in 0..n {
        for col in 0..n {
            let value = sigma[(row, col)];
            if !(-1.0..=1.0).contains(&value) {
                return Err(LinkError::OutOfRangeCorrelation { row, col, value });
            }
        }
    }
    Ok(())
}

fn check_psd(sigma: &DMatrix<f64>) -> Result<()> {
    let n = sigma.nrows();
    let eigen = SymmetricEigen::new(sigma.clone());
    let min = eigen
        .eigenvalues
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    if min < -PSD_TOLERANCE * n.max(1) as f64 {
        return Err(LinkError::NonPsd { eigenvalue: min });
    }
    Ok(())
}
