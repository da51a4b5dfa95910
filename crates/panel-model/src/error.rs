//! Error types for correlation validation and joint drawing.

use thiserror::Error;

/// Errors raised while validating a draw request.
///
/// Every variant is fatal: a failed request produces no partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LinkError {
    /// Fewer than two datasets were supplied.
    #[error("at least two datasets are required, got {found}")]
    InputCount { found: usize },

    /// Dataset and linking-variable counts disagree, or fewer than two variables.
    #[error(
        "expected one linking variable per dataset and at least two of each: \
         {datasets} dataset(s), {variables} variable(s)"
    )]
    VariableMismatch { datasets: usize, variables: usize },

    /// Sample size is not a finite positive integer.
    #[error("sample size must be a finite positive integer, got {value}")]
    InvalidSampleSize { value: String },

    /// Scalar correlation is not a finite number.
    #[error("correlation scalar must be a single finite number, got {value}")]
    InvalidCorrelationScalar { value: f64 },

    /// Matrix shape does not match the variable count, or the diagonal is not 1.
    #[error("correlation matrix dimension mismatch: {message}")]
    DimensionMismatch { message: String },

    /// Matrix is not exactly symmetric.
    #[error(
        "correlation matrix is not symmetric: sigma[{row}][{col}] = {upper} \
         but sigma[{col}][{row}] = {lower}"
    )]
    AsymmetricMatrix {
        row: usize,
        col: usize,
        upper: f64,
        lower: f64,
    },

    /// Matrix entry outside [-1, 1].
    #[error("correlation sigma[{row}][{col}] = {value} lies outside [-1, 1]")]
    OutOfRangeCorrelation { row: usize, col: usize, value: f64 },

    /// Matrix has a negative eigenvalue.
    #[error("correlation matrix is not positive semi-definite: eigenvalue {eigenvalue}")]
    NonPsd { eigenvalue: f64 },

    /// Negative equicorrelation requested for more than two variables.
    #[error(
        "a negative scalar correlation ({rho}) is only valid for two variables, \
         got {ndim}"
    )]
    InvalidHighDimNegativeCorrelation { rho: f64, ndim: usize },

    /// Linking variable has no values to draw from.
    #[error("linking variable '{name}' has no values")]
    EmptyVariable { name: String },
}

/// Result type alias for linking operations.
pub type Result<T> = std::result::Result<T, LinkError>;

impl LinkError {
    /// Create an InvalidSampleSize error from any displayable input.
    pub fn invalid_sample_size(value: impl ToString) -> Self {
        Self::InvalidSampleSize {
            value: value.to_string(),
        }
    }

    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch(message: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            message: message.into(),
        }
    }

    /// Create an EmptyVariable error.
    pub fn empty_variable(name: impl Into<String>) -> Self {
        Self::EmptyVariable { name: name.into() }
    }
}
