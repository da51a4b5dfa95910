//! Error types for dataset linking.

use panel_model::LinkError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors raised while linking or cross-joining DataFrames.
#[derive(Debug, Error)]
pub enum LinkDatasetError {
    /// Request validation or drawing failed.
    #[error(transparent)]
    Draw(#[from] LinkError),

    /// A linking variable is not a column of its dataset.
    #[error("dataset {dataset} has no column '{column}'")]
    MissingColumn { dataset: usize, column: String },

    /// The Cartesian product has more rows than can be indexed.
    #[error("cross join of {tables} tables exceeds the addressable row count")]
    ProductOverflow { tables: usize },

    /// A drawn row index does not fit polars' row index type.
    #[error("row index {index} exceeds the polars index range")]
    IndexOverflow { index: usize },

    /// Polars operation failed.
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Result type alias for linking operations on DataFrames.
pub type Result<T> = std::result::Result<T, LinkDatasetError>;

impl LinkDatasetError {
    /// Create a MissingColumn error.
    pub fn missing_column(dataset: usize, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            dataset,
            column: column.into(),
        }
    }
}
