//! Joint draw results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sample::SampleSize;

/// Which sampler produced a draw.
///
/// Floating-point output differs between the correlated samplers, so the same
/// seed only reproduces a draw under the same strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingStrategy {
    /// Independent uniform resampling (no correlation requested).
    Independent,
    /// Pivoted Cholesky factor applied to iid normals.
    Cholesky,
    /// Eigendecomposition factor, rows generated in parallel chunks.
    ParallelEigen,
}

impl SamplingStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            SamplingStrategy::Independent => "independent",
            SamplingStrategy::Cholesky => "cholesky",
            SamplingStrategy::ParallelEigen => "parallel_eigen",
        }
    }
}

impl fmt::Display for SamplingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row indices drawn for one linking variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexColumn {
    pub name: String,
    /// 0-based row indices into the variable's dataset.
    pub indices: Vec<usize>,
}

/// Output of a joint draw: one index column per linking variable.
///
/// Position `k` across all columns is one joint draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawResult {
    pub columns: Vec<IndexColumn>,
    pub sample_size: SampleSize,
    pub strategy: SamplingStrategy,
}

impl DrawResult {
    /// Number of linked variables.
    pub fn ndim(&self) -> usize {
        self.columns.len()
    }

    /// Index column for a variable name (first match).
    pub fn get(&self, name: &str) -> Option<&[usize]> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .map(|column| column.indices.as_slice())
    }

    /// Indices of joint draw `k` across all variables.
    pub fn draw(&self, k: usize) -> Option<Vec<usize>> {
        self.columns
            .iter()
            .map(|column| column.indices.get(k).copied())
            .collect()
    }
}
