//! Eigendecomposition sampler that generates rows on a rayon pool.

use nalgebra::{DMatrix, SymmetricEigen};
use panel_model::SamplingStrategy;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use rayon::prelude::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};

use super::{NormalSampler, standard_normal_matrix};
use crate::validate::CorrelationMatrix;

/// Rows generated per task. Fixed so output does not depend on thread count.
const CHUNK_ROWS: usize = 4096;

/// Factor `sigma = Q diag(lambda) Q^T`, draw `Z A^T` with `A = Q diag(sqrt lambda)`.
///
/// Each chunk of rows gets its own `StdRng` seeded from the caller's
/// generator in chunk order, so a seeded caller gets the same matrix for any
/// pool size.
pub struct ParallelEigenSampler {
    cores: Option<usize>,
}

impl ParallelEigenSampler {
    pub fn new(cores: Option<usize>) -> Self {
        Self { cores }
    }

    fn build_pool(&self) -> Option<ThreadPool> {
        let cores = self.cores?;
        match ThreadPoolBuilder::new().num_threads(cores).build() {
            Ok(pool) => Some(pool),
            Err(error) => {
                warn!(cores, %error, "failed to build sampler thread pool, using global pool");
                None
            }
        }
    }
}

/// `A = Q diag(sqrt(max(lambda, 0)))` so that `A A^T = sigma`.
fn eigen_factor(sigma: &DMatrix<f64>) -> DMatrix<f64> {
    let eigen = SymmetricEigen::new(sigma.clone());
    let roots = eigen.eigenvalues.map(|lambda| lambda.max(0.0).sqrt());
    let mut factor = eigen.eigenvectors;
    for (col, root) in roots.iter().enumerate() {
        factor.column_mut(col).scale_mut(*root);
    }
    factor
}

impl NormalSampler for ParallelEigenSampler {
    fn name(&self) -> &'static str {
        "parallel-eigen"
    }

    fn strategy(&self) -> SamplingStrategy {
        SamplingStrategy::ParallelEigen
    }

    fn sample(&self, sigma: &CorrelationMatrix, n: usize, rng: &mut dyn RngCore) -> DMatrix<f64> {
        let ndim = sigma.ndim();
        let transform = eigen_factor(sigma.as_matrix()).transpose();
        let chunk_count = n.div_ceil(CHUNK_ROWS);
        let seeds: Vec<u64> = (0..chunk_count).map(|_| rng.random()).collect();
        debug!(ndim, n, chunk_count, cores = ?self.cores, "parallel eigen sampling");

        let generate = || {
            seeds
                .into_par_iter()
                .enumerate()
                .map(|(chunk, seed)| {
                    let rows = CHUNK_ROWS.min(n - chunk * CHUNK_ROWS);
                    let mut chunk_rng = StdRng::seed_from_u64(seed);
                    standard_normal_matrix(rows, ndim, &mut chunk_rng) * &transform
                })
                .collect::<Vec<DMatrix<f64>>>()
        };
        let chunks = match self.build_pool() {
            Some(pool) => pool.install(generate),
            None => generate(),
        };

        let mut out = DMatrix::zeros(n, ndim);
        let mut offset = 0;
        for chunk in chunks {
            let rows = chunk.nrows();
            out.rows_mut(offset, rows).copy_from(&chunk);
            offset += rows;
        }
        out
    }
}
