//! Correlated standard-normal samplers.
//!
//! A [`NormalSampler`] turns a validated correlation matrix into an
//! `N x ndim` matrix of standard normal deviates whose rows are joint draws.
//! [`CholeskySampler`] is always available. The accelerated
//! `ParallelEigenSampler` is compiled in with the `parallel` feature and is
//! picked at runtime by [`select_sampler`].

#[cfg(feature = "parallel")]
mod parallel;

use nalgebra::DMatrix;
use panel_model::{DrawOptions, SamplingStrategy};
use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};
use tracing::debug;

use crate::cholesky::PivotedCholesky;
use crate::observer::DrawObserver;
use crate::validate::CorrelationMatrix;

#[cfg(feature = "parallel")]
pub use parallel::ParallelEigenSampler;

/// Samples `n` correlated standard-normal vectors.
pub trait NormalSampler {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Strategy recorded on the draw result.
    fn strategy(&self) -> SamplingStrategy;

    /// Draw an `n x sigma.ndim()` matrix with covariance `sigma` per row.
    fn sample(&self, sigma: &CorrelationMatrix, n: usize, rng: &mut dyn RngCore) -> DMatrix<f64>;
}

/// Pivoted Cholesky factor applied to iid standard normals.
///
/// With `sigma[piv, piv] = R^T R`, the factor's columns are moved back to the
/// original order to get `U^T U = sigma`, and the draws are `Z U`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CholeskySampler;

impl NormalSampler for CholeskySampler {
    fn name(&self) -> &'static str {
        "pivoted-cholesky"
    }

    fn strategy(&self) -> SamplingStrategy {
        SamplingStrategy::Cholesky
    }

    fn sample(&self, sigma: &CorrelationMatrix, n: usize, rng: &mut dyn RngCore) -> DMatrix<f64> {
        let chol = PivotedCholesky::new(sigma.as_matrix());
        debug!(
            ndim = sigma.ndim(),
            rank = chol.rank(),
            pivot = ?chol.pivot(),
            "pivoted cholesky factorization"
        );
        let factor = chol.unpivoted_factor();
        let z = standard_normal_matrix(n, sigma.ndim(), rng);
        z * factor
    }
}

/// `rows x cols` matrix of iid standard normals, filled row by row.
pub fn standard_normal_matrix(rows: usize, cols: usize, rng: &mut dyn RngCore) -> DMatrix<f64> {
    let mut data = Vec::with_capacity(rows * cols);
    for _ in 0..rows * cols {
        let value: f64 = StandardNormal.sample(&mut *rng);
        data.push(value);
    }
    DMatrix::from_row_slice(rows, cols, &data)
}

/// The accelerated sampler, when compiled in.
#[cfg(feature = "parallel")]
pub fn fast_backend(cores: Option<usize>) -> Option<Box<dyn NormalSampler>> {
    Some(Box::new(ParallelEigenSampler::new(cores)))
}

/// The accelerated sampler, when compiled in.
#[cfg(not(feature = "parallel"))]
pub fn fast_backend(_cores: Option<usize>) -> Option<Box<dyn NormalSampler>> {
    None
}

/// Pick the sampler for a draw.
///
/// Uses the accelerated backend when requested and available; otherwise the
/// Cholesky sampler. A request for an unavailable backend notifies the
/// observer but never fails.
pub fn select_sampler(options: &DrawOptions, observer: &dyn DrawObserver) -> Box<dyn NormalSampler> {
    let fast = if options.use_fast_backend {
        fast_backend(options.cores)
    } else {
        None
    };
    choose_sampler(fast, options, observer)
}

pub(crate) fn choose_sampler(
    fast: Option<Box<dyn NormalSampler>>,
    options: &DrawOptions,
    observer: &dyn DrawObserver,
) -> Box<dyn NormalSampler> {
    match fast {
        Some(sampler) if options.use_fast_backend => sampler,
        _ => {
            if options.use_fast_backend {
                observer.fast_backend_unavailable(SamplingStrategy::Cholesky);
            }
            Box::new(CholeskySampler)
        }
    }
}
