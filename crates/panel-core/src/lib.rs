//! Gaussian-copula joint sampling of row indices.
//!
//! Given one linking variable per dataset and a target correlation, draws
//! row indices so that the variables become rank-correlated while each
//! dataset's marginal distribution is preserved exactly.
//!
//! # Example
//!
//! ```
//! use panel_core::{SilentObserver, joint_draw};
//! use panel_model::{CorrelationSpec, DrawOptions, LinkingVariable, SampleSize};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let variables = vec![
//!     LinkingVariable::new("income", vec![12.0, 40.0, 25.0]),
//!     LinkingVariable::new("education", vec![1.0, 3.0, 2.0, 4.0]),
//! ];
//! let result = joint_draw(
//!     &variables,
//!     SampleSize::new(100).unwrap(),
//!     &CorrelationSpec::Scalar(0.7),
//!     &DrawOptions::default(),
//!     &SilentObserver,
//!     &mut StdRng::seed_from_u64(1),
//! )
//! .unwrap();
//! assert_eq!(result.columns.len(), 2);
//! assert!(result.columns[0].indices.iter().all(|&i| i < 3));
//! ```

pub mod cholesky;
pub mod copula;
pub mod draw;
pub mod mapper;
pub mod observer;
pub mod sampler;
pub mod validate;

pub use cholesky::PivotedCholesky;
pub use copula::{standard_normal_cdf, to_quantiles};
pub use draw::{joint_draw, joint_draw_default};
pub use mapper::{order_permutation, quantiles_to_indices, target_rank};
pub use observer::{DrawObserver, SilentObserver, TracingObserver};
#[cfg(feature = "parallel")]
pub use sampler::ParallelEigenSampler;
pub use sampler::{CholeskySampler, NormalSampler, fast_backend, select_sampler};
pub use validate::{
    CorrelationMatrix, PSD_TOLERANCE, ResolvedCorrelation, resolve_correlation, validate_matrix,
};
