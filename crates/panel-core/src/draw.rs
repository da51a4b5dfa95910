//! Joint drawing of row indices across linking variables.
//!
//! # Pipeline
//!
//! 1. Resolve the correlation spec (independent or validated matrix)
//! 2. Sample correlated standard normals with the selected sampler
//! 3. Convert to uniform quantiles (Gaussian copula)
//! 4. Map quantiles through each variable's empirical order to row indices

use panel_model::{
    CorrelationSpec, DrawOptions, DrawResult, IndexColumn, LinkError, LinkingVariable, Result,
    SampleSize, SamplingStrategy,
};
use rand::{Rng, RngCore};
use tracing::{debug, info, info_span};

use crate::copula::to_quantiles;
use crate::mapper::quantiles_to_indices;
use crate::observer::{DrawObserver, TracingObserver};
use crate::sampler::select_sampler;
use crate::validate::{ResolvedCorrelation, resolve_correlation};

/// Draw `sample_size` joint row indices so that the linking variables follow
/// the requested rank dependency while each keeps its own marginal.
///
/// Returns one index column per variable, in input order. Indices are 0-based
/// and always valid for their variable.
///
/// # Errors
///
/// - `VariableMismatch` for fewer than two variables
/// - `EmptyVariable` if any variable has no values
/// - any correlation validation error
pub fn joint_draw<R: RngCore>(
    variables: &[LinkingVariable],
    sample_size: SampleSize,
    correlation: &CorrelationSpec,
    options: &DrawOptions,
    observer: &dyn DrawObserver,
    rng: &mut R,
) -> Result<DrawResult> {
    let ndim = variables.len();
    let n = sample_size.get();
    let span = info_span!("joint_draw", ndim, n);
    let _guard = span.enter();

    if ndim < 2 {
        return Err(LinkError::VariableMismatch {
            datasets: ndim,
            variables: ndim,
        });
    }
    if let Some(empty) = variables.iter().find(|variable| variable.is_empty()) {
        return Err(LinkError::empty_variable(&empty.name));
    }

    let result = match resolve_correlation(correlation, ndim)? {
        ResolvedCorrelation::Independent => DrawResult {
            columns: variables
                .iter()
                .map(|variable| IndexColumn {
                    name: variable.name.clone(),
                    indices: independent_indices(variable.len(), n, rng),
                })
                .collect(),
            sample_size,
            strategy: SamplingStrategy::Independent,
        },
        ResolvedCorrelation::Correlated(sigma) => {
            let sampler = select_sampler(options, observer);
            debug!(sampler = sampler.name(), "sampling correlated normals");
            let normals = sampler.sample(&sigma, n, rng);
            let quantiles = to_quantiles(&normals);
            let columns = variables
                .iter()
                .enumerate()
                .map(|(dim, variable)| IndexColumn {
                    name: variable.name.clone(),
                    indices: quantiles_to_indices(
                        &variable.values,
                        quantiles.column(dim).iter().copied(),
                    ),
                })
                .collect();
            DrawResult {
                columns,
                sample_size,
                strategy: sampler.strategy(),
            }
        }
    };

    info!(
        ndim,
        n,
        strategy = %result.strategy,
        "joint draw complete"
    );
    Ok(result)
}

/// [`joint_draw`] with default options, the tracing observer, and the
/// thread-local generator.
pub fn joint_draw_default(
    variables: &[LinkingVariable],
    sample_size: SampleSize,
    correlation: &CorrelationSpec,
) -> Result<DrawResult> {
    joint_draw(
        variables,
        sample_size,
        correlation,
        &DrawOptions::default(),
        &TracingObserver,
        &mut rand::rng(),
    )
}

/// `n` indices drawn uniformly with replacement from `0..len`.
fn independent_indices<R: RngCore>(len: usize, n: usize, rng: &mut R) -> Vec<usize> {
    (0..n).map(|_| rng.random_range(0..len)).collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::observer::SilentObserver;

    fn variables() -> Vec<LinkingVariable> {
        vec![
            LinkingVariable::new("income", vec![3.0, 1.0, 2.0]),
            LinkingVariable::new("education", vec![10.0, 40.0, 20.0, 30.0]),
        ]
    }

    fn draw(correlation: CorrelationSpec, seed: u64) -> Result<DrawResult> {
        joint_draw(
            &variables(),
            SampleSize::new(200).expect("sample size"),
            &correlation,
            &DrawOptions::cholesky_only(),
            &SilentObserver,
            &mut StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn zero_correlation_uses_independent_strategy() {
        let result = draw(CorrelationSpec::Scalar(0.0), 1).expect("draw");
        assert_eq!(result.strategy, SamplingStrategy::Independent);
        assert_eq!(result.columns[0].indices.len(), 200);
        assert!(result.columns[1].indices.iter().all(|&i| i < 4));
    }

    #[test]
    fn correlated_draw_records_sampler() {
        let result = draw(CorrelationSpec::Scalar(0.5), 1).expect("draw");
        assert_eq!(result.strategy, SamplingStrategy::Cholesky);
        assert_eq!(result.get("income").map(<[usize]>::len), Some(200));
    }

    #[test]
    fn same_seed_reproduces_draw() {
        let a = draw(CorrelationSpec::Scalar(0.8), 42).expect("draw");
        let b = draw(CorrelationSpec::Scalar(0.8), 42).expect("draw");
        assert_eq!(a, b);
    }

    #[test]
    fn single_variable_is_rejected() {
        let err = joint_draw(
            &variables()[..1],
            SampleSize::new(5).expect("sample size"),
            &CorrelationSpec::Scalar(0.5),
            &DrawOptions::default(),
            &SilentObserver,
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap_err();
        assert!(matches!(err, LinkError::VariableMismatch { .. }));
    }

    #[test]
    fn empty_variable_is_rejected() {
        let mut vars = variables();
        vars.push(LinkingVariable::new("empty", Vec::<f64>::new()));
        let err = joint_draw(
            &vars,
            SampleSize::new(5).expect("sample size"),
            &CorrelationSpec::Scalar(0.0),
            &DrawOptions::default(),
            &SilentObserver,
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap_err();
        assert_eq!(err, LinkError::empty_variable("empty"));
    }
}
