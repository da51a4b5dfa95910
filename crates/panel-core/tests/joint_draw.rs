//! Statistical and contract tests for joint drawing.

use std::collections::BTreeMap;

use nalgebra::DMatrix;
use panel_core::{SilentObserver, joint_draw};
use panel_model::{
    CorrelationSpec, DrawOptions, DrawResult, LinkError, LinkValue, LinkingVariable, SampleSize,
    SamplingStrategy,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

// ============================================================================
// Helpers
// ============================================================================

fn numeric(name: &str, values: &[f64]) -> LinkingVariable {
    LinkingVariable::new(name, values.to_vec())
}

fn run(
    variables: &[LinkingVariable],
    n: usize,
    correlation: CorrelationSpec,
    options: &DrawOptions,
    seed: u64,
) -> Result<DrawResult, LinkError> {
    joint_draw(
        variables,
        SampleSize::new(n).expect("sample size"),
        &correlation,
        options,
        &SilentObserver,
        &mut StdRng::seed_from_u64(seed),
    )
}

fn looked_up(variable: &LinkingVariable, indices: &[usize]) -> Vec<f64> {
    indices
        .iter()
        .map(|&i| variable.values[i].as_f64().expect("numeric value"))
        .collect()
}

/// Average ranks (1-based), ties share the mean of their positions.
fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        let rank = (start + end) as f64 / 2.0 + 1.0;
        for &idx in &order[start..=end] {
            ranks[idx] = rank;
        }
        start = end + 1;
    }
    ranks
}

fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len() as f64;
    let ma = a.iter().sum::<f64>() / n;
    let mb = b.iter().sum::<f64>() / n;
    let cov: f64 = a.iter().zip(b).map(|(x, y)| (x - ma) * (y - mb)).sum();
    let va: f64 = a.iter().map(|x| (x - ma).powi(2)).sum();
    let vb: f64 = b.iter().map(|y| (y - mb).powi(2)).sum();
    cov / (va.sqrt() * vb.sqrt())
}

fn spearman(a: &[f64], b: &[f64]) -> f64 {
    pearson(&average_ranks(a), &average_ranks(b))
}

fn sequence(len: usize) -> Vec<f64> {
    // distinct values in scrambled row order
    (0..len).map(|i| ((i * 37) % len) as f64).collect()
}

// ============================================================================
// Contract
// ============================================================================

#[test]
fn indices_have_length_n_and_stay_in_bounds() {
    let variables = vec![
        numeric("a", &sequence(5)),
        numeric("b", &sequence(13)),
        numeric("c", &sequence(2)),
    ];
    for correlation in [
        CorrelationSpec::Scalar(0.0),
        CorrelationSpec::Scalar(0.4),
        CorrelationSpec::Scalar(1.0),
    ] {
        for options in [DrawOptions::default(), DrawOptions::cholesky_only()] {
            let result = run(&variables, 777, correlation.clone(), &options, 5).expect("draw");
            assert_eq!(result.columns.len(), 3);
            for (column, variable) in result.columns.iter().zip(&variables) {
                assert_eq!(column.name, variable.name);
                assert_eq!(column.indices.len(), 777);
                assert!(column.indices.iter().all(|&i| i < variable.len()));
            }
        }
    }
}

#[test]
fn text_variables_are_linked_by_lexicographic_order() {
    let variables = vec![
        LinkingVariable::new("grade", vec!["b", "a", "c"]),
        numeric("score", &[2.0, 3.0, 1.0]),
    ];
    let result = run(&variables, 500, CorrelationSpec::Scalar(1.0), &DrawOptions::cholesky_only(), 9)
        .expect("draw");
    for k in 0..500 {
        let draw = result.draw(k).expect("draw k");
        let grade = &variables[0].values[draw[0]];
        let score = variables[1].values[draw[1]].as_f64().expect("score");
        let expected = match grade {
            LinkValue::Text(g) if g == "a" => 1.0,
            LinkValue::Text(g) if g == "b" => 2.0,
            _ => 3.0,
        };
        assert_eq!(score, expected);
    }
}

// ============================================================================
// Statistical properties
// ============================================================================

#[test]
fn zero_correlation_matches_uniform_resampling() {
    let variables = vec![numeric("a", &sequence(5)), numeric("b", &sequence(4))];
    let n = 20_000;
    let result = run(&variables, n, CorrelationSpec::Scalar(0.0), &DrawOptions::default(), 2024)
        .expect("draw");
    assert_eq!(result.strategy, SamplingStrategy::Independent);

    for (column, variable) in result.columns.iter().zip(&variables) {
        let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
        for &i in &column.indices {
            *counts.entry(i).or_default() += 1;
        }
        let expected = n as f64 / variable.len() as f64;
        let chi2: f64 = (0..variable.len())
            .map(|i| {
                let observed = counts.get(&i).copied().unwrap_or(0) as f64;
                (observed - expected).powi(2) / expected
            })
            .sum();
        // chi-square 99.9th percentile for 4 degrees of freedom
        assert!(chi2 < 18.47, "chi-square {chi2} for {}", variable.name);
    }

    let a = looked_up(&variables[0], &result.columns[0].indices);
    let b = looked_up(&variables[1], &result.columns[1].indices);
    assert!(spearman(&a, &b).abs() < 0.05);
}

#[test]
fn strong_positive_correlation_gives_rank_correlation_near_one() {
    let variables = vec![numeric("a", &sequence(50)), numeric("b", &sequence(40))];
    for options in [DrawOptions::default(), DrawOptions::cholesky_only()] {
        let result =
            run(&variables, 5_000, CorrelationSpec::Scalar(0.99), &options, 17).expect("draw");
        let a = looked_up(&variables[0], &result.columns[0].indices);
        let b = looked_up(&variables[1], &result.columns[1].indices);
        let rho = spearman(&a, &b);
        assert!(rho > 0.95, "spearman {rho} with {:?}", result.strategy);
    }
}

#[test]
fn strong_negative_correlation_gives_rank_correlation_near_minus_one() {
    let variables = vec![numeric("a", &sequence(50)), numeric("b", &sequence(40))];
    let result = run(
        &variables,
        5_000,
        CorrelationSpec::Scalar(-0.99),
        &DrawOptions::cholesky_only(),
        23,
    )
    .expect("draw");
    let a = looked_up(&variables[0], &result.columns[0].indices);
    let b = looked_up(&variables[1], &result.columns[1].indices);
    let rho = spearman(&a, &b);
    assert!(rho < -0.95, "spearman {rho}");
}

#[test]
fn explicit_matrix_sets_pairwise_structure() {
    let variables = vec![
        numeric("a", &sequence(60)),
        numeric("b", &sequence(60)),
        numeric("c", &sequence(60)),
    ];
    let sigma = DMatrix::from_row_slice(3, 3, &[1.0, 0.8, 0.0, 0.8, 1.0, 0.0, 0.0, 0.0, 1.0]);
    let result = run(
        &variables,
        10_000,
        CorrelationSpec::Matrix(sigma),
        &DrawOptions::cholesky_only(),
        31,
    )
    .expect("draw");
    let a = looked_up(&variables[0], &result.columns[0].indices);
    let b = looked_up(&variables[1], &result.columns[1].indices);
    let c = looked_up(&variables[2], &result.columns[2].indices);
    // Spearman for a bivariate normal: (6 / pi) * asin(rho / 2)
    let expected = 6.0 / std::f64::consts::PI * (0.4_f64).asin();
    assert!((spearman(&a, &b) - expected).abs() < 0.03);
    assert!(spearman(&a, &c).abs() < 0.05);
}

#[test]
fn perfect_correlation_is_rank_aligned() {
    let first = numeric("first", &[3.0, 1.0, 5.0, 2.0, 4.0]);
    let second = numeric("second", &[10.0, 70.0, 20.0, 60.0, 30.0, 50.0, 40.0]);
    let variables = vec![first, second];
    let result = run(
        &variables,
        1_000,
        CorrelationSpec::Scalar(1.0),
        &DrawOptions::cholesky_only(),
        99,
    )
    .expect("draw");

    // Group second-variable values by first-variable value; groups must not overlap.
    let mut groups: BTreeMap<i64, (f64, f64)> = BTreeMap::new();
    for k in 0..1_000 {
        let draw = result.draw(k).expect("draw k");
        let key = variables[0].values[draw[0]].as_f64().expect("first") as i64;
        let value = variables[1].values[draw[1]].as_f64().expect("second");
        let entry = groups.entry(key).or_insert((f64::INFINITY, f64::NEG_INFINITY));
        entry.0 = entry.0.min(value);
        entry.1 = entry.1.max(value);
    }
    let ranges: Vec<(f64, f64)> = groups.into_values().collect();
    for pair in ranges.windows(2) {
        assert!(
            pair[0].1 <= pair[1].0,
            "second-variable ranges overlap: {pair:?}"
        );
    }
}

// ============================================================================
// Validation failures
// ============================================================================

#[test]
fn negative_scalar_fails_for_three_or_more_variables() {
    let variables = vec![
        numeric("a", &sequence(4)),
        numeric("b", &sequence(4)),
        numeric("c", &sequence(4)),
        numeric("d", &sequence(4)),
    ];
    for ndim in [3, 4] {
        for (n, rho) in [(1, -0.1), (50, -0.3), (1_000, -1.0)] {
            let err = run(
                &variables[..ndim],
                n,
                CorrelationSpec::Scalar(rho),
                &DrawOptions::default(),
                0,
            )
            .unwrap_err();
            assert!(matches!(
                err,
                LinkError::InvalidHighDimNegativeCorrelation { .. }
            ));
        }
    }
}

#[test]
fn invalid_matrices_fail_with_specific_errors() {
    let variables = vec![numeric("a", &sequence(4)), numeric("b", &sequence(4))];
    let asymmetric = DMatrix::from_row_slice(2, 2, &[1.0, 0.5, 0.3, 1.0]);
    let err = run(&variables, 10, asymmetric.into(), &DrawOptions::default(), 0).unwrap_err();
    assert!(matches!(err, LinkError::AsymmetricMatrix { .. }));

    let out_of_range = DMatrix::from_row_slice(2, 2, &[1.0, 1.5, 1.5, 1.0]);
    let err = run(&variables, 10, out_of_range.into(), &DrawOptions::default(), 0).unwrap_err();
    assert!(matches!(err, LinkError::OutOfRangeCorrelation { .. }));

    let wrong_size = DMatrix::identity(3, 3);
    let err = run(&variables, 10, wrong_size.into(), &DrawOptions::default(), 0).unwrap_err();
    assert!(matches!(err, LinkError::DimensionMismatch { .. }));

    let three = vec![
        numeric("a", &sequence(4)),
        numeric("b", &sequence(4)),
        numeric("c", &sequence(4)),
    ];
    let non_psd = DMatrix::from_row_slice(
        3,
        3,
        &[1.0, -0.9, -0.9, -0.9, 1.0, -0.9, -0.9, -0.9, 1.0],
    );
    let err = run(&three, 10, non_psd.into(), &DrawOptions::default(), 0).unwrap_err();
    assert!(matches!(err, LinkError::NonPsd { .. }));
}

#[test]
fn invalid_sample_sizes_are_rejected() {
    assert!(matches!(
        SampleSize::new(0),
        Err(LinkError::InvalidSampleSize { .. })
    ));
    assert!(matches!(
        SampleSize::try_from(-5_i64),
        Err(LinkError::InvalidSampleSize { .. })
    ));
    assert!(matches!(
        SampleSize::try_from(f64::NAN),
        Err(LinkError::InvalidSampleSize { .. })
    ));

    let n = SampleSize::try_from(10.0).expect("integral float accepted");
    let variables = vec![numeric("a", &sequence(4)), numeric("b", &sequence(4))];
    let result = joint_draw(
        &variables,
        n,
        &CorrelationSpec::Scalar(0.5),
        &DrawOptions::default(),
        &SilentObserver,
        &mut StdRng::seed_from_u64(1),
    )
    .expect("draw");
    assert_eq!(result.columns[0].indices.len(), 10);
}
