//! End-to-end tests for the tracking pipeline.
//!
//! Pattern: scenarios defined as data, run through `run`, checked against
//! closed-form optima and simplex feasibility.

use index_tracker::prelude::*;
use serde_json::json;

/// Tolerance for comparing objective values
const TOL: f64 = 1e-4;

/// Tolerance for comparing individual weights
const WEIGHT_TOL: f64 = 1e-3;

/// Feasibility slack for simplex membership
const FEAS_TOL: f64 = 1e-6;

fn input(returns: Vec<Vec<f64>>, index: Vec<f64>) -> InputData {
    InputData {
        returns_matrix: returns,
        index_returns: IndexSeries::Flat(index),
    }
}

fn solve(input: &InputData) -> TrackResult {
    run(input, &SolverParams::new(), &ExtraArguments::new()).expect("solve failed")
}

/// A scenario with a known optimum
struct Scenario {
    name: &'static str,
    build: fn() -> InputData,
    expected_optimum: f64,
    expected_weights: &'static [f64],
}

fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            // The benchmark is the equal-weight combination of both assets.
            name: "two_asset_exact_replication",
            build: || {
                input(
                    vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
                    vec![0.5, 0.5, 1.0],
                )
            },
            expected_optimum: 0.0,
            expected_weights: &[0.5, 0.5],
        },
        Scenario {
            // Full investment forces the whole portfolio into the one asset.
            name: "single_asset",
            build: || {
                input(
                    vec![vec![1.0], vec![1.0], vec![1.0]],
                    vec![1.0, 1.0, 1.0],
                )
            },
            expected_optimum: 0.0,
            expected_weights: &[1.0],
        },
        Scenario {
            // The benchmark coincides with the second asset's return series.
            name: "benchmark_is_second_asset",
            build: || {
                input(
                    vec![
                        vec![0.02, 0.01],
                        vec![-0.01, 0.03],
                        vec![0.00, 0.02],
                    ],
                    vec![0.01, 0.03, 0.02],
                )
            },
            expected_optimum: 0.0,
            expected_weights: &[0.0, 1.0],
        },
    ]
}

#[test]
fn test_known_optima() {
    for case in scenarios() {
        let result = solve(&(case.build)());
        let optimum = result.optimum.expect("no optimum");
        let weights = result.optimizer_vector.expect("no weights");

        assert!(
            (optimum - case.expected_optimum).abs() < TOL,
            "{}: expected optimum {}, got {}",
            case.name,
            case.expected_optimum,
            optimum
        );
        assert_eq!(
            weights.len(),
            case.expected_weights.len(),
            "{}: wrong number of weights",
            case.name
        );
        for (i, (got, want)) in weights.iter().zip(case.expected_weights).enumerate() {
            assert!(
                (got - want).abs() < WEIGHT_TOL,
                "{}: weight {} expected {}, got {}",
                case.name,
                i,
                want,
                got
            );
        }
    }
}

/// A benchmark no long-only portfolio replicates exactly.
fn noisy_input() -> InputData {
    input(
        vec![
            vec![0.05, -0.02, 0.01],
            vec![0.01, 0.03, -0.01],
            vec![-0.02, 0.01, 0.04],
            vec![0.03, 0.00, 0.02],
        ],
        vec![0.04, -0.01, 0.02, 0.01],
    )
}

#[test]
fn test_weights_stay_on_the_simplex() {
    let result = solve(&noisy_input());
    let weights = result.optimizer_vector.expect("no weights");

    let total: f64 = weights.iter().sum();
    assert!((total - 1.0).abs() < 1e-5, "weights sum to {total}");
    for (i, w) in weights.iter().enumerate() {
        assert!(*w >= -FEAS_TOL, "weight {i} is {w}");
    }
}

#[test]
fn test_optimum_is_nonnegative() {
    let result = solve(&noisy_input());
    let optimum = result.optimum.expect("no optimum");
    assert!(optimum >= -TOL, "sum of squares came out {optimum}");
}

#[test]
fn test_repeated_solves_agree() {
    let data = noisy_input();
    let first = solve(&data);
    let second = solve(&data);

    let a = first.optimum.expect("no optimum");
    let b = second.optimum.expect("no optimum");
    assert!((a - b).abs() < 1e-9, "optima differ: {a} vs {b}");

    let wa = first.optimizer_vector.expect("no weights");
    let wb = second.optimizer_vector.expect("no weights");
    for (x, y) in wa.iter().zip(&wb) {
        assert!((x - y).abs() < 1e-9, "weights differ: {x} vs {y}");
    }
}

#[test]
fn test_column_vector_series_matches_flat() {
    let flat = noisy_input();
    let column = InputData {
        returns_matrix: flat.returns_matrix.clone(),
        index_returns: match &flat.index_returns {
            IndexSeries::Flat(v) => {
                IndexSeries::Columns(v.iter().map(|x| vec![*x]).collect())
            }
            IndexSeries::Columns(_) => unreachable!(),
        },
    };

    let from_flat = solve(&flat);
    let from_column = solve(&column);

    let a = from_flat.optimum.expect("no optimum");
    let b = from_column.optimum.expect("no optimum");
    assert!((a - b).abs() < 1e-9, "optima differ: {a} vs {b}");

    let wa = from_flat.optimizer_vector.expect("no weights");
    let wb = from_column.optimizer_vector.expect("no weights");
    for (x, y) in wa.iter().zip(&wb) {
        assert!((x - y).abs() < 1e-9, "weights differ: {x} vs {y}");
    }
}

#[test]
fn test_wide_index_matrix_is_rejected() {
    let data = InputData {
        returns_matrix: vec![vec![1.0, 0.0], vec![0.0, 1.0]],
        index_returns: IndexSeries::Columns(vec![vec![0.5, 0.5], vec![0.5, 0.5]]),
    };
    let err = run(&data, &SolverParams::new(), &ExtraArguments::new()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "index_returns must be a one-dimensional array or a column vector."
    );
}

#[test]
fn test_series_length_mismatch_fails_at_construction() {
    let data = input(vec![vec![1.0], vec![1.0], vec![1.0]], vec![1.0, 1.0]);
    let err = run(&data, &SolverParams::new(), &ExtraArguments::new()).unwrap_err();
    assert!(
        matches!(err, TrackError::DimensionMismatch { .. }),
        "got {err}"
    );
}

#[test]
fn test_unknown_option_is_rejected() {
    let mut params = SolverParams::new();
    params.insert("definitely_not_an_option".into(), json!(1));
    let err = run(&noisy_input(), &params, &ExtraArguments::new()).unwrap_err();
    assert!(matches!(err, TrackError::UnsupportedOption(_)), "got {err}");
}

#[test]
fn test_wrong_typed_option_value_is_rejected() {
    let mut params = SolverParams::new();
    params.insert("max_iter".into(), json!("fifty"));
    let err = run(&noisy_input(), &params, &ExtraArguments::new()).unwrap_err();
    assert!(
        matches!(err, TrackError::InvalidOptionValue { .. }),
        "got {err}"
    );
}

#[test]
fn test_unknown_engine_is_rejected() {
    let mut params = SolverParams::new();
    params.insert("solver".into(), json!("OSQP"));
    let err = run(&noisy_input(), &params, &ExtraArguments::new()).unwrap_err();
    assert!(matches!(err, TrackError::UnknownSolver(_)), "got {err}");
}

#[test]
fn test_recognized_options_pass_through() {
    let mut params = SolverParams::new();
    params.insert("solver".into(), json!("clarabel"));
    params.insert("verbose".into(), json!(false));
    params.insert("max_iter".into(), json!(200));
    params.insert("time_limit".into(), json!(10.0));
    params.insert("tol_gap_abs".into(), json!(1e-10));
    params.insert("tol_gap_rel".into(), json!(1e-10));
    params.insert("tol_feas".into(), json!(1e-10));

    let data = input(
        vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
        vec![0.5, 0.5, 1.0],
    );
    let result = run(&data, &params, &ExtraArguments::new()).expect("solve failed");
    let optimum = result.optimum.expect("no optimum");
    assert!(optimum.abs() < TOL, "expected exact replication, got {optimum}");
}

#[test]
fn test_iteration_starved_solve_returns_null_results() {
    // Terminating before optimality is not an error; both fields come back
    // empty for the caller to inspect.
    let mut params = SolverParams::new();
    params.insert("max_iter".into(), json!(1));

    let result = run(&noisy_input(), &params, &ExtraArguments::new())
        .expect("non-optimal status should not error");
    assert!(result.optimum.is_none());
    assert!(result.optimizer_vector.is_none());
}

#[test]
fn test_result_serialization_shape() {
    let result = solve(&noisy_input());
    let value = serde_json::to_value(&result).expect("serialization failed");
    assert!(value.get("optimum").is_some());
    assert!(value.get("optimizer_vector").is_some());
}
