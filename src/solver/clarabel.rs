//! Clarabel solver integration.
//!
//! This module provides the interface to the Clarabel conic solver.

use clarabel::algebra::CscMatrix as ClarabelCsc;
use clarabel::solver::{
    DefaultSettings, DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};
use nalgebra::DVector;

use super::{QpBackend, SolverParams, SOLVER_KEY};
use crate::error::{Result, TrackError};
use crate::problem::{ConeDims, TrackingProblem};

/// Solution status from the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Optimal solution found.
    Optimal,
    /// Problem is infeasible.
    Infeasible,
    /// Problem is unbounded.
    Unbounded,
    /// Maximum iterations or time limit reached.
    MaxIterations,
    /// Numerical difficulties.
    NumericalError,
    /// Unknown status.
    Unknown,
}

impl From<SolverStatus> for SolveStatus {
    fn from(status: SolverStatus) -> Self {
        match status {
            SolverStatus::Solved => SolveStatus::Optimal,
            SolverStatus::PrimalInfeasible => SolveStatus::Infeasible,
            SolverStatus::DualInfeasible => SolveStatus::Unbounded,
            SolverStatus::MaxIterations => SolveStatus::MaxIterations,
            SolverStatus::MaxTime => SolveStatus::MaxIterations,
            SolverStatus::NumericalError => SolveStatus::NumericalError,
            SolverStatus::InsufficientProgress => SolveStatus::NumericalError,
            _ => SolveStatus::Unknown,
        }
    }
}

/// Solution from the solver.
#[derive(Debug, Clone)]
pub struct Solution {
    /// Terminal status.
    pub status: SolveStatus,
    /// Achieved objective value, when optimal.
    pub value: Option<f64>,
    /// Resolved portfolio weights, when optimal.
    pub weights: Option<DVector<f64>>,
    /// Solve time in seconds.
    pub solve_time: f64,
    /// Number of iterations.
    pub iterations: u32,
}

/// The Clarabel interior-point backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clarabel;

impl QpBackend for Clarabel {
    fn solve(&self, problem: &TrackingProblem, params: &SolverParams) -> Result<Solution> {
        let settings = build_settings(params)?;

        let p = to_clarabel_csc(&problem.p);
        let a = to_clarabel_csc(&problem.a);
        let cones = to_clarabel_cones(&problem.cone_dims);

        let mut solver = DefaultSolver::new(&p, &problem.q, &a, &problem.b, &cones, settings);
        solver.solve();

        let status: SolveStatus = solver.solution.status.into();
        let solve_time = solver.solution.solve_time;
        let iterations = solver.info.iterations;

        if status == SolveStatus::Optimal {
            let x = &solver.solution.x;
            let value = objective_value(x, &problem.p, &problem.q) + problem.objective_offset;

            Ok(Solution {
                status,
                value: Some(value),
                weights: Some(DVector::from_column_slice(x)),
                solve_time,
                iterations,
            })
        } else {
            // A non-optimal terminal status is reported, not raised; the
            // caller decides what a missing optimum means.
            Ok(Solution {
                status,
                value: None,
                weights: None,
                solve_time,
                iterations,
            })
        }
    }
}

/// Translate the option map into Clarabel settings.
///
/// Every entry must be a recognized key with a value of the right JSON type.
/// The `"solver"` engine key is consumed by the dispatcher and skipped here.
fn build_settings(params: &SolverParams) -> Result<DefaultSettings<f64>> {
    let mut builder = DefaultSettingsBuilder::default();

    for (key, value) in params {
        match key.as_str() {
            SOLVER_KEY => {}
            "verbose" => {
                builder.verbose(bool_option(key, value)?);
            }
            "max_iter" => {
                builder.max_iter(u32_option(key, value)?);
            }
            "time_limit" => {
                builder.time_limit(f64_option(key, value)?);
            }
            "tol_gap_abs" => {
                builder.tol_gap_abs(f64_option(key, value)?);
            }
            "tol_gap_rel" => {
                builder.tol_gap_rel(f64_option(key, value)?);
            }
            "tol_feas" => {
                builder.tol_feas(f64_option(key, value)?);
            }
            _ => return Err(TrackError::UnsupportedOption(key.clone())),
        }
    }

    builder
        .build()
        .map_err(|e| TrackError::SolverError(e.to_string()))
}

fn bool_option(key: &str, value: &serde_json::Value) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| invalid_value(key, "a boolean", value))
}

fn u32_option(key: &str, value: &serde_json::Value) -> Result<u32> {
    value
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| invalid_value(key, "a nonnegative integer", value))
}

fn f64_option(key: &str, value: &serde_json::Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| invalid_value(key, "a number", value))
}

fn invalid_value(key: &str, expected: &str, value: &serde_json::Value) -> TrackError {
    TrackError::InvalidOptionValue {
        option: key.into(),
        reason: format!("expected {expected}, got {value}"),
    }
}

/// Convert nalgebra CSC to Clarabel CSC.
fn to_clarabel_csc(m: &nalgebra_sparse::CscMatrix<f64>) -> ClarabelCsc<f64> {
    ClarabelCsc::new(
        m.nrows(),
        m.ncols(),
        m.col_offsets().to_vec(),
        m.row_indices().to_vec(),
        m.values().to_vec(),
    )
}

/// Convert cone dimensions to Clarabel cones.
fn to_clarabel_cones(dims: &ConeDims) -> Vec<SupportedConeT<f64>> {
    let mut cones = Vec::new();

    if dims.zero > 0 {
        cones.push(SupportedConeT::ZeroConeT(dims.zero));
    }

    if dims.nonneg > 0 {
        cones.push(SupportedConeT::NonnegativeConeT(dims.nonneg));
    }

    cones
}

/// Evaluate (1/2) x' P x + q' x with P stored upper-triangle only.
fn objective_value(x: &[f64], p: &nalgebra_sparse::CscMatrix<f64>, q: &[f64]) -> f64 {
    // q' x
    let linear: f64 = q.iter().zip(x).map(|(qi, xi)| qi * xi).sum();

    // (1/2) x' P x
    let mut quadratic = 0.0;
    for (row, col, val) in p.triplet_iter() {
        if row == col {
            quadratic += 0.5 * *val * x[row] * x[col];
        } else {
            // Off-diagonal entries stand for both (i,j) and (j,i).
            quadratic += *val * x[row] * x[col];
        }
    }

    linear + quadratic
}
