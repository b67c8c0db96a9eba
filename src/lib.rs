//! # index-tracker
//!
//! Constrained index tracking as a convex quadratic program.
//!
//! Given T periods of returns for n assets and the benchmark's returns over
//! the same periods, the crate finds the long-only, fully-invested portfolio
//! minimizing the sum of squared tracking errors:
//!
//! ```text
//! minimize    ||R w - y||^2
//! subject to  sum(w) = 1
//!             w >= 0
//! ```
//!
//! The feasible set is the probability simplex and the objective is a convex
//! quadratic, so the problem is a well-posed QP; the solve itself is
//! delegated to the Clarabel interior-point solver. This crate formulates
//! the problem and extracts the result; it implements no solver of its own.
//!
//! ## Quick Start
//!
//! ```ignore
//! use index_tracker::prelude::*;
//!
//! let input = InputData {
//!     returns_matrix: vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]],
//!     index_returns: IndexSeries::Flat(vec![0.5, 0.5, 1.0]),
//! };
//!
//! let result = run(&input, &SolverParams::new(), &ExtraArguments::new())?;
//! println!("optimum: {:?}", result.optimum);
//! ```
//!
//! ## Architecture
//!
//! - **Normalization** reshapes raw input into a dense T×n matrix and a
//!   length-T vector, flattening a column-vector benchmark series
//! - **Problem construction** stuffs the objective and simplex constraints
//!   into sparse standard form (P, q, A, b, cones)
//! - **Solver invocation** applies caller options through a backend trait
//!   and runs Clarabel; a non-optimal terminal status yields null results
//!   rather than an error

pub mod data;
pub mod error;
pub mod problem;
pub mod solver;
pub mod sparse;

use serde::Serialize;

use crate::data::InputData;
use crate::problem::TrackingProblem;
use crate::solver::SolverParams;

/// Extra input arguments, accepted for forward compatibility and unused.
pub type ExtraArguments = serde_json::Map<String, serde_json::Value>;

/// Outcome of one tracking solve.
///
/// Both fields are `None` (serialized as `null`) exactly when the solver
/// terminates without an optimal solution; inspecting `optimum` is the
/// caller's responsibility.
#[derive(Debug, Clone, Serialize)]
pub struct TrackResult {
    /// Achieved sum of squared tracking errors.
    pub optimum: Option<f64>,
    /// Portfolio weights, one per asset.
    pub optimizer_vector: Option<Vec<f64>>,
}

/// Solve the index-tracking problem for the given input.
///
/// `solver_params` entries are forwarded to the backend untouched (the
/// reserved `"solver"` key selects the engine); pass an empty map for
/// backend defaults. Construction and backend failures propagate; a
/// non-optimal solve does not.
pub fn run(
    input: &InputData,
    solver_params: &SolverParams,
    _extra_arguments: &ExtraArguments,
) -> Result<TrackResult> {
    let (returns, index) = data::normalize(input)?;
    let problem = TrackingProblem::new(&returns, &index)?;
    let solution = problem.solve_with(solver_params)?;

    Ok(TrackResult {
        optimum: solution.value,
        optimizer_vector: solution.weights.map(|w| w.iter().copied().collect()),
    })
}

/// Prelude module for convenient imports.
///
/// ```ignore
/// use index_tracker::prelude::*;
/// ```
pub mod prelude {
    pub use crate::data::{normalize, IndexSeries, InputData};
    pub use crate::error::{Result, TrackError};
    pub use crate::problem::{ConeDims, TrackingProblem};
    pub use crate::solver::{
        backend_for, Clarabel, QpBackend, Solution, SolveStatus, SolverParams,
    };
    pub use crate::{run, ExtraArguments, TrackResult};
}

// Re-export main types at crate root
pub use error::{Result, TrackError};
pub use solver::{Solution, SolveStatus};
