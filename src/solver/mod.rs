//! Solver interface.
//!
//! This module provides:
//! - The backend abstraction the problem layer solves through
//! - Clarabel solver integration

pub mod clarabel;

use std::collections::BTreeMap;

use crate::error::{Result, TrackError};
use crate::problem::TrackingProblem;

pub use self::clarabel::{Clarabel, Solution, SolveStatus};

/// Open mapping of solver option names to values, forwarded to the backend
/// as-is. An empty mapping means backend defaults.
pub type SolverParams = BTreeMap<String, serde_json::Value>;

/// Option key reserved for selecting the backend engine.
pub const SOLVER_KEY: &str = "solver";

/// A QP solver backend.
///
/// Implementations translate the caller's option entries into their native
/// settings; an entry they do not recognize is an error, never silently
/// dropped.
pub trait QpBackend: std::fmt::Debug {
    /// Solve the problem, returning the terminal status and, when optimal,
    /// the achieved objective value and weights.
    fn solve(&self, problem: &TrackingProblem, params: &SolverParams) -> Result<Solution>;
}

/// Resolve the backend named by the `"solver"` option (default: clarabel).
pub fn backend_for(params: &SolverParams) -> Result<Box<dyn QpBackend>> {
    let name = match params.get(SOLVER_KEY) {
        None => return Ok(Box::new(Clarabel)),
        Some(serde_json::Value::String(s)) => s.as_str(),
        Some(other) => {
            return Err(TrackError::InvalidOptionValue {
                option: SOLVER_KEY.into(),
                reason: format!("expected a string, got {other}"),
            })
        }
    };

    match name.to_ascii_lowercase().as_str() {
        "clarabel" => Ok(Box::new(Clarabel)),
        _ => Err(TrackError::UnknownSolver(name.into())),
    }
}
