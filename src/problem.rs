//! Tracking problem construction.
//!
//! Expands the least-squares tracking objective into the standard quadratic
//! form the solver consumes, together with the simplex constraint cones.

use nalgebra::{DMatrix, DVector};
use nalgebra_sparse::CscMatrix;

use crate::error::{Result, TrackError};
use crate::solver::{backend_for, Solution, SolverParams};
use crate::sparse::{csc_from_triplets, symmetric_upper_csc};

/// Cone dimensions for the constraint rows, in solver order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConeDims {
    /// Number of zero cone (equality) rows.
    pub zero: usize,
    /// Number of nonnegative cone rows.
    pub nonneg: usize,
}

impl ConeDims {
    /// Total number of constraint rows.
    pub fn total(&self) -> usize {
        self.zero + self.nonneg
    }
}

/// An index-tracking QP in solver standard form:
///
/// ```text
/// minimize    (1/2) w' P w + q' w + offset
/// subject to  A w + s = b,  s in (Zero × NonNeg)
/// ```
#[derive(Debug)]
pub struct TrackingProblem {
    /// Quadratic cost matrix P = 2 R'R (upper triangle).
    pub p: CscMatrix<f64>,
    /// Linear cost vector q = -2 R'y.
    pub q: Vec<f64>,
    /// Constraint matrix A (full-investment row, then -I).
    pub a: CscMatrix<f64>,
    /// Constraint right-hand side b.
    pub b: Vec<f64>,
    /// Cone dimensions.
    pub cone_dims: ConeDims,
    /// Constant offset y'y restoring the tracking-error objective.
    pub objective_offset: f64,
    /// Number of assets n.
    pub num_assets: usize,
}

impl TrackingProblem {
    /// Build the QP for min ||R w - y||^2 over the probability simplex.
    ///
    /// `returns` is T×n; `index` must have length T. The length check lives
    /// here rather than in the normalizer, so a mismatched series fails at
    /// problem construction like any other malformed solver input.
    pub fn new(returns: &DMatrix<f64>, index: &DVector<f64>) -> Result<Self> {
        let (t, n) = returns.shape();
        if index.len() != t {
            return Err(TrackError::DimensionMismatch {
                expected: format!("index_returns of length {t}"),
                got: format!("length {}", index.len()),
            });
        }

        // ||Rw - y||^2 = w'(R'R)w - 2 y'R w + y'y. Clarabel minimizes
        // (1/2) w' P w + q' w, so P carries a factor of 2.
        let gram = returns.transpose() * returns;
        let p = symmetric_upper_csc(&gram, 2.0);
        let q: Vec<f64> = (-2.0 * (returns.transpose() * index))
            .iter()
            .copied()
            .collect();
        let objective_offset = index.dot(index);

        // Row 0: 1'w = 1 (zero cone). Rows 1..=n: -w + s = 0 with s >= 0,
        // so the slack equals w.
        let mut a_rows = Vec::with_capacity(2 * n);
        let mut a_cols = Vec::with_capacity(2 * n);
        let mut a_vals = Vec::with_capacity(2 * n);
        for j in 0..n {
            a_rows.push(0);
            a_cols.push(j);
            a_vals.push(1.0);
        }
        for j in 0..n {
            a_rows.push(1 + j);
            a_cols.push(j);
            a_vals.push(-1.0);
        }
        let a = csc_from_triplets(1 + n, n, a_rows, a_cols, a_vals);

        let mut b = vec![0.0; 1 + n];
        b[0] = 1.0;

        Ok(TrackingProblem {
            p,
            q,
            a,
            b,
            cone_dims: ConeDims { zero: 1, nonneg: n },
            objective_offset,
            num_assets: n,
        })
    }

    /// Solve with backend defaults.
    pub fn solve(&self) -> Result<Solution> {
        self.solve_with(&SolverParams::new())
    }

    /// Solve with caller-supplied solver options.
    ///
    /// Options are forwarded to the backend untouched; the reserved
    /// `"solver"` key selects the engine.
    pub fn solve_with(&self, params: &SolverParams) -> Result<Solution> {
        backend_for(params)?.solve(self, params)
    }
}
