//! Input data model and normalization.
//!
//! Raw input arrives as parsed JSON arrays; this module reshapes it into the
//! dense matrix/vector pair the problem builder consumes.

use nalgebra::{DMatrix, DVector};
use serde::Deserialize;

use crate::error::{Result, TrackError};

/// Benchmark return series as it appears in raw input: either already flat
/// or a list of rows (a column vector when every row holds one entry).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IndexSeries {
    /// One-dimensional series.
    Flat(Vec<f64>),
    /// Two-dimensional input; only a single-column matrix is accepted.
    Columns(Vec<Vec<f64>>),
}

/// Parsed input for one tracking solve.
#[derive(Debug, Clone, Deserialize)]
pub struct InputData {
    /// T×n matrix of asset returns; rows are time periods.
    pub returns_matrix: Vec<Vec<f64>>,
    /// Benchmark returns over the same periods.
    pub index_returns: IndexSeries,
}

/// Reshape raw input into the canonical (T×n matrix, length-T vector) pair.
///
/// The returns matrix fixes T and n. A column-matrix index series is
/// flattened; a flat series passes through. The flattened length is not
/// compared against T here; a mismatch surfaces when the problem is
/// constructed.
pub fn normalize(input: &InputData) -> Result<(DMatrix<f64>, DVector<f64>)> {
    let returns = returns_matrix(&input.returns_matrix)?;
    let index = index_vector(&input.index_returns)?;
    Ok((returns, index))
}

fn returns_matrix(rows: &[Vec<f64>]) -> Result<DMatrix<f64>> {
    let t = rows.len();
    let n = rows.first().map(Vec::len).unwrap_or(0);
    if t == 0 || n == 0 {
        return Err(TrackError::InvalidShape(
            "returns_matrix must be a non-empty two-dimensional array".into(),
        ));
    }
    if rows.iter().any(|r| r.len() != n) {
        return Err(TrackError::InvalidShape(
            "returns_matrix rows must all have the same length".into(),
        ));
    }
    Ok(DMatrix::from_row_iterator(
        t,
        n,
        rows.iter().flatten().copied(),
    ))
}

fn index_vector(series: &IndexSeries) -> Result<DVector<f64>> {
    match series {
        IndexSeries::Flat(v) => Ok(DVector::from_column_slice(v)),
        IndexSeries::Columns(rows) => {
            if rows.iter().any(|r| r.len() != 1) {
                return Err(TrackError::InvalidShape(
                    "index_returns must be a one-dimensional array or a column vector.".into(),
                ));
            }
            Ok(DVector::from_iterator(rows.len(), rows.iter().map(|r| r[0])))
        }
    }
}
