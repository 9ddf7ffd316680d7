//! Shared stamping helpers.
//!
//! Rows are `Option<usize>`: `None` marks the reference node, whose row and
//! column are not part of the system and are therefore skipped.

use crate::error::ElementResult;
use nalgebra::{DMatrix, DVector};
use nd_core::numeric::{ensure_finite, ensure_positive};

/// Add a conductance `g` between rows `a` and `b`.
///
/// `+g` on both diagonals, `-g` on both off-diagonals.
pub fn stamp_conductance(m: &mut DMatrix<f64>, a: Option<usize>, b: Option<usize>, g: f64) {
    if let Some(i) = a {
        m[(i, i)] += g;
    }
    if let Some(j) = b {
        m[(j, j)] += g;
    }
    if let (Some(i), Some(j)) = (a, b) {
        m[(i, j)] -= g;
        m[(j, i)] -= g;
    }
}

/// Inject `current` into row `a` and draw it out of row `b`.
pub fn inject_current(v: &mut DVector<f64>, a: Option<usize>, b: Option<usize>, current: f64) {
    if let Some(i) = a {
        v[i] += current;
    }
    if let Some(j) = b {
        v[j] -= current;
    }
}

/// Value must be finite.
pub fn check_finite(value: f64, what: &'static str) -> ElementResult<f64> {
    Ok(ensure_finite(value, what)?)
}

/// Value must be finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> ElementResult<f64> {
    Ok(ensure_positive(value, what)?)
}
