//! Dense least-squares linear solve.
//!
//! The solve goes through an SVD so that singular systems (floating
//! sub-circuits, loops of voltage sources) still produce the minimum-norm
//! least-squares answer instead of failing. The caller gets a
//! [`SolveStatus`] to judge how trustworthy that answer is.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};
use tracing::{debug, warn};

/// Linear solver configuration.
#[derive(Clone, Debug)]
pub struct LinearSolverConfig {
    /// Singular values at or below `rank_rel_tol * max(σ)` are treated as zero.
    /// `None` uses `n * f64::EPSILON`.
    pub rank_rel_tol: Option<f64>,
    /// SVD convergence epsilon
    pub svd_eps: f64,
    /// SVD iteration cap (guarantees termination)
    pub max_svd_iterations: usize,
}

impl Default for LinearSolverConfig {
    fn default() -> Self {
        Self {
            rank_rel_tol: None,
            svd_eps: f64::EPSILON,
            max_svd_iterations: 10_000,
        }
    }
}

/// Diagnostics of one solve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolveStatus {
    /// System dimension n
    pub dimension: usize,
    /// Numerical rank of the LHS
    pub rank: usize,
    /// ‖lhs · x − rhs‖₂
    pub residual_norm: f64,
}

impl SolveStatus {
    pub fn is_full_rank(&self) -> bool {
        self.rank == self.dimension
    }
}

/// Solution vector plus diagnostics.
#[derive(Clone, Debug)]
pub struct LinearSolution {
    pub x: DVector<f64>,
    pub status: SolveStatus,
}

/// Solve `lhs · x ≈ rhs` with the default configuration.
pub fn solve(lhs: &DMatrix<f64>, rhs: &DVector<f64>) -> SolverResult<LinearSolution> {
    solve_with_config(lhs, rhs, &LinearSolverConfig::default())
}

/// Solve `lhs · x ≈ rhs`. Inputs are not modified.
pub fn solve_with_config(
    lhs: &DMatrix<f64>,
    rhs: &DVector<f64>,
    config: &LinearSolverConfig,
) -> SolverResult<LinearSolution> {
    let n = rhs.len();
    if lhs.shape() != (n, n) {
        return Err(SolverError::DimensionMismatch {
            what: "linear system",
            expected: (n, n),
            actual: lhs.shape(),
        });
    }

    if n == 0 {
        return Ok(LinearSolution {
            x: DVector::zeros(0),
            status: SolveStatus {
                dimension: 0,
                rank: 0,
                residual_norm: 0.0,
            },
        });
    }

    if lhs.iter().chain(rhs.iter()).any(|v| !v.is_finite()) {
        return Err(SolverError::Numeric {
            what: "non-finite entry in linear system".to_string(),
        });
    }

    let svd = lhs
        .clone()
        .try_svd(true, true, config.svd_eps, config.max_svd_iterations)
        .ok_or_else(|| SolverError::Numeric {
            what: format!(
                "SVD did not converge within {} iterations",
                config.max_svd_iterations
            ),
        })?;

    let rel_tol = config.rank_rel_tol.unwrap_or(n as f64 * f64::EPSILON);
    let cutoff = rel_tol * svd.singular_values.max();
    let rank = svd.rank(cutoff);

    let x = svd.solve(rhs, cutoff).map_err(|e| SolverError::Numeric {
        what: e.to_string(),
    })?;
    let residual_norm = (lhs * &x - rhs).norm();

    let status = SolveStatus {
        dimension: n,
        rank,
        residual_norm,
    };
    if status.is_full_rank() {
        debug!(dimension = n, residual = residual_norm, "linear solve");
    } else {
        warn!(
            dimension = n,
            rank,
            residual = residual_norm,
            "rank-deficient system, using least-squares solution"
        );
    }

    Ok(LinearSolution { x, status })
}
