//! Dense MNA assembly and linear solving for nodal.
//!
//! [`assemble`] sums every element stamp into one `MnaSystem` (LHS matrix
//! and RHS vector); [`solve`] returns a least-squares solution of that
//! system together with a [`SolveStatus`] describing its numerical health.

pub mod assemble;
pub mod error;
pub mod linear;

pub use assemble::{MnaSystem, accumulate_lhs, accumulate_rhs, assemble};
pub use error::{SolverError, SolverResult};
pub use linear::{LinearSolution, LinearSolverConfig, SolveStatus, solve, solve_with_config};
