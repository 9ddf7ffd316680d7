//! System assembly: sum element stamps into one MNA system.

use crate::error::{SolverError, SolverResult};
use nalgebra::{DMatrix, DVector};
use nd_elements::{StampContext, StampProvider};
use tracing::trace;

/// Assembled MNA system `lhs · x = rhs`.
///
/// Rows `0..n_nodes-1` are KCL equations of the non-reference nodes; the
/// remaining rows are voltage-source branch equations.
#[derive(Debug, Clone, PartialEq)]
pub struct MnaSystem {
    /// Conductance matrix (n × n)
    pub lhs: DMatrix<f64>,
    /// Excitation vector (n)
    pub rhs: DVector<f64>,
}

impl MnaSystem {
    /// All-zero system of dimension `n`.
    pub fn zeros(n: usize) -> Self {
        Self {
            lhs: DMatrix::zeros(n, n),
            rhs: DVector::zeros(n),
        }
    }

    pub fn dimension(&self) -> usize {
        self.rhs.len()
    }
}

impl Default for MnaSystem {
    fn default() -> Self {
        Self::zeros(0)
    }
}

/// Add an LHS stamp into the running total. Shapes must match exactly.
pub fn accumulate_lhs(total: &mut DMatrix<f64>, stamp: &DMatrix<f64>) -> SolverResult<()> {
    if total.shape() != stamp.shape() {
        return Err(SolverError::DimensionMismatch {
            what: "LHS stamp",
            expected: total.shape(),
            actual: stamp.shape(),
        });
    }
    *total += stamp;
    Ok(())
}

/// Add an RHS stamp into the running total. Shapes must match exactly.
pub fn accumulate_rhs(total: &mut DVector<f64>, stamp: &DVector<f64>) -> SolverResult<()> {
    if total.shape() != stamp.shape() {
        return Err(SolverError::DimensionMismatch {
            what: "RHS stamp",
            expected: total.shape(),
            actual: stamp.shape(),
        });
    }
    *total += stamp;
    Ok(())
}

/// Build the MNA system for one time step.
///
/// Starts from a zero system sized by `ctx` and adds the LHS and RHS stamp of
/// every element in iteration order. Capacitor history terms read the
/// voltages committed in `ctx.nodes` by the previous step, so this must run
/// before the step's solution is written back.
pub fn assemble<'e, I, E>(elements: I, ctx: &StampContext<'_>) -> SolverResult<MnaSystem>
where
    I: IntoIterator<Item = &'e E>,
    E: StampProvider + 'e,
{
    let mut system = MnaSystem::zeros(ctx.dimension());

    for element in elements {
        let lhs = element.lhs_stamp(ctx)?;
        accumulate_lhs(&mut system.lhs, &lhs)?;

        let rhs = element.rhs_stamp(ctx)?;
        accumulate_rhs(&mut system.rhs, &rhs)?;

        trace!(element = element.name(), "stamped");
    }

    Ok(system)
}
