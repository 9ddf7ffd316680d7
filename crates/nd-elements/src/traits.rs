//! Core traits for circuit elements.

use crate::error::{ElementError, ElementResult};
use nalgebra::{DMatrix, DVector};
use nd_core::NodeId;
use nd_graph::{GraphError, IndexMap, NodeRegistry};

/// The two nodes an element is connected between.
///
/// Sign conventions (voltage polarity, current direction) run from `a` to `b`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Terminals {
    pub a: NodeId,
    pub b: NodeId,
}

/// Everything a stamp provider may read during one assembly.
#[derive(Clone, Copy)]
pub struct StampContext<'a> {
    /// Nodes, for the voltages of the previous step.
    pub nodes: &'a NodeRegistry,
    /// Index assignment of the assembly in progress.
    pub index: &'a IndexMap,
    /// Fixed time step Δt (seconds).
    pub time_step: f64,
}

impl<'a> StampContext<'a> {
    pub fn new(nodes: &'a NodeRegistry, index: &'a IndexMap, time_step: f64) -> Self {
        Self {
            nodes,
            index,
            time_step,
        }
    }

    /// Current system dimension.
    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    /// An all-zero LHS contribution of the current dimension.
    pub fn zero_lhs(&self) -> DMatrix<f64> {
        let n = self.dimension();
        DMatrix::zeros(n, n)
    }

    /// An all-zero RHS contribution of the current dimension.
    pub fn zero_rhs(&self) -> DVector<f64> {
        DVector::zeros(self.dimension())
    }

    /// Matrix row of `node` (`None` for the reference node).
    pub fn row(&self, element: &str, node: NodeId) -> ElementResult<Option<usize>> {
        self.index.node_row(node).map_err(|e| match e {
            GraphError::NodeNotFound { node } => ElementError::UnmappedTerminal {
                element: element.to_owned(),
                node,
            },
            other => other.into(),
        })
    }

    /// Rows of both terminals.
    pub fn rows(
        &self,
        element: &str,
        terminals: Terminals,
    ) -> ElementResult<(Option<usize>, Option<usize>)> {
        Ok((
            self.row(element, terminals.a)?,
            self.row(element, terminals.b)?,
        ))
    }

    /// Voltage of `node` committed by the last completed step, i.e. the
    /// previous time point of the step being assembled.
    pub fn committed_voltage(&self, element: &str, node: NodeId) -> ElementResult<f64> {
        self.nodes
            .get(node)
            .map(|n| n.voltage())
            .ok_or_else(|| ElementError::UnmappedTerminal {
                element: element.to_owned(),
                node,
            })
    }

    /// Branch row reserved for the named voltage source.
    pub fn branch_row(&self, element: &str) -> ElementResult<usize> {
        self.index
            .branch_row(element)
            .map_err(|_| ElementError::MissingBranch {
                element: element.to_owned(),
            })
    }
}

/// Capability shared by every element kind: produce MNA stamps.
///
/// Stamps are dense and sized to [`StampContext::dimension`]; the assembler
/// sums them. An element with nothing to contribute on one side returns the
/// zero contribution from the default method rather than skipping it.
pub trait StampProvider: Send + Sync {
    /// Element name, unique within its kind.
    fn name(&self) -> &str;

    /// Connected nodes.
    fn terminals(&self) -> Terminals;

    /// Check parameter values before the element joins a circuit.
    fn validate(&self) -> ElementResult<()> {
        Ok(())
    }

    /// Contribution to the conductance (LHS) matrix.
    fn lhs_stamp(&self, ctx: &StampContext<'_>) -> ElementResult<DMatrix<f64>> {
        Ok(ctx.zero_lhs())
    }

    /// Contribution to the excitation (RHS) vector.
    fn rhs_stamp(&self, ctx: &StampContext<'_>) -> ElementResult<DVector<f64>> {
        Ok(ctx.zero_rhs())
    }
}
