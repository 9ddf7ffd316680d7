//! Error types for simulation operations.

use nd_core::NodeId;
use nd_elements::ElementError;
use nd_graph::GraphError;
use nd_solver::SolverError;
use thiserror::Error;

/// Errors encountered while building or stepping a circuit.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Unsupported element '{name}': {what}")]
    Unsupported { what: &'static str, name: String },

    #[error("Element '{element}' refers to node {node}, which is not in the circuit")]
    UnknownNode { element: String, node: NodeId },

    #[error("Element error: {0}")]
    Element(#[from] ElementError),

    #[error("Topology error: {0}")]
    Graph(#[from] GraphError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),
}

pub type SimResult<T> = Result<T, SimError>;
