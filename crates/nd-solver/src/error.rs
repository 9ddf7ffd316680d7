//! Error types for assembly and solving.

use nd_elements::ElementError;
use nd_graph::GraphError;
use thiserror::Error;

/// Errors that can occur while assembling or solving an MNA system.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Dimension mismatch in {what}: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        what: &'static str,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Element error: {0}")]
    Element(#[from] ElementError),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Numeric error: {what}")]
    Numeric { what: String },
}

pub type SolverResult<T> = Result<T, SolverError>;
