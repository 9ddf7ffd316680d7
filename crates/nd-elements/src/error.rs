//! Error types for element stamping.

use nd_core::{NdError, NodeId};
use nd_graph::GraphError;
use thiserror::Error;

/// Errors that can occur while validating or stamping an element.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    #[error("Non-physical value for {what}: {value}")]
    NonPhysical { what: &'static str, value: f64 },

    #[error("Not supported: {what}")]
    NotSupported { what: &'static str },

    #[error("Element '{element}' is connected to unmapped node {node}")]
    UnmappedTerminal { element: String, node: NodeId },

    #[error("Voltage source '{element}' has no branch row")]
    MissingBranch { element: String },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type ElementResult<T> = Result<T, ElementError>;

impl From<NdError> for ElementError {
    fn from(e: NdError) -> Self {
        match e {
            NdError::NonFinite { what, value } | NdError::NonPositive { what, value } => {
                ElementError::NonPhysical { what, value }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ElementError::NonPhysical {
            what: "resistance",
            value: -1.0,
        };
        assert!(err.to_string().contains("resistance"));
    }

    #[test]
    fn core_error_conversion() {
        let err: ElementError = NdError::NonPositive {
            what: "capacitance",
            value: 0.0,
        }
        .into();
        assert!(matches!(err, ElementError::NonPhysical { .. }));
    }
}
