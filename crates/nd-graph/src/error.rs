//! Graph-specific error types.

use nd_core::NodeId;

pub type GraphResult<T> = Result<T, GraphError>;

/// Node registry and index allocation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No node is flagged as the reference (ground) node.
    NoReference,

    /// More than one node is flagged as the reference node.
    MultipleReferences { first: String, second: String },

    /// A handle refers to a node that is not registered (or was removed).
    NodeNotFound { node: NodeId },

    /// No branch row was allocated for the named source.
    BranchNotFound { name: String },

    /// Two branches were requested under the same name.
    DuplicateBranch { name: String },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::NoReference => write!(f, "Circuit has no reference node"),
            GraphError::MultipleReferences { first, second } => {
                write!(
                    f,
                    "Circuit has more than one reference node ('{}' and '{}')",
                    first, second
                )
            }
            GraphError::NodeNotFound { node } => {
                write!(f, "Node {} is not registered in the circuit", node)
            }
            GraphError::BranchNotFound { name } => {
                write!(f, "No branch allocated for source '{}'", name)
            }
            GraphError::DuplicateBranch { name } => {
                write!(f, "Branch '{}' allocated twice", name)
            }
        }
    }
}

impl std::error::Error for GraphError {}
