//! nd-graph: node registry and index allocation for nodal.
//!
//! Provides:
//! - Node data (name, reference flag, present and previous voltage)
//! - An insertion-ordered node registry with name-keyed idempotent insertion
//! - The index allocator mapping nodes and voltage-source branches to MNA rows
//!
//! # Example
//!
//! ```
//! use nd_graph::{IndexMap, Node, NodeRegistry};
//!
//! let mut nodes = NodeRegistry::new();
//! let gnd = nodes.insert(Node::reference("GND")).0;
//! let a = nodes.insert(Node::new("A")).0;
//!
//! let index = IndexMap::allocate(&mut nodes, ["V1"]).unwrap();
//! assert_eq!(index.node_index(gnd).unwrap(), 0);
//! assert_eq!(index.node_row(a).unwrap(), Some(0));
//! assert_eq!(index.branch_row("V1").unwrap(), 1);
//! assert_eq!(index.dimension(), 2);
//! ```

pub mod error;
pub mod indexing;
pub mod node;
pub mod registry;
pub(crate) mod validate;

// Re-exports for ergonomics
pub use error::{GraphError, GraphResult};
pub use indexing::IndexMap;
pub use node::Node;
pub use registry::NodeRegistry;
