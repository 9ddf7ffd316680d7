//! nd-elements: circuit element library for nodal.
//!
//! Provides the two-terminal elements understood by the MNA assembler:
//! - Resistors (conductance stamp)
//! - Capacitors (backward-Euler companion model)
//! - DC voltage sources (branch row) and DC current sources (injection)
//!
//! Every element implements [`StampProvider`] and is evaluated against a
//! [`StampContext`] holding the current index assignment, the node registry
//! (for the last committed voltages) and the time step. Inductors exist only as a
//! data holder; their stamps report `NotSupported`.
//!
//! # Example
//!
//! ```
//! use nd_core::units::ohm;
//! use nd_elements::{Resistor, StampContext, StampProvider};
//! use nd_graph::{IndexMap, Node, NodeRegistry};
//!
//! let mut nodes = NodeRegistry::new();
//! let gnd = nodes.insert(Node::reference("GND")).0;
//! let a = nodes.insert(Node::new("A")).0;
//! let index = IndexMap::allocate(&mut nodes, []).unwrap();
//!
//! let r = Resistor::new("R1", a, gnd, ohm(100.0));
//! let ctx = StampContext::new(&nodes, &index, 1e-3);
//! let lhs = r.lhs_stamp(&ctx).unwrap();
//! assert_eq!(lhs[(0, 0)], 0.01);
//! ```

pub mod capacitor;
pub mod common;
pub mod element;
pub mod error;
pub mod inductor;
pub mod resistor;
pub mod sources;
pub mod traits;

// Re-exports
pub use capacitor::Capacitor;
pub use element::{Element, ElementKind};
pub use error::{ElementError, ElementResult};
pub use inductor::Inductor;
pub use resistor::Resistor;
pub use sources::{DcCurrentSource, DcVoltageSource};
pub use traits::{StampContext, StampProvider, Terminals};
