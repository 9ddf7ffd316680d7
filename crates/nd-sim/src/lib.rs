//! Transient circuit simulation for nodal.
//!
//! Provides:
//! - `Circuit`: the aggregate owning nodes, elements, matrices and timing
//! - the fixed-step stepping state machine (reindex, reassemble, solve,
//!   write back, advance time)
//! - `SimConfig` for time step / start time / zero-initial-voltage startup
//! - a recording runner that steps a circuit and keeps node voltage history
//!
//! A `Circuit` is plain mutable state with no internal locking. It is driven
//! from one thread at a time; sharing it across threads requires external
//! synchronization by the caller.
//!
//! # Example
//!
//! ```
//! use nd_core::units::{ohm, volt};
//! use nd_elements::{DcVoltageSource, Resistor};
//! use nd_sim::{Circuit, SimConfig};
//!
//! let mut circuit = Circuit::new(SimConfig::default()).unwrap();
//! let gnd = circuit.add_reference_node("GND");
//! let a = circuit.add_node_named("A");
//! let b = circuit.add_node_named("B");
//! circuit.add_voltage_source(DcVoltageSource::new("V1", a, gnd, volt(3.0))).unwrap();
//! circuit.add_resistor(Resistor::new("R1", a, b, ohm(200.0))).unwrap();
//! circuit.add_resistor(Resistor::new("R2", b, gnd, ohm(100.0))).unwrap();
//!
//! circuit.step().unwrap();
//! assert!((circuit.node_voltage("B").unwrap() - 1.0).abs() < 1e-9);
//! ```

pub mod circuit;
pub mod config;
pub mod error;
pub mod sim;
mod step;

// Re-exports for public API
pub use circuit::Circuit;
pub use config::SimConfig;
pub use error::{SimError, SimResult};
pub use sim::{RunOptions, SimRecord, run};
pub use step::SimState;
