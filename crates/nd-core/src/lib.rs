//! nd-core: stable foundation for nodal.
//!
//! Contains:
//! - units (uom SI electrical types + constructors)
//! - numeric (Real + tolerances + float helpers)
//! - ids (stable compact handles for nodes and elements)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{NdError, NdResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
