//! Linear resistor.

use crate::common::{check_positive, stamp_conductance};
use crate::error::ElementResult;
use crate::traits::{StampContext, StampProvider, Terminals};
use nalgebra::DMatrix;
use nd_core::NodeId;
use nd_core::units::Resistance;

/// Ideal resistor between two nodes. Contributes to the LHS only.
#[derive(Debug, Clone)]
pub struct Resistor {
    name: String,
    terminals: Terminals,
    /// Resistance value
    pub resistance: Resistance,
}

impl Resistor {
    /// Create a new resistor.
    pub fn new(name: impl Into<String>, a: NodeId, b: NodeId, resistance: Resistance) -> Self {
        Self {
            name: name.into(),
            terminals: Terminals { a, b },
            resistance,
        }
    }

    /// Conductance 1/R in siemens.
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance.value
    }
}

impl StampProvider for Resistor {
    fn name(&self) -> &str {
        &self.name
    }

    fn terminals(&self) -> Terminals {
        self.terminals
    }

    fn validate(&self) -> ElementResult<()> {
        check_positive(self.resistance.value, "resistance")?;
        Ok(())
    }

    fn lhs_stamp(&self, ctx: &StampContext<'_>) -> ElementResult<DMatrix<f64>> {
        let (a, b) = ctx.rows(&self.name, self.terminals)?;
        let mut lhs = ctx.zero_lhs();
        stamp_conductance(&mut lhs, a, b, self.conductance());
        Ok(lhs)
    }
}
