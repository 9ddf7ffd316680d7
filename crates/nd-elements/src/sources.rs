//! Independent DC sources.

use crate::common::{check_finite, inject_current};
use crate::error::ElementResult;
use crate::traits::{StampContext, StampProvider, Terminals};
use nalgebra::{DMatrix, DVector};
use nd_core::NodeId;
use nd_core::units::{Current, Voltage};

/// DC voltage source enforcing `V(a) - V(b) = voltage`.
///
/// Owns one branch row (named after the source) whose unknown is the current
/// through the source.
#[derive(Debug, Clone)]
pub struct DcVoltageSource {
    name: String,
    terminals: Terminals,
    /// Source voltage
    pub voltage: Voltage,
}

impl DcVoltageSource {
    /// Create a new DC voltage source with `a` as the positive terminal.
    pub fn new(name: impl Into<String>, a: NodeId, b: NodeId, voltage: Voltage) -> Self {
        Self {
            name: name.into(),
            terminals: Terminals { a, b },
            voltage,
        }
    }
}

impl StampProvider for DcVoltageSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn terminals(&self) -> Terminals {
        self.terminals
    }

    fn validate(&self) -> ElementResult<()> {
        check_finite(self.voltage.value, "source voltage")?;
        Ok(())
    }

    fn lhs_stamp(&self, ctx: &StampContext<'_>) -> ElementResult<DMatrix<f64>> {
        let (a, b) = ctx.rows(&self.name, self.terminals)?;
        let k = ctx.branch_row(&self.name)?;

        let mut lhs = ctx.zero_lhs();
        if let Some(i) = a {
            lhs[(i, k)] += 1.0;
            lhs[(k, i)] += 1.0;
        }
        if let Some(j) = b {
            lhs[(j, k)] -= 1.0;
            lhs[(k, j)] -= 1.0;
        }
        Ok(lhs)
    }

    fn rhs_stamp(&self, ctx: &StampContext<'_>) -> ElementResult<DVector<f64>> {
        let k = ctx.branch_row(&self.name)?;
        let mut rhs = ctx.zero_rhs();
        rhs[k] += self.voltage.value;
        Ok(rhs)
    }
}

/// DC current source pushing `current` out of the source into node `a` and
/// back in from node `b`. Contributes to the RHS only.
#[derive(Debug, Clone)]
pub struct DcCurrentSource {
    name: String,
    terminals: Terminals,
    /// Source current
    pub current: Current,
}

impl DcCurrentSource {
    /// Create a new DC current source.
    pub fn new(name: impl Into<String>, a: NodeId, b: NodeId, current: Current) -> Self {
        Self {
            name: name.into(),
            terminals: Terminals { a, b },
            current,
        }
    }
}

impl StampProvider for DcCurrentSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn terminals(&self) -> Terminals {
        self.terminals
    }

    fn validate(&self) -> ElementResult<()> {
        check_finite(self.current.value, "source current")?;
        Ok(())
    }

    fn rhs_stamp(&self, ctx: &StampContext<'_>) -> ElementResult<DVector<f64>> {
        let (a, b) = ctx.rows(&self.name, self.terminals)?;
        let mut rhs = ctx.zero_rhs();
        inject_current(&mut rhs, a, b, self.current.value);
        Ok(rhs)
    }
}
