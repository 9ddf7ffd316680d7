//! Inductor data holder.
//!
//! An inductor needs its own branch-current unknown, which the assembler
//! does not allocate yet. Until then every stamp reports `NotSupported`.

use crate::error::{ElementError, ElementResult};
use crate::traits::{StampContext, StampProvider, Terminals};
use nalgebra::{DMatrix, DVector};
use nd_core::NodeId;
use nd_core::units::Inductance;

const UNSUPPORTED: &str = "inductor stamps require a branch-current formulation";

#[derive(Debug, Clone)]
pub struct Inductor {
    name: String,
    terminals: Terminals,
    pub inductance: Inductance,
}

impl Inductor {
    pub fn new(name: impl Into<String>, a: NodeId, b: NodeId, inductance: Inductance) -> Self {
        Self {
            name: name.into(),
            terminals: Terminals { a, b },
            inductance,
        }
    }
}

impl StampProvider for Inductor {
    fn name(&self) -> &str {
        &self.name
    }

    fn terminals(&self) -> Terminals {
        self.terminals
    }

    fn validate(&self) -> ElementResult<()> {
        Err(ElementError::NotSupported { what: UNSUPPORTED })
    }

    fn lhs_stamp(&self, _ctx: &StampContext<'_>) -> ElementResult<DMatrix<f64>> {
        Err(ElementError::NotSupported { what: UNSUPPORTED })
    }

    fn rhs_stamp(&self, _ctx: &StampContext<'_>) -> ElementResult<DVector<f64>> {
        Err(ElementError::NotSupported { what: UNSUPPORTED })
    }
}
