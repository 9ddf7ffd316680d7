//! Closed set of stampable element kinds.

use crate::capacitor::Capacitor;
use crate::error::ElementResult;
use crate::resistor::Resistor;
use crate::sources::{DcCurrentSource, DcVoltageSource};
use crate::traits::{StampContext, StampProvider, Terminals};
use nalgebra::{DMatrix, DVector};

/// Element family. Names are unique per kind, not across kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Resistor,
    Capacitor,
    VoltageSource,
    CurrentSource,
}

/// Any element the assembler can stamp.
#[derive(Debug, Clone)]
pub enum Element {
    Resistor(Resistor),
    Capacitor(Capacitor),
    VoltageSource(DcVoltageSource),
    CurrentSource(DcCurrentSource),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Resistor(_) => ElementKind::Resistor,
            Element::Capacitor(_) => ElementKind::Capacitor,
            Element::VoltageSource(_) => ElementKind::VoltageSource,
            Element::CurrentSource(_) => ElementKind::CurrentSource,
        }
    }

    /// Whether the element owns a branch row.
    pub fn has_branch(&self) -> bool {
        matches!(self, Element::VoltageSource(_))
    }

    fn provider(&self) -> &dyn StampProvider {
        match self {
            Element::Resistor(r) => r,
            Element::Capacitor(c) => c,
            Element::VoltageSource(v) => v,
            Element::CurrentSource(i) => i,
        }
    }
}

impl StampProvider for Element {
    fn name(&self) -> &str {
        self.provider().name()
    }

    fn terminals(&self) -> Terminals {
        self.provider().terminals()
    }

    fn validate(&self) -> ElementResult<()> {
        self.provider().validate()
    }

    fn lhs_stamp(&self, ctx: &StampContext<'_>) -> ElementResult<DMatrix<f64>> {
        self.provider().lhs_stamp(ctx)
    }

    fn rhs_stamp(&self, ctx: &StampContext<'_>) -> ElementResult<DVector<f64>> {
        self.provider().rhs_stamp(ctx)
    }
}

impl From<Resistor> for Element {
    fn from(r: Resistor) -> Self {
        Element::Resistor(r)
    }
}

impl From<Capacitor> for Element {
    fn from(c: Capacitor) -> Self {
        Element::Capacitor(c)
    }
}

impl From<DcVoltageSource> for Element {
    fn from(v: DcVoltageSource) -> Self {
        Element::VoltageSource(v)
    }
}

impl From<DcCurrentSource> for Element {
    fn from(i: DcCurrentSource) -> Self {
        Element::CurrentSource(i)
    }
}
