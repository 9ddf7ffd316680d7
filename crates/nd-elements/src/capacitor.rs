//! Capacitor with a backward-Euler companion model.
//!
//! Over one step `i = C/Δt · (v_n - v_{n-1})`, i.e. a conductance `C/Δt`
//! in parallel with a history current source `C/Δt · v_{n-1}`. The history
//! term reads the node voltages committed by the previous step, before the
//! new solution is written back. That is what couples consecutive steps.

use crate::common::{check_positive, inject_current, stamp_conductance};
use crate::error::ElementResult;
use crate::traits::{StampContext, StampProvider, Terminals};
use nalgebra::{DMatrix, DVector};
use nd_core::NodeId;
use nd_core::units::Capacitance;

/// Ideal capacitor between two nodes. Contributes to both LHS and RHS.
#[derive(Debug, Clone)]
pub struct Capacitor {
    name: String,
    terminals: Terminals,
    /// Capacitance value
    pub capacitance: Capacitance,
}

impl Capacitor {
    /// Create a new capacitor.
    pub fn new(name: impl Into<String>, a: NodeId, b: NodeId, capacitance: Capacitance) -> Self {
        Self {
            name: name.into(),
            terminals: Terminals { a, b },
            capacitance,
        }
    }

    /// Discretized conductance C/Δt.
    pub fn companion_conductance(&self, time_step: f64) -> f64 {
        self.capacitance.value / time_step
    }
}

impl StampProvider for Capacitor {
    fn name(&self) -> &str {
        &self.name
    }

    fn terminals(&self) -> Terminals {
        self.terminals
    }

    fn validate(&self) -> ElementResult<()> {
        check_positive(self.capacitance.value, "capacitance")?;
        Ok(())
    }

    fn lhs_stamp(&self, ctx: &StampContext<'_>) -> ElementResult<DMatrix<f64>> {
        let (a, b) = ctx.rows(&self.name, self.terminals)?;
        let mut lhs = ctx.zero_lhs();
        stamp_conductance(&mut lhs, a, b, self.companion_conductance(ctx.time_step));
        Ok(lhs)
    }

    fn rhs_stamp(&self, ctx: &StampContext<'_>) -> ElementResult<DVector<f64>> {
        let (a, b) = ctx.rows(&self.name, self.terminals)?;
        let v_prev = ctx.committed_voltage(&self.name, self.terminals.a)?
            - ctx.committed_voltage(&self.name, self.terminals.b)?;

        let mut rhs = ctx.zero_rhs();
        inject_current(
            &mut rhs,
            a,
            b,
            self.companion_conductance(ctx.time_step) * v_prev,
        );
        Ok(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::units::farad;
    use nd_graph::{IndexMap, Node, NodeRegistry};

    #[test]
    fn history_current_uses_committed_voltage() {
        let mut nodes = NodeRegistry::new();
        let gnd = nodes.insert(Node::reference("GND")).0;
        let b = nodes.insert(Node::new("B")).0;
        {
            let node = nodes.get_mut(b).unwrap();
            node.set_previous_voltage(0.1);
            node.set_voltage(0.5);
        }
        let index = IndexMap::allocate(&mut nodes, []).unwrap();
        let ctx = StampContext::new(&nodes, &index, 1e-4);

        let c = Capacitor::new("C1", b, gnd, farad(1e-7));
        let g = 1e-7 / 1e-4;

        let lhs = c.lhs_stamp(&ctx).unwrap();
        assert!((lhs[(0, 0)] - g).abs() < 1e-15);

        let rhs = c.rhs_stamp(&ctx).unwrap();
        assert!((rhs[0] - g * 0.5).abs() < 1e-15);
    }

    #[test]
    fn history_current_is_antisymmetric() {
        let mut nodes = NodeRegistry::new();
        nodes.insert(Node::reference("GND"));
        let a = nodes.insert(Node::new("A")).0;
        let b = nodes.insert(Node::new("B")).0;
        nodes.get_mut(a).unwrap().set_voltage(2.0);
        nodes.get_mut(b).unwrap().set_voltage(0.5);
        let index = IndexMap::allocate(&mut nodes, []).unwrap();
        let ctx = StampContext::new(&nodes, &index, 1.0);

        let rhs = Capacitor::new("C1", a, b, farad(2.0)).rhs_stamp(&ctx).unwrap();
        assert_eq!(rhs, DVector::from_vec(vec![3.0, -3.0]));
    }

    #[test]
    fn negative_capacitance_rejected() {
        let id = NodeId::from_index(0);
        assert!(Capacitor::new("C", id, id, farad(-1e-6)).validate().is_err());
    }
}
