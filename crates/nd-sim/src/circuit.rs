//! The circuit aggregate: topology, elements, matrices and timing.

use nalgebra::{DMatrix, DVector};
use nd_core::NodeId;
use nd_elements::{
    Capacitor, DcCurrentSource, DcVoltageSource, Element, ElementKind, Inductor, Resistor,
    StampProvider,
};
use nd_graph::{IndexMap, Node, NodeRegistry};
use nd_solver::{LinearSolverConfig, MnaSystem, SolveStatus};
use tracing::debug;

use crate::config::SimConfig;
use crate::error::{SimError, SimResult};
use crate::step::SimState;

/// A transient circuit.
///
/// Owns every node and element; elements refer to nodes by [`NodeId`].
/// Each effective topology change reindexes and reassembles the system. A
/// rebuild that cannot complete (no reference node yet, an element pointing
/// at a removed node) leaves the circuit [`SimState::Uninitialized`] instead
/// of failing the mutation; [`Circuit::step`] reports the cause.
#[derive(Debug, Clone)]
pub struct Circuit {
    pub(crate) config: SimConfig,
    pub(crate) solver: LinearSolverConfig,
    pub(crate) nodes: NodeRegistry,
    pub(crate) elements: Vec<Element>,
    pub(crate) index: IndexMap,
    pub(crate) system: MnaSystem,
    pub(crate) solution: DVector<f64>,
    pub(crate) status: Option<SolveStatus>,
    pub(crate) state: SimState,
    pub(crate) current_time: f64,
    pub(crate) last_time: f64,
    pub(crate) first_step: bool,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new(config: SimConfig) -> SimResult<Self> {
        config.validate()?;
        Ok(Self {
            current_time: config.start_time,
            last_time: config.start_time,
            config,
            solver: LinearSolverConfig::default(),
            nodes: NodeRegistry::new(),
            elements: Vec::new(),
            index: IndexMap::default(),
            system: MnaSystem::default(),
            solution: DVector::zeros(0),
            status: None,
            state: SimState::Uninitialized,
            first_step: true,
        })
    }

    /// Replace the linear solver settings.
    pub fn with_solver_config(mut self, solver: LinearSolverConfig) -> Self {
        self.solver = solver;
        self
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    // ---- nodes ----

    /// Add a node. A node whose name is already present is ignored and the
    /// existing handle is returned.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let (id, inserted) = self.nodes.insert(node);
        if inserted {
            self.refresh();
        }
        id
    }

    pub fn add_node_named(&mut self, name: impl Into<String>) -> NodeId {
        self.add_node(Node::new(name))
    }

    /// Add the reference (ground) node.
    pub fn add_reference_node(&mut self, name: impl Into<String>) -> NodeId {
        self.add_node(Node::reference(name))
    }

    /// Remove a node by name, together with every element attached to it.
    pub fn remove_node(&mut self, name: &str) -> bool {
        match self.nodes.id_of(name) {
            Some(id) => self.remove_node_id(id),
            None => false,
        }
    }

    /// Remove a node by handle, together with every element attached to it.
    pub fn remove_node_id(&mut self, id: NodeId) -> bool {
        if self.nodes.remove(id).is_none() {
            return false;
        }
        self.elements.retain(|e| {
            let t = e.terminals();
            let attached = t.a == id || t.b == id;
            if attached {
                debug!(element = e.name(), node = %id, "removed element with its node");
            }
            !attached
        });
        self.refresh();
        true
    }

    // ---- elements ----

    /// Add a resistor. Returns `Ok(false)` if a resistor of that name exists.
    pub fn add_resistor(&mut self, resistor: Resistor) -> SimResult<bool> {
        self.add_element(resistor.into())
    }

    /// Add a capacitor. Returns `Ok(false)` if a capacitor of that name exists.
    pub fn add_capacitor(&mut self, capacitor: Capacitor) -> SimResult<bool> {
        self.add_element(capacitor.into())
    }

    /// Add a DC voltage source; it claims a branch row on the next rebuild.
    pub fn add_voltage_source(&mut self, source: DcVoltageSource) -> SimResult<bool> {
        self.add_element(source.into())
    }

    pub fn add_current_source(&mut self, source: DcCurrentSource) -> SimResult<bool> {
        self.add_element(source.into())
    }

    /// Inductors cannot be simulated; registration always fails and the
    /// circuit is left unchanged.
    pub fn add_inductor(&mut self, inductor: Inductor) -> SimResult<bool> {
        debug!(element = inductor.name(), "rejected inductor");
        Err(SimError::Unsupported {
            what: "inductors are not simulated",
            name: inductor.name().to_owned(),
        })
    }

    fn add_element(&mut self, element: Element) -> SimResult<bool> {
        if self.element(element.kind(), element.name()).is_some() {
            return Ok(false);
        }

        element.validate()?;

        let terminals = element.terminals();
        for node in [terminals.a, terminals.b] {
            if !self.nodes.contains(node) {
                return Err(SimError::UnknownNode {
                    element: element.name().to_owned(),
                    node,
                });
            }
        }

        debug!(element = element.name(), kind = ?element.kind(), "added element");
        self.elements.push(element);
        self.refresh();
        Ok(true)
    }

    // ---- introspection ----

    pub fn nodes(&self) -> &NodeRegistry {
        &self.nodes
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Look up an element by kind and name.
    pub fn element(&self, kind: ElementKind, name: &str) -> Option<&Element> {
        self.elements
            .iter()
            .find(|e| e.kind() == kind && e.name() == name)
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes.by_name(name)
    }

    pub fn node_voltage(&self, name: &str) -> Option<f64> {
        self.node(name).map(Node::voltage)
    }

    pub fn previous_voltage(&self, name: &str) -> Option<f64> {
        self.node(name).map(Node::previous_voltage)
    }

    /// Index assigned to a node by the last successful rebuild.
    pub fn node_index(&self, name: &str) -> Option<usize> {
        self.node(name).and_then(Node::index)
    }

    /// Branch index of a voltage source (0-based among branches).
    pub fn branch_index(&self, source: &str) -> Option<usize> {
        self.index.branch_index(source).ok()
    }

    /// Current through a voltage source from the last solve, flowing from
    /// its `a` terminal through the source to `b`.
    pub fn branch_current(&self, source: &str) -> Option<f64> {
        if self.state != SimState::Stepped {
            return None;
        }
        let row = self.index.branch_row(source).ok()?;
        self.solution.get(row).copied()
    }

    /// Assembled conductance matrix.
    pub fn lhs(&self) -> &DMatrix<f64> {
        &self.system.lhs
    }

    /// Assembled excitation vector.
    pub fn rhs(&self) -> &DVector<f64> {
        &self.system.rhs
    }

    /// Solution of the last successful step: non-reference node voltages in
    /// index order followed by branch currents.
    pub fn solution(&self) -> &DVector<f64> {
        &self.solution
    }

    /// System dimension: non-reference nodes plus voltage-source branches.
    pub fn dimension(&self) -> usize {
        self.index.dimension()
    }

    pub fn solve_status(&self) -> Option<&SolveStatus> {
        self.status.as_ref()
    }

    pub fn state(&self) -> SimState {
        self.state
    }

    /// Time the next step will solve at.
    pub fn time(&self) -> f64 {
        self.current_time
    }

    /// Time of the last completed step.
    pub fn last_time(&self) -> f64 {
        self.last_time
    }

    pub fn delta_time(&self) -> f64 {
        self.current_time - self.last_time
    }

    pub fn time_step(&self) -> f64 {
        self.config.time_step
    }

    pub fn is_first_step(&self) -> bool {
        self.first_step
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::units::{farad, henry, ohm, volt};
    use nd_elements::ElementError;

    fn circuit() -> Circuit {
        Circuit::new(SimConfig::default()).unwrap()
    }

    #[test]
    fn new_rejects_bad_config() {
        let err = Circuit::new(SimConfig::with_time_step(0.0)).unwrap_err();
        assert!(matches!(err, SimError::InvalidArg { .. }));
    }

    #[test]
    fn duplicate_node_returns_existing_handle() {
        let mut c = circuit();
        let a = c.add_node_named("A");
        assert_eq!(c.add_node_named("A"), a);
        assert_eq!(c.nodes().len(), 1);
    }

    #[test]
    fn no_reference_leaves_circuit_uninitialized() {
        let mut c = circuit();
        let a = c.add_node_named("A");
        let b = c.add_node_named("B");
        assert!(c.add_resistor(Resistor::new("R1", a, b, ohm(10.0))).unwrap());
        assert_eq!(c.state(), SimState::Uninitialized);
        assert_eq!(c.dimension(), 0);
    }

    #[test]
    fn rebuild_tracks_dimension() {
        let mut c = circuit();
        let gnd = c.add_reference_node("GND");
        let a = c.add_node_named("A");
        let b = c.add_node_named("B");
        assert_eq!(c.state(), SimState::Ready);
        assert_eq!(c.dimension(), 2);

        c.add_voltage_source(DcVoltageSource::new("V1", a, gnd, volt(1.0)))
            .unwrap();
        c.add_capacitor(Capacitor::new("C1", b, gnd, farad(1e-6)))
            .unwrap();
        assert_eq!(c.dimension(), 3);
        assert_eq!(c.lhs().shape(), (3, 3));
        assert_eq!(c.branch_index("V1"), Some(0));
        assert_eq!(c.node_index("GND"), Some(0));
        assert_eq!(c.node_index("B"), Some(2));
    }

    #[test]
    fn duplicate_element_name_per_kind() {
        let mut c = circuit();
        let gnd = c.add_reference_node("GND");
        let a = c.add_node_named("A");
        assert!(c.add_resistor(Resistor::new("X", a, gnd, ohm(10.0))).unwrap());
        assert!(!c.add_resistor(Resistor::new("X", a, gnd, ohm(20.0))).unwrap());
        // Same name, different kind is a distinct element.
        assert!(c.add_capacitor(Capacitor::new("X", a, gnd, farad(1e-6))).unwrap());
        assert_eq!(c.elements().len(), 2);
    }

    #[test]
    fn duplicate_name_is_a_no_op_even_with_bad_value() {
        let mut c = circuit();
        let gnd = c.add_reference_node("GND");
        let a = c.add_node_named("A");
        assert!(c.add_resistor(Resistor::new("R1", a, gnd, ohm(1.0))).unwrap());
        let lhs = c.lhs().clone();

        assert_eq!(
            c.add_resistor(Resistor::new("R1", a, gnd, ohm(-1.0))),
            Ok(false)
        );
        let stale = NodeId::from_index(99);
        assert_eq!(
            c.add_resistor(Resistor::new("R1", stale, gnd, ohm(2.0))),
            Ok(false)
        );
        assert_eq!(c.lhs(), &lhs);
        assert_eq!(c.elements().len(), 1);
    }

    #[test]
    fn element_on_unknown_node_rejected() {
        let mut c = circuit();
        let gnd = c.add_reference_node("GND");
        let a = c.add_node_named("A");
        c.remove_node_id(a);
        let err = c
            .add_resistor(Resistor::new("R1", a, gnd, ohm(1.0)))
            .unwrap_err();
        assert!(matches!(err, SimError::UnknownNode { node, .. } if node == a));
        assert!(c.elements().is_empty());
    }

    #[test]
    fn non_physical_value_rejected() {
        let mut c = circuit();
        let gnd = c.add_reference_node("GND");
        let a = c.add_node_named("A");
        let err = c
            .add_resistor(Resistor::new("R1", a, gnd, ohm(-5.0)))
            .unwrap_err();
        assert!(matches!(
            err,
            SimError::Element(ElementError::NonPhysical { .. })
        ));
    }

    #[test]
    fn inductor_unsupported() {
        let mut c = circuit();
        let gnd = c.add_reference_node("GND");
        let a = c.add_node_named("A");
        let err = c
            .add_inductor(Inductor::new("L1", a, gnd, henry(1e-3)))
            .unwrap_err();
        assert!(matches!(err, SimError::Unsupported { ref name, .. } if name == "L1"));
        assert!(c.elements().is_empty());
        assert_eq!(c.state(), SimState::Ready);
    }

    #[test]
    fn reference_node_held_at_zero_volts() {
        let mut c = circuit();
        let mut ground = Node::reference("GND");
        ground.set_voltage(5.0);
        let gnd = c.add_node(ground);
        let a = c.add_node_named("A");
        c.add_capacitor(Capacitor::new("C1", a, gnd, farad(1e-6)))
            .unwrap();
        c.add_resistor(Resistor::new("R1", a, gnd, ohm(1.0))).unwrap();

        assert_eq!(c.node_voltage("GND"), Some(0.0));
        assert!(c.rhs().iter().all(|v| *v == 0.0));
        c.step().unwrap();
        assert_eq!(c.node_voltage("GND"), Some(0.0));
        assert_eq!(c.node_voltage("A"), Some(0.0));
    }

    #[test]
    fn removing_node_drops_attached_elements() {
        let mut c = circuit();
        let gnd = c.add_reference_node("GND");
        let a = c.add_node_named("A");
        let b = c.add_node_named("B");
        c.add_resistor(Resistor::new("R1", a, gnd, ohm(1.0))).unwrap();
        c.add_resistor(Resistor::new("R2", b, gnd, ohm(1.0))).unwrap();

        assert!(c.remove_node("A"));
        assert!(!c.remove_node("A"));
        assert!(c.node("A").is_none());
        assert!(c.element(ElementKind::Resistor, "R1").is_none());
        assert!(c.element(ElementKind::Resistor, "R2").is_some());
        assert_eq!(c.state(), SimState::Ready);
        assert_eq!(c.dimension(), 1);
    }

    #[test]
    fn removed_node_can_be_rebuilt_and_stepped() {
        let mut c = circuit();
        let gnd = c.add_reference_node("GND");
        let a = c.add_node_named("A");
        let b = c.add_node_named("B");
        c.add_voltage_source(DcVoltageSource::new("V1", a, gnd, volt(3.0)))
            .unwrap();
        c.add_resistor(Resistor::new("R1", a, b, ohm(1.0))).unwrap();
        c.add_resistor(Resistor::new("R2", b, gnd, ohm(2.0))).unwrap();
        c.step().unwrap();

        assert!(c.remove_node("B"));
        let b = c.add_node_named("B");
        c.step().unwrap();

        assert!(c.add_resistor(Resistor::new("R1", a, b, ohm(1.0))).unwrap());
        assert!(c.add_resistor(Resistor::new("R2", b, gnd, ohm(2.0))).unwrap());
        c.step().unwrap();
        assert!((c.node_voltage("B").unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn branch_current_requires_a_step() {
        let mut c = circuit();
        let gnd = c.add_reference_node("GND");
        let a = c.add_node_named("A");
        c.add_voltage_source(DcVoltageSource::new("V1", a, gnd, volt(1.0)))
            .unwrap();
        assert_eq!(c.branch_current("V1"), None);
        assert_eq!(c.branch_current("nope"), None);
    }
}
