//! Insertion-ordered node registry.

use std::collections::HashMap;
use nd_core::NodeId;

use crate::node::Node;

/// Owns every node of a circuit.
///
/// Nodes live in slots indexed by their `NodeId`, so iteration follows
/// insertion order and index allocation is reproducible. Removed slots are
/// left empty; their handles are never issued again.
#[derive(Debug, Default, Clone)]
pub struct NodeRegistry {
    slots: Vec<Option<Node>>,
    by_name: HashMap<String, NodeId>,
}

impl NodeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, keyed by its name.
    ///
    /// Returns the node's handle and whether it was newly inserted. A node
    /// whose name is already registered is dropped and the existing handle
    /// is returned. A reference node always enters at 0 V.
    pub fn insert(&mut self, mut node: Node) -> (NodeId, bool) {
        if let Some(&id) = self.by_name.get(node.name()) {
            return (id, false);
        }
        if node.is_reference() {
            node.clear_voltages();
        }
        let id = NodeId::from_index(self.slots.len() as u32);
        self.by_name.insert(node.name().to_owned(), id);
        self.slots.push(Some(node));
        (id, true)
    }

    /// Remove a node by handle.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let node = self.slots.get_mut(id.index() as usize)?.take()?;
        self.by_name.remove(node.name());
        Some(node)
    }

    /// Remove a node by name.
    pub fn remove_by_name(&mut self, name: &str) -> Option<Node> {
        let id = self.id_of(name)?;
        self.remove(id)
    }

    /// Look up the handle of a named node.
    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.index() as usize)?.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.index() as usize)?.as_mut()
    }

    pub fn by_name(&self, name: &str) -> Option<&Node> {
        self.get(self.id_of(name)?)
    }

    /// Iterate over live nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|n| (NodeId::from_index(i as u32), n)))
    }

    /// Iterate mutably over live nodes in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (NodeId, &mut Node)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_mut().map(|n| (NodeId::from_index(i as u32), n)))
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Forget every assigned index, e.g. after a failed assembly.
    pub fn clear_indices(&mut self) {
        for (_, node) in self.iter_mut() {
            node.set_index(None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_is_idempotent_by_name() {
        let mut reg = NodeRegistry::new();
        let (a, inserted) = reg.insert(Node::new("A"));
        assert!(inserted);

        let (again, inserted) = reg.insert(Node::reference("A"));
        assert!(!inserted);
        assert_eq!(a, again);
        assert_eq!(reg.len(), 1);
        // The first node is kept, not the duplicate.
        assert!(!reg.get(a).unwrap().is_reference());
    }

    #[test]
    fn reference_node_enters_at_zero_volts() {
        let mut reg = NodeRegistry::new();
        let mut gnd = Node::reference("GND");
        gnd.set_voltage(3.0);
        gnd.set_previous_voltage(1.0);
        let id = reg.insert(gnd).0;
        assert_eq!(reg.get(id).unwrap().voltage(), 0.0);
        assert_eq!(reg.get(id).unwrap().previous_voltage(), 0.0);

        let mut a = Node::new("A");
        a.set_voltage(3.0);
        let id = reg.insert(a).0;
        assert_eq!(reg.get(id).unwrap().voltage(), 3.0);
    }

    #[test]
    fn remove_leaves_handle_dangling() {
        let mut reg = NodeRegistry::new();
        let a = reg.insert(Node::new("A")).0;
        let b = reg.insert(Node::new("B")).0;

        assert_eq!(reg.remove_by_name("A").unwrap().name(), "A");
        assert!(!reg.contains(a));
        assert!(reg.contains(b));
        assert_eq!(reg.len(), 1);

        // Re-adding the name issues a fresh handle.
        let a2 = reg.insert(Node::new("A")).0;
        assert_ne!(a, a2);
        assert!(reg.remove(a).is_none());
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut reg = NodeRegistry::new();
        for name in ["Z", "A", "M"] {
            reg.insert(Node::new(name));
        }
        reg.remove_by_name("A");
        let names: Vec<&str> = reg.iter().map(|(_, n)| n.name()).collect();
        assert_eq!(names, ["Z", "M"]);
    }
}
