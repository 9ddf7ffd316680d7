//! Index allocation for MNA assembly.
//!
//! Maps nodes and voltage-source branches to contiguous solver indices.
//! The reference node always receives index 0 and is excluded from the
//! solved vector, so a node with index `i > 0` lives on row `i - 1`. Branch
//! rows follow the node rows.

use std::collections::HashMap;
use nd_core::NodeId;
use tracing::debug;

use crate::error::{GraphError, GraphResult};
use crate::registry::NodeRegistry;
use crate::validate;

/// Node and branch index assignment for one assembly.
///
/// Recompute it with [`IndexMap::allocate`] whenever the topology may have
/// changed; handles are stable across allocations but indices are not.
#[derive(Debug, Clone, Default)]
pub struct IndexMap {
    /// Contiguous list of node IDs (index -> NodeId); index 0 is the reference.
    node_ids: Vec<NodeId>,

    /// Reverse lookup: NodeId slot -> index.
    /// Sized to max(NodeId.index) + 1; None if that slot is not mapped.
    node_to_idx: Vec<Option<usize>>,

    /// Branch index -> source name.
    branch_names: Vec<String>,

    /// Reverse lookup: source name -> branch index.
    branch_to_idx: HashMap<String, usize>,
}

impl IndexMap {
    /// Allocate indices for every registered node and for the given branches.
    ///
    /// Non-reference nodes are numbered in registry order starting at 1;
    /// branches in iteration order starting at 0. The assigned index is also
    /// written back into each node. On failure every node index is cleared.
    pub fn allocate<'a, I>(nodes: &mut NodeRegistry, branches: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        match Self::try_allocate(nodes, branches) {
            Ok(map) => {
                for (id, node) in nodes.iter_mut() {
                    node.set_index(map.node_index(id).ok());
                }
                debug!(
                    nodes = map.node_count(),
                    branches = map.branch_count(),
                    dimension = map.dimension(),
                    "allocated circuit indices"
                );
                Ok(map)
            }
            Err(e) => {
                for (_, node) in nodes.iter_mut() {
                    node.set_index(None);
                }
                debug!(error = %e, "index allocation failed");
                Err(e)
            }
        }
    }

    fn try_allocate<'a, I>(nodes: &NodeRegistry, branches: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let reference = validate::find_reference(nodes)?;

        let mut node_ids = Vec::with_capacity(nodes.len());
        node_ids.push(reference);
        node_ids.extend(nodes.iter().map(|(id, _)| id).filter(|&id| id != reference));

        let max_slot = node_ids
            .iter()
            .map(|id| id.index() as usize)
            .max()
            .unwrap_or(0);
        let mut node_to_idx = vec![None; max_slot + 1];
        for (i, &id) in node_ids.iter().enumerate() {
            node_to_idx[id.index() as usize] = Some(i);
        }

        let mut branch_names = Vec::new();
        let mut branch_to_idx = HashMap::new();
        for name in branches {
            if branch_to_idx.insert(name.to_owned(), branch_names.len()).is_some() {
                return Err(GraphError::DuplicateBranch {
                    name: name.to_owned(),
                });
            }
            branch_names.push(name.to_owned());
        }

        Ok(Self {
            node_ids,
            node_to_idx,
            branch_names,
            branch_to_idx,
        })
    }

    /// Number of mapped nodes, reference included.
    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    /// Number of nodes that own a row in the system.
    pub fn non_reference_count(&self) -> usize {
        self.node_ids.len().saturating_sub(1)
    }

    pub fn branch_count(&self) -> usize {
        self.branch_names.len()
    }

    /// System dimension: non-reference nodes plus voltage-source branches.
    pub fn dimension(&self) -> usize {
        self.non_reference_count() + self.branch_count()
    }

    /// Whether this map came from a successful allocation.
    pub fn is_allocated(&self) -> bool {
        !self.node_ids.is_empty()
    }

    /// The reference node, if allocated.
    pub fn reference(&self) -> Option<NodeId> {
        self.node_ids.first().copied()
    }

    /// Node index (reference = 0).
    pub fn node_index(&self, id: NodeId) -> GraphResult<usize> {
        self.node_to_idx
            .get(id.index() as usize)
            .and_then(|&opt| opt)
            .ok_or(GraphError::NodeNotFound { node: id })
    }

    /// Matrix row of a node; `None` for the reference node.
    pub fn node_row(&self, id: NodeId) -> GraphResult<Option<usize>> {
        Ok(self.node_index(id)?.checked_sub(1))
    }

    /// Branch index of a voltage source (0-based among branches).
    pub fn branch_index(&self, name: &str) -> GraphResult<usize> {
        self.branch_to_idx
            .get(name)
            .copied()
            .ok_or_else(|| GraphError::BranchNotFound {
                name: name.to_owned(),
            })
    }

    /// Matrix row of a branch, appended after all node rows.
    pub fn branch_row(&self, name: &str) -> GraphResult<usize> {
        Ok(self.non_reference_count() + self.branch_index(name)?)
    }

    /// Node at an index (None if out of range).
    pub fn node_id(&self, index: usize) -> Option<NodeId> {
        self.node_ids.get(index).copied()
    }

    /// Node IDs in index order.
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    /// Branch names in index order.
    pub fn branch_names(&self) -> &[String] {
        &self.branch_names
    }
}
