//! Topology preconditions checked before index allocation.

use nd_core::NodeId;

use crate::error::{GraphError, GraphResult};
use crate::registry::NodeRegistry;

/// Find the single reference node.
///
/// Fails when there is none or when more than one node claims the role.
pub(crate) fn find_reference(nodes: &NodeRegistry) -> GraphResult<NodeId> {
    let mut refs = nodes.iter().filter(|(_, n)| n.is_reference());
    let (id, first) = refs.next().ok_or(GraphError::NoReference)?;
    if let Some((_, second)) = refs.next() {
        return Err(GraphError::MultipleReferences {
            first: first.name().to_owned(),
            second: second.name().to_owned(),
        });
    }
    Ok(id)
}
