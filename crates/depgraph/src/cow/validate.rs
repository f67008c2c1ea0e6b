use sable_scene::{ObjectId, collect_refs};

use crate::graph::Depsgraph;

/// Debug diagnostic: true when every evaluation copy reachable from
/// `copy_id`'s outgoing references is itself expanded.
///
/// Read-only; never mutates the graph or any copy. References that resolve
/// to no registered copy (exempt kinds, unlinked collection members left on
/// their originals) are terminal and do not fail validation.
pub fn validate_copy(graph: &Depsgraph, copy_id: ObjectId) -> bool {
	let Some(node) = graph.entry_for_copy(copy_id) else {
		return false;
	};
	let Some(copy) = node.copy.as_ref() else {
		return false;
	};
	collect_refs(&copy.payload).into_iter().all(|target| {
		graph
			.entry_for_copy(target)
			.is_none_or(|entry| entry.expanded)
	})
}
