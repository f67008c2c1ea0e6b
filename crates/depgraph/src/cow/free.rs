use sable_scene::{ObjectId, Payload, free_content, free_scene_content};

use crate::cow::embedded;
use crate::graph::{DebugFlags, Depsgraph};

/// Releases the materialized content of `orig`'s evaluation copy, keeping
/// the registry entry and its shell intact.
///
/// A no-op on shells and on copy-exempt entries. Pending-recalculation
/// flags survive teardown so a later re-expansion still sees them.
pub fn free_copy_content(graph: &mut Depsgraph, orig: ObjectId) {
	let verbose = graph.debug().contains(DebugFlags::COW_EVAL);
	let Some(node) = graph.find_mut(orig) else {
		return;
	};
	if !node.expanded {
		return;
	}
	let Some(copy) = node.copy.as_mut() else {
		return;
	};
	if verbose {
		tracing::debug!(name = %copy.name, copy = copy.id.get(), "cow.free");
	}

	// The embedded sub-object has no registry entry; release it explicitly
	// so the generic free never chases it.
	embedded::discard(&mut copy.payload);

	match &mut copy.payload {
		Payload::Object(data) => {
			// Freeing derived caches must not reach through the data link.
			data.data = None;
			data.data_is_evaluated = false;
			data.mesh_eval = None;
		}
		Payload::Mesh(data) => {
			if let Some(edit) = data.edit_mesh.as_mut() {
				edit.derived_final = None;
				edit.derived_cage = None;
			}
			data.edit_mesh = None;
		}
		Payload::Scene(data) => {
			// Scenes can sit inside reference cycles; the dedicated routine
			// is guaranteed not to dereference any other object's copy.
			free_scene_content(data);
			node.expanded = false;
			return;
		}
		_ => {}
	}

	free_content(&mut copy.payload);
	node.expanded = false;
}
