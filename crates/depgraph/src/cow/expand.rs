use sable_scene::{Object, ObjectId, Payload, SceneBank, Tags, copy_content_inplace};

use crate::cow::eligibility::is_cow_needed;
use crate::cow::embedded::{self, Extracted};
use crate::cow::free::free_copy_content;
use crate::cow::remap::{RemapMode, rewrite_refs};
use crate::error::CowError;
use crate::graph::{DebugFlags, Depsgraph};

/// Marks `copy` as an evaluation copy of `orig`.
///
/// Recorded before references are rewritten so the rewriter recognizes the
/// tagged side and never remaps it twice.
pub fn tag_copy(copy: &mut Object, orig: &Object) {
	debug_assert!(copy.id != orig.id);
	debug_assert!(!orig.tags.contains(Tags::COPY), "original is itself a copy");
	copy.tags |= Tags::COPY;
	copy.orig_id = Some(orig.id);
}

/// Materializes the evaluation copy registered for `orig`.
///
/// The shell's storage is reused; content is mirrored from the original,
/// embedded sub-objects are reinstated as distinct duplicates, kind-specific
/// derived caches are detached from the original's identity, and every
/// outgoing reference is rewritten onto the copy graph. Expansion is
/// shallow: referenced objects gain at most an unexpanded shell
/// (`CreatePlaceholder` mode) and expand independently later.
///
/// Returns the identity evaluation should consume: the copy's, or the
/// original's own for copy-exempt kinds.
pub fn expand_entry(
	graph: &mut Depsgraph,
	bank: &SceneBank,
	orig: ObjectId,
	mode: RemapMode,
) -> Result<ObjectId, CowError> {
	let Some(orig_obj) = bank.get(orig) else {
		debug_assert!(false, "expanding an identity the bank does not know");
		return Err(CowError::UnknownOriginal { id: orig });
	};
	if !is_cow_needed(orig_obj.kind()) {
		return Ok(orig);
	}
	let Some(node) = graph.find(orig) else {
		debug_assert!(false, "expanding an identity the graph never registered");
		return Err(CowError::MissingEntry { id: orig });
	};
	// Re-expansion while the graph is still being built: the stale content
	// must go first so old and new state never mix.
	if node.expanded && mode == RemapMode::CreatePlaceholder {
		free_copy_content(graph, orig);
	}

	let mut copy = graph
		.take_copy(orig)
		.expect("copy-eligible entry lost its shell");
	if graph.debug().contains(DebugFlags::COW_EVAL) {
		tracing::debug!(
			name = %orig_obj.name,
			kind = orig_obj.kind().as_str(),
			orig = orig.get(),
			copy = copy.id.get(),
			"cow.expand"
		);
	}
	let pending = copy.recalc;

	let Extracted { view, saved } = embedded::extract(&orig_obj.payload);
	if let Err(source) = copy_content_inplace(&view, &mut copy.payload) {
		debug_assert!(false, "no way to mirror content for `{}`: {source}", orig_obj.name);
		graph.put_copy(orig, copy);
		return Err(CowError::StructuralCopy {
			name: orig_obj.name.clone(),
			source,
		});
	}
	if let Some(saved) = saved {
		embedded::restore(saved, &mut copy.payload);
	}

	tag_copy(&mut copy, orig_obj);
	refresh_derived_caches(graph, orig_obj, &mut copy);

	let remapped = rewrite_refs(graph, bank, &mut copy, mode);
	// Work requested against either side before expansion is kept.
	copy.recalc = orig_obj.recalc | pending;
	let copy_id = copy.id;

	match remapped {
		Ok(()) => {
			graph.put_copy(orig, copy);
			graph.set_expanded(orig, true);
			Ok(copy_id)
		}
		Err(err) => {
			// Half-rewritten content must not be left consumable.
			copy.payload = Payload::empty(copy.payload.kind());
			graph.put_copy(orig, copy);
			graph.set_expanded(orig, false);
			Err(err)
		}
	}
}

/// Kind-specific fixups applied to a freshly copied payload.
///
/// Derived caches are tied to the identity that produced them; a new copy
/// must never alias a cache belonging to the original or to a previous
/// copy, so they are recomputed fresh; the exception is the edit-session cache,
/// which is duplicated with its back-link re-pointed at the copy graph and
/// its derived meshes dropped.
fn refresh_derived_caches(graph: &Depsgraph, orig: &Object, copy: &mut Object) {
	match (&orig.payload, &mut copy.payload) {
		(Payload::Object(orig_data), Payload::Object(copy_data)) => {
			debug_assert!(copy_data.mesh_eval.is_none());
			copy_data.mode = orig_data.mode;
		}
		(Payload::Mesh(orig_data), Payload::Mesh(copy_data)) => {
			if let Some(edit) = &orig_data.edit_mesh {
				let mut edit = edit.clone();
				edit.owner = graph.cow_id(edit.owner).unwrap_or(edit.owner);
				edit.derived_final = None;
				edit.derived_cage = None;
				copy_data.edit_mesh = Some(edit);
			}
		}
		_ => {}
	}
}
