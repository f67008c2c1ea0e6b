use std::mem;

use sable_scene::data::{BaseFlags, EditMesh, EvaluatedMesh, GpuMaterial, PropertyBag};
use sable_scene::{Object, ObjectId, Payload, RecalcFlags, SceneBank, copy_animated_values};

use crate::cow::eligibility::is_cow_needed;
use crate::cow::expand::expand_entry;
use crate::cow::free::free_copy_content;
use crate::cow::remap::{RemapMode, rewrite_refs};
use crate::error::CowError;
use crate::graph::{DebugFlags, Depsgraph};

/// Pending flags a node graph can absorb without a structural rebuild.
const TREE_REFRESH_FLAGS: RecalcFlags = RecalcFlags::DRAW
	.union(RecalcFlags::ANIMATION)
	.union(RecalcFlags::COPY_ON_WRITE);

/// Sub-state detached from an object copy before its rebuild.
struct SavedObjectState {
	mesh_eval: Option<Box<EvaluatedMesh>>,
	/// Whether the evaluated geometry was standing in as the data payload.
	eval_was_active: bool,
	base_flag: BaseFlags,
	base_properties: Option<Box<PropertyBag>>,
}

/// Brings the evaluation copy registered for `orig` up to date with the
/// original.
///
/// Unexpanded entries delegate to the expansion engine. Expanded ones are
/// rebuilt, freed and then re-expanded, except for a short list of sub-state
/// that is expensive to recompute and safe to transplant: compiled shader
/// caches on materials and worlds, and an object's evaluated geometry plus
/// its view-membership state. Node graphs whose pending flags carry no
/// structural change skip the rebuild entirely and only refresh animated
/// values, preserving socket storage the draw code holds handles into.
pub fn update_entry(graph: &mut Depsgraph, bank: &SceneBank, orig: ObjectId) -> Result<ObjectId, CowError> {
	let Some(orig_obj) = bank.get(orig) else {
		debug_assert!(false, "updating an identity the bank does not know");
		return Err(CowError::UnknownOriginal { id: orig });
	};
	if !is_cow_needed(orig_obj.kind()) {
		return Ok(orig);
	}
	let Some(node) = graph.find(orig) else {
		debug_assert!(false, "updating an identity the graph never registered");
		return Err(CowError::MissingEntry { id: orig });
	};
	if !node.expanded {
		return expand_entry(graph, bank, orig, RemapMode::Lookup);
	}
	if graph.debug().contains(DebugFlags::COW_EVAL) {
		tracing::debug!(name = %orig_obj.name, orig = orig.get(), "cow.update");
	}

	let mut saved_materials: Option<Vec<GpuMaterial>> = None;
	let mut saved_object: Option<SavedObjectState> = None;
	{
		let node = graph.find_mut(orig).expect("entry vanished mid-update");
		let copy = node.copy.as_mut().expect("copy-eligible entry lost its shell");
		match &mut copy.payload {
			Payload::NodeTree(_) => {
				if copy.recalc.difference(TREE_REFRESH_FLAGS).is_empty() {
					return refresh_animated(graph, bank, orig_obj);
				}
			}
			// Compiled shaders are shared with the draw code and expensive
			// to rebuild; they survive the copy cycle by being detached
			// before the free and transplanted afterwards.
			Payload::Material(data) => saved_materials = Some(mem::take(&mut data.compiled)),
			Payload::World(data) => saved_materials = Some(mem::take(&mut data.compiled)),
			Payload::Object(data) => {
				saved_object = Some(SavedObjectState {
					mesh_eval: data.mesh_eval.take(),
					eval_was_active: data.data_is_evaluated,
					base_flag: data.base_flag,
					base_properties: data.base_properties.take(),
				});
				// The data link must not look evaluated while the copy is
				// torn down and rebuilt from the original.
				data.data_is_evaluated = false;
			}
			_ => {}
		}
	}

	free_copy_content(graph, orig);
	expand_entry(graph, bank, orig, RemapMode::Lookup)?;

	let (relink_active, edit_mirror) = evaluated_mesh_relink(graph, bank, saved_object.as_ref());

	let node = graph.find_mut(orig).expect("entry vanished mid-update");
	let copy = node.copy.as_mut().expect("copy-eligible entry lost its shell");
	let copy_id = copy.id;
	match &mut copy.payload {
		Payload::Material(data) => {
			if let Some(list) = saved_materials {
				data.compiled = list;
			}
		}
		Payload::World(data) => {
			if let Some(list) = saved_materials {
				data.compiled = list;
			}
		}
		Payload::Object(data) => {
			if let Some(saved) = saved_object {
				if let Some(mut eval) = saved.mesh_eval {
					// The geometry outlives the rebuild; its back-link must
					// name the live copy, never the torn-down one.
					eval.owner = copy_id;
					if relink_active {
						data.data_is_evaluated = true;
						eval.edit_mesh = edit_mirror;
					}
					data.mesh_eval = Some(eval);
				}
				if let Some(props) = saved.base_properties {
					data.base_properties = Some(props);
					data.base_flag = saved.base_flag;
				}
			}
		}
		_ => {}
	}
	Ok(copy_id)
}

/// Decides whether preserved evaluated geometry goes back to being the
/// active data payload, and mirrors the edit-session cache from its source
/// mesh so no dead link survives the rebuild.
fn evaluated_mesh_relink(
	graph: &Depsgraph,
	bank: &SceneBank,
	saved: Option<&SavedObjectState>,
) -> (bool, Option<Box<EditMesh>>) {
	let Some(saved) = saved else {
		return (false, None);
	};
	if !saved.eval_was_active {
		return (false, None);
	}
	let Some(source) = saved.mesh_eval.as_ref().and_then(|eval| bank.get(eval.source)) else {
		return (false, None);
	};
	let Payload::Mesh(mesh) = &source.payload else {
		return (false, None);
	};
	let mirror = mesh.edit_mesh.clone().map(|mut edit| {
		edit.owner = graph.cow_id(edit.owner).unwrap_or(edit.owner);
		edit
	});
	(true, mirror)
}

/// Narrow refresh for node graphs with no structural change pending:
/// animated socket values move over and references are re-verified, while
/// the free/re-expand cycle is skipped entirely.
fn refresh_animated(graph: &mut Depsgraph, bank: &SceneBank, orig_obj: &Object) -> Result<ObjectId, CowError> {
	if graph.debug().contains(DebugFlags::COW_EVAL) {
		tracing::debug!(name = %orig_obj.name, orig = orig_obj.id.get(), "cow.refresh");
	}
	let mut copy = graph
		.take_copy(orig_obj.id)
		.expect("copy-eligible entry lost its shell");
	copy_animated_values(&orig_obj.payload, &mut copy.payload);
	let remapped = rewrite_refs(graph, bank, &mut copy, RemapMode::Lookup);
	let copy_id = copy.id;
	graph.put_copy(orig_obj.id, copy);
	remapped.map(|()| copy_id)
}
