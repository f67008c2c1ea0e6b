//! Generic outgoing-reference walker.
//!
//! Enumerates every field of a payload that references another object, each
//! as a read/write slot so callers can overwrite the reference in place.
//! Embedded owned sub-objects are not independently addressable, so their
//! internal references are surfaced as the owner's own.

use crate::data::{NodeTreeData, Payload};
use crate::id::ObjectId;

/// Continuation status returned by a reference visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkControl {
	/// Keep visiting the remaining slots.
	Continue,
	/// Abandon the walk.
	Stop,
}

/// Calls `visitor` with every outgoing reference slot of `payload`.
///
/// Runtime caches (`edit_mesh`, `mesh_eval`) are not walked; their links are
/// maintained explicitly by the evaluation layer. Returns early when the
/// visitor answers [`WalkControl::Stop`].
pub fn visit_refs(payload: &mut Payload, visitor: &mut dyn FnMut(&mut Option<ObjectId>) -> WalkControl) {
	match payload {
		Payload::Scene(data) => {
			if visit_slot(&mut data.camera, visitor) == WalkControl::Stop {
				return;
			}
			if visit_slot(&mut data.world, visitor) == WalkControl::Stop {
				return;
			}
			if visit_slot(&mut data.active_brush, visitor) == WalkControl::Stop {
				return;
			}
			if visit_collection(&mut data.objects, visitor) == WalkControl::Stop {
				return;
			}
			if let Some(tree) = data.node_tree.as_deref_mut() {
				visit_tree(tree, visitor);
			}
		}
		Payload::Object(data) => {
			if visit_slot(&mut data.data, visitor) == WalkControl::Stop {
				return;
			}
			if visit_slot(&mut data.parent, visitor) == WalkControl::Stop {
				return;
			}
			visit_list(&mut data.materials, visitor);
		}
		Payload::Mesh(data) => {
			visit_list(&mut data.materials, visitor);
		}
		Payload::Curve(data) => {
			if visit_slot(&mut data.bevel_object, visitor) == WalkControl::Stop {
				return;
			}
			if visit_slot(&mut data.taper_object, visitor) == WalkControl::Stop {
				return;
			}
			visit_list(&mut data.materials, visitor);
		}
		Payload::Lattice(_) | Payload::ShapeKey(_) | Payload::Palette(_) | Payload::Image(_) => {}
		Payload::Light(data) => {
			if let Some(tree) = data.node_tree.as_deref_mut() {
				visit_tree(tree, visitor);
			}
		}
		Payload::World(data) => {
			if let Some(tree) = data.node_tree.as_deref_mut() {
				visit_tree(tree, visitor);
			}
		}
		Payload::Material(data) => {
			if let Some(tree) = data.node_tree.as_deref_mut() {
				visit_tree(tree, visitor);
			}
		}
		Payload::Texture(data) => {
			if visit_slot(&mut data.image, visitor) == WalkControl::Stop {
				return;
			}
			if let Some(tree) = data.node_tree.as_deref_mut() {
				visit_tree(tree, visitor);
			}
		}
		Payload::NodeTree(data) => {
			visit_tree(data, visitor);
		}
		Payload::LineStyle(data) => {
			if let Some(tree) = data.node_tree.as_deref_mut() {
				visit_tree(tree, visitor);
			}
		}
		Payload::Brush(data) => {
			visit_slot(&mut data.texture, visitor);
		}
	}
}

/// Collects every non-null outgoing reference without mutating the payload.
pub fn collect_refs(payload: &Payload) -> Vec<ObjectId> {
	// The walker hands out write slots; a scratch clone keeps this read-only.
	let mut scratch = payload.clone();
	let mut refs = Vec::new();
	visit_refs(&mut scratch, &mut |slot| {
		if let Some(target) = *slot {
			refs.push(target);
		}
		WalkControl::Continue
	});
	refs
}

fn visit_slot(slot: &mut Option<ObjectId>, visitor: &mut dyn FnMut(&mut Option<ObjectId>) -> WalkControl) -> WalkControl {
	visitor(slot)
}

fn visit_list(list: &mut [Option<ObjectId>], visitor: &mut dyn FnMut(&mut Option<ObjectId>) -> WalkControl) -> WalkControl {
	for slot in list {
		if visitor(slot) == WalkControl::Stop {
			return WalkControl::Stop;
		}
	}
	WalkControl::Continue
}

/// Collection entries cannot be detached; a visitor clearing one is ignored.
fn visit_collection(list: &mut [ObjectId], visitor: &mut dyn FnMut(&mut Option<ObjectId>) -> WalkControl) -> WalkControl {
	for entry in list {
		let mut slot = Some(*entry);
		let control = visitor(&mut slot);
		if let Some(id) = slot {
			*entry = id;
		}
		if control == WalkControl::Stop {
			return WalkControl::Stop;
		}
	}
	WalkControl::Continue
}

fn visit_tree(tree: &mut NodeTreeData, visitor: &mut dyn FnMut(&mut Option<ObjectId>) -> WalkControl) -> WalkControl {
	for node in &mut tree.nodes {
		if visitor(&mut node.source) == WalkControl::Stop {
			return WalkControl::Stop;
		}
	}
	WalkControl::Continue
}
