use rustc_hash::FxHashMap;
use sable_scene::{Object, ObjectId, Payload, SceneBank};

use crate::cow::is_cow_needed;

bitflags::bitflags! {
	/// Debug switches carried by one graph instance.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
	pub struct DebugFlags: u32 {
		/// Emit a debug-level event for every expand/remap/free step.
		const COW_EVAL = 1 << 0;
	}
}

/// One registry entry pairing an original object with its evaluation copy.
#[derive(Debug)]
pub struct IdNode {
	/// Original object's identity; also the entry key.
	pub orig: ObjectId,
	/// Evaluation copy owned by the graph. `None` for copy-exempt kinds,
	/// where the original itself stands in for the copy.
	pub copy: Option<Object>,
	/// False while the copy is still an unexpanded shell.
	pub expanded: bool,
}

impl IdNode {
	/// Identity evaluation consumers should read for this entry.
	pub fn eval_id(&self) -> ObjectId {
		self.copy.as_ref().map_or(self.orig, |copy| copy.id)
	}
}

/// Evaluation cache for one scene: owns every evaluation copy.
///
/// Entries are keyed by original identity. The graph never mutates the
/// authoring store; copies are materialized lazily by the expansion engine
/// and torn down without losing their registry entry. Entry creation only
/// happens during single-threaded graph construction; steady-state
/// evaluation looks entries up and relies on the external scheduler for
/// per-entry exclusivity.
#[derive(Debug, Default)]
pub struct Depsgraph {
	/// Scene this graph evaluates; its copy is maintained by context setup.
	scene: Option<ObjectId>,
	entries: FxHashMap<ObjectId, IdNode>,
	/// Reverse index: copy identity to original identity.
	copy_index: FxHashMap<ObjectId, ObjectId>,
	debug: DebugFlags,
}

impl Depsgraph {
	/// Creates an empty graph.
	pub fn new() -> Depsgraph {
		Depsgraph::default()
	}

	/// Creates an empty graph with the given debug switches.
	pub fn with_debug(debug: DebugFlags) -> Depsgraph {
		Depsgraph {
			debug,
			..Depsgraph::default()
		}
	}

	/// Active debug switches.
	pub fn debug(&self) -> DebugFlags {
		self.debug
	}

	/// Declares which original is the scene this graph evaluates.
	pub fn set_scene(&mut self, scene: ObjectId) {
		self.scene = Some(scene);
	}

	/// The scene original, when declared.
	pub fn scene(&self) -> Option<ObjectId> {
		self.scene
	}

	/// Looks up the entry registered for an original identity.
	pub fn find(&self, orig: ObjectId) -> Option<&IdNode> {
		self.entries.get(&orig)
	}

	/// Mutable entry lookup.
	pub fn find_mut(&mut self, orig: ObjectId) -> Option<&mut IdNode> {
		self.entries.get_mut(&orig)
	}

	/// Looks up the entry that owns a given evaluation copy.
	pub fn entry_for_copy(&self, copy: ObjectId) -> Option<&IdNode> {
		let orig = self.copy_index.get(&copy)?;
		self.entries.get(orig)
	}

	/// Maps an original identity to the identity evaluation should consume.
	pub fn cow_id(&self, orig: ObjectId) -> Option<ObjectId> {
		self.find(orig).map(IdNode::eval_id)
	}

	/// Borrows the evaluation copy registered for `orig`, if materialized
	/// as a distinct object.
	pub fn copy_object(&self, orig: ObjectId) -> Option<&Object> {
		self.find(orig)?.copy.as_ref()
	}

	/// Looks up the entry for `orig`, creating an unexpanded shell if
	/// missing. Returns `None` when `orig` names nothing in the bank.
	///
	/// Only graph construction calls this; by the time parallel evaluation
	/// starts, every reachable original already has an entry.
	pub fn ensure(&mut self, bank: &SceneBank, orig: ObjectId) -> Option<&mut IdNode> {
		if !self.entries.contains_key(&orig) {
			let original = bank.get(orig)?;
			let copy = if is_cow_needed(original.kind()) {
				let mut shell = Object::new(
					bank.allocate_id(),
					original.name.clone(),
					Payload::empty(original.kind()),
				);
				shell.orig_id = Some(orig);
				self.copy_index.insert(shell.id, orig);
				tracing::trace!(name = %original.name, kind = original.kind().as_str(), "cow.shell");
				Some(shell)
			} else {
				None
			};
			self.entries.insert(orig, IdNode { orig, copy, expanded: false });
		}
		self.entries.get_mut(&orig)
	}

	/// Number of registered entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// True when no entry has been registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates entries in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = &IdNode> {
		self.entries.values()
	}

	/// Detaches an entry's copy so an engine can rework it while the
	/// registry stays borrowable. Must be paired with [`put_copy`].
	///
	/// [`put_copy`]: Depsgraph::put_copy
	pub(crate) fn take_copy(&mut self, orig: ObjectId) -> Option<Object> {
		self.entries.get_mut(&orig)?.copy.take()
	}

	/// Reattaches a copy detached by [`take_copy`](Depsgraph::take_copy).
	pub(crate) fn put_copy(&mut self, orig: ObjectId, copy: Object) {
		if let Some(node) = self.entries.get_mut(&orig) {
			debug_assert!(node.copy.is_none(), "entry already holds a copy");
			self.copy_index.insert(copy.id, orig);
			node.copy = Some(copy);
		}
	}

	/// Flips an entry's expansion state.
	pub(crate) fn set_expanded(&mut self, orig: ObjectId, expanded: bool) {
		if let Some(node) = self.entries.get_mut(&orig) {
			node.expanded = expanded;
		}
	}
}
