use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;

use crate::data::Payload;
use crate::id::{Object, ObjectId};

/// Authoring-side store owning every original object.
///
/// The evaluation layer reads originals from here and never mutates them;
/// all edits come from the interaction layer that owns the bank. Identity
/// allocation goes through the bank so evaluation copies can draw fresh ids
/// from the same namespace without colliding with authored objects.
#[derive(Debug, Default)]
pub struct SceneBank {
	objects: FxHashMap<ObjectId, Object>,
	next_id: AtomicU64,
}

impl SceneBank {
	/// Creates an empty bank.
	pub fn new() -> SceneBank {
		SceneBank::default()
	}

	/// Allocates a fresh identity; usable from shared references.
	pub fn allocate_id(&self) -> ObjectId {
		let raw = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
		ObjectId::new(raw).expect("identity counter overflowed")
	}

	/// Creates and stores an object, returning its identity.
	pub fn add(&mut self, name: impl Into<String>, payload: Payload) -> ObjectId {
		let id = self.allocate_id();
		self.objects.insert(id, Object::new(id, name, payload));
		id
	}

	/// Looks an object up by identity.
	pub fn get(&self, id: ObjectId) -> Option<&Object> {
		self.objects.get(&id)
	}

	/// Mutable lookup for the authoring layer.
	pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut Object> {
		self.objects.get_mut(&id)
	}

	/// True when `id` names a stored object.
	pub fn contains(&self, id: ObjectId) -> bool {
		self.objects.contains_key(&id)
	}

	/// Number of stored objects.
	pub fn len(&self) -> usize {
		self.objects.len()
	}

	/// True when the bank holds no objects.
	pub fn is_empty(&self) -> bool {
		self.objects.is_empty()
	}

	/// Iterates stored objects in arbitrary order.
	pub fn iter(&self) -> impl Iterator<Item = &Object> {
		self.objects.values()
	}
}
