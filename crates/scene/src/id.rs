use std::fmt;
use std::num::NonZeroU64;

use crate::data::Payload;
use crate::kind::Kind;

/// Stable identity of an object within one authoring session.
///
/// Identities are allocated by [`SceneBank`](crate::bank::SceneBank) and are
/// never reused; an evaluation copy always carries a different identity from
/// the original it mirrors.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(NonZeroU64);

impl ObjectId {
	/// Wraps a raw identity value; zero is reserved.
	pub fn new(raw: u64) -> Option<ObjectId> {
		NonZeroU64::new(raw).map(ObjectId)
	}

	/// Raw identity value.
	pub fn get(self) -> u64 {
		self.0.get()
	}
}

impl fmt::Debug for ObjectId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "ObjectId({})", self.0)
	}
}

bitflags::bitflags! {
	/// Pending-recalculation flags requested against an object.
	///
	/// Flags accumulate on the original between evaluation passes and are
	/// merged onto the copy when it is (re)expanded, so work requested
	/// before expansion is not lost.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
	pub struct RecalcFlags: u32 {
		/// Transform channels changed.
		const TRANSFORM = 1 << 0;
		/// Geometry content changed.
		const GEOMETRY = 1 << 1;
		/// Animation-driven values changed.
		const ANIMATION = 1 << 2;
		/// Viewport display state changed.
		const DRAW = 1 << 3;
		/// Shading setup changed.
		const SHADING = 1 << 4;
		/// Evaluation-copy bookkeeping changed.
		const COPY_ON_WRITE = 1 << 5;
		/// Simulation point caches changed.
		const POINT_CACHE = 1 << 6;
	}
}

bitflags::bitflags! {
	/// Lifetime tags stamped on an object.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
	pub struct Tags: u32 {
		/// This object is an evaluation copy owned by a dependency graph.
		const COPY = 1 << 0;
	}
}

/// One authored or evaluated object.
#[derive(Debug, Clone, PartialEq)]
pub struct Object {
	/// Stable identity.
	pub id: ObjectId,
	/// Human-readable name; copies keep the original's name.
	pub name: String,
	/// Kind-dependent content.
	pub payload: Payload,
	/// Pending-recalculation flags.
	pub recalc: RecalcFlags,
	/// Lifetime tags.
	pub tags: Tags,
	/// Back-link to the original when this object is an evaluation copy.
	pub orig_id: Option<ObjectId>,
}

impl Object {
	/// Creates an object with default flags.
	pub fn new(id: ObjectId, name: impl Into<String>, payload: Payload) -> Object {
		Object {
			id,
			name: name.into(),
			payload,
			recalc: RecalcFlags::empty(),
			tags: Tags::empty(),
			orig_id: None,
		}
	}

	/// Kind of this object, derived from its payload.
	pub fn kind(&self) -> Kind {
		self.payload.kind()
	}
}
