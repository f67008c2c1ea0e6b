//! Adapter reconciling value-embedded sub-objects with the reference-
//! oriented generic kernels.
//!
//! The walker and copier only model "owned by reference"; node graphs and
//! shape-key stacks are owned *by value* inside their parent's payload. The
//! special-casing is contained here: content is extracted into a scratch
//! payload with the embedded field detached before the generic copy, and a
//! distinct mirrored duplicate is reinstated on the copy afterwards. The
//! embedded sub-object never gets its own registry entry; it rides along
//! with its owner's copy.

use sable_scene::{EmbeddedPayload, Payload};

/// Scratch content view of an original with its embedded field detached.
pub(crate) struct Extracted {
	/// Clone of the original's content, embedded field cleared.
	pub view: Payload,
	/// The detached duplicate, kept for restoration onto the copy.
	pub saved: Option<EmbeddedPayload>,
}

/// Clones `original` into scratch storage and detaches the embedded field,
/// so the generic copier cannot double-copy embedded content through normal
/// reference semantics. The true original is left untouched.
pub(crate) fn extract(original: &Payload) -> Extracted {
	let mut view = original.clone();
	let saved = view.take_embedded();
	Extracted { view, saved }
}

/// Reinstates the embedded sub-object on a freshly copied payload.
///
/// `saved` came out of the scratch clone, so the copy ends up with its own
/// duplicate: mirroring the original's embedded sub-object, distinct in
/// storage from it.
pub(crate) fn restore(saved: EmbeddedPayload, copy: &mut Payload) {
	copy.put_embedded(saved);
}

/// Drops the embedded field ahead of the generic free routine.
///
/// The sub-object has no registry entry of its own; its separately
/// allocated content is released here, explicitly, rather than as a side
/// effect of freeing the owner.
pub(crate) fn discard(copy: &mut Payload) {
	drop(copy.take_embedded());
}
