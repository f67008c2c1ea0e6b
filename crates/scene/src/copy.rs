use crate::data::Payload;
use crate::kind::Kind;

/// Structural copy failures surfaced by the generic copier.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CopyError {
	/// Source content and destination shell disagree on kind.
	#[error("kind mismatch: source is {src:?}, destination shell is {dst:?}")]
	KindMismatch { src: Kind, dst: Kind },
}

/// Copies `src` content into the pre-existing shell `dst`.
///
/// The destination's storage is reused; no new top-level allocation is made.
/// Embedded sub-object fields are owned by the caller's extraction step and
/// runtime caches are never carried over, so both come out cleared on `dst`
/// regardless of their state on `src`. `dst` is left untouched on failure.
pub fn copy_content_inplace(src: &Payload, dst: &mut Payload) -> Result<(), CopyError> {
	if src.kind() != dst.kind() {
		return Err(CopyError::KindMismatch {
			src: src.kind(),
			dst: dst.kind(),
		});
	}
	*dst = src.clone();
	match dst {
		Payload::Object(data) => {
			data.mesh_eval = None;
			data.data_is_evaluated = false;
		}
		Payload::Mesh(data) => {
			data.edit_mesh = None;
		}
		Payload::Material(data) => {
			data.compiled.clear();
		}
		Payload::World(data) => {
			data.compiled.clear();
		}
		_ => {}
	}
	Ok(())
}
