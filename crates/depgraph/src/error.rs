use sable_scene::{CopyError, ObjectId};

/// Failures that abort the current evaluation pass.
///
/// Nothing here is retried: either an upstream invariant was violated (a
/// reference discovered after construction finished) or the structural copy
/// itself failed. The external scheduler abandons the pass and rebuilds on
/// the next change notification.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CowError {
	/// The generic content copier could not mirror the original.
	#[error("structural copy failed for `{name}`: {source}")]
	StructuralCopy {
		name: String,
		#[source]
		source: CopyError,
	},

	/// Steady-state remap found no registry entry for a reachable original.
	#[error("no registry entry for {id:?} during steady-state remap")]
	MissingEntry { id: ObjectId },

	/// An identity does not name an object in the authoring store.
	#[error("unknown original object {id:?}")]
	UnknownOriginal { id: ObjectId },
}
