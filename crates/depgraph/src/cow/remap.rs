use sable_scene::{Kind, Object, ObjectId, SceneBank, WalkControl, visit_refs};

use crate::cow::eligibility::is_remap_needed;
use crate::error::CowError;
use crate::graph::{DebugFlags, Depsgraph};

/// How the rewriter resolves references that have no registry entry yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemapMode {
	/// Steady state: every reachable original is already registered, and a
	/// miss is a construction bug.
	Lookup,
	/// Graph construction: create unexpanded shells on demand.
	CreatePlaceholder,
}

/// Rewrites every outgoing reference of `owner` from an original identity
/// to the corresponding evaluation copy.
///
/// Only the immediate references move; referenced objects expand lazily on
/// their own. References that already name a copy are left alone, as are
/// references to kinds exempt from remapping. One carve-out: a scene's
/// collection may list objects never linked to any view, and forcing
/// placeholders for those would eagerly grow the graph without bound, so
/// unregistered scene-to-object references stay on the original.
pub(crate) fn rewrite_refs(
	graph: &mut Depsgraph,
	bank: &SceneBank,
	owner: &mut Object,
	mode: RemapMode,
) -> Result<(), CowError> {
	let owner_kind = owner.kind();
	let verbose = graph.debug().contains(DebugFlags::COW_EVAL);
	let mut failed: Option<ObjectId> = None;

	visit_refs(&mut owner.payload, &mut |slot| {
		let Some(target) = *slot else {
			return WalkControl::Continue;
		};
		// Already remapped onto a copy, including the owner's own entry.
		if graph.entry_for_copy(target).is_some() {
			return WalkControl::Continue;
		}
		let Some(target_obj) = bank.get(target) else {
			// Not an original and not a copy: nothing to rewrite.
			return WalkControl::Continue;
		};
		if !is_remap_needed(target_obj.kind()) {
			return WalkControl::Continue;
		}

		let mapped = match mode {
			RemapMode::CreatePlaceholder => {
				if owner_kind == Kind::Scene && target_obj.kind() == Kind::Object {
					match graph.find(target) {
						Some(node) => node.eval_id(),
						// Unlinked collection member: stays on the original.
						None => target,
					}
				} else {
					match graph.ensure(bank, target) {
						Some(node) => node.eval_id(),
						None => target,
					}
				}
			}
			RemapMode::Lookup => match graph.cow_id(target) {
				Some(copy_id) => copy_id,
				None => {
					failed = Some(target);
					return WalkControl::Stop;
				}
			},
		};
		if verbose && mapped != target {
			tracing::debug!(
				target_name = %target_obj.name,
				orig = target.get(),
				copy = mapped.get(),
				"cow.remap"
			);
		}
		*slot = Some(mapped);
		WalkControl::Continue
	});

	match failed {
		Some(id) => Err(CowError::MissingEntry { id }),
		None => Ok(()),
	}
}
