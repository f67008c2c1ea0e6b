//! Copy-on-write evaluation state management.
//!
//! Evaluation never mutates authored data. Instead each registered original
//! is paired with a graph-owned copy, materialized lazily by
//! [`expand_entry`], refreshed or rebuilt by [`update_entry`], and torn
//! down to a reusable shell by [`free_copy_content`]. Reference rewriting
//! keeps the copy graph closed over itself: a copy's outgoing references
//! point at other copies, never back into authored data, except where
//! eligibility rules say the original serves as its own view.

mod eligibility;
mod embedded;
mod expand;
mod free;
mod remap;
mod update;
mod validate;

#[cfg(test)]
mod tests;

pub use eligibility::{is_cow_needed, is_remap_needed};
pub use expand::{expand_entry, tag_copy};
pub use free::free_copy_content;
pub use remap::RemapMode;
pub use update::update_entry;
pub use validate::validate_copy;

use sable_scene::{ObjectId, SceneBank};

use crate::error::CowError;
use crate::graph::Depsgraph;

/// True when `copy_id` names a materialized (expanded) evaluation copy.
pub fn is_expanded(graph: &Depsgraph, copy_id: ObjectId) -> bool {
	graph
		.entry_for_copy(copy_id)
		.is_some_and(|entry| entry.expanded)
}

/// Scheduler-facing hook: called exactly once per object per evaluation
/// pass, in dependency order.
///
/// The graph's own scene entry is kept current by evaluation-context setup
/// and skipped here; everything else goes through the update engine.
pub fn evaluate_entry(graph: &mut Depsgraph, bank: &SceneBank, orig: ObjectId) -> Result<ObjectId, CowError> {
	if graph.scene() == Some(orig) {
		return Ok(graph.cow_id(orig).unwrap_or(orig));
	}
	update_entry(graph, bank, orig)
}
