//! Dependency-graph evaluation cache.
//!
//! A scene's dependency graph maintains a second, structurally isomorphic
//! graph of evaluation copies keyed to the authored originals. Copies are
//! materialized lazily, exactly once each, with their internal references
//! rewritten to stay inside the copy graph; expensive derived sub-state is
//! preserved across rebuilds instead of being invalidated wholesale.
//!
//! Concurrency is owned by the external task scheduler: at most one task
//! touches a given entry at a time, enforced by dependency edges rather
//! than locks, and entry creation is confined to the single-threaded
//! construction phase. This crate therefore contains no synchronization;
//! exclusive access is expressed through `&mut Depsgraph` at the API
//! boundary.

pub mod cow;
pub mod error;
pub mod graph;

pub use cow::{
	RemapMode, evaluate_entry, expand_entry, free_copy_content, is_cow_needed, is_expanded,
	is_remap_needed, tag_copy, update_entry, validate_copy,
};
pub use error::CowError;
pub use graph::{DebugFlags, Depsgraph, IdNode};
