//! Scene object model and the generic kernels evaluation builds on.
//!
//! Everything here is evaluation-agnostic: the closed [`Kind`] set, the
//! per-kind [`Payload`] content, identity and flag types, the authoring-side
//! [`SceneBank`], and the generic routines that operate uniformly over any
//! payload: reference walking, in-place structural copy, content freeing
//! and animated-value transplant. The dependency-graph crate composes these
//! into its copy-on-write machinery.

pub mod anim;
pub mod bank;
pub mod copy;
pub mod data;
pub mod free;
pub mod id;
pub mod kind;
pub mod walk;

pub use anim::copy_animated_values;
pub use bank::SceneBank;
pub use copy::{CopyError, copy_content_inplace};
pub use data::{EmbeddedPayload, Payload};
pub use free::{free_content, free_scene_content};
pub use id::{Object, ObjectId, RecalcFlags, Tags};
pub use kind::Kind;
pub use walk::{WalkControl, collect_refs, visit_refs};
