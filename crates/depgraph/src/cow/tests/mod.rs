//! Tests for copy-on-write expansion, update and teardown.

mod helpers;
mod teardown;
mod update;
