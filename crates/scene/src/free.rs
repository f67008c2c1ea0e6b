use crate::data::{Payload, SceneData};

/// Releases a payload's independently allocated sub-content, leaving the
/// kind's shell state behind.
pub fn free_content(payload: &mut Payload) {
	*payload = Payload::empty(payload.kind());
}

/// Scene teardown routine.
///
/// Guaranteed not to resolve or touch any other object: collection entries
/// are dropped as bare identities, which matters when scenes sit inside
/// reference cycles being torn down in arbitrary order.
pub fn free_scene_content(data: &mut SceneData) {
	*data = SceneData::default();
}
