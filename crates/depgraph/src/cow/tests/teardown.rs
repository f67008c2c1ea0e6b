//! Teardown engine and validator behavior.

use pretty_assertions::assert_eq;
use sable_scene::{Kind, Payload};

use super::helpers::{construct, copy_id, fixture};
use crate::cow::expand::expand_entry;
use crate::cow::free::free_copy_content;
use crate::cow::remap::RemapMode;
use crate::cow::{is_expanded, validate_copy};

#[test]
fn free_keeps_the_shell_and_its_identity() {
	let mut fx = fixture();
	let _ids = [fx.material];
	construct(&mut fx, &_ids);
	let id_before = copy_id(&fx, fx.material);

	free_copy_content(&mut fx.graph, fx.material);

	let node = fx.graph.find(fx.material).unwrap();
	assert!(!node.expanded);
	assert_eq!(node.eval_id(), id_before);
	assert_eq!(
		fx.graph.copy_object(fx.material).unwrap().payload,
		Payload::empty(Kind::Material),
	);

	// Freeing a shell is a no-op.
	free_copy_content(&mut fx.graph, fx.material);
	assert!(!fx.graph.find(fx.material).unwrap().expanded);
}

#[test]
fn free_detaches_derived_links_first() {
	let mut fx = fixture();
	let _ids = [fx.object];
	construct(&mut fx, &_ids);

	free_copy_content(&mut fx.graph, fx.object);

	let Payload::Object(data) = &fx.graph.copy_object(fx.object).unwrap().payload else {
		panic!("copy changed kind");
	};
	assert_eq!(data.data, None);
	assert!(!data.data_is_evaluated);
	assert!(data.mesh_eval.is_none());
}

#[test]
fn scene_teardown_never_chases_members() {
	let mut fx = fixture();
	let _ids = [fx.scene, fx.object];
	construct(&mut fx, &_ids);

	free_copy_content(&mut fx.graph, fx.scene);

	let node = fx.graph.find(fx.scene).unwrap();
	assert!(!node.expanded);
	let Payload::Scene(data) = &node.copy.as_ref().unwrap().payload else {
		panic!("copy changed kind");
	};
	assert!(data.objects.is_empty());
	// Member entries were not touched by the scene's teardown.
	assert!(fx.graph.find(fx.object).unwrap().expanded);
}

#[test]
fn validation_requires_expanded_reachables() {
	let mut fx = fixture();
	let _ids = [fx.object];
	construct(&mut fx, &_ids);
	let ob_copy = copy_id(&fx, fx.object);

	// The object's references still point at unexpanded shells.
	assert!(!validate_copy(&fx.graph, ob_copy));

	expand_entry(&mut fx.graph, &fx.bank, fx.mesh, RemapMode::CreatePlaceholder).unwrap();
	assert!(!validate_copy(&fx.graph, ob_copy));

	expand_entry(&mut fx.graph, &fx.bank, fx.material, RemapMode::CreatePlaceholder).unwrap();
	// One level only: the material's own texture shell does not fail the
	// object, but fails the material.
	assert!(validate_copy(&fx.graph, ob_copy));
	assert!(!validate_copy(&fx.graph, copy_id(&fx, fx.material)));

	expand_entry(&mut fx.graph, &fx.bank, fx.texture, RemapMode::CreatePlaceholder).unwrap();
	assert!(validate_copy(&fx.graph, copy_id(&fx, fx.material)));
}

#[test]
fn validation_treats_original_targets_as_terminal() {
	let mut fx = fixture();
	let stray = fx.bank.add("ob.stray", Payload::Object(Default::default()));
	let lonely = fx.bank.add(
		"sc.lonely",
		Payload::Scene(sable_scene::data::SceneData {
			objects: vec![stray],
			..Default::default()
		}),
	);
	fx.graph.ensure(&fx.bank, lonely).unwrap();
	expand_entry(&mut fx.graph, &fx.bank, lonely, RemapMode::CreatePlaceholder).unwrap();

	// The stray element stayed on its original; that is not a validation
	// failure, mutation through the reference is forbidden instead.
	assert!(validate_copy(&fx.graph, copy_id(&fx, lonely)));
}

#[test]
fn expansion_state_is_queryable_by_copy_identity() {
	let mut fx = fixture();
	let _ids = [fx.object];
	construct(&mut fx, &_ids);

	assert!(is_expanded(&fx.graph, copy_id(&fx, fx.object)));
	assert!(!is_expanded(&fx.graph, copy_id(&fx, fx.mesh)));

	free_copy_content(&mut fx.graph, fx.object);
	assert!(!is_expanded(&fx.graph, copy_id(&fx, fx.object)));
}
