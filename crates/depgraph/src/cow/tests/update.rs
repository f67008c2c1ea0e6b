//! Update engine behavior: rebuilds, transplants and the narrow refresh.

use pretty_assertions::assert_eq;
use sable_scene::data::{BaseFlags, EditMesh, EvaluatedMesh, GpuMaterial, PropertyBag};
use sable_scene::{Payload, RecalcFlags};

use super::helpers::{construct, copy_id, fixture, sampling_tree};
use crate::cow::update::update_entry;
use crate::graph::Depsgraph;

#[test]
fn exempt_kind_updates_to_the_original() {
	let mut fx = fixture();
	fx.graph.ensure(&fx.bank, fx.image).unwrap();
	assert_eq!(update_entry(&mut fx.graph, &fx.bank, fx.image).unwrap(), fx.image);
}

#[test]
fn unexpanded_entry_delegates_to_expansion() {
	let mut fx = fixture();
	let _ids = [fx.object];
	construct(&mut fx, &_ids);
	assert!(!fx.graph.find(fx.mesh).unwrap().expanded);

	let result = update_entry(&mut fx.graph, &fx.bank, fx.mesh).unwrap();
	assert_eq!(result, copy_id(&fx, fx.mesh));
	assert!(fx.graph.find(fx.mesh).unwrap().expanded);
}

#[test]
fn compiled_shaders_survive_the_rebuild() {
	let mut fx = fixture();
	let _ids = [fx.material];
	construct(&mut fx, &_ids);

	let list_ptr = {
		let copy = fx.graph.find_mut(fx.material).unwrap().copy.as_mut().unwrap();
		let Payload::Material(data) = &mut copy.payload else {
			panic!("copy changed kind");
		};
		data.compiled = vec![GpuMaterial { shader: 7 }, GpuMaterial { shader: 9 }];
		copy.recalc |= RecalcFlags::GEOMETRY;
		match &copy.payload {
			Payload::Material(data) => data.compiled.as_ptr(),
			_ => unreachable!(),
		}
	};

	update_entry(&mut fx.graph, &fx.bank, fx.material).unwrap();

	let Payload::Material(data) = &fx.graph.copy_object(fx.material).unwrap().payload else {
		panic!("copy changed kind");
	};
	// The very same list storage, not a rebuilt equal one.
	assert!(std::ptr::eq(data.compiled.as_ptr(), list_ptr));
	assert_eq!(data.compiled.len(), 2);
}

#[test]
fn narrow_tree_refresh_skips_the_rebuild() {
	let mut fx = fixture();
	let tree = fx.bank.add("nt.comp", Payload::NodeTree(sampling_tree(fx.texture)));
	let _ids = [tree];
	construct(&mut fx, &_ids);

	{
		let copy = fx.graph.find_mut(tree).unwrap().copy.as_mut().unwrap();
		copy.recalc = RecalcFlags::DRAW | RecalcFlags::ANIMATION;
		// Evaluation-side marker a rebuild would wipe out.
		let Payload::NodeTree(data) = &mut copy.payload else {
			panic!("copy changed kind");
		};
		data.nodes[0].label = "sample.local".into();
	}
	// Author a new animated value upstream.
	let Some(Payload::NodeTree(data)) = fx.bank.get_mut(tree).map(|o| &mut o.payload) else {
		panic!("fixture tree vanished");
	};
	data.nodes[0].inputs[0].value = 0.9;

	let before = copy_id(&fx, tree);
	let result = update_entry(&mut fx.graph, &fx.bank, tree).unwrap();
	assert_eq!(result, before);

	let Payload::NodeTree(data) = &fx.graph.copy_object(tree).unwrap().payload else {
		panic!("copy changed kind");
	};
	// Value moved, storage and evaluation-side state stayed.
	assert_eq!(data.nodes[0].inputs[0].value, 0.9);
	assert_eq!(data.nodes[0].label, "sample.local");
	assert_eq!(data.nodes[0].source, Some(copy_id(&fx, fx.texture)));
}

#[test]
fn structural_tree_change_forces_the_rebuild() {
	let mut fx = fixture();
	let tree = fx.bank.add("nt.comp", Payload::NodeTree(sampling_tree(fx.texture)));
	let _ids = [tree];
	construct(&mut fx, &_ids);

	{
		let copy = fx.graph.find_mut(tree).unwrap().copy.as_mut().unwrap();
		copy.recalc = RecalcFlags::DRAW | RecalcFlags::GEOMETRY;
		let Payload::NodeTree(data) = &mut copy.payload else {
			panic!("copy changed kind");
		};
		data.nodes[0].label = "sample.local".into();
	}

	update_entry(&mut fx.graph, &fx.bank, tree).unwrap();

	let Payload::NodeTree(data) = &fx.graph.copy_object(tree).unwrap().payload else {
		panic!("copy changed kind");
	};
	assert_eq!(data.nodes[0].label, "sample");
}

#[test]
fn evaluated_geometry_relinks_to_the_live_copy() {
	let mut fx = fixture();
	let Some(Payload::Mesh(data)) = fx.bank.get_mut(fx.mesh).map(|o| &mut o.payload) else {
		panic!("fixture mesh vanished");
	};
	data.edit_mesh = Some(Box::new(EditMesh {
		owner: fx.object,
		derived_final: None,
		derived_cage: None,
	}));
	let _ids = [fx.object, fx.mesh];
	construct(&mut fx, &_ids);

	let ob_copy_id = copy_id(&fx, fx.object);
	let eval_ptr = {
		let copy = fx.graph.find_mut(fx.object).unwrap().copy.as_mut().unwrap();
		let Payload::Object(data) = &mut copy.payload else {
			panic!("copy changed kind");
		};
		// What the geometry task would leave behind after evaluating the
		// modifier stack.
		data.mesh_eval = Some(Box::new(EvaluatedMesh {
			owner: ob_copy_id,
			source: fx.mesh,
			positions: vec![[0.5, 0.5, 0.5]],
			edit_mesh: None,
		}));
		data.data_is_evaluated = true;
		data.base_flag = BaseFlags::VISIBLE;
		data.base_properties = Some(Box::new(PropertyBag {
			entries: vec![("holdout".into(), 1.0)],
		}));
		&**data.mesh_eval.as_ref().unwrap() as *const EvaluatedMesh
	};

	let result = update_entry(&mut fx.graph, &fx.bank, fx.object).unwrap();
	assert_eq!(result, ob_copy_id);

	let Payload::Object(data) = &fx.graph.copy_object(fx.object).unwrap().payload else {
		panic!("copy changed kind");
	};
	let eval = data.mesh_eval.as_deref().expect("evaluated geometry survived");
	// Same allocation, transplanted rather than recomputed.
	assert!(std::ptr::eq(eval, eval_ptr));
	assert_eq!(eval.owner, ob_copy_id);
	assert!(data.data_is_evaluated);
	// The edit-session link was re-mirrored from the source mesh, pointing
	// at the live object copy.
	assert_eq!(eval.edit_mesh.as_ref().unwrap().owner, ob_copy_id);
	assert_eq!(data.base_flag, BaseFlags::VISIBLE);
	assert_eq!(data.base_properties.as_ref().unwrap().entries[0].0, "holdout");
}

#[test]
fn scene_entry_is_skipped_by_the_evaluation_hook() {
	let mut fx = fixture();
	let _ids = [fx.scene, fx.object];
	construct(&mut fx, &_ids);

	let before = copy_id(&fx, fx.scene);
	let result = crate::cow::evaluate_entry(&mut fx.graph, &fx.bank, fx.scene).unwrap();
	assert_eq!(result, before);

	// A non-scene entry goes through the update engine.
	let _ = crate::cow::evaluate_entry(&mut fx.graph, &fx.bank, fx.object).unwrap();
	assert!(fx.graph.find(fx.object).unwrap().expanded);
}

#[test]
fn fresh_graph_has_no_entries() {
	let graph = Depsgraph::new();
	assert!(graph.is_empty());
	assert_eq!(graph.len(), 0);
}
