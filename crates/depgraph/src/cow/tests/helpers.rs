//! Common fixtures for copy-on-write tests.

use sable_scene::data::{
	BrushData, ImageData, MaterialData, MeshData, NodeSocket, NodeTreeData, ObjectData, SceneData,
	ShaderNode, TextureData,
};
use sable_scene::{ObjectId, Payload, SceneBank};

use crate::cow::expand::expand_entry;
use crate::cow::remap::RemapMode;
use crate::graph::Depsgraph;

/// A small authored scene exercising every interesting reference shape:
/// a scene containing an object, the object instancing a mesh, mesh and
/// object sharing a material whose embedded node graph samples a texture,
/// the texture reading a copy-exempt image, plus a preset brush.
pub struct Fixture {
	pub bank: SceneBank,
	pub graph: Depsgraph,
	pub scene: ObjectId,
	pub object: ObjectId,
	pub mesh: ObjectId,
	pub material: ObjectId,
	pub texture: ObjectId,
	pub image: ObjectId,
	pub brush: ObjectId,
}

/// One-node graph whose node samples `source`.
pub fn sampling_tree(source: ObjectId) -> NodeTreeData {
	NodeTreeData {
		nodes: vec![ShaderNode {
			label: "sample".into(),
			inputs: smallvec::smallvec![NodeSocket { name: "fac".into(), value: 0.5 }],
			source: Some(source),
		}],
	}
}

pub fn fixture() -> Fixture {
	let mut bank = SceneBank::new();
	let image = bank.add(
		"grid.png",
		Payload::Image(ImageData { path: "grid.png".into(), size: [64, 64] }),
	);
	let texture = bank.add(
		"tex.grid",
		Payload::Texture(TextureData { image: Some(image), node_tree: None }),
	);
	let material = bank.add(
		"mat.checker",
		Payload::Material(MaterialData {
			diffuse: [0.8, 0.2, 0.2],
			node_tree: Some(Box::new(sampling_tree(texture))),
			compiled: Vec::new(),
		}),
	);
	let mesh = bank.add(
		"me.cube",
		Payload::Mesh(MeshData {
			positions: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
			polys: vec![[0, 1, 2]],
			materials: vec![Some(material)],
			shape_key: None,
			edit_mesh: None,
		}),
	);
	let brush = bank.add(
		"br.draw",
		Payload::Brush(BrushData { size: 32.0, strength: 0.5, texture: Some(texture) }),
	);
	let object = bank.add(
		"ob.cube",
		Payload::Object(ObjectData {
			data: Some(mesh),
			materials: vec![Some(material)],
			..ObjectData::default()
		}),
	);
	let scene = bank.add(
		"sc.main",
		Payload::Scene(SceneData {
			objects: vec![object],
			active_brush: Some(brush),
			frame: 1.0,
			..SceneData::default()
		}),
	);

	let mut graph = Depsgraph::new();
	graph.set_scene(scene);
	Fixture { bank, graph, scene, object, mesh, material, texture, image, brush }
}

/// Registers every id and expands each in placeholder mode, the way graph
/// construction does.
pub fn construct(fx: &mut Fixture, ids: &[ObjectId]) {
	for &id in ids {
		fx.graph.ensure(&fx.bank, id).expect("fixture id is authored");
	}
	for &id in ids {
		expand_entry(&mut fx.graph, &fx.bank, id, RemapMode::CreatePlaceholder).expect("expansion succeeds");
	}
}

/// The copy identity registered for `orig`.
pub fn copy_id(fx: &Fixture, orig: ObjectId) -> ObjectId {
	fx.graph.find(orig).expect("entry registered").eval_id()
}
