//! Kind-dependent object payloads.
//!
//! Every payload variant owns its content; references to other objects are
//! held as [`ObjectId`] fields and enumerated by the generic walker in
//! [`walk`](crate::walk). Two kinds of sub-state deserve care:
//!
//! - **Embedded owned sub-objects** (`node_tree`, `shape_key`) live by value
//!   inside their owner's payload and are not independently addressable.
//! - **Runtime caches** (`edit_mesh`, `mesh_eval`, `compiled`) are produced
//!   by editing sessions or the evaluation pipeline, never authored, and the
//!   generic copier does not carry them over.

use smallvec::SmallVec;

use crate::id::ObjectId;
use crate::kind::Kind;

bitflags::bitflags! {
	/// View-membership flags stamped on an object by the layer system.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
	pub struct BaseFlags: u32 {
		/// Visible in at least one active view.
		const VISIBLE = 1 << 0;
		/// Selectable in the viewport.
		const SELECTABLE = 1 << 1;
		/// Included when rendering.
		const RENDERABLE = 1 << 2;
	}
}

/// Interaction mode an object was left in by the editing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ObjectMode {
	/// Plain object-level interaction.
	#[default]
	Normal,
	/// Mesh/curve edit session active.
	Edit,
	/// Sculpt session active.
	Sculpt,
}

/// Compiled GPU shader handle cached on materials and worlds.
///
/// Compilation is expensive and the handles are shared with the draw code,
/// so update cycles transplant these lists instead of rebuilding them.
#[derive(Debug, Clone, PartialEq)]
pub struct GpuMaterial {
	/// Opaque handle into the shader cache.
	pub shader: u64,
}

/// Per-base property overrides attached by view membership.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyBag {
	pub entries: Vec<(String, f32)>,
}

/// One node input socket; values are animation-driven.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSocket {
	pub name: String,
	pub value: f32,
}

/// One shading or compositing node.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderNode {
	pub label: String,
	pub inputs: SmallVec<[NodeSocket; 4]>,
	/// Texture or image this node samples, if any.
	pub source: Option<ObjectId>,
}

/// A shading/compositing node graph, standalone or embedded in an owner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeTreeData {
	pub nodes: Vec<ShaderNode>,
}

/// One shape-key block of per-point offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBlock {
	pub name: String,
	pub offsets: Vec<[f32; 3]>,
}

/// Shape-key stack, standalone or embedded in deformable geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeKeyData {
	pub blocks: Vec<KeyBlock>,
}

/// Derived mesh computed for one display mode of an edit session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedMesh {
	pub positions: Vec<[f32; 3]>,
}

/// Edit-session cache attached to a mesh.
///
/// The actual edit state is owned by the editing layer; the cache only
/// borrows into it conceptually, so `owner` must always name the object the
/// cache is reachable from, never a stale copy.
#[derive(Debug, Clone, PartialEq)]
pub struct EditMesh {
	/// Object whose edit session produced this cache.
	pub owner: ObjectId,
	pub derived_final: Option<Box<DerivedMesh>>,
	pub derived_cage: Option<Box<DerivedMesh>>,
}

/// Geometry produced by evaluating an object's modifier stack.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedMesh {
	/// Copy object that produced this geometry.
	pub owner: ObjectId,
	/// Original mesh this geometry was derived from.
	pub source: ObjectId,
	pub positions: Vec<[f32; 3]>,
	/// Edit-session cache mirrored from the source mesh.
	pub edit_mesh: Option<Box<EditMesh>>,
}

/// Scene payload: the container kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneData {
	/// Every object in the scene's collections, linked to a view or not.
	pub objects: Vec<ObjectId>,
	pub camera: Option<ObjectId>,
	pub world: Option<ObjectId>,
	/// Tool-settings brush preset.
	pub active_brush: Option<ObjectId>,
	pub frame: f64,
	/// Embedded compositing graph.
	pub node_tree: Option<Box<NodeTreeData>>,
}

/// Object payload: the element kind placed in scenes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectData {
	/// Geometry datablock this object instances.
	pub data: Option<ObjectId>,
	/// When set, `mesh_eval` stands in for `data` as the active payload.
	pub data_is_evaluated: bool,
	pub parent: Option<ObjectId>,
	/// Material slots; entries may be empty.
	pub materials: Vec<Option<ObjectId>>,
	pub mode: ObjectMode,
	pub base_flag: BaseFlags,
	/// Per-base overrides; present only while linked to a view.
	pub base_properties: Option<Box<PropertyBag>>,
	/// Evaluated geometry; produced by the pipeline, never authored.
	pub mesh_eval: Option<Box<EvaluatedMesh>>,
	pub location: [f32; 3],
	pub rotation: [f32; 3],
	pub scale: [f32; 3],
}

/// Mesh payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
	pub positions: Vec<[f32; 3]>,
	pub polys: Vec<[u32; 3]>,
	/// Material slots; entries may be empty.
	pub materials: Vec<Option<ObjectId>>,
	/// Embedded shape-key stack.
	pub shape_key: Option<Box<ShapeKeyData>>,
	/// Edit-session cache; owned by the editing layer, not authored.
	pub edit_mesh: Option<Box<EditMesh>>,
}

/// Curve payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurveData {
	pub points: Vec<[f32; 3]>,
	/// Material slots; entries may be empty.
	pub materials: Vec<Option<ObjectId>>,
	pub bevel_object: Option<ObjectId>,
	pub taper_object: Option<ObjectId>,
	/// Embedded shape-key stack.
	pub shape_key: Option<Box<ShapeKeyData>>,
}

/// Lattice payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LatticeData {
	pub points: Vec<[f32; 3]>,
	/// Embedded shape-key stack.
	pub shape_key: Option<Box<ShapeKeyData>>,
}

/// Light payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightData {
	pub color: [f32; 3],
	pub energy: f32,
	/// Embedded shading graph.
	pub node_tree: Option<Box<NodeTreeData>>,
}

/// World payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldData {
	pub horizon: [f32; 3],
	/// Embedded shading graph.
	pub node_tree: Option<Box<NodeTreeData>>,
	/// Compiled shader cache; preserved across update cycles.
	pub compiled: Vec<GpuMaterial>,
}

/// Material payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialData {
	pub diffuse: [f32; 3],
	/// Embedded shading graph.
	pub node_tree: Option<Box<NodeTreeData>>,
	/// Compiled shader cache; preserved across update cycles.
	pub compiled: Vec<GpuMaterial>,
}

/// Texture payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextureData {
	pub image: Option<ObjectId>,
	/// Embedded shading graph.
	pub node_tree: Option<Box<NodeTreeData>>,
}

/// Line-style payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineStyleData {
	pub color: [f32; 3],
	pub thickness: f32,
	/// Embedded shading graph.
	pub node_tree: Option<Box<NodeTreeData>>,
}

/// Brush payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrushData {
	pub size: f32,
	pub strength: f32,
	pub texture: Option<ObjectId>,
}

/// Palette payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaletteData {
	pub colors: Vec<[f32; 3]>,
}

/// Image payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageData {
	pub path: String,
	pub size: [u32; 2],
}

/// An embedded owned sub-object detached from its owner.
#[derive(Debug, Clone, PartialEq)]
pub enum EmbeddedPayload {
	NodeTree(Box<NodeTreeData>),
	ShapeKey(Box<ShapeKeyData>),
}

/// Kind-dependent content of one object.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
	Scene(SceneData),
	Object(ObjectData),
	Mesh(MeshData),
	Curve(CurveData),
	Lattice(LatticeData),
	Light(LightData),
	World(WorldData),
	Material(MaterialData),
	Texture(TextureData),
	NodeTree(NodeTreeData),
	ShapeKey(ShapeKeyData),
	LineStyle(LineStyleData),
	Brush(BrushData),
	Palette(PaletteData),
	Image(ImageData),
}

impl Payload {
	/// Kind encoded by this payload's discriminant.
	pub const fn kind(&self) -> Kind {
		match self {
			Payload::Scene(_) => Kind::Scene,
			Payload::Object(_) => Kind::Object,
			Payload::Mesh(_) => Kind::Mesh,
			Payload::Curve(_) => Kind::Curve,
			Payload::Lattice(_) => Kind::Lattice,
			Payload::Light(_) => Kind::Light,
			Payload::World(_) => Kind::World,
			Payload::Material(_) => Kind::Material,
			Payload::Texture(_) => Kind::Texture,
			Payload::NodeTree(_) => Kind::NodeTree,
			Payload::ShapeKey(_) => Kind::ShapeKey,
			Payload::LineStyle(_) => Kind::LineStyle,
			Payload::Brush(_) => Kind::Brush,
			Payload::Palette(_) => Kind::Palette,
			Payload::Image(_) => Kind::Image,
		}
	}

	/// Empty payload for `kind`: the shell state of an evaluation copy.
	pub fn empty(kind: Kind) -> Payload {
		match kind {
			Kind::Scene => Payload::Scene(SceneData::default()),
			Kind::Object => Payload::Object(ObjectData::default()),
			Kind::Mesh => Payload::Mesh(MeshData::default()),
			Kind::Curve => Payload::Curve(CurveData::default()),
			Kind::Lattice => Payload::Lattice(LatticeData::default()),
			Kind::Light => Payload::Light(LightData::default()),
			Kind::World => Payload::World(WorldData::default()),
			Kind::Material => Payload::Material(MaterialData::default()),
			Kind::Texture => Payload::Texture(TextureData::default()),
			Kind::NodeTree => Payload::NodeTree(NodeTreeData::default()),
			Kind::ShapeKey => Payload::ShapeKey(ShapeKeyData::default()),
			Kind::LineStyle => Payload::LineStyle(LineStyleData::default()),
			Kind::Brush => Payload::Brush(BrushData::default()),
			Kind::Palette => Payload::Palette(PaletteData::default()),
			Kind::Image => Payload::Image(ImageData::default()),
		}
	}

	/// Detaches the embedded owned sub-object, if this kind carries one.
	pub fn take_embedded(&mut self) -> Option<EmbeddedPayload> {
		match self {
			Payload::Scene(data) => data.node_tree.take().map(EmbeddedPayload::NodeTree),
			Payload::Light(data) => data.node_tree.take().map(EmbeddedPayload::NodeTree),
			Payload::World(data) => data.node_tree.take().map(EmbeddedPayload::NodeTree),
			Payload::Material(data) => data.node_tree.take().map(EmbeddedPayload::NodeTree),
			Payload::Texture(data) => data.node_tree.take().map(EmbeddedPayload::NodeTree),
			Payload::LineStyle(data) => data.node_tree.take().map(EmbeddedPayload::NodeTree),
			Payload::Mesh(data) => data.shape_key.take().map(EmbeddedPayload::ShapeKey),
			Payload::Curve(data) => data.shape_key.take().map(EmbeddedPayload::ShapeKey),
			Payload::Lattice(data) => data.shape_key.take().map(EmbeddedPayload::ShapeKey),
			_ => None,
		}
	}

	/// Reattaches a previously detached embedded sub-object.
	///
	/// The payload variant must match the embedded field's owner kind; a
	/// mismatch is a programming error.
	pub fn put_embedded(&mut self, embedded: EmbeddedPayload) {
		match (self, embedded) {
			(Payload::Scene(data), EmbeddedPayload::NodeTree(tree)) => data.node_tree = Some(tree),
			(Payload::Light(data), EmbeddedPayload::NodeTree(tree)) => data.node_tree = Some(tree),
			(Payload::World(data), EmbeddedPayload::NodeTree(tree)) => data.node_tree = Some(tree),
			(Payload::Material(data), EmbeddedPayload::NodeTree(tree)) => data.node_tree = Some(tree),
			(Payload::Texture(data), EmbeddedPayload::NodeTree(tree)) => data.node_tree = Some(tree),
			(Payload::LineStyle(data), EmbeddedPayload::NodeTree(tree)) => data.node_tree = Some(tree),
			(Payload::Mesh(data), EmbeddedPayload::ShapeKey(key)) => data.shape_key = Some(key),
			(Payload::Curve(data), EmbeddedPayload::ShapeKey(key)) => data.shape_key = Some(key),
			(Payload::Lattice(data), EmbeddedPayload::ShapeKey(key)) => data.shape_key = Some(key),
			(payload, embedded) => {
				debug_assert!(false, "embedded {embedded:?} does not belong on {:?}", payload.kind());
			}
		}
	}

	/// True when this kind embeds an owned sub-object and the field is set.
	pub fn has_embedded(&self) -> bool {
		match self {
			Payload::Scene(data) => data.node_tree.is_some(),
			Payload::Light(data) => data.node_tree.is_some(),
			Payload::World(data) => data.node_tree.is_some(),
			Payload::Material(data) => data.node_tree.is_some(),
			Payload::Texture(data) => data.node_tree.is_some(),
			Payload::LineStyle(data) => data.node_tree.is_some(),
			Payload::Mesh(data) => data.shape_key.is_some(),
			Payload::Curve(data) => data.shape_key.is_some(),
			Payload::Lattice(data) => data.shape_key.is_some(),
			_ => false,
		}
	}
}
