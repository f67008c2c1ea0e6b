use strum_macros::EnumIter;

/// Discriminant for every object the scene and its dependency graph manage.
///
/// The set is closed: evaluation code dispatches over it with exhaustive
/// matches so adding a kind forces every table to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Kind {
	/// Top-level container tying objects, world and compositing together.
	Scene,
	/// Placed instance binding geometry data, materials and a transform.
	Object,
	/// Polygonal geometry datablock.
	Mesh,
	/// Parametric curve geometry datablock.
	Curve,
	/// Deformation lattice datablock.
	Lattice,
	/// Light source datablock.
	Light,
	/// Environment settings datablock.
	World,
	/// Surface shading datablock.
	Material,
	/// Procedural or image-backed texture datablock.
	Texture,
	/// Standalone shading/compositing node graph.
	NodeTree,
	/// Shape-key stack for deformable geometry.
	ShapeKey,
	/// Stroke styling stand-in used by line rendering.
	LineStyle,
	/// Paint brush preset.
	Brush,
	/// Color palette preset.
	Palette,
	/// Pixel data loaded from disk.
	Image,
}

impl Kind {
	/// Stable lowercase name used in logs and diagnostics.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Scene => "scene",
			Self::Object => "object",
			Self::Mesh => "mesh",
			Self::Curve => "curve",
			Self::Lattice => "lattice",
			Self::Light => "light",
			Self::World => "world",
			Self::Material => "material",
			Self::Texture => "texture",
			Self::NodeTree => "node_tree",
			Self::ShapeKey => "shape_key",
			Self::LineStyle => "line_style",
			Self::Brush => "brush",
			Self::Palette => "palette",
			Self::Image => "image",
		}
	}

	/// Iterates every kind in the closed set.
	pub fn all() -> impl Iterator<Item = Kind> {
		<Self as strum::IntoEnumIterator>::iter()
	}
}
