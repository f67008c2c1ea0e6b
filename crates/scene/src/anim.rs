use crate::data::{NodeTreeData, Payload};

/// Copies animation-driven values from `src` onto `dst` without structural
/// changes.
///
/// Node graphs keep their node and socket storage; only socket values move.
/// Kinds with no animated channels come through untouched. Both payloads
/// must be of the same kind; mismatches are ignored.
pub fn copy_animated_values(src: &Payload, dst: &mut Payload) {
	match (src, dst) {
		(Payload::Object(src), Payload::Object(dst)) => {
			dst.location = src.location;
			dst.rotation = src.rotation;
			dst.scale = src.scale;
		}
		(Payload::Light(src), Payload::Light(dst)) => {
			dst.color = src.color;
			dst.energy = src.energy;
			copy_tree_values(src.node_tree.as_deref(), dst.node_tree.as_deref_mut());
		}
		(Payload::World(src), Payload::World(dst)) => {
			dst.horizon = src.horizon;
			copy_tree_values(src.node_tree.as_deref(), dst.node_tree.as_deref_mut());
		}
		(Payload::Material(src), Payload::Material(dst)) => {
			dst.diffuse = src.diffuse;
			copy_tree_values(src.node_tree.as_deref(), dst.node_tree.as_deref_mut());
		}
		(Payload::Texture(src), Payload::Texture(dst)) => {
			copy_tree_values(src.node_tree.as_deref(), dst.node_tree.as_deref_mut());
		}
		(Payload::LineStyle(src), Payload::LineStyle(dst)) => {
			copy_tree_values(src.node_tree.as_deref(), dst.node_tree.as_deref_mut());
		}
		(Payload::NodeTree(src), Payload::NodeTree(dst)) => {
			copy_sockets(src, dst);
		}
		(Payload::Scene(src), Payload::Scene(dst)) => {
			dst.frame = src.frame;
			copy_tree_values(src.node_tree.as_deref(), dst.node_tree.as_deref_mut());
		}
		_ => {}
	}
}

fn copy_tree_values(src: Option<&NodeTreeData>, dst: Option<&mut NodeTreeData>) {
	if let (Some(src), Some(dst)) = (src, dst) {
		copy_sockets(src, dst);
	}
}

/// Moves socket values across matching node/socket positions.
///
/// Trees that drifted structurally are out of scope here; a structural
/// change forces a full rebuild upstream, so position-wise matching holds.
fn copy_sockets(src: &NodeTreeData, dst: &mut NodeTreeData) {
	for (src_node, dst_node) in src.nodes.iter().zip(dst.nodes.iter_mut()) {
		for (src_input, dst_input) in src_node.inputs.iter().zip(dst_node.inputs.iter_mut()) {
			dst_input.value = src_input.value;
		}
	}
}
