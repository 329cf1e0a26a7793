//! Output types for the wizard frontend.
//!
//! These structs are serialized to JSON and sent to the React frontend,
//! which draws boxes, wrapped labels and arrowed edges and applies the
//! highlight styling.

use serde::Serialize;

use crate::graph::NodeKind;
use crate::view::ViewTransform;

/// A positioned node ready for the renderer. `x`/`y` are the node center in
/// scene coordinates; the view transform in `SceneOutput` maps them to the
/// screen.
#[derive(Debug, Clone, Serialize)]
pub struct NodeOutput {
    pub id: String,
    pub kind: NodeKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Full label text (tooltip).
    pub text: String,
    /// Wrapped label lines fitted to the node width.
    pub lines: Vec<String>,
    /// Vertical shift recentering the wrapped block on the node.
    pub label_offset_y: f32,
    /// Whether a drag currently owns this node's position.
    pub pinned: bool,
    pub highlighted: bool,
}

/// An edge between two nodes, by node id.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeOutput {
    pub from: String,
    pub to: String,
    pub highlighted: bool,
}

/// The combined scene sent to the renderer each frame.
#[derive(Debug, Clone, Serialize)]
pub struct SceneOutput {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub edges: Vec<EdgeOutput>,
    pub transform: ViewTransform,
}

/// One row of the execution order, consumed by the action-plan and export
/// views to number and group action items.
#[derive(Debug, Clone, Serialize)]
pub struct SequenceEntry {
    pub id: String,
    pub text: String,
}
