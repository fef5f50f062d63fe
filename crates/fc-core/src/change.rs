//! Incremental change-sets emitted by the canvas while the user drags,
//! resizes, clicks, and deletes.
//!
//! A batch is applied in order in one call. JSON shape follows the canvas
//! event stream: `{"type": "position", "id": "...", ...}`.

use crate::id::{EdgeId, NodeId};
use crate::model::Position;
use serde::{Deserialize, Serialize};

/// One diff against the node collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeChange {
    /// Drag update. `position` is `None` for drag start/stop events that
    /// carry no coordinates.
    Position {
        id: NodeId,
        #[serde(default)]
        position: Option<Position>,
        #[serde(default)]
        dragging: bool,
    },
    /// Resize handle moved.
    Dimensions { id: NodeId, width: f64, height: f64 },
    /// Selection toggled by click or marquee.
    Select { id: NodeId, selected: bool },
    /// Backspace/Delete on a node.
    Remove { id: NodeId },
}

impl NodeChange {
    pub fn id(&self) -> NodeId {
        match self {
            NodeChange::Position { id, .. }
            | NodeChange::Dimensions { id, .. }
            | NodeChange::Select { id, .. }
            | NodeChange::Remove { id } => *id,
        }
    }
}

/// One diff against the edge collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EdgeChange {
    Select { id: EdgeId, selected: bool },
    Remove { id: EdgeId },
}

impl EdgeChange {
    pub fn id(&self) -> EdgeId {
        match self {
            EdgeChange::Select { id, .. } | EdgeChange::Remove { id } => *id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canvas_event_batch() {
        let json = r#"[
            {"type": "position", "id": "a", "position": {"x": 10, "y": 20}, "dragging": true},
            {"type": "position", "id": "a"},
            {"type": "dimensions", "id": "a", "width": 200, "height": 90},
            {"type": "select", "id": "b", "selected": true},
            {"type": "remove", "id": "c"}
        ]"#;
        let changes: Vec<NodeChange> = serde_json::from_str(json).unwrap();
        assert_eq!(changes.len(), 5);
        assert_eq!(
            changes[0],
            NodeChange::Position {
                id: NodeId::intern("a"),
                position: Some(Position::new(10.0, 20.0)),
                dragging: true,
            }
        );
        assert!(matches!(
            changes[1],
            NodeChange::Position {
                position: None,
                dragging: false,
                ..
            }
        ));
        assert_eq!(changes[4].id(), NodeId::intern("c"));
    }

    #[test]
    fn parses_edge_changes() {
        let changes: Vec<EdgeChange> = serde_json::from_str(
            r#"[{"type":"remove","id":"e1"},{"type":"select","id":"e2","selected":false}]"#,
        )
        .unwrap();
        assert_eq!(changes[0], EdgeChange::Remove { id: EdgeId::intern("e1") });
        assert_eq!(changes[1].id(), EdgeId::intern("e2"));
    }
}
