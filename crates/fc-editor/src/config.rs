//! Editor configuration.

use fc_core::model::{CanvasSettings, Position};
use serde::Deserialize;

/// Tunables for a [`GraphEditor`](crate::editor::GraphEditor) and its
/// [`ProjectSession`](crate::project::ProjectSession).
///
/// Every field has a default, so a JSON config only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EditorConfig {
    /// Shift applied to a duplicated node when the caller gives none. Default: (50, 50).
    pub duplicate_offset: Position,

    /// Canvas settings of a freshly created project.
    pub default_canvas: CanvasSettings,

    /// Name used when a snapshot is assembled before any project was created.
    pub untitled_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            duplicate_offset: Position::new(50.0, 50.0),
            default_canvas: CanvasSettings::default(),
            untitled_name: "Untitled".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON, keeping defaults for absent keys.
    ///
    /// # Errors
    /// Returns the `serde_json` error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
