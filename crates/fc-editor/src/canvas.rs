//! Canvas store: persisted canvas settings plus session-only view flags.
//!
//! `grid_visible` is what this session shows; `settings.grid_enabled` is the
//! preference saved with the project. `toggle_grid` writes both, but loading
//! a project only replaces the settings and never touches `grid_visible`.

use fc_core::model::{CanvasSettings, CanvasSettingsPatch, Viewport};

#[derive(Debug, Clone)]
pub struct CanvasStore {
    settings: CanvasSettings,
    grid_visible: bool,
    minimap_visible: bool,
    panel_open: bool,
    animation_active: bool,
}

impl CanvasStore {
    pub fn new(settings: CanvasSettings) -> Self {
        Self {
            grid_visible: settings.grid_enabled,
            settings,
            minimap_visible: true,
            panel_open: true,
            animation_active: true,
        }
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn viewport(&self) -> Viewport {
        self.settings.viewport
    }

    pub fn is_grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn is_minimap_visible(&self) -> bool {
        self.minimap_visible
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    pub fn is_animation_active(&self) -> bool {
        self.animation_active
    }

    /// Replace the settings wholesale (project load).
    pub fn set_settings(&mut self, settings: CanvasSettings) {
        self.settings = settings;
    }

    /// Merge a partial update into the settings.
    pub fn update_canvas_settings(&mut self, patch: &CanvasSettingsPatch) {
        self.settings.apply(patch);
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.settings.viewport = viewport;
    }

    /// Back to the origin at 100% zoom.
    pub fn reset_view(&mut self) {
        self.settings.viewport = Viewport::default();
    }

    /// Flip grid visibility for this session and save it as the preference.
    pub fn toggle_grid(&mut self) -> bool {
        self.grid_visible = !self.grid_visible;
        self.settings.grid_enabled = self.grid_visible;
        self.grid_visible
    }

    pub fn toggle_snap_to_grid(&mut self) -> bool {
        self.settings.snap_to_grid = !self.settings.snap_to_grid;
        self.settings.snap_to_grid
    }

    pub fn toggle_minimap(&mut self) -> bool {
        self.minimap_visible = !self.minimap_visible;
        self.minimap_visible
    }

    pub fn toggle_panel(&mut self) -> bool {
        self.panel_open = !self.panel_open;
        self.panel_open
    }

    pub fn toggle_animation(&mut self) -> bool {
        self.animation_active = !self.animation_active;
        self.animation_active
    }
}

impl Default for CanvasStore {
    fn default() -> Self {
        Self::new(CanvasSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_update_keeps_other_fields() {
        let mut canvas = CanvasStore::default();
        canvas.update_canvas_settings(&CanvasSettingsPatch {
            background: Some("#000000".into()),
            grid_size: Some(40.0),
            ..Default::default()
        });
        let s = canvas.settings();
        assert_eq!(s.background, "#000000");
        assert_eq!(s.grid_size, 40.0);
        assert_eq!(s.width, 1920.0);
        assert!(s.grid_enabled);
    }

    #[test]
    fn toggle_grid_mirrors_into_settings() {
        let mut canvas = CanvasStore::default();
        assert!(!canvas.toggle_grid());
        assert!(!canvas.settings().grid_enabled);
        assert!(canvas.toggle_grid());
        assert!(canvas.settings().grid_enabled);
    }

    #[test]
    fn set_settings_leaves_session_grid_alone() {
        let mut canvas = CanvasStore::default();
        canvas.toggle_grid();
        assert!(!canvas.is_grid_visible());

        canvas.set_settings(CanvasSettings {
            grid_enabled: true,
            ..Default::default()
        });
        assert!(canvas.settings().grid_enabled);
        assert!(!canvas.is_grid_visible());
    }

    #[test]
    fn snap_toggle_and_view_reset() {
        let mut canvas = CanvasStore::default();
        assert!(canvas.toggle_snap_to_grid());
        assert!(canvas.settings().snap_to_grid);

        canvas.set_viewport(Viewport {
            x: 120.0,
            y: -40.0,
            zoom: 1.5,
        });
        canvas.reset_view();
        assert_eq!(canvas.viewport(), Viewport::default());
    }

    #[test]
    fn session_flags_toggle_independently() {
        let mut canvas = CanvasStore::default();
        assert!(!canvas.toggle_minimap());
        assert!(!canvas.toggle_panel());
        assert!(!canvas.toggle_animation());
        assert!(canvas.is_grid_visible());
    }
}
