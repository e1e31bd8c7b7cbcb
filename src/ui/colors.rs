//! Centralized color constants for the UI.

use eframe::egui::Color32;

/// Playback control bar.
pub mod controls {
    use super::Color32;

    /// Play and skip buttons.
    pub const BUTTON: Color32 = Color32::from_rgb(70, 130, 180);
    pub const BACK_BUTTON: Color32 = Color32::from_rgb(200, 50, 50);
    pub const TEXT: Color32 = Color32::WHITE;
    /// Frame rate and clock readouts.
    pub const READOUT: Color32 = Color32::WHITE;
}

/// Start menu.
pub mod menu {
    use super::Color32;

    pub const TITLE: Color32 = Color32::from_rgb(82, 150, 63);
    pub const TITLE_OUTLINE: Color32 = Color32::from_rgb(51, 52, 109);
    /// Text field with keyboard focus.
    pub const INPUT_ACTIVE: Color32 = Color32::from_rgb(28, 134, 238);
    pub const INPUT_INACTIVE: Color32 = Color32::from_rgb(141, 182, 205);
    pub const BASIN_SELECTED: Color32 = Color32::from_rgb(124, 252, 0);
    pub const BASIN: Color32 = Color32::from_rgb(144, 238, 144);
    pub const BASIN_TEXT: Color32 = Color32::from_rgb(20, 40, 20);
    pub const HINT: Color32 = Color32::from_rgba_premultiplied(200, 200, 200, 200);
    pub const ERROR: Color32 = Color32::from_rgb(255, 90, 90);
}

/// Map canvas.
pub mod canvas {
    use super::Color32;

    /// Shown where no map image could be loaded.
    pub const NO_MAP: Color32 = Color32::from_rgb(0, 0, 70);
    pub const HOVER_TEXT: Color32 = Color32::from_rgb(220, 220, 220);
    pub const LOADING_TEXT: Color32 = Color32::WHITE;
}
