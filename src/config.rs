//! Animation settings.
//!
//! Settings are read from `stormchaser.json` in the working directory when
//! present; any field left out keeps its default.

use crate::error::{StormError, StormResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Number of intensity classes (0 through 5).
pub const CATEGORY_COUNT: usize = 6;

/// Longest skip-forward step, in days.
pub const MAX_SKIP_DAYS: i64 = 3660;

/// Tunable constants for the storm animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Real seconds of playback per simulated second.
    pub time_scale_factor: f64,
    /// Seconds for a storm to fade in once it appears.
    pub fade_in_secs: f64,
    /// Seconds for a storm to fade out after its last track point.
    pub fade_out_secs: f64,
    /// Icon color per intensity class.
    pub category_colors: [[u8; 3]; CATEGORY_COUNT],
    pub screen_width: f32,
    pub screen_height: f32,
    /// Pixel color of open water in the reference raster.
    pub ocean_color: [u8; 3],
    /// Exponential smoothing rate for icon color, per second.
    pub color_blend_rate: f64,
    /// Scale a landfall marker starts at before shrinking to 1.0.
    pub marker_initial_scale: f32,
    /// Scale units a landfall marker loses per second.
    pub marker_shrink_rate: f32,
    /// Icon spin for a class 0 storm, degrees per second.
    pub spin_base_deg_per_sec: f32,
    pub spin_class_gain: f32,
    pub spin_class_exponent: f32,
    /// Length of the skip-forward button, in simulated days.
    pub skip_days: i64,
    /// Directory holding the basin map images.
    pub resources_dir: PathBuf,
    /// Directory holding the cached track datasets.
    pub data_dir: PathBuf,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            // One real second per twelve simulated hours
            time_scale_factor: 1.0 / (12.0 * 60.0 * 60.0),
            fade_in_secs: 1.0,
            fade_out_secs: 0.5,
            category_colors: [
                [135, 206, 235], // Light blue
                [100, 238, 100], // Light green
                [225, 225, 0],   // Yellow
                [255, 130, 0],   // Orange
                [255, 0, 0],     // Red
                [255, 0, 255],   // Purple
            ],
            screen_width: 1200.0,
            screen_height: 900.0,
            ocean_color: [0, 0, 70],
            color_blend_rate: 4.0,
            marker_initial_scale: 30.0,
            marker_shrink_rate: 80.0,
            spin_base_deg_per_sec: 90.0,
            spin_class_gain: 30.0,
            spin_class_exponent: 1.5,
            skip_days: 7,
            resources_dir: PathBuf::from("resources"),
            data_dir: PathBuf::from("data"),
        }
    }
}

impl AnimationConfig {
    /// File the settings are read from.
    pub const FILE_NAME: &'static str = "stormchaser.json";

    /// Load settings from the working directory, falling back to defaults.
    pub fn load() -> Self {
        let path = Path::new(Self::FILE_NAME);
        if !path.exists() {
            log::info!("No {} found, using default settings", Self::FILE_NAME);
            return Self::default();
        }

        match Self::load_from(path) {
            Ok(config) => {
                log::info!("Loaded settings from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Failed to load settings: {}", e);
                Self::default()
            }
        }
    }

    /// Load and validate settings from a JSON file.
    pub fn load_from(path: &Path) -> StormResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> StormResult<()> {
        if !self.time_scale_factor.is_finite() || self.time_scale_factor <= 0.0 {
            return Err(StormError::config("time_scale_factor must be positive"));
        }
        if self.fade_in_secs <= 0.0 || self.fade_out_secs <= 0.0 {
            return Err(StormError::config("fade durations must be positive"));
        }
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(StormError::config("screen resolution must be positive"));
        }
        if self.color_blend_rate < 0.0 || self.marker_shrink_rate < 0.0 {
            return Err(StormError::config("rates must not be negative"));
        }
        if self.skip_days <= 0 || self.skip_days > MAX_SKIP_DAYS {
            return Err(StormError::config(format!(
                "skip_days must be between 1 and {}",
                MAX_SKIP_DAYS
            )));
        }
        Ok(())
    }

    /// Color for an intensity class; classes past the table use the last entry.
    pub fn category_color(&self, class: u8) -> [u8; 3] {
        let idx = (class as usize).min(CATEGORY_COUNT - 1);
        self.category_colors[idx]
    }

    /// Simulated seconds covered by one real second of playback.
    pub fn simulated_per_real(&self) -> f64 {
        1.0 / self.time_scale_factor
    }
}
