//! Engine tuning loaded from `engine.toml`.
//!
//! Every table and field is optional; anything missing takes the default
//! below. A file that cannot be read or parsed is not fatal: the engine logs a
//! warning and runs with defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec2;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crystal_data::{DEFAULT_LOGICAL_HEIGHT, DEFAULT_LOGICAL_WIDTH};

use crate::camera::CameraSettings;
use crate::navigation::GridConfig;

/// Complete engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub viewport: ViewportConfig,
    pub navigation: NavigationConfig,
    pub camera: CameraConfig,
    pub preflight: PreflightConfig,
}

/// Screen size in pixels. Also the recommended minimum scene size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_LOGICAL_WIDTH.unsigned_abs(),
            height: DEFAULT_LOGICAL_HEIGHT.unsigned_abs(),
        }
    }
}

impl ViewportConfig {
    #[allow(clippy::cast_precision_loss)]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Pixels per grid cell side.
    pub cell_size: u32,
    /// Smallest clearance radius any character gets, in pixels.
    pub min_clearance_radius: f32,
    /// Cells searched around a blocked goal for a walkable substitute.
    pub fallback_radius: u32,
    /// Grids above this many cells get a preflight warning.
    pub max_grid_cells: usize,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            cell_size: 10,
            min_clearance_radius: 8.0,
            fallback_radius: 10,
            max_grid_cells: 250_000,
        }
    }
}

impl NavigationConfig {
    /// Grid parameters for a character of the given clearance radius.
    pub fn grid_config(&self, clearance_radius: f32) -> GridConfig {
        GridConfig {
            cell_size: self.cell_size,
            clearance_radius,
            min_clearance_radius: self.min_clearance_radius,
            fallback_radius: self.fallback_radius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub edge_scroll_enabled: bool,
    pub edge_scroll_margin: f32,
    pub edge_scroll_speed: f32,
    /// Default exponential approach rate for smoothed follow.
    pub follow_smoothing: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let settings = CameraSettings::default();
        Self {
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
            edge_scroll_enabled: settings.edge_scroll_enabled,
            edge_scroll_margin: settings.edge_scroll_margin,
            edge_scroll_speed: settings.edge_scroll_speed,
            follow_smoothing: settings.follow_smoothing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreflightConfig {
    /// Extra clearance, beyond the character radius, required around spawn points.
    pub spawn_margin: f32,
    /// Distance between rings when searching for an alternative spawn point.
    pub suggestion_step: f32,
    pub suggestion_max_distance: f32,
}

impl Default for PreflightConfig {
    fn default() -> Self {
        Self {
            spawn_margin: 5.0,
            suggestion_step: 5.0,
            suggestion_max_distance: 200.0,
        }
    }
}

impl EngineConfig {
    /// Camera settings for the configured viewport.
    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            viewport: self.viewport.size(),
            min_zoom: self.camera.min_zoom,
            max_zoom: self.camera.max_zoom,
            edge_scroll_enabled: self.camera.edge_scroll_enabled,
            edge_scroll_margin: self.camera.edge_scroll_margin,
            edge_scroll_speed: self.camera.edge_scroll_speed,
            follow_smoothing: self.camera.follow_smoothing,
        }
    }
}

/// Loads the engine configuration, falling back to defaults on error.
///
/// # Logging
/// - `info!` on successful load
/// - `warn!` if the file cannot be read or parsed
pub fn load_engine_config(toml_path: &Path) -> EngineConfig {
    match try_load_engine_config(toml_path) {
        Ok(config) => {
            info!("engine configuration loaded from '{}'", toml_path.display());
            config
        },
        Err(e) => {
            warn!(
                "Could not load engine configuration from '{}': {e:#}. Using defaults.",
                toml_path.display()
            );
            EngineConfig::default()
        },
    }
}

/// Reads and parses an engine configuration file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn try_load_engine_config(toml_path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(toml_path)
        .with_context(|| format!("reading engine configuration from '{}'", toml_path.display()))?;
    toml::from_str(&text).with_context(|| format!("parsing engine configuration from '{}'", toml_path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config: EngineConfig = toml::from_str(
            r"
            [navigation]
            cell_size = 16

            [preflight]
            spawn_margin = 2.5
            ",
        )
        .unwrap();
        assert_eq!(config.navigation.cell_size, 16);
        assert_eq!(config.navigation.min_clearance_radius, 8.0);
        assert_eq!(config.preflight.spawn_margin, 2.5);
        assert_eq!(config.preflight.suggestion_step, 5.0);
        assert_eq!(config.viewport, ViewportConfig::default());
    }

    #[test]
    fn unreadable_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_engine_config(&dir.path().join("missing.toml"));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[viewport\nwidth = ").unwrap();
        assert!(try_load_engine_config(file.path()).is_err());
        assert_eq!(load_engine_config(file.path()), EngineConfig::default());
    }

    #[test]
    fn grid_and_camera_settings_follow_config() {
        let mut config = EngineConfig::default();
        config.viewport.width = 640;
        config.viewport.height = 480;
        config.camera.max_zoom = 2.0;
        config.camera.follow_smoothing = 8.0;
        let settings = config.camera_settings();
        assert_eq!(settings.viewport, Vec2::new(640.0, 480.0));
        assert_eq!(settings.max_zoom, 2.0);
        assert_eq!(settings.follow_smoothing, 8.0);

        let grid = config.navigation.grid_config(42.0);
        assert_eq!(grid.cell_size, 10);
        assert_eq!(grid.effective_radius(), 42.0);
    }
}
