//! Loader utilities for building a [`LoadedGame`] from serialized data.
//!
//! Game content is loaded from `world.ron` (a `WorldDef`), while engine tuning
//! stays TOML-backed in `engine.toml`.

pub mod worlddef;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use glam::Vec2;
use log::info;

use crystal_data::WorldDef;

use crate::camera::CameraManager;
use crate::config::{EngineConfig, load_engine_config};
use crate::context::GameContext;
use crate::loader::worlddef::{build_scenes, load_worlddef};
use crate::navigation::{NavigationGrid, clearance_radius};
use crate::preflight::{PreflightCheck, ValidationResult};
use crate::scene::Scene;

pub const WORLD_FILE: &str = "world.ron";
pub const ENGINE_CONFIG_FILE: &str = "engine.toml";

/// Everything read from a data directory.
#[derive(Debug, Clone)]
pub struct LoadedGame {
    pub data_dir: PathBuf,
    pub world: WorldDef,
    pub scenes: Vec<Scene>,
    pub config: EngineConfig,
    pub context: GameContext,
}

/// Load the game found in `data_dir`.
///
/// Content is not validated here beyond parsing; run [`LoadedGame::preflight`]
/// for that.
///
/// # Errors
/// Errors bubble up from file IO and RON deserialization of the world file.
/// A missing or broken `engine.toml` only logs a warning.
pub fn load_game(data_dir: &Path, debug_mode: bool) -> Result<LoadedGame> {
    let world = load_worlddef(&data_dir.join(WORLD_FILE)).context("while loading worlddef from file")?;
    let config = load_engine_config(&data_dir.join(ENGINE_CONFIG_FILE));
    let scenes = build_scenes(&world);
    let context = GameContext::from_game(&world.game, debug_mode);
    info!("\"{}\" loaded from '{}'", world.game.title, data_dir.display());
    info!("{} scenes added to game", scenes.len());
    info!("{} variables added to game context", context.len());

    Ok(LoadedGame {
        data_dir: data_dir.to_path_buf(),
        world,
        scenes,
        config,
        context,
    })
}

impl LoadedGame {
    pub fn scene(&self, id: &str) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    pub fn start_scene(&self) -> Option<&Scene> {
        self.scene(&self.world.game.start_scene)
    }

    pub fn preflight(&self) -> ValidationResult {
        PreflightCheck::with_scenes(&self.world, &self.scenes, &self.config, &self.context).run()
    }

    /// Navigation grid for the player walking `scene_id`.
    ///
    /// # Errors
    /// Unknown scene ids and grid build failures.
    pub fn player_grid(&self, scene_id: &str) -> Result<NavigationGrid> {
        let scene = self
            .scene(scene_id)
            .ok_or_else(|| anyhow!("no scene with id '{scene_id}'"))?;
        let player = &self.world.game.player;
        let radius = clearance_radius(Vec2::new(player.size.x, player.size.y), player.scale);
        let grid = scene
            .navigation_grid(&self.config.navigation.grid_config(radius))
            .with_context(|| format!("building navigation grid for scene '{scene_id}'"))?;
        Ok(grid)
    }

    /// Camera manager bounded by the start scene and centered on the player.
    ///
    /// # Errors
    /// Fails when the start scene is unknown.
    pub fn camera_manager(&self) -> Result<CameraManager> {
        let Some(scene) = self.start_scene() else {
            bail!("start scene '{}' does not exist", self.world.game.start_scene);
        };
        let mut cameras = CameraManager::new(self.config.camera_settings());
        cameras.set_scene_bounds(scene.width, scene.height);
        let focus = self
            .world
            .game
            .player
            .start_position
            .map_or_else(|| scene.bounds().center(), crate::geometry::to_vec2);
        cameras.center_on(focus);
        Ok(cameras)
    }
}
