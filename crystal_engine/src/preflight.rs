//! Static checks run once over the loaded game before the frame loop starts.
//!
//! Every check runs on every pass and appends to a shared [`ValidationResult`],
//! so one run reports the complete set of problems. Content problems never
//! abort the pass: they become errors (which fail the run), warnings, or info
//! lines. [`PreflightCheck::run_strict`] turns a failed run into a
//! [`PreflightError`] for callers that want to stop.

pub mod coordinates;
pub mod reachability;
pub mod spawn;

use std::borrow::Cow;

use glam::Vec2;
use log::{debug, info, warn};
use thiserror::Error;

use crystal_data::{WorldDef, validate_world};

use crate::config::EngineConfig;
use crate::context::GameContext;
use crate::navigation::clearance_radius;
use crate::scene::Scene;

pub use coordinates::SceneCoordinateValidator;
pub use reachability::unreachable_scenes;
pub use spawn::{SpawnCheck, suggest_position};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PreflightError {
    #[error("preflight failed with {} error(s): {}", .errors.len(), .errors.join("; "))]
    Failed { errors: Vec<String>, warnings: Vec<String> },
}

/// Findings of a preflight pass. Passed iff there are no errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
    info: Vec<String>,
}

impl ValidationResult {
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn info(&self) -> &[String] {
        &self.info
    }

    pub(crate) fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub(crate) fn warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub(crate) fn note(&mut self, message: impl Into<String>) {
        self.info.push(message.into());
    }

    pub(crate) fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.info.extend(other.info);
    }
}

/// Whole-game preflight over a world definition.
pub struct PreflightCheck<'a> {
    world: &'a WorldDef,
    scenes: Cow<'a, [Scene]>,
    config: &'a EngineConfig,
    context: &'a GameContext,
}

impl<'a> PreflightCheck<'a> {
    /// Check `world`, building its runtime scenes first.
    pub fn new(world: &'a WorldDef, config: &'a EngineConfig, context: &'a GameContext) -> Self {
        let scenes: Vec<Scene> = world.scenes.iter().map(Scene::from_def).collect();
        Self {
            world,
            scenes: Cow::Owned(scenes),
            config,
            context,
        }
    }

    /// Check `world` against scenes already built from it, in definition order.
    pub fn with_scenes(
        world: &'a WorldDef,
        scenes: &'a [Scene],
        config: &'a EngineConfig,
        context: &'a GameContext,
    ) -> Self {
        Self {
            world,
            scenes: Cow::Borrowed(scenes),
            config,
            context,
        }
    }

    /// Run every check and collect the findings.
    pub fn run(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        for err in validate_world(self.world) {
            result.error(capitalize(&err.to_string()));
        }

        let scenes: &[Scene] = &self.scenes;
        let validator = SceneCoordinateValidator::new(self.config);
        for (def, scene) in self.world.scenes.iter().zip(scenes) {
            result.merge(validator.validate(def, scene));
        }

        if let Some(start) = self.world.scene(&self.world.game.start_scene) {
            for scene_id in unreachable_scenes(self.world) {
                result.warning(format!(
                    "Scene '{scene_id}' is not reachable from start scene '{}'",
                    start.id
                ));
            }
        }

        let spawns = SpawnCheck::new(self.world, scenes, self.config);
        result.merge(spawns.run());

        if self.context.debug_mode {
            self.grid_statistics(scenes, &mut result);
        }

        result.note(format!("✓ {} scenes validated", self.world.scenes.len()));
        self.log_summary(&result);
        result
    }

    /// Like [`PreflightCheck::run`], but any error fails the call.
    ///
    /// # Errors
    /// [`PreflightError::Failed`] carrying every error and warning when the run did not pass.
    pub fn run_strict(&self) -> Result<ValidationResult, PreflightError> {
        let result = self.run();
        if result.passed() {
            Ok(result)
        } else {
            Err(PreflightError::Failed {
                errors: result.errors,
                warnings: result.warnings,
            })
        }
    }

    fn grid_statistics(&self, scenes: &[Scene], result: &mut ValidationResult) {
        let player = &self.world.game.player;
        let radius = clearance_radius(Vec2::new(player.size.x, player.size.y), player.scale);
        let grid_config = self.config.navigation.grid_config(radius);
        for scene in scenes {
            if coordinates::grid_cells(scene.width, scene.height, grid_config.cell_size)
                > self.config.navigation.max_grid_cells
            {
                continue;
            }
            match scene.navigation_grid(&grid_config) {
                Ok(grid) => result.note(format!(
                    "Scene '{}': navigation grid {}x{}, {} of {} cells walkable",
                    scene.id,
                    grid.width(),
                    grid.height(),
                    grid.walkable_count(),
                    grid.cell_count()
                )),
                Err(e) => debug!("no navigation grid for scene '{}': {e}", scene.id),
            }
        }
    }

    fn log_summary(&self, result: &ValidationResult) {
        if result.passed() {
            info!(
                "preflight passed: {} scene(s), {} warning(s)",
                self.world.scenes.len(),
                result.warnings.len()
            );
        } else {
            warn!(
                "preflight failed: {} error(s), {} warning(s)",
                result.errors.len(),
                result.warnings.len()
            );
        }
    }
}

/// `(x, y)` rounded to whole pixels.
pub(crate) fn fmt_point(p: Vec2) -> String {
    format!("({:.0}, {:.0})", p.x, p.y)
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crystal_data::{GameDef, PointDef, SceneDef, WalkableRegionDef};

    fn floor() -> WalkableRegionDef {
        WalkableRegionDef {
            name: "floor".into(),
            walkable: true,
            vertices: vec![
                PointDef::new(100.0, 350.0),
                PointDef::new(900.0, 350.0),
                PointDef::new(900.0, 700.0),
                PointDef::new(100.0, 700.0),
            ],
        }
    }

    fn world() -> WorldDef {
        let mut game = GameDef {
            title: "Test".into(),
            start_scene: "office".into(),
            ..GameDef::default()
        };
        game.player.start_position = Some(PointDef::new(300.0, 450.0));
        WorldDef {
            game,
            scenes: vec![SceneDef {
                id: "office".into(),
                logical_width: Some(1024),
                logical_height: Some(768),
                walkable_regions: vec![floor()],
                ..SceneDef::default()
            }],
        }
    }

    #[test]
    fn clean_world_passes_with_summary() {
        let world = world();
        let config = EngineConfig::default();
        let context = GameContext::default();
        let result = PreflightCheck::new(&world, &config, &context).run();
        assert!(result.passed(), "{:?}", result.errors());
        assert!(result.info().iter().any(|line| line == "✓ 1 scenes validated"));
        assert!(PreflightCheck::new(&world, &config, &context).run_strict().is_ok());
    }

    #[test]
    fn structural_errors_fail_strict_runs() {
        let mut world = world();
        world.game.start_scene = "lobby".into();
        let config = EngineConfig::default();
        let context = GameContext::default();
        let err = PreflightCheck::new(&world, &config, &context)
            .run_strict()
            .unwrap_err();
        let PreflightError::Failed { errors, .. } = &err;
        assert!(errors.iter().any(|e| e.starts_with("Missing scene 'lobby'")));
        assert!(err.to_string().starts_with("preflight failed with 1 error(s)"));
    }

    #[test]
    fn debug_mode_reports_grid_statistics() {
        let world = world();
        let config = EngineConfig::default();
        let context = GameContext::new(true);
        let result = PreflightCheck::new(&world, &config, &context).run();
        assert!(
            result
                .info()
                .iter()
                .any(|line| line.starts_with("Scene 'office': navigation grid 103x77"))
        );
    }

    #[test]
    fn borrowed_scenes_give_the_same_findings() {
        let mut world = world();
        world.scenes[0].walkable_regions.clear();
        let scenes: Vec<Scene> = world.scenes.iter().map(Scene::from_def).collect();
        let config = EngineConfig::default();
        let context = GameContext::default();
        let borrowed = PreflightCheck::with_scenes(&world, &scenes, &config, &context).run();
        assert_eq!(borrowed, PreflightCheck::new(&world, &config, &context).run());
        assert!(borrowed.warnings().iter().any(|w| w.contains("no walkable regions")));
    }

    #[test]
    fn points_are_rounded_for_messages() {
        assert_eq!(fmt_point(Vec2::new(299.6, 400.2)), "(300, 400)");
    }
}
