//! Spawn point checks for the player start and for exit arrival points.

use glam::Vec2;

use crystal_data::WorldDef;

use crate::config::EngineConfig;
use crate::geometry::{Rect, to_vec2};
use crate::navigation::clearance_radius;
use crate::region::RegionSet;
use crate::scene::Scene;

use super::{ValidationResult, fmt_point};

/// Probe directions for alternative spawn points.
const DIRECTIONS: [(f32, f32); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
];

/// Outcome of placing a character at a point.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Clear,
    /// Inside the named non-walkable region.
    Blocked(String),
    /// Outside every walkable region.
    Outside,
    /// Walkable, but closer than the required clearance to a wall.
    TooClose,
}

pub fn placement(regions: &RegionSet, p: Vec2, required_clearance: f32) -> Placement {
    if let Some(region) = regions.blocking_region_at(p) {
        return Placement::Blocked(region.name.clone());
    }
    if !regions.is_walkable(p) {
        return Placement::Outside;
    }
    if regions.has_clearance(p, required_clearance) {
        Placement::Clear
    } else {
        Placement::TooClose
    }
}

/// First point near `origin` with the required clearance.
///
/// Candidates lie in eight directions at distances `step`, `2 * step`, ... up
/// to `max_distance`, are rounded to whole pixels and must stay inside `bounds`.
pub fn suggest_position(
    regions: &RegionSet,
    bounds: Rect,
    origin: Vec2,
    required_clearance: f32,
    step: f32,
    max_distance: f32,
) -> Option<Vec2> {
    let step = step.max(1.0);
    let mut distance = step;
    while distance <= max_distance {
        for (dx, dy) in DIRECTIONS {
            let candidate = (origin + Vec2::new(dx, dy).normalize() * distance).round();
            if bounds.contains(candidate) && regions.has_clearance(candidate, required_clearance) {
                return Some(candidate);
            }
        }
        distance += step;
    }
    None
}

/// Spawn checks across the whole world.
pub struct SpawnCheck<'a> {
    world: &'a WorldDef,
    scenes: &'a [Scene],
    config: &'a EngineConfig,
}

impl<'a> SpawnCheck<'a> {
    pub fn new(world: &'a WorldDef, scenes: &'a [Scene], config: &'a EngineConfig) -> Self {
        Self { world, scenes, config }
    }

    /// Player clearance radius, floored at the configured minimum.
    pub fn player_radius(&self) -> f32 {
        let player = &self.world.game.player;
        clearance_radius(Vec2::new(player.size.x, player.size.y), player.scale)
            .max(self.config.navigation.min_clearance_radius)
    }

    /// Clearance a spawn point must keep from non-walkable areas.
    pub fn required_clearance(&self) -> f32 {
        self.player_radius() + self.config.preflight.spawn_margin
    }

    pub fn run(&self) -> ValidationResult {
        let mut result = ValidationResult::default();
        self.check_player_start(&mut result);
        self.check_exit_spawns(&mut result);
        result
    }

    fn scene(&self, id: &str) -> Option<&'a Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }

    fn check_player_start(&self, result: &mut ValidationResult) {
        // an unknown start scene is reported by the structural pass
        let Some(scene) = self.scene(&self.world.game.start_scene) else {
            return;
        };
        let Some(start) = self.world.game.player.start_position.map(to_vec2) else {
            result.note(format!(
                "Player start position not set; spawn check for scene '{}' skipped",
                scene.id
            ));
            return;
        };

        let required = self.required_clearance();
        let at = fmt_point(start);
        match placement(&scene.regions, start, required) {
            Placement::Clear => result.note(format!(
                "✓ Player start position {at} is in a walkable area of scene '{}'",
                scene.id
            )),
            Placement::Blocked(region) => result.error(format!(
                "Player start position {at} is in non-walkable area '{region}'{}",
                self.suggestion(scene, start, required)
            )),
            Placement::Outside => result.error(format!(
                "Player start position {at} is outside every walkable area of scene '{}'{}",
                scene.id,
                self.suggestion(scene, start, required)
            )),
            Placement::TooClose => result.error(format!(
                "Player start position {at} is too close to non-walkable areas (needs {required:.0}px clearance){}",
                self.suggestion(scene, start, required)
            )),
        }
    }

    fn check_exit_spawns(&self, result: &mut ValidationResult) {
        let required = self.required_clearance();
        for scene in self.scenes {
            for exit in &scene.exits {
                let (Some(spawn), Some(target)) = (exit.spawn_position, self.scene(&exit.target_scene)) else {
                    continue;
                };
                let prefix = format!(
                    "Exit '{}' in scene '{}' spawns the player at {} in scene '{}'",
                    exit.name,
                    scene.id,
                    fmt_point(spawn),
                    target.id
                );
                match placement(&target.regions, spawn, required) {
                    Placement::Clear => {},
                    Placement::Blocked(region) => result.warning(format!(
                        "{prefix}, inside non-walkable area '{region}'{}",
                        self.suggestion(target, spawn, required)
                    )),
                    Placement::Outside => result.warning(format!(
                        "{prefix}, outside every walkable area{}",
                        self.suggestion(target, spawn, required)
                    )),
                    Placement::TooClose => result.warning(format!(
                        "{prefix}, too close to non-walkable areas (needs {required:.0}px clearance){}",
                        self.suggestion(target, spawn, required)
                    )),
                }
            }
        }
    }

    fn suggestion(&self, scene: &Scene, origin: Vec2, required: f32) -> String {
        let preflight = &self.config.preflight;
        match suggest_position(
            &scene.regions,
            scene.bounds(),
            origin,
            required,
            preflight.suggestion_step,
            preflight.suggestion_max_distance,
        ) {
            Some(p) => format!("; try {}", fmt_point(p)),
            None => format!(
                "; no clear position found within {:.0}px",
                preflight.suggestion_max_distance
            ),
        }
    }
}
