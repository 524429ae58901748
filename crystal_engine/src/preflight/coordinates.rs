//! Per-scene geometry checks: dimensions, vertex bounds, polygon shape,
//! hotspot overlap, character placement and grid size.

use crystal_data::{DEFAULT_LOGICAL_HEIGHT, DEFAULT_LOGICAL_WIDTH, PointDef, SceneDef};

use crate::config::EngineConfig;
use crate::geometry::{Polygon, polygons_overlap, to_vec2};
use crate::scene::Scene;

use super::{ValidationResult, fmt_point};

/// Number of cells a grid over a `width` x `height` scene would have.
pub(crate) fn grid_cells(width: f32, height: f32, cell_size: u32) -> usize {
    if cell_size == 0 || width <= 0.0 || height <= 0.0 {
        return 0;
    }
    let cs = cell_size as f32;
    (width / cs).ceil() as usize * (height / cs).ceil() as usize
}

pub struct SceneCoordinateValidator<'a> {
    config: &'a EngineConfig,
}

impl<'a> SceneCoordinateValidator<'a> {
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Check one scene. `scene` must be the runtime form of `def`.
    pub fn validate(&self, def: &SceneDef, scene: &Scene) -> ValidationResult {
        let mut result = ValidationResult::default();
        self.check_dimensions(def, &mut result);
        check_vertex_bounds(def, scene, &mut result);
        check_polygon_shapes(def, &mut result);
        check_hotspot_overlap(scene, &mut result);
        check_character_placement(scene, &mut result);
        if scene.has_implicit_walkable() {
            result.warning(format!(
                "Scene '{}' defines no walkable regions; the whole scene is treated as walkable",
                def.id
            ));
        }
        self.check_grid_size(scene, &mut result);
        result
    }

    fn check_dimensions(&self, def: &SceneDef, result: &mut ValidationResult) {
        if def.logical_width.is_none() || def.logical_height.is_none() {
            let (w, h) = def.logical_size();
            result.note(format!(
                "Scene '{}' has no logical size; using {w}x{h} (default {DEFAULT_LOGICAL_WIDTH}x{DEFAULT_LOGICAL_HEIGHT})",
                def.id
            ));
        }
        let (w, h) = def.logical_size();
        // non-positive sizes are reported by the structural pass
        if w <= 0 || h <= 0 {
            return;
        }
        let viewport = self.config.viewport;
        if w.unsigned_abs() < viewport.width || h.unsigned_abs() < viewport.height {
            result.warning(format!(
                "Scene '{}' logical size {w}x{h} is smaller than the {}x{} viewport",
                def.id, viewport.width, viewport.height
            ));
        }
    }

    fn check_grid_size(&self, scene: &Scene, result: &mut ValidationResult) {
        let nav = &self.config.navigation;
        let cells = grid_cells(scene.width, scene.height, nav.cell_size);
        if cells > nav.max_grid_cells {
            result.warning(format!(
                "Scene '{}' navigation grid would have {cells} cells (limit {}); consider a larger cell size",
                scene.id, nav.max_grid_cells
            ));
        }
    }
}

fn check_vertex_bounds(def: &SceneDef, scene: &Scene, result: &mut ValidationResult) {
    let bounds = scene.bounds();
    let mut report = |entity: String, vertices: &[PointDef]| {
        for (index, vertex) in vertices.iter().enumerate() {
            let p = to_vec2(*vertex);
            if !bounds.contains(p) {
                result.warning(format!(
                    "Scene '{}' {entity} vertex {index} {} is outside the scene bounds {}x{}",
                    def.id,
                    fmt_point(p),
                    scene.width,
                    scene.height
                ));
            }
        }
    };

    for region in &def.walkable_regions {
        report(format!("walkable region '{}'", region.name), &region.vertices);
    }
    for hotspot in &def.hotspots {
        report(format!("hotspot '{}'", hotspot.name), &hotspot.shape.vertices());
    }
    for exit in &def.exits {
        report(format!("exit '{}'", exit.name), &exit.corners());
    }
}

fn check_polygon_shapes(def: &SceneDef, result: &mut ValidationResult) {
    let regions = def
        .walkable_regions
        .iter()
        .map(|r| (format!("walkable region '{}'", r.name), Polygon::from_points(&r.vertices)));
    let hotspots = def
        .hotspots
        .iter()
        .map(|h| (format!("hotspot '{}'", h.name), Polygon::from_points(&h.shape.vertices())));

    for (entity, polygon) in regions.chain(hotspots) {
        // short outlines are reported by the structural pass
        if !polygon.is_valid() {
            continue;
        }
        if polygon.is_self_intersecting() {
            result.error(format!("Scene '{}' {entity} is self-intersecting", def.id));
        } else if polygon.is_degenerate() {
            result.error(format!("Scene '{}' {entity} has zero area", def.id));
        }
    }
}

fn check_hotspot_overlap(scene: &Scene, result: &mut ValidationResult) {
    let hotspots: Vec<_> = scene.hotspots.iter().filter(|h| h.polygon.is_valid()).collect();
    for (i, a) in hotspots.iter().enumerate() {
        for b in &hotspots[i + 1..] {
            if polygons_overlap(&a.polygon, &b.polygon) {
                result.warning(format!(
                    "Scene '{}' hotspots '{}' and '{}' overlap",
                    scene.id, a.name, b.name
                ));
            }
        }
    }
}

// A character's footprint is the circle of its clearance radius.
fn check_character_placement(scene: &Scene, result: &mut ValidationResult) {
    for character in &scene.characters {
        for hotspot in scene.hotspots.iter().filter(|h| h.polygon.is_valid()) {
            let bounds = hotspot.polygon.bounds();
            if bounds.contains(character.position) || bounds.distance_to(character.position) < character.radius {
                result.warning(format!(
                    "Scene '{}' character '{}' at {} may be blocked by hotspot '{}'",
                    scene.id,
                    character.name,
                    fmt_point(character.position),
                    hotspot.name
                ));
            }
        }
    }
}
