use std::collections::HashSet;
use std::fmt;

use crate::*;

/// Validation error for malformed or missing references in a WorldDef.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: &'static str, id: String },
    MissingReference { kind: &'static str, id: String, context: String },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id '{id}'")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} '{id}' ({context})")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate cross-references and basic invariants in a WorldDef.
///
/// Geometry beyond vertex counts and sizes (bounds, overlap, clearance) is left
/// to the engine's preflight pass.
///
/// ```
/// use crystal_data::{GameDef, SceneDef, WorldDef, validate_world};
///
/// let world = WorldDef {
///     game: GameDef {
///         title: "Demo".into(),
///         start_scene: "office".into(),
///         ..GameDef::default()
///     },
///     scenes: vec![SceneDef {
///         id: "office".into(),
///         ..SceneDef::default()
///     }],
/// };
/// assert!(validate_world(&world).is_empty());
/// ```
pub fn validate_world(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut scenes = HashSet::new();
    track_ids(
        "scene",
        world.scenes.iter().map(|s| s.id.as_str()),
        &mut scenes,
        &mut errors,
    );

    if world.game.start_scene.trim().is_empty() {
        errors.push(ValidationError::InvalidValue {
            context: "game start scene missing".to_string(),
        });
    } else {
        check_ref(
            "scene",
            &world.game.start_scene,
            &scenes,
            "game start scene".to_string(),
            &mut errors,
        );
    }

    validate_sprite(
        Some(world.game.player.size),
        world.game.player.scale,
        "player",
        &mut errors,
    );

    for scene in &world.scenes {
        validate_scene(scene, &scenes, &mut errors);
    }

    errors
}

fn validate_scene(scene: &SceneDef, scenes: &HashSet<String>, errors: &mut Vec<ValidationError>) {
    // Names only need to be unique within their own scene.
    let mut regions = HashSet::new();
    let mut hotspots = HashSet::new();
    let mut exits = HashSet::new();
    let mut characters = HashSet::new();
    track_ids(
        "walkable region",
        scene.walkable_regions.iter().map(|r| r.name.as_str()),
        &mut regions,
        errors,
    );
    track_ids(
        "hotspot",
        scene.hotspots.iter().map(|h| h.name.as_str()),
        &mut hotspots,
        errors,
    );
    track_ids("exit", scene.exits.iter().map(|e| e.name.as_str()), &mut exits, errors);
    track_ids(
        "character",
        scene.characters.iter().map(|c| c.name.as_str()),
        &mut characters,
        errors,
    );

    for (axis, value) in [("width", scene.logical_width), ("height", scene.logical_height)] {
        if let Some(value) = value
            && value <= 0
        {
            errors.push(ValidationError::InvalidValue {
                context: format!("scene '{}' logical {axis} must be positive ({value})", scene.id),
            });
        }
    }

    for region in &scene.walkable_regions {
        check_vertex_count(
            region.vertices.len(),
            &format!("scene '{}' walkable region '{}'", scene.id, region.name),
            errors,
        );
    }

    for hotspot in &scene.hotspots {
        let context = format!("scene '{}' hotspot '{}'", scene.id, hotspot.name);
        match &hotspot.shape {
            ShapeDef::Rect { width, height, .. } => check_extent(*width, *height, &context, errors),
            ShapeDef::Polygon { vertices } => check_vertex_count(vertices.len(), &context, errors),
        }
    }

    for exit in &scene.exits {
        let context = format!("scene '{}' exit '{}'", scene.id, exit.name);
        check_extent(exit.width, exit.height, &context, errors);
        check_ref("scene", &exit.target_scene, scenes, context, errors);
    }

    for character in &scene.characters {
        validate_sprite(
            character.size,
            character.scale,
            &format!("scene '{}' character '{}'", scene.id, character.name),
            errors,
        );
    }
}

fn validate_sprite(size: Option<SizeDef>, scale: f32, context: &str, errors: &mut Vec<ValidationError>) {
    if scale <= 0.0 || !scale.is_finite() {
        errors.push(ValidationError::InvalidValue {
            context: format!("{context} scale must be positive ({scale})"),
        });
    }
    if let Some(size) = size
        && (size.x <= 0.0 || size.y <= 0.0)
    {
        errors.push(ValidationError::InvalidValue {
            context: format!("{context} size must be positive ({} x {})", size.x, size.y),
        });
    }
}

fn check_vertex_count(count: usize, context: &str, errors: &mut Vec<ValidationError>) {
    if count < 3 {
        errors.push(ValidationError::InvalidValue {
            context: format!("{context} needs at least 3 vertices, found {count}"),
        });
    }
}

fn check_extent(width: f32, height: f32, context: &str, errors: &mut Vec<ValidationError>) {
    if width <= 0.0 || height <= 0.0 {
        errors.push(ValidationError::InvalidValue {
            context: format!("{context} must have positive width and height ({width} x {height})"),
        });
    }
}

fn track_ids<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a str>,
    set: &mut HashSet<String>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if !set.insert(id.to_string()) {
            errors.push(ValidationError::DuplicateId {
                kind,
                id: id.to_string(),
            });
        }
    }
}

fn check_ref(kind: &'static str, id: &str, set: &HashSet<String>, context: String, errors: &mut Vec<ValidationError>) {
    if !set.contains(id) {
        errors.push(ValidationError::MissingReference {
            kind,
            id: id.to_string(),
            context,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x: f32, y: f32, side: f32) -> Vec<PointDef> {
        vec![
            PointDef::new(x, y),
            PointDef::new(x + side, y),
            PointDef::new(x + side, y + side),
            PointDef::new(x, y + side),
        ]
    }

    fn scene(id: &str) -> SceneDef {
        SceneDef {
            id: id.to_string(),
            name: format!("Scene {id}"),
            logical_width: Some(1024),
            logical_height: Some(768),
            walkable_regions: vec![WalkableRegionDef {
                name: "floor".into(),
                walkable: true,
                vertices: square(0.0, 400.0, 300.0),
            }],
            ..SceneDef::default()
        }
    }

    fn exit_to(name: &str, target: &str) -> ExitDef {
        ExitDef {
            name: name.to_string(),
            x: 0.0,
            y: 500.0,
            width: 40.0,
            height: 100.0,
            target_scene: target.to_string(),
            spawn_position: None,
        }
    }

    fn base_world() -> WorldDef {
        WorldDef {
            game: GameDef {
                title: "Demo".into(),
                start_scene: "start".into(),
                ..GameDef::default()
            },
            scenes: vec![scene("start")],
        }
    }

    #[test]
    fn valid_world_has_no_errors() {
        assert!(validate_world(&base_world()).is_empty());
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let mut world = base_world();
        world.scenes = vec![scene("start"), scene("start")];

        let errors = validate_world(&world);
        assert!(
            errors
                .iter()
                .any(|err| matches!(err, ValidationError::DuplicateId { kind, id } if *kind == "scene" && id == "start"))
        );
    }

    #[test]
    fn missing_exit_targets_are_reported() {
        let mut world = base_world();
        world.scenes[0].exits.push(exit_to("door", "cellar"));

        let errors = validate_world(&world);
        assert!(errors.iter().any(|err| matches!(err, ValidationError::MissingReference { kind, id, .. } if *kind == "scene" && id == "cellar")));
    }

    #[test]
    fn missing_start_scene_is_reported() {
        let mut world = base_world();
        world.game.start_scene = "nowhere".into();
        let errors = validate_world(&world);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("game start scene"));
    }

    #[test]
    fn short_polygons_and_bad_sizes_are_invalid() {
        let mut world = base_world();
        world.scenes[0].walkable_regions[0].vertices.truncate(2);
        world.scenes[0].logical_width = Some(0);
        world.game.player.scale = 0.0;

        let errors = validate_world(&world);
        assert_eq!(
            errors
                .iter()
                .filter(|err| matches!(err, ValidationError::InvalidValue { .. }))
                .count(),
            3
        );
    }
}
