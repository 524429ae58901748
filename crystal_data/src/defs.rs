use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::GameValue;

/// Stable identifier used across WorldDef references.
pub type Id = String;

/// Logical scene size used when a scene does not declare its own dimensions.
pub const DEFAULT_LOGICAL_WIDTH: i32 = 1024;
pub const DEFAULT_LOGICAL_HEIGHT: i32 = 768;

/// Top-level game data loaded by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WorldDef {
    pub game: GameDef,
    #[serde(default)]
    pub scenes: Vec<SceneDef>,
}

impl WorldDef {
    /// Look up a scene definition by id.
    pub fn scene(&self, id: &str) -> Option<&SceneDef> {
        self.scenes.iter().find(|scene| scene.id == id)
    }
}

/// Game-level metadata and startup configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameDef {
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub version: String,
    pub start_scene: Id,
    #[serde(default)]
    pub player: PlayerDef,
    /// Initial values of game variables and flags.
    #[serde(default)]
    pub variables: BTreeMap<String, GameValue>,
}

/// Player character placement and sprite sizing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerDef {
    #[serde(default)]
    pub name: String,
    /// Spawn point in the start scene. The spawn check is skipped when absent.
    #[serde(default)]
    pub start_position: Option<PointDef>,
    #[serde(default = "default_sprite_size")]
    pub size: SizeDef,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

impl Default for PlayerDef {
    fn default() -> Self {
        Self {
            name: String::new(),
            start_position: None,
            size: default_sprite_size(),
            scale: default_scale(),
        }
    }
}

/// A point in scene (world) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PointDef {
    pub x: f32,
    pub y: f32,
}

impl PointDef {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Sprite dimensions in pixels before scaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeDef {
    pub x: f32,
    pub y: f32,
}

impl Default for SizeDef {
    fn default() -> Self {
        default_sprite_size()
    }
}

/// A single scene with its geometry.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SceneDef {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub logical_width: Option<i32>,
    #[serde(default)]
    pub logical_height: Option<i32>,
    #[serde(default)]
    pub walkable_regions: Vec<WalkableRegionDef>,
    #[serde(default)]
    pub hotspots: Vec<HotspotDef>,
    #[serde(default)]
    pub exits: Vec<ExitDef>,
    #[serde(default)]
    pub characters: Vec<CharacterDef>,
}

impl SceneDef {
    /// Declared logical size, falling back to the default resolution per axis.
    pub fn logical_size(&self) -> (i32, i32) {
        (
            self.logical_width.unwrap_or(DEFAULT_LOGICAL_WIDTH),
            self.logical_height.unwrap_or(DEFAULT_LOGICAL_HEIGHT),
        )
    }
}

/// Polygon tagged walkable or blocked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkableRegionDef {
    pub name: String,
    #[serde(default = "default_true")]
    pub walkable: bool,
    pub vertices: Vec<PointDef>,
}

/// Interactive area of a scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HotspotDef {
    pub name: String,
    pub shape: ShapeDef,
}

/// Hotspot outline, either an axis-aligned rectangle or a polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeDef {
    Rect { x: f32, y: f32, width: f32, height: f32 },
    Polygon { vertices: Vec<PointDef> },
}

impl ShapeDef {
    /// Outline vertices in order; rectangles yield their four corners clockwise from top-left.
    pub fn vertices(&self) -> Vec<PointDef> {
        match self {
            ShapeDef::Rect { x, y, width, height } => vec![
                PointDef::new(*x, *y),
                PointDef::new(x + width, *y),
                PointDef::new(x + width, y + height),
                PointDef::new(*x, y + height),
            ],
            ShapeDef::Polygon { vertices } => vertices.clone(),
        }
    }
}

/// Scene exit zone leading to another scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitDef {
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub target_scene: Id,
    /// Where the player appears in the target scene.
    #[serde(default)]
    pub spawn_position: Option<PointDef>,
}

impl ExitDef {
    pub fn corners(&self) -> [PointDef; 4] {
        [
            PointDef::new(self.x, self.y),
            PointDef::new(self.x + self.width, self.y),
            PointDef::new(self.x + self.width, self.y + self.height),
            PointDef::new(self.x, self.y + self.height),
        ]
    }
}

/// Non-player character placed in a scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterDef {
    pub name: String,
    pub position: PointDef,
    #[serde(default)]
    pub size: Option<SizeDef>,
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_true() -> bool {
    true
}

fn default_scale() -> f32 {
    1.0
}

fn default_sprite_size() -> SizeDef {
    SizeDef { x: 56.0, y: 56.0 }
}
