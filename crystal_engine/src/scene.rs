//! Runtime scene geometry built from a [`SceneDef`].

use glam::Vec2;
use log::{debug, warn};

use crystal_data::{CharacterDef, ExitDef, HotspotDef, Id, SceneDef};

use crate::geometry::{Polygon, Rect, to_vec2};
use crate::navigation::{GridConfig, NavigationError, NavigationGrid, clearance_radius};
use crate::region::{RegionSet, WalkableRegion};

/// Name given to the walkable region synthesized for scenes that define none.
pub const IMPLICIT_REGION: &str = "scene bounds";

/// Interactive area of a scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Hotspot {
    pub name: String,
    pub polygon: Polygon,
}

impl Hotspot {
    pub fn from_def(def: &HotspotDef) -> Self {
        Self {
            name: def.name.clone(),
            polygon: Polygon::from_points(&def.shape.vertices()),
        }
    }
}

/// Rectangular zone that moves the player to another scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Exit {
    pub name: String,
    pub area: Rect,
    pub target_scene: Id,
    pub spawn_position: Option<Vec2>,
}

impl Exit {
    pub fn from_def(def: &ExitDef) -> Self {
        Self {
            name: def.name.clone(),
            area: Rect::from_xywh(def.x, def.y, def.width, def.height),
            target_scene: def.target_scene.clone(),
            spawn_position: def.spawn_position.map(to_vec2),
        }
    }
}

/// Placed non-player character.
#[derive(Debug, Clone, PartialEq)]
pub struct Character {
    pub name: String,
    pub position: Vec2,
    pub radius: f32,
}

impl Character {
    pub fn from_def(def: &CharacterDef) -> Self {
        let size = def.size.unwrap_or_default();
        Self {
            name: def.name.clone(),
            position: to_vec2(def.position),
            radius: clearance_radius(Vec2::new(size.x, size.y), def.scale),
        }
    }
}

/// A loaded scene: logical bounds, walkable regions, hotspots, exits and characters.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub id: Id,
    pub name: String,
    pub width: f32,
    pub height: f32,
    pub regions: RegionSet,
    pub hotspots: Vec<Hotspot>,
    pub exits: Vec<Exit>,
    pub characters: Vec<Character>,
    implicit_walkable: bool,
}

impl Scene {
    /// Build the runtime scene. Undeclared dimensions fall back to the default
    /// resolution, and a scene with no walkable region becomes walkable across
    /// its whole bounds.
    pub fn from_def(def: &SceneDef) -> Self {
        let (width, height) = def.logical_size();
        let (width, height) = (width as f32, height as f32);
        let mut regions = RegionSet::from_defs(&def.walkable_regions);
        let implicit_walkable = !regions.has_walkable();
        if implicit_walkable {
            warn!("scene '{}' has no walkable regions; treating the whole scene as walkable", def.id);
            let bounds = Rect::from_xywh(0.0, 0.0, width, height);
            regions.push(WalkableRegion::new(IMPLICIT_REGION, true, Polygon::from_rect(&bounds)));
        }

        let scene = Self {
            id: def.id.clone(),
            name: def.name.clone(),
            width,
            height,
            regions,
            hotspots: def.hotspots.iter().map(Hotspot::from_def).collect(),
            exits: def.exits.iter().map(Exit::from_def).collect(),
            characters: def.characters.iter().map(Character::from_def).collect(),
            implicit_walkable,
        };
        debug!(
            "scene '{}': {}x{}, {} regions, {} hotspots, {} exits",
            scene.id,
            scene.width,
            scene.height,
            scene.regions.regions().len(),
            scene.hotspots.len(),
            scene.exits.len()
        );
        scene
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_xywh(0.0, 0.0, self.width, self.height)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// True when the scene defined no walkable region of its own.
    pub fn has_implicit_walkable(&self) -> bool {
        self.implicit_walkable
    }

    pub fn hotspot(&self, name: &str) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.name == name)
    }

    /// First hotspot whose outline contains `p`.
    pub fn hotspot_at(&self, p: Vec2) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.polygon.contains_point(p))
    }

    pub fn exit(&self, name: &str) -> Option<&Exit> {
        self.exits.iter().find(|e| e.name == name)
    }

    /// First exit zone containing `p`.
    pub fn exit_at(&self, p: Vec2) -> Option<&Exit> {
        self.exits.iter().find(|e| e.area.contains(p))
    }

    /// Rasterize the scene's regions for pathfinding.
    ///
    /// # Errors
    /// Propagates [`NavigationError`] from the grid builder.
    pub fn navigation_grid(&self, config: &GridConfig) -> Result<NavigationGrid, NavigationError> {
        NavigationGrid::build(&self.regions, self.width, self.height, config)
    }
}
