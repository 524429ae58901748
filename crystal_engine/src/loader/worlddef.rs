//! WorldDef loader and conversion helpers.
//!
//! Converts the serialized `WorldDef` data model into runtime scenes.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crystal_data::WorldDef;

use crate::scene::Scene;

/// Load a `WorldDef` from a RON file.
pub fn load_worlddef(path: &Path) -> Result<WorldDef> {
    let text = fs::read_to_string(path).with_context(|| format!("reading worlddef from '{}'", path.display()))?;
    parse_worlddef(&text).with_context(|| format!("parsing worlddef RON from '{}'", path.display()))
}

/// Parse `WorldDef` RON text.
pub fn parse_worlddef(text: &str) -> Result<WorldDef> {
    Ok(ron::from_str(text)?)
}

/// Build the runtime form of every scene, in definition order.
pub fn build_scenes(def: &WorldDef) -> Vec<Scene> {
    let scenes: Vec<Scene> = def.scenes.iter().map(Scene::from_def).collect();
    info!("{} scenes built from worlddef", scenes.len());
    scenes
}
