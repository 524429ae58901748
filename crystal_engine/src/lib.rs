#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

pub const CRYSTAL_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod camera;
pub mod config;
pub mod context;
pub mod data_paths;
pub mod geometry;
pub mod loader;
pub mod navigation;
pub mod node;
pub mod preflight;
pub mod region;
pub mod scene;

// Re-exports for convenience
pub use camera::{Camera, CameraEffect, CameraError, CameraManager, CameraSettings, EffectType};
pub use config::{EngineConfig, load_engine_config};
pub use context::GameContext;
pub use crystal_data::{GameValue, Id, WorldDef};
pub use geometry::{Polygon, Rect, polygons_overlap};
pub use loader::{LoadedGame, load_game};
pub use navigation::{GridConfig, NavigationError, NavigationGrid, clearance_radius};
pub use node::Node;
pub use preflight::{PreflightCheck, PreflightError, SceneCoordinateValidator, ValidationResult};
pub use region::{RegionSet, WalkableRegion};
pub use scene::Scene;
