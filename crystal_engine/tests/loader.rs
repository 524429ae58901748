use std::fs;
use std::path::{Path, PathBuf};

use crystal_engine as ce;
use glam::Vec2;

use ce::loader::{ENGINE_CONFIG_FILE, WORLD_FILE};
use ce::{EngineConfig, GameValue, load_game};

const WORLD: &str = r#"(
    game: (
        title: "Fixture",
        start_scene: "cellar",
        player: (start_position: Some((x: 200.0, y: 300.0))),
        variables: { "torch": true, "steps": 12, "mood": "grim" },
    ),
    scenes: [
        (
            id: "cellar",
            logical_width: Some(1280),
            logical_height: Some(800),
            walkable_regions: [
                (name: "ground", vertices: [(x: 50.0, y: 200.0), (x: 1200.0, y: 200.0), (x: 1200.0, y: 700.0), (x: 50.0, y: 700.0)]),
            ],
            exits: [
                (name: "stairs", x: 1150.0, y: 300.0, width: 50.0, height: 100.0, target_scene: "cellar"),
            ],
        ),
    ],
)"#;

fn write_fixture(dir: &Path, engine_toml: Option<&str>) {
    fs::write(dir.join(WORLD_FILE), WORLD).unwrap();
    if let Some(text) = engine_toml {
        fs::write(dir.join(ENGINE_CONFIG_FILE), text).unwrap();
    }
}

#[test]
fn test_load_game_reads_world_and_config() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), Some("[navigation]\ncell_size = 20\n\n[viewport]\nwidth = 1280\nheight = 800\n"));

    let game = load_game(dir.path(), false).unwrap();
    assert_eq!(game.world.game.title, "Fixture");
    assert_eq!(game.config.navigation.cell_size, 20);
    assert_eq!(game.context.get("torch"), Some(&GameValue::Bool(true)));
    assert_eq!(game.context.get("steps"), Some(&GameValue::Int(12)));
    assert!(game.context.flag("mood"));
    assert!(!game.context.debug_mode);

    let grid = game.player_grid("cellar").unwrap();
    assert_eq!((grid.width(), grid.height()), (64, 40));

    let cameras = game.camera_manager().unwrap();
    assert_eq!(cameras.active_camera().view_center(), Vec2::new(640.0, 400.0));

    let result = game.preflight();
    assert!(result.passed(), "{:?}", result.errors());
}

#[test]
fn test_missing_engine_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), None);
    let game = load_game(dir.path(), true).unwrap();
    assert_eq!(game.config, EngineConfig::default());
    assert!(game.context.debug_mode);
}

#[test]
fn test_missing_world_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_game(dir.path(), false).unwrap_err();
    assert!(format!("{err:#}").contains("world.ron"));
}

#[test]
fn test_malformed_world_reports_parse_context() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(WORLD_FILE), "(game: (title: \"oops\"").unwrap();
    let err = load_game(dir.path(), false).unwrap_err();
    assert!(format!("{err:#}").contains("parsing worlddef RON"));
}

#[test]
fn test_unknown_scene_has_no_grid() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture(dir.path(), None);
    let game = load_game(dir.path(), false).unwrap();
    assert!(game.player_grid("attic").is_err());
}

#[test]
fn test_bundled_sample_data_passes_preflight() {
    let data_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    let game = load_game(&data_dir, false).unwrap();
    let result = game.preflight();
    assert!(result.passed(), "{:?}", result.errors());
    assert!(result.warnings().is_empty(), "{:?}", result.warnings());
    assert!(
        game.player_grid("office")
            .unwrap()
            .find_path(Vec2::new(300.0, 450.0), Vec2::new(800.0, 500.0))
            .is_some()
    );
}
