use crystal_engine as ce;
use glam::Vec2;

use ce::{GridConfig, NavigationGrid, Polygon, Rect, RegionSet, WalkableRegion, clearance_radius};

fn rect(name: &str, walkable: bool, x0: f32, y0: f32, x1: f32, y1: f32) -> WalkableRegion {
    WalkableRegion::new(
        name,
        walkable,
        Polygon::from_rect(&Rect::new(Vec2::new(x0, y0), Vec2::new(x1, y1))),
    )
}

fn office() -> RegionSet {
    RegionSet::new(vec![
        rect("floor", true, 100.0, 350.0, 900.0, 700.0),
        rect("desk", false, 380.0, 380.0, 620.0, 550.0),
    ])
}

fn player_config() -> GridConfig {
    GridConfig {
        clearance_radius: clearance_radius(Vec2::new(56.0, 56.0), 1.0),
        ..GridConfig::default()
    }
}

fn office_grid() -> NavigationGrid {
    NavigationGrid::build(&office(), 1024.0, 768.0, &player_config()).unwrap()
}

/// Points along each segment, skipping exact cell corners.
fn samples(path: &[Vec2], cell: f32) -> Vec<Vec2> {
    let mut points = Vec::new();
    for pair in path.windows(2) {
        for k in 0..16 {
            let t = (k as f32 + 0.5) / 16.0;
            let p = pair[0].lerp(pair[1], t);
            let on_corner = (p.x / cell - (p.x / cell).round()).abs() < 1e-3
                && (p.y / cell - (p.y / cell).round()).abs() < 1e-3;
            if !on_corner {
                points.push(p);
            }
        }
    }
    points
}

#[test]
fn test_path_walks_around_blocked_region() {
    let grid = office_grid();
    let regions = office();
    let goal = Vec2::new(800.0, 450.0);
    let path = grid.find_path(Vec2::new(200.0, 450.0), goal).expect("path");

    assert!(path.len() >= 3, "desk sits between start and goal: {path:?}");
    assert_eq!(path.first().copied(), Some(Vec2::new(205.0, 455.0)));
    assert_eq!(path.last().copied(), Some(goal));
    for p in samples(&path, 10.0) {
        assert!(grid.is_point_walkable(p), "{p} is not on a walkable cell");
        assert!(regions.blocking_region_at(p).is_none(), "{p} crosses the desk");
    }
}

#[test]
fn test_open_floor_gives_direct_path() {
    let grid = office_grid();
    let goal = Vec2::new(850.0, 650.0);
    let path = grid.find_path(Vec2::new(150.0, 650.0), goal).unwrap();
    assert_eq!(path, vec![Vec2::new(155.0, 655.0), goal]);
}

#[test]
fn test_blocked_goal_uses_nearest_walkable_cell() {
    let grid = office_grid();
    // just inside the desk's bottom edge
    let path = grid.find_path(Vec2::new(200.0, 450.0), Vec2::new(500.0, 540.0)).unwrap();
    assert_eq!(path.last().copied(), Some(Vec2::new(505.0, 585.0)));
}

#[test]
fn test_blocked_goal_without_nearby_cells_has_no_path() {
    let grid = office_grid();
    // middle of the desk, more than ten cells from any cell with clearance
    assert_eq!(grid.find_path(Vec2::new(200.0, 450.0), Vec2::new(500.0, 400.0)), None);
}

#[test]
fn test_points_off_grid_have_no_path() {
    let grid = office_grid();
    assert_eq!(grid.find_path(Vec2::new(-5.0, 400.0), Vec2::new(200.0, 450.0)), None);
    assert_eq!(grid.find_path(Vec2::new(200.0, 450.0), Vec2::new(2000.0, 450.0)), None);
}

#[test]
fn test_unreachable_goal_stops_at_closest_cell() {
    let regions = RegionSet::new(vec![
        rect("west", true, 0.0, 0.0, 200.0, 200.0),
        rect("east", true, 400.0, 0.0, 600.0, 200.0),
    ]);
    let grid = NavigationGrid::build(&regions, 600.0, 200.0, &GridConfig::default()).unwrap();
    let goal = Vec2::new(500.0, 105.0);
    let path = grid.find_path(Vec2::new(100.0, 105.0), goal).unwrap();
    let last = *path.last().unwrap();
    assert_ne!(last, goal);
    assert_eq!(last, Vec2::new(185.0, 105.0));
}

#[test]
fn test_search_is_deterministic() {
    let grid = office_grid();
    let a = grid.find_path(Vec2::new(150.0, 400.0), Vec2::new(700.0, 600.0));
    let b = grid.find_path(Vec2::new(150.0, 400.0), Vec2::new(700.0, 600.0));
    assert!(a.is_some());
    assert_eq!(a, b);
    assert_eq!(office_grid(), grid);
}

#[test]
fn test_grid_respects_clearance_floor() {
    let tiny = GridConfig {
        clearance_radius: 1.0,
        ..GridConfig::default()
    };
    let grid = NavigationGrid::build(&office(), 1024.0, 768.0, &tiny).unwrap();
    // 5px from the floor's left edge: inside the region but under the 8px floor
    assert!(!grid.is_point_walkable(Vec2::new(105.0, 500.0)));
    assert!(grid.is_point_walkable(Vec2::new(115.0, 500.0)));
}
