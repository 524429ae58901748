//! Walkable regions and the precedence rules between them.
//!
//! A scene lists its regions in order. A point is walkable when it lies inside at
//! least one walkable region and inside no blocked region: blocked regions always
//! win over the walkable regions they overlap, whatever their position in the list.

use glam::Vec2;

use crystal_data::WalkableRegionDef;

use crate::geometry::{Polygon, Rect, point_segment_distance};

/// Longest piece a walkable outline is split into when looking for walls.
const WALL_PIECE_LENGTH: f32 = 2.0;

/// Distance beside an outline piece at which walkability is probed.
const WALL_PROBE_DISTANCE: f32 = 0.5;

/// Named polygon with a walkability flag.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkableRegion {
    pub name: String,
    pub walkable: bool,
    pub polygon: Polygon,
}

impl WalkableRegion {
    pub fn new(name: impl Into<String>, walkable: bool, polygon: Polygon) -> Self {
        Self {
            name: name.into(),
            walkable,
            polygon,
        }
    }

    pub fn from_def(def: &WalkableRegionDef) -> Self {
        Self::new(def.name.clone(), def.walkable, Polygon::from_points(&def.vertices))
    }
}

/// Ordered region list for one scene.
///
/// Alongside the regions it keeps the walls: the parts of walkable outlines
/// with non-walkable ground on at least one side. Outline parts shared by two
/// touching walkable regions are not walls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionSet {
    regions: Vec<WalkableRegion>,
    walls: Vec<(Vec2, Vec2)>,
}

impl RegionSet {
    pub fn new(regions: Vec<WalkableRegion>) -> Self {
        let walls = find_walls(&regions);
        Self { regions, walls }
    }

    /// Region set from definitions; polygons with fewer than three vertices are dropped.
    pub fn from_defs(defs: &[WalkableRegionDef]) -> Self {
        Self::new(
            defs.iter()
                .map(WalkableRegion::from_def)
                .filter(|region| region.polygon.is_valid())
                .collect(),
        )
    }

    /// A single walkable region covering `bounds`.
    pub fn whole_scene(bounds: Rect) -> Self {
        Self::new(vec![WalkableRegion::new("scene bounds", true, Polygon::from_rect(&bounds))])
    }

    pub fn push(&mut self, region: WalkableRegion) {
        self.regions.push(region);
        self.walls = find_walls(&self.regions);
    }

    pub fn regions(&self) -> &[WalkableRegion] {
        &self.regions
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn has_walkable(&self) -> bool {
        self.regions.iter().any(|r| r.walkable)
    }

    pub fn walkable_regions(&self) -> impl Iterator<Item = &WalkableRegion> {
        self.regions.iter().filter(|r| r.walkable)
    }

    pub fn blocked_regions(&self) -> impl Iterator<Item = &WalkableRegion> {
        self.regions.iter().filter(|r| !r.walkable)
    }

    /// First walkable region containing `p`, in list order.
    pub fn walkable_region_at(&self, p: Vec2) -> Option<&WalkableRegion> {
        self.walkable_regions().find(|r| r.polygon.contains_point(p))
    }

    /// First blocked region containing `p`, in list order.
    pub fn blocking_region_at(&self, p: Vec2) -> Option<&WalkableRegion> {
        self.blocked_regions().find(|r| r.polygon.contains_point(p))
    }

    pub fn is_walkable(&self, p: Vec2) -> bool {
        walkable_at(&self.regions, p)
    }

    /// Wall segments, see [`RegionSet`].
    pub fn walls(&self) -> &[(Vec2, Vec2)] {
        &self.walls
    }

    /// Distance to the nearest wall (infinite without any).
    pub fn distance_to_wall(&self, p: Vec2) -> f32 {
        self.walls
            .iter()
            .map(|&(a, b)| point_segment_distance(p, a, b))
            .fold(f32::INFINITY, f32::min)
    }

    /// Distance to the nearest blocked polygon (zero inside one, infinite without any).
    pub fn distance_to_blocked(&self, p: Vec2) -> f32 {
        self.blocked_regions()
            .map(|r| r.polygon.distance_to(p))
            .fold(f32::INFINITY, f32::min)
    }

    /// Whether a character of `radius` can stand at `p`.
    ///
    /// The center must be walkable and both every blocked polygon and every
    /// wall must be at least `radius` away.
    pub fn has_clearance(&self, p: Vec2, radius: f32) -> bool {
        if !self.is_walkable(p) {
            return false;
        }
        if radius <= 0.0 {
            return true;
        }
        self.distance_to_blocked(p) >= radius && self.distance_to_wall(p) >= radius
    }
}

fn walkable_at(regions: &[WalkableRegion], p: Vec2) -> bool {
    regions.iter().any(|r| r.walkable && r.polygon.contains_point(p))
        && !regions.iter().any(|r| !r.walkable && r.polygon.contains_point(p))
}

/// Split every walkable outline into short pieces, keep the pieces with
/// non-walkable ground beside them and merge consecutive kept pieces.
fn find_walls(regions: &[WalkableRegion]) -> Vec<(Vec2, Vec2)> {
    let mut walls = Vec::new();
    for region in regions.iter().filter(|r| r.walkable) {
        for (a, b) in region.polygon.edges() {
            let length = a.distance(b);
            if length <= f32::EPSILON {
                continue;
            }
            let side = (b - a).perp() / length * WALL_PROBE_DISTANCE;
            let pieces = (length / WALL_PIECE_LENGTH).ceil().max(1.0) as usize;
            let mut run_start = None;
            for i in 0..pieces {
                let p0 = a.lerp(b, i as f32 / pieces as f32);
                let p1 = a.lerp(b, (i + 1) as f32 / pieces as f32);
                let mid = (p0 + p1) * 0.5;
                let exposed = !walkable_at(regions, mid + side) || !walkable_at(regions, mid - side);
                match (exposed, run_start) {
                    (true, None) => run_start = Some(p0),
                    (false, Some(start)) => {
                        walls.push((start, p0));
                        run_start = None;
                    },
                    _ => {},
                }
            }
            if let Some(start) = run_start {
                walls.push((start, b));
            }
        }
    }
    walls
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_region(name: &str, walkable: bool, x0: f32, y0: f32, x1: f32, y1: f32) -> WalkableRegion {
        WalkableRegion::new(
            name,
            walkable,
            Polygon::from_rect(&Rect::new(Vec2::new(x0, y0), Vec2::new(x1, y1))),
        )
    }

    fn office() -> RegionSet {
        RegionSet::new(vec![
            rect_region("floor", true, 100.0, 350.0, 900.0, 700.0),
            rect_region("desk", false, 380.0, 380.0, 620.0, 550.0),
        ])
    }

    #[test]
    fn blocked_regions_take_precedence() {
        let regions = office();
        assert!(regions.is_walkable(Vec2::new(300.0, 450.0)));
        assert!(!regions.is_walkable(Vec2::new(500.0, 400.0)));
        assert_eq!(
            regions.blocking_region_at(Vec2::new(500.0, 400.0)).map(|r| r.name.as_str()),
            Some("desk")
        );
    }

    #[test]
    fn precedence_ignores_list_order() {
        let mut reversed: Vec<WalkableRegion> = office().regions().to_vec();
        reversed.reverse();
        let regions = RegionSet::new(reversed);
        assert!(!regions.is_walkable(Vec2::new(500.0, 400.0)));
    }

    #[test]
    fn outside_every_region_is_not_walkable() {
        assert!(!office().is_walkable(Vec2::new(50.0, 50.0)));
        assert!(!RegionSet::default().is_walkable(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn clearance_respects_blocked_and_outer_edges() {
        let regions = office();
        // 80px from the desk, 100px from the floor's top edge
        assert!(regions.has_clearance(Vec2::new(300.0, 450.0), 40.0));
        // 20px from the desk
        assert!(!regions.has_clearance(Vec2::new(360.0, 450.0), 40.0));
        // 10px from the floor's left edge
        assert!(!regions.has_clearance(Vec2::new(110.0, 600.0), 40.0));
    }

    #[test]
    fn adjacent_walkable_regions_share_clearance() {
        let regions = RegionSet::new(vec![
            rect_region("left", true, 0.0, 0.0, 100.0, 100.0),
            rect_region("right", true, 100.0, 0.0, 200.0, 100.0),
        ]);
        assert!(regions.has_clearance(Vec2::new(100.0, 50.0), 30.0));
        // the shared edge is not a wall
        assert!(regions.walls().iter().all(|(a, b)| !(a.x == 100.0 && b.x == 100.0)));
    }

    #[test]
    fn narrow_gap_between_floors_is_a_wall() {
        let regions = RegionSet::new(vec![
            rect_region("west", true, 0.0, 0.0, 300.0, 700.0),
            rect_region("east", true, 305.0, 0.0, 1000.0, 700.0),
        ]);
        let p = Vec2::new(299.0, 400.0);
        assert!(regions.is_walkable(p));
        assert!((regions.distance_to_wall(p) - 1.0).abs() < 1e-4);
        assert!(!regions.has_clearance(p, 47.0));
        assert!(!regions.has_clearance(Vec2::new(310.0, 400.0), 47.0));
        assert!(regions.has_clearance(Vec2::new(150.0, 400.0), 47.0));
    }

    #[test]
    fn concave_floor_measures_to_inner_corner() {
        // L-shaped floor with the notch at the top right
        let floor = WalkableRegion::new(
            "floor",
            true,
            Polygon::new(vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(200.0, 0.0),
                Vec2::new(200.0, 100.0),
                Vec2::new(400.0, 100.0),
                Vec2::new(400.0, 300.0),
                Vec2::new(0.0, 300.0),
            ]),
        );
        let regions = RegionSet::new(vec![floor]);
        // 10px below and 10px right of the inner corner at (200, 100)
        let p = Vec2::new(210.0, 110.0);
        assert!(regions.is_walkable(p));
        assert!((regions.distance_to_wall(p) - 10.0).abs() < 1e-4);
        assert!(!regions.has_clearance(p, 30.0));
        assert!(regions.has_clearance(Vec2::new(100.0, 200.0), 60.0));
    }
}
