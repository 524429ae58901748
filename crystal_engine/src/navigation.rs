//! Grid pathfinding over a scene's walkable regions.
//!
//! The grid is a raster of walkable/blocked cells built once per scene load from
//! the scene's [`RegionSet`]. Queries run A* over the 8-connected grid and return
//! simplified world-space waypoints for the movement system.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::f32::consts::SQRT_2;

use glam::Vec2;
use log::debug;
use thiserror::Error;

use crate::node::Node;
use crate::region::RegionSet;

/// Neighbor offsets, orthogonal first.
const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Tolerance for treating a grid traversal as passing exactly through a cell corner.
const CORNER_TOLERANCE: f32 = 1e-5;

/// Clearance radius of a character sprite: half of its smaller scaled side.
///
/// No minimum is applied here; see [`GridConfig::min_clearance_radius`].
pub fn clearance_radius(size: Vec2, scale: f32) -> f32 {
    (size.x * scale).min(size.y * scale) / 2.0
}

/// Parameters for building a [`NavigationGrid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Pixels per cell side.
    pub cell_size: u32,
    /// Clearance the walking character needs from blocked areas.
    pub clearance_radius: f32,
    /// Floor applied to `clearance_radius` so tiny sprites still keep off walls.
    pub min_clearance_radius: f32,
    /// How many cells around a blocked goal are searched for a walkable stand-in.
    pub fallback_radius: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: 10,
            clearance_radius: 0.0,
            min_clearance_radius: 8.0,
            fallback_radius: 10,
        }
    }
}

impl GridConfig {
    pub fn effective_radius(&self) -> f32 {
        self.clearance_radius.max(self.min_clearance_radius)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum NavigationError {
    #[error("cell size must be at least one pixel")]
    ZeroCellSize,
    #[error("scene size must be positive (got {width} x {height})")]
    EmptyScene { width: f32, height: f32 },
}

/// Open-set entry ordered for a min-heap on `f`, then on `h`.
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f32,
    h: f32,
    pos: (i32, i32),
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.h.total_cmp(&self.h))
            .then_with(|| other.pos.cmp(&self.pos))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

/// Static walkability raster for one scene.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationGrid {
    cell_size: u32,
    width: u32,
    height: u32,
    cells: Vec<bool>,
    fallback_radius: u32,
}

impl NavigationGrid {
    /// Rasterize `regions` over a `scene_width` x `scene_height` scene.
    ///
    /// A cell is walkable when its center point can hold a character of the
    /// configured clearance radius.
    pub fn build(
        regions: &RegionSet,
        scene_width: f32,
        scene_height: f32,
        config: &GridConfig,
    ) -> Result<Self, NavigationError> {
        if config.cell_size == 0 {
            return Err(NavigationError::ZeroCellSize);
        }
        if scene_width <= 0.0 || scene_height <= 0.0 {
            return Err(NavigationError::EmptyScene {
                width: scene_width,
                height: scene_height,
            });
        }

        let cs = config.cell_size as f32;
        let width = (scene_width / cs).ceil() as u32;
        let height = (scene_height / cs).ceil() as u32;
        let radius = config.effective_radius();

        let mut cells = Vec::with_capacity((width * height) as usize);
        for cy in 0..height {
            for cx in 0..width {
                let center = Vec2::new((cx as f32 + 0.5) * cs, (cy as f32 + 0.5) * cs);
                cells.push(regions.has_clearance(center, radius));
            }
        }

        let grid = Self {
            cell_size: config.cell_size,
            width,
            height,
            cells,
            fallback_radius: config.fallback_radius,
        };
        debug!(
            "navigation grid built: {}x{} cells of {}px, {} walkable, clearance {radius:.1}px",
            width,
            height,
            config.cell_size,
            grid.walkable_count()
        );
        Ok(grid)
    }

    /// Grid from an explicit raster (row-major, `true` = walkable).
    ///
    /// # Panics
    /// If `cells.len()` is not `width * height` or `cell_size` is zero.
    pub fn from_cells(width: u32, height: u32, cell_size: u32, cells: Vec<bool>) -> Self {
        assert_eq!(cells.len(), (width * height) as usize, "raster size mismatch");
        assert!(cell_size > 0, "cell size must be positive");
        Self {
            cell_size,
            width,
            height,
            cells,
            fallback_radius: GridConfig::default().fallback_radius,
        }
    }

    pub fn with_fallback_radius(mut self, cells: u32) -> Self {
        self.fallback_radius = cells;
        self
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn walkable_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Out-of-bounds cells are blocked.
    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.cells[self.idx(x, y)]
    }

    /// Walkability of the cell containing a world point.
    pub fn is_point_walkable(&self, p: Vec2) -> bool {
        self.world_to_cell(p).is_some_and(|(x, y)| self.is_walkable(x, y))
    }

    /// Cell containing a world point; `None` outside the grid. Points on the far
    /// scene edge map to the last cell.
    pub fn world_to_cell(&self, p: Vec2) -> Option<(i32, i32)> {
        let cs = self.cell_size as f32;
        let (max_x, max_y) = (self.width as f32 * cs, self.height as f32 * cs);
        if !p.is_finite() || p.x < 0.0 || p.y < 0.0 || p.x > max_x || p.y > max_y {
            return None;
        }
        let cx = ((p.x / cs) as i32).min(self.width as i32 - 1);
        let cy = ((p.y / cs) as i32).min(self.height as i32 - 1);
        Some((cx, cy))
    }

    pub fn cell_center(&self, x: i32, y: i32) -> Vec2 {
        let cs = self.cell_size as f32;
        Vec2::new((x as f32 + 0.5) * cs, (y as f32 + 0.5) * cs)
    }

    /// Closest walkable cell to `cell` within `radius` cells (Euclidean, ties by row then column).
    pub fn nearest_walkable(&self, cell: (i32, i32), radius: u32) -> Option<(i32, i32)> {
        if self.is_walkable(cell.0, cell.1) {
            return Some(cell);
        }
        let r = radius as i32;
        let mut best: Option<((i32, i32), i32)> = None;
        for dy in -r..=r {
            for dx in -r..=r {
                let (x, y) = (cell.0 + dx, cell.1 + dy);
                if !self.is_walkable(x, y) {
                    continue;
                }
                let dist_sq = dx * dx + dy * dy;
                if best.is_none_or(|(_, d)| dist_sq < d) {
                    best = Some(((x, y), dist_sq));
                }
            }
        }
        best.map(|(pos, _)| pos)
    }

    /// Lowest-cost path from `start` to `goal` as world-space waypoints.
    ///
    /// Returns `None` when either point is off the grid, when no walkable cell
    /// lies near the start or goal, or when nothing closer to the goal than the
    /// start is reachable. A goal that cannot be reached yields a path to the
    /// reachable cell nearest to it.
    pub fn find_path(&self, start: Vec2, goal: Vec2) -> Option<Vec<Vec2>> {
        let start_cell = self.world_to_cell(start)?;
        let goal_cell = self.world_to_cell(goal)?;
        let from = self.nearest_walkable(start_cell, self.fallback_radius)?;
        let to = self.nearest_walkable(goal_cell, self.fallback_radius)?;

        let (cells, reached_goal) = self.search(from, to)?;
        let cells = remove_collinear(&cells);
        let mut points: Vec<Vec2> = cells.iter().map(|&(x, y)| self.cell_center(x, y)).collect();

        // Finish on the exact click point when it sits in the goal cell itself.
        if reached_goal && to == goal_cell {
            let last = points.len() - 1;
            if last > 0 && self.line_of_sight(points[last - 1], goal) {
                points[last] = goal;
            } else if points[last] != goal {
                points.push(goal);
            }
        }

        Some(self.smooth(&points))
    }

    /// A* from `from` to `to`. Returns the cell path and whether it ends at `to`.
    fn search(&self, from: (i32, i32), to: (i32, i32)) -> Option<(Vec<(i32, i32)>, bool)> {
        let mut nodes: HashMap<(i32, i32), Node> = HashMap::new();
        let mut closed: HashSet<(i32, i32)> = HashSet::new();
        let mut open = BinaryHeap::new();

        let h = heuristic(from, to);
        nodes.insert(from, Node::with_costs(from.0, from.1, 0.0, h, None));
        open.push(OpenEntry { f: h, h, pos: from });

        // Closest reachable cell to the goal, for unreachable goals.
        let mut closest = (from, h);

        while let Some(entry) = open.pop() {
            if !closed.insert(entry.pos) {
                continue;
            }
            if entry.pos == to {
                return Some((reconstruct(&nodes, to), true));
            }
            if entry.h < closest.1 {
                closest = (entry.pos, entry.h);
            }

            let current = nodes[&entry.pos];
            for (dx, dy) in NEIGHBOR_OFFSETS {
                let (nx, ny) = (current.x + dx, current.y + dy);
                if !self.is_walkable(nx, ny) || closed.contains(&(nx, ny)) {
                    continue;
                }
                let diagonal = dx != 0 && dy != 0;
                if diagonal && !self.is_walkable(current.x + dx, current.y) && !self.is_walkable(current.x, current.y + dy)
                {
                    continue;
                }
                let g = current.g_cost + if diagonal { SQRT_2 } else { 1.0 };
                if nodes.get(&(nx, ny)).is_some_and(|known| known.g_cost <= g) {
                    continue;
                }
                let h = heuristic((nx, ny), to);
                let node = Node::with_costs(nx, ny, g, h, Some(current.pos()));
                open.push(OpenEntry {
                    f: node.f_cost(),
                    h,
                    pos: node.pos(),
                });
                nodes.insert(node.pos(), node);
            }
        }

        if closest.0 == from {
            debug!("no path from {from:?} towards {to:?}");
            return None;
        }
        debug!("goal {to:?} unreachable; stopping at {:?}", closest.0);
        Some((reconstruct(&nodes, closest.0), false))
    }

    /// Drop waypoints that can be skipped without leaving walkable cells.
    fn smooth(&self, points: &[Vec2]) -> Vec<Vec2> {
        if points.len() <= 2 {
            return points.to_vec();
        }
        let mut smoothed = vec![points[0]];
        let mut anchor = 0;
        while anchor < points.len() - 1 {
            let mut next = anchor + 1;
            for candidate in (anchor + 2)..points.len() {
                if self.line_of_sight(points[anchor], points[candidate]) {
                    next = candidate;
                }
            }
            smoothed.push(points[next]);
            anchor = next;
        }
        smoothed
    }

    /// True when every cell the segment `a`–`b` passes through is walkable.
    ///
    /// Walks the grid cell by cell; a segment passing exactly through a cell
    /// corner needs both cells beside the corner to be open.
    pub fn line_of_sight(&self, a: Vec2, b: Vec2) -> bool {
        let cs = self.cell_size as f32;
        let start = a / cs;
        let end = b / cs;
        let (mut x, mut y) = (start.x.floor() as i32, start.y.floor() as i32);
        let (end_x, end_y) = (end.x.floor() as i32, end.y.floor() as i32);
        if !self.is_walkable(x, y) {
            return false;
        }

        let dir = end - start;
        let step_x = dir.x.signum() as i32 * i32::from(dir.x != 0.0);
        let step_y = dir.y.signum() as i32 * i32::from(dir.y != 0.0);
        let t_delta_x = if dir.x == 0.0 { f32::INFINITY } else { 1.0 / dir.x.abs() };
        let t_delta_y = if dir.y == 0.0 { f32::INFINITY } else { 1.0 / dir.y.abs() };
        let mut t_max_x = match step_x {
            1 => (x as f32 + 1.0 - start.x) / dir.x,
            -1 => (start.x - x as f32) / -dir.x,
            _ => f32::INFINITY,
        };
        let mut t_max_y = match step_y {
            1 => (y as f32 + 1.0 - start.y) / dir.y,
            -1 => (start.y - y as f32) / -dir.y,
            _ => f32::INFINITY,
        };

        let max_steps = (end_x - x).abs() + (end_y - y).abs();
        for _ in 0..max_steps {
            if (x, y) == (end_x, end_y) {
                break;
            }
            if (t_max_x - t_max_y).abs() <= CORNER_TOLERANCE {
                if !self.is_walkable(x + step_x, y) || !self.is_walkable(x, y + step_y) {
                    return false;
                }
                x += step_x;
                y += step_y;
                t_max_x += t_delta_x;
                t_max_y += t_delta_y;
            } else if t_max_x < t_max_y {
                x += step_x;
                t_max_x += t_delta_x;
            } else {
                y += step_y;
                t_max_y += t_delta_y;
            }
            if !self.is_walkable(x, y) {
                return false;
            }
        }
        true
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> usize {
        (y as u32 * self.width + x as u32) as usize
    }
}

/// Euclidean distance in cells; admissible with diagonal steps of cost √2.
fn heuristic(a: (i32, i32), b: (i32, i32)) -> f32 {
    let dx = (a.0 - b.0) as f32;
    let dy = (a.1 - b.1) as f32;
    (dx * dx + dy * dy).sqrt()
}

fn reconstruct(nodes: &HashMap<(i32, i32), Node>, end: (i32, i32)) -> Vec<(i32, i32)> {
    let mut path = vec![end];
    let mut cursor = nodes.get(&end).and_then(|n| n.parent);
    while let Some(pos) = cursor {
        path.push(pos);
        cursor = nodes.get(&pos).and_then(|n| n.parent);
    }
    path.reverse();
    path
}

/// Keep only the cells where the step direction changes, plus both ends.
fn remove_collinear(cells: &[(i32, i32)]) -> Vec<(i32, i32)> {
    if cells.len() <= 2 {
        return cells.to_vec();
    }
    let mut kept = vec![cells[0]];
    for window in cells.windows(3) {
        let (a, b, c) = (window[0], window[1], window[2]);
        let d1 = (b.0 - a.0, b.1 - a.1);
        let d2 = (c.0 - b.0, c.1 - b.1);
        if d1 != d2 {
            kept.push(b);
        }
    }
    kept.push(cells[cells.len() - 1]);
    kept
}
