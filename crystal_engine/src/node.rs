//! Grid cell used during a single pathfinding query.

use std::hash::{Hash, Hasher};

/// Grid coordinate with path costs.
///
/// Equality and hashing only look at `(x, y)`: two nodes at the same cell are
/// interchangeable whatever their costs or parent.
#[derive(Debug, Clone, Copy)]
pub struct Node {
    pub x: i32,
    pub y: i32,
    /// Cost of the best known path from the start.
    pub g_cost: f32,
    /// Heuristic estimate to the goal.
    pub h_cost: f32,
    /// Cell this node was reached from.
    pub parent: Option<(i32, i32)>,
}

impl Node {
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            g_cost: 0.0,
            h_cost: 0.0,
            parent: None,
        }
    }

    pub fn with_costs(x: i32, y: i32, g_cost: f32, h_cost: f32, parent: Option<(i32, i32)>) -> Self {
        Self {
            x,
            y,
            g_cost,
            h_cost,
            parent,
        }
    }

    pub fn pos(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn f_cost(&self) -> f32 {
        self.g_cost + self.h_cost
    }

    /// One king's move away (Chebyshev distance 1).
    pub fn adjacent_to(&self, other: &Node) -> bool {
        let (dx, dy) = self.delta(other);
        dx.max(dy) == 1
    }

    /// Shares an edge (Manhattan distance 1).
    pub fn orthogonally_adjacent_to(&self, other: &Node) -> bool {
        let (dx, dy) = self.delta(other);
        dx + dy == 1
    }

    /// Shares only a corner.
    pub fn diagonally_adjacent_to(&self, other: &Node) -> bool {
        self.delta(other) == (1, 1)
    }

    fn delta(&self, other: &Node) -> (i32, i32) {
        ((self.x - other.x).abs(), (self.y - other.y).abs())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}
