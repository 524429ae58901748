//! Scene graph reachability along exits.

use std::collections::{HashMap, HashSet, VecDeque};

use crystal_data::WorldDef;

/// Directed scene graph: scene id -> ids of scenes its exits lead to.
///
/// Exits naming unknown scenes are left out.
pub fn scene_graph(world: &WorldDef) -> HashMap<&str, Vec<&str>> {
    let known: HashSet<&str> = world.scenes.iter().map(|s| s.id.as_str()).collect();
    world
        .scenes
        .iter()
        .map(|scene| {
            let targets = scene
                .exits
                .iter()
                .map(|exit| exit.target_scene.as_str())
                .filter(|target| known.contains(target))
                .collect();
            (scene.id.as_str(), targets)
        })
        .collect()
}

/// Scenes reachable from the start scene, the start scene included.
pub fn reachable_scenes(world: &WorldDef) -> HashSet<&str> {
    let graph = scene_graph(world);
    let start = world.game.start_scene.as_str();
    let mut visited = HashSet::new();
    if !graph.contains_key(start) {
        return visited;
    }

    let mut queue = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);
    while let Some(current) = queue.pop_front() {
        for &next in graph.get(current).into_iter().flatten() {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }
    visited
}

/// Ids of scenes that cannot be reached from the start scene, in definition order.
///
/// Empty when the start scene itself is unknown.
pub fn unreachable_scenes(world: &WorldDef) -> Vec<&str> {
    let reachable = reachable_scenes(world);
    if reachable.is_empty() {
        return Vec::new();
    }
    world
        .scenes
        .iter()
        .map(|s| s.id.as_str())
        .filter(|id| !reachable.contains(id))
        .collect()
}
