use crate::models::types::NodeId;
use crate::models::zone::Zone;
use std::collections::{HashMap, VecDeque};
use tracing::trace;

/// Shortest route from `from` to `to`, both ends included.
///
/// Breadth-first over arcs in map order, so among equally short routes the one
/// discovered first wins. Hidden arcs are walkable. Arcs into unknown rooms are
/// dead ends, and map-link rooms are never walked through (they can still be
/// the destination).
pub fn find_path(zone: &Zone, from: NodeId, to: NodeId) -> Option<Vec<NodeId>> {
    if !zone.contains(from) || !zone.contains(to) {
        return None;
    }
    if from == to {
        return Some(vec![from]);
    }

    let mut came_from: HashMap<NodeId, NodeId> = HashMap::new();
    let mut queue = VecDeque::from([from]);
    came_from.insert(from, from);

    while let Some(current) = queue.pop_front() {
        let Some(node) = zone.node(current) else { continue };
        if node.map_link && current != from {
            continue;
        }

        for edge in &node.edges {
            let next = edge.to;
            if came_from.contains_key(&next) || !zone.contains(next) {
                continue;
            }
            came_from.insert(next, current);

            if next == to {
                let path = unwind(&came_from, from, to);
                trace!(zone = %zone.id, %from, %to, steps = path.len() - 1, "path found");
                return Some(path);
            }
            queue.push_back(next);
        }
    }

    None
}

fn unwind(came_from: &HashMap<NodeId, NodeId>, from: NodeId, to: NodeId) -> Vec<NodeId> {
    let mut path = vec![to];
    let mut cur = to;
    while cur != from {
        cur = came_from[&cur];
        path.push(cur);
    }
    path.reverse();
    path
}
