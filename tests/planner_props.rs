use mudmap::services::{edge_command, find_path, path_commands};
use mudmap::{Direction, Edge, Node, NodeId, Zone};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Random zone with ids 1..=rooms. Each room gets distinct directions for its
/// arcs, a few arcs point at rooms that do not exist, and some rooms are map links.
fn random_zone(rng: &mut StdRng, rooms: u32) -> Zone {
    let mut nodes = Vec::new();
    for id in 1..=rooms {
        let mut dirs = Direction::CARDINALS.to_vec();
        dirs.shuffle(rng);
        let arcs = rng.random_range(0..4usize);

        let mut node = Node::new(id, format!("Room {id}"));
        for dir in dirs.into_iter().take(arcs) {
            let to = if rng.random_bool(0.05) { rooms + 100 } else { rng.random_range(1..=rooms) };
            let mut edge = Edge::new(NodeId(to), dir.canonical());
            if rng.random_bool(0.1) {
                edge = edge.hidden();
            }
            node = node.with_edge(edge);
        }
        if rng.random_bool(0.1) {
            node = node.as_map_link();
        }
        nodes.push(node);
    }
    Zone::new(1, "random", nodes, vec![]).unwrap()
}

/// Distance by repeated relaxation, same walking rules as the planner.
fn brute_distance(zone: &Zone, from: NodeId, to: NodeId) -> Option<usize> {
    let mut dist: std::collections::HashMap<NodeId, usize> = [(from, 0)].into_iter().collect();
    for _ in 0..zone.nodes().len() {
        let mut changed = false;
        for node in zone.nodes() {
            let Some(&d) = dist.get(&node.id) else { continue };
            if node.map_link && node.id != from {
                continue;
            }
            for edge in &node.edges {
                if !zone.contains(edge.to) {
                    continue;
                }
                let entry = dist.entry(edge.to).or_insert(usize::MAX);
                if d + 1 < *entry {
                    *entry = d + 1;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    dist.get(&to).copied()
}

/// Walks `commands` from `from`, taking the first arc whose command matches.
fn replay(zone: &Zone, from: NodeId, commands: &[String]) -> Option<NodeId> {
    let mut at = from;
    for cmd in commands {
        let node = zone.node(at)?;
        at = node.edges.iter().find(|e| edge_command(e) == cmd)?.to;
    }
    Some(at)
}

#[test]
fn bfs_matches_brute_force_distance() {
    let mut rng = StdRng::seed_from_u64(0x6d75_646d);
    for _ in 0..200 {
        let rooms = rng.random_range(2..25u32);
        let zone = random_zone(&mut rng, rooms);
        let from = NodeId(rng.random_range(1..=rooms));
        let to = NodeId(rng.random_range(1..=rooms));

        let path = find_path(&zone, from, to);
        let expected = if from == to { Some(0) } else { brute_distance(&zone, from, to) };
        assert_eq!(path.as_ref().map(|p| p.len() - 1), expected, "{from} -> {to} in {zone:?}");

        if let Some(path) = path {
            assert_eq!(path.first(), Some(&from));
            assert_eq!(path.last(), Some(&to));
            for pair in path.windows(2) {
                assert!(zone.node(pair[0]).unwrap().edge_to(pair[1]).is_some());
            }
        }
    }
}

#[test]
fn replayed_commands_reach_destination() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut checked = 0;
    for _ in 0..300 {
        let rooms = rng.random_range(2..20u32);
        let zone = random_zone(&mut rng, rooms);
        let from = NodeId(rng.random_range(1..=rooms));
        let to = NodeId(rng.random_range(1..=rooms));
        if from == to || zone.node(from).is_some_and(|n| n.map_link) {
            continue;
        }

        let Some(path) = find_path(&zone, from, to) else { continue };
        let commands = path_commands(&zone, &path).unwrap();
        assert_eq!(commands.len(), path.len() - 1);
        assert_eq!(replay(&zone, from, &commands), Some(to));
        checked += 1;
    }
    assert!(checked > 0);
}

#[test]
fn same_input_same_path() {
    let mut rng = StdRng::seed_from_u64(7);
    let zone = random_zone(&mut rng, 30);
    for from in 1..=30 {
        for to in 1..=30 {
            assert_eq!(
                find_path(&zone, NodeId(from), NodeId(to)),
                find_path(&zone, NodeId(from), NodeId(to))
            );
        }
    }
}
