use crate::error::{AppResult, MapError};
use crate::hardening::MAX_FILE_BYTES;
use crate::models::types::{Direction, NodeId, Position};
use crate::models::zone::{Edge, Label, Node, Zone};
use crate::models::Atlas;
use crate::util::list_yaml_files_guarded;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

// ====== zone YAML models ======

#[derive(Debug, Deserialize)]
struct ZoneYaml {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeYaml>,
    #[serde(default)]
    pub labels: Vec<LabelYaml>,
}

#[derive(Debug, Deserialize)]
struct NodeYaml {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub descriptions: Vec<String>,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub map_link: bool,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub arcs: Vec<ArcYaml>,
}

#[derive(Debug, Deserialize)]
struct ArcYaml {
    pub to: u32,
    pub exit: String,
    #[serde(default, rename = "move")]
    pub move_cmd: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Deserialize)]
struct LabelYaml {
    pub text: String,
    #[serde(default)]
    pub position: Position,
}

// ====== Entry points ======

/// Parses one zone document.
pub fn parse_zone(src: &str, file: &str) -> AppResult<Zone> {
    let doc: ZoneYaml = serde_yaml::from_str(src)?;

    let mut nodes = Vec::with_capacity(doc.nodes.len());
    for n in doc.nodes {
        let mut edges = Vec::with_capacity(n.arcs.len());
        for a in n.arcs {
            edges.push(arc_to_edge(a, n.id, file)?);
        }

        nodes.push(Node {
            id: NodeId(n.id),
            name: n.name,
            descriptions: n.descriptions,
            position: n.position,
            color: n.color,
            map_link: n.map_link,
            note: n.note,
            edges,
        });
    }

    let labels = doc
        .labels
        .into_iter()
        .map(|l| Label { text: l.text, position: l.position })
        .collect();

    let zone = Zone::new(doc.id, doc.name, nodes, labels)?;
    for (node, edge) in zone.dangling_edges() {
        warn!(zone = %zone.id, node = %node.id, to = %edge.to, exit = %edge.exit, "arc leads to unknown room; treated as dead end");
    }

    debug!(zone = %zone.id, name = %zone.name, rooms = zone.nodes().len(), "zone parsed");
    Ok(zone)
}

fn arc_to_edge(a: ArcYaml, from: u32, file: &str) -> AppResult<Edge> {
    let exit = a.exit.trim().to_string();
    if exit.is_empty() {
        return Err(MapError::InvalidData {
            file: file.to_string(),
            message: format!("room #{from}: arc to #{} has an empty exit", a.to),
        });
    }

    let direction = match a.direction.as_deref() {
        Some(d) => d.parse::<Direction>()?,
        None => Direction::classify(&exit),
    };

    Ok(Edge {
        to: NodeId(a.to),
        exit,
        move_cmd: a.move_cmd.map(|m| m.trim().to_string()).filter(|m| !m.is_empty()),
        direction,
        hidden: a.hidden,
    })
}

pub fn load_zone_file(path: &Path) -> AppResult<Zone> {
    let len = fs::metadata(path)?.len() as usize;
    if len > MAX_FILE_BYTES {
        return Err(MapError::FileTooLarge { path: path.to_path_buf(), bytes: len });
    }

    let src = fs::read_to_string(path)?;
    parse_zone(&src, &path.display().to_string())
}

/// Loads a single zone file, or every zone file inside a directory.
pub fn load_atlas(path: &Path) -> AppResult<Atlas> {
    let zones = if path.is_dir() {
        let files = list_yaml_files_guarded(path)?;
        if files.is_empty() {
            return Err(MapError::NoZones(path.to_path_buf()));
        }
        files.iter().map(|f| load_zone_file(f)).collect::<AppResult<Vec<_>>>()?
    } else {
        vec![load_zone_file(path)?]
    };

    info!(path = %path.display(), zones = zones.len(), "map loaded");
    Ok(Atlas::new(zones))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOWN: &str = r#"
id: 3
name: Town
nodes:
  - id: 1
    name: Bank
    descriptions: ["A marble hall."]
    position: { x: 0, y: 0 }
    note: "bank|money"
    arcs:
      - { to: 2, exit: east }
      - { to: 5, exit: "enter portal", move: "enter portal" }
  - id: 2
    name: Vault
    position: { x: 1, y: 0, z: -1 }
    arcs:
      - { to: 1, exit: west, hidden: true }
      - { to: 1, exit: "slide", direction: go }
labels:
  - text: Market
    position: { x: 4, y: 4 }
"#;

    #[test]
    fn parses_rooms_arcs_and_labels() {
        let zone = parse_zone(TOWN, "town.yaml").unwrap();
        assert_eq!(zone.name, "Town");
        assert_eq!(zone.nodes().len(), 2);
        assert_eq!(zone.labels()[0].text, "Market");

        let bank = zone.node(NodeId(1)).unwrap();
        assert_eq!(bank.edges[0].direction, Direction::East);
        assert_eq!(bank.edges[1].direction, Direction::None);
        assert_eq!(bank.edges[1].move_cmd.as_deref(), Some("enter portal"));

        let vault = zone.node(NodeId(2)).unwrap();
        assert_eq!(vault.position.z, -1);
        assert!(vault.edges[0].hidden);
        assert_eq!(vault.edges[1].direction, Direction::Go);
    }

    #[test]
    fn dangling_arc_is_kept() {
        let zone = parse_zone(TOWN, "town.yaml").unwrap();
        assert_eq!(zone.dangling_edges().count(), 1);
    }

    #[test]
    fn duplicate_room_is_an_error() {
        let src = "id: 1\nname: X\nnodes:\n  - { id: 1, name: A }\n  - { id: 1, name: B }\n";
        assert!(matches!(parse_zone(src, "x.yaml"), Err(MapError::DuplicateNode { .. })));
    }

    #[test]
    fn bad_direction_is_an_error() {
        let src = "id: 1\nname: X\nnodes:\n  - id: 1\n    name: A\n    arcs: [{ to: 1, exit: x, direction: sideways }]\n";
        assert!(matches!(parse_zone(src, "x.yaml"), Err(MapError::InvalidDirection(_))));
    }

    #[test]
    fn empty_exit_is_an_error() {
        let src = "id: 1\nname: X\nnodes:\n  - id: 1\n    name: A\n    arcs: [{ to: 1, exit: \"  \" }]\n";
        assert!(matches!(parse_zone(src, "x.yaml"), Err(MapError::InvalidData { .. })));
    }
}
