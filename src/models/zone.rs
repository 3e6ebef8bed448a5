use crate::error::{AppResult, MapError};
use crate::models::types::{Direction, ExitSet, NodeId, Position, ZoneId};
use crate::util::eq_caseless;
use serde::Serialize;
use std::collections::HashMap;

/// Directed edge out of a room. Arcs are one-way; the reverse trip is its own arc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    /// Destination room. May reference a room that does not exist (dead end).
    pub to: NodeId,
    /// Exit token as written in the map (canonical direction or verbose command)
    pub exit: String,
    /// Command override, takes precedence over the direction's abbreviation
    pub move_cmd: Option<String>,
    pub direction: Direction,
    /// Not shown by the game in the room's exit list
    pub hidden: bool,
}

impl Edge {
    /// Edge whose direction is classified from the exit token.
    pub fn new(to: NodeId, exit: impl Into<String>) -> Self {
        let exit = exit.into();
        let direction = Direction::classify(&exit);
        Self {
            to,
            exit,
            move_cmd: None,
            direction,
            hidden: false,
        }
    }

    pub fn with_move(mut self, cmd: impl Into<String>) -> Self {
        self.move_cmd = Some(cmd.into());
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// A room on the map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub id: NodeId,
    /// Room title. Not unique.
    pub name: String,
    /// Known description variants. Empty means "matches any description".
    pub descriptions: Vec<String>,
    pub position: Position,
    pub color: Option<String>,
    /// Reference to another zone, never a resolution result.
    pub map_link: bool,
    /// Free text, "|" separated tokens usable as goto targets
    pub note: String,
    pub edges: Vec<Edge>,
}

impl Node {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id: NodeId(id),
            name: name.into(),
            descriptions: Vec::new(),
            position: Position::default(),
            color: None,
            map_link: false,
            note: String::new(),
            edges: Vec::new(),
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.descriptions.push(desc.into());
        self
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        self.edges.push(edge);
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    pub fn as_map_link(mut self) -> Self {
        self.map_link = true;
        self
    }

    /// Cardinal exits the game would list for this room. Hidden arcs excluded.
    pub fn cardinal_exits(&self) -> ExitSet {
        self.edges
            .iter()
            .filter(|e| !e.hidden)
            .map(|e| e.direction)
            .collect()
    }

    /// Does any "|" delimited token of the note equal `needle` (case-insensitive)?
    pub fn note_matches(&self, needle: &str) -> bool {
        let needle = needle.trim();
        if needle.is_empty() {
            return false;
        }
        self.note
            .split('|')
            .map(str::trim)
            .any(|tok| !tok.is_empty() && eq_caseless(tok, needle))
    }

    /// First edge leading to `to`, in enumeration order.
    pub fn edge_to(&self, to: NodeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.to == to)
    }
}

/// Positional text annotation. Carried for presentation only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub text: String,
    pub position: Position,
}

/// One in-game area: an immutable room graph.
#[derive(Debug, Clone, Serialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    nodes: Vec<Node>,
    labels: Vec<Label>,
    #[serde(skip)]
    index: HashMap<NodeId, usize>,
}

impl Zone {
    /// Builds a zone. Node ids must be unique; dangling arc destinations are allowed.
    pub fn new(id: u32, name: impl Into<String>, nodes: Vec<Node>, labels: Vec<Label>) -> AppResult<Self> {
        let id = ZoneId(id);
        let mut index = HashMap::with_capacity(nodes.len());
        for (pos, node) in nodes.iter().enumerate() {
            if index.insert(node.id, pos).is_some() {
                return Err(MapError::DuplicateNode { zone: id, node: node.id });
            }
        }

        Ok(Self {
            id,
            name: name.into(),
            nodes,
            labels,
            index,
        })
    }

    #[inline]
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&pos| &self.nodes[pos])
    }

    #[inline]
    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Rooms in map order. This order is the tie-break order everywhere.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn edges(&self) -> impl Iterator<Item = (&Node, &Edge)> {
        self.nodes.iter().flat_map(|n| n.edges.iter().map(move |e| (n, e)))
    }

    /// Arcs whose destination does not exist in this zone.
    pub fn dangling_edges(&self) -> impl Iterator<Item = (&Node, &Edge)> {
        self.edges().filter(|(_, e)| !self.contains(e.to))
    }

    /// Whether some non map-link room carries this title (case-insensitive).
    pub fn has_room_named(&self, name: &str) -> bool {
        self.nodes
            .iter()
            .any(|n| !n.map_link && eq_caseless(n.name.trim(), name.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_ids_rejected() {
        let nodes = vec![Node::new(1, "A"), Node::new(1, "B")];
        let err = Zone::new(1, "z", nodes, vec![]).unwrap_err();
        assert!(matches!(err, MapError::DuplicateNode { .. }));
    }

    #[test]
    fn lookup_and_dangling() {
        let nodes = vec![
            Node::new(1, "A").with_edge(Edge::new(NodeId(2), "east")),
            Node::new(2, "B").with_edge(Edge::new(NodeId(9), "west")),
        ];
        let zone = Zone::new(1, "z", nodes, vec![]).unwrap();
        assert_eq!(zone.node(NodeId(2)).unwrap().name, "B");
        assert!(zone.node(NodeId(9)).is_none());

        let dangling: Vec<_> = zone.dangling_edges().map(|(n, e)| (n.id, e.to)).collect();
        assert_eq!(dangling, vec![(NodeId(2), NodeId(9))]);
    }

    #[test]
    fn cardinal_exits_skip_hidden_and_verbose() {
        let node = Node::new(1, "A")
            .with_edge(Edge::new(NodeId(2), "north"))
            .with_edge(Edge::new(NodeId(3), "east").hidden())
            .with_edge(Edge::new(NodeId(4), "climb tree"));
        let exits = node.cardinal_exits();
        assert_eq!(exits.len(), 1);
        assert!(exits.contains(Direction::North));
    }

    #[test]
    fn note_tokens() {
        let node = Node::new(1, "Bank").with_note("bank | Money|vault");
        assert!(node.note_matches("MONEY"));
        assert!(node.note_matches("vault"));
        assert!(!node.note_matches("mon"));
        assert!(!node.note_matches(""));
    }

    #[test]
    fn non_ascii_titles_and_notes() {
        let nodes = vec![
            Node::new(1, "Café Noir").with_note("ÉGLISE|café"),
            Node::new(2, "Tor").as_map_link(),
        ];
        let zone = Zone::new(1, "z", nodes, vec![]).unwrap();
        assert!(zone.has_room_named("CAFÉ NOIR"));
        assert!(!zone.has_room_named("tor"));
        assert!(zone.nodes()[0].note_matches("église"));
        assert!(zone.nodes()[0].note_matches("CAFÉ"));
    }
}
