use crate::models::types::NodeId;
use crate::models::zone::{Edge, Zone};
use crate::util::quote_token;

/// The command that walks one arc: its move override, else the direction
/// abbreviation, else (verbose exits) the exit token itself.
pub fn edge_command(edge: &Edge) -> &str {
    if let Some(cmd) = edge.move_cmd.as_deref().filter(|c| !c.trim().is_empty()) {
        return cmd;
    }
    edge.direction.abbreviation().unwrap_or(edge.exit.as_str())
}

/// One command per step of `path`. `None` if two consecutive rooms are not
/// connected by an arc.
pub fn path_commands(zone: &Zone, path: &[NodeId]) -> Option<Vec<String>> {
    path.windows(2)
        .map(|pair| {
            let from = zone.node(pair[0])?;
            from.edge_to(pair[1]).map(|e| edge_command(e).to_string())
        })
        .collect()
}

/// Joins commands into one dispatch string, quoting those with whitespace.
pub fn join_commands(commands: &[String]) -> String {
    commands
        .iter()
        .map(|c| quote_token(c))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::Direction;
    use crate::models::zone::Node;

    #[test]
    fn abbreviation_by_default() {
        assert_eq!(edge_command(&Edge::new(NodeId(1), "northeast")), "ne");
        assert_eq!(edge_command(&Edge::new(NodeId(1), "up")), "up");
    }

    #[test]
    fn move_override_wins() {
        let e = Edge::new(NodeId(1), "north").with_move("open door");
        assert_eq!(edge_command(&e), "open door");
        let blank = Edge::new(NodeId(1), "north").with_move("  ");
        assert_eq!(edge_command(&blank), "n");
    }

    #[test]
    fn verbose_exit_falls_back_to_token() {
        let e = Edge::new(NodeId(1), "climb rope");
        assert_eq!(e.direction, Direction::Climb);
        assert_eq!(edge_command(&e), "climb rope");
    }

    #[test]
    fn path_to_dispatch_string() {
        let zone = Zone::new(1, "z", vec![
            Node::new(1, "A").with_edge(Edge::new(NodeId(2), "east")),
            Node::new(2, "B").with_edge(Edge::new(NodeId(3), "enter portal")),
            Node::new(3, "C"),
        ], vec![]).unwrap();
        let cmds = path_commands(&zone, &[NodeId(1), NodeId(2), NodeId(3)]).unwrap();
        assert_eq!(cmds, vec!["e".to_string(), "enter portal".to_string()]);
        assert_eq!(join_commands(&cmds), "e \"enter portal\"");
    }

    #[test]
    fn disconnected_pair() {
        let zone = Zone::new(1, "z", vec![Node::new(1, "A"), Node::new(2, "B")], vec![]).unwrap();
        assert_eq!(path_commands(&zone, &[NodeId(1), NodeId(2)]), None);
    }
}
