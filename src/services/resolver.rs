//! Maps what the game shows (room title, description, visible exits) to a room
//! on the map.
//!
//! Titles are not unique, so candidates are narrowed in stages: title, then
//! description, then exit overlap. When several rooms survive, the one reachable
//! by a single arc from where we were last seen wins.

use crate::models::types::{ExitSet, NodeId};
use crate::models::zone::{Node, Zone};
use crate::util::eq_caseless;
use tracing::{debug, trace};

/// What the game tells us about the room we are standing in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomObservation {
    pub name: String,
    pub description: String,
    pub exits: ExitSet,
    /// Room number announced by the game, if any. Only used as a tie-break.
    pub room_id: Option<NodeId>,
}

impl RoomObservation {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    pub fn with_exits(mut self, exits: ExitSet) -> Self {
        self.exits = exits;
        self
    }
}

/// How a single room was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// Exactly one room survived the filters
    Unique,
    /// Several survived; the only one one step away from the previous room
    Adjacent,
    /// Several survived; the previous room itself
    Stayed,
    /// Several survived; the one whose number the game announced
    Announced,
    /// Several survived; first in map order
    FirstListed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No title to match against
    NoName,
    /// Nothing on the map fits
    NoMatch,
    /// `candidates` rooms survived the filters and `node` was picked
    Found { node: NodeId, candidates: usize, pick: Pick },
}

impl Resolution {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            Resolution::Found { node, .. } => Some(*node),
            _ => None,
        }
    }

    pub fn is_ambiguous(&self) -> bool {
        matches!(self, Resolution::Found { candidates, .. } if *candidates > 1)
    }
}

/// Resolves `obs` against `zone`. `prior` is the room we were last resolved to.
/// Pure: neither the zone nor any session state is touched.
pub fn resolve(zone: &Zone, obs: &RoomObservation, prior: Option<NodeId>) -> Resolution {
    resolve_from(zone, obs, prior, true)
}

/// Like [`resolve`], for an observation that has not changed since `prior` was
/// resolved. The player has not moved, so `prior` wins while it still fits.
pub fn resolve_in_place(zone: &Zone, obs: &RoomObservation, prior: Option<NodeId>) -> Resolution {
    resolve_from(zone, obs, prior, false)
}

fn resolve_from(zone: &Zone, obs: &RoomObservation, prior: Option<NodeId>, moved: bool) -> Resolution {
    let name = obs.name.trim();
    if name.is_empty() {
        return Resolution::NoName;
    }

    let desc = obs.description.trim();
    let survivors: Vec<&Node> = zone
        .nodes()
        .iter()
        .filter(|n| !n.map_link && eq_caseless(n.name.trim(), name))
        .filter(|n| description_matches(n, desc))
        .filter(|n| exits_match(&n.cardinal_exits(), &obs.exits))
        .collect();

    trace!(zone = %zone.id, %name, survivors = survivors.len(), "filtered candidates");

    let (node, pick) = match survivors.as_slice() {
        [] => return Resolution::NoMatch,
        [only] => (only.id, Pick::Unique),
        many => select(zone, many, prior, obs.room_id, moved),
    };

    if survivors.len() > 1 {
        debug!(zone = %zone.id, %node, candidates = survivors.len(), ?pick, "ambiguous room");
    }

    Resolution::Found {
        node,
        candidates: survivors.len(),
        pick,
    }
}

/// A room with no stored descriptions accepts anything; an empty observed
/// description skips the check.
fn description_matches(node: &Node, desc: &str) -> bool {
    if desc.is_empty() || node.descriptions.is_empty() {
        return true;
    }
    node.descriptions
        .iter()
        .any(|d| eq_caseless(d.trim(), desc))
}

/// Requires the two exit sets to share at least half of the smaller one.
/// An empty set on either side carries no information and passes.
fn exits_match(candidate: &ExitSet, observed: &ExitSet) -> bool {
    if candidate.is_empty() || observed.is_empty() {
        return true;
    }
    let needed = candidate.len().min(observed.len()) / 2;
    candidate.overlap(observed) >= needed
}

fn select(
    zone: &Zone,
    many: &[&Node],
    prior: Option<NodeId>,
    announced: Option<NodeId>,
    moved: bool,
) -> (NodeId, Pick) {
    if let Some(prior_node) = prior.and_then(|p| zone.node(p)) {
        let stayed = many.iter().any(|n| n.id == prior_node.id);
        if stayed && !moved {
            return (prior_node.id, Pick::Stayed);
        }

        let mut adjacent = many
            .iter()
            .filter(|n| n.id != prior_node.id && prior_node.edge_to(n.id).is_some());
        if let (Some(only), None) = (adjacent.next(), adjacent.next()) {
            return (only.id, Pick::Adjacent);
        }

        if stayed {
            return (prior_node.id, Pick::Stayed);
        }
    }

    if let Some(id) = announced
        && many.iter().any(|n| n.id == id)
    {
        return (id, Pick::Announced);
    }

    (many[0].id, Pick::FirstListed)
}
