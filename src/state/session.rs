use crate::models::types::{NodeId, ZoneId};
use crate::models::zone::Zone;
use crate::models::Atlas;
use crate::services::resolver::{Resolution, resolve, resolve_in_place};
use crate::services::{find_path, join_commands, path_commands};
use crate::sink::CommandSink;
use crate::state::signals::{GameSignals, SignalEffect};
use parking_lot::RwLock;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Marker value meaning "no destination".
pub const NO_DESTINATION: &str = "0";

/// Destination shared with the host (status bars, scripts). Clones share the value.
#[derive(Debug, Clone)]
pub struct DestinationMarker(Arc<RwLock<String>>);

impl Default for DestinationMarker {
    fn default() -> Self {
        Self(Arc::new(RwLock::new(NO_DESTINATION.to_string())))
    }
}

impl DestinationMarker {
    pub fn get(&self) -> String {
        self.0.read().clone()
    }

    pub fn set(&self, id: NodeId) {
        *self.0.write() = id.to_string();
    }

    pub fn reset(&self) {
        *self.0.write() = NO_DESTINATION.to_string();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NavState {
    Unresolved,
    Resolved,
    Routing,
}

/// What happened to the active route when the location was updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteChange {
    NoRoute,
    /// Still on the route, `remaining` steps to go
    OnRoute { remaining: usize },
    Arrived,
    /// Ended up somewhere not on the route; route dropped
    Left,
}

/// Why the location could not be determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Unresolved {
    /// The game reported no room title
    NoName,
    /// No room on the map fits
    NoMatch { name: String },
    /// The game reported a zone we have no map for
    UnknownZone { zone: String },
}

/// Outcome of every session operation. Nothing here is fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    NoMap,
    /// Goto refused: we do not know where we are
    LocationUnknown,
    Unresolved(Unresolved),
    Located {
        id: NodeId,
        name: String,
        /// Number of rooms that fit; more than one means the pick was heuristic
        candidates: usize,
        route: RouteChange,
        /// Set when the room was only found by switching zones
        switched_zone: Option<String>,
    },
    /// Zone switched on request of the game; location must be re-established
    ZoneEntered { zone: String },
    DestinationNotFound { target: String },
    AlreadyThere { id: NodeId },
    NoPath { id: NodeId },
    Walking {
        id: NodeId,
        name: String,
        steps: usize,
        commands: String,
    },
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::NoMap => f.write_str("no map loaded"),
            Status::LocationUnknown => f.write_str("location unknown"),
            Status::Unresolved(Unresolved::NoName) => f.write_str("location unknown (no room name)"),
            Status::Unresolved(Unresolved::NoMatch { name }) => write!(f, "no room matches \"{name}\""),
            Status::Unresolved(Unresolved::UnknownZone { zone }) => write!(f, "no map for zone \"{zone}\""),
            Status::Located { id, name, candidates, route, switched_zone } => {
                if let Some(zone) = switched_zone {
                    write!(f, "[{zone}] ")?;
                }
                write!(f, "#{id} {name}")?;
                if *candidates > 1 {
                    write!(f, " (multiple matches ({candidates}))")?;
                }
                match route {
                    RouteChange::NoRoute => Ok(()),
                    RouteChange::OnRoute { remaining } => write!(f, ", {remaining} steps to go"),
                    RouteChange::Arrived => f.write_str(", arrived"),
                    RouteChange::Left => f.write_str(", left route"),
                }
            }
            Status::ZoneEntered { zone } => write!(f, "entered zone {zone}"),
            Status::DestinationNotFound { target } => write!(f, "destination not found: {target}"),
            Status::AlreadyThere { id } => write!(f, "already at destination #{id}"),
            Status::NoPath { id } => write!(f, "no path to #{id}"),
            Status::Walking { id, name, steps, .. } => write!(f, "walking to #{id} {name} ({steps} steps)"),
        }
    }
}

/// Serializable view of the session for debugging and status bars.
#[derive(Debug, Clone, Serialize)]
pub struct NavSnapshot {
    pub state: NavState,
    pub zone: Option<ZoneId>,
    pub current: Option<NodeId>,
    pub level: i32,
    pub path: Vec<NodeId>,
    pub destination: String,
    /// Zone as last reported by the game, which may have no map
    pub game_zone_id: Option<String>,
    pub game_zone_name: Option<String>,
}

/// Owns the navigation state: which zone is active, where we are, and the
/// route being walked. Every entry point is synchronous; a host delivering
/// events from several threads must serialize them (see [`crate::worker`]).
pub struct NavigationSession {
    atlas: Atlas,
    active: Option<Arc<Zone>>,
    signals: GameSignals,
    state: NavState,
    /// Last resolved room. Kept while unresolved so it can steer the next match.
    current: Option<NodeId>,
    level: i32,
    path: Vec<NodeId>,
    /// Room variables arrived since the last resolution
    room_dirty: bool,
    marker: DestinationMarker,
    sink: Box<dyn CommandSink>,
}

impl fmt::Debug for NavigationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationSession")
            .field("zone", &self.active.as_ref().map(|z| z.id))
            .field("state", &self.state)
            .field("current", &self.current)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl NavigationSession {
    pub fn new(sink: impl CommandSink + 'static) -> Self {
        Self {
            atlas: Atlas::default(),
            active: None,
            signals: GameSignals::default(),
            state: NavState::Unresolved,
            current: None,
            level: 0,
            path: Vec::new(),
            room_dirty: false,
            marker: DestinationMarker::default(),
            sink: Box::new(sink),
        }
    }

    pub fn with_atlas(sink: impl CommandSink + 'static, atlas: Atlas) -> Self {
        let mut sess = Self::new(sink);
        sess.load_atlas(atlas, None);
        sess
    }

    // ----- accessors -----

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn current_node(&self) -> Option<NodeId> {
        self.current
    }

    pub fn current_level(&self) -> i32 {
        self.level
    }

    pub fn highlighted_path(&self) -> &[NodeId] {
        &self.path
    }

    pub fn active_zone(&self) -> Option<&Arc<Zone>> {
        self.active.as_ref()
    }

    pub fn atlas(&self) -> &Atlas {
        &self.atlas
    }

    pub fn signals(&self) -> &GameSignals {
        &self.signals
    }

    /// Handle to the shared destination marker.
    pub fn marker(&self) -> DestinationMarker {
        self.marker.clone()
    }

    pub fn snapshot(&self) -> NavSnapshot {
        NavSnapshot {
            state: self.state,
            zone: self.active.as_ref().map(|z| z.id),
            current: self.current,
            level: self.level,
            path: self.path.clone(),
            destination: self.marker.get(),
            game_zone_id: self.signals.zone_id.clone(),
            game_zone_name: self.signals.zone_name.clone(),
        }
    }

    // ----- map management -----

    /// Replaces every zone at once. The active zone is `start` if given, else the
    /// zone with the same id as before, else the first one. The location
    /// survives only if the active zone still has that room.
    pub fn load_atlas(&mut self, atlas: Atlas, start: Option<&str>) {
        let keep = self.active.as_ref().map(|z| z.id);
        let next = start
            .and_then(|key| atlas.find(key))
            .or_else(|| keep.and_then(|id| atlas.zone(id)))
            .or_else(|| atlas.zones().next())
            .cloned();
        self.atlas = atlas;

        match next {
            Some(zone) if Some(zone.id) == keep => self.refresh_active(zone),
            Some(zone) => self.enter_zone(zone),
            None => {
                self.active = None;
                self.forget_location();
            }
        }
    }

    /// Swaps a single zone. If it is the active one, the location is kept when
    /// the room still exists.
    pub fn replace_zone(&mut self, zone: Zone) {
        let id = zone.id;
        self.atlas.replace_zone(zone);
        let is_active = self.active.as_ref().is_some_and(|z| z.id == id);
        match self.atlas.zone(id).cloned() {
            Some(zone) if is_active => self.refresh_active(zone),
            Some(zone) if self.active.is_none() => self.enter_zone(zone),
            _ => {}
        }
    }

    fn refresh_active(&mut self, zone: Arc<Zone>) {
        let still_there = self.current.is_some_and(|id| zone.contains(id));
        let path_ok = self.path.iter().all(|id| zone.contains(*id));
        self.active = Some(zone);
        if !still_there {
            self.forget_location();
        } else if !path_ok {
            self.path.clear();
            self.state = NavState::Resolved;
        }
    }

    fn enter_zone(&mut self, zone: Arc<Zone>) {
        info!(zone = %zone.id, name = %zone.name, "active zone");
        self.active = Some(zone);
        self.forget_location();
    }

    fn forget_location(&mut self) {
        self.current = None;
        self.path.clear();
        self.state = NavState::Unresolved;
    }

    // ----- game events -----

    /// Feeds one game variable. Returns a status when the variable caused the
    /// location to change (or to become unknown).
    pub fn signal(&mut self, name: &str, value: &str) -> Option<Status> {
        match self.signals.apply(name, value) {
            SignalEffect::Room => {
                self.room_dirty = true;
                if name.trim().eq_ignore_ascii_case("roomname") && self.signals.room_name.is_empty() {
                    self.state = NavState::Unresolved;
                    return Some(Status::Unresolved(Unresolved::NoName));
                }
                None
            }
            SignalEffect::Zone(key) => self.zone_signal(&key),
            SignalEffect::Prompt if self.room_dirty => Some(self.resolve_now()),
            SignalEffect::Prompt | SignalEffect::Ignored => None,
        }
    }

    /// Forces a resolution with the current game variables.
    pub fn find_me(&mut self) -> Status {
        self.resolve_now()
    }

    fn zone_signal(&mut self, key: &str) -> Option<Status> {
        if key.is_empty() || self.atlas.is_empty() {
            return None;
        }

        match self.atlas.find(key).cloned() {
            Some(zone) if self.active.as_ref().is_some_and(|z| z.id == zone.id) => {
                // back on a mapped zone after an unknown one: let the next prompt re-match
                if self.state == NavState::Unresolved {
                    self.room_dirty = true;
                }
                None
            }
            Some(zone) => {
                let name = zone.name.clone();
                self.enter_zone(zone);
                self.room_dirty = true;
                Some(Status::ZoneEntered { zone: name })
            }
            None => {
                warn!(zone = %key, "game reported a zone with no map");
                self.state = NavState::Unresolved;
                self.path.clear();
                Some(Status::Unresolved(Unresolved::UnknownZone { zone: key.to_string() }))
            }
        }
    }

    fn resolve_now(&mut self) -> Status {
        let moved = std::mem::take(&mut self.room_dirty);
        let Some(zone) = self.active.clone() else {
            return Status::NoMap;
        };

        let obs = self.signals.observation();
        let resolution = if moved {
            resolve(&zone, &obs, self.current)
        } else {
            resolve_in_place(&zone, &obs, self.current)
        };
        match resolution {
            Resolution::NoName => {
                self.state = NavState::Unresolved;
                Status::Unresolved(Unresolved::NoName)
            }
            Resolution::Found { node, candidates, .. } => self.settle(&zone, node, candidates, None),
            Resolution::NoMatch => {
                let Some(other) = self.atlas.zone_with_room_named(&obs.name, Some(zone.id)).cloned() else {
                    debug!(zone = %zone.id, name = %obs.name, "no matching room");
                    self.state = NavState::Unresolved;
                    return Status::Unresolved(Unresolved::NoMatch { name: obs.name });
                };

                info!(from = %zone.id, to = %other.id, name = %obs.name, "room found in another zone, switching");
                self.enter_zone(other.clone());
                match resolve(&other, &obs, None) {
                    Resolution::Found { node, candidates, .. } => {
                        self.settle(&other, node, candidates, Some(other.name.clone()))
                    }
                    _ => Status::Unresolved(Unresolved::NoMatch { name: obs.name }),
                }
            }
        }
    }

    fn settle(&mut self, zone: &Zone, id: NodeId, candidates: usize, switched_zone: Option<String>) -> Status {
        let (name, level) = zone
            .node(id)
            .map(|n| (n.name.clone(), n.position.z))
            .unwrap_or_default();

        self.current = Some(id);
        self.level = level;

        let pos = self.path.iter().position(|p| *p == id);
        let route = match pos {
            _ if self.path.is_empty() => RouteChange::NoRoute,
            Some(idx) if idx + 1 == self.path.len() => {
                info!(node = %id, "arrived");
                self.path.clear();
                RouteChange::Arrived
            }
            Some(idx) => RouteChange::OnRoute { remaining: self.path.len() - idx - 1 },
            None => {
                info!(node = %id, "left the route");
                self.path.clear();
                RouteChange::Left
            }
        };
        self.state = if self.path.is_empty() { NavState::Resolved } else { NavState::Routing };

        debug!(zone = %zone.id, node = %id, candidates, "located");
        Status::Located { id, name, candidates, route, switched_zone }
    }

    // ----- requests -----

    /// Reports the current location without re-resolving.
    pub fn where_am_i(&self) -> Status {
        let Some(zone) = self.active.as_ref() else {
            return Status::NoMap;
        };
        let (Some(id), false) = (self.current, self.state == NavState::Unresolved) else {
            return Status::LocationUnknown;
        };

        let name = zone.node(id).map(|n| n.name.clone()).unwrap_or_default();
        let route = match self.path.iter().position(|p| *p == id) {
            Some(idx) => RouteChange::OnRoute { remaining: self.path.len() - idx - 1 },
            None => RouteChange::NoRoute,
        };
        Status::Located { id, name, candidates: 1, route, switched_zone: None }
    }

    /// Plans a route to `target` (room number or note keyword) and dispatches it.
    pub fn goto(&mut self, target: &str) -> Status {
        let target = target.trim();
        let Some(zone) = self.active.clone() else {
            self.marker.reset();
            return Status::NoMap;
        };

        let Some(dest) = find_destination(&zone, target) else {
            info!(%target, "destination not found");
            self.marker.reset();
            return Status::DestinationNotFound { target: target.to_string() };
        };

        let origin = match (self.current, self.state) {
            (Some(id), NavState::Resolved | NavState::Routing) => id,
            _ => {
                self.marker.reset();
                return Status::LocationUnknown;
            }
        };

        if origin == dest {
            self.marker.reset();
            return Status::AlreadyThere { id: dest };
        }

        let Some((path, commands)) = find_path(&zone, origin, dest)
            .and_then(|p| path_commands(&zone, &p).map(|c| (p, c)))
        else {
            info!(from = %origin, to = %dest, "no path");
            self.marker.reset();
            return Status::NoPath { id: dest };
        };

        let dispatch = join_commands(&commands);
        info!(from = %origin, to = %dest, steps = commands.len(), commands = %dispatch, "walking");
        self.sink.dispatch(&dispatch);

        self.path = path;
        self.state = NavState::Routing;
        self.marker.set(dest);

        let name = zone.node(dest).map(|n| n.name.clone()).unwrap_or_default();
        Status::Walking { id: dest, name, steps: commands.len(), commands: dispatch }
    }
}

/// A room number, or a keyword from a room's note (first room in map order).
pub fn find_destination(zone: &Zone, target: &str) -> Option<NodeId> {
    if target.is_empty() {
        return None;
    }
    if let Ok(id) = target.parse::<NodeId>() {
        return zone.contains(id).then_some(id);
    }
    zone.nodes().iter().find(|n| n.note_matches(target)).map(|n| n.id)
}
