use crate::models::types::{Direction, ExitSet, NodeId};
use crate::services::resolver::RoomObservation;
use crate::util::str_is_truthy;
use tracing::debug;

/// What applying one game variable did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalEffect {
    /// Part of the room description block changed
    Room,
    /// The game reported a zone (id or name)
    Zone(String),
    /// End of a room update; time to resolve
    Prompt,
    /// Not a variable we track
    Ignored,
}

/// Latest values of the game variables the mapper listens to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSignals {
    pub room_name: String,
    pub room_desc: String,
    pub exits: ExitSet,
    pub zone_id: Option<String>,
    pub zone_name: Option<String>,
    pub room_id: Option<NodeId>,
}

/// Name of the exit flag variable for a cardinal direction.
pub fn exit_signal_name(dir: Direction) -> Option<String> {
    dir.abbreviation().map(|abbr| format!("exit_{abbr}"))
}

fn exit_flag(name: &str) -> Option<Direction> {
    let suffix = name.strip_prefix("exit_")?;
    Direction::parse(suffix)
}

impl GameSignals {
    /// Records a `(name, value)` pair from the game.
    pub fn apply(&mut self, name: &str, value: &str) -> SignalEffect {
        let key = name.trim().to_ascii_lowercase();
        match key.as_str() {
            "roomname" => {
                self.room_name = value.trim().to_string();
                SignalEffect::Room
            }
            "roomdesc" => {
                self.room_desc = value.trim().to_string();
                SignalEffect::Room
            }
            "roomid" => {
                self.room_id = value.parse().ok();
                SignalEffect::Room
            }
            "zoneid" => {
                let v = value.trim().to_string();
                self.zone_id = Some(v.clone()).filter(|s| !s.is_empty());
                SignalEffect::Zone(v)
            }
            "zonename" => {
                let v = value.trim().to_string();
                self.zone_name = Some(v.clone()).filter(|s| !s.is_empty());
                SignalEffect::Zone(v)
            }
            "prompt" => SignalEffect::Prompt,
            other => match exit_flag(other) {
                Some(dir) => {
                    self.exits.set(dir, str_is_truthy(value));
                    SignalEffect::Room
                }
                None => {
                    debug!(name = %other, "ignoring unknown game variable");
                    SignalEffect::Ignored
                }
            },
        }
    }

    pub fn observation(&self) -> RoomObservation {
        RoomObservation {
            name: self.room_name.clone(),
            description: self.room_desc.clone(),
            exits: self.exits,
            room_id: self.room_id,
        }
    }
}
