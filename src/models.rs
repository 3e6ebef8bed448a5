pub mod atlas;
pub mod types;
pub mod zone;

pub use atlas::Atlas;
pub use types::{Direction, ExitSet, NodeId, Position, ZoneId};
pub use zone::{Edge, Label, Node, Zone};
