pub mod planner;
pub mod resolver;
pub mod translator;

pub use planner::find_path;
pub use resolver::{Pick, Resolution, RoomObservation, resolve, resolve_in_place};
pub use translator::{edge_command, join_commands, path_commands};
