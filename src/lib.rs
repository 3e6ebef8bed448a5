pub mod config;
pub mod error;
pub mod hardening;
pub mod import;
pub mod input;
pub mod models;
pub mod services;
pub mod sink;
pub mod state;
pub mod util;
pub mod worker;

// Convenient re-exports (so call sites can do `mudmap::NavigationSession`, etc.)
pub use models::{Atlas, Direction, Edge, ExitSet, Label, Node, NodeId, Position, Zone, ZoneId};
pub use sink::{CommandSink, NullSink, RecordingSink};
pub use state::session::{DestinationMarker, NavState, NavigationSession, RouteChange, Status, Unresolved};
pub use worker::{NavHandle, start_nav_worker};
