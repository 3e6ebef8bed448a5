pub mod session;
pub mod signals;
