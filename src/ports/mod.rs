//! Port traits the domain depends on.

pub mod config_port;
pub mod history_port;
