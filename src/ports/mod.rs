//! Port traits separating the domain from its adapters.

pub mod config_port;
pub mod data_port;
pub mod notify_port;
pub mod store_port;
