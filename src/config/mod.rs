//! Configuration for the catalog and its patch plan
//!
//! Provides types and loading for `metascreens.toml`.

pub mod loader;
pub mod schema;

pub use loader::{find_config, find_config_from, load_config, ConfigError, CONFIG_FILE};
pub use schema::*;
