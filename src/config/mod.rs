//! Configuration
//!
//! Loaded once at startup from an optional TOML file and `CL__*`
//! environment variables, falling back to defaults.

pub mod structs;

pub use structs::{AppConfig, DEFAULT_CONFIG_PATH, ENV_PREFIX, LinkConfig, LoggingConfig};
