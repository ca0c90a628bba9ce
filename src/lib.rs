//! Clicklink - an in-memory URL shortener with click limits
//!
//! Links map a short base-62 code to a target URL. Every link belongs to the
//! identity that created it, expires after a configured TTL and stops
//! resolving once its click limit is reached until the owner raises it.
//!
//! # Architecture
//! - `storage`: Concurrent in-memory link store with per-record locking
//! - `services`: Code generation, the link lifecycle service, expiry sweeper
//! - `interfaces`: Interactive console front end
//! - `config`: Configuration loading (TOML file + environment)
//! - `system`: Logging setup and browser launching
//! - `utils`: Base-62 encoding and URL validation

pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
