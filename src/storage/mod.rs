//! Link storage
//!
//! A concurrent in-memory store keyed by short code. Nothing is persisted;
//! records live for the lifetime of the process or until they expire.

pub mod memory;
pub mod models;
pub mod record;

pub use memory::LinkStore;
pub use models::{LinkStatus, ShortLink};
pub use record::{ClickCounters, ClickOutcome, LimitChange, LinkRecord};
