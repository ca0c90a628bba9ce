//! Owner identities
//!
//! Fresh identities are handed out by an explicit provider instead of a
//! global, so callers (and tests) decide where new owners come from.

use uuid::Uuid;

pub type OwnerId = Uuid;

pub trait IdentityProvider: Send + Sync {
    fn fresh_identity(&self) -> OwnerId;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdentity;

impl IdentityProvider for RandomIdentity {
    fn fresh_identity(&self) -> OwnerId {
        Uuid::new_v4()
    }
}
