use std::sync::Arc;

use crate::services::identity::{IdentityProvider, OwnerId};

/// The console's current owner identity
pub struct Session {
    identity: Arc<dyn IdentityProvider>,
    user_id: Option<OwnerId>,
}

impl Session {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            identity,
            user_id: None,
        }
    }

    /// Current user, created on first use
    pub fn ensure_user(&mut self) -> OwnerId {
        *self
            .user_id
            .get_or_insert_with(|| self.identity.fresh_identity())
    }

    pub fn user_id(&self) -> Option<OwnerId> {
        self.user_id
    }

    pub fn login(&mut self, user_id: OwnerId) {
        self.user_id = Some(user_id);
    }

    pub fn new_user(&mut self) -> OwnerId {
        let user_id = self.identity.fresh_identity();
        self.user_id = Some(user_id);
        user_id
    }
}
