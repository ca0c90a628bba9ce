//! Link lifecycle service
//!
//! Creation, resolution and owner-gated management of short links on top of
//! the in-memory store. Resolution and management report their outcome as a
//! [`LinkStatus`] value; only creation returns an error.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, info, warn};

use crate::config::LinkConfig;
use crate::errors::{ClicklinkError, Result};
use crate::services::code_generator::CodeGenerator;
use crate::services::identity::{IdentityProvider, OwnerId, RandomIdentity};
use crate::storage::{ClickOutcome, LimitChange, LinkRecord, LinkStatus, LinkStore, ShortLink};
use crate::utils::url_validator::validate_url;

/// Generation attempts before creation gives up on finding a free code
pub const MAX_GENERATION_ATTEMPTS: u32 = 50;

// ============ Result types ============

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateResult {
    pub owner_id: OwnerId,
    pub code: String,
    pub short_url: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenResult {
    pub status: LinkStatus,
    /// Target URL, present only when the open was counted
    pub url: Option<String>,
    pub click_count: u64,
    pub click_limit: u64,
    pub expires_at: Option<DateTime<Utc>>,
    pub message: String,
}

impl OpenResult {
    fn not_found() -> Self {
        Self {
            status: LinkStatus::NotFound,
            url: None,
            click_count: 0,
            click_limit: 0,
            expires_at: None,
            message: "Link not found".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpResult {
    pub status: LinkStatus,
    pub message: String,
}

impl OpResult {
    fn new(status: LinkStatus, message: &str) -> Self {
        Self {
            status,
            message: message.to_string(),
        }
    }
}

// ============ LinkService Implementation ============

pub struct LinkService {
    store: Arc<LinkStore>,
    generator: CodeGenerator,
    identity: Arc<dyn IdentityProvider>,
    base_url: String,
    ttl: TimeDelta,
}

impl LinkService {
    pub fn new(
        store: Arc<LinkStore>,
        generator: CodeGenerator,
        base_url: impl Into<String>,
        ttl: Duration,
    ) -> Result<Self> {
        let ttl = TimeDelta::from_std(ttl).map_err(|e| {
            ClicklinkError::configuration(format!("Link TTL out of range: {}", e))
        })?;
        if Utc::now().checked_add_signed(ttl).is_none() {
            return Err(ClicklinkError::configuration(format!(
                "Link TTL out of range: {}s",
                ttl.num_seconds()
            )));
        }
        Ok(Self {
            store,
            generator,
            identity: Arc::new(RandomIdentity),
            base_url: base_url.into(),
            ttl,
        })
    }

    /// Build the service with a fresh store from the `[app]` configuration
    pub fn from_config(config: &LinkConfig) -> Result<Self> {
        let generator = CodeGenerator::new(config.code_length)?;
        Self::new(
            Arc::new(LinkStore::new()),
            generator,
            config.base_url.clone(),
            config.ttl(),
        )
    }

    pub fn with_identity_provider(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = identity;
        self
    }

    pub fn identity_provider(&self) -> Arc<dyn IdentityProvider> {
        Arc::clone(&self.identity)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn code_length(&self) -> usize {
        self.generator.code_length()
    }

    pub fn store(&self) -> &Arc<LinkStore> {
        &self.store
    }

    pub fn link_count(&self) -> usize {
        self.store.len()
    }

    fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    fn sweep_expired(&self) {
        self.store.delete_expired(Utc::now());
    }

    /// Create a new short link owned by `owner_id`, or by a fresh identity when none is given
    pub fn create(
        &self,
        owner_id: Option<OwnerId>,
        url: &str,
        click_limit: i64,
    ) -> Result<CreateResult> {
        let owner_id = owner_id.unwrap_or_else(|| self.identity.fresh_identity());

        let url = validate_url(url).map_err(|e| ClicklinkError::invalid_input(e.to_string()))?;
        if click_limit <= 0 {
            return Err(ClicklinkError::invalid_input("maxClicks must be > 0"));
        }
        let click_limit = click_limit as u64;

        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            ClicklinkError::configuration(format!(
                "Link TTL out of range: {}s",
                self.ttl.num_seconds()
            ))
        })?;

        let mut attempts = 0;
        let code = loop {
            attempts += 1;
            if attempts > MAX_GENERATION_ATTEMPTS {
                warn!(
                    "LinkService: no free code after {} attempts for '{}'",
                    MAX_GENERATION_ATTEMPTS, url
                );
                return Err(ClicklinkError::collision_exhausted("Too many collisions"));
            }
            let candidate = self.generator.generate(&owner_id, &url);
            if !self.store.exists(&candidate) {
                break candidate;
            }
            debug!("LinkService: code '{}' already taken, retrying", candidate);
        };

        self.store.save(LinkRecord::new(
            code.clone(),
            owner_id,
            url.clone(),
            now,
            expires_at,
            click_limit,
        ));

        info!("LinkService: created link '{}' -> '{}'", code, url);

        Ok(CreateResult {
            owner_id,
            short_url: self.short_url(&code),
            code,
            expires_at,
        })
    }

    /// Resolve a code, counting one click when the link is live and not exhausted
    pub fn open(&self, code: &str) -> OpenResult {
        // 这里只检查当前链接是否过期，不做整体清理
        let Some(record) = self.store.get(code) else {
            return OpenResult::not_found();
        };

        if record.is_expired(Utc::now()) {
            self.store.remove_record(&record);
            let counters = record.counters();
            info!("LinkService: '{}' expired on open, removed", code);
            return OpenResult {
                status: LinkStatus::Expired,
                url: None,
                click_count: counters.clicks,
                click_limit: counters.limit,
                expires_at: Some(record.expires_at()),
                message: "Link expired (removed)".to_string(),
            };
        }

        match record.try_click() {
            ClickOutcome::Exhausted { counters } => {
                debug!("LinkService: '{}' click limit exhausted", code);
                OpenResult {
                    status: LinkStatus::LimitExhausted,
                    url: None,
                    click_count: counters.clicks,
                    click_limit: counters.limit,
                    expires_at: Some(record.expires_at()),
                    message: "Click limit exhausted".to_string(),
                }
            }
            ClickOutcome::Counted { counters } => {
                let message = if counters.is_exhausted() {
                    "OK (limit exhausted after this open)"
                } else {
                    "OK"
                };
                debug!(
                    "LinkService: opened '{}' ({}/{})",
                    code, counters.clicks, counters.limit
                );
                OpenResult {
                    status: LinkStatus::Active,
                    url: Some(record.url().to_string()),
                    click_count: counters.clicks,
                    click_limit: counters.limit,
                    expires_at: Some(record.expires_at()),
                    message: message.to_string(),
                }
            }
        }
    }

    /// Live links of `owner_id`, newest first
    pub fn list(&self, owner_id: &OwnerId) -> Vec<ShortLink> {
        self.sweep_expired();
        self.store.list_by_owner(owner_id)
    }

    pub fn update_limit(&self, owner_id: &OwnerId, code: &str, new_limit: i64) -> OpResult {
        self.sweep_expired();

        let Some(record) = self.store.get(code) else {
            return OpResult::new(LinkStatus::NotFound, "Link not found");
        };
        if !record.is_owned_by(owner_id) {
            return OpResult::new(LinkStatus::Forbidden, "Only owner can update");
        }
        if new_limit <= 0 {
            return OpResult::new(LinkStatus::InvalidInput, "newLimit must be > 0");
        }

        match record.set_limit(new_limit as u64) {
            LimitChange::BelowClicks { .. } => OpResult::new(
                LinkStatus::InvalidInput,
                "newLimit must be >= current clicks",
            ),
            LimitChange::Updated { counters } => {
                info!(
                    "LinkService: limit of '{}' set to {} ({} clicks)",
                    code, counters.limit, counters.clicks
                );
                OpResult::new(LinkStatus::Active, "Limit updated")
            }
        }
    }

    pub fn delete(&self, owner_id: &OwnerId, code: &str) -> OpResult {
        self.sweep_expired();

        let Some(record) = self.store.get(code) else {
            return OpResult::new(LinkStatus::NotFound, "Link not found");
        };
        if !record.is_owned_by(owner_id) {
            return OpResult::new(LinkStatus::Forbidden, "Only owner can delete");
        }

        if !self.store.remove_record(&record) {
            // 并发删除已抢先完成
            return OpResult::new(LinkStatus::NotFound, "Link not found");
        }
        info!("LinkService: deleted '{}'", code);
        OpResult::new(LinkStatus::Active, "Deleted")
    }

    /// Remove all expired links now, returning how many were removed
    pub fn cleanup_expired_now(&self) -> usize {
        self.store.delete_expired(Utc::now())
    }
}
