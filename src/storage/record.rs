//! Stored form of a link
//!
//! Identity fields are immutable. The click counter and limit live behind a
//! mutex owned by the record, so concurrent opens of the same code serialize
//! while different codes never contend.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use uuid::Uuid;

use super::models::ShortLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickCounters {
    pub clicks: u64,
    pub limit: u64,
}

impl ClickCounters {
    pub fn is_exhausted(&self) -> bool {
        self.clicks >= self.limit
    }
}

/// Result of a guarded click attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click was counted; `counters` holds the values after the increment
    Counted { counters: ClickCounters },
    /// The limit was already reached, nothing changed
    Exhausted { counters: ClickCounters },
}

/// Result of a guarded limit change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitChange {
    Updated { counters: ClickCounters },
    BelowClicks { counters: ClickCounters },
}

#[derive(Debug)]
pub struct LinkRecord {
    code: String,
    owner_id: Uuid,
    url: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    counters: Mutex<ClickCounters>,
}

impl LinkRecord {
    pub fn new(
        code: String,
        owner_id: Uuid,
        url: String,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
        click_limit: u64,
    ) -> Self {
        Self {
            code,
            owner_id,
            url,
            created_at,
            expires_at,
            counters: Mutex::new(ClickCounters {
                clicks: 0,
                limit: click_limit,
            }),
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn owner_id(&self) -> &Uuid {
        &self.owner_id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_owned_by(&self, owner_id: &Uuid) -> bool {
        self.owner_id == *owner_id
    }

    pub fn counters(&self) -> ClickCounters {
        *self.counters.lock()
    }

    /// Check-then-increment under the record lock
    pub fn try_click(&self) -> ClickOutcome {
        let mut counters = self.counters.lock();
        if counters.is_exhausted() {
            return ClickOutcome::Exhausted {
                counters: *counters,
            };
        }
        counters.clicks += 1;
        ClickOutcome::Counted {
            counters: *counters,
        }
    }

    /// Replace the limit unless it would drop below the clicks already counted
    pub fn set_limit(&self, new_limit: u64) -> LimitChange {
        let mut counters = self.counters.lock();
        if new_limit < counters.clicks {
            return LimitChange::BelowClicks {
                counters: *counters,
            };
        }
        counters.limit = new_limit;
        LimitChange::Updated {
            counters: *counters,
        }
    }

    pub fn snapshot(&self) -> ShortLink {
        let counters = self.counters();
        ShortLink {
            code: self.code.clone(),
            owner_id: self.owner_id,
            url: self.url.clone(),
            created_at: self.created_at,
            expires_at: self.expires_at,
            click_count: counters.clicks,
            click_limit: counters.limit,
        }
    }
}
