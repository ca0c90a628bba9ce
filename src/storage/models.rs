use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Immutable copy of a link taken at one point in time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub code: String,
    pub owner_id: Uuid,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub click_count: u64,
    pub click_limit: u64,
}

/// Outcome status of a link operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkStatus {
    Active,
    NotFound,
    Expired,
    LimitExhausted,
    Forbidden,
    InvalidInput,
}

impl LinkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::NotFound => "NOT_FOUND",
            Self::Expired => "EXPIRED",
            Self::LimitExhausted => "LIMIT_EXHAUSTED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidInput => "INVALID_INPUT",
        }
    }
}

impl std::fmt::Display for LinkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
