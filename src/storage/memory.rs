//! In-memory link store
//!
//! Records are shared as `Arc<LinkRecord>`: lookups hand out the shared
//! record, whose counters can only be changed through its locked methods.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use super::models::ShortLink;
use super::record::LinkRecord;

#[derive(Debug, Default)]
pub struct LinkStore {
    inner: DashMap<String, Arc<LinkRecord>>,
}

impl LinkStore {
    pub fn new() -> Self {
        Self {
            inner: DashMap::new(),
        }
    }

    pub fn exists(&self, code: &str) -> bool {
        self.inner.contains_key(code)
    }

    /// Insert unconditionally; callers check `exists` first
    pub fn save(&self, record: LinkRecord) -> Arc<LinkRecord> {
        let record = Arc::new(record);
        self.inner
            .insert(record.code().to_string(), Arc::clone(&record));
        record
    }

    pub fn get(&self, code: &str) -> Option<Arc<LinkRecord>> {
        self.inner.get(code).map(|entry| Arc::clone(entry.value()))
    }

    pub fn delete(&self, code: &str) -> bool {
        self.inner.remove(code).is_some()
    }

    /// Remove `record` only if it is still the entry stored under its code
    pub fn remove_record(&self, record: &Arc<LinkRecord>) -> bool {
        self.inner
            .remove_if(record.code(), |_, stored| Arc::ptr_eq(stored, record))
            .is_some()
    }

    /// Owner's links, most recently created first
    pub fn list_by_owner(&self, owner_id: &Uuid) -> Vec<ShortLink> {
        let mut links: Vec<ShortLink> = self
            .inner
            .iter()
            .filter(|entry| entry.value().is_owned_by(owner_id))
            .map(|entry| entry.value().snapshot())
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        links
    }

    /// Remove every record with `expires_at <= now`, returning how many this call removed
    pub fn delete_expired(&self, now: DateTime<Utc>) -> usize {
        // 先收集键再删除：遍历时持有分片读锁，不能在迭代中删除
        let candidates: Vec<String> = self
            .inner
            .iter()
            .filter(|entry| entry.value().is_expired(now))
            .map(|entry| entry.key().clone())
            .collect();

        let removed = candidates
            .iter()
            .filter(|code| {
                self.inner
                    .remove_if(code.as_str(), |_, record| record.is_expired(now))
                    .is_some()
            })
            .count();

        if removed > 0 {
            debug!("LinkStore: removed {} expired links", removed);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(code: &str, owner: Uuid, created_at: DateTime<Utc>, ttl_secs: i64) -> LinkRecord {
        LinkRecord::new(
            code.to_string(),
            owner,
            format!("https://example.com/{}", code),
            created_at,
            created_at + Duration::seconds(ttl_secs),
            5,
        )
    }

    #[test]
    fn test_save_get_exists_delete() {
        let store = LinkStore::new();
        let owner = Uuid::new_v4();
        assert!(!store.exists("code0001"));

        store.save(record("code0001", owner, Utc::now(), 60));
        assert!(store.exists("code0001"));
        assert_eq!(store.get("code0001").unwrap().url(), "https://example.com/code0001");
        assert_eq!(store.len(), 1);

        assert!(store.delete("code0001"));
        assert!(!store.delete("code0001"));
        assert!(store.get("code0001").is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_record_leaves_replacement_in_place() {
        let store = LinkStore::new();
        let owner = Uuid::new_v4();
        let stale = store.save(record("reused01", owner, Utc::now(), 60));
        store.delete("reused01");
        let fresh = store.save(record("reused01", owner, Utc::now(), 60));

        assert!(!store.remove_record(&stale));
        assert!(store.exists("reused01"));

        assert!(store.remove_record(&fresh));
        assert!(!store.exists("reused01"));
        assert!(!store.remove_record(&fresh));
    }

    #[test]
    fn test_get_shares_the_stored_record() {
        let store = LinkStore::new();
        store.save(record("shared01", Uuid::new_v4(), Utc::now(), 60));

        store.get("shared01").unwrap().try_click();
        assert_eq!(store.get("shared01").unwrap().counters().clicks, 1);
    }

    #[test]
    fn test_list_by_owner_filters_and_orders_newest_first() {
        let store = LinkStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let t0 = Utc::now();

        store.save(record("oldest01", alice, t0, 60));
        store.save(record("newest01", alice, t0 + Duration::seconds(2), 60));
        store.save(record("middle01", alice, t0 + Duration::seconds(1), 60));
        store.save(record("bobs0001", bob, t0, 60));

        let codes: Vec<String> = store
            .list_by_owner(&alice)
            .into_iter()
            .map(|l| l.code)
            .collect();
        assert_eq!(codes, vec!["newest01", "middle01", "oldest01"]);
        assert_eq!(store.list_by_owner(&bob).len(), 1);
        assert!(store.list_by_owner(&Uuid::new_v4()).is_empty());
    }

    #[test]
    fn test_delete_expired_removes_only_expired() {
        let store = LinkStore::new();
        let owner = Uuid::new_v4();
        let t0 = Utc::now();

        store.save(record("short001", owner, t0, 10));
        store.save(record("short002", owner, t0, 10));
        store.save(record("long0001", owner, t0, 100));

        assert_eq!(store.delete_expired(t0 + Duration::seconds(5)), 0);
        // expires_at == now 视为已过期
        assert_eq!(store.delete_expired(t0 + Duration::seconds(10)), 2);
        assert_eq!(store.delete_expired(t0 + Duration::seconds(10)), 0);
        assert!(store.exists("long0001"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_concurrent_sweeps_do_not_double_count() {
        let store = Arc::new(LinkStore::new());
        let owner = Uuid::new_v4();
        let t0 = Utc::now();
        for i in 0..200 {
            store.save(record(&format!("code{:04}", i), owner, t0, 1));
        }

        let later = t0 + Duration::seconds(5);
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.delete_expired(later))
            })
            .collect();
        let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

        assert_eq!(total, 200);
        assert!(store.is_empty());
    }
}
