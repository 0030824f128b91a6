//! Cache of transferable inferences per (candidate, job) pair.
//!
//! Entries remember the skill inputs they were inferred from. A lookup with
//! different inputs (the profile was re-uploaded, the job was edited) is a
//! miss, so stale inferences are never served.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::models::matching::TransferableSkillInference;
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub candidate_id: String,
    pub job_id: String,
}

impl CacheKey {
    pub fn new(candidate_id: &str, job_id: &str) -> Self {
        Self {
            candidate_id: candidate_id.to_string(),
            job_id: job_id.to_string(),
        }
    }

    fn redis_key(&self) -> String {
        format!("transferable:{}:{}", self.candidate_id, self.job_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedInferences {
    pub candidate_skills: Vec<String>,
    pub job_skills: Vec<String>,
    pub inferences: Vec<TransferableSkillInference>,
    pub cached_at: DateTime<Utc>,
}

impl CachedInferences {
    pub fn new(
        candidate_skills: Vec<String>,
        job_skills: Vec<String>,
        inferences: Vec<TransferableSkillInference>,
    ) -> Self {
        Self {
            candidate_skills,
            job_skills,
            inferences,
            cached_at: Utc::now(),
        }
    }

    /// Whether this entry was computed from exactly these inputs.
    pub fn matches_inputs(&self, candidate_skills: &[String], job_skills: &[String]) -> bool {
        self.candidate_skills == candidate_skills && self.job_skills == job_skills
    }
}

#[async_trait]
pub trait InferenceCache: Send + Sync {
    async fn get(&self, key: &CacheKey) -> Result<Option<CachedInferences>, StoreError>;

    async fn put(&self, key: &CacheKey, entry: CachedInferences) -> Result<(), StoreError>;
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory backend
// ────────────────────────────────────────────────────────────────────────────

pub struct MemoryInferenceCache {
    ttl: Duration,
    entries: RwLock<HashMap<CacheKey, CachedInferences>>,
}

impl MemoryInferenceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn is_expired(&self, entry: &CachedInferences, now: DateTime<Utc>) -> bool {
        match chrono::Duration::from_std(self.ttl) {
            Ok(ttl) => entry.cached_at + ttl <= now,
            Err(_) => false, // ttl too large to represent: never expires
        }
    }
}

#[async_trait]
impl InferenceCache for MemoryInferenceCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<CachedInferences>, StoreError> {
        let entries = self.entries.read().await;
        let now = Utc::now();
        Ok(entries
            .get(key)
            .filter(|e| !self.is_expired(e, now))
            .cloned())
    }

    async fn put(&self, key: &CacheKey, entry: CachedInferences) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        let now = Utc::now();
        entries.retain(|_, e| !self.is_expired(e, now));
        entries.insert(key.clone(), entry);
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Redis backend
// ────────────────────────────────────────────────────────────────────────────

/// Redis-backed cache. Entries are JSON strings written with `SET … EX ttl`.
pub struct RedisInferenceCache {
    client: redis::Client,
    ttl_secs: u64,
}

impl RedisInferenceCache {
    pub fn new(client: redis::Client, ttl: Duration) -> Self {
        Self {
            client,
            ttl_secs: ttl.as_secs().max(1),
        }
    }
}

#[async_trait]
impl InferenceCache for RedisInferenceCache {
    async fn get(&self, key: &CacheKey) -> Result<Option<CachedInferences>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(key.redis_key()).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, key: &CacheKey, entry: CachedInferences) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&entry)?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex::<_, _, ()>(key.redis_key(), payload, self.ttl_secs)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::supplier::testing::inference;

    fn skills(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_memory_cache_round_trip() {
        let cache = MemoryInferenceCache::new(Duration::from_secs(60));
        let key = CacheKey::new("c1", "j1");
        let entry = CachedInferences::new(
            skills(&["python"]),
            skills(&["machine learning"]),
            vec![inference("machine learning", 0.8)],
        );
        cache.put(&key, entry.clone()).await.unwrap();

        assert_eq!(cache.get(&key).await.unwrap(), Some(entry));
        assert!(cache.get(&CacheKey::new("c1", "j2")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_entry_is_a_miss() {
        let cache = MemoryInferenceCache::new(Duration::from_secs(60));
        let key = CacheKey::new("c1", "j1");
        let mut entry = CachedInferences::new(vec![], vec![], vec![]);
        entry.cached_at = Utc::now() - chrono::Duration::seconds(120);
        cache.put(&key, entry).await.unwrap();

        assert!(cache.get(&key).await.unwrap().is_none());
    }

    #[test]
    fn test_matches_inputs_detects_changes() {
        let entry = CachedInferences::new(skills(&["python", "sql"]), skills(&["ml"]), vec![]);
        assert!(entry.matches_inputs(&skills(&["python", "sql"]), &skills(&["ml"])));
        assert!(!entry.matches_inputs(&skills(&["python"]), &skills(&["ml"])));
        assert!(!entry.matches_inputs(&skills(&["python", "sql"]), &skills(&["ml", "go"])));
    }

    #[test]
    fn test_redis_key_layout() {
        assert_eq!(CacheKey::new("c1", "j9").redis_key(), "transferable:c1:j9");
    }
}
