//! Keyed record stores for profiles and jobs, plus the transferable-inference cache.
//!
//! Every backend replaces whole records atomically: a reader sees either the
//! previous record or the new one, never a partial write.

pub mod cache;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::job::JobRequirement;
use crate::models::profile::ProfessionalProfile;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A record addressable by a unique string identifier.
pub trait Record: Clone + Send + Sync + 'static {
    const KIND: &'static str;

    fn key(&self) -> &str;
}

impl Record for ProfessionalProfile {
    const KIND: &'static str = "candidate";

    fn key(&self) -> &str {
        &self.candidate_id
    }
}

impl Record for JobRequirement {
    const KIND: &'static str = "job";

    fn key(&self) -> &str {
        &self.job_id
    }
}

#[async_trait]
pub trait Store<T: Record>: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<T>, StoreError>;

    /// Inserts or overwrites by key.
    async fn put(&self, record: T) -> Result<(), StoreError>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;

    /// All records, ordered by key.
    async fn list(&self) -> Result<Vec<T>, StoreError>;
}

pub type ProfileStore = dyn Store<ProfessionalProfile>;
pub type JobStore = dyn Store<JobRequirement>;
