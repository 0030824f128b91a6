//! Postgres-backed stores. Each record is one JSONB row, upserted atomically.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::debug;

use crate::models::job::{JobRequirement, JobRow};
use crate::models::profile::{ProfessionalProfile, ProfileRow};
use crate::store::{Store, StoreError};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store<ProfessionalProfile> for PgStore {
    async fn get(&self, id: &str) -> Result<Option<ProfessionalProfile>, StoreError> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT candidate_id, data, updated_at FROM profiles WHERE candidate_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| {
            debug!("Loaded profile {} (updated {})", r.candidate_id, r.updated_at);
            r.data.0
        }))
    }

    async fn put(&self, record: ProfessionalProfile) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (candidate_id, data, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (candidate_id)
            DO UPDATE SET data = EXCLUDED.data, updated_at = now()
            "#,
        )
        .bind(&record.candidate_id)
        .bind(Json(&record))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM profiles WHERE candidate_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<ProfessionalProfile>, StoreError> {
        let rows = sqlx::query_as::<_, ProfileRow>(
            "SELECT candidate_id, data, updated_at FROM profiles ORDER BY candidate_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.data.0).collect())
    }
}

#[async_trait]
impl Store<JobRequirement> for PgStore {
    async fn get(&self, id: &str) -> Result<Option<JobRequirement>, StoreError> {
        let row = sqlx::query_as::<_, JobRow>(
            "SELECT job_id, data, updated_at FROM jobs WHERE job_id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| {
            debug!("Loaded job {} (updated {})", r.job_id, r.updated_at);
            r.data.0
        }))
    }

    async fn put(&self, record: JobRequirement) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO jobs (job_id, data, updated_at)
            VALUES ($1, $2, now())
            ON CONFLICT (job_id)
            DO UPDATE SET data = EXCLUDED.data, updated_at = now()
            "#,
        )
        .bind(&record.job_id)
        .bind(Json(&record))
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM jobs WHERE job_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<JobRequirement>, StoreError> {
        let rows = sqlx::query_as::<_, JobRow>(
            "SELECT job_id, data, updated_at FROM jobs ORDER BY job_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(|r| r.data.0).collect())
    }
}
