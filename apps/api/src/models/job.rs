use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A job posting's requirements. Skill lists carry set semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRequirement {
    pub job_id: String,
    pub title: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub min_experience_years: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Row shape of the `jobs` table.
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub job_id: String,
    pub data: Json<JobRequirement>,
    pub updated_at: DateTime<Utc>,
}
