use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A single declared skill. Identity is the lower-cased, trimmed `name`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub category: Option<String>, // e.g. "programming", "ml", "domain"
    #[serde(default)]
    pub level: Option<String>, // beginner / intermediate / advanced
    #[serde(default)]
    pub years: Option<f64>,
}

impl Skill {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: None,
            level: None,
            years: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub duration_years: Option<f64>,
    #[serde(default)]
    pub skills_used: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Structured candidate profile as produced by the resume pipeline.
/// Re-uploading with the same `candidate_id` overwrites the stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfessionalProfile {
    pub candidate_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub total_experience_years: Option<f64>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
}

impl ProfessionalProfile {
    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.name.as_str())
    }
}

/// Row shape of the `profiles` table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileRow {
    pub candidate_id: String,
    pub data: Json<ProfessionalProfile>,
    pub updated_at: DateTime<Utc>,
}
