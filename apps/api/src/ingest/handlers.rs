//! Axum route handlers for profile and job ingestion.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::validation::{validate_job, validate_profile};
use crate::models::job::JobRequirement;
use crate::models::profile::{Experience, ProfessionalProfile, Skill};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// Profile upload body. `candidate_id` is generated when omitted.
#[derive(Debug, Deserialize)]
pub struct ProfileUpload {
    #[serde(default)]
    pub candidate_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub total_experience_years: Option<f64>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub experiences: Vec<Experience>,
}

impl ProfileUpload {
    pub fn into_profile(self) -> ProfessionalProfile {
        let candidate_id = match self.candidate_id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => generate_candidate_id(),
        };
        ProfessionalProfile {
            candidate_id,
            title: self.title,
            total_experience_years: self.total_experience_years,
            skills: self.skills,
            experiences: self.experiences,
        }
    }
}

/// `candidate_` followed by eight hex characters.
fn generate_candidate_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("candidate_{}", &hex[..8])
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StoredResponse {
    pub status: String,
    pub id: String,
}

impl StoredResponse {
    fn stored(id: String) -> Self {
        Self {
            status: "stored".to_string(),
            id,
        }
    }
}

fn reject_issues(issues: Vec<String>) -> Result<(), AppError> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(issues.join("; ")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Profiles
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/profiles
///
/// Stores a profile, overwriting any existing one with the same candidate id.
pub async fn handle_put_profile(
    State(state): State<AppState>,
    Json(upload): Json<ProfileUpload>,
) -> Result<(StatusCode, Json<StoredResponse>), AppError> {
    let profile = upload.into_profile();
    reject_issues(validate_profile(&profile))?;

    let candidate_id = profile.candidate_id.clone();
    info!(
        "Storing profile {candidate_id} ({} skills, {} experiences)",
        profile.skills.len(),
        profile.experiences.len()
    );
    state.profiles.put(profile).await?;

    Ok((StatusCode::CREATED, Json(StoredResponse::stored(candidate_id))))
}

/// GET /api/v1/profiles
pub async fn handle_list_profiles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProfessionalProfile>>, AppError> {
    Ok(Json(state.profiles.list().await?))
}

/// GET /api/v1/profiles/:candidate_id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(candidate_id): Path<String>,
) -> Result<Json<ProfessionalProfile>, AppError> {
    state
        .profiles
        .get(&candidate_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Candidate {candidate_id} not found")))
}

/// DELETE /api/v1/profiles/:candidate_id
pub async fn handle_delete_profile(
    State(state): State<AppState>,
    Path(candidate_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.profiles.delete(&candidate_id).await? {
        info!("Deleted profile {candidate_id}");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Candidate {candidate_id} not found")))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/jobs
pub async fn handle_put_job(
    State(state): State<AppState>,
    Json(job): Json<JobRequirement>,
) -> Result<(StatusCode, Json<StoredResponse>), AppError> {
    reject_issues(validate_job(&job))?;

    let job_id = job.job_id.clone();
    info!(
        "Storing job {job_id} ({} required, {} preferred skills)",
        job.required_skills.len(),
        job.preferred_skills.len()
    );
    state.jobs.put(job).await?;

    Ok((StatusCode::CREATED, Json(StoredResponse::stored(job_id))))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobRequirement>>, AppError> {
    Ok(Json(state.jobs.list().await?))
}

/// GET /api/v1/jobs/:job_id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<JobRequirement>, AppError> {
    state
        .jobs
        .get(&job_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

/// DELETE /api/v1/jobs/:job_id
pub async fn handle_delete_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.jobs.delete(&job_id).await? {
        info!("Deleted job {job_id}");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Job {job_id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_candidate_id_shape() {
        let id = generate_candidate_id();
        assert!(id.starts_with("candidate_"));
        assert_eq!(id.len(), "candidate_".len() + 8);
        assert!(id["candidate_".len()..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_upload_keeps_supplied_id_trimmed() {
        let upload: ProfileUpload =
            serde_json::from_str(r#"{"candidate_id": " cand-7 ", "skills": [{"name": "Rust"}]}"#)
                .unwrap();
        let profile = upload.into_profile();
        assert_eq!(profile.candidate_id, "cand-7");
        assert_eq!(profile.skills[0].name, "Rust");
    }

    #[test]
    fn test_upload_without_id_gets_generated_one() {
        let upload: ProfileUpload = serde_json::from_str(r#"{"candidate_id": ""}"#).unwrap();
        assert!(upload.into_profile().candidate_id.starts_with("candidate_"));
    }

    #[test]
    fn test_non_numeric_years_rejected_by_deserialization() {
        let result =
            serde_json::from_str::<ProfileUpload>(r#"{"total_experience_years": "five"}"#);
        assert!(result.is_err());
    }
}
