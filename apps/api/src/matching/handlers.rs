//! Axum route handlers for the Match API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::ingest::validation::{
    validate_inferences, validate_job, validate_profile, validate_years,
};
use crate::matching::alignment::align;
use crate::matching::explain::answer_question;
use crate::matching::normalize::{canonical_set, normalize};
use crate::models::job::JobRequirement;
use crate::models::matching::{
    AlignmentAnswer, AlignmentFactSheet, JobContext, MatchResult, Phase2MatchResult, RawInference,
};
use crate::models::profile::ProfessionalProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

/// Stateless fact-sheet request built from raw skill lists.
#[derive(Debug, Deserialize)]
pub struct FactSheetRequest {
    pub resume_skills: Vec<String>,
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub transferable: Vec<RawInference>,
    #[serde(default)]
    pub years_actual: Option<f64>,
    #[serde(default)]
    pub years_required: Option<f64>,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub domain: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdhocMatchRequest {
    pub profile: ProfessionalProfile,
    pub job: JobRequirement,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match/:job_id/:candidate_id
///
/// Baseline fit score: exact and preferred skill coverage only.
pub async fn handle_baseline(
    State(state): State<AppState>,
    Path((job_id, candidate_id)): Path<(String, String)>,
) -> Result<Json<MatchResult>, AppError> {
    Ok(Json(state.matcher.baseline(&job_id, &candidate_id).await?))
}

/// POST /api/v1/match/:job_id/:candidate_id/augmented
///
/// Baseline plus transferable-skill boost and reasoning trace. Supplier
/// failures degrade to the baseline; they never fail the request.
pub async fn handle_augmented(
    State(state): State<AppState>,
    Path((job_id, candidate_id)): Path<(String, String)>,
) -> Result<Json<Phase2MatchResult>, AppError> {
    Ok(Json(state.matcher.augmented(&job_id, &candidate_id).await?))
}

/// GET /api/v1/match/:job_id/:candidate_id/facts
pub async fn handle_fact_sheet(
    State(state): State<AppState>,
    Path((job_id, candidate_id)): Path<(String, String)>,
) -> Result<Json<AlignmentFactSheet>, AppError> {
    Ok(Json(state.matcher.fact_sheet(&job_id, &candidate_id).await?))
}

/// POST /api/v1/match/:job_id/:candidate_id/ask
///
/// Explains the alignment facts in answer to a free-text question.
pub async fn handle_ask(
    State(state): State<AppState>,
    Path((job_id, candidate_id)): Path<(String, String)>,
    Json(request): Json<QuestionRequest>,
) -> Result<Json<AlignmentAnswer>, AppError> {
    if request.question.trim().is_empty() {
        return Err(AppError::Validation("question cannot be empty".to_string()));
    }

    // Resolve entities first so unknown ids are 404 even without an LLM
    let facts = state.matcher.fact_sheet(&job_id, &candidate_id).await?;
    let llm = state.llm.as_ref().ok_or(AppError::LlmUnavailable)?;

    let answer = answer_question(&request.question, facts, llm)
        .await
        .map_err(|e| AppError::Llm(format!("Alignment Q&A failed: {e}")))?;

    Ok(Json(answer))
}

/// POST /api/v1/alignment/facts
///
/// Fact sheet from raw lists, without touching the stores.
pub async fn handle_stateless_facts(
    Json(request): Json<FactSheetRequest>,
) -> Result<Json<AlignmentFactSheet>, AppError> {
    let mut issues = Vec::new();
    validate_years("years_actual", request.years_actual, &mut issues);
    validate_years("years_required", request.years_required, &mut issues);
    let transferable = match validate_inferences(request.transferable) {
        Ok(accepted) if issues.is_empty() => accepted,
        Ok(_) => return Err(AppError::Validation(issues.join("; "))),
        Err(inference_issues) => {
            issues.extend(inference_issues);
            return Err(AppError::Validation(issues.join("; ")));
        }
    };

    let alignment = align(
        &normalize(request.resume_skills.iter().map(String::as_str)),
        &canonical_set(request.required_skills.iter().map(String::as_str)),
        &canonical_set(request.preferred_skills.iter().map(String::as_str)),
        &transferable,
        request.years_actual,
        request.years_required,
    );

    Ok(Json(alignment.into_fact_sheet(JobContext {
        title: request.job_title,
        domain: request.domain,
    })))
}

/// POST /api/v1/alignment/augmented
///
/// Augmented match for an ad-hoc profile/job pair. Nothing is stored or cached.
pub async fn handle_adhoc_augmented(
    State(state): State<AppState>,
    Json(request): Json<AdhocMatchRequest>,
) -> Result<Json<Phase2MatchResult>, AppError> {
    let mut issues = validate_profile(&request.profile);
    issues.extend(validate_job(&request.job));
    if !issues.is_empty() {
        return Err(AppError::Validation(issues.join("; ")));
    }

    Ok(Json(
        state
            .matcher
            .augmented_adhoc(&request.profile, &request.job)
            .await,
    ))
}
