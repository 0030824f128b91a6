//! Value types produced by the matching engine. None of these are persisted;
//! they are recomputed from the stored profile and job on every request.

use serde::{Deserialize, Serialize};

/// Transferable-skill claim as it arrives from an untrusted supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInference {
    #[serde(default)]
    pub source_skill: String,
    #[serde(default)]
    pub target_skill: String,
    #[serde(default)]
    pub justification: String,
    pub confidence: f64,
}

/// A validated transferable-skill inference: confidence is in [0, 1] and the
/// target skill is non-empty. Construct via `TryFrom<RawInference>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInference")]
pub struct TransferableSkillInference {
    pub source_skill: String,
    pub target_skill: String,
    pub justification: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchBreakdown {
    pub exact_skill_matches: Vec<String>,
    pub partial_skill_matches: Vec<String>,
    pub missing_required_skills: Vec<String>,
    /// actual − required; `None` when either side is unknown.
    pub experience_gap: Option<f64>,
}

/// Baseline score, no transferable skills involved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate_id: String,
    pub job_id: String,
    pub fit_score: f64, // 0 – 100, two decimals
    pub breakdown: MatchBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceAlignment {
    pub years_required: f64,
    pub years_actual: f64,
    pub meets_requirement: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainSignal {
    pub signal: String,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningTrace {
    pub exact_matches: Vec<String>,
    pub transferable_inferences: Vec<TransferableSkillInference>,
    /// Reserved; currently always empty.
    pub domain_signals: Vec<DomainSignal>,
    pub experience_alignment: ExperienceAlignment,
    pub gaps: Vec<String>,
}

/// Augmented result: baseline plus transferable-skill boost and reasoning trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase2MatchResult {
    pub candidate_id: String,
    pub job_id: String,
    pub fit_score: f64,
    pub baseline_fit_score: f64,
    pub score_boost: f64,
    pub effective_skills: Vec<String>,
    pub reasoning: ReasoningTrace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobContext {
    pub title: String,
    pub domain: Option<String>,
}

/// Deterministic alignment facts handed to explanation/Q&A consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentFactSheet {
    pub matched_required_skills: Vec<String>,
    pub missing_required_skills: Vec<String>,
    pub matched_preferred_skills: Vec<String>,
    pub missing_preferred_skills: Vec<String>,
    pub transferable_skills: Vec<TransferableSkillInference>,
    pub experience_alignment: ExperienceAlignment,
    pub job_context: JobContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlignmentAnswer {
    pub question: String,
    pub answer: String,
    pub alignment_context: AlignmentFactSheet,
}
