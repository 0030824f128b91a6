//! Match Result Assembler and the store-backed `MatchService`.
//!
//! The `compute_*` functions are pure compositions of the engine stages.
//! `MatchService` resolves identifiers through the stores, fetches
//! transferable inferences (cache first, then supplier) and hands everything
//! to the pure functions.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::matching::alignment::{align, effective_skills, experience_alignment};
use crate::matching::scoring::{compute_baseline, skill_sets};
use crate::matching::supplier::{supply, supply_or_degrade, TransferableSupplier};
use crate::matching::transferable::boost;
use crate::models::job::JobRequirement;
use crate::models::matching::{
    AlignmentFactSheet, JobContext, MatchResult, Phase2MatchResult, ReasoningTrace,
    TransferableSkillInference,
};
use crate::models::profile::ProfessionalProfile;
use crate::store::cache::{CacheKey, CachedInferences, InferenceCache};
use crate::store::{JobStore, ProfileStore, Record, Store, StoreError};

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("{kind} '{id}' not found")]
    EntityNotFound { kind: &'static str, id: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

// ────────────────────────────────────────────────────────────────────────────
// Pure assembly
// ────────────────────────────────────────────────────────────────────────────

/// Skill inputs handed to a supplier: sorted candidate skills, sorted required skills.
pub fn supplier_inputs(
    profile: &ProfessionalProfile,
    job: &JobRequirement,
) -> (Vec<String>, Vec<String>) {
    let (candidate, required, _) = skill_sets(profile, job);
    (candidate.into_iter().collect(), required.into_iter().collect())
}

/// Baseline score plus transferable boost and the reasoning trace.
pub fn assemble_augmented(
    profile: &ProfessionalProfile,
    job: &JobRequirement,
    transferable: &[TransferableSkillInference],
) -> Phase2MatchResult {
    let baseline = compute_baseline(profile, job);
    let outcome = boost(&baseline, transferable);
    let (candidate, _, _) = skill_sets(profile, job);

    let reasoning = ReasoningTrace {
        exact_matches: baseline.breakdown.exact_skill_matches.clone(),
        transferable_inferences: outcome.surviving.clone(),
        domain_signals: Vec::new(),
        experience_alignment: experience_alignment(
            profile.total_experience_years,
            job.min_experience_years,
        ),
        gaps: baseline.breakdown.missing_required_skills.clone(),
    };

    Phase2MatchResult {
        candidate_id: baseline.candidate_id,
        job_id: baseline.job_id,
        fit_score: outcome.final_score,
        baseline_fit_score: baseline.fit_score,
        score_boost: outcome.score_boost,
        effective_skills: effective_skills(&candidate, &outcome.surviving)
            .into_iter()
            .collect(),
        reasoning,
    }
}

/// Fetches inferences from `supplier` (degrading on failure) and assembles.
pub async fn compute_augmented(
    profile: &ProfessionalProfile,
    job: &JobRequirement,
    supplier: &dyn TransferableSupplier,
    timeout: Duration,
) -> Phase2MatchResult {
    let (candidate_skills, job_skills) = supplier_inputs(profile, job);
    let transferable = supply_or_degrade(supplier, &candidate_skills, &job_skills, timeout).await;
    assemble_augmented(profile, job, &transferable)
}

/// Alignment facts for explanation and Q&A.
pub fn compute_fact_sheet(
    profile: &ProfessionalProfile,
    job: &JobRequirement,
    transferable: &[TransferableSkillInference],
) -> AlignmentFactSheet {
    let (candidate, required, preferred) = skill_sets(profile, job);
    align(
        &candidate,
        &required,
        &preferred,
        transferable,
        profile.total_experience_years,
        job.min_experience_years,
    )
    .into_fact_sheet(JobContext {
        title: job.title.clone(),
        domain: job.domain.clone(),
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Store-backed service
// ────────────────────────────────────────────────────────────────────────────

async fn fetch<T: Record>(store: &dyn Store<T>, id: &str) -> Result<T, MatchError> {
    store
        .get(id)
        .await?
        .ok_or_else(|| MatchError::EntityNotFound {
            kind: T::KIND,
            id: id.to_string(),
        })
}

#[derive(Clone)]
pub struct MatchService {
    profiles: Arc<ProfileStore>,
    jobs: Arc<JobStore>,
    supplier: Arc<dyn TransferableSupplier>,
    cache: Arc<dyn InferenceCache>,
    supplier_timeout: Duration,
}

impl MatchService {
    pub fn new(
        profiles: Arc<ProfileStore>,
        jobs: Arc<JobStore>,
        supplier: Arc<dyn TransferableSupplier>,
        cache: Arc<dyn InferenceCache>,
        supplier_timeout: Duration,
    ) -> Self {
        Self {
            profiles,
            jobs,
            supplier,
            cache,
            supplier_timeout,
        }
    }

    /// Resolves both identifiers. Missing entities are never fabricated.
    pub async fn load_pair(
        &self,
        job_id: &str,
        candidate_id: &str,
    ) -> Result<(ProfessionalProfile, JobRequirement), MatchError> {
        let job = fetch(self.jobs.as_ref(), job_id).await?;
        let profile = fetch(self.profiles.as_ref(), candidate_id).await?;
        Ok((profile, job))
    }

    pub async fn baseline(&self, job_id: &str, candidate_id: &str) -> Result<MatchResult, MatchError> {
        let (profile, job) = self.load_pair(job_id, candidate_id).await?;
        let result = compute_baseline(&profile, &job);
        info!(
            "Baseline match {candidate_id} vs {job_id}: {:.2}",
            result.fit_score
        );
        Ok(result)
    }

    pub async fn augmented(
        &self,
        job_id: &str,
        candidate_id: &str,
    ) -> Result<Phase2MatchResult, MatchError> {
        let (profile, job) = self.load_pair(job_id, candidate_id).await?;
        let transferable = self.transferable_for(&profile, &job).await;
        let result = assemble_augmented(&profile, &job, &transferable);
        info!(
            "Augmented match {candidate_id} vs {job_id}: {:.2} (baseline {:.2}, boost {:.2})",
            result.fit_score, result.baseline_fit_score, result.score_boost
        );
        Ok(result)
    }

    /// Augmented match for records that are not in the stores. Bypasses the cache.
    pub async fn augmented_adhoc(
        &self,
        profile: &ProfessionalProfile,
        job: &JobRequirement,
    ) -> Phase2MatchResult {
        compute_augmented(profile, job, self.supplier.as_ref(), self.supplier_timeout).await
    }

    /// Fact sheet using only already-cached inferences; never calls the supplier.
    pub async fn fact_sheet(
        &self,
        job_id: &str,
        candidate_id: &str,
    ) -> Result<AlignmentFactSheet, MatchError> {
        let (profile, job) = self.load_pair(job_id, candidate_id).await?;
        let transferable = self.cached_transferable(&profile, &job).await.unwrap_or_default();
        Ok(compute_fact_sheet(&profile, &job, &transferable))
    }

    /// Cached inferences for the pair, if present and computed from the current inputs.
    async fn cached_transferable(
        &self,
        profile: &ProfessionalProfile,
        job: &JobRequirement,
    ) -> Option<Vec<TransferableSkillInference>> {
        let key = CacheKey::new(&profile.candidate_id, &job.job_id);
        let (candidate_skills, job_skills) = supplier_inputs(profile, job);

        match self.cache.get(&key).await {
            Ok(Some(entry)) if entry.matches_inputs(&candidate_skills, &job_skills) => {
                debug!("Transferable cache hit for {key:?}");
                Some(entry.inferences)
            }
            Ok(Some(_)) => {
                debug!("Transferable cache entry for {key:?} is stale");
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Transferable cache read failed for {key:?}: {e}");
                None
            }
        }
    }

    /// Cache first, then supplier. Only successful supplier results are cached.
    async fn transferable_for(
        &self,
        profile: &ProfessionalProfile,
        job: &JobRequirement,
    ) -> Vec<TransferableSkillInference> {
        if let Some(cached) = self.cached_transferable(profile, job).await {
            return cached;
        }

        let (candidate_skills, job_skills) = supplier_inputs(profile, job);
        match supply(
            self.supplier.as_ref(),
            &candidate_skills,
            &job_skills,
            self.supplier_timeout,
        )
        .await
        {
            Ok(inferences) => {
                let key = CacheKey::new(&profile.candidate_id, &job.job_id);
                let entry = CachedInferences::new(candidate_skills, job_skills, inferences.clone());
                if let Err(e) = self.cache.put(&key, entry).await {
                    warn!("Transferable cache write failed for {key:?}: {e}");
                }
                inferences
            }
            Err(e) => {
                warn!(
                    "Transferable supplier '{}' unavailable, continuing without inferences: {e}",
                    self.supplier.name()
                );
                Vec::new()
            }
        }
    }
}
