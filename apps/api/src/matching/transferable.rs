//! Transferable-skill augmentation.
//!
//! Inferences come from an untrusted supplier. They are validated once, at
//! the boundary (`TryFrom<RawInference>`), and afterwards only `target_skill`
//! and `confidence` influence any computation.

use std::collections::BTreeSet;

use thiserror::Error;
use tracing::{debug, warn};

use crate::matching::normalize::{canonicalize, normalize};
use crate::matching::scoring::round2;
use crate::models::matching::{MatchResult, RawInference, TransferableSkillInference};

/// Score points added per unit of confidence for each surviving inference.
pub const BOOST_PER_CONFIDENCE: f64 = 5.0;
pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Error, PartialEq)]
pub enum InferenceError {
    #[error("confidence {0} is outside [0, 1]")]
    ConfidenceOutOfRange(f64),

    #[error("target skill is empty")]
    EmptyTargetSkill,
}

impl TryFrom<RawInference> for TransferableSkillInference {
    type Error = InferenceError;

    fn try_from(raw: RawInference) -> Result<Self, Self::Error> {
        // NaN fails the range check as well
        if !(0.0..=1.0).contains(&raw.confidence) {
            return Err(InferenceError::ConfidenceOutOfRange(raw.confidence));
        }
        if raw.target_skill.trim().is_empty() {
            return Err(InferenceError::EmptyTargetSkill);
        }
        Ok(Self {
            source_skill: raw.source_skill,
            target_skill: raw.target_skill,
            justification: raw.justification,
            confidence: raw.confidence,
        })
    }
}

/// Validates raw supplier records, dropping (and logging) invalid ones.
pub fn accept_inferences(raw: Vec<RawInference>) -> Vec<TransferableSkillInference> {
    raw.into_iter()
        .filter_map(|r| {
            let label = format!("{} → {}", r.source_skill, r.target_skill);
            match TransferableSkillInference::try_from(r) {
                Ok(inference) => Some(inference),
                Err(e) => {
                    warn!("Dropping invalid transferable inference ({label}): {e}");
                    None
                }
            }
        })
        .collect()
}

/// Total ordering: canonical target, source, confidence, then the raw strings
/// so records differing only in case or justification never keep input order.
pub fn sorted_inferences(
    inferences: &[TransferableSkillInference],
) -> Vec<TransferableSkillInference> {
    let mut sorted = inferences.to_vec();
    sorted.sort_by(|a, b| {
        canonicalize(&a.target_skill)
            .cmp(&canonicalize(&b.target_skill))
            .then_with(|| canonicalize(&a.source_skill).cmp(&canonicalize(&b.source_skill)))
            .then_with(|| a.confidence.total_cmp(&b.confidence))
            .then_with(|| a.target_skill.cmp(&b.target_skill))
            .then_with(|| a.source_skill.cmp(&b.source_skill))
            .then_with(|| a.justification.cmp(&b.justification))
    });
    sorted
}

/// Outcome of applying transferable inferences to a baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct BoostOutcome {
    pub final_score: f64,
    pub score_boost: f64,
    /// Inferences that explain a gap, sorted.
    pub surviving: Vec<TransferableSkillInference>,
}

/// Drops inferences whose target (or its alias expansion) is already an exact
/// match, then adds `confidence × 5` per survivor, capped at 100 in aggregate.
pub fn boost(baseline: &MatchResult, transferable: &[TransferableSkillInference]) -> BoostOutcome {
    let already_matched: BTreeSet<String> = baseline
        .breakdown
        .exact_skill_matches
        .iter()
        .map(|s| canonicalize(s))
        .collect();

    let surviving: Vec<TransferableSkillInference> = transferable
        .iter()
        .filter(|t| normalize([t.target_skill.as_str()]).is_disjoint(&already_matched))
        .cloned()
        .collect();

    debug!(
        "{} of {} transferable inferences survive exact-match filtering",
        surviving.len(),
        transferable.len()
    );

    let score_boost: f64 = surviving
        .iter()
        .map(|t| t.confidence * BOOST_PER_CONFIDENCE)
        .sum();
    let final_score = round2((baseline.fit_score + score_boost).min(MAX_SCORE));

    BoostOutcome {
        final_score,
        score_boost: round2(score_boost),
        surviving: sorted_inferences(&surviving),
    }
}
