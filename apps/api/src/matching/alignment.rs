//! Alignment Engine: deterministic set comparison of candidate skills against
//! job requirements. Produces facts only; no scoring and no inference.

use std::collections::BTreeSet;

use crate::matching::normalize::canonicalize;
use crate::matching::transferable::sorted_inferences;
use crate::models::matching::{
    AlignmentFactSheet, ExperienceAlignment, JobContext, TransferableSkillInference,
};

/// Set-level alignment facts. All lists are lexicographically sorted.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillAlignment {
    pub effective_skills: Vec<String>,
    pub matched_required: Vec<String>,
    pub missing_required: Vec<String>,
    pub matched_preferred: Vec<String>,
    pub missing_preferred: Vec<String>,
    pub transferable: Vec<TransferableSkillInference>,
    pub experience: ExperienceAlignment,
}

impl SkillAlignment {
    pub fn into_fact_sheet(self, job_context: JobContext) -> AlignmentFactSheet {
        AlignmentFactSheet {
            matched_required_skills: self.matched_required,
            missing_required_skills: self.missing_required,
            matched_preferred_skills: self.matched_preferred,
            missing_preferred_skills: self.missing_preferred,
            transferable_skills: self.transferable,
            experience_alignment: self.experience,
            job_context,
        }
    }
}

/// Candidate skills unioned with every non-empty transferable target.
pub fn effective_skills(
    candidate_skills: &BTreeSet<String>,
    transferable: &[TransferableSkillInference],
) -> BTreeSet<String> {
    let mut effective = candidate_skills.clone();
    effective.extend(
        transferable
            .iter()
            .map(|t| canonicalize(&t.target_skill))
            .filter(|t| !t.is_empty()),
    );
    effective
}

/// Missing years on either side count as 0.
pub fn experience_alignment(
    actual_years: Option<f64>,
    required_years: Option<f64>,
) -> ExperienceAlignment {
    let years_actual = actual_years.unwrap_or(0.0);
    let years_required = required_years.unwrap_or(0.0);
    ExperienceAlignment {
        years_required,
        years_actual,
        meets_requirement: years_actual >= years_required,
    }
}

pub fn align(
    candidate_skills: &BTreeSet<String>,
    required_skills: &BTreeSet<String>,
    preferred_skills: &BTreeSet<String>,
    transferable: &[TransferableSkillInference],
    actual_years: Option<f64>,
    required_years: Option<f64>,
) -> SkillAlignment {
    let effective = effective_skills(candidate_skills, transferable);

    // BTreeSet iteration is ordered, so collected vectors are already sorted.
    let matched_required = effective.intersection(required_skills).cloned().collect();
    let missing_required = required_skills.difference(&effective).cloned().collect();
    let matched_preferred = effective.intersection(preferred_skills).cloned().collect();
    let missing_preferred = preferred_skills.difference(&effective).cloned().collect();

    SkillAlignment {
        effective_skills: effective.into_iter().collect(),
        matched_required,
        missing_required,
        matched_preferred,
        missing_preferred,
        transferable: sorted_inferences(transferable),
        experience: experience_alignment(actual_years, required_years),
    }
}
