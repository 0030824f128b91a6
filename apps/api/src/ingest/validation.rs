//! Boundary validation for uploaded records.
//!
//! Typed deserialization already rejects non-numeric years. These checks
//! catch values that parse but make no sense. Each validator returns every
//! issue it finds, not just the first.

use crate::models::job::JobRequirement;
use crate::models::matching::{RawInference, TransferableSkillInference};
use crate::models::profile::ProfessionalProfile;

/// Upper bound for any years-of-experience figure.
pub const MAX_YEARS: f64 = 80.0;

/// Identifiers end up in URL paths and cache keys.
pub fn validate_identifier(field: &str, value: &str, issues: &mut Vec<String>) {
    if value.trim().is_empty() {
        issues.push(format!("{field} cannot be empty"));
    } else if value.chars().any(|c| c.is_whitespace() || c == '/' || c == ':') {
        issues.push(format!(
            "{field} '{value}' may not contain whitespace, '/' or ':'"
        ));
    }
}

pub fn validate_years(field: &str, years: Option<f64>, issues: &mut Vec<String>) {
    if let Some(y) = years {
        if !y.is_finite() || !(0.0..=MAX_YEARS).contains(&y) {
            issues.push(format!("{field} must be between 0 and {MAX_YEARS}, got {y}"));
        }
    }
}

fn validate_skill_names<'a, I>(field: &str, names: I, issues: &mut Vec<String>)
where
    I: IntoIterator<Item = &'a str>,
{
    if names.into_iter().any(|n| n.trim().is_empty()) {
        issues.push(format!("{field} contains an empty skill name"));
    }
}

pub fn validate_profile(profile: &ProfessionalProfile) -> Vec<String> {
    let mut issues = Vec::new();

    validate_identifier("candidate_id", &profile.candidate_id, &mut issues);
    validate_years(
        "total_experience_years",
        profile.total_experience_years,
        &mut issues,
    );
    validate_skill_names("skills", profile.skill_names(), &mut issues);

    for skill in &profile.skills {
        validate_years(&format!("skills[{}].years", skill.name), skill.years, &mut issues);
    }
    for (i, exp) in profile.experiences.iter().enumerate() {
        validate_years(
            &format!("experiences[{i}].duration_years"),
            exp.duration_years,
            &mut issues,
        );
        validate_skill_names(
            &format!("experiences[{i}].skills_used"),
            exp.skills_used.iter().map(String::as_str),
            &mut issues,
        );
    }

    issues
}

pub fn validate_job(job: &JobRequirement) -> Vec<String> {
    let mut issues = Vec::new();

    validate_identifier("job_id", &job.job_id, &mut issues);
    if job.title.trim().is_empty() {
        issues.push("title cannot be empty".to_string());
    }
    validate_years("min_experience_years", job.min_experience_years, &mut issues);
    validate_skill_names(
        "required_skills",
        job.required_skills.iter().map(String::as_str),
        &mut issues,
    );
    validate_skill_names(
        "preferred_skills",
        job.preferred_skills.iter().map(String::as_str),
        &mut issues,
    );

    issues
}

/// Strict conversion for client-supplied inferences: any invalid record is an issue.
pub fn validate_inferences(
    raw: Vec<RawInference>,
) -> Result<Vec<TransferableSkillInference>, Vec<String>> {
    let mut accepted = Vec::with_capacity(raw.len());
    let mut issues = Vec::new();

    for (i, r) in raw.into_iter().enumerate() {
        match TransferableSkillInference::try_from(r) {
            Ok(inference) => accepted.push(inference),
            Err(e) => issues.push(format!("transferable[{i}]: {e}")),
        }
    }

    if issues.is_empty() {
        Ok(accepted)
    } else {
        Err(issues)
    }
}
