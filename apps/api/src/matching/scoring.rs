//! Scoring Engine: weighted skill coverage turned into a 0–100 fit score.
//!
//! Weighting:
//! - each required skill present in the candidate set → 1.0
//! - each preferred skill present → 0.5
//! - max possible = |required|·1.0 + |preferred|·0.5, floored at 1
//!
//! `fit_score = round2(raw / max_possible × 100)`. Experience never moves the
//! score; it is reported as a signed gap in the breakdown.

use std::collections::BTreeSet;

use crate::matching::normalize::{canonical_set, normalize};
use crate::models::job::JobRequirement;
use crate::models::matching::{MatchBreakdown, MatchResult};
use crate::models::profile::ProfessionalProfile;

pub const REQUIRED_WEIGHT: f64 = 1.0;
pub const PREFERRED_WEIGHT: f64 = 0.5;

/// Rounds to two decimal places. Every externally visible score goes through here.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `actual − required` when both are known, otherwise not evaluable.
pub fn experience_gap(actual_years: Option<f64>, required_years: Option<f64>) -> Option<f64> {
    match (actual_years, required_years) {
        (Some(actual), Some(required)) => Some(actual - required),
        _ => None,
    }
}

/// Scores canonical skill sets. Returns the fit score and its breakdown.
pub fn score(
    profile_skills: &BTreeSet<String>,
    required: &BTreeSet<String>,
    preferred: &BTreeSet<String>,
    actual_years: Option<f64>,
    required_years: Option<f64>,
) -> (f64, MatchBreakdown) {
    let exact: Vec<String> = profile_skills.intersection(required).cloned().collect();
    let partial: Vec<String> = profile_skills.intersection(preferred).cloned().collect();
    let missing: Vec<String> = required.difference(profile_skills).cloned().collect();

    let raw = exact.len() as f64 * REQUIRED_WEIGHT + partial.len() as f64 * PREFERRED_WEIGHT;
    let max_possible = (required.len() as f64 * REQUIRED_WEIGHT
        + preferred.len() as f64 * PREFERRED_WEIGHT)
        .max(1.0);

    let fit_score = round2(raw / max_possible * 100.0);

    let breakdown = MatchBreakdown {
        exact_skill_matches: exact,
        partial_skill_matches: partial,
        missing_required_skills: missing,
        experience_gap: experience_gap(actual_years, required_years),
    };

    (fit_score, breakdown)
}

/// Normalized skill sets for a profile/job pair: (candidate, required, preferred).
pub fn skill_sets(
    profile: &ProfessionalProfile,
    job: &JobRequirement,
) -> (BTreeSet<String>, BTreeSet<String>, BTreeSet<String>) {
    (
        normalize(profile.skill_names()),
        canonical_set(job.required_skills.iter().map(String::as_str)),
        canonical_set(job.preferred_skills.iter().map(String::as_str)),
    )
}

/// Baseline match of a profile against a job, without transferable skills.
pub fn compute_baseline(profile: &ProfessionalProfile, job: &JobRequirement) -> MatchResult {
    let (candidate, required, preferred) = skill_sets(profile, job);
    let (fit_score, breakdown) = score(
        &candidate,
        &required,
        &preferred,
        profile.total_experience_years,
        job.min_experience_years,
    );

    MatchResult {
        candidate_id: profile.candidate_id.clone(),
        job_id: job.job_id.clone(),
        fit_score,
        breakdown,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::profile::Skill;

    pub(crate) fn make_profile(id: &str, skills: &[&str], years: Option<f64>) -> ProfessionalProfile {
        ProfessionalProfile {
            candidate_id: id.to_string(),
            title: None,
            total_experience_years: years,
            skills: skills.iter().map(|s| Skill::named(*s)).collect(),
            experiences: vec![],
        }
    }

    pub(crate) fn make_job(
        id: &str,
        required: &[&str],
        preferred: &[&str],
        min_years: Option<f64>,
    ) -> JobRequirement {
        JobRequirement {
            job_id: id.to_string(),
            title: "Senior Data Scientist".to_string(),
            domain: Some("ml".to_string()),
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            preferred_skills: preferred.iter().map(|s| s.to_string()).collect(),
            min_experience_years: min_years,
            description: None,
        }
    }

    /// The reference data-science scenario.
    pub(crate) fn reference_pair() -> (ProfessionalProfile, JobRequirement) {
        (
            make_profile("cand-1", &["python", "sql"], Some(2.0)),
            make_job(
                "job-1",
                &["python", "machine learning", "sql"],
                &["tensorflow"],
                Some(3.0),
            ),
        )
    }

    #[test]
    fn test_reference_scenario() {
        let (profile, job) = reference_pair();
        let result = compute_baseline(&profile, &job);
        assert_eq!(result.breakdown.exact_skill_matches, vec!["python", "sql"]);
        assert_eq!(
            result.breakdown.missing_required_skills,
            vec!["machine learning"]
        );
        assert!(result.breakdown.partial_skill_matches.is_empty());
        assert_eq!(result.fit_score, 57.14);
        assert_eq!(result.breakdown.experience_gap, Some(-1.0));
    }

    #[test]
    fn test_preferred_match_counts_half() {
        let profile = make_profile("c", &["python", "docker"], None);
        let job = make_job("j", &["python"], &["docker"], None);
        // (1.0 + 0.5) / 1.5 = 100%
        assert_eq!(compute_baseline(&profile, &job).fit_score, 100.0);

        let job = make_job("j", &["python", "go"], &["docker"], None);
        // 1.5 / 2.5 = 60%
        assert_eq!(compute_baseline(&profile, &job).fit_score, 60.0);
    }

    #[test]
    fn test_job_without_skills_scores_zero_without_dividing_by_zero() {
        let profile = make_profile("c", &["python"], Some(5.0));
        let job = make_job("j", &[], &[], None);
        let result = compute_baseline(&profile, &job);
        assert_eq!(result.fit_score, 0.0);
        assert!(result.fit_score.is_finite());
    }

    #[test]
    fn test_experience_gap_null_when_either_side_missing() {
        assert_eq!(experience_gap(None, Some(3.0)), None);
        assert_eq!(experience_gap(Some(3.0), None), None);
        assert_eq!(experience_gap(Some(3.0), Some(3.0)), Some(0.0));
    }

    #[test]
    fn test_case_and_whitespace_insensitive_matching() {
        let profile = make_profile("c", &[" Python", "SQL "], None);
        let job = make_job("j", &["python", "sql"], &[], None);
        assert_eq!(compute_baseline(&profile, &job).fit_score, 100.0);
    }

    #[test]
    fn test_alias_expansion_satisfies_requirement() {
        let profile = make_profile("c", &["Clustering"], None);
        let job = make_job("j", &["machine learning"], &[], None);
        let result = compute_baseline(&profile, &job);
        assert_eq!(result.breakdown.exact_skill_matches, vec!["machine learning"]);
    }

    #[test]
    fn test_duplicate_job_skills_collapse() {
        let profile = make_profile("c", &["python"], None);
        let job = make_job("j", &["Python", "python", "rust"], &[], None);
        assert_eq!(compute_baseline(&profile, &job).fit_score, 50.0);
    }

    #[test]
    fn test_score_bounded_0_to_100() {
        let cases = [
            (vec!["a", "b", "c"], vec!["a", "b", "c"], vec!["d"]),
            (vec![], vec!["a"], vec!["b", "c"]),
            (vec!["x", "y"], vec![], vec!["x", "y"]),
            (vec!["a"], vec!["a"], vec![]),
        ];
        for (skills, required, preferred) in cases {
            let profile = make_profile("c", &skills, None);
            let job = make_job("j", &required, &preferred, None);
            let s = compute_baseline(&profile, &job).fit_score;
            assert!((0.0..=100.0).contains(&s), "score {s} out of range");
        }
    }

    #[test]
    fn test_baseline_is_idempotent() {
        let (profile, job) = reference_pair();
        assert_eq!(compute_baseline(&profile, &job), compute_baseline(&profile, &job));
    }

    #[test]
    fn test_adding_present_required_skill_never_decreases_score() {
        let (mut profile, job) = reference_pair();
        let before = compute_baseline(&profile, &job).fit_score;
        profile.skills.push(Skill::named("Python"));
        profile.skills.push(Skill::named("machine learning"));
        let after = compute_baseline(&profile, &job).fit_score;
        assert!(after >= before, "{after} < {before}");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(57.142857), 57.14);
        assert_eq!(round2(61.145001), 61.15);
        assert_eq!(round2(100.0), 100.0);
    }
}
