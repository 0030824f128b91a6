//! Transferable-inference suppliers.
//!
//! A supplier is any source of `TransferableSkillInference` records (in
//! production, an LLM). Suppliers are fallible and slow; the engine only ever
//! sees them through `supply_or_degrade`, which turns every failure into an
//! empty list.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::llm_client::{strip_json_fences, LlmClient, LlmError};
use crate::matching::prompts::{render, TRANSFERABLE_SKILL_PROMPT, TRANSFERABLE_SYSTEM};
use crate::matching::transferable::accept_inferences;
use crate::models::matching::{RawInference, TransferableSkillInference};

#[derive(Debug, Error)]
pub enum SupplierError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("supplier timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed supplier output: {0}")]
    Malformed(String),
}

#[async_trait]
pub trait TransferableSupplier: Send + Sync {
    /// Short label for logs.
    fn name(&self) -> &'static str;

    async fn infer(
        &self,
        candidate_skills: &[String],
        job_skills: &[String],
    ) -> Result<Vec<TransferableSkillInference>, SupplierError>;
}

/// Calls the supplier under `timeout`. Any failure is logged and degrades to
/// an empty list; the `Err` branch is still returned so callers can decide
/// not to cache a degraded result.
pub async fn supply(
    supplier: &dyn TransferableSupplier,
    candidate_skills: &[String],
    job_skills: &[String],
    timeout: Duration,
) -> Result<Vec<TransferableSkillInference>, SupplierError> {
    match tokio::time::timeout(timeout, supplier.infer(candidate_skills, job_skills)).await {
        Ok(result) => result,
        Err(_) => Err(SupplierError::Timeout(timeout)),
    }
}

/// `supply`, with failure mapped to an empty inference set.
pub async fn supply_or_degrade(
    supplier: &dyn TransferableSupplier,
    candidate_skills: &[String],
    job_skills: &[String],
    timeout: Duration,
) -> Vec<TransferableSkillInference> {
    match supply(supplier, candidate_skills, job_skills, timeout).await {
        Ok(inferences) => inferences,
        Err(e) => {
            warn!(
                "Transferable supplier '{}' unavailable, continuing without inferences: {e}",
                supplier.name()
            );
            Vec::new()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Strict output parsing
// ────────────────────────────────────────────────────────────────────────────

/// Accepted output shapes. Anything else is malformed.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferencePayload {
    List(Vec<RawInference>),
    Wrapped {
        transferable_skills: Vec<RawInference>,
    },
}

/// Parses LLM text into validated inferences. Code fences are stripped;
/// no other repair is attempted.
pub fn parse_inferences(text: &str) -> Result<Vec<TransferableSkillInference>, SupplierError> {
    let body = strip_json_fences(text);
    let payload: InferencePayload =
        serde_json::from_str(body).map_err(|e| SupplierError::Malformed(e.to_string()))?;

    let raw = match payload {
        InferencePayload::List(items) => items,
        InferencePayload::Wrapped {
            transferable_skills,
        } => transferable_skills,
    };
    Ok(accept_inferences(raw))
}

pub fn render_transferable_prompt(candidate_skills: &[String], job_skills: &[String]) -> String {
    let candidate = candidate_skills.join(", ");
    let job = job_skills.join(", ");
    render(
        TRANSFERABLE_SKILL_PROMPT,
        &[("candidate_skills", candidate.as_str()), ("job_skills", job.as_str())],
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Implementations
// ────────────────────────────────────────────────────────────────────────────

/// LLM-backed supplier.
pub struct LlmTransferableSupplier(pub LlmClient);

#[async_trait]
impl TransferableSupplier for LlmTransferableSupplier {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn infer(
        &self,
        candidate_skills: &[String],
        job_skills: &[String],
    ) -> Result<Vec<TransferableSkillInference>, SupplierError> {
        let prompt = render_transferable_prompt(candidate_skills, job_skills);
        debug!("Transferable prompt length: {} chars", prompt.len());

        let text = self.0.call_text(&prompt, TRANSFERABLE_SYSTEM).await?;
        let inferences = parse_inferences(&text)?;

        info!("LLM produced {} valid transferable inferences", inferences.len());
        Ok(inferences)
    }
}

/// Supplier used when no LLM is configured. Never infers anything.
pub struct NoopSupplier;

#[async_trait]
impl TransferableSupplier for NoopSupplier {
    fn name(&self) -> &'static str {
        "noop"
    }

    async fn infer(
        &self,
        _candidate_skills: &[String],
        _job_skills: &[String],
    ) -> Result<Vec<TransferableSkillInference>, SupplierError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Returns a fixed inference list and counts calls.
    pub(crate) struct FixedSupplier {
        pub inferences: Vec<TransferableSkillInference>,
        pub calls: AtomicUsize,
    }

    impl FixedSupplier {
        pub(crate) fn new(inferences: Vec<TransferableSkillInference>) -> Self {
            Self {
                inferences,
                calls: AtomicUsize::new(0),
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TransferableSupplier for FixedSupplier {
        fn name(&self) -> &'static str {
            "fixed"
        }

        async fn infer(
            &self,
            _candidate_skills: &[String],
            _job_skills: &[String],
        ) -> Result<Vec<TransferableSkillInference>, SupplierError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.inferences.clone())
        }
    }

    /// Always fails with malformed output.
    pub(crate) struct BrokenSupplier;

    #[async_trait]
    impl TransferableSupplier for BrokenSupplier {
        fn name(&self) -> &'static str {
            "broken"
        }

        async fn infer(
            &self,
            _candidate_skills: &[String],
            _job_skills: &[String],
        ) -> Result<Vec<TransferableSkillInference>, SupplierError> {
            Err(SupplierError::Malformed("unterminated array".to_string()))
        }
    }

    /// Sleeps far beyond any test timeout.
    pub(crate) struct StalledSupplier;

    #[async_trait]
    impl TransferableSupplier for StalledSupplier {
        fn name(&self) -> &'static str {
            "stalled"
        }

        async fn infer(
            &self,
            _candidate_skills: &[String],
            _job_skills: &[String],
        ) -> Result<Vec<TransferableSkillInference>, SupplierError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Vec::new())
        }
    }

    pub(crate) fn inference(target: &str, confidence: f64) -> TransferableSkillInference {
        TransferableSkillInference {
            source_skill: "python".to_string(),
            target_skill: target.to_string(),
            justification: "shared analytical tooling".to_string(),
            confidence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;

    #[test]
    fn test_parse_plain_array() {
        let text = r#"[{"source_skill":"python","target_skill":"machine learning","justification":"x","confidence":0.8}]"#;
        let parsed = parse_inferences(text).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].target_skill, "machine learning");
    }

    #[test]
    fn test_parse_fenced_wrapped_object() {
        let text = "```json\n{\"transferable_skills\": [{\"source_skill\":\"sql\",\"target_skill\":\"spark\",\"justification\":\"y\",\"confidence\":0.5}]}\n```";
        let parsed = parse_inferences(text).unwrap();
        assert_eq!(parsed[0].target_skill, "spark");
    }

    #[test]
    fn test_parse_truncated_output_is_malformed() {
        let text = r#"[{"source_skill":"python","target_skill":"machine learning","justif"#;
        assert!(matches!(
            parse_inferences(text),
            Err(SupplierError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_unexpected_shape_is_malformed() {
        assert!(parse_inferences(r#"{"answer": "python"}"#).is_err());
        assert!(parse_inferences("Sure! Here are the skills.").is_err());
    }

    #[test]
    fn test_parse_drops_invalid_confidence() {
        let text = r#"[
            {"source_skill":"a","target_skill":"b","justification":"","confidence":1.5},
            {"source_skill":"a","target_skill":"c","justification":"","confidence":0.5}
        ]"#;
        let parsed = parse_inferences(text).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].target_skill, "c");
    }

    #[test]
    fn test_prompt_contains_skills() {
        let prompt = render_transferable_prompt(
            &["python".to_string(), "sql".to_string()],
            &["machine learning".to_string()],
        );
        assert!(prompt.contains("python, sql"));
        assert!(prompt.contains("machine learning"));
        assert!(!prompt.contains("{candidate_skills}"));
    }

    #[tokio::test]
    async fn test_broken_supplier_degrades_to_empty() {
        let out = supply_or_degrade(&BrokenSupplier, &[], &[], Duration::from_secs(1)).await;
        assert!(out.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_supplier_times_out() {
        let timeout = Duration::from_secs(5);
        let result = supply(&StalledSupplier, &[], &[], timeout).await;
        assert!(matches!(result, Err(SupplierError::Timeout(t)) if t == timeout));
        assert!(supply_or_degrade(&StalledSupplier, &[], &[], timeout).await.is_empty());
    }

    #[tokio::test]
    async fn test_noop_supplier_returns_nothing() {
        let out = supply(&NoopSupplier, &["python".to_string()], &[], Duration::from_secs(1))
            .await
            .unwrap();
        assert!(out.is_empty());
    }
}
