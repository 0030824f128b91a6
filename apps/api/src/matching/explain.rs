//! Alignment Q&A: asks the LLM to explain an already-computed fact sheet.
//! The LLM sees only the facts; it never contributes to scores or matches.

use tracing::info;

use crate::llm_client::{LlmClient, LlmError};
use crate::matching::prompts::{render, ALIGNMENT_QA_PROMPT, ALIGNMENT_QA_SYSTEM};
use crate::models::matching::{AlignmentAnswer, AlignmentFactSheet};

pub fn render_question_prompt(
    question: &str,
    facts: &AlignmentFactSheet,
) -> Result<String, serde_json::Error> {
    let context = serde_json::to_string_pretty(facts)?;
    Ok(render(
        ALIGNMENT_QA_PROMPT,
        &[("alignment_context", context.as_str()), ("question", question.trim())],
    ))
}

pub async fn answer_question(
    question: &str,
    facts: AlignmentFactSheet,
    llm: &LlmClient,
) -> Result<AlignmentAnswer, LlmError> {
    let prompt = render_question_prompt(question, &facts)?;
    let answer = llm.call_text(&prompt, ALIGNMENT_QA_SYSTEM).await?;
    info!("Alignment question answered ({} chars)", answer.len());

    Ok(AlignmentAnswer {
        question: question.trim().to_string(),
        answer: answer.trim().to_string(),
        alignment_context: facts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::matching::{ExperienceAlignment, JobContext};

    fn facts() -> AlignmentFactSheet {
        AlignmentFactSheet {
            matched_required_skills: vec!["python".to_string()],
            missing_required_skills: vec!["machine learning".to_string()],
            matched_preferred_skills: vec![],
            missing_preferred_skills: vec!["tensorflow".to_string()],
            transferable_skills: vec![],
            experience_alignment: ExperienceAlignment {
                years_required: 3.0,
                years_actual: 2.0,
                meets_requirement: false,
            },
            job_context: JobContext {
                title: "Senior Data Scientist".to_string(),
                domain: None,
            },
        }
    }

    #[test]
    fn test_prompt_embeds_facts_and_question() {
        let prompt = render_question_prompt("  What am I missing? ", &facts()).unwrap();
        assert!(prompt.contains("\"missing_required_skills\""));
        assert!(prompt.contains("machine learning"));
        assert!(prompt.contains("What am I missing?"));
        assert!(!prompt.contains("{question}"));
        assert!(!prompt.contains("{alignment_context}"));
    }

    #[test]
    fn test_placeholder_text_in_facts_stays_in_facts() {
        let mut sheet = facts();
        sheet.job_context.title = "Engineer {question}".to_string();
        let prompt = render_question_prompt("secret question", &sheet).unwrap();

        assert_eq!(prompt.matches("secret question").count(), 1);
        assert!(prompt.contains("Engineer {question}"));
        let facts_end = prompt.find("User Question:").unwrap();
        assert!(!prompt[..facts_end].contains("secret question"));
    }
}
