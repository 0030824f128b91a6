// Prompt templates for the matching module's LLM calls.
// Placeholders are filled by `render` in one pass over the template; braces
// in the JSON example are literal.

pub const TRANSFERABLE_SYSTEM: &str = crate::llm_client::prompts::JSON_ONLY_SYSTEM;

pub const TRANSFERABLE_SKILL_PROMPT: &str = r#"
You are evaluating transferable skills for a job fit assessment.

Candidate skills:
{candidate_skills}

Job required skills:
{job_skills}

Rules:
- Only infer transferability when defensible
- Justify using scale, data, systems, or complexity
- Do not invent experience
- Assign confidence between 0 and 1
- Output ONLY a JSON array
- Each inference must have: source_skill, target_skill, justification, confidence
- Keep all string values on a single line

Example output:
[
  {
    "source_skill": "python",
    "target_skill": "machine learning",
    "justification": "Both require strong programming and analytical thinking",
    "confidence": 0.8
  }
]
"#;

pub const ALIGNMENT_QA_SYSTEM: &str = "You explain how a candidate aligns with a job. \
    You never compute new facts; you only explain the facts you are given.";

pub const ALIGNMENT_QA_PROMPT: &str = r#"
You are explaining how a candidate aligns with a job.

Context (FACTS, do not dispute or modify):
{alignment_context}

User Question:
{question}

Rules:
- Base your answer ONLY on the provided context
- Do NOT invent skills, experience, or facts
- Be concise and professional
- If the question cannot be answered from context, say so clearly
- Prefer bullet points when listing gaps or strengths
"#;

/// Fills `{name}` placeholders from `vars` in a single left-to-right pass.
/// Substituted values are never rescanned, so a value containing another
/// placeholder's name is inserted verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let next = vars
            .iter()
            .filter_map(|(name, value)| {
                let placeholder = format!("{{{name}}}");
                rest.find(&placeholder)
                    .map(|at| (at, placeholder.len(), *value))
            })
            .min_by_key(|(at, _, _)| *at);

        match next {
            Some((at, len, value)) => {
                out.push_str(&rest[..at]);
                out.push_str(value);
                rest = &rest[at + len..];
            }
            None => {
                out.push_str(rest);
                return out;
            }
        }
    }
}
