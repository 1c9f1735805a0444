// Prompt builder for requirement extraction. Pure: no I/O, no model calls.

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::PromptPair;

/// The reply shape requested from the model, shown verbatim in the user prompt.
pub const REQUIREMENTS_SCHEMA_HINT: &str = r#"{
  "requirements": [
    {
      "requirement": "string (short)",
      "keywords": [
        "string",
        "string"
      ]
    }
  ]
}"#;

pub fn build_extract_requirements_prompts(
    job_title: &str,
    job_description: &str,
    max_items: usize,
) -> PromptPair {
    let system = format!(
        "You extract structured hiring requirements from job descriptions. {JSON_ONLY_SYSTEM}"
    );

    let user = format!(
        r#"Extract the top {max_items} recruiter-relevant requirements from this job description.

Job Title: {job_title}

Job Description:
"""{job_description}"""

Rules:
- Output MUST be valid JSON only.
- Output MUST match this schema:
{REQUIREMENTS_SCHEMA_HINT}
- Keep each "requirement" short (5-12 words).
- "keywords" should be 2-5 concrete terms that can be searched in a resume."#
    );

    PromptPair { system, user }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parse_requirements;

    #[test]
    fn test_prompts_embed_inputs_and_limit() {
        let prompts = build_extract_requirements_prompts("SRE", "Run Kubernetes at scale.", 7);
        assert_eq!(
            prompts.system,
            "You extract structured hiring requirements from job descriptions. Return ONLY valid JSON. No markdown."
        );
        assert!(prompts.user.starts_with("Extract the top 7 recruiter-relevant requirements"));
        assert!(prompts.user.contains("Job Title: SRE"));
        assert!(prompts.user.contains("\"\"\"Run Kubernetes at scale.\"\"\""));
        assert!(prompts.user.contains(REQUIREMENTS_SCHEMA_HINT));
    }

    #[test]
    fn test_schema_hint_is_accepted_by_parser() {
        let parsed = parse_requirements(REQUIREMENTS_SCHEMA_HINT, 10).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].requirement, "string (short)");
        assert_eq!(parsed[0].keywords, vec!["string", "string"]);
    }
}
