// Prompt builders for recruiter Q&A generation.
// Pure string templating: no I/O, no model calls.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::intake::models::JobContext;
use crate::llm_client::prompts::GUARDRAIL_INSTRUCTIONS;
use crate::llm_client::PromptPair;
use crate::schema::CATEGORIES;

/// Shared opening of every Q&A system prompt.
pub const BASE_SYSTEM_PROMPT: &str = "You are a technical recruiter interview coach.

Your job is to generate first-round technical recruiter screening questions and strong, concise, recruiter-ready answers
based strictly on the provided job context and resume evidence.

Be direct, practical, and aligned with how recruiter screens work.
Return ONLY the final output in the required JSON format.";

const FEW_SHOT_ADDON: &str = "Follow the pattern implied by an example in the user message, then produce the full required output.
Be consistent with the example's tone, formatting, and level of detail.";

const REASONING_HIDDEN_ADDON: &str = "Think step-by-step privately to ensure accuracy and relevance.
Do NOT reveal your private reasoning or intermediate steps.";

const PERSONA_ROLEPLAY_ADDON: &str = "Adopt the voice of a senior technical recruiter at a top-tier company.

Your style is crisp, specific, and screening-focused:
- ask questions that quickly validate fit, scope, and communication
- answers should sound confident but not exaggerated
- follow-ups should probe for signal";

const RUBRIC_CONSTRAINED_ADDON: &str = "Optimize outputs for recruiter screening quality:
- Each question should be realistic and high-signal for a first-round screen
- Answers must be concise and credible, grounded in evidence
- Intents must clarify what the recruiter is evaluating
- Follow-ups must probe depth, scope, and specifics";

/// The output skeleton the model must fill, embedded verbatim in the user prompt.
pub const OUTPUT_SCHEMA_SKELETON: &str = r#"{
  "questions": [
    {
      "category": "one of the required categories",
      "question": "string",
      "intent": "string",
      "answer": "string",
      "follow_up": "string"
    }
  ]
}"#;

/// One worked item shown to the model in few-shot mode. Neutral on purpose:
/// no company names, no claims a resume would have to back.
pub const ONE_ITEM_EXAMPLE: &str = r#"{
  "questions": [
    {
      "category": "Background walkthrough",
      "question": "Can you walk me through your background and what led you to this role?",
      "intent": "Assess the candidate's narrative, relevant experience, and communication clarity.",
      "answer": "I started in a role focused on data and analytics, then moved into building product features that improved user workflows. Over time I took on more ownership across delivery, partnering closely with engineering and stakeholders to ship measurable improvements. Based on the resume provided, my strongest themes are execution, collaboration, and iterative problem-solving.",
      "follow_up": "Which project best represents the kind of impact you want to have in this role?"
    }
  ]
}"#;

/// How the Q&A system prompt is phrased. Selected per request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptStrategy {
    #[default]
    ZeroShotStructured,
    FewShot,
    ReasoningHidden,
    PersonaRoleplay,
    RubricConstrained,
}

impl PromptStrategy {
    pub const ALL: [PromptStrategy; 5] = [
        PromptStrategy::ZeroShotStructured,
        PromptStrategy::FewShot,
        PromptStrategy::ReasoningHidden,
        PromptStrategy::PersonaRoleplay,
        PromptStrategy::RubricConstrained,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            PromptStrategy::ZeroShotStructured => "zero_shot_structured",
            PromptStrategy::FewShot => "few_shot",
            PromptStrategy::ReasoningHidden => "reasoning_hidden",
            PromptStrategy::PersonaRoleplay => "persona_roleplay",
            PromptStrategy::RubricConstrained => "rubric_constrained",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }

    fn addon(&self) -> Option<&'static str> {
        match self {
            PromptStrategy::ZeroShotStructured => None,
            PromptStrategy::FewShot => Some(FEW_SHOT_ADDON),
            PromptStrategy::ReasoningHidden => Some(REASONING_HIDDEN_ADDON),
            PromptStrategy::PersonaRoleplay => Some(PERSONA_ROLEPLAY_ADDON),
            PromptStrategy::RubricConstrained => Some(RUBRIC_CONSTRAINED_ADDON),
        }
    }

    /// Only few-shot mode puts the worked example into the user prompt.
    pub fn uses_example(&self) -> bool {
        matches!(self, PromptStrategy::FewShot)
    }

    /// The strategy's own system prompt, before guardrails are appended.
    pub fn system_prompt(&self) -> String {
        match self.addon() {
            Some(addon) => format!("{BASE_SYSTEM_PROMPT}\n\n{addon}"),
            None => BASE_SYSTEM_PROMPT.to_string(),
        }
    }
}

/// Builds the user prompt: optional example, job context, resume evidence,
/// the category list, and the output skeleton.
pub fn build_recruiter_prep_user_prompt(
    job: &JobContext,
    resume_text: &str,
    strategy: PromptStrategy,
) -> String {
    let example_block = if strategy.uses_example() {
        format!(
            "Here is an example of the expected JSON format and tone (1 item only):\n\n\
             {ONE_ITEM_EXAMPLE}\n\n\
             Use the same format and style for your output.\n\n"
        )
    } else {
        String::new()
    };

    let categories = format!("{:#}", json!(CATEGORIES));

    format!(
        r#"{example_block}You will generate EXACTLY 10 technical recruiter screen Q&A items.

## Context Inputs
- Job Title: {title}
- Candidate Level: {level}
- Company Type: {company_type}
- Job Description: {description}

## Resume Evidence (source of truth)
"""{resume_text}"""

## Required categories
Use each category exactly once, in this exact order:
{categories}

## Output schema
Return a JSON object with this EXACT structure:
{OUTPUT_SCHEMA_SKELETON}"#,
        title = job.job_title,
        level = job.level.as_str(),
        company_type = job.company_type.as_str(),
        description = job.job_description,
    )
}

/// System prompt = strategy prompt + global guardrails. The resume is only ever in the user prompt.
pub fn build_recruiter_prep_prompts(
    job: &JobContext,
    resume_text: &str,
    strategy: PromptStrategy,
) -> PromptPair {
    PromptPair {
        system: format!("{}\n\n{GUARDRAIL_INSTRUCTIONS}", strategy.system_prompt()),
        user: build_recruiter_prep_user_prompt(job, resume_text, strategy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::models::{CandidateLevel, CompanyType};
    use crate::schema::{parse_recruiter_prep, QAItem, RecruiterPrepOutput};

    const RESUME: &str = "Jane Doe\nBackend engineer. Built payment APIs in Rust.";

    fn job() -> JobContext {
        JobContext {
            job_title: "Senior Rust Engineer".to_string(),
            job_description: "Own our payments platform.".to_string(),
            level: CandidateLevel::Senior,
            company_type: CompanyType::Enterprise,
        }
    }

    #[test]
    fn test_strategy_keys_round_trip() {
        for strategy in PromptStrategy::ALL {
            assert_eq!(PromptStrategy::from_key(strategy.key()), Some(strategy));
        }
        assert_eq!(PromptStrategy::from_key("chain_of_thought"), None);
    }

    #[test]
    fn test_default_strategy_is_zero_shot() {
        assert_eq!(PromptStrategy::default(), PromptStrategy::ZeroShotStructured);
        assert_eq!(
            PromptStrategy::ZeroShotStructured.system_prompt(),
            BASE_SYSTEM_PROMPT
        );
    }

    #[test]
    fn test_every_strategy_starts_with_base() {
        for strategy in PromptStrategy::ALL {
            assert!(strategy.system_prompt().starts_with(BASE_SYSTEM_PROMPT));
        }
    }

    #[test]
    fn test_only_few_shot_injects_example() {
        for strategy in PromptStrategy::ALL {
            let user = build_recruiter_prep_user_prompt(&job(), RESUME, strategy);
            assert_eq!(
                user.contains("Here is an example of the expected JSON format"),
                strategy == PromptStrategy::FewShot,
                "{strategy:?}"
            );
        }
    }

    #[test]
    fn test_user_prompt_embeds_context_and_categories() {
        let user = build_recruiter_prep_user_prompt(&job(), RESUME, PromptStrategy::default());
        assert!(user.starts_with("You will generate EXACTLY 10"));
        assert!(user.contains("- Job Title: Senior Rust Engineer"));
        assert!(user.contains("- Candidate Level: Senior"));
        assert!(user.contains("- Company Type: Enterprise"));
        assert!(user.contains("\"\"\"Jane Doe\nBackend engineer."));
        for category in CATEGORIES {
            assert!(user.contains(&format!("\"{category}\"")), "missing {category}");
        }
        assert!(user.contains(OUTPUT_SCHEMA_SKELETON));
    }

    #[test]
    fn test_resume_is_injected_exactly_once() {
        let prompts = build_recruiter_prep_prompts(&job(), RESUME, PromptStrategy::FewShot);
        assert!(!prompts.system.contains("Built payment APIs"));
        assert_eq!(prompts.user.matches("Built payment APIs").count(), 1);
    }

    #[test]
    fn test_system_prompt_carries_guardrails() {
        let prompts = build_recruiter_prep_prompts(&job(), RESUME, PromptStrategy::PersonaRoleplay);
        assert!(prompts.system.contains("senior technical recruiter"));
        assert!(prompts.system.ends_with(GUARDRAIL_INSTRUCTIONS));
    }

    #[test]
    fn test_few_shot_example_matches_item_shape() {
        let value: serde_json::Value = serde_json::from_str(ONE_ITEM_EXAMPLE).unwrap();
        let item: QAItem = serde_json::from_value(value["questions"][0].clone()).unwrap();
        assert_eq!(item.category, "Background walkthrough");
    }

    #[test]
    fn test_declared_schema_round_trips_through_parser() {
        let user = build_recruiter_prep_user_prompt(&job(), RESUME, PromptStrategy::default());

        // Fill the declared skeleton for each category listed in the prompt.
        let skeleton: serde_json::Value = serde_json::from_str(OUTPUT_SCHEMA_SKELETON).unwrap();
        let fields: Vec<String> = skeleton["questions"][0]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        let questions: Vec<serde_json::Value> = CATEGORIES
            .iter()
            .filter(|c| user.contains(*c))
            .enumerate()
            .map(|(i, category)| {
                let mut item = serde_json::Map::new();
                for field in &fields {
                    let value = if field == "category" {
                        category.to_string()
                    } else {
                        format!("{field} #{i} - “quoted” & <kept>")
                    };
                    item.insert(field.clone(), serde_json::Value::String(value));
                }
                serde_json::Value::Object(item)
            })
            .collect();
        let reply = json!({ "questions": questions }).to_string();

        let parsed: RecruiterPrepOutput = parse_recruiter_prep(&reply).unwrap();
        assert_eq!(parsed.questions.len(), 10);
        for (i, item) in parsed.questions.iter().enumerate() {
            assert_eq!(item.category, CATEGORIES[i]);
            assert_eq!(item.question, format!("question #{i} - “quoted” & <kept>"));
            assert_eq!(item.intent, format!("intent #{i} - “quoted” & <kept>"));
            assert_eq!(item.answer, format!("answer #{i} - “quoted” & <kept>"));
            assert_eq!(item.follow_up, format!("follow_up #{i} - “quoted” & <kept>"));
        }
    }
}
