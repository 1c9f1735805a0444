//! Recruiter Q&A generation: one model call per request.
//!
//! Flow: build prompts → model call (JSON mode) → parse + validate → price the call.
//!
//! Nothing is retried. A reply that does not match the schema ends the request.

use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::intake::models::JobContext;
use crate::llm_client::{ChatModel, ChatRequest};
use crate::prep::prompts::{build_recruiter_prep_prompts, PromptStrategy};
use crate::pricing::{estimate_cost, CostBreakdown};
use crate::schema::{parse_recruiter_prep, RecruiterPrepOutput};

/// Inputs of one Q&A generation, borrowed from the validated request.
#[derive(Debug, Clone, Copy)]
pub struct PrepParams<'a> {
    pub job: &'a JobContext,
    pub resume_text: &'a str,
    pub model: &'a str,
    pub temperature: f64,
    pub strategy: PromptStrategy,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub output: RecruiterPrepOutput,
    pub cost: CostBreakdown,
}

pub async fn generate_recruiter_prep(
    llm: &dyn ChatModel,
    params: PrepParams<'_>,
) -> Result<GenerationResult, AppError> {
    let prompts = build_recruiter_prep_prompts(params.job, params.resume_text, params.strategy);
    let request = ChatRequest::new(params.model, prompts, params.temperature);

    info!(
        "Requesting recruiter prep: model={}, strategy={}, temperature={}",
        params.model,
        params.strategy.key(),
        params.temperature
    );
    let completion = llm.complete_json(&request).await?;

    let output = parse_recruiter_prep(&completion.content)?;
    info!("Parsed {} Q&A items", output.questions.len());

    let cost = estimate_cost(
        params.model,
        completion.usage.prompt_tokens,
        completion.usage.completion_tokens,
    )?;

    Ok(GenerationResult { output, cost })
}
