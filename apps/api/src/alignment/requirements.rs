use tracing::info;

use crate::alignment::prompts::build_extract_requirements_prompts;
use crate::errors::AppError;
use crate::intake::models::JobContext;
use crate::llm_client::{ChatModel, ChatRequest, TokenUsage};
use crate::schema::{parse_requirements, Requirement};

#[derive(Debug, Clone, Copy)]
pub struct ExtractionParams<'a> {
    pub job: &'a JobContext,
    pub model: &'a str,
    pub temperature: f64,
    pub max_items: usize,
}

#[derive(Debug, Clone)]
pub struct ExtractedRequirements {
    pub requirements: Vec<Requirement>,
    pub usage: TokenUsage,
}

/// Asks the model for the top hiring requirements of a job description.
///
/// The resume is not sent: matching against it happens locally in `scoring`.
pub async fn extract_requirements_from_jd(
    llm: &dyn ChatModel,
    params: ExtractionParams<'_>,
) -> Result<ExtractedRequirements, AppError> {
    let prompts = build_extract_requirements_prompts(
        &params.job.job_title,
        &params.job.job_description,
        params.max_items,
    );
    let request = ChatRequest::new(params.model, prompts, params.temperature);

    info!("Extracting up to {} requirements with {}", params.max_items, params.model);
    let completion = llm.complete_json(&request).await?;
    let requirements = parse_requirements(&completion.content, params.max_items)?;
    info!("Extracted {} requirements", requirements.len());

    Ok(ExtractedRequirements {
        requirements,
        usage: completion.usage,
    })
}
