//! Axum route handler for recruiter Q&A generation.

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::form::read_form;
use crate::intake::{accept_submission, default_temperature};
use crate::prep::generator::{generate_recruiter_prep, PrepParams};
use crate::prep::prompts::PromptStrategy;
use crate::prep::report::{cost_caption, render_markdown};
use crate::pricing::CostBreakdown;
use crate::schema::QAItem;
use crate::settings::DEFAULT_TEMPERATURE;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PrepResponse {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub strategy: PromptStrategy,
    pub resume_truncated: bool,
    pub questions: Vec<QAItem>,
    pub cost: CostBreakdown,
    /// Markdown rendering of `questions` followed by the cost caption.
    pub report: String,
}

/// POST /api/v1/prep
///
/// Multipart form: job_title, job_description, level, company_type, model,
/// temperature (optional), strategy (optional), resume (PDF file).
/// Returns exactly ten Q&A items, one per recruiter screen category.
pub async fn handle_generate_prep(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<PrepResponse>, AppError> {
    let request_id = Uuid::new_v4();

    let mut form = read_form(multipart).await?;
    default_temperature(&mut form, DEFAULT_TEMPERATURE);
    let (validated, resume) = accept_submission(form).await?;
    info!(
        "Recruiter prep {request_id}: '{}' ({}, {})",
        validated.job.job_title,
        validated.job.level.as_str(),
        validated.job.company_type.as_str()
    );

    let result = generate_recruiter_prep(
        state.llm.as_ref(),
        PrepParams {
            job: &validated.job,
            resume_text: &resume.text,
            model: &validated.model,
            temperature: validated.temperature,
            strategy: validated.strategy,
        },
    )
    .await?;

    let report = render_markdown(&result.output, &result.cost);
    info!("Recruiter prep {request_id} complete. {}", cost_caption(&result.cost));

    Ok(Json(PrepResponse {
        request_id,
        generated_at: Utc::now(),
        model: validated.model,
        strategy: validated.strategy,
        resume_truncated: resume.truncated,
        questions: result.output.questions,
        cost: result.cost,
        report,
    }))
}
