//! Axum route handler for the resume / job description alignment report.

use axum::{
    extract::{Multipart, State},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::alignment::heatmap::render_alignment_heatmap_png;
use crate::alignment::requirements::{extract_requirements_from_jd, ExtractionParams};
use crate::alignment::scoring::{score_requirements_against_resume, EvidenceRow, RequirementMatch};
use crate::errors::AppError;
use crate::intake::form::read_form;
use crate::intake::{accept_submission, default_temperature};
use crate::pricing::{estimate_cost, CostBreakdown};
use crate::settings::{ALIGNMENT_MAX_ITEMS, ALIGNMENT_TEMPERATURE};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AlignmentResponse {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub matches: Vec<RequirementMatch>,
    pub table: Vec<EvidenceRow>,
    pub heatmap_png_base64: String,
    pub cost: CostBreakdown,
}

/// POST /api/v1/alignment
///
/// Same form as /api/v1/prep. Temperature and strategy are ignored: requirement
/// extraction always runs at the fixed alignment temperature.
/// Only the job description goes to the model; the resume is matched locally.
pub async fn handle_alignment(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AlignmentResponse>, AppError> {
    let request_id = Uuid::new_v4();

    let mut form = read_form(multipart).await?;
    form.temperature = None;
    form.strategy = None;
    default_temperature(&mut form, ALIGNMENT_TEMPERATURE);
    let (validated, resume) = accept_submission(form).await?;
    info!("Alignment {request_id}: '{}'", validated.job.job_title);

    let extracted = extract_requirements_from_jd(
        state.llm.as_ref(),
        ExtractionParams {
            job: &validated.job,
            model: &validated.model,
            temperature: validated.temperature,
            max_items: ALIGNMENT_MAX_ITEMS,
        },
    )
    .await?;

    let matches = score_requirements_against_resume(&extracted.requirements, &resume.text);
    let table: Vec<EvidenceRow> = matches.iter().map(EvidenceRow::from).collect();

    let to_render = matches.clone();
    let png = tokio::task::spawn_blocking(move || render_alignment_heatmap_png(&to_render))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Heatmap task failed: {e}")))??;

    let cost = estimate_cost(
        &validated.model,
        extracted.usage.prompt_tokens,
        extracted.usage.completion_tokens,
    )?;
    info!(
        "Alignment {request_id} complete: {} requirements scored, ${:.6}",
        matches.len(),
        cost.total_cost_usd
    );

    Ok(Json(AlignmentResponse {
        request_id,
        generated_at: Utc::now(),
        model: validated.model,
        matches,
        table,
        heatmap_png_base64: STANDARD.encode(png),
        cost,
    }))
}
