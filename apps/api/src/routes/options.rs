use axum::Json;
use serde::Serialize;

use crate::llm_client::prompts::MISUSE_REFUSAL_MESSAGE;
use crate::prep::prompts::PromptStrategy;
use crate::schema::CATEGORIES;
use crate::settings::{
    ALIGNMENT_MAX_ITEMS, ALIGNMENT_TEMPERATURE, ALLOWED_COMPANY_TYPES, ALLOWED_LEVELS,
    ALLOWED_MODELS, DEFAULT_TEMPERATURE, MAX_JD_CHARS, MAX_RESUME_MB, MAX_TEMPERATURE,
    MAX_TITLE_CHARS, MIN_TEMPERATURE,
};

#[derive(Debug, Serialize)]
pub struct FormOptions {
    pub models: &'static [&'static str],
    pub levels: &'static [&'static str],
    pub company_types: &'static [&'static str],
    pub strategies: Vec<&'static str>,
    pub default_strategy: &'static str,
    pub categories: [&'static str; 10],
    pub limits: FormLimits,
    pub alignment: AlignmentSettings,
    pub misuse_refusal_message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct FormLimits {
    pub max_title_chars: usize,
    pub max_job_description_chars: usize,
    pub max_resume_mb: usize,
    pub min_temperature: f64,
    pub max_temperature: f64,
    pub default_temperature: f64,
}

#[derive(Debug, Serialize)]
pub struct AlignmentSettings {
    pub temperature: f64,
    pub max_items: usize,
}

/// GET /api/v1/options
/// Everything a client needs to build the form. Static for the life of the process.
pub async fn options_handler() -> Json<FormOptions> {
    Json(FormOptions {
        models: ALLOWED_MODELS,
        levels: ALLOWED_LEVELS,
        company_types: ALLOWED_COMPANY_TYPES,
        strategies: PromptStrategy::ALL.iter().map(|s| s.key()).collect(),
        default_strategy: PromptStrategy::default().key(),
        categories: CATEGORIES,
        limits: FormLimits {
            max_title_chars: MAX_TITLE_CHARS,
            max_job_description_chars: MAX_JD_CHARS,
            max_resume_mb: MAX_RESUME_MB,
            min_temperature: MIN_TEMPERATURE,
            max_temperature: MAX_TEMPERATURE,
            default_temperature: DEFAULT_TEMPERATURE,
        },
        alignment: AlignmentSettings {
            temperature: ALIGNMENT_TEMPERATURE,
            max_items: ALIGNMENT_MAX_ITEMS,
        },
        misuse_refusal_message: MISUSE_REFUSAL_MESSAGE,
    })
}
