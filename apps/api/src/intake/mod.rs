// Request intake: form parsing, validation, and resume text extraction.
// Everything here runs before any model call.

pub mod form;
pub mod models;
pub mod pdf;
pub mod validation;

use tracing::warn;

use crate::errors::AppError;
use crate::settings::MAX_RESUME_CHARS;
use models::{FormInput, ResumeDocument, ValidatedForm};
use validation::{format_errors, validate_user_inputs_or_raise};

/// Validates a submitted form and extracts its resume text.
///
/// Shared by both pipelines. Fails on the first stage that fails: validation
/// errors are reported together, extraction only runs on a valid form.
pub async fn accept_submission(form: FormInput) -> Result<(ValidatedForm, ResumeDocument), AppError> {
    let validated = validate_user_inputs_or_raise(form).map_err(|e| {
        if let AppError::Validation(errors) = &e {
            warn!("Rejected form input:\n{}", format_errors(errors));
        }
        e
    })?;

    let resume = ResumeDocument::extract(validated.resume.bytes.clone(), MAX_RESUME_CHARS).await?;
    Ok((validated, resume))
}

/// Replaces a missing or blank temperature with `value`.
pub fn default_temperature(form: &mut FormInput, value: f64) {
    let blank = form
        .temperature
        .as_deref()
        .map_or(true, |t| t.trim().is_empty());
    if blank {
        form.temperature = Some(value.to_string());
    }
}
