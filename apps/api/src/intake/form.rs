use axum::extract::multipart::{Field, Multipart};
use tracing::debug;

use crate::errors::AppError;
use crate::intake::models::{FormInput, UploadedFile};

/// Reads a multipart form into raw field values.
///
/// Only shape problems (a broken body, a non-UTF-8 text field) fail here.
/// Missing or invalid values are left for the validator so they are reported together.
pub async fn read_form(mut multipart: Multipart) -> Result<FormInput, AppError> {
    let mut form = FormInput::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed form body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_title" => form.job_title = read_text(field).await?,
            "job_description" => form.job_description = read_text(field).await?,
            "level" => form.level = read_text(field).await?,
            "company_type" => form.company_type = read_text(field).await?,
            "model" => form.model = read_text(field).await?,
            "temperature" => form.temperature = Some(read_text(field).await?),
            "strategy" => form.strategy = Some(read_text(field).await?),
            "resume" => form.resume = read_file(field).await?,
            other => debug!("Ignoring unknown form field '{other}'"),
        }
    }

    Ok(form)
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    let name = field.name().unwrap_or_default().to_string();
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Could not read field '{name}': {e}")))
}

/// An empty file part with no name is how browsers submit "no file chosen".
async fn read_file(field: Field<'_>) -> Result<Option<UploadedFile>, AppError> {
    let file_name = field.file_name().unwrap_or_default().to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Could not read the uploaded file: {e}")))?;

    if file_name.is_empty() && bytes.is_empty() {
        return Ok(None);
    }
    Ok(Some(UploadedFile { file_name, bytes }))
}
