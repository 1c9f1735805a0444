use crate::errors::AppError;
use crate::intake::models::{CandidateLevel, CompanyType, FormInput, JobContext, ValidatedForm};
use crate::prep::prompts::PromptStrategy;
use crate::settings::{
    ALLOWED_COMPANY_TYPES, ALLOWED_LEVELS, ALLOWED_MODELS, MAX_JD_CHARS, MAX_RESUME_BYTES,
    MAX_RESUME_MB, MAX_TEMPERATURE, MAX_TITLE_CHARS, MIN_TEMPERATURE,
};

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Checks every form field and returns all problems found, in form order.
/// An empty list means the form is valid. Pure: no I/O, no side effects.
pub fn validate_user_inputs(form: &FormInput) -> Vec<String> {
    let mut errors = Vec::new();

    if is_blank(&form.job_title) {
        errors.push("Job Title is required.".to_string());
    } else if form.job_title.trim().chars().count() > MAX_TITLE_CHARS {
        errors.push(format!(
            "Job Title is too long (max {MAX_TITLE_CHARS} characters)."
        ));
    }

    if is_blank(&form.job_description) {
        errors.push("Job Description is required.".to_string());
    } else if form.job_description.trim().chars().count() > MAX_JD_CHARS {
        errors.push(format!(
            "Job Description is too long (max {MAX_JD_CHARS} characters)."
        ));
    }

    check_choice(&mut errors, "Candidate Level", &form.level, ALLOWED_LEVELS);
    check_choice(&mut errors, "Company Type", &form.company_type, ALLOWED_COMPANY_TYPES);

    if is_blank(&form.model) {
        errors.push("Model selection is required.".to_string());
    } else if !ALLOWED_MODELS.contains(&form.model.as_str()) {
        errors.push(format!("Model must be one of: {}.", ALLOWED_MODELS.join(", ")));
    }

    match form.temperature.as_deref().map(parse_temperature) {
        Some(Some(t)) if (MIN_TEMPERATURE..=MAX_TEMPERATURE).contains(&t) => {}
        Some(Some(_)) => errors.push(format!(
            "Temperature must be between {MIN_TEMPERATURE:.1} and {MAX_TEMPERATURE:.1}."
        )),
        _ => errors.push("Temperature must be a number.".to_string()),
    }

    if parse_strategy(form.strategy.as_deref()).is_none() {
        let keys: Vec<&str> = PromptStrategy::ALL.iter().map(|s| s.key()).collect();
        errors.push(format!("Prompt strategy must be one of: {}.", keys.join(", ")));
    }

    match &form.resume {
        None => errors.push("Resume PDF upload is required.".to_string()),
        Some(file) => {
            if !file.file_name.to_lowercase().ends_with(".pdf") {
                errors.push("Resume must be a PDF file.".to_string());
            }
            if file.size() > MAX_RESUME_BYTES {
                errors.push(format!(
                    "Resume PDF is too large (max {MAX_RESUME_MB} MB)."
                ));
            }
        }
    }

    errors
}

fn check_choice(errors: &mut Vec<String>, label: &str, value: &str, allowed: &[&str]) {
    if is_blank(value) {
        errors.push(format!("{label} is required."));
    } else if !allowed.contains(&value) {
        errors.push(format!("{label} must be one of: {}.", allowed.join(", ")));
    }
}

fn parse_temperature(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|t| t.is_finite())
}

/// A missing or blank strategy selects the default one.
fn parse_strategy(raw: Option<&str>) -> Option<PromptStrategy> {
    match raw.map(str::trim) {
        None | Some("") => Some(PromptStrategy::default()),
        Some(key) => PromptStrategy::from_key(key),
    }
}

/// Joins validation messages into the bullet list shown to the user.
pub fn format_errors(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("- {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Validates the form and, on success, converts it into typed values.
pub fn validate_user_inputs_or_raise(form: FormInput) -> Result<ValidatedForm, AppError> {
    let errors = validate_user_inputs(&form);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // The checks above guarantee these conversions succeed.
    let level = CandidateLevel::from_label(&form.level)
        .ok_or_else(|| AppError::Validation(vec!["Candidate Level is invalid.".to_string()]))?;
    let company_type = CompanyType::from_label(&form.company_type)
        .ok_or_else(|| AppError::Validation(vec!["Company Type is invalid.".to_string()]))?;
    let temperature = form
        .temperature
        .as_deref()
        .and_then(parse_temperature)
        .ok_or_else(|| AppError::Validation(vec!["Temperature must be a number.".to_string()]))?;
    let strategy = parse_strategy(form.strategy.as_deref())
        .ok_or_else(|| AppError::Validation(vec!["Prompt strategy is invalid.".to_string()]))?;
    let resume = form
        .resume
        .ok_or_else(|| AppError::Validation(vec!["Resume PDF upload is required.".to_string()]))?;

    Ok(ValidatedForm {
        job: JobContext {
            job_title: form.job_title.trim().to_string(),
            job_description: form.job_description.trim().to_string(),
            level,
            company_type,
        },
        model: form.model,
        temperature,
        strategy,
        resume,
    })
}
