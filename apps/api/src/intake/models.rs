use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::prep::prompts::PromptStrategy;
use crate::settings::{ALLOWED_COMPANY_TYPES, ALLOWED_LEVELS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateLevel {
    Intern,
    Junior,
    Mid,
    Senior,
    #[serde(rename = "Staff/Lead")]
    StaffLead,
}

impl CandidateLevel {
    pub const ALL: [CandidateLevel; 5] = [
        CandidateLevel::Intern,
        CandidateLevel::Junior,
        CandidateLevel::Mid,
        CandidateLevel::Senior,
        CandidateLevel::StaffLead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CandidateLevel::Intern => "Intern",
            CandidateLevel::Junior => "Junior",
            CandidateLevel::Mid => "Mid",
            CandidateLevel::Senior => "Senior",
            CandidateLevel::StaffLead => "Staff/Lead",
        }
    }

    /// Exact, case-sensitive match against the form labels.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.as_str() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyType {
    Startup,
    Enterprise,
}

impl CompanyType {
    pub const ALL: [CompanyType; 2] = [CompanyType::Startup, CompanyType::Enterprise];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompanyType::Startup => "Startup",
            CompanyType::Enterprise => "Enterprise",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == label)
    }
}

/// A file part received from the form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Raw form values exactly as submitted. Nothing here has been checked yet.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub job_title: String,
    pub job_description: String,
    pub level: String,
    pub company_type: String,
    pub model: String,
    /// Kept as text so a non-numeric value can be reported instead of rejected by the extractor.
    pub temperature: Option<String>,
    pub strategy: Option<String>,
    pub resume: Option<UploadedFile>,
}

/// Job context for one generation request. Built only from a form that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobContext {
    pub job_title: String,
    pub job_description: String,
    pub level: CandidateLevel,
    pub company_type: CompanyType,
}

/// Everything a pipeline needs after validation succeeded.
#[derive(Debug, Clone)]
pub struct ValidatedForm {
    pub job: JobContext,
    pub model: String,
    pub temperature: f64,
    pub strategy: PromptStrategy,
    pub resume: UploadedFile,
}

/// Extracted resume. Lives for one request and is never persisted.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub text: String,
    pub truncated: bool,
}
