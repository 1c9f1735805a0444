// Compiled-in domain constants. These are not read from the environment:
// changing an allowed value or a limit is a code change.

/// Company types offered on the form.
pub const ALLOWED_COMPANY_TYPES: &[&str] = &["Startup", "Enterprise"];

/// Candidate levels offered on the form.
pub const ALLOWED_LEVELS: &[&str] = &["Intern", "Junior", "Mid", "Senior", "Staff/Lead"];

/// Models a user may pick. Every entry must have a price in `pricing::MODEL_PRICING_PER_1M`.
pub const ALLOWED_MODELS: &[&str] = &[
    "gpt-4o-mini",
    "gpt-4.1-mini",
    "gpt-4.1-nano",
    "gpt-3.5-turbo",
];

/// Requirement extraction always runs at this temperature.
pub const ALIGNMENT_TEMPERATURE: f64 = 0.2;
/// Upper bound on requirements kept from a single extraction.
pub const ALIGNMENT_MAX_ITEMS: usize = 10;

/// Temperature used for Q&A generation when the form leaves it empty.
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const MIN_TEMPERATURE: f64 = 0.0;
pub const MAX_TEMPERATURE: f64 = 2.0;

pub const MAX_TITLE_CHARS: usize = 120;
pub const MAX_JD_CHARS: usize = 12_000;
pub const MAX_RESUME_MB: usize = 5;
pub const MAX_RESUME_BYTES: usize = MAX_RESUME_MB * 1024 * 1024;

/// Resume text beyond this many characters is cut before it reaches a prompt.
pub const MAX_RESUME_CHARS: usize = 60_000;
pub const TRUNCATION_MARKER: &str = "\n\n[TRUNCATED]";

/// Evidence snippets are cut to this many characters (plus an ellipsis).
pub const MAX_EVIDENCE_CHARS: usize = 180;
pub const NOT_SPECIFIED: &str = "Not specified in resume";
