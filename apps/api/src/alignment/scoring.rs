//! Alignment Scorer: matches extracted requirements against resume text.
//!
//! Pure and deterministic: no model call, no randomness. Each requirement's
//! strength depends only on how many of its keywords appear in the resume.

use std::collections::HashSet;

use regex::Regex;
use serde::Serialize;

use crate::schema::Requirement;
use crate::settings::{MAX_EVIDENCE_CHARS, NOT_SPECIFIED};

const ELLIPSIS: char = '…';

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// How well the resume evidences one requirement. Serialized as 0, 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub enum Strength {
    Missing = 0,
    Partial = 1,
    Strong = 2,
}

impl Strength {
    pub const ALL: [Strength; 3] = [Strength::Missing, Strength::Partial, Strength::Strong];

    /// 0 hits → Missing, 1 → Partial, 2 or more → Strong.
    pub fn from_hits(hits: usize) -> Self {
        match hits {
            0 => Strength::Missing,
            1 => Strength::Partial,
            _ => Strength::Strong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strength::Missing => "Missing",
            Strength::Partial => "Partial",
            Strength::Strong => "Strong",
        }
    }
}

impl From<Strength> for u8 {
    fn from(strength: Strength) -> u8 {
        strength as u8
    }
}

/// One scored requirement. Only built by `score_requirements_against_resume`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequirementMatch {
    requirement: String,
    keywords: Vec<String>,
    strength: Strength,
    evidence_snippet: String,
}

impl RequirementMatch {
    pub fn requirement(&self) -> &str {
        &self.requirement
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn strength(&self) -> Strength {
        self.strength
    }

    pub fn evidence_snippet(&self) -> &str {
        &self.evidence_snippet
    }
}

/// One line of the evidence table shown next to the heatmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvidenceRow {
    pub requirement: String,
    pub keywords: String,
    pub strength: &'static str,
    pub evidence: String,
}

impl From<&RequirementMatch> for EvidenceRow {
    fn from(m: &RequirementMatch) -> Self {
        EvidenceRow {
            requirement: m.requirement.clone(),
            keywords: m.keywords.join(", "),
            strength: m.strength.label(),
            evidence: m.evidence_snippet.clone(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Collapses whitespace runs to one space, trims, and lowercases.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Single-token keywords must match on word boundaries; phrases match as substrings.
fn keyword_found(keyword_norm: &str, resume_norm: &str) -> bool {
    let escaped = regex::escape(keyword_norm);
    let pattern = if keyword_norm.contains(' ') {
        escaped
    } else {
        format!(r"\b{escaped}\b")
    };
    Regex::new(&pattern)
        .map(|re| re.is_match(resume_norm))
        .unwrap_or(false)
}

/// Scores each requirement in order.
///
/// Requirements with a blank label or no usable keywords are skipped. Keywords
/// are trimmed and de-duplicated by their normalized form, so hits are distinct.
pub fn score_requirements_against_resume(
    requirements: &[Requirement],
    resume_text: &str,
) -> Vec<RequirementMatch> {
    let resume_norm = normalize(resume_text);

    requirements
        .iter()
        .filter_map(|r| {
            let requirement = r.requirement.trim();
            if requirement.is_empty() {
                return None;
            }

            let mut seen = HashSet::new();
            let keywords: Vec<String> = r
                .keywords
                .iter()
                .map(|k| k.trim())
                .filter(|k| !k.is_empty() && seen.insert(normalize(k)))
                .map(str::to_string)
                .collect();
            if keywords.is_empty() {
                return None;
            }

            let hits: Vec<String> = keywords
                .iter()
                .filter(|k| keyword_found(&normalize(k), &resume_norm))
                .cloned()
                .collect();

            let strength = Strength::from_hits(hits.len());
            let evidence_snippet = if hits.is_empty() {
                NOT_SPECIFIED.to_string()
            } else {
                extract_evidence_snippet(resume_text, &hits, MAX_EVIDENCE_CHARS)
            };

            Some(RequirementMatch {
                requirement: requirement.to_string(),
                keywords,
                strength,
                evidence_snippet,
            })
        })
        .collect()
}

/// Returns the first non-blank resume line containing any hit keyword.
///
/// Falls back to the whole resume with whitespace collapsed. Either result is
/// cut to `max_chars` characters plus an ellipsis.
pub fn extract_evidence_snippet(resume_text: &str, hits: &[String], max_chars: usize) -> String {
    let hits_norm: Vec<String> = hits.iter().map(|k| normalize(k)).collect();

    let matching_line = resume_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| {
            let line_norm = normalize(line);
            hits_norm.iter().any(|k| line_norm.contains(k.as_str()))
        });

    if let Some(line) = matching_line {
        return truncate_chars(line, max_chars);
    }

    let whole = resume_text.split_whitespace().collect::<Vec<_>>().join(" ");
    if whole.is_empty() {
        return NOT_SPECIFIED.to_string();
    }
    truncate_chars(&whole, max_chars)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}{ELLIPSIS}", &text[..byte_idx]),
        None => text.to_string(),
    }
}
