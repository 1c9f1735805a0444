//! Output Parser: validates model replies against the two fixed response shapes.
//!
//! A reply that fails here is a terminal error for the request. Nothing is
//! repaired, defaulted, or retried.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of Q&A items every recruiter-prep reply must contain.
pub const QUESTION_COUNT: usize = 10;

/// The recruiter screen categories, in the order the prompt asks for them.
pub const CATEGORIES: [&str; QUESTION_COUNT] = [
    "Background walkthrough",
    "Motivation for role",
    "Motivation for company type",
    "Role alignment",
    "Impact with metrics",
    "Communication/collaboration",
    "Problem-solving example",
    "Strength & weakness",
    "Career trajectory",
    "Logistics (compensation, location, timeline)",
];

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("model reply is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("model reply does not match the expected shape: {0}")]
    Shape(String),

    #[error("expected exactly 10 questions, got {0}")]
    QuestionCount(usize),

    #[error("question categories do not match the required list: {0}")]
    Categories(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QAItem {
    pub category: String,
    pub question: String,
    pub intent: String,
    pub answer: String,
    pub follow_up: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecruiterPrepOutput {
    pub questions: Vec<QAItem>,
}

/// A hiring requirement and the keywords used to look for it in a resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Requirement {
    pub requirement: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RequirementsEnvelope {
    requirements: Vec<Requirement>,
}

/// Parses a recruiter-prep reply: exactly ten items, five string fields each,
/// one item per required category (any order).
pub fn parse_recruiter_prep(text: &str) -> Result<RecruiterPrepOutput, SchemaError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let output: RecruiterPrepOutput =
        serde_json::from_value(value).map_err(|e| SchemaError::Shape(e.to_string()))?;

    if output.questions.len() != QUESTION_COUNT {
        return Err(SchemaError::QuestionCount(output.questions.len()));
    }

    check_categories(&output.questions)?;
    Ok(output)
}

fn check_categories(items: &[QAItem]) -> Result<(), SchemaError> {
    let mut seen = HashSet::new();
    for item in items {
        let category = item.category.trim();
        if !CATEGORIES.contains(&category) {
            return Err(SchemaError::Categories(format!(
                "unknown category '{category}'"
            )));
        }
        if !seen.insert(category) {
            return Err(SchemaError::Categories(format!(
                "category '{category}' appears more than once"
            )));
        }
    }
    // Ten known, distinct categories out of ten means full coverage.
    Ok(())
}

/// Parses a requirement-extraction reply and keeps at most `max_items` requirements.
pub fn parse_requirements(text: &str, max_items: usize) -> Result<Vec<Requirement>, SchemaError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let envelope: RequirementsEnvelope =
        serde_json::from_value(value).map_err(|e| SchemaError::Shape(e.to_string()))?;

    let mut requirements = envelope.requirements;
    requirements.truncate(max_items);
    Ok(requirements)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_prep_reply_parses() {
        let output = parse_recruiter_prep(&valid_prep_json()).unwrap();
        assert_eq!(output.questions.len(), 10);
        assert_eq!(output.questions[0].category, "Background walkthrough");
    }

    #[test]
    fn test_categories_may_come_in_any_order() {
        let mut questions: Vec<QAItem> = CATEGORIES.iter().map(|c| qa_item(c)).collect();
        questions.reverse();
        let text = serde_json::to_string(&RecruiterPrepOutput { questions }).unwrap();
        assert!(parse_recruiter_prep(&text).is_ok());
    }

    #[test]
    fn test_nine_questions_fail() {
        let questions: Vec<QAItem> = CATEGORIES.iter().take(9).map(|c| qa_item(c)).collect();
        let text = serde_json::to_string(&RecruiterPrepOutput { questions }).unwrap();
        assert!(matches!(
            parse_recruiter_prep(&text),
            Err(SchemaError::QuestionCount(9))
        ));
    }

    #[test]
    fn test_eleven_questions_fail() {
        let mut questions: Vec<QAItem> = CATEGORIES.iter().map(|c| qa_item(c)).collect();
        questions.push(qa_item("Background walkthrough"));
        let text = serde_json::to_string(&RecruiterPrepOutput { questions }).unwrap();
        assert!(matches!(
            parse_recruiter_prep(&text),
            Err(SchemaError::QuestionCount(11))
        ));
    }

    #[test]
    fn test_missing_field_is_shape_error() {
        let mut value: serde_json::Value = serde_json::from_str(&valid_prep_json()).unwrap();
        value["questions"][3]
            .as_object_mut()
            .unwrap()
            .remove("follow_up");
        assert!(matches!(
            parse_recruiter_prep(&value.to_string()),
            Err(SchemaError::Shape(_))
        ));
    }

    #[test]
    fn test_non_string_field_is_shape_error() {
        let mut value: serde_json::Value = serde_json::from_str(&valid_prep_json()).unwrap();
        value["questions"][0]["answer"] = json!(42);
        assert!(matches!(
            parse_recruiter_prep(&value.to_string()),
            Err(SchemaError::Shape(_))
        ));
    }

    #[test]
    fn test_duplicate_category_fails() {
        let mut questions: Vec<QAItem> = CATEGORIES.iter().map(|c| qa_item(c)).collect();
        questions[9] = qa_item("Role alignment");
        let text = serde_json::to_string(&RecruiterPrepOutput { questions }).unwrap();
        assert!(matches!(
            parse_recruiter_prep(&text),
            Err(SchemaError::Categories(_))
        ));
    }

    #[test]
    fn test_unknown_category_fails() {
        let mut questions: Vec<QAItem> = CATEGORIES.iter().map(|c| qa_item(c)).collect();
        questions[0] = qa_item("Favourite colour");
        let text = serde_json::to_string(&RecruiterPrepOutput { questions }).unwrap();
        assert!(matches!(
            parse_recruiter_prep(&text),
            Err(SchemaError::Categories(_))
        ));
    }

    #[test]
    fn test_fenced_json_is_not_repaired() {
        let text = format!("```json\n{}\n```", valid_prep_json());
        assert!(matches!(
            parse_recruiter_prep(&text),
            Err(SchemaError::InvalidJson(_))
        ));
    }

    #[test]
    fn test_requirements_parse_and_cap() {
        let reqs: Vec<_> = (0..12)
            .map(|i| json!({"requirement": format!("Req {i}"), "keywords": ["rust", "sql"]}))
            .collect();
        let text = json!({ "requirements": reqs }).to_string();
        let parsed = parse_requirements(&text, 10).unwrap();
        assert_eq!(parsed.len(), 10);
        assert_eq!(parsed[0].requirement, "Req 0");
        assert_eq!(parsed[0].keywords, vec!["rust", "sql"]);
    }

    #[test]
    fn test_requirements_must_be_a_list() {
        let text = json!({"requirements": "Python"}).to_string();
        assert!(matches!(
            parse_requirements(&text, 10),
            Err(SchemaError::Shape(_))
        ));
    }

    #[test]
    fn test_requirement_keywords_must_be_strings() {
        let text = json!({"requirements": [{"requirement": "Python", "keywords": [1, 2]}]}).to_string();
        assert!(matches!(
            parse_requirements(&text, 10),
            Err(SchemaError::Shape(_))
        ));
    }

    #[test]
    fn test_requirements_missing_key_fails() {
        assert!(matches!(
            parse_requirements("{}", 10),
            Err(SchemaError::Shape(_))
        ));
    }

    #[test]
    fn test_requirements_invalid_json() {
        assert!(matches!(
            parse_requirements("not json", 10),
            Err(SchemaError::InvalidJson(_))
        ));
    }
}
