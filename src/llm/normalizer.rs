//! Turn raw provider replies into candidate assessments

use crate::error::{CvRankerError, Result};
use crate::llm::prompts::keys;
use crate::processing::assessment::{CandidateAssessment, Recommendation};
use serde_json::{Map, Value};

/// Strip a leading ```` ```json ```` or ```` ``` ```` marker and a trailing
/// ```` ``` ```` marker. Each check runs independently.
pub fn strip_markdown_fence(reply: &str) -> &str {
    let mut text = reply.trim();
    if let Some(rest) = text.strip_prefix("```json") {
        text = rest;
    } else if let Some(rest) = text.strip_prefix("```") {
        text = rest;
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}

/// Parse a reply that is expected to be bare JSON.
pub fn parse_reply(reply: &str) -> Result<CandidateAssessment> {
    let value: Value = serde_json::from_str(reply.trim())?;
    match value {
        Value::Object(fields) => Ok(assessment_from_fields(&fields)),
        other => Err(CvRankerError::Provider(format!(
            "reply is not a JSON object (got {})",
            json_kind(&other)
        ))),
    }
}

/// Parse a reply that may be wrapped in a markdown code fence.
pub fn parse_fenced_reply(reply: &str) -> Result<CandidateAssessment> {
    parse_reply(strip_markdown_fence(reply))
}

/// Build an assessment from loosely-typed reply fields, defaulting
/// anything missing or of the wrong shape.
fn assessment_from_fields(fields: &Map<String, Value>) -> CandidateAssessment {
    CandidateAssessment {
        candidate_name: text_field(fields, keys::CANDIDATE_NAME),
        fit_score: score_field(fields, keys::FIT_SCORE),
        matched_skills: list_field(fields, keys::MATCHED_SKILLS),
        missing_skills: list_field(fields, keys::MISSING_SKILLS),
        experience_summary: text_field(fields, keys::EXPERIENCE_SUMMARY),
        education_summary: text_field(fields, keys::EDUCATION_SUMMARY),
        recommendation: fields
            .get(keys::RECOMMENDATION)
            .and_then(Value::as_str)
            .and_then(Recommendation::from_wire)
            .unwrap_or(Recommendation::KeepOnHold),
        source_file_path: String::new(),
        source_file_name: String::new(),
    }
}

fn text_field(fields: &Map<String, Value>, key: &str) -> String {
    fields.get(key).map(value_to_text).unwrap_or_default()
}

fn list_field(fields: &Map<String, Value>, key: &str) -> Vec<String> {
    match fields.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .map(value_to_text)
            .filter(|item| !item.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn score_field(fields: &Map<String, Value>, key: &str) -> u8 {
    let raw = match fields.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok(),
        _ => None,
    };

    match raw {
        Some(score) if score.is_finite() => {
            score.round().clamp(0.0, CandidateAssessment::MAX_SCORE as f64) as u8
        }
        _ => 0,
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
