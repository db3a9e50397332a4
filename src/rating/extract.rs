//! Pulling a JSON object out of free-form model output.
//!
//! Models asked for "exactly one JSON object" still wrap it in prose or code
//! fences, and small models occasionally emit `Infinity`. We normalize, take the
//! widest `{ ... }` span, and parse that.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static OBJECT_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("object span regex is valid"));

/// Why a reply could not be turned into JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    NoObject(String),
    Malformed(String),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::NoObject(text) => write!(f, "No JSON object in: {text}"),
            ExtractError::Malformed(err) => write!(f, "Malformed JSON object: {err}"),
        }
    }
}

/// Extract and parse the first (greedy) brace-delimited object in `text`.
pub fn parse_first_json(text: &str) -> Result<Value, ExtractError> {
    let mut cleaned = text.trim().replace("Infinity", "null");
    if cleaned.starts_with("```") && cleaned.ends_with("```") {
        cleaned = cleaned.trim_matches('`').to_string();
    }

    let span = OBJECT_SPAN
        .find(&cleaned)
        .ok_or_else(|| ExtractError::NoObject(cleaned.clone()))?;

    serde_json::from_str(span.as_str()).map_err(|e| ExtractError::Malformed(e.to_string()))
}
