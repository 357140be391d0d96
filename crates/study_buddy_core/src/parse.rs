//! crates/study_buddy_core/src/parse.rs
//!
//! Recovers structured JSON from model replies that wrap the payload in
//! markdown fences or surrounding prose.

use serde_json::Value;

use crate::ports::{CoreError, CoreResult};

/// Extracts a JSON array from a raw model reply.
///
/// Tier one strips any markdown code fence and parses the remainder
/// directly. Tier two scans for the outermost bracketed span (first `[`
/// through last `]`) and parses that. A reply that defeats both tiers is
/// `UnparsableResponse`; a reply that parses to something other than an
/// array is `SchemaViolation`.
pub fn parse_json_array(raw: &str) -> CoreResult<Vec<Value>> {
    let cleaned = strip_code_fence(raw);

    let value = match serde_json::from_str::<Value>(cleaned) {
        Ok(value) => value,
        Err(_) => bracketed_span(cleaned)
            .and_then(|span| serde_json::from_str::<Value>(span).ok())
            .ok_or_else(|| CoreError::UnparsableResponse(raw.to_string()))?,
    };

    match value {
        Value::Array(items) => Ok(items),
        _ => Err(CoreError::SchemaViolation(
            "expected a top-level JSON array".to_string(),
        )),
    }
}

/// Strips a leading ``` or ```json marker and a trailing ``` marker.
/// Either marker may appear without the other.
fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        let rest = rest.strip_prefix("json").unwrap_or(rest);
        text = rest.trim_start();
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }
    text
}

// Greedy: first '[' through last ']'. Both are ASCII, so byte indices are
// safe slice boundaries.
fn bracketed_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}
