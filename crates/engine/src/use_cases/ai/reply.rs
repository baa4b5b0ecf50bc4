//! Best-effort decoding of model replies.
//!
//! Models are asked for JSON but do not always comply. Anything that does
//! not decode degrades to the raw text rather than failing the request.

use lorekeeper_domain::common::null_as_default;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Verdict of a consistency check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyVerdict {
    #[serde(default)]
    pub is_consistent: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub warnings: Vec<String>,
}

/// Suggestions from a deep-dive reply. Never empty.
pub(super) fn parse_suggestions(raw: &str) -> Vec<String> {
    match decode::<Vec<String>>(raw) {
        Some(suggestions) if !suggestions.is_empty() => suggestions,
        _ => {
            tracing::debug!("Deep-dive reply was not a JSON string array, using raw text");
            vec![raw.to_string()]
        }
    }
}

pub(super) fn parse_verdict(raw: &str) -> ConsistencyVerdict {
    decode::<ConsistencyVerdict>(raw).unwrap_or_else(|| {
        tracing::debug!("Consistency reply was not a verdict object, using raw text");
        ConsistencyVerdict {
            is_consistent: false,
            warnings: vec![raw.to_string()],
        }
    })
}

fn decode<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let trimmed = raw.trim();
    serde_json::from_str(trimmed)
        .ok()
        .or_else(|| strip_code_fence(trimmed).and_then(|body| serde_json::from_str(body).ok()))
}

/// Body of a Markdown code fence wrapping the whole reply, e.g. ```json ... ```
fn strip_code_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?;
    let rest = rest.strip_suffix("```")?;
    // Drop the info string (`json`) on the opening line.
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    Some(body.trim())
}
