use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::DashboardError;

/// Field an agent uses when it answers with free text instead of an object.
pub const RAW_TEXT_FIELD: &str = "raw_text";

fn fenced_block_regex() -> &'static Regex {
    static FENCED_BLOCK_RE: OnceLock<Regex> = OnceLock::new();
    FENCED_BLOCK_RE.get_or_init(|| {
        Regex::new(r"(?s)```([A-Za-z0-9_+-]*)[ \t]*\r?\n?(.*?)```")
            .expect("fenced block regex should compile")
    })
}

/// Body of the first block tagged `json`, else of the first untagged block.
fn json_fence_body(raw: &str) -> Option<&str> {
    let mut untagged = None;
    for captures in fenced_block_regex().captures_iter(raw) {
        let tag = captures.get(1).map_or("", |m| m.as_str());
        let body = captures.get(2).map_or("", |m| m.as_str());
        if tag.eq_ignore_ascii_case("json") {
            return Some(body);
        }
        if tag.is_empty() && untagged.is_none() {
            untagged = Some(body);
        }
    }
    untagged
}

/// Returns the raw text if `result` is a text envelope rather than one of the
/// structured shapes keyed by `expected_keys`.
pub fn envelope_text<'a>(result: &'a Value, expected_keys: &[&str]) -> Option<&'a str> {
    match result {
        Value::String(text) => Some(text.as_str()),
        Value::Object(map) => {
            let raw = map.get(RAW_TEXT_FIELD)?.as_str()?;
            if expected_keys.iter().any(|key| map.contains_key(*key)) {
                None
            } else {
                Some(raw)
            }
        }
        _ => None,
    }
}

/// Pulls the JSON fenced block out of `raw` and parses it. Blocks tagged with
/// another language are skipped. Bare braces outside a fence are never scraped.
pub fn extract_fenced_json(raw: &str) -> Result<Value, DashboardError> {
    let body = json_fence_body(raw).ok_or_else(|| {
        DashboardError::MalformedResponse("no fenced JSON block in agent text".to_string())
    })?;

    serde_json::from_str(body.trim()).map_err(|err| {
        DashboardError::MalformedResponse(format!("fenced block is not valid JSON: {err}"))
    })
}

/// Passes structured results through untouched and replaces a text envelope
/// with the JSON embedded in it.
pub fn unwrap_result(result: Value, expected_keys: &[&str]) -> Result<Value, DashboardError> {
    let Some(raw) = envelope_text(&result, expected_keys) else {
        return Ok(result);
    };

    tracing::debug!(chars = raw.len(), "unwrapping text envelope");
    extract_fenced_json(raw)
}
