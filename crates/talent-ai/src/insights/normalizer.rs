//! Best-effort extraction of structured data from generated text.
//!
//! Model responses asked for JSON often arrive wrapped in a markdown code
//! fence, and occasionally as several concatenated objects instead of an
//! array. Absence of structured data is not an error here: every failure
//! path returns `None` and the caller renders a "no data" state.

use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parses a text blob that may contain a JSON value, tolerating a fenced
/// code block around it. Returns `None` when nothing parseable remains.
pub fn parse_json_lenient(text: &str) -> Option<Value> {
    let candidate = strip_code_fence(text.trim());
    if candidate.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str(candidate) {
        return Some(value);
    }

    // Recovery pinned to one observed malformation: a run of top-level
    // objects with nothing between them. Anything else stays unparsed.
    if candidate.starts_with('{') && candidate.ends_with('}') {
        let stitched = format!("[{}]", stitch_adjacent_objects(candidate));
        if let Ok(value) = serde_json::from_str::<Value>(&stitched) {
            return Some(value);
        }
    }

    None
}

/// Typed variant of [`parse_json_lenient`]; shape mismatches also yield `None`.
pub fn parse_json_payload<T: DeserializeOwned>(text: &str) -> Option<T> {
    parse_json_lenient(text).and_then(|value| serde_json::from_value(value).ok())
}

/// Removes one wrapping code fence when the whole blob is fenced; otherwise
/// returns the input untouched. A language tag is any word directly after the
/// opening backticks, newline or not.
fn strip_code_fence(trimmed: &str) -> &str {
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };

    let tag_len = inner
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .map(char::len_utf8)
        .sum::<usize>();
    inner[tag_len..].trim()
}

/// Rewrites `}` *whitespace* `{` boundaries to `},{` so a concatenation of
/// objects can be reparsed as an array.
fn stitch_adjacent_objects(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    let mut pending_ws = String::new();
    let mut after_close = false;

    for c in text.chars() {
        if after_close {
            if c.is_whitespace() {
                pending_ws.push(c);
                continue;
            }
            if c == '{' {
                out.push(',');
                out.push('{');
                pending_ws.clear();
                after_close = false;
                continue;
            }
            out.push_str(&pending_ws);
            pending_ws.clear();
            out.push(c);
            after_close = c == '}';
            continue;
        }

        out.push(c);
        after_close = c == '}';
    }

    out.push_str(&pending_ws);
    out
}
