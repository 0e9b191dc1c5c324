//! Parse completion output into person records
//!
//! The service is asked for a bare JSON array but often wraps it in a fenced
//! code block or surrounds it with prose. Candidates are tried in order:
//!
//! 1. the whole trimmed response
//! 2. the body of the first fenced code block
//! 3. the first complete JSON array of objects starting at any `[`, ignoring
//!    whatever prose precedes or follows it

use crate::error::CompletionError;
use rollcall_domain::PersonRecord;
use serde_json::{Map, Value};
use tracing::debug;

/// Parse a completion response into person records
pub fn parse_completion(response: &str) -> Result<Vec<PersonRecord>, CompletionError> {
    let array = locate_array(response).map_err(|message| parse_error(message, response))?;

    let records = array
        .iter()
        .enumerate()
        .map(|(idx, entry)| parse_person(idx, entry))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|message| parse_error(message, response))?;

    debug!("Parsed {} person record(s)", records.len());
    Ok(records)
}

fn parse_error(message: impl Into<String>, response: &str) -> CompletionError {
    CompletionError::Parse {
        message: message.into(),
        raw: response.to_string(),
    }
}

/// Find the first candidate that parses as a JSON array
fn locate_array(response: &str) -> Result<Vec<Value>, String> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err("Empty response".to_string());
    }

    let candidates = [Some(trimmed), fenced_block(trimmed)];

    let mut last_error = None;
    for candidate in candidates.into_iter().flatten() {
        match serde_json::from_str::<Value>(candidate) {
            Ok(Value::Array(items)) => return Ok(items),
            Ok(other) => last_error = Some(format!("Expected JSON array, found {}", type_name(&other))),
            Err(e) => last_error = Some(format!("Invalid JSON: {}", e)),
        }
    }

    if let Some(items) = embedded_array(trimmed) {
        return Ok(items);
    }

    Err(last_error.unwrap_or_else(|| "No JSON array found in response".to_string()))
}

/// Body of the first ``` fenced block, without its language tag
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    let body_start = after_fence.find('\n').map(|i| i + 1)?;
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

/// First complete JSON array of objects that starts at some `[` in `text`
///
/// The stream deserializer stops after one value, so trailing prose is never
/// read. A `[` that does not open an array of objects (a citation like `[1]`,
/// a label like `[Note]`) is skipped.
fn embedded_array(text: &str) -> Option<Vec<Value>> {
    text.match_indices('[').find_map(|(start, _)| {
        let mut stream = serde_json::Deserializer::from_str(&text[start..]).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Array(items))) if items.iter().all(Value::is_object) => Some(items),
            _ => None,
        }
    })
}

fn parse_person(idx: usize, entry: &Value) -> Result<PersonRecord, String> {
    let obj = entry
        .as_object()
        .ok_or_else(|| format!("Entry {} is {}, expected an object", idx, type_name(entry)))?;

    let name = match obj.get("name") {
        Some(Value::String(name)) => name.clone(),
        // Nameless entries are dropped during normalization
        None | Some(Value::Null) => String::new(),
        Some(other) => return Err(format!("Entry {}: 'name' is {}, expected a string", idx, type_name(other))),
    };

    let interests = parse_interests(idx, obj)?;

    Ok(PersonRecord { name, interests })
}

fn parse_interests(idx: usize, obj: &Map<String, Value>) -> Result<Vec<String>, String> {
    match obj.get("interests") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(format!(
                    "Entry {}: interest is {}, expected a string",
                    idx,
                    type_name(other)
                )),
            })
            .collect(),
        Some(other) => Err(format!(
            "Entry {}: 'interests' is {}, expected an array",
            idx,
            type_name(other)
        )),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
