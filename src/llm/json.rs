//! JSON recovery for model output.

use serde_json::Value;

use super::client::LlmError;

/// Parse model output as JSON.
///
/// Models occasionally wrap the object in prose or code fences despite
/// instructions; when whole-string parsing fails, the outermost braces
/// window is tried before giving up.
pub fn extract_json(text: &str) -> Result<Value, LlmError> {
    if let Ok(value) = serde_json::from_str(text) {
        return Ok(value);
    }

    let start = text.find('{');
    let end = text.rfind('}');
    match (start, end) {
        (Some(start), Some(end)) if end > start => serde_json::from_str(&text[start..=end])
            .map_err(|_| LlmError::Contract("could not extract valid JSON from response".into())),
        _ => Err(LlmError::Contract(
            "no JSON object found in response".into(),
        )),
    }
}
