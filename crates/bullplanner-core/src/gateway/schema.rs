//! Response schema and validation for model output.
//!
//! The schema is declared to the model, but the reply is still untrusted:
//! [`parse_suggestions`] checks the structure before any [`AiSuggestion`] is
//! built.

use serde_json::{json, Value};
use tracing::warn;

use super::GatewayError;
use crate::clock::WallTime;
use crate::schedule::{AiSuggestion, DayOfWeek};

const REQUIRED_FIELDS: [&str; 5] = ["title", "day", "startTime", "endTime", "reason"];

/// Structured-output schema sent with every request.
pub fn response_schema() -> Value {
    let days: Vec<&str> = DayOfWeek::ALL.iter().map(DayOfWeek::as_str).collect();
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "title": {
                    "type": "STRING",
                    "description": "A concise title for the study session, e.g., 'Review Biology Notes'"
                },
                "day": {
                    "type": "STRING",
                    "enum": days,
                    "description": "The day of the week"
                },
                "startTime": {
                    "type": "STRING",
                    "description": "Start time in HH:mm 24h format, e.g., '14:30'"
                },
                "endTime": {
                    "type": "STRING",
                    "description": "End time in HH:mm 24h format"
                },
                "reason": {
                    "type": "STRING",
                    "description": "Short explanation why this slot is good (e.g., '1hr gap before work')"
                }
            },
            "required": REQUIRED_FIELDS,
        }
    })
}

/// Parse and validate the model's raw text.
///
/// A structural mismatch (not JSON, not an array, a missing or non-string
/// field, a day outside the enum) rejects the whole reply. Entries that pass
/// the schema but carry an unusable time or an empty title are dropped.
///
/// # Errors
/// [`GatewayError::EmptyResponse`], [`GatewayError::Malformed`] or
/// [`GatewayError::Schema`].
pub fn parse_suggestions(text: &str) -> Result<Vec<AiSuggestion>, GatewayError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(GatewayError::EmptyResponse);
    }

    let value: Value = serde_json::from_str(body).map_err(|e| GatewayError::Malformed(e.to_string()))?;
    let entries = value
        .as_array()
        .ok_or_else(|| GatewayError::Schema("expected a JSON array".to_string()))?;

    let mut suggestions = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let fields = RawSuggestion::from_value(index, entry)?;
        match fields.into_suggestion() {
            Ok(suggestion) => suggestions.push(suggestion),
            Err(reason) => warn!(index, %reason, "dropping unusable suggestion"),
        }
    }
    Ok(suggestions)
}

/// Schema-checked string fields of one entry.
struct RawSuggestion<'a> {
    title: &'a str,
    day: DayOfWeek,
    start_time: &'a str,
    end_time: &'a str,
    reason: &'a str,
}

impl<'a> RawSuggestion<'a> {
    fn from_value(index: usize, entry: &'a Value) -> Result<Self, GatewayError> {
        let obj = entry
            .as_object()
            .ok_or_else(|| GatewayError::Schema(format!("item {index}: expected an object")))?;

        let field = move |name: &str| -> Result<&'a str, GatewayError> {
            obj.get(name)
                .ok_or_else(|| GatewayError::Schema(format!("item {index}: missing '{name}'")))?
                .as_str()
                .ok_or_else(|| GatewayError::Schema(format!("item {index}: '{name}' must be a string")))
        };

        let day_text = field("day")?;
        let day = DayOfWeek::ALL
            .into_iter()
            .find(|d| d.as_str() == day_text)
            .ok_or_else(|| GatewayError::Schema(format!("item {index}: unknown day '{day_text}'")))?;

        Ok(Self {
            title: field("title")?,
            day,
            start_time: field("startTime")?,
            end_time: field("endTime")?,
            reason: field("reason")?,
        })
    }

    fn into_suggestion(self) -> Result<AiSuggestion, String> {
        let start_time: WallTime = self.start_time.parse().map_err(|e| format!("{e}"))?;
        let end_time: WallTime = self.end_time.parse().map_err(|e| format!("{e}"))?;
        let suggestion = AiSuggestion {
            title: self.title.trim().to_string(),
            day: self.day,
            start_time,
            end_time,
            reason: self.reason.trim().to_string(),
        };
        suggestion.validate().map_err(|e| e.to_string())?;
        Ok(suggestion)
    }
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
