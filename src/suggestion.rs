//! Site vertical suggestions
//!
//! `Suggestion` is the normalized selection emitted on every keystroke and the
//! shape persisted with the signup step. `VerticalRecord` is the wire shape
//! returned by the `/verticals` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SearchError;

/// A site vertical, either canonical (from the API) or synthesized from user input
///
/// Serializes as `{ "name", "slug", "isUserInput" }` and rejects any other
/// property when deserialized, so values round-trip through persisted signup
/// state unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct Suggestion {
    pub name: String,
    pub slug: String,
    pub is_user_input: bool,
}

impl Suggestion {
    /// Create a canonical suggestion
    pub fn canonical(name: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slug: slug.into(),
            is_user_input: false,
        }
    }

    /// Synthesize a suggestion for free-form text not found in the known list
    ///
    /// Name and slug are both the text itself.
    pub fn user_input(text: &str) -> Self {
        Self {
            name: text.to_string(),
            slug: text.to_string(),
            is_user_input: true,
        }
    }

    /// Whether this suggestion came from the remote API
    pub fn is_canonical(&self) -> bool {
        !self.is_user_input
    }
}

/// A vertical as returned by `GET /verticals`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerticalRecord {
    pub vertical_name: String,
    pub vertical_slug: String,
    #[serde(default)]
    pub is_user_input_vertical: bool,
}

impl From<VerticalRecord> for Suggestion {
    fn from(record: VerticalRecord) -> Self {
        Self {
            name: record.vertical_name,
            slug: record.vertical_slug,
            is_user_input: record.is_user_input_vertical,
        }
    }
}

/// Validate a persisted site-vertical value
///
/// Accepts an object whose only properties are `isUserInput` (bool), `name`
/// (string) and `slug` (string). Every property is optional; missing ones take
/// their default.
pub fn validate_site_vertical(value: &Value) -> Result<Suggestion, SearchError> {
    if !value.is_object() {
        return Err(SearchError::InvalidVertical(format!(
            "expected an object, got {}",
            json_type_name(value)
        )));
    }

    Suggestion::deserialize(value).map_err(|e| SearchError::InvalidVertical(e.to_string()))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "suggestion_tests.rs"]
mod suggestion_tests;
