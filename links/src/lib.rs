//! Wire model for the helpful-links endpoints.
//!
//! This crate owns the JSON shapes exchanged with the campaign server when a
//! link is created or deleted. It has no browser dependencies so the UI crate
//! can test reply handling natively.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Key the server uses for form-wide (non-field) validation errors.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// Error returned by [`decode_create_reply`].
#[derive(Debug, thiserror::Error)]
pub enum WireError {
    /// The body was not valid JSON.
    #[error("failed to decode reply body: {0}")]
    Json(#[from] serde_json::Error),
    /// The body carried a `pk` but the rest of the record was unusable.
    #[error("malformed link record: {0}")]
    MalformedRecord(String),
}

/// Server-assigned link identifier.
///
/// Opaque to the client. The server sends integers today, but string ids are
/// accepted so the client never depends on the key type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LinkId(String);

impl LinkId {
    /// Build an id from an attribute value. Blank input yields `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for LinkId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Number(number) => Ok(Self(number.to_string())),
            Value::String(raw) => Self::parse(&raw).ok_or_else(|| D::Error::custom("empty link id")),
            _ => Err(D::Error::custom("expected number or string link id")),
        }
    }
}

/// A link as returned by the create endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    /// Server-assigned identifier.
    pub pk: LinkId,
    /// Display text.
    pub name: String,
    /// Target URL.
    pub url: String,
    /// Server-side delete route for this link, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_url: Option<String>,
}

/// Validation messages keyed by form field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Decoded reply of the create endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreateLinkReply {
    /// The link was stored.
    Created(LinkRecord),
    /// The form was rejected.
    Invalid(FieldErrors),
    /// The body carried neither a record nor errors.
    Unrecognized,
}

/// Decode a create-endpoint reply body.
///
/// A non-null `pk` wins over `errors`, matching how the page script checks
/// the reply.
///
/// # Errors
///
/// Returns [`WireError::Json`] for a non-JSON body and
/// [`WireError::MalformedRecord`] when a `pk` arrives without a usable record.
pub fn decode_create_reply(body: &str) -> Result<CreateLinkReply, WireError> {
    let value: Value = serde_json::from_str(body)?;
    create_reply_from_value(value)
}

/// Classify an already-parsed create-endpoint reply.
///
/// # Errors
///
/// Returns [`WireError::MalformedRecord`] when `pk` is present but the record
/// does not deserialize.
pub fn create_reply_from_value(value: Value) -> Result<CreateLinkReply, WireError> {
    let Value::Object(map) = &value else {
        return Ok(CreateLinkReply::Unrecognized);
    };

    if map.get("pk").is_some_and(|pk| !pk.is_null()) {
        let record: LinkRecord = serde_json::from_value(value)
            .map_err(|e| WireError::MalformedRecord(e.to_string()))?;
        return Ok(CreateLinkReply::Created(record));
    }

    match map.get("errors") {
        Some(Value::Object(errors)) => Ok(CreateLinkReply::Invalid(field_errors(errors))),
        _ => Ok(CreateLinkReply::Unrecognized),
    }
}

/// Collect field messages, tolerating a bare string where a list is expected.
fn field_errors(errors: &serde_json::Map<String, Value>) -> FieldErrors {
    errors
        .iter()
        .map(|(field, messages)| {
            let messages = match messages {
                Value::Array(items) => items.iter().map(message_text).collect(),
                other => vec![message_text(other)],
            };
            (field.clone(), messages)
        })
        .collect()
}

fn message_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        // Django's `errors.get_json_data()` shape.
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| value.to_string(), str::to_owned),
        other => other.to_string(),
    }
}

/// Expand a delete endpoint pattern containing `{id}`.
#[must_use]
pub fn delete_endpoint(pattern: &str, id: &LinkId) -> String {
    pattern.replace("{id}", id.as_str())
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
