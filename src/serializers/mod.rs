//! Validation and shape translation between wire JSON and the models.
//!
//! Request bodies are taken as a raw JSON object so that a missing key, an
//! explicit `null` and a wrong type can each be reported per field.

pub mod meeting;
pub mod user;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_BLANK: &str = "This field may not be blank.";
pub const NOT_STRING: &str = "Not a valid string.";

/// Field name → list of messages, serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0.entry(field.to_string()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(value)` when no errors were collected.
    pub fn finish<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, msgs)| format!("{field}: {}", msgs.join(" ")))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Read a text field. Numbers are accepted in their string form.
///
/// Returns `Ok(None)` when the key is absent and `required` is false.
pub(crate) fn read_string(
    data: &Map<String, Value>,
    field: &str,
    required: bool,
) -> Result<Option<String>, String> {
    match data.get(field) {
        None if required => Err(REQUIRED.to_string()),
        None => Ok(None),
        Some(Value::Null) => Err(NOT_NULL.to_string()),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(_) => Err(NOT_STRING.to_string()),
    }
}

/// Trimmed, non-blank, bounded text.
pub(crate) fn check_text(value: &str, max_len: usize) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NOT_BLANK.to_string());
    }
    if trimmed.chars().count() > max_len {
        return Err(format!("Ensure this field has no more than {max_len} characters."));
    }
    Ok(trimmed.to_string())
}
