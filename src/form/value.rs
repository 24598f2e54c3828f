use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::form::fields::{CONFIRM_PASSWORD, PASSWORD};
use crate::form::schema::{FailureReason, ValidationSchema};
use crate::form::REDACTED;

/// Current string value of every form field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValue {
    values: BTreeMap<String, String>,
}

impl FormValue {
    /// Every schema field set to the empty string
    pub fn empty(schema: &ValidationSchema) -> Self {
        Self {
            values: schema
                .field_names()
                .map(|name| (name.to_string(), String::new()))
                .collect(),
        }
    }

    /// Value of a field, empty when unset
    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    /// Builder form of `set`
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    pub fn is_blank(&self) -> bool {
        self.values.values().all(String::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy with the password fields masked, for logging and display
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        for name in [PASSWORD, CONFIRM_PASSWORD] {
            if let Some(v) = copy.values.get_mut(name) {
                if !v.is_empty() {
                    *v = REDACTED.to_string();
                }
            }
        }
        copy
    }
}

/// A single field's validation failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub reason: FailureReason,
    pub message: String,
}

impl FieldError {
    pub fn new(reason: FailureReason, message: String) -> Self {
        Self { reason, message }
    }
}

/// Outcome of one validation pass: one entry per field, `None` when valid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    entries: BTreeMap<String, Option<FieldError>>,
}

impl ValidationResult {
    pub(crate) fn insert(&mut self, name: &str, error: Option<FieldError>) {
        self.entries.insert(name.to_string(), error);
    }

    pub fn error(&self, name: &str) -> Option<&FieldError> {
        self.entries.get(name).and_then(Option::as_ref)
    }

    pub fn message(&self, name: &str) -> Option<&str> {
        self.error(name).map(|e| e.message.as_str())
    }

    /// Whether the pass produced an entry for this field
    pub fn covers(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Fields carrying an error, in name order
    pub fn errors(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.entries
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|e| (k.as_str(), e)))
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    /// Whether the confirmation refinement fired
    pub fn has_mismatch(&self) -> bool {
        self.errors().any(|(_, e)| e.reason == FailureReason::PasswordMismatch)
    }
}
