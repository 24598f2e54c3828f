use std::collections::{HashMap, HashSet};
use std::fmt;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use crate::form::fields::*;
use crate::form::value::{FieldError, FormValue, ValidationResult};
use crate::form::{EMAIL_REGEX, MIN_PASSWORD_LENGTH};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(EMAIL_REGEX).expect("email pattern is a valid regex");
}

/// Email address shape: no leading dot, no doubled dots, a dotted domain
/// ending in a TLD of two or more letters
pub fn is_valid_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_RE.is_match(value)
}

/// Input kind of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    Password,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Password => "password",
        }
    }
}

/// Why a field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureReason {
    Required,
    InvalidFormat,
    TooShort(usize),
    PasswordMismatch,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Required => write!(f, "This field is required"),
            FailureReason::InvalidFormat => write!(f, "Invalid format"),
            FailureReason::TooShort(len) => write!(f, "Must be at least {} characters", len),
            FailureReason::PasswordMismatch => write!(f, "Passwords do not match"),
        }
    }
}

/// Schema construction and field access errors
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Duplicate form field: {0}")]
    DuplicateField(String),
}

/// Declarative constraints for one form field
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    messages: HashMap<FailureReason, String>,
}

impl FieldSpec {
    pub fn new(name: &str, label: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind,
            required: false,
            min_length: None,
            messages: HashMap::new(),
        }
    }

    pub fn required(mut self, message: &str) -> Self {
        self.required = true;
        self.messages.insert(FailureReason::Required, message.to_string());
        self
    }

    pub fn min_length(mut self, len: usize, message: &str) -> Self {
        self.min_length = Some(len);
        self.messages.insert(FailureReason::TooShort(len), message.to_string());
        self
    }

    /// Override the user-facing message for a failure reason
    pub fn message(mut self, reason: FailureReason, message: &str) -> Self {
        self.messages.insert(reason, message.to_string());
        self
    }

    /// User-facing message for a failure reason, falling back to the generic text
    pub fn message_for(&self, reason: FailureReason) -> String {
        self.messages
            .get(&reason)
            .cloned()
            .unwrap_or_else(|| reason.to_string())
    }

    /// Check a single value against this field's own constraints.
    /// The first failing rule wins: required, then format, then length.
    pub fn check(&self, value: &str) -> Option<FieldError> {
        let reason = if self.required && value.is_empty() {
            Some(FailureReason::Required)
        } else if self.kind == FieldKind::Email && !is_valid_email(value) {
            Some(FailureReason::InvalidFormat)
        } else {
            self.min_length
                .filter(|min| value.chars().count() < *min)
                .map(FailureReason::TooShort)
        };

        reason.map(|reason| FieldError::new(reason, self.message_for(reason)))
    }
}

/// Cross-field rule: `confirm` must equal `field`
#[derive(Debug, Clone)]
struct MatchRule {
    field: String,
    confirm: String,
    message: String,
}

/// Field table plus the password confirmation refinement
#[derive(Debug, Clone)]
pub struct ValidationSchema {
    fields: Vec<FieldSpec>,
    match_rule: Option<MatchRule>,
}

impl ValidationSchema {
    /// Build a schema from field specs. Field names must be unique.
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, FormError> {
        let mut seen = HashSet::new();
        for spec in &fields {
            if !seen.insert(spec.name.as_str()) {
                return Err(FormError::DuplicateField(spec.name.clone()));
            }
        }

        Ok(Self { fields, match_rule: None })
    }

    /// Attach the rule that `confirm` must equal `field`. Errors land on `confirm`.
    pub fn refine_match(self, field: &str, confirm: &str, message: &str) -> Result<Self, FormError> {
        for name in [field, confirm] {
            if !self.contains(name) {
                return Err(FormError::UnknownField(name.to_string()));
            }
        }

        Ok(self.with_rule(field, confirm, message))
    }

    /// The registration form schema with the default password minimum
    pub fn registration() -> Self {
        Self::with_min_password_length(MIN_PASSWORD_LENGTH)
    }

    /// The registration form schema with a configured password minimum
    pub fn with_min_password_length(min: usize) -> Self {
        let fields = vec![
            FieldSpec::new(FIRSTNAME, "First name", FieldKind::Text)
                .required("First name is required"),
            FieldSpec::new(LASTNAME, "Last name", FieldKind::Text)
                .required("Last name is required"),
            FieldSpec::new(EMAIL, "Email", FieldKind::Email)
                .required("Email is required")
                .message(FailureReason::InvalidFormat, "Invalid email"),
            FieldSpec::new(ORGANIZATION_NAME, "Organization name", FieldKind::Text)
                .required("Organization name is required"),
            FieldSpec::new(COUNTRY, "Country", FieldKind::Text)
                .required("Country is required"),
            FieldSpec::new(POSTAL_CODE, "Postal code", FieldKind::Text)
                .required("Postal code is required"),
            FieldSpec::new(PASSWORD, "Password", FieldKind::Password)
                .min_length(min, &format!("Password must be at least {} characters", min)),
            FieldSpec::new(CONFIRM_PASSWORD, "Confirm password", FieldKind::Password)
                .min_length(min, &format!("Confirm password must be at least {} characters", min)),
        ];

        Self { fields, match_rule: None }.with_rule(PASSWORD, CONFIRM_PASSWORD, "Passwords do not match")
    }

    fn with_rule(mut self, field: &str, confirm: &str, message: &str) -> Self {
        self.match_rule = Some(MatchRule {
            field: field.to_string(),
            confirm: confirm.to_string(),
            message: message.to_string(),
        });
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|spec| spec.name.as_str())
    }

    /// Validate a complete value set. Every field gets an entry in the result.
    ///
    /// Each field is checked on its own value. The match refinement runs
    /// afterwards regardless of those outcomes and replaces whatever error the
    /// confirmation field already carries.
    pub fn validate(&self, value: &FormValue) -> ValidationResult {
        let mut result = ValidationResult::default();

        for spec in &self.fields {
            result.insert(&spec.name, spec.check(value.get(&spec.name)));
        }

        if let Some(rule) = &self.match_rule {
            if value.get(&rule.field) != value.get(&rule.confirm) {
                result.insert(
                    &rule.confirm,
                    Some(FieldError::new(FailureReason::PasswordMismatch, rule.message.clone())),
                );
            }
        }

        debug!("Validated {} fields, {} errors", self.fields.len(), result.error_count());
        result
    }
}

impl Default for ValidationSchema {
    fn default() -> Self {
        Self::registration()
    }
}
