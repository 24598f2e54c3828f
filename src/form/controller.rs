use log::{debug, info, trace};

use crate::form::fields::PASSWORD;
use crate::form::schema::{FormError, ValidationSchema};
use crate::form::strength::{derive_strength_with_min, PasswordStrengthFlags};
use crate::form::value::{FormValue, ValidationResult};
use crate::form::MIN_PASSWORD_LENGTH;

/// Receives the validated snapshot after a successful submission.
///
/// The controller does not wait on or inspect what the handler does; its own
/// state is reset as soon as the handler returns.
#[cfg_attr(test, mockall::automock)]
pub trait SubmitHandler {
    fn on_submit(&mut self, snapshot: FormValue);
}

impl<F> SubmitHandler for F
where
    F: FnMut(FormValue),
{
    fn on_submit(&mut self, snapshot: FormValue) {
        self(snapshot)
    }
}

/// Placeholder handler: logs the accepted snapshot and does nothing else
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSubmitHandler;

impl SubmitHandler for LogSubmitHandler {
    fn on_submit(&mut self, snapshot: FormValue) {
        let fields: Vec<&str> = snapshot.iter().map(|(name, _)| name).collect();
        info!("Registration submitted with fields: {}", fields.join(", "));
        debug!("Submitted values: {:?}", snapshot.redacted());
    }
}

/// Where the form is within a submission attempt. `submit` runs every
/// transition synchronously, so outside of it the form is always `Editing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormPhase {
    Editing,
    Validating,
    Accepted,
    Rejected,
}

/// Result of a `submit` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Handler was invoked and the form was cleared
    Accepted,
    /// Errors were stored and the values kept for correction
    Rejected { error_count: usize },
}

/// Owns the field values and the displayed errors of one form instance
pub struct FormController<H: SubmitHandler> {
    schema: ValidationSchema,
    values: FormValue,
    errors: ValidationResult,
    phase: FormPhase,
    handler: H,
}

impl FormController<LogSubmitHandler> {
    /// Registration form with the logging placeholder handler
    pub fn registration() -> Self {
        Self::new(ValidationSchema::registration(), LogSubmitHandler)
    }
}

impl<H: SubmitHandler> FormController<H> {
    pub fn new(schema: ValidationSchema, handler: H) -> Self {
        let values = FormValue::empty(&schema);
        Self {
            schema,
            values,
            errors: ValidationResult::default(),
            phase: FormPhase::Editing,
            handler,
        }
    }

    pub fn schema(&self) -> &ValidationSchema {
        &self.schema
    }

    pub fn values(&self) -> &FormValue {
        &self.values
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name)
    }

    /// Errors from the last rejected submission; empty otherwise
    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.message(name)
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Update one field from user input.
    ///
    /// # Panics
    ///
    /// Panics when `name` is not a schema field. That is a caller bug, not
    /// bad user input; use [`FormController::try_set_field`] for names that
    /// come from outside the program.
    pub fn set_field(&mut self, name: &str, value: &str) {
        if let Err(e) = self.try_set_field(name, value) {
            panic!("{}", e);
        }
    }

    /// Update one field, rejecting names the schema does not know.
    /// No validation runs here; errors are only recomputed on submit.
    pub fn try_set_field(&mut self, name: &str, value: &str) -> Result<(), FormError> {
        if !self.schema.contains(name) {
            return Err(FormError::UnknownField(name.to_string()));
        }

        self.values.set(name, value);

        if name == PASSWORD {
            let flags = self.strength_flags();
            trace!("Password strength: {}/4 requirements met", flags.met_count());
        }

        Ok(())
    }

    /// Strength flags of the current password, derived fresh on every call
    pub fn strength_flags(&self) -> PasswordStrengthFlags {
        derive_strength_with_min(self.values.get(PASSWORD), self.min_password_length())
    }

    /// Minimum length the schema enforces on the password field
    pub fn min_password_length(&self) -> usize {
        self.schema
            .field(PASSWORD)
            .and_then(|spec| spec.min_length)
            .unwrap_or(MIN_PASSWORD_LENGTH)
    }

    /// Validate the current values.
    ///
    /// On success the handler receives a snapshot exactly once, then values and
    /// errors are cleared. On failure the errors replace any previous ones and
    /// the values are left untouched.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.transition(FormPhase::Validating);
        let result = self.schema.validate(&self.values);

        if result.is_valid() {
            self.transition(FormPhase::Accepted);
            let snapshot = self.values.clone();
            self.handler.on_submit(snapshot);
            self.reset();
            SubmitOutcome::Accepted
        } else {
            let error_count = result.error_count();
            self.errors = result;
            self.transition(FormPhase::Rejected);
            self.transition(FormPhase::Editing);
            SubmitOutcome::Rejected { error_count }
        }
    }

    /// Clear all values and errors back to the mount state
    pub fn reset(&mut self) {
        self.values = FormValue::empty(&self.schema);
        self.errors = ValidationResult::default();
        self.transition(FormPhase::Editing);
    }

    fn transition(&mut self, next: FormPhase) {
        debug!("Form phase {:?} -> {:?}", self.phase, next);
        self.phase = next;
    }
}
