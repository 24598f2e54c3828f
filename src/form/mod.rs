// Registration form module
// This module provides the declarative field schema, the form controller that
// owns the field values and errors, and the password strength checklist.

mod schema;
mod value;
mod strength;
mod controller;
mod ui;

pub use schema::{is_valid_email, FieldKind, FieldSpec, FailureReason, FormError, ValidationSchema};
pub use value::{FieldError, FormValue, ValidationResult};
pub use strength::{derive_strength, derive_strength_with_min, PasswordStrengthFlags, StrengthRequirement};
pub use controller::{
    FormController, LogSubmitHandler,
    SubmitHandler, SubmitOutcome,
};
pub use ui::{Country, CountryOptions, UiToggleState};

/// Minimum password length enforced on submit
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Placeholder shown instead of secret values in logs and printed snapshots
pub const REDACTED: &str = "********";

/// Email regex pattern for validation. Dot placement in the local part is
/// checked separately by `is_valid_email`, since `regex` has no lookahead.
pub const EMAIL_REGEX: &str = r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$";

/// Field names of the registration form
pub mod fields {
    pub const FIRSTNAME: &str = "firstname";
    pub const LASTNAME: &str = "lastname";
    pub const EMAIL: &str = "email";
    pub const ORGANIZATION_NAME: &str = "organization_name";
    pub const COUNTRY: &str = "country";
    pub const POSTAL_CODE: &str = "postal_code";
    pub const PASSWORD: &str = "password";
    pub const CONFIRM_PASSWORD: &str = "confirm_password";
}
