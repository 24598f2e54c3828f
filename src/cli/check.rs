use anyhow::{anyhow, Context, Result};
use log::{debug, error};
use std::collections::BTreeMap;

use registration_form::form::{
    derive_strength_with_min, FormController, FormValue, SubmitOutcome, ValidationSchema,
};

use crate::cli::utils::{print_error, print_header, print_strength, print_success};

/// Validate a JSON object of field values read from a file
pub fn validate_file(schema: ValidationSchema, path: &str) -> Result<()> {
    let contents = std::fs::read_to_string(path).context(format!("Failed to read {}", path))?;
    let input: BTreeMap<String, String> =
        serde_json::from_str(&contents).context("Expected a JSON object of field name to string")?;

    let mut accepted: Option<FormValue> = None;
    let mut form = FormController::new(schema, |snapshot: FormValue| accepted = Some(snapshot));

    for (name, value) in &input {
        form.try_set_field(name, value)?;
    }

    match form.submit() {
        SubmitOutcome::Accepted => {
            drop(form);
            debug!("Validated values: {:?}", accepted.map(|v| v.redacted()));
            print_success(&format!("{} is valid", path));
            Ok(())
        }
        SubmitOutcome::Rejected { error_count } => {
            print_header(&format!("{} error(s) in {}", error_count, path));
            for (name, field_error) in form.errors().errors() {
                print_error(&format!("{}: {}", name, field_error.message));
            }
            error!("Validation failed for {}", path);
            Err(anyhow!("{} field(s) failed validation", error_count))
        }
    }
}

/// Print the strength checklist for a password
pub fn show_strength(password: &str, min_length: usize) {
    let flags = derive_strength_with_min(password, min_length);
    print_header(&format!("Password strength ({}/4)", flags.met_count()));
    print_strength(&flags, min_length);
}

/// Print the field table of a schema
pub fn list_fields(schema: &ValidationSchema) {
    print_header("Registration fields");
    println!("  {:<18} {:<9} {:<9} {}", "NAME", "KIND", "REQUIRED", "MIN LENGTH");
    for spec in schema.fields() {
        let min = spec.min_length.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<18} {:<9} {:<9} {}",
            spec.name,
            spec.kind.as_str(),
            if spec.required { "yes" } else { "no" },
            min
        );
    }
}
