use anyhow::{anyhow, Result};
use log::{debug, info};

use registration_form::form::{
    fields::{CONFIRM_PASSWORD, COUNTRY, PASSWORD}, CountryOptions, FieldKind, FieldSpec, FormController, FormValue,
    SubmitHandler, SubmitOutcome, UiToggleState, ValidationSchema,
};

use crate::cli::utils::{
    print_error, print_header, print_info, print_strength, print_success, read_line, read_password,
};

/// Attempts before the interactive registration gives up
const MAX_SUBMIT_ATTEMPTS: u32 = 3;

/// Prints the accepted registration as JSON with passwords masked
struct PrintSubmitHandler;

impl SubmitHandler for PrintSubmitHandler {
    fn on_submit(&mut self, snapshot: FormValue) {
        info!("Registration accepted");
        match serde_json::to_string_pretty(&snapshot.redacted()) {
            Ok(json) => println!("{}", json),
            Err(e) => print_error(&format!("Failed to render registration: {}", e)),
        }
    }
}

/// Run the interactive registration form
pub fn register(schema: ValidationSchema, countries: &CountryOptions, show_passwords: bool) -> Result<()> {
    print_header("Create your account");

    if countries.is_empty() {
        print_info("No countries configured; the country field cannot be filled in");
    }

    let mut toggles = UiToggleState::default();
    if show_passwords {
        toggles.toggle_password();
        toggles.toggle_confirm_password();
    }

    let mut form = FormController::new(schema, PrintSubmitHandler);
    let mut pending: Vec<FieldSpec> = form.schema().fields().to_vec();

    for attempt in 1..=MAX_SUBMIT_ATTEMPTS {
        for spec in &pending {
            let value = prompt_field(spec, countries, form.value(&spec.name))?;
            form.set_field(&spec.name, &value);

            if spec.name == PASSWORD {
                println!("Password strength:");
                print_strength(&form.strength_flags(), form.min_password_length());
            }
        }

        print_review(form.schema(), form.values(), &toggles);

        match form.submit() {
            SubmitOutcome::Accepted => {
                print_success("Registration complete");
                return Ok(());
            }
            SubmitOutcome::Rejected { error_count } => {
                debug!("Submission attempt {} rejected with {} errors", attempt, error_count);
                print_header(&format!("Please correct {} field(s) (attempt {}/{})", error_count, attempt, MAX_SUBMIT_ATTEMPTS));
                for (name, error) in form.errors().errors() {
                    print_error(&format!("{}: {}", label_of(form.schema(), name), error.message));
                }

                pending = form
                    .schema()
                    .fields()
                    .iter()
                    .filter(|spec| form.errors().error(&spec.name).is_some())
                    .cloned()
                    .collect();
            }
        }
    }

    Err(anyhow!("Registration not completed after {} attempts", MAX_SUBMIT_ATTEMPTS))
}

fn print_review(schema: &ValidationSchema, values: &FormValue, toggles: &UiToggleState) {
    print_header("Review");
    for spec in schema.fields() {
        let value = values.get(&spec.name);
        let shown = match spec.name.as_str() {
            PASSWORD => UiToggleState::display(value, toggles.password_visible),
            CONFIRM_PASSWORD => UiToggleState::display(value, toggles.confirm_password_visible),
            _ => value.to_string(),
        };
        println!("  {:<18} {}", spec.label, shown);
    }
}

fn label_of<'a>(schema: &'a ValidationSchema, name: &'a str) -> &'a str {
    schema.field(name).map(|spec| spec.label.as_str()).unwrap_or(name)
}

/// Prompt for one field. Pressing enter on a field that already has a value keeps it.
fn prompt_field(spec: &FieldSpec, countries: &CountryOptions, current: &str) -> Result<String> {
    if spec.name == COUNTRY && !countries.is_empty() {
        return prompt_country(spec, countries, current);
    }

    let prompt = if current.is_empty() || spec.kind == FieldKind::Password {
        format!("{}: ", spec.label)
    } else {
        format!("{} [{}]: ", spec.label, current)
    };

    let input = match spec.kind {
        FieldKind::Password => read_password(&prompt)?,
        FieldKind::Text | FieldKind::Email => read_line(&prompt)?,
    };

    if input.is_empty() && spec.kind != FieldKind::Password {
        Ok(current.to_string())
    } else {
        Ok(input)
    }
}

fn prompt_country(spec: &FieldSpec, countries: &CountryOptions, current: &str) -> Result<String> {
    println!("{}:", spec.label);
    for (i, name) in countries.names().enumerate() {
        println!("  {:2}. {}", i + 1, name);
    }

    loop {
        let input = read_line(&format!("Select 1-{}: ", countries.len()))?;
        if input.trim().is_empty() {
            return Ok(current.to_string());
        }

        match input.trim().parse::<usize>().ok().and_then(|n| countries.select(n)) {
            Some(country) => return Ok(country.name.clone()),
            None => print_error("Invalid selection"),
        }
    }
}
