use registration_form::form::fields::*;
use registration_form::form::{
    derive_strength, FailureReason, FormController, FormError, FormValue, SubmitHandler,
    SubmitOutcome, ValidationSchema,
};
use rstest::{fixture, rstest};
use std::cell::RefCell;
use std::rc::Rc;
use test_case::test_case;

fn valid_value() -> FormValue {
    FormValue::empty(&ValidationSchema::registration())
        .with(FIRSTNAME, "Ada")
        .with(LASTNAME, "Lovelace")
        .with(EMAIL, "ada@example.com")
        .with(ORGANIZATION_NAME, "Analytical Engines")
        .with(COUNTRY, "United Kingdom")
        .with(POSTAL_CODE, "SW1A 1AA")
        .with(PASSWORD, "Abc12345!")
        .with(CONFIRM_PASSWORD, "Abc12345!")
}

type Received = Rc<RefCell<Vec<FormValue>>>;

/// Records every snapshot handed to it
struct Recorder(Received);

impl SubmitHandler for Recorder {
    fn on_submit(&mut self, snapshot: FormValue) {
        self.0.borrow_mut().push(snapshot);
    }
}

#[fixture]
fn form() -> (FormController<Recorder>, Received) {
    let received: Received = Rc::new(RefCell::new(Vec::new()));
    let form = FormController::new(ValidationSchema::registration(), Recorder(Rc::clone(&received)));
    (form, received)
}

fn fill<H: SubmitHandler>(form: &mut FormController<H>, value: &FormValue) {
    for (name, v) in value.iter() {
        form.set_field(name, v);
    }
}

#[test]
fn test_validate_is_deterministic() {
    let schema = ValidationSchema::registration();
    for value in [
        valid_value(),
        FormValue::empty(&schema),
        valid_value().with(EMAIL, "nope").with(CONFIRM_PASSWORD, "other"),
    ] {
        assert_eq!(schema.validate(&value), schema.validate(&value));
    }
}

#[test]
fn test_matching_passwords_produce_no_errors() {
    let result = ValidationSchema::registration().validate(&valid_value());
    assert!(result.error(PASSWORD).is_none());
    assert!(result.error(CONFIRM_PASSWORD).is_none());
    assert_eq!(result.error_count(), 0);
}

#[test_case("Abcdefgh", "Abcdefgi" ; "same length differing last char")]
#[test_case("Abcdefgh", "Abcdefghij" ; "confirmation longer")]
#[test_case("Abcdefgh", "abcdefgh" ; "case differs")]
fn test_differing_passwords_flag_confirmation(password: &str, confirm: &str) {
    let value = valid_value().with(PASSWORD, password).with(CONFIRM_PASSWORD, confirm);
    let result = ValidationSchema::registration().validate(&value);
    assert_eq!(result.message(CONFIRM_PASSWORD), Some("Passwords do not match"));
    assert!(result.error(PASSWORD).is_none());
}

#[test]
fn test_strength_boundaries() {
    let flags = derive_strength("Password1");
    assert!(flags.has_min_length && flags.has_uppercase && flags.has_number);
    assert!(!flags.has_symbol);

    let flags = derive_strength("pass");
    assert!(!flags.has_min_length && !flags.has_uppercase && !flags.has_number && !flags.has_symbol);
}

#[rstest]
fn test_valid_submission_invokes_handler_once_and_clears(form: (FormController<Recorder>, Received)) {
    let (mut form, received) = form;
    let submitted = valid_value();
    fill(&mut form, &submitted);

    assert_eq!(form.submit(), SubmitOutcome::Accepted);
    assert_eq!(*received.borrow(), vec![submitted]);
    assert!(form.values().is_blank());
    assert!(form.errors().is_valid());
}

#[rstest]
fn test_weak_but_long_password_is_accepted(form: (FormController<Recorder>, Received)) {
    let (mut form, received) = form;
    fill(&mut form, &valid_value().with(PASSWORD, "abcdefgh").with(CONFIRM_PASSWORD, "abcdefgh"));

    let flags = form.strength_flags();
    assert!(!flags.has_uppercase && !flags.has_number && !flags.has_symbol);
    assert_eq!(form.submit(), SubmitOutcome::Accepted);
    assert_eq!(received.borrow().len(), 1);
}

#[rstest]
fn test_missing_firstname_rejects_and_preserves_input(form: (FormController<Recorder>, Received)) {
    let (mut form, received) = form;
    let entered = valid_value().with(FIRSTNAME, "");
    fill(&mut form, &entered);

    assert_eq!(form.submit(), SubmitOutcome::Rejected { error_count: 1 });
    assert_eq!(form.errors().error(FIRSTNAME).map(|e| e.reason), Some(FailureReason::Required));
    assert_eq!(form.errors().error_count(), 1);
    assert!(received.borrow().is_empty());
    assert_eq!(form.values(), &entered);
}

#[rstest]
fn test_corrected_resubmission_is_accepted(form: (FormController<Recorder>, Received)) {
    let (mut form, received) = form;
    fill(&mut form, &valid_value().with(EMAIL, "not-an-email"));
    assert!(matches!(form.submit(), SubmitOutcome::Rejected { .. }));
    assert_eq!(form.error(EMAIL), Some("Invalid email"));

    form.set_field(EMAIL, "user@example.com");
    assert_eq!(form.submit(), SubmitOutcome::Accepted);
    assert_eq!(received.borrow()[0].get(EMAIL), "user@example.com");
}

#[test_case("not-an-email", false)]
#[test_case("user@example.com", true)]
#[test_case("user@localhost", false ; "domain without dot")]
#[test_case(".user@example.com", false ; "leading dot")]
#[test_case("a..b@example.com", false ; "doubled dot")]
#[test_case("user.@example.com", false ; "trailing dot in local part")]
#[test_case("user@example.c", false ; "one letter tld")]
fn test_email_shape(email: &str, valid: bool) {
    let result = ValidationSchema::registration().validate(&valid_value().with(EMAIL, email));
    assert_eq!(result.error(EMAIL).is_none(), valid);
}

#[test]
fn test_unknown_field_is_a_contract_error() {
    let mut form = FormController::registration();
    assert_eq!(
        form.try_set_field("middle_name", "Q"),
        Err(FormError::UnknownField("middle_name".to_string()))
    );
    assert!(form.values().is_blank());
}

#[test]
#[should_panic(expected = "Unknown form field")]
fn test_set_field_with_unknown_name_panics() {
    FormController::registration().set_field("middle_name", "Q");
}
