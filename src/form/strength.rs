use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::form::MIN_PASSWORD_LENGTH;

lazy_static! {
    static ref UPPERCASE_RE: Regex = Regex::new(r"[A-Z]").expect("valid regex");
    static ref NUMBER_RE: Regex = Regex::new(r"[0-9]").expect("valid regex");
    static ref SYMBOL_RE: Regex = Regex::new(r"[^a-zA-Z0-9]").expect("valid regex");
}

/// Items of the password strength checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthRequirement {
    MinimumLength(usize),
    ContainsUppercase,
    ContainsNumber,
    ContainsSymbol,
}

impl fmt::Display for StrengthRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrengthRequirement::MinimumLength(len) => write!(f, "At least {} characters", len),
            StrengthRequirement::ContainsUppercase => write!(f, "At least one uppercase letter"),
            StrengthRequirement::ContainsNumber => write!(f, "At least one number"),
            StrengthRequirement::ContainsSymbol => write!(f, "At least one symbol"),
        }
    }
}

/// Advisory composition flags for a password. These never gate submission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordStrengthFlags {
    pub has_min_length: bool,
    pub has_uppercase: bool,
    pub has_number: bool,
    pub has_symbol: bool,
}

impl PasswordStrengthFlags {
    /// Checklist rows in display order, paired with whether each is met
    pub fn checklist(&self, min_length: usize) -> [(StrengthRequirement, bool); 4] {
        [
            (StrengthRequirement::MinimumLength(min_length), self.has_min_length),
            (StrengthRequirement::ContainsUppercase, self.has_uppercase),
            (StrengthRequirement::ContainsNumber, self.has_number),
            (StrengthRequirement::ContainsSymbol, self.has_symbol),
        ]
    }

    pub fn met_count(&self) -> usize {
        [self.has_min_length, self.has_uppercase, self.has_number, self.has_symbol]
            .iter()
            .filter(|met| **met)
            .count()
    }
}

/// Derive the strength flags with the default minimum length
pub fn derive_strength(password: &str) -> PasswordStrengthFlags {
    derive_strength_with_min(password, MIN_PASSWORD_LENGTH)
}

/// Derive the strength flags against a configured minimum length
pub fn derive_strength_with_min(password: &str, min_length: usize) -> PasswordStrengthFlags {
    PasswordStrengthFlags {
        has_min_length: password.chars().count() >= min_length,
        has_uppercase: UPPERCASE_RE.is_match(password),
        has_number: NUMBER_RE.is_match(password),
        has_symbol: SYMBOL_RE.is_match(password),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_password1_has_everything_but_symbol() {
        let flags = derive_strength("Password1");
        assert!(flags.has_min_length);
        assert!(flags.has_uppercase);
        assert!(flags.has_number);
        assert!(!flags.has_symbol);
    }

    #[test]
    fn test_short_lowercase_has_nothing() {
        assert_eq!(derive_strength("pass"), PasswordStrengthFlags::default());
        assert_eq!(derive_strength(""), PasswordStrengthFlags::default());
    }

    #[rstest]
    #[case("abcdefg", false)]
    #[case("abcdefgh", true)]
    fn test_min_length_boundary(#[case] password: &str, #[case] expected: bool) {
        assert_eq!(derive_strength(password).has_min_length, expected);
    }

    #[rstest]
    #[case("a", false, false, false)]
    #[case("A", true, false, false)]
    #[case("7", false, true, false)]
    #[case("!", false, false, true)]
    #[case(" ", false, false, true)]
    #[case("é", false, false, true)]
    fn test_flags_toggle_independently(
        #[case] password: &str,
        #[case] upper: bool,
        #[case] number: bool,
        #[case] symbol: bool,
    ) {
        let flags = derive_strength(password);
        assert_eq!(flags.has_uppercase, upper);
        assert_eq!(flags.has_number, number);
        assert_eq!(flags.has_symbol, symbol);
    }

    #[test]
    fn test_configured_minimum() {
        assert!(!derive_strength_with_min("Abc12345!", 12).has_min_length);
        assert!(derive_strength_with_min("Abc12345!xyz", 12).has_min_length);
    }

    #[test]
    fn test_checklist_order_and_count() {
        let flags = derive_strength("Abc12345!");
        let rows = flags.checklist(8);
        assert_eq!(rows[0].0, StrengthRequirement::MinimumLength(8));
        assert!(rows.iter().all(|(_, met)| *met));
        assert_eq!(flags.met_count(), 4);
        assert_eq!(rows[0].0.to_string(), "At least 8 characters");
    }
}
