use serde::{Deserialize, Serialize};

/// Password visibility toggles. Presentation state only; has no effect on validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiToggleState {
    pub password_visible: bool,
    pub confirm_password_visible: bool,
}

impl UiToggleState {
    pub fn toggle_password(&mut self) {
        self.password_visible = !self.password_visible;
    }

    pub fn toggle_confirm_password(&mut self) {
        self.confirm_password_visible = !self.confirm_password_visible;
    }

    /// Render a value as typed or masked
    pub fn display(value: &str, visible: bool) -> String {
        if visible {
            value.to_string()
        } else {
            "*".repeat(value.chars().count())
        }
    }
}

/// Country descriptor supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub name: String,
}

impl Country {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string() }
    }
}

/// Ordered country selection options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryOptions {
    countries: Vec<Country>,
}

impl CountryOptions {
    pub fn new(countries: Vec<Country>) -> Self {
        Self { countries }
    }

    /// An empty list is allowed; the selector is just unusable
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.countries.iter().map(|c| c.name.as_str())
    }

    /// Option at a 1-based menu position
    pub fn select(&self, position: usize) -> Option<&Country> {
        position.checked_sub(1).and_then(|i| self.countries.get(i))
    }
}

impl From<Vec<Country>> for CountryOptions {
    fn from(countries: Vec<Country>) -> Self {
        Self::new(countries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggles_are_independent() {
        let mut state = UiToggleState::default();
        state.toggle_password();
        assert!(state.password_visible);
        assert!(!state.confirm_password_visible);
        state.toggle_confirm_password();
        state.toggle_password();
        assert!(!state.password_visible);
        assert!(state.confirm_password_visible);
    }

    #[test]
    fn test_display_masks_by_character() {
        assert_eq!(UiToggleState::display("pässword", false), "********");
        assert_eq!(UiToggleState::display("pässword", true), "pässword");
    }

    #[test]
    fn test_select_is_one_based() {
        let options = CountryOptions::from(vec![Country::new("Ghana"), Country::new("Kenya")]);
        assert_eq!(options.select(1).map(|c| c.name.as_str()), Some("Ghana"));
        assert_eq!(options.select(2).map(|c| c.name.as_str()), Some("Kenya"));
        assert!(options.select(0).is_none());
        assert!(options.select(3).is_none());
    }

    #[test]
    fn test_empty_list_is_not_an_error() {
        let options = CountryOptions::default();
        assert!(options.is_empty());
        assert!(options.select(1).is_none());
    }
}
