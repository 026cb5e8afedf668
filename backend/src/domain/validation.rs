//! Validation errors reported back to the user.
//!
//! These are not failures of the program: they are collected, shown inline,
//! and the state they were raised against stays unchanged.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Menu name is required")]
    MenuNameRequired,
    #[error("Menu \"{0}\" already exists")]
    DuplicateMenu(String),
    #[error("Menu \"{0}\" does not exist")]
    UnknownMenu(String),
    #[error("Date is required")]
    DateRequired,
    #[error("Please select a menu")]
    MenuRequired,
    #[error("Weight must be a number greater than 0")]
    InvalidWeight,
    #[error("Reps must be a number greater than 0")]
    InvalidReps,
    #[error("Reps must be a whole number")]
    FractionalReps,
    #[error("Reps must be at most 4294967295")]
    TooManyReps,
}

/// A non-empty batch of validation failures, in the order the checks ran
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    /// `Ok(())` when nothing failed, otherwise every collected error
    pub fn check(errors: Vec<ValidationError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self(errors))
        }
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_empty_is_ok() {
        assert!(ValidationErrors::check(Vec::new()).is_ok());
    }

    #[test]
    fn test_display_joins_messages() {
        let errors = ValidationErrors::check(vec![
            ValidationError::InvalidWeight,
            ValidationError::InvalidReps,
        ])
        .unwrap_err();

        assert_eq!(errors.errors().len(), 2);
        assert_eq!(
            errors.to_string(),
            "Weight must be a number greater than 0; Reps must be a number greater than 0"
        );
    }

    #[test]
    fn test_duplicate_menu_message_names_the_menu() {
        let errors: ValidationErrors = ValidationError::DuplicateMenu("スクワット".to_string()).into();
        assert_eq!(errors.messages(), vec!["Menu \"スクワット\" already exists".to_string()]);
    }
}
