//! Common validation utilities

use serde::Serialize;
use std::collections::HashMap;

/// Validation error with field-level details
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code: code.into(),
        }
    }
}

/// Collection of validation errors
#[derive(Debug, Default, Clone)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>, code: impl Into<String>) {
        self.add(FieldError::new(field, message, code));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First recorded error, if any
    pub fn first(&self) -> Option<&FieldError> {
        self.errors.first()
    }

    pub fn to_field_errors(&self) -> HashMap<String, Vec<String>> {
        let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();
        for error in &self.errors {
            field_errors
                .entry(error.field.clone())
                .or_default()
                .push(error.message.clone());
        }
        field_errors
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{}", joined)
    }
}

/// Trait for types that can be validated
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Common validation functions
pub mod validators {
    /// Check if a string is not empty
    pub fn not_empty(value: &str) -> bool {
        !value.trim().is_empty()
    }

    /// Check if a string length (in characters) is within bounds
    pub fn length_between(value: &str, min: usize, max: usize) -> bool {
        let len = value.chars().count();
        len >= min && len <= max
    }

    /// Check if a value is exactly `len` ASCII digits
    pub fn is_numeric_code(value: &str, len: usize) -> bool {
        value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_collects_by_field() {
        let mut errors = ValidationErrors::new();
        assert!(errors.is_empty());

        errors.add_error("email", "Email is required", "REQUIRED_FIELD");
        errors.add_error("email", "Email is invalid", "INVALID_EMAIL");
        errors.add_error("password", "Too short", "INVALID_LENGTH");

        let by_field = errors.to_field_errors();
        assert_eq!(by_field["email"].len(), 2);
        assert_eq!(by_field["password"], vec!["Too short".to_string()]);
        assert_eq!(errors.first().map(|e| e.code.as_str()), Some("REQUIRED_FIELD"));
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn test_validators() {
        assert!(validators::not_empty(" a "));
        assert!(!validators::not_empty("   "));
        assert!(validators::length_between("abcdefgh", 8, 128));
        assert!(!validators::length_between("abc", 8, 128));
        assert!(validators::is_numeric_code("012345", 6));
        assert!(!validators::is_numeric_code("01234a", 6));
        assert!(!validators::is_numeric_code("12345", 6));
    }
}
