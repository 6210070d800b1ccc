//! Field-level validation rules owned by each entity.

use serde::{Deserialize, Serialize};

/// One failing field: the wire name of the field and a human message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }

    pub fn required(field: &str) -> Self {
        Self::new(field, format!("{field} is required"))
    }
}

/// Business rules for a submitted entity. Every failing field is reported.
pub trait Validatable {
    fn validation_errors(&self) -> Vec<FieldError>;
}

/// Push a `required` error when `value` is blank.
pub fn require(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::required(field));
    }
}
