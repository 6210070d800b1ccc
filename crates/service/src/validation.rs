//! Validation collaborator consumed by the service.

use models::validation::{FieldError, Validatable};

/// Inspect a submitted model. An empty list means valid.
#[cfg_attr(test, mockall::automock)]
pub trait ValidateService<M: Send + Sync>: Send + Sync {
    fn validate(&self, model: &M) -> Vec<FieldError>;
}

/// Applies the rules each model declares through [`Validatable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultValidateService;

impl<M: Validatable + Send + Sync> ValidateService<M> for DefaultValidateService {
    fn validate(&self, model: &M) -> Vec<FieldError> {
        model.validation_errors()
    }
}
