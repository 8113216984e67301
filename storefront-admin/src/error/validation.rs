//! Validation error types

use crate::validation::FieldError;

/// A draft failed one or more field rules.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", summary(.errors))]
pub struct ValidationError {
    /// Failing fields, first error per field.
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    /// Creates a validation error from field errors.
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// The first failing field.
    pub fn first(&self) -> Option<&FieldError> {
        self.errors.first()
    }
}

fn summary(errors: &[FieldError]) -> String {
    match errors {
        [] => "validation failed".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (and {} more)", first, rest.len()),
    }
}
