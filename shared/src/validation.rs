//! Input validation
//!
//! Declarative field constraints live on the input structs as `validator`
//! derive rules; this module flattens violations into the `fields` string of
//! the API error body.

use thiserror::Error;
use validator::Validate;

/// A validation error on a particular input field.
#[derive(Debug, Clone)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

/// The set of field errors produced by checking one input value.
#[derive(Debug, Clone, Error)]
#[error("{}", render(.0))]
pub struct FieldErrors(pub Vec<FieldError>);

fn render(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|fe| format!("{}: {}", fe.field, fe.error))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check an input value against its declared field constraints.
pub fn check<T: Validate>(value: &T) -> Result<(), FieldErrors> {
    match value.validate() {
        Ok(()) => Ok(()),
        Err(errors) => {
            let mut field_errors = Vec::new();
            for (field, violations) in errors.field_errors() {
                for violation in violations {
                    let message = violation
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| violation.code.to_string());
                    field_errors.push(FieldError {
                        field: field.to_string(),
                        error: message,
                    });
                }
            }
            Err(FieldErrors(field_errors))
        }
    }
}
