//! Error types shared by form actions

use thiserror::Error;

/// Form errors
///
/// A rejected slot value is not an error; validators report it through
/// `ValidationResult::Reject` and the form keeps running.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A slot name that the form does not declare
    #[error("Unknown slot: {0}")]
    UnknownSlot(String),

    /// Nothing could be extracted for the requested slot on a user turn
    #[error("Failed to extract slot {slot} with action {form}")]
    ExecutionRejected { form: String, slot: String },
}

pub type Result<T> = std::result::Result<T, FormError>;
