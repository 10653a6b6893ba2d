//! Error types for task order domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing task order domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskOrderDomainError {
    /// The task order number is empty after trimming.
    #[error("task order number must not be empty")]
    EmptyTaskOrderNumber,

    /// The CLIN number is empty after trimming.
    #[error("CLIN number must not be empty")]
    EmptyClinNumber,

    /// The signer identity is empty after trimming.
    #[error("signer identity must not be empty")]
    EmptySignerId,

    /// An untyped attachment payload was neither empty, an attachment, nor
    /// attachment data.
    #[error("could not set attachment with invalid type: {0}")]
    InvalidAttachmentType(String),
}

/// Error returned while parsing task order statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task order status: {0}")]
pub struct ParseTaskOrderStatusError(pub String);

/// Error returned while parsing JEDI CLIN types from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown JEDI CLIN type: {0}")]
pub struct ParseJediClinTypeError(pub String);
