//! Error types for registry and selection operations.
//!
//! Validation outcomes (missing or malformed scheme text) are not errors; they
//! are ordinary states reported through [`SchemeIssue`](crate::SchemeIssue).
//! The variants here cover caller mistakes against the registry: duplicate
//! values, attempts to touch built-in records, and unknown ids.

use thiserror::Error;

/// Errors returned by [`SchemeRegistry`](crate::SchemeRegistry) and the
/// selection entry points of
/// [`SchemeValidationState`](crate::SchemeValidationState).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemeError {
    /// A record with a case-insensitively equal value already exists.
    #[error("duplicate scheme: {0}")]
    DuplicateScheme(String),

    /// The operation would remove, edit, or clear a built-in record.
    #[error("protected scheme record: {0}")]
    ProtectedRecord(String),

    /// No record with this id exists in the registry.
    #[error("unknown scheme id: {0}")]
    UnknownSchemeId(u64),

    /// Scheme values must contain at least one non-whitespace character.
    #[error("scheme value cannot be empty")]
    EmptyScheme,
}

/// Convenience alias for results with [`SchemeError`].
pub type Result<T> = std::result::Result<T, SchemeError>;
