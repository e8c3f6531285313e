//! Store error taxonomy and machine-readable error codes.
//!
//! DESIGN
//! ======
//! Every failure a store operation can produce is one of four kinds:
//! a caller supplied bad input (`Validation`), the referenced ticket does
//! not exist (`NotFound`), the durable write failed (`Storage`), or the id
//! sequence has no number left above the highest id issued
//! (`IdsExhausted`). Route handlers translate these into HTTP statuses and
//! `{code, message}` bodies.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::storage::StorageError;

/// Stable machine-readable code for an error, surfaced to API clients.
pub trait ErrorCode: fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// FIELD ERRORS
// =============================================================================

/// Per-field validation messages, keyed by the form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    #[cfg(test)]
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `Ok(())` when no field failed, otherwise the collected errors.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field message was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

// =============================================================================
// STORE ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(FieldErrors),
    #[error("ticket not found: {0}")]
    NotFound(String),
    #[error("ticket ids exhausted after {last}")]
    IdsExhausted { last: String },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<FieldErrors> for StoreError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl ErrorCode for StoreError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "E_VALIDATION",
            Self::NotFound(_) => "E_TICKET_NOT_FOUND",
            Self::IdsExhausted { .. } => "E_TICKET_IDS_EXHAUSTED",
            Self::Storage(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::Storage(e) => e.retryable(),
            _ => false,
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
