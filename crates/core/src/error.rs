//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant describes a rejected command. Rejections never leave the
/// ledger in a partially-updated state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (empty name, non-positive amount, ...).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant would be violated (duplicate member, unknown payer).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// A referenced member does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An index-based command pointed past the end of a sequence.
    #[error("index {index} out of range (len {len})")]
    OutOfRange { index: usize, len: usize },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }

    /// Short machine-readable category, used in logs and script summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::Validation(_) | DomainError::InvariantViolation(_) => "invalid_input",
            DomainError::NotFound(_) => "not_found",
            DomainError::OutOfRange { .. } => "out_of_range",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_message_names_index_and_len() {
        let err = DomainError::out_of_range(4, 2);
        assert_eq!(err.to_string(), "index 4 out of range (len 2)");
        assert_eq!(err.kind(), "out_of_range");
    }

    #[test]
    fn validation_and_invariant_share_input_kind() {
        assert_eq!(DomainError::validation("x").kind(), "invalid_input");
        assert_eq!(DomainError::invariant("y").kind(), "invalid_input");
    }
}
