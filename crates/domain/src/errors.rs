//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Caller input failed validation; the message is shown to clients verbatim
    #[error("{0}")]
    Validation(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_message_is_verbatim() {
        let err = DomainError::validation("City name is required");
        assert_eq!(err.to_string(), "City name is required");
    }

    #[test]
    fn validation_errors_compare_by_message() {
        assert_eq!(
            DomainError::validation("a"),
            DomainError::Validation("a".to_string())
        );
        assert_ne!(DomainError::validation("a"), DomainError::validation("b"));
    }
}
