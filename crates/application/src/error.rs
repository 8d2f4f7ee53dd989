//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
///
/// Display strings are client-facing: the HTTP layer places them verbatim in
/// the error envelope.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error (caller input failed validation)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Operator misconfiguration, e.g. missing provider credential
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Upstream provider does not know the requested city
    #[error("City '{0}' not found. Please check the city name and try again.")]
    CityNotFound(String),

    /// Upstream provider rejected the configured credential
    #[error("Invalid API key. Please check your weather provider API key configuration.")]
    InvalidCredentials,

    /// Upstream provider is throttling requests
    #[error("Weather API error: {0}")]
    RateLimited(String),

    /// Upstream provider answered with another non-success response
    #[error("Weather API error: {0}")]
    Upstream(String),

    /// No response was received from the upstream provider
    #[error("Unable to reach weather service. Please check your network connection. ({0})")]
    Unreachable(String),

    /// The outbound request could not be built or sent
    #[error("Weather request error: {0}")]
    Request(String),

    /// History store failure
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApplicationError {
    /// Check if this error was caused by invalid caller input
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(DomainError::Validation(_)))
    }

    /// Stable, machine-readable name of the error kind
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Domain(_) => "validation",
            Self::Configuration(_) => "configuration",
            Self::CityNotFound(_) => "not_found",
            Self::InvalidCredentials => "auth",
            Self::RateLimited(_) => "rate_limited",
            Self::Upstream(_) => "upstream",
            Self::Unreachable(_) => "unreachable",
            Self::Request(_) => "request",
            Self::Storage(_) => "storage",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::validation("City name is required").into();
        assert_eq!(err.to_string(), "City name is required");
        assert!(err.is_validation());
        assert_eq!(err.kind(), "validation");
    }

    #[test]
    fn city_not_found_mentions_city() {
        let err = ApplicationError::CityNotFound("Atlantis".to_string());
        assert_eq!(
            err.to_string(),
            "City 'Atlantis' not found. Please check the city name and try again."
        );
        assert!(!err.is_validation());
    }

    #[test]
    fn invalid_credentials_message() {
        let err = ApplicationError::InvalidCredentials;
        assert!(err.to_string().starts_with("Invalid API key"));
    }

    #[test]
    fn upstream_errors_are_prefixed() {
        let err = ApplicationError::Upstream("internal error".to_string());
        assert_eq!(err.to_string(), "Weather API error: internal error");

        let err = ApplicationError::RateLimited("too many requests".to_string());
        assert_eq!(err.to_string(), "Weather API error: too many requests");
    }

    #[test]
    fn unreachable_message_prefix() {
        let err = ApplicationError::Unreachable("connection refused".to_string());
        assert!(
            err.to_string()
                .starts_with("Unable to reach weather service")
        );
    }

    #[test]
    fn storage_error_keeps_underlying_message() {
        let err = ApplicationError::Storage("disk I/O error".to_string());
        assert!(err.to_string().contains("disk I/O error"));
    }

    #[test]
    fn kinds_are_distinct() {
        let kinds = [
            ApplicationError::Configuration(String::new()).kind(),
            ApplicationError::CityNotFound(String::new()).kind(),
            ApplicationError::InvalidCredentials.kind(),
            ApplicationError::RateLimited(String::new()).kind(),
            ApplicationError::Upstream(String::new()).kind(),
            ApplicationError::Unreachable(String::new()).kind(),
            ApplicationError::Request(String::new()).kind(),
            ApplicationError::Storage(String::new()).kind(),
        ];
        let mut unique = kinds.to_vec();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), kinds.len());
    }
}
