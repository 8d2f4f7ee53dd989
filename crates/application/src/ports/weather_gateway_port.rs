//! Weather gateway port
//!
//! Defines the interface for fetching current conditions from the upstream
//! weather provider.

use async_trait::async_trait;
use domain::{CityName, WeatherRecord};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the external weather provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherGatewayPort: Send + Sync {
    /// Fetch current conditions for a city
    ///
    /// Issues exactly one upstream request and never retries. The returned
    /// record is unpersisted (`id` is `None`) and stamped with the call time.
    ///
    /// # Errors
    /// * `Configuration` - no usable provider credential is configured
    /// * `CityNotFound` - the provider does not know the city
    /// * `InvalidCredentials` - the provider rejected the credential
    /// * `RateLimited` / `Upstream` - other non-success provider responses
    /// * `Unreachable` - no response was received
    /// * `Request` - the request could not be built or sent
    async fn fetch(&self, city: &CityName) -> Result<WeatherRecord, ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn WeatherGatewayPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WeatherGatewayPort>();
    }
}
