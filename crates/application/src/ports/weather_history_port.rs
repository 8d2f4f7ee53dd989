//! Weather history storage port
//!
//! Defines the interface for the append-only log of weather observations.

use async_trait::async_trait;
use domain::WeatherRecord;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Number of records returned by history queries when the caller gives no limit
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Port for weather record persistence
///
/// The store is the sole writer of `WeatherRecord::id`. Records are never
/// updated; they are only inserted and bulk-deleted by city.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherHistoryPort: Send + Sync {
    /// Persist a record
    ///
    /// # Returns
    /// The same record with `id` populated
    async fn insert(&self, record: &WeatherRecord) -> Result<WeatherRecord, ApplicationError>;

    /// Find records for a city
    ///
    /// # Arguments
    /// * `city` - Matched exactly (case-sensitive, no normalization)
    /// * `limit` - Maximum number of records to return
    ///
    /// # Returns
    /// Records ordered by `timestamp`, most recent first. Empty when nothing
    /// matches.
    async fn find_by_city(
        &self,
        city: &str,
        limit: usize,
    ) -> Result<Vec<WeatherRecord>, ApplicationError>;

    /// Delete every record for a city
    ///
    /// # Returns
    /// The number of records removed
    async fn delete_by_city(&self, city: &str) -> Result<u64, ApplicationError>;

    /// Check that the underlying storage answers queries
    async fn ping(&self) -> Result<(), ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_object_safe(_: &dyn WeatherHistoryPort) {}

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WeatherHistoryPort>();
    }

    #[test]
    fn default_limit_is_ten() {
        assert_eq!(DEFAULT_HISTORY_LIMIT, 10);
    }
}
