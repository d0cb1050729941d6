/// Movie metadata provider abstraction
///
/// Recommendations are bare catalog rows; a provider decorates each one with a
/// poster, genre list and rating from an external catalog API. TMDB is the only
/// provider today, but the engine only sees this trait, which keeps it testable
/// without network access.
use crate::models::EnrichmentDetails;

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for metadata providers
///
/// `fetch` is infallible by contract: implementations must absorb every failure
/// (transport, bad status, unexpected payload) and return fallback details so a
/// single bad lookup never aborts a recommendation request.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch display metadata for one movie by its external id
    async fn fetch(&self, external_id: &str) -> EnrichmentDetails;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
