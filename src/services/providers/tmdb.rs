/// TMDB (The Movie Database) metadata provider
///
/// One GET per lookup against `/movie/{id}`, no retries. The request is bounded by
/// the client timeout and every failure degrades to the fallback details.
use crate::{
    config::Config,
    error::{AppError, AppResult, EnrichmentFailure},
    models::{EnrichmentDetails, TmdbMovieDetails, UNKNOWN_CATEGORIES},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
    language: String,
    placeholder: String,
}

impl TmdbProvider {
    /// Creates a provider whose requests are bounded by `timeout`
    pub fn new(
        api_key: String,
        api_url: String,
        image_base_url: String,
        language: String,
        placeholder: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Initialization(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_base_url: image_base_url.trim_end_matches('/').to_string(),
            language,
            placeholder,
        })
    }

    pub fn from_config(config: &Config) -> AppResult<Self> {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_base_url.clone(),
            config.tmdb_language.clone(),
            config.poster_placeholder_url.clone(),
            config.enrichment_timeout(),
        )
    }

    /// Performs the lookup, reporting exactly why it failed
    pub async fn try_fetch(
        &self,
        external_id: &str,
    ) -> Result<EnrichmentDetails, EnrichmentFailure> {
        let url = format!("{}/movie/{}", self.api_url, external_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(EnrichmentFailure::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let details: TmdbMovieDetails = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(response = %body, "Raw TMDB response");
            EnrichmentFailure::Malformed(e.to_string())
        })?;

        Ok(self.details_from_response(details))
    }

    /// Converts a TMDB payload into display metadata, filling gaps with defaults
    fn details_from_response(&self, details: TmdbMovieDetails) -> EnrichmentDetails {
        let poster_ref = match details.poster_path.as_deref() {
            Some(path) if !path.is_empty() => format!("{}{}", self.image_base_url, path),
            _ => self.placeholder.clone(),
        };

        let categories = details
            .genres
            .unwrap_or_default()
            .into_iter()
            .map(|genre| genre.name)
            .collect::<Vec<_>>()
            .join(", ");
        let categories = if categories.is_empty() {
            UNKNOWN_CATEGORIES.to_string()
        } else {
            categories
        };

        let rating = details
            .vote_average
            .filter(|rating| rating.is_finite())
            .map(|rating| rating.clamp(0.0, 10.0))
            .unwrap_or(0.0);

        EnrichmentDetails {
            poster_ref,
            categories,
            rating,
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch(&self, external_id: &str) -> EnrichmentDetails {
        match self.try_fetch(external_id).await {
            Ok(details) => {
                tracing::debug!(
                    external_id = %external_id,
                    provider = "tmdb",
                    "Metadata fetched"
                );
                details
            }
            Err(failure) => {
                tracing::warn!(
                    external_id = %external_id,
                    failure = failure.kind(),
                    error = %failure,
                    provider = "tmdb",
                    "Metadata fetch failed, using fallback"
                );
                EnrichmentDetails::fallback(&self.placeholder)
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
