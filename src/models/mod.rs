use serde::{Deserialize, Serialize};

/// Fallback category label when no genres are known
pub const UNKNOWN_CATEGORIES: &str = "Unknown";

/// A recommendable movie in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    /// 0-based position in the catalog, also the similarity matrix row/column
    pub row_index: usize,
    /// Key used to query the metadata provider (a TMDB movie id)
    pub external_id: String,
    /// Display title, also the selection key
    pub title: String,
}

/// Display metadata fetched for one movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichmentDetails {
    pub poster_ref: String,
    pub categories: String,
    pub rating: f64,
}

impl EnrichmentDetails {
    /// The fixed values substituted when enrichment fails
    pub fn fallback(placeholder: &str) -> Self {
        Self {
            poster_ref: placeholder.to_string(),
            categories: UNKNOWN_CATEGORIES.to_string(),
            rating: 0.0,
        }
    }
}

/// A single recommendation returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedResult {
    pub title: String,
    pub external_id: String,
    pub score: f64,
    pub poster_ref: String,
    pub categories: String,
    pub rating: f64,
}

impl EnrichedResult {
    pub fn new(item: &CatalogItem, score: f64, details: EnrichmentDetails) -> Self {
        Self {
            title: item.title.clone(),
            external_id: item.external_id.clone(),
            score,
            poster_ref: details.poster_ref,
            categories: details.categories,
            rating: details.rating,
        }
    }
}

/// Result of a recommendation lookup
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationOutcome {
    /// Ranked recommendations, most similar first
    Found(Vec<EnrichedResult>),
    /// The requested title is not in the catalog
    NotFound { title: String },
}

impl RecommendationOutcome {
    /// Recommendations in ranked order; empty when the title was not found
    pub fn results(&self) -> &[EnrichedResult] {
        match self {
            RecommendationOutcome::Found(results) => results,
            RecommendationOutcome::NotFound { .. } => &[],
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RecommendationOutcome::NotFound { .. })
    }

    pub fn into_results(self) -> Vec<EnrichedResult> {
        match self {
            RecommendationOutcome::Found(results) => results,
            RecommendationOutcome::NotFound { .. } => Vec::new(),
        }
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// API response from GET /movie/{id}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<TmdbGenre>>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub name: String,
}
