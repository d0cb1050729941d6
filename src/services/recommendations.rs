use std::sync::Arc;

use futures::future::join_all;

use crate::{
    error::{AppError, AppResult},
    models::{EnrichedResult, RecommendationOutcome},
    services::providers::MetadataProvider,
    store::RecommendationContext,
};

/// Number of recommendations in a default request
pub const DEFAULT_RECOMMENDATION_COUNT: usize = 5;

/// Content-based recommendation engine
///
/// Resolves a title to its catalog row, ranks every other row by precomputed
/// similarity and enriches the top entries through the metadata provider.
/// Holds no per-request state.
pub struct Recommender {
    context: Arc<RecommendationContext>,
    provider: Arc<dyn MetadataProvider>,
    count: usize,
}

impl Recommender {
    pub fn new(
        context: Arc<RecommendationContext>,
        provider: Arc<dyn MetadataProvider>,
        count: usize,
    ) -> Self {
        Self {
            context,
            provider,
            count,
        }
    }

    /// All selectable titles in catalog order
    pub fn titles(&self) -> Vec<&str> {
        self.context.catalog().titles()
    }

    /// Recommends movies similar to `title`.
    ///
    /// An unknown title is not an error: it yields `RecommendationOutcome::NotFound`
    /// without touching the provider. Only a broken catalog/matrix invariant
    /// comes back as `Err`.
    pub async fn recommend(&self, title: &str) -> AppResult<RecommendationOutcome> {
        let catalog = self.context.catalog();

        let row_index = match catalog.find_row_by_title(title) {
            Ok(row) => row,
            Err(AppError::NotFound(_)) => {
                tracing::info!(title = %title, "Title not found in catalog");
                return Ok(RecommendationOutcome::NotFound {
                    title: title.to_string(),
                });
            }
            Err(e) => return Err(e),
        };

        let neighbors = self.context.similarity().neighbors(row_index, self.count)?;

        let items = neighbors
            .into_iter()
            .map(|(neighbor, score)| {
                catalog
                    .get(neighbor)
                    .map(|item| (item, score))
                    .ok_or(AppError::IndexOutOfRange {
                        row: neighbor,
                        len: catalog.len(),
                    })
            })
            .collect::<AppResult<Vec<_>>>()?;

        // Lookups run concurrently inside this future; join_all keeps input order
        // and dropping the request drops every pending lookup with it.
        let details = join_all(
            items
                .iter()
                .map(|(item, _)| self.provider.fetch(&item.external_id)),
        )
        .await;

        let results: Vec<EnrichedResult> = items
            .into_iter()
            .zip(details)
            .map(|((item, score), details)| EnrichedResult::new(item, score, details))
            .collect();

        tracing::info!(
            title = %title,
            row = row_index,
            results = results.len(),
            provider = self.provider.name(),
            "Recommendations generated"
        );

        Ok(RecommendationOutcome::Found(results))
    }
}
