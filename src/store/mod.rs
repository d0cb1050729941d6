pub mod catalog;
pub mod similarity;

pub use catalog::Catalog;
pub use similarity::SimilarityMatrix;

use crate::error::{AppError, AppResult};

/// Read-only data shared by every recommendation request.
///
/// Built once at startup; the matrix dimension always equals the catalog size.
#[derive(Debug, Clone)]
pub struct RecommendationContext {
    catalog: Catalog,
    similarity: SimilarityMatrix,
}

impl RecommendationContext {
    pub fn new(catalog: Catalog, similarity: SimilarityMatrix) -> AppResult<Self> {
        if catalog.len() != similarity.dimension() {
            return Err(AppError::Initialization(format!(
                "similarity matrix is {0}x{0} but the catalog has {1} items",
                similarity.dimension(),
                catalog.len()
            )));
        }

        Ok(Self {
            catalog,
            similarity,
        })
    }

    /// Loads both static artifacts; any problem is an initialization error
    pub fn load(catalog_path: &str, similarity_path: &str) -> AppResult<Self> {
        let catalog = Catalog::load(catalog_path)?;
        let similarity = SimilarityMatrix::load(similarity_path)?;
        Self::new(catalog, similarity)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }
}
