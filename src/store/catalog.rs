use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::CatalogItem,
};

/// A TMDB movie id as it appears in exported data: number or string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    movie_id: RawId,
    title: String,
}

/// On-disk catalog layouts
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CatalogArtifact {
    /// `[{"movie_id": .., "title": ..}, ...]`
    Rows(Vec<CatalogRow>),
    /// `{"movie_id": [..], "title": [..]}`
    Columns {
        movie_id: Vec<RawId>,
        title: Vec<String>,
    },
}

/// In-memory catalog of recommendable movies, indexed by row
#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Builds a catalog from `(external_id, title)` pairs in row order
    pub fn from_entries<I, E, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (E, T)>,
        E: Into<String>,
        T: Into<String>,
    {
        let items = entries
            .into_iter()
            .enumerate()
            .map(|(row_index, (external_id, title))| CatalogItem {
                row_index,
                external_id: external_id.into(),
                title: title.into(),
            })
            .collect();

        Self { items }
    }

    /// Loads the catalog artifact from a JSON file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Initialization(format!(
                "could not read catalog '{}': {}",
                path.display(),
                e
            ))
        })?;

        let catalog = Self::from_json(&raw).map_err(|e| match e {
            AppError::Initialization(msg) => {
                AppError::Initialization(format!("catalog '{}': {}", path.display(), msg))
            }
            other => other,
        })?;

        let duplicates = catalog.duplicate_title_count();
        if duplicates > 0 {
            tracing::warn!(
                path = %path.display(),
                duplicates,
                "Catalog contains duplicate titles, first match wins on lookup"
            );
        }

        tracing::info!(
            path = %path.display(),
            items = catalog.len(),
            "Loaded catalog"
        );

        Ok(catalog)
    }

    /// Parses a catalog from its JSON text in either accepted layout
    pub fn from_json(raw: &str) -> AppResult<Self> {
        let artifact: CatalogArtifact = serde_json::from_str(raw)
            .map_err(|e| AppError::Initialization(format!("invalid catalog JSON: {}", e)))?;

        match artifact {
            CatalogArtifact::Rows(rows) => Ok(Self::from_entries(
                rows.into_iter()
                    .map(|row| (String::from(row.movie_id), row.title)),
            )),
            CatalogArtifact::Columns { movie_id, title } => {
                if movie_id.len() != title.len() {
                    return Err(AppError::Initialization(format!(
                        "catalog columns differ in length: {} ids, {} titles",
                        movie_id.len(),
                        title.len()
                    )));
                }
                Ok(Self::from_entries(
                    movie_id.into_iter().map(String::from).zip(title),
                ))
            }
        }
    }

    /// Returns the row of the first item whose title matches exactly
    pub fn find_row_by_title(&self, title: &str) -> AppResult<usize> {
        self.items
            .iter()
            .position(|item| item.title == title)
            .ok_or_else(|| AppError::NotFound(format!("Movie '{}' not found in the catalog", title)))
    }

    pub fn get(&self, row_index: usize) -> Option<&CatalogItem> {
        self.items.get(row_index)
    }

    /// All selectable titles in row order
    pub fn titles(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.title.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn duplicate_title_count(&self) -> usize {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .filter(|item| !seen.insert(item.title.as_str()))
            .count()
    }
}
