use std::path::Path;

use crate::error::{AppError, AppResult};

/// Precomputed pairwise similarity scores, one row per catalog item
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f64>>,
}

impl SimilarityMatrix {
    /// Creates a matrix, rejecting anything that is not square.
    ///
    /// `-0.0` is stored as `0.0` so both rank as a tie under `total_cmp`.
    pub fn new(mut rows: Vec<Vec<f64>>) -> AppResult<Self> {
        let n = rows.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(AppError::Initialization(format!(
                "similarity matrix is not square: row {} has {} columns, expected {}",
                i,
                row.len(),
                n
            )));
        }

        for value in rows.iter_mut().flatten() {
            *value += 0.0;
        }

        Ok(Self { rows })
    }

    /// Loads the similarity artifact (a JSON array of rows)
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            AppError::Initialization(format!(
                "could not read similarity matrix '{}': {}",
                path.display(),
                e
            ))
        })?;

        let rows: Vec<Vec<f64>> = serde_json::from_str(&raw).map_err(|e| {
            AppError::Initialization(format!(
                "invalid similarity matrix '{}': {}",
                path.display(),
                e
            ))
        })?;

        let matrix = Self::new(rows)?;

        tracing::info!(
            path = %path.display(),
            dimension = matrix.dimension(),
            "Loaded similarity matrix"
        );

        Ok(matrix)
    }

    /// Number of rows (and columns)
    pub fn dimension(&self) -> usize {
        self.rows.len()
    }

    pub fn score(&self, i: usize, j: usize) -> Option<f64> {
        self.rows.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Returns the `k` most similar rows to `row_index`, highest score first.
    ///
    /// Columns are visited in ascending order and sorted with a stable sort,
    /// so equal scores keep ascending index order. The queried row itself is
    /// never part of the result.
    pub fn neighbors(&self, row_index: usize, k: usize) -> AppResult<Vec<(usize, f64)>> {
        let row = self
            .rows
            .get(row_index)
            .ok_or(AppError::IndexOutOfRange {
                row: row_index,
                len: self.rows.len(),
            })?;

        let mut ranked: Vec<(usize, f64)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|(column, _)| *column != row_index)
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(k);

        Ok(ranked)
    }
}
