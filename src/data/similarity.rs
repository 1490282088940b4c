use std::collections::HashSet;

use crate::{
    error::{AppError, AppResult},
    models::Axis,
};

/// Precomputed neighbor rankings for one axis
///
/// Row `p` lists catalog positions by descending similarity to `p`. By
/// convention the row starts with `p` itself; [`SimilarityIndex::neighbors_of`]
/// filters the query position out wherever it appears.
#[derive(Debug, Clone)]
pub struct SimilarityIndex {
    axis: Axis,
    rows: Vec<Vec<usize>>,
}

impl SimilarityIndex {
    /// Validates a matrix against the catalog it will be joined with
    pub fn load(matrix: Vec<Vec<usize>>, axis: Axis, catalog_len: usize) -> AppResult<Self> {
        if matrix.len() != catalog_len {
            return Err(AppError::Load(format!(
                "{} similarity has {} rows but the catalog has {} movies",
                axis,
                matrix.len(),
                catalog_len
            )));
        }

        for (position, row) in matrix.iter().enumerate() {
            let mut seen = HashSet::with_capacity(row.len());
            for &n in row {
                if n >= catalog_len {
                    return Err(AppError::Load(format!(
                        "{} similarity row {} references position {} outside the catalog",
                        axis, position, n
                    )));
                }
                // A repeated neighbor would be recommended twice
                if !seen.insert(n) {
                    return Err(AppError::Load(format!(
                        "{} similarity row {} lists position {} more than once",
                        axis, position, n
                    )));
                }
            }
        }

        tracing::debug!(axis = %axis, rows = matrix.len(), "Similarity index loaded");

        Ok(Self { axis, rows: matrix })
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `limit` most similar positions to `position`, excluding itself
    ///
    /// Returns fewer than `limit` entries when the row is short.
    pub fn neighbors_of(&self, position: usize, limit: usize) -> AppResult<Vec<usize>> {
        let row = self.rows.get(position).ok_or(AppError::OutOfRange {
            position,
            len: self.rows.len(),
        })?;

        Ok(row
            .iter()
            .copied()
            .filter(|&n| n != position)
            .take(limit)
            .collect())
    }
}
