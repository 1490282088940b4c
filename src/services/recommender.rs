use std::sync::Arc;

use serde::Serialize;

use crate::{
    data::MovieIndex,
    error::AppResult,
    models::{Axis, MovieId},
};

/// Neighbors requested per axis unless configured otherwise
pub const DEFAULT_LIMIT: usize = 24;

/// A recommended movie before its poster has been looked up
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub position: usize,
    pub title: String,
    pub id: MovieId,
}

/// Resolves a title to its most similar movies along one axis
#[derive(Debug, Clone)]
pub struct Recommender {
    index: Arc<MovieIndex>,
}

impl Recommender {
    pub fn new(index: Arc<MovieIndex>) -> Self {
        Self { index }
    }

    /// Up to `limit` movies most similar to `title`, most similar first
    ///
    /// Fails with `NotFound` when the title is not in the catalog.
    pub fn recommend(&self, title: &str, axis: Axis, limit: usize) -> AppResult<Vec<Candidate>> {
        let catalog = self.index.catalog();
        let position = catalog.position_of_title(title)?;
        let neighbors = self.index.similarity(axis).neighbors_of(position, limit)?;

        let candidates = neighbors
            .into_iter()
            .map(|n| {
                catalog.record_at(n).map(|entry| Candidate {
                    position: entry.position,
                    title: entry.title.clone(),
                    id: entry.id.clone(),
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        tracing::debug!(
            title = %title,
            axis = %axis,
            position,
            candidates = candidates.len(),
            "Resolved recommendation candidates"
        );

        Ok(candidates)
    }
}
