use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::Axis,
};

pub mod catalog;
pub mod similarity;

pub use catalog::{Catalog, CatalogEntry, CatalogRecord};
pub use similarity::SimilarityIndex;

pub const CATALOG_FILE: &str = "movies.json";

/// Catalog plus the three similarity indexes, loaded once and shared read-only
#[derive(Debug, Clone)]
pub struct MovieIndex {
    catalog: Catalog,
    storyline: SimilarityIndex,
    director: SimilarityIndex,
    cast: SimilarityIndex,
}

impl MovieIndex {
    /// Assembles the index from parts that were validated against `catalog`
    pub fn new(
        catalog: Catalog,
        storyline: SimilarityIndex,
        director: SimilarityIndex,
        cast: SimilarityIndex,
    ) -> AppResult<Self> {
        let slots = [
            (Axis::Storyline, &storyline),
            (Axis::Director, &director),
            (Axis::Cast, &cast),
        ];
        for (slot, index) in slots {
            if index.axis() != slot {
                return Err(AppError::Load(format!(
                    "{} similarity was supplied where the {} index belongs",
                    index.axis(),
                    slot
                )));
            }
            if index.len() != catalog.len() {
                return Err(AppError::Load(format!(
                    "{} similarity has {} rows but the catalog has {} movies",
                    index.axis(),
                    index.len(),
                    catalog.len()
                )));
            }
        }

        Ok(Self {
            catalog,
            storyline,
            director,
            cast,
        })
    }

    /// Loads movies.json and `<axis>_similarity.json` for every axis from `dir`
    pub fn load_from_dir(dir: &Path) -> AppResult<Self> {
        let records: Vec<CatalogRecord> = read_json(&dir.join(CATALOG_FILE))?;
        let catalog = Catalog::load(records)?;

        let load_axis = |axis: Axis| -> AppResult<SimilarityIndex> {
            let matrix: Vec<Vec<usize>> = read_json(&dir.join(similarity_file(axis)))?;
            SimilarityIndex::load(matrix, axis, catalog.len())
        };

        let storyline = load_axis(Axis::Storyline)?;
        let director = load_axis(Axis::Director)?;
        let cast = load_axis(Axis::Cast)?;

        tracing::info!(
            data_dir = %dir.display(),
            movies = catalog.len(),
            "Loaded catalog and similarity indexes"
        );

        Self::new(catalog, storyline, director, cast)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn similarity(&self, axis: Axis) -> &SimilarityIndex {
        match axis {
            Axis::Storyline => &self.storyline,
            Axis::Director => &self.director,
            Axis::Cast => &self.cast,
        }
    }
}

pub fn similarity_file(axis: Axis) -> String {
    format!("{}_similarity.json", axis)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let contents = fs::read_to_string(path)
        .map_err(|e| AppError::Load(format!("failed to read {}: {}", path.display(), e)))?;
    serde_json::from_str(&contents)
        .map_err(|e| AppError::Load(format!("failed to parse {}: {}", path.display(), e)))
}
