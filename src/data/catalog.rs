use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{
    error::{AppError, AppResult},
    models::MovieId,
};

/// One row of movies.json before validation
///
/// Both fields are optional here so a missing field can be reported with the
/// offending position instead of a bare serde error.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogRecord {
    #[serde(default)]
    pub id: Option<MovieId>,
    #[serde(default)]
    pub title: Option<String>,
}

impl CatalogRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Some(MovieId::new(id)),
            title: Some(title.into()),
        }
    }
}

/// A movie in the loaded catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogEntry {
    /// 0-based index assigned at load time; the join key with similarity rows
    pub position: usize,
    pub id: MovieId,
    pub title: String,
}

/// Ordered, immutable movie list with a title lookup
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    by_title: HashMap<String, usize>,
}

impl Catalog {
    /// Builds the catalog from records in file order
    pub fn load(records: Vec<CatalogRecord>) -> AppResult<Self> {
        if records.is_empty() {
            return Err(AppError::Load("catalog is empty".to_string()));
        }

        let mut entries = Vec::with_capacity(records.len());
        let mut by_title = HashMap::with_capacity(records.len());

        for (position, record) in records.into_iter().enumerate() {
            let id = record.id.ok_or_else(|| {
                AppError::Load(format!("catalog record {} is missing an id", position))
            })?;
            let title = record
                .title
                .filter(|t| !t.trim().is_empty())
                .ok_or_else(|| {
                    AppError::Load(format!("catalog record {} is missing a title", position))
                })?;

            // First position wins for duplicated titles
            if let Some(first) = by_title.get(&title) {
                tracing::warn!(
                    title = %title,
                    first_position = first,
                    duplicate_position = position,
                    "Duplicate title in catalog, lookups resolve to the first"
                );
            } else {
                by_title.insert(title.clone(), position);
            }

            entries.push(CatalogEntry {
                position,
                id,
                title,
            });
        }

        Ok(Self { entries, by_title })
    }

    pub fn position_of_title(&self, title: &str) -> AppResult<usize> {
        self.by_title
            .get(title)
            .copied()
            .ok_or_else(|| AppError::NotFound(title.to_string()))
    }

    pub fn record_at(&self, position: usize) -> AppResult<&CatalogEntry> {
        self.entries.get(position).ok_or(AppError::OutOfRange {
            position,
            len: self.entries.len(),
        })
    }

    /// Titles in catalog order, for populating the movie selector
    pub fn all_titles(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.title.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        Catalog::load(vec![
            CatalogRecord::new("19995", "Avatar"),
            CatalogRecord::new("285", "Pirates of the Caribbean: At World's End"),
            CatalogRecord::new("206647", "Spectre"),
        ])
        .unwrap()
    }

    #[test]
    fn test_load_assigns_positions_in_order() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.record_at(2).unwrap().title, "Spectre");
        assert_eq!(catalog.record_at(2).unwrap().position, 2);
        assert_eq!(catalog.record_at(0).unwrap().id, MovieId::new("19995"));
    }

    #[test]
    fn test_load_rejects_empty() {
        assert!(matches!(Catalog::load(vec![]), Err(AppError::Load(_))));
    }

    #[test]
    fn test_load_rejects_missing_title() {
        let records = vec![
            CatalogRecord::new("1", "Avatar"),
            CatalogRecord {
                id: Some(MovieId::new("2")),
                title: None,
            },
        ];
        match Catalog::load(records) {
            Err(AppError::Load(msg)) => assert!(msg.contains("record 1")),
            other => panic!("expected load error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_blank_title() {
        let records = vec![CatalogRecord::new("1", "   ")];
        assert!(matches!(Catalog::load(records), Err(AppError::Load(_))));
    }

    #[test]
    fn test_load_rejects_missing_id() {
        let records: Vec<CatalogRecord> =
            serde_json::from_str(r#"[{"title": "Avatar"}]"#).unwrap();
        assert!(matches!(Catalog::load(records), Err(AppError::Load(_))));
    }

    #[test]
    fn test_position_of_title_not_found() {
        let catalog = sample_catalog();
        assert!(matches!(
            catalog.position_of_title("Titanic"),
            Err(AppError::NotFound(t)) if t == "Titanic"
        ));
    }

    #[test]
    fn test_duplicate_title_resolves_to_first() {
        let catalog = Catalog::load(vec![
            CatalogRecord::new("1", "The Host"),
            CatalogRecord::new("2", "Heat"),
            CatalogRecord::new("3", "The Host"),
        ])
        .unwrap();
        assert_eq!(catalog.position_of_title("The Host").unwrap(), 0);
        assert_eq!(catalog.record_at(2).unwrap().title, "The Host");
    }

    #[test]
    fn test_record_at_out_of_range() {
        let catalog = sample_catalog();
        assert!(matches!(
            catalog.record_at(3),
            Err(AppError::OutOfRange { position: 3, len: 3 })
        ));
    }

    #[test]
    fn test_title_lookup_round_trip() {
        let catalog = sample_catalog();
        for position in 0..catalog.len() {
            let title = &catalog.record_at(position).unwrap().title;
            assert_eq!(catalog.position_of_title(title).unwrap(), position);
        }
    }

    #[test]
    fn test_all_titles_in_catalog_order() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.all_titles(),
            vec![
                "Avatar",
                "Pirates of the Caribbean: At World's End",
                "Spectre"
            ]
        );
    }

    #[test]
    fn test_records_deserialize_with_numeric_ids_and_extra_fields() {
        let json = r#"[
            {"id": 19995, "title": "Avatar", "tags": "in the 22nd century..."},
            {"id": "285", "title": "Pirates of the Caribbean: At World's End"}
        ]"#;
        let records: Vec<CatalogRecord> = serde_json::from_str(json).unwrap();
        let catalog = Catalog::load(records).unwrap();
        assert_eq!(catalog.record_at(0).unwrap().id.as_str(), "19995");
        assert_eq!(catalog.record_at(1).unwrap().id.as_str(), "285");
    }
}
