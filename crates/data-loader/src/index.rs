//! MovieStore building and validation.
//!
//! Builds the store from parsed records:
//! - keep records in source order
//! - index each record by id
//! - reject datasets where two records share an id

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::info;

impl MovieStore {
    /// Load a dataset file into a validated store
    ///
    /// This is the main entry point for loading data.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading movie dataset from {:?}", path);

        let movies = parser::parse_file(path)?;
        let store = Self::from_movies(movies)?;

        info!("Loaded {} movies", store.len());
        Ok(store)
    }

    /// Build a store from records already in memory
    ///
    /// Fails with `DuplicateId` if any id appears twice.
    pub fn from_movies(movies: Vec<Movie>) -> Result<Self> {
        let mut id_index = HashMap::with_capacity(movies.len());

        for (position, movie) in movies.iter().enumerate() {
            if let Some(first) = id_index.insert(movie.id.clone(), position) {
                return Err(DataLoadError::DuplicateId {
                    id: movie.id.clone(),
                    first,
                    second: position,
                });
            }
        }

        Ok(Self { movies, id_index })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_movies_keeps_order() {
        let store = MovieStore::from_movies(vec![
            Movie::new(3, "Third"),
            Movie::new(1, "First"),
            Movie::new(2, "Second"),
        ])
        .unwrap();

        let titles: Vec<&str> = store.movies().iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["Third", "First", "Second"]);
        assert_eq!(store.get_movie(&MovieId::Number(1)).unwrap().title, "First");
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = MovieStore::from_movies(vec![
            Movie::new(1, "One"),
            Movie::new(2, "Two"),
            Movie::new(1, "One again"),
        ]);

        match result {
            Err(DataLoadError::DuplicateId { id, first, second }) => {
                assert_eq!(id, MovieId::Number(1));
                assert_eq!(first, 0);
                assert_eq!(second, 2);
            }
            other => panic!("expected DuplicateId, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_and_text_ids_are_distinct() {
        let store =
            MovieStore::from_movies(vec![Movie::new(1, "Numeric"), Movie::new("1", "Text")]).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_load_dataset() {
        // Runs against the bundled sample when the workspace layout is present
        let path = Path::new("../../data/movies.json");

        if path.exists() {
            let store = MovieStore::load_from_file(path).unwrap();
            assert!(!store.is_empty());
        }
    }
}
