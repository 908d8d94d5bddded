//! # Data Loader Crate
//!
//! This crate loads the dashboard's movie dataset into an immutable,
//! in-memory `MovieStore`.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieId, Movie, MovieStore)
//! - **parser**: Decode JSON documents into `Movie` records
//! - **index**: Build and validate the store
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::MovieStore;
//! use std::path::Path;
//!
//! let store = MovieStore::load_from_file(Path::new("data/movies.json"))?;
//! for movie in store.movies() {
//!     println!("{} ({})", movie.title, movie.year);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{Movie, MovieId, MovieStore};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_creation() {
        let store = MovieStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert!(store.movies().is_empty());
    }

    #[test]
    fn test_empty_queries() {
        let store = MovieStore::new();
        assert!(store.get_movie(&MovieId::Number(999)).is_none());
        assert!(store.get_movie(&MovieId::from("tt999")).is_none());
    }

    #[test]
    fn test_movie_id_selection() {
        assert!(MovieId::Number(1).matches_selection("1"));
        assert!(MovieId::Number(1).matches_selection(" 1 "));
        assert!(!MovieId::Number(1).matches_selection("01x"));
        assert!(MovieId::from("tt0111161").matches_selection("tt0111161"));
        assert!(!MovieId::from("tt0111161").matches_selection(""));
    }

    #[test]
    fn test_movie_id_from_str() {
        assert_eq!("42".parse::<MovieId>().unwrap(), MovieId::Number(42));
        assert_eq!("abc".parse::<MovieId>().unwrap(), MovieId::from("abc"));
        assert_eq!(MovieId::Number(42).to_string(), "42");
    }
}
