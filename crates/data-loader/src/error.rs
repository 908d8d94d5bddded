//! Error types for the data-loader crate.
//!
//! Loading is the only fallible step in the workspace: once a
//! `MovieStore` exists, every engine operation over it is total.

use crate::types::MovieId;
use thiserror::Error;

/// Errors that can occur while loading a movie dataset
///
/// Individual records that fail to decode are not errors here; the parser
/// skips them and keeps going. These variants cover problems with the
/// dataset as a whole.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The document is not JSON, or not an array / `{ "movies": [...] }` object
    #[error("Invalid dataset document: {0}")]
    InvalidDocument(#[from] serde_json::Error),

    /// Two records share an id
    #[error("Duplicate movie id {id} (records {first} and {second})")]
    DuplicateId {
        id: MovieId,
        first: usize,
        second: usize,
    },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
