//! Parser for movie dataset files.
//!
//! Accepted document shapes:
//! - a top-level JSON array of movie objects
//! - an object with a `movies` array (`{ "movies": [ ... ] }`)
//!
//! Records are decoded one at a time. A record that cannot be decoded
//! (no usable `id`, a non-object entry) is logged and skipped so the rest
//! of the dataset still loads. Bad values in other fields only reset that
//! field to its default.

use crate::error::{DataLoadError, Result};
use crate::types::Movie;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Records(Vec<Value>),
    Wrapped { movies: Vec<Value> },
}

impl Document {
    fn into_records(self) -> Vec<Value> {
        match self {
            Document::Records(records) | Document::Wrapped { movies: records } => records,
        }
    }
}

/// Read and parse a dataset file
pub fn parse_file(path: &Path) -> Result<Vec<Movie>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    parse_dataset(&content)
}

/// Parse a dataset document held in memory
///
/// Fails only when the document itself is unusable; bad records are
/// dropped with a warning.
pub fn parse_dataset(json: &str) -> Result<Vec<Movie>> {
    let document: Document = serde_json::from_str(json)?;
    let records = document.into_records();
    let total = records.len();

    let movies: Vec<Movie> = records
        .into_iter()
        .enumerate()
        .filter_map(|(position, record)| match serde_json::from_value::<Movie>(record) {
            Ok(movie) => Some(movie),
            Err(e) => {
                warn!(position, error = %e, "Skipping malformed movie record");
                None
            }
        })
        .collect();

    debug!("Decoded {} of {} records", movies.len(), total);
    Ok(movies)
}
