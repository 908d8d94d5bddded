//! Core domain types for the movie dataset.
//!
//! The record shape follows the dashboard's bundled JSON: list-valued
//! facets (`genre`, `country`, `language`, `cast`) are plain string
//! sequences and the Oscar counters default to zero when absent.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Identifiers
// =============================================================================

/// Unique identifier for a movie.
///
/// Datasets in the wild use either integers or strings, so both are
/// accepted. The textual form is what UI selections are compared against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MovieId {
    Number(u64),
    Text(String),
}

impl MovieId {
    /// True if `selection` (a raw option value) names this id.
    pub fn matches_selection(&self, selection: &str) -> bool {
        let selection = selection.trim();
        match self {
            MovieId::Number(n) => selection.parse::<u64>().is_ok_and(|s| s == *n),
            MovieId::Text(t) => t == selection,
        }
    }
}

impl Default for MovieId {
    fn default() -> Self {
        MovieId::Number(0)
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieId::Number(n) => write!(f, "{}", n),
            MovieId::Text(t) => f.write_str(t),
        }
    }
}

impl FromStr for MovieId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<u64>() {
            Ok(n) => MovieId::Number(n),
            Err(_) => MovieId::Text(s.to_string()),
        })
    }
}

impl From<u64> for MovieId {
    fn from(n: u64) -> Self {
        MovieId::Number(n)
    }
}

impl From<&str> for MovieId {
    fn from(s: &str) -> Self {
        MovieId::Text(s.to_string())
    }
}

// =============================================================================
// Movie
// =============================================================================

/// A single movie record.
///
/// Only `id` is required when decoding. Every other field falls back to
/// its empty value (`""`, `0`, `[]`) when absent or `null`, so one sloppy
/// record never poisons the aggregations over the rest. Numeric fields
/// also accept numeric text (`"1994"`) and integral floats (`2.0`); any
/// other value, including `NaN` and infinities, falls back to the default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,

    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Release year; 0 when the source record had none
    #[serde(default, deserialize_with = "lenient_integer")]
    pub year: i32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub director: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub genre: Vec<String>,

    /// Production countries
    #[serde(default, deserialize_with = "null_as_default")]
    pub country: Vec<String>,

    /// Spoken languages
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: Vec<String>,

    /// IMDb rating in [0.0, 10.0]. Numeric strings ("8.5") are accepted.
    #[serde(default, deserialize_with = "lenient_rating")]
    pub imdb_rating: f64,

    #[serde(default, deserialize_with = "lenient_integer")]
    pub oscar_nominations: u32,

    /// Number of Oscars won
    #[serde(default, deserialize_with = "lenient_integer")]
    pub oscar_winning: u32,

    /// Revenue in dollars. `None` means unknown, which is not the same as 0.
    #[serde(default, deserialize_with = "lenient_amount")]
    pub box_office: Option<f64>,

    /// Runtime in minutes
    #[serde(default, deserialize_with = "lenient_optional_integer")]
    pub runtime: Option<u32>,

    /// Credited actors, billing order
    #[serde(default, deserialize_with = "null_as_default")]
    pub cast: Vec<String>,
}

impl Movie {
    /// Create a movie with only an id and title set
    pub fn new(id: impl Into<MovieId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any JSON value found where a number belongs
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

impl RawNumber {
    /// The finite value, if the raw input holds one
    fn finite(self) -> Option<f64> {
        match self {
            RawNumber::Number(n) => Some(n),
            RawNumber::Text(s) => s.trim().parse().ok(),
            RawNumber::Other(_) => None,
        }
        .filter(|n: &f64| n.is_finite())
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawNumber>::deserialize(deserializer)?.and_then(RawNumber::finite))
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.unwrap_or(0.0))
}

/// Unknown or negative revenue becomes `None`
fn lenient_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.filter(|amount| *amount >= 0.0))
}

/// Whole numbers that fit `T`; fractions and out-of-range values are `None`
fn lenient_optional_integer<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    Ok(lenient_number(deserializer)?
        .filter(|n| n.fract() == 0.0 && n.abs() <= i64::MAX as f64)
        .and_then(|n| T::try_from(n as i64).ok()))
}

fn lenient_integer<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + Default,
{
    Ok(lenient_optional_integer(deserializer)?.unwrap_or_default())
}

// =============================================================================
// MovieStore - The Immutable Record Store
// =============================================================================

/// The loaded dataset.
///
/// Records keep their source order, which is the order every stable
/// filter and ranking in the engine preserves. The id index is built once
/// at construction; the store is never mutated afterwards.
#[derive(Debug, Default)]
pub struct MovieStore {
    pub(crate) movies: Vec<Movie>,
    /// Position of each movie in `movies`
    pub(crate) id_index: HashMap<MovieId, usize>,
}

impl MovieStore {
    /// Creates a new, empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// All records in dataset order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// Get a movie by id
    pub fn get_movie(&self, id: &MovieId) -> Option<&Movie> {
        self.id_index.get(id).map(|&pos| &self.movies[pos])
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
