//! Facet catalog: the distinct values offered by each filter dropdown.
//!
//! The catalog is always built from the full dataset, never from the
//! filtered subset, so choosing one filter does not shrink the options of
//! the others.

use data_loader::Movie;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// A list-valued, filterable dimension of a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Facet {
    Genre,
    Country,
    Language,
}

impl Facet {
    /// The movie's values for this facet
    pub fn values(self, movie: &Movie) -> &[String] {
        match self {
            Facet::Genre => &movie.genre,
            Facet::Country => &movie.country,
            Facet::Language => &movie.language,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Facet::Genre => "Genre",
            Facet::Country => "Country",
            Facet::Language => "Language",
        }
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Distinct values per facet.
///
/// `years` is most-recent-first; the string facets are in ascending byte
/// order (case-sensitive, so "Zulu" sorts before "afrikaans").
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FacetCatalog {
    pub years: Vec<i32>,
    pub genres: Vec<String>,
    pub countries: Vec<String>,
    pub languages: Vec<String>,
}

impl FacetCatalog {
    /// Build the catalog from a dataset
    pub fn build(movies: &[Movie]) -> Self {
        let years: BTreeSet<i32> = movies.iter().map(|m| m.year).collect();

        Self {
            years: years.into_iter().rev().collect(),
            genres: distinct_sorted(movies, Facet::Genre),
            countries: distinct_sorted(movies, Facet::Country),
            languages: distinct_sorted(movies, Facet::Language),
        }
    }

    /// Options for one list-valued facet
    pub fn options(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Genre => &self.genres,
            Facet::Country => &self.countries,
            Facet::Language => &self.languages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
            && self.genres.is_empty()
            && self.countries.is_empty()
            && self.languages.is_empty()
    }
}

fn distinct_sorted(movies: &[Movie], facet: Facet) -> Vec<String> {
    movies
        .iter()
        .flat_map(|movie| facet.values(movie))
        .map(String::as_str)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
