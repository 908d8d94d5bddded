//! Single-movie detail view.
//!
//! The selection is looked up in the current (filtered) movie list, so a
//! movie hidden by the filters cannot be selected.

use data_loader::Movie;
use serde::Serialize;
use std::borrow::Borrow;

/// Shown for unknown optional values
pub const NOT_AVAILABLE: &str = "N/A";

/// Find the movie whose id matches a raw selection value
pub fn find_movie<'a, M: Borrow<Movie>>(movies: &'a [M], selection: &str) -> Option<&'a Movie> {
    movies
        .iter()
        .map(Borrow::<Movie>::borrow)
        .find(|movie| movie.id.matches_selection(selection))
}

/// Display-ready projection of one movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetails {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub runtime: String,
    pub imdb_rating: f64,
    pub director: String,
    pub box_office: String,
    pub genres: Vec<String>,
    pub countries: Vec<String>,
    pub languages: Vec<String>,
    pub cast: Vec<String>,
    pub oscar_nominations: u32,
    pub oscar_wins: u32,
}

impl MovieDetails {
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            id: movie.id.to_string(),
            title: movie.title.clone(),
            year: movie.year,
            runtime: movie
                .runtime
                .map(|minutes| format!("{} minutes", minutes))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            imdb_rating: movie.imdb_rating,
            director: movie.director.clone(),
            box_office: format_box_office(movie.box_office),
            genres: movie.genre.clone(),
            countries: movie.country.clone(),
            languages: movie.language.clone(),
            cast: movie.cast.clone(),
            oscar_nominations: movie.oscar_nominations,
            oscar_wins: movie.oscar_winning,
        }
    }
}

/// "$1,234,567", or "N/A" when revenue is unknown
///
/// Amounts are rounded to whole dollars. A known revenue of zero prints
/// as "$0"; only a missing value is "N/A".
pub fn format_box_office(box_office: Option<f64>) -> String {
    match box_office {
        Some(amount) if amount.is_finite() => {
            format!("${}", group_thousands(amount.max(0.0).round() as u64))
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
