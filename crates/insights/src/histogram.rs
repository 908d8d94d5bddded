//! Histograms and frequency distributions over a (filtered) dataset.
//!
//! Every function here is a pure fold over its input. They accept any
//! slice whose elements borrow as a `Movie`, so both the full store
//! (`&[Movie]`) and a filtered subset (`&[&Movie]`) can be passed in.
//!
//! ## Tie-breaking
//! Count-ranked outputs use a stable sort over values in first-seen
//! order, so equal counts keep the order in which the dataset scan first
//! met them.

use crate::error::UnknownSelection;
use crate::facets::Facet;
use data_loader::Movie;
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

/// Genres shown in the genre chart; the rest are dropped
pub const TOP_GENRES: usize = 10;

/// Named entries in a country/language distribution before the rollup
pub const TOP_DISTRIBUTION: usize = 10;

/// Label of the rollup bucket appended to distributions
pub const OTHERS_LABEL: &str = "Others";

const RATING_LABELS: [&str; 5] = ["9.0+", "8.0-8.9", "7.0-7.9", "6.0-6.9", "< 6.0"];

const NOMINATION_LABELS: [&str; 4] = [
    "No Nominations",
    "1-2 Nominations",
    "3-5 Nominations",
    "6+ Nominations",
];

/// One labelled bar or slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
}

impl Bucket {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// Ordered buckets, ready for a bar or pie chart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Histogram {
    pub buckets: Vec<Bucket>,
}

impl Histogram {
    fn from_counts<'a>(counts: impl IntoIterator<Item = (&'a str, usize)>) -> Self {
        Self {
            buckets: counts
                .into_iter()
                .map(|(label, count)| Bucket::new(label, count))
                .collect(),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.buckets.iter().map(|b| b.label.as_str()).collect()
    }

    pub fn counts(&self) -> Vec<usize> {
        self.buckets.iter().map(|b| b.count).collect()
    }

    /// Sum of all bucket counts
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    /// Count of the bucket named `label`, if present
    pub fn get(&self, label: &str) -> Option<usize> {
        self.buckets
            .iter()
            .find(|b| b.label == label)
            .map(|b| b.count)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

// =============================================================================
// Counting helpers
// =============================================================================

/// Count occurrences, keeping values in first-seen order
pub(crate) fn tally<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<(&'a str, usize)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in values {
        match positions.entry(value) {
            Entry::Occupied(e) => counts[*e.get()].1 += 1,
            Entry::Vacant(e) => {
                e.insert(counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts
}

/// Sort by descending count; equal counts keep their current order
pub(crate) fn rank_by_count<T>(mut counts: Vec<(T, usize)>) -> Vec<(T, usize)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn facet_values<M: Borrow<Movie>>(movies: &[M], facet: Facet) -> impl Iterator<Item = &str> {
    movies
        .iter()
        .flat_map(move |m| facet.values(Borrow::<Movie>::borrow(m)).iter().map(String::as_str))
}

// =============================================================================
// Fixed-bucket histograms
// =============================================================================

fn rating_band(rating: f64) -> usize {
    if rating >= 9.0 {
        0
    } else if rating >= 8.0 {
        1
    } else if rating >= 7.0 {
        2
    } else if rating >= 6.0 {
        3
    } else {
        4
    }
}

fn nomination_band(nominations: u32) -> usize {
    match nominations {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        _ => 3,
    }
}

fn banded<M, const N: usize>(
    movies: &[M],
    labels: [&str; N],
    band: impl Fn(&Movie) -> usize,
) -> Histogram
where
    M: Borrow<Movie>,
{
    let mut counts = [0usize; N];
    for movie in movies {
        counts[band(Borrow::<Movie>::borrow(movie))] += 1;
    }
    Histogram::from_counts(labels.into_iter().zip(counts))
}

/// Five IMDb rating bands; counts always sum to `movies.len()`
pub fn rating_histogram<M: Borrow<Movie>>(movies: &[M]) -> Histogram {
    banded(movies, RATING_LABELS, |m| rating_band(m.imdb_rating))
}

/// Four Oscar-nomination bands; counts always sum to `movies.len()`
pub fn oscar_nomination_histogram<M: Borrow<Movie>>(movies: &[M]) -> Histogram {
    banded(movies, NOMINATION_LABELS, |m| nomination_band(m.oscar_nominations))
}

// =============================================================================
// Value-keyed histograms
// =============================================================================

/// Top genres by occurrence. Genres past [`TOP_GENRES`] are dropped, not
/// rolled up.
pub fn genre_histogram<M: Borrow<Movie>>(movies: &[M]) -> Histogram {
    let ranked = rank_by_count(tally(facet_values(movies, Facet::Genre)));
    Histogram::from_counts(ranked.into_iter().take(TOP_GENRES))
}

/// Movies per release year, oldest first
pub fn year_histogram<M: Borrow<Movie>>(movies: &[M]) -> Histogram {
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    for movie in movies {
        let movie: &Movie = movie.borrow();
        *years.entry(movie.year).or_insert(0) += 1;
    }
    Histogram {
        buckets: years
            .into_iter()
            .map(|(year, count)| Bucket::new(year.to_string(), count))
            .collect(),
    }
}

/// Top [`TOP_DISTRIBUTION`] values of a list-valued facet, then an
/// "Others" bucket holding the remainder.
///
/// "Others" is always present, with a count of 0 when every value made
/// the top list, so the pie keeps a stable shape as filters change.
pub fn facet_distribution<M: Borrow<Movie>>(movies: &[M], facet: Facet) -> Histogram {
    let ranked = rank_by_count(tally(facet_values(movies, facet)));
    let others: usize = ranked.iter().skip(TOP_DISTRIBUTION).map(|(_, c)| c).sum();

    let mut histogram = Histogram::from_counts(ranked.into_iter().take(TOP_DISTRIBUTION));
    histogram.buckets.push(Bucket::new(OTHERS_LABEL, others));
    histogram
}

pub fn country_distribution<M: Borrow<Movie>>(movies: &[M]) -> Histogram {
    facet_distribution(movies, Facet::Country)
}

pub fn language_distribution<M: Borrow<Movie>>(movies: &[M]) -> Histogram {
    facet_distribution(movies, Facet::Language)
}

// =============================================================================
// Oscar statistics by year
// =============================================================================

/// Nominations and wins summed over one release year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OscarYearStats {
    pub year: i32,
    pub nominations: u64,
    pub wins: u64,
}

/// Per-year Oscar totals, oldest first. Movies without a year are skipped.
pub fn oscar_stats_by_year<M: Borrow<Movie>>(movies: &[M]) -> Vec<OscarYearStats> {
    let mut by_year: BTreeMap<i32, (u64, u64)> = BTreeMap::new();
    for movie in movies {
        let movie: &Movie = movie.borrow();
        if movie.year == 0 {
            continue;
        }
        let entry = by_year.entry(movie.year).or_insert((0, 0));
        entry.0 += u64::from(movie.oscar_nominations);
        entry.1 += u64::from(movie.oscar_winning);
    }

    by_year
        .into_iter()
        .map(|(year, (nominations, wins))| OscarYearStats {
            year,
            nominations,
            wins,
        })
        .collect()
}

// =============================================================================
// Chart selection
// =============================================================================

/// The bar chart currently selected in the analysis panel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum ChartKind {
    #[default]
    Ratings,
    Genres,
    Years,
    Oscars,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Ratings,
        ChartKind::Genres,
        ChartKind::Years,
        ChartKind::Oscars,
    ];

    /// Lenient parse for UI input; unknown kinds show the ratings chart
    pub fn from_selection(selection: &str) -> Self {
        selection.parse().unwrap_or_default()
    }

    pub fn id(self) -> &'static str {
        match self {
            ChartKind::Ratings => "ratings",
            ChartKind::Genres => "genres",
            ChartKind::Years => "years",
            ChartKind::Oscars => "oscars",
        }
    }

    pub fn title(self) -> String {
        let id = self.id();
        format!("Movie Distribution by {}{}", id[..1].to_uppercase(), &id[1..])
    }

    pub fn histogram<M: Borrow<Movie>>(self, movies: &[M]) -> Histogram {
        match self {
            ChartKind::Ratings => rating_histogram(movies),
            ChartKind::Genres => genre_histogram(movies),
            ChartKind::Years => year_histogram(movies),
            ChartKind::Oscars => oscar_nomination_histogram(movies),
        }
    }

    pub fn render<M: Borrow<Movie>>(self, movies: &[M]) -> Chart {
        Chart {
            kind: self,
            title: self.title(),
            histogram: self.histogram(movies),
        }
    }
}

impl FromStr for ChartKind {
    type Err = UnknownSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartKind::ALL
            .into_iter()
            .find(|kind| kind.id() == s.trim())
            .ok_or_else(|| UnknownSelection::new("chart kind", s.trim()))
    }
}

/// A titled histogram for the selected chart kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub histogram: Histogram,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64) -> Movie {
        Movie::new(id, format!("Movie {}", id))
    }

    fn with_genres(id: u64, genres: &[&str]) -> Movie {
        Movie {
            genre: genres.iter().map(|s| s.to_string()).collect(),
            ..movie(id)
        }
    }

    #[test]
    fn test_rating_histogram_boundaries() {
        let ratings = [9.0, 8.99, 8.0, 7.0, 6.99, 6.0, 5.99, 0.0];
        let movies: Vec<Movie> = ratings
            .iter()
            .enumerate()
            .map(|(i, &imdb_rating)| Movie {
                imdb_rating,
                ..movie(i as u64)
            })
            .collect();

        let histogram = rating_histogram(&movies);

        assert_eq!(histogram.labels(), RATING_LABELS.to_vec());
        assert_eq!(histogram.counts(), vec![1, 2, 1, 2, 2]);
        assert_eq!(histogram.total(), movies.len());
    }

    #[test]
    fn test_oscar_nomination_histogram() {
        let nominations = [0, 1, 2, 3, 5, 6, 14];
        let movies: Vec<Movie> = nominations
            .iter()
            .enumerate()
            .map(|(i, &oscar_nominations)| Movie {
                oscar_nominations,
                ..movie(i as u64)
            })
            .collect();

        let histogram = oscar_nomination_histogram(&movies);

        assert_eq!(histogram.counts(), vec![1, 2, 2, 2]);
        assert_eq!(histogram.get("No Nominations"), Some(1));
    }

    #[test]
    fn test_genre_histogram_counts_every_genre() {
        let movies = vec![
            with_genres(1, &["Drama"]),
            with_genres(2, &["Crime", "Drama"]),
            with_genres(3, &["Crime", "Thriller"]),
        ];

        let histogram = genre_histogram(&movies);

        assert_eq!(histogram.labels(), vec!["Drama", "Crime", "Thriller"]);
        assert_eq!(histogram.counts(), vec![2, 2, 1]);
    }

    #[test]
    fn test_genre_histogram_caps_without_rollup() {
        let genres: Vec<String> = (0..12).map(|i| format!("Genre {}", i)).collect();
        let genre_refs: Vec<&str> = genres.iter().map(String::as_str).collect();
        let movies = vec![with_genres(1, &genre_refs)];

        let histogram = genre_histogram(&movies);

        assert_eq!(histogram.len(), TOP_GENRES);
        assert_eq!(histogram.get(OTHERS_LABEL), None);
        // All tied at 1: first-seen order wins
        assert_eq!(histogram.buckets[0].label, "Genre 0");
        assert_eq!(histogram.buckets[9].label, "Genre 9");
    }

    #[test]
    fn test_year_histogram_sorted_by_year() {
        let movies: Vec<Movie> = [2001, 1972, 1994, 1972]
            .iter()
            .enumerate()
            .map(|(i, &year)| Movie {
                year,
                ..movie(i as u64)
            })
            .collect();

        let histogram = year_histogram(&movies);

        assert_eq!(histogram.labels(), vec!["1972", "1994", "2001"]);
        assert_eq!(histogram.counts(), vec![2, 1, 1]);
    }

    #[test]
    fn test_distribution_always_has_others() {
        let movies = vec![Movie {
            language: vec!["English".to_string(), "Italian".to_string()],
            ..movie(1)
        }];

        let histogram = language_distribution(&movies);

        assert_eq!(histogram.labels(), vec!["English", "Italian", OTHERS_LABEL]);
        assert_eq!(histogram.get(OTHERS_LABEL), Some(0));
    }

    #[test]
    fn test_works_on_borrowed_subsets() {
        let movies = vec![with_genres(1, &["Drama"]), with_genres(2, &["Comedy"])];
        let subset: Vec<&Movie> = movies.iter().skip(1).collect();

        let histogram = genre_histogram(&subset);

        assert_eq!(histogram.labels(), vec!["Comedy"]);
    }

    #[test]
    fn test_oscar_stats_by_year() {
        let movies = vec![
            Movie {
                year: 1994,
                oscar_nominations: 7,
                ..movie(1)
            },
            Movie {
                year: 1972,
                oscar_nominations: 11,
                oscar_winning: 3,
                ..movie(2)
            },
            Movie {
                year: 1994,
                oscar_nominations: 7,
                oscar_winning: 6,
                ..movie(3)
            },
            Movie {
                year: 0,
                oscar_nominations: 2,
                ..movie(4)
            },
        ];

        let stats = oscar_stats_by_year(&movies);

        assert_eq!(
            stats,
            vec![
                OscarYearStats {
                    year: 1972,
                    nominations: 11,
                    wins: 3
                },
                OscarYearStats {
                    year: 1994,
                    nominations: 14,
                    wins: 6
                },
            ]
        );
    }

    #[test]
    fn test_chart_kind_selection() {
        assert_eq!(ChartKind::from_selection("years"), ChartKind::Years);
        assert_eq!(ChartKind::from_selection("pie"), ChartKind::Ratings);
        assert_eq!(
            "pie".parse::<ChartKind>(),
            Err(UnknownSelection::new("chart kind", "pie"))
        );
        assert_eq!(ChartKind::Oscars.title(), "Movie Distribution by Oscars");

        let chart = ChartKind::Oscars.render::<Movie>(&[]);
        assert_eq!(chart.histogram.counts(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_tally_keeps_first_seen_order() {
        let counts = tally(["b", "a", "b", "c", "a"]);
        assert_eq!(counts, vec![("b", 2), ("a", 2), ("c", 1)]);
        let ranked = rank_by_count(counts);
        assert_eq!(ranked, vec![("b", 2), ("a", 2), ("c", 1)]);
    }
}
