//! The FilterPipeline chains one filter per set criterion.
//!
//! Filters run in sequence over borrowed records. Because every stage
//! keeps order and the criteria are ANDed, running them one after another
//! gives the same subsequence as testing all criteria per movie.

use crate::criteria::FilterCriteria;
use crate::filters::{MembershipFilter, RatingBucketFilter, YearFilter};
use crate::traits::Filter;
use data_loader::Movie;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(YearFilter::new(1994))
///     .add_filter(MembershipFilter::genre("Drama"));
///
/// let filtered = pipeline.apply(store.movies());
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Build the pipeline for a set of criteria.
    ///
    /// Unset fields contribute no filter, so empty criteria yield an
    /// empty pipeline that passes everything through.
    pub fn from_criteria(criteria: &FilterCriteria) -> Self {
        let mut pipeline = Self::new();

        if let Some(year) = criteria.year {
            pipeline = pipeline.add_filter(YearFilter::new(year));
        }
        if let Some(genre) = &criteria.genre {
            pipeline = pipeline.add_filter(MembershipFilter::genre(genre.as_str()));
        }
        if let Some(bucket) = criteria.rating_bucket {
            pipeline = pipeline.add_filter(RatingBucketFilter::new(bucket));
        }
        if let Some(country) = &criteria.country {
            pipeline = pipeline.add_filter(MembershipFilter::country(country.as_str()));
        }
        if let Some(language) = &criteria.language {
            pipeline = pipeline.add_filter(MembershipFilter::language(language.as_str()));
        }

        pipeline
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the dataset.
    ///
    /// # Returns
    /// The matching movies, borrowed from `movies`, in dataset order
    pub fn apply<'a>(&self, movies: &'a [Movie]) -> Vec<&'a Movie> {
        let mut current: Vec<&Movie> = movies.iter().collect();
        for filter in &self.filters {
            debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Filter a dataset by criteria in one call
pub fn filter_movies<'a>(movies: &'a [Movie], criteria: &FilterCriteria) -> Vec<&'a Movie> {
    FilterPipeline::from_criteria(criteria).apply(movies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::RatingBucket;

    fn create_test_movies() -> Vec<Movie> {
        vec![
            Movie {
                year: 1994,
                imdb_rating: 9.3,
                genre: vec!["Drama".to_string()],
                country: vec!["United States".to_string()],
                ..Movie::new(1, "The Shawshank Redemption")
            },
            Movie {
                year: 1972,
                imdb_rating: 9.2,
                genre: vec!["Crime".to_string(), "Drama".to_string()],
                country: vec!["United States".to_string()],
                ..Movie::new(2, "The Godfather")
            },
            Movie {
                year: 1994,
                imdb_rating: 8.9,
                genre: vec!["Crime".to_string()],
                country: vec!["United States".to_string()],
                ..Movie::new(3, "Pulp Fiction")
            },
        ]
    }

    #[test]
    fn test_empty_pipeline() {
        let movies = create_test_movies();
        let pipeline = FilterPipeline::new();

        let filtered = pipeline.apply(&movies);
        assert_eq!(filtered.len(), 3);
        assert!(pipeline.is_empty());
    }

    #[test]
    fn test_single_filter() {
        let movies = create_test_movies();
        let pipeline = FilterPipeline::new().add_filter(YearFilter::new(1972));

        let filtered = pipeline.apply(&movies);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "The Godfather");
    }

    #[test]
    fn test_from_criteria_builds_one_filter_per_field() {
        let criteria = FilterCriteria::new()
            .with_year(1994)
            .with_genre("Crime")
            .with_rating_bucket(RatingBucket::Eight);

        let pipeline = FilterPipeline::from_criteria(&criteria);
        assert_eq!(pipeline.len(), 3);

        let movies = create_test_movies();
        let filtered = pipeline.apply(&movies);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title, "Pulp Fiction");
    }

    #[test]
    fn test_filter_movies_preserves_order() {
        let movies = create_test_movies();
        let criteria = FilterCriteria::new().with_country("United States");

        let titles: Vec<&str> = filter_movies(&movies, &criteria)
            .iter()
            .map(|m| m.title.as_str())
            .collect();

        assert_eq!(
            titles,
            vec!["The Shawshank Redemption", "The Godfather", "Pulp Fiction"]
        );
    }
}
