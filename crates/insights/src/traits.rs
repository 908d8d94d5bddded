//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that lets each criterion be
//! expressed as its own small, composable predicate.

use data_loader::Movie;

/// Core trait for filtering movies.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across threads
/// - Filters borrow movies; they never clone or reorder them
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// True if `movie` satisfies this criterion
    fn matches(&self, movie: &Movie) -> bool;

    /// Keep the movies that match, preserving their relative order.
    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        movies
            .into_iter()
            .filter(|movie| self.matches(movie))
            .collect()
    }
}
