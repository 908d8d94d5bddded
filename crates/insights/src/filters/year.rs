//! Filter on exact release year.

use crate::traits::Filter;
use data_loader::Movie;

/// Keeps movies released in exactly `year`.
pub struct YearFilter {
    year: i32,
}

impl YearFilter {
    pub fn new(year: i32) -> Self {
        Self { year }
    }
}

impl Filter for YearFilter {
    fn name(&self) -> &str {
        "YearFilter"
    }

    fn matches(&self, movie: &Movie) -> bool {
        movie.year == self.year
    }
}
