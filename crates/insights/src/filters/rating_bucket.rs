//! Filter on IMDb rating band.
//!
//! Bands are half-open: a 9.0 belongs to "9.0+", an 8.95 to "8.0-8.9".

use crate::criteria::RatingBucket;
use crate::traits::Filter;
use data_loader::Movie;

/// Keeps movies whose rating falls inside one [`RatingBucket`].
pub struct RatingBucketFilter {
    bucket: RatingBucket,
}

impl RatingBucketFilter {
    pub fn new(bucket: RatingBucket) -> Self {
        Self { bucket }
    }
}

impl Filter for RatingBucketFilter {
    fn name(&self) -> &str {
        "RatingBucketFilter"
    }

    fn matches(&self, movie: &Movie) -> bool {
        self.bucket.contains(movie.imdb_rating)
    }
}
