//! Filter implementations for the criteria pipeline.
//!
//! One filter per kind of criterion; a FilterPipeline holds one
//! instance for every criterion the user has set.

pub mod membership;
pub mod rating_bucket;
pub mod year;

// Re-export for convenience
pub use membership::MembershipFilter;
pub use rating_bucket::RatingBucketFilter;
pub use year::YearFilter;
