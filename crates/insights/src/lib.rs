//! # Insights
//!
//! Filtering, aggregation and ranking over a loaded movie dataset.
//!
//! ## Architecture
//!
//! ```text
//! MovieStore ──► FilterPipeline (criteria) ──► filtered movies
//!     │                                            │
//!     ├─► FacetCatalog (dropdown options)          ├─► ChartKind::render
//!     └─► oscar_stats_by_year                      ├─► country / language distributions
//!                                                  ├─► TopPerformers
//!                                                  └─► MovieDetails
//! ```
//!
//! Every view is a pure function of its input slice. [`Dashboard`] ties the
//! current selections to a store and recomputes all views on `render`.

pub mod criteria;
pub mod dashboard;
pub mod details;
pub mod error;
pub mod facets;
pub mod filter_pipeline;
pub mod filters;
pub mod histogram;
pub mod ranking;
pub mod traits;

pub use criteria::{FilterCriteria, FilterKey, RatingBucket};
pub use dashboard::{Dashboard, DashboardView};
pub use details::{MovieDetails, find_movie, format_box_office};
pub use error::UnknownSelection;
pub use facets::{Facet, FacetCatalog};
pub use filter_pipeline::{FilterPipeline, filter_movies};
pub use histogram::{
    Bucket, Chart, ChartKind, Histogram, OTHERS_LABEL, OscarYearStats, country_distribution,
    genre_histogram, language_distribution, oscar_nomination_histogram, oscar_stats_by_year,
    rating_histogram, year_histogram,
};
pub use ranking::{ActorCredits, RankingTab, TOP_N, TopPerformers, top_actors, top_oscar_winners, top_rated};
pub use traits::Filter;
