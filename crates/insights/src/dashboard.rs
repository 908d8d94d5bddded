//! # Dashboard
//!
//! Holds the user's current selections over a shared, read-only store and
//! turns them into a complete set of views on demand:
//! 1. Filter the dataset by the current criteria
//! 2. Build the selected chart over the filtered movies
//! 3. Build country and language distributions
//! 4. Rank top performers
//! 5. Resolve the selected movie against the filtered set
//!
//! Nothing is cached between renders. Every event handler only updates
//! selections; `render` recomputes everything from scratch.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, instrument};

use data_loader::{Movie, MovieStore};

use crate::criteria::FilterCriteria;
use crate::details::{MovieDetails, find_movie};
use crate::facets::FacetCatalog;
use crate::filter_pipeline::FilterPipeline;
use crate::histogram::{
    Chart, ChartKind, Histogram, OscarYearStats, country_distribution, language_distribution,
    oscar_stats_by_year,
};
use crate::ranking::{RankingTab, TopPerformers};

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    /// Dropdown options, from the full dataset
    pub facets: FacetCatalog,
    /// Nominations and wins per year, from the full dataset
    pub oscar_stats: Vec<OscarYearStats>,
    pub total_count: usize,
    pub filtered_count: usize,
    pub chart: Chart,
    pub country_distribution: Histogram,
    pub language_distribution: Histogram,
    pub ranking_tab: RankingTab,
    pub top_performers: TopPerformers<'a>,
    pub selected_movie: Option<MovieDetails>,
}

impl DashboardView<'_> {
    /// True when the filters matched nothing and the UI should show "no results"
    pub fn has_no_results(&self) -> bool {
        self.filtered_count == 0
    }
}

/// UI state for the movies dashboard
pub struct Dashboard {
    store: Arc<MovieStore>,
    facets: FacetCatalog,
    criteria: FilterCriteria,
    chart: ChartKind,
    ranking_tab: RankingTab,
    selected_movie: Option<String>,
}

impl Dashboard {
    /// Create a dashboard with no filters, the ratings chart and the
    /// top-rated tab selected
    pub fn new(store: Arc<MovieStore>) -> Self {
        let facets = FacetCatalog::build(store.movies());
        Self {
            store,
            facets,
            criteria: FilterCriteria::default(),
            chart: ChartKind::default(),
            ranking_tab: RankingTab::default(),
            selected_movie: None,
        }
    }

    /// Swap in a new dataset. Facets are rebuilt; criteria are kept and a
    /// value no longer present simply matches nothing.
    pub fn replace_store(&mut self, store: Arc<MovieStore>) {
        self.facets = FacetCatalog::build(store.movies());
        self.store = store;
        self.selected_movie = None;
    }

    pub fn store(&self) -> &Arc<MovieStore> {
        &self.store
    }

    pub fn facets(&self) -> &FacetCatalog {
        &self.facets
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn chart(&self) -> ChartKind {
        self.chart
    }

    pub fn ranking_tab(&self) -> RankingTab {
        self.ranking_tab
    }

    // Event handlers

    /// Update one filter field from a raw UI value
    pub fn set_filter(&mut self, key: &str, value: &str) {
        self.criteria.set(key, value);
        self.selected_movie = None;
    }

    /// Replace all criteria at once
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.selected_movie = None;
    }

    pub fn reset_filters(&mut self) {
        self.criteria.reset();
        self.selected_movie = None;
    }

    pub fn select_chart(&mut self, selection: &str) {
        self.chart = ChartKind::from_selection(selection);
    }

    pub fn select_tab(&mut self, selection: &str) {
        self.ranking_tab = RankingTab::from_selection(selection);
    }

    /// Select a movie by raw id; an empty selection clears it
    pub fn select_movie(&mut self, selection: &str) {
        let selection = selection.trim();
        self.selected_movie = (!selection.is_empty()).then(|| selection.to_string());
    }

    // Derived views

    /// Movies matching the current criteria, in dataset order
    pub fn filtered(&self) -> Vec<&Movie> {
        FilterPipeline::from_criteria(&self.criteria).apply(self.store.movies())
    }

    /// Recompute every view from the store and current selections
    #[instrument(skip(self), fields(chart = self.chart.id(), tab = self.ranking_tab.id()))]
    pub fn render(&self) -> DashboardView<'_> {
        let start = Instant::now();
        let all = self.store.movies();
        let filtered = self.filtered();

        let selected_movie = self
            .selected_movie
            .as_deref()
            .and_then(|selection| find_movie(&filtered, selection))
            .map(MovieDetails::from_movie);

        let view = DashboardView {
            facets: self.facets.clone(),
            oscar_stats: oscar_stats_by_year(all),
            total_count: all.len(),
            filtered_count: filtered.len(),
            chart: self.chart.render(&filtered),
            country_distribution: country_distribution(&filtered),
            language_distribution: language_distribution(&filtered),
            ranking_tab: self.ranking_tab,
            top_performers: TopPerformers::compute(&filtered),
            selected_movie,
        };

        debug!(
            "Rendered dashboard: {} of {} movies in {:?}",
            view.filtered_count,
            view.total_count,
            start.elapsed()
        );
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> Arc<MovieStore> {
        let movies = vec![
            Movie {
                year: 1994,
                imdb_rating: 9.3,
                oscar_nominations: 7,
                genre: vec!["Drama".to_string()],
                country: vec!["United States".to_string()],
                language: vec!["English".to_string()],
                cast: vec!["Tim Robbins".to_string(), "Morgan Freeman".to_string()],
                ..Movie::new(1, "The Shawshank Redemption")
            },
            Movie {
                year: 1972,
                imdb_rating: 9.2,
                oscar_nominations: 11,
                oscar_winning: 3,
                genre: vec!["Crime".to_string(), "Drama".to_string()],
                country: vec!["United States".to_string()],
                language: vec!["English".to_string(), "Italian".to_string()],
                cast: vec!["Marlon Brando".to_string(), "Al Pacino".to_string()],
                ..Movie::new(2, "The Godfather")
            },
        ];
        Arc::new(MovieStore::from_movies(movies).unwrap())
    }

    #[test]
    fn test_default_render() {
        let dashboard = Dashboard::new(create_test_store());
        let view = dashboard.render();

        assert_eq!(view.total_count, 2);
        assert_eq!(view.filtered_count, 2);
        assert_eq!(view.chart.kind, ChartKind::Ratings);
        assert_eq!(view.facets.years, vec![1994, 1972]);
        assert_eq!(view.top_performers.top_rated[0].title, "The Shawshank Redemption");
        assert!(view.selected_movie.is_none());
    }

    #[test]
    fn test_filter_narrows_views_but_not_facets() {
        let mut dashboard = Dashboard::new(create_test_store());
        dashboard.set_filter("genre", "Crime");

        let view = dashboard.render();

        assert_eq!(view.filtered_count, 1);
        assert_eq!(view.facets.genres, vec!["Crime", "Drama"]);
        assert_eq!(view.language_distribution.get("Italian"), Some(1));
        // Oscar statistics always cover the full dataset
        assert_eq!(view.oscar_stats.len(), 2);
    }

    #[test]
    fn test_selection_cleared_on_filter_change() {
        let mut dashboard = Dashboard::new(create_test_store());
        dashboard.select_movie("1");
        assert_eq!(
            dashboard.render().selected_movie.unwrap().title,
            "The Shawshank Redemption"
        );

        dashboard.set_filter("year", "1972");
        assert!(dashboard.render().selected_movie.is_none());
    }

    #[test]
    fn test_selection_must_be_in_filtered_set() {
        let mut dashboard = Dashboard::new(create_test_store());
        dashboard.set_filter("year", "1972");
        dashboard.select_movie("1");

        assert!(dashboard.render().selected_movie.is_none());
    }

    #[test]
    fn test_reset_and_no_results() {
        let mut dashboard = Dashboard::new(create_test_store());
        dashboard.set_filter("country", "France");
        assert!(dashboard.render().has_no_results());

        dashboard.reset_filters();
        assert!(dashboard.criteria().is_empty());
        assert_eq!(dashboard.render().filtered_count, 2);
    }

    #[test]
    fn test_chart_and_tab_selection() {
        let mut dashboard = Dashboard::new(create_test_store());
        dashboard.select_chart("oscars");
        dashboard.select_tab("actors");

        let view = dashboard.render();
        assert_eq!(view.chart.kind, ChartKind::Oscars);
        assert_eq!(view.chart.histogram.counts(), vec![0, 0, 0, 2]);
        assert_eq!(view.ranking_tab, RankingTab::Actors);

        dashboard.select_chart("bogus");
        assert_eq!(dashboard.chart(), ChartKind::Ratings);
    }

    #[test]
    fn test_replace_store_rebuilds_facets() {
        let mut dashboard = Dashboard::new(create_test_store());
        dashboard.set_filter("genre", "Drama");

        dashboard.replace_store(Arc::new(MovieStore::new()));

        let view = dashboard.render();
        assert!(view.facets.is_empty());
        assert_eq!(view.filtered_count, 0);
        assert_eq!(dashboard.criteria().genre.as_deref(), Some("Drama"));
    }
}
