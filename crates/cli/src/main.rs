use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use data_loader::{Movie, MovieStore};
use insights::details::NOT_AVAILABLE;
use insights::ranking::{oscar_label, rating_label};
use insights::{
    Dashboard, Facet, FilterCriteria, Histogram, MovieDetails, RankingTab,
    TopPerformers, find_movie,
};
use rand::Rng;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Width of the longest bar in text charts
const BAR_WIDTH: usize = 40;

/// MovieDash - Movie dashboard insights from the terminal
#[derive(Parser)]
#[command(name = "movie-dash")]
#[command(about = "Filter, chart and rank a movie dataset", long_about = None)]
struct Cli {
    /// Path to the movie dataset (JSON)
    #[arg(short, long, env = "MOVIE_DASH_DATA", default_value = "data/movies.json")]
    data_file: PathBuf,

    /// Print views as JSON instead of formatted text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Filter selections, one per dropdown
#[derive(Args, Debug, Default)]
struct CriteriaArgs {
    /// Release year
    #[arg(long)]
    year: Option<String>,

    /// Genre, e.g. "Drama"
    #[arg(long)]
    genre: Option<String>,

    /// Rating bucket: 9, 8, 7 or 6 (or a label such as "8.0-8.9")
    #[arg(long)]
    rating: Option<String>,

    /// Production country
    #[arg(long)]
    country: Option<String>,

    /// Spoken language
    #[arg(long)]
    language: Option<String>,
}

impl CriteriaArgs {
    fn to_criteria(&self) -> FilterCriteria {
        let mut criteria = FilterCriteria::new();
        let fields = [
            ("year", &self.year),
            ("genre", &self.genre),
            ("ratingBucket", &self.rating),
            ("country", &self.country),
            ("language", &self.language),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                criteria.set(key, value);
            }
        }
        criteria
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show the options available for each filter
    Facets,

    /// List movies matching the filters
    Filter {
        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Show a distribution chart over the filtered movies
    Chart {
        /// Chart to draw: ratings, genres, years or oscars
        #[arg(long, default_value = "ratings")]
        kind: String,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Show country and language distributions
    Insights {
        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Show Oscar nominations and wins per year across the whole dataset
    Oscars,

    /// Show a top-5 list
    Top {
        /// List to show: ratings, oscars or actors
        #[arg(long, default_value = "ratings")]
        tab: String,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Show details of one movie
    Details {
        /// Movie ID to display
        #[arg(long)]
        id: String,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },

    /// Run benchmark to test render performance
    Benchmark {
        /// Number of renders to time
        #[arg(long, default_value = "100")]
        iterations: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let start = Instant::now();
    let store = Arc::new(
        MovieStore::load_from_file(&cli.data_file)
            .with_context(|| format!("Failed to load movie dataset from {}", cli.data_file.display()))?,
    );
    if !cli.json {
        println!(
            "{} Loaded {} movies in {:?}",
            "✓".green(),
            store.len(),
            start.elapsed()
        );
    }

    let json = cli.json;
    let mut dashboard = Dashboard::new(store);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Facets => handle_facets(&dashboard, json)?,
        Commands::Filter { criteria } => {
            dashboard.set_criteria(criteria.to_criteria());
            handle_filter(&dashboard, json)?
        }
        Commands::Chart { kind, criteria } => {
            dashboard.set_criteria(criteria.to_criteria());
            dashboard.select_chart(&kind);
            handle_chart(&dashboard, json)?
        }
        Commands::Insights { criteria } => {
            dashboard.set_criteria(criteria.to_criteria());
            handle_insights(&dashboard, json)?
        }
        Commands::Oscars => handle_oscars(&dashboard, json)?,
        Commands::Top { tab, criteria } => {
            dashboard.set_criteria(criteria.to_criteria());
            dashboard.select_tab(&tab);
            handle_top(&dashboard, json)?
        }
        Commands::Details { id, criteria } => {
            dashboard.set_criteria(criteria.to_criteria());
            handle_details(&dashboard, &id, json)?
        }
        Commands::Benchmark { iterations } => handle_benchmark(&mut dashboard, iterations)?,
    }

    Ok(())
}

/// Handle the 'facets' command
fn handle_facets(dashboard: &Dashboard, json: bool) -> Result<()> {
    let facets = dashboard.facets();
    if json {
        return print_json(facets);
    }

    println!("{}", "Filter options:".bold().blue());
    let years: Vec<String> = facets.years.iter().map(|y| y.to_string()).collect();
    println!("{}Year: {}", "• ".green(), years.join(", "));
    for facet in [Facet::Genre, Facet::Country, Facet::Language] {
        println!(
            "{}{}: {}",
            "• ".green(),
            facet,
            facets.options(facet).join(", ")
        );
    }
    Ok(())
}

/// Handle the 'filter' command
fn handle_filter(dashboard: &Dashboard, json: bool) -> Result<()> {
    let movies = dashboard.filtered();
    if json {
        return print_json(&movies);
    }

    print_criteria(dashboard.criteria());
    if movies.is_empty() {
        println!("{}", "No movies match the current filters.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("{} matching movies:", movies.len()).bold().blue()
    );
    for movie in &movies {
        print_movie_line(movie);
    }
    Ok(())
}

/// Handle the 'chart' command
fn handle_chart(dashboard: &Dashboard, json: bool) -> Result<()> {
    let view = dashboard.render();
    if json {
        return print_json(&view.chart);
    }

    print_criteria(dashboard.criteria());
    print_histogram(&view.chart.title, &view.chart.histogram);
    Ok(())
}

/// Handle the 'insights' command
fn handle_insights(dashboard: &Dashboard, json: bool) -> Result<()> {
    let view = dashboard.render();
    if json {
        #[derive(Serialize)]
        struct Distributions<'a> {
            countries: &'a Histogram,
            languages: &'a Histogram,
        }
        return print_json(&Distributions {
            countries: &view.country_distribution,
            languages: &view.language_distribution,
        });
    }

    print_criteria(dashboard.criteria());
    print_histogram("Countries", &view.country_distribution);
    println!();
    print_histogram("Languages", &view.language_distribution);
    Ok(())
}

/// Handle the 'oscars' command
fn handle_oscars(dashboard: &Dashboard, json: bool) -> Result<()> {
    let view = dashboard.render();
    if json {
        return print_json(&view.oscar_stats);
    }

    println!("{}", "Oscar nominations and wins by year:".bold().blue());
    if view.oscar_stats.is_empty() {
        println!("{}", "No data.".yellow());
    }
    for stats in &view.oscar_stats {
        println!(
            "{}  {:>3} nominations  {:>3} wins",
            stats.year.to_string().green(),
            stats.nominations,
            stats.wins
        );
    }
    Ok(())
}

/// Handle the 'top' command
fn handle_top(dashboard: &Dashboard, json: bool) -> Result<()> {
    let view = dashboard.render();
    let tab = view.ranking_tab;
    if json {
        return print_json(&view.top_performers);
    }

    print_criteria(dashboard.criteria());
    print_top_performers(tab, &view.top_performers);
    Ok(())
}

/// Handle the 'details' command
fn handle_details(dashboard: &Dashboard, id: &str, json: bool) -> Result<()> {
    let filtered = dashboard.filtered();
    let movie = find_movie(&filtered, id)
        .ok_or_else(|| anyhow!("Movie {} not found among the filtered movies", id))?;
    let details = MovieDetails::from_movie(movie);
    if json {
        return print_json(&details);
    }

    print_details(&details);
    Ok(())
}

/// Handle the 'benchmark' command
///
/// Each iteration picks random criteria from the facet catalog, as a user
/// clicking through the dropdowns would, and times a full render.
fn handle_benchmark(dashboard: &mut Dashboard, iterations: usize) -> Result<()> {
    if iterations == 0 {
        return Err(anyhow!("Benchmark needs at least one iteration"));
    }

    let facets = dashboard.facets().clone();
    let years: Vec<String> = facets.years.iter().map(|y| y.to_string()).collect();
    let ratings = ["9", "8", "7", "6"].map(String::from);
    let choices: [(&str, &[String]); 5] = [
        ("year", &years),
        ("genre", &facets.genres),
        ("ratingBucket", &ratings),
        ("country", &facets.countries),
        ("language", &facets.languages),
    ];

    let mut rng = rand::rng();
    let mut timings: Vec<Duration> = Vec::with_capacity(iterations);
    let mut matched = 0usize;
    for _ in 0..iterations {
        dashboard.reset_filters();
        for (key, options) in &choices {
            if let Some(value) = pick_option(&mut rng, options) {
                dashboard.set_filter(key, value);
            }
        }

        let start = Instant::now();
        let view = dashboard.render();
        timings.push(start.elapsed());
        matched += view.filtered_count;
    }

    // Calculate and display statistics
    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = timings[timings.len() / 2];
    let p95 = timings[((timings.len() as f32 * 0.95) as usize).min(timings.len() - 1)];
    let p99 = timings[((timings.len() as f32 * 0.99) as usize).min(timings.len() - 1)];
    let throughput = iterations as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Renders: {}", iterations);
    println!("Average filtered size: {:.1}", matched as f32 / iterations as f32);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} renders/second", throughput);

    Ok(())
}

/// A uniformly chosen option, or `None` for roughly half the calls so
/// about half the filters stay unset
fn pick_option<'a, R: Rng + ?Sized>(rng: &mut R, options: &'a [String]) -> Option<&'a str> {
    if options.is_empty() || rng.random_bool(0.5) {
        return None;
    }
    Some(options[rng.random_range(0..options.len())].as_str())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", output);
    Ok(())
}

fn print_criteria(criteria: &FilterCriteria) {
    if criteria.is_empty() {
        return;
    }

    let mut active = Vec::new();
    if let Some(year) = criteria.year {
        active.push(format!("year={}", year));
    }
    if let Some(genre) = &criteria.genre {
        active.push(format!("genre={}", genre));
    }
    if let Some(bucket) = criteria.rating_bucket {
        active.push(format!("rating={}", bucket.label()));
    }
    if let Some(country) = &criteria.country {
        active.push(format!("country={}", country));
    }
    if let Some(language) = &criteria.language {
        active.push(format!("language={}", language));
    }
    println!("{} {}", "Filters:".dimmed(), active.join(", "));
}

fn print_movie_line(movie: &Movie) {
    println!(
        "{}. {} ({}) [{}] {}",
        movie.id.to_string().green(),
        movie.title,
        movie.year,
        movie.genre.join(", "),
        rating_label(movie).yellow()
    );
}

/// Horizontal bar chart, scaled so the largest bucket fills `BAR_WIDTH`
fn print_histogram(title: &str, histogram: &Histogram) {
    println!("{}", title.bold().blue());

    let max = histogram.counts().into_iter().max().unwrap_or(0);
    let label_width = histogram
        .labels()
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);

    for bucket in &histogram.buckets {
        let bar_len = if max == 0 {
            0
        } else {
            (bucket.count * BAR_WIDTH).div_ceil(max)
        };
        println!(
            "{:<width$} {} {}",
            bucket.label,
            "█".repeat(bar_len).cyan(),
            bucket.count,
            width = label_width
        );
    }
}

fn print_top_performers(tab: RankingTab, top: &TopPerformers<'_>) {
    println!("{}", tab.heading().bold().blue());

    match tab {
        RankingTab::Ratings => print_movie_ranking(&top.top_rated, rating_label),
        RankingTab::Oscars => print_movie_ranking(&top.top_oscar_winners, oscar_label),
        RankingTab::Actors => {
            if top.top_actors.is_empty() {
                println!("{}", "No cast information.".yellow());
            }
            for (rank, credits) in top.top_actors.iter().enumerate() {
                println!(
                    "{}. {} - {}",
                    (rank + 1).to_string().green(),
                    credits.actor,
                    credits.metric_label().yellow()
                );
            }
        }
    }
}

fn print_movie_ranking(movies: &[&Movie], metric: fn(&Movie) -> String) {
    if movies.is_empty() {
        println!("{}", "No movies match the current filters.".yellow());
    }
    for (rank, movie) in movies.iter().enumerate() {
        println!(
            "{}. {} ({}) - {}",
            (rank + 1).to_string().green(),
            movie.title,
            movie.year,
            metric(movie).yellow()
        );
    }
}

fn print_details(details: &MovieDetails) {
    let list = |values: &[String]| {
        if values.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            values.join(", ")
        }
    };

    println!(
        "{}",
        format!("{} ({})", details.title, details.year).bold().blue()
    );
    println!("{}Director: {}", "• ".green(), details.director);
    println!("{}IMDb rating: {:.1}", "• ".green(), details.imdb_rating);
    println!("{}Runtime: {}", "• ".green(), details.runtime);
    println!("{}Box office: {}", "• ".green(), details.box_office);
    println!("{}Genres: {}", "• ".cyan(), list(&details.genres));
    println!("{}Countries: {}", "• ".cyan(), list(&details.countries));
    println!("{}Languages: {}", "• ".cyan(), list(&details.languages));
    println!("{}Cast: {}", "• ".cyan(), list(&details.cast));
    println!(
        "{}Oscars: {} nominations, {} wins",
        "• ".cyan(),
        details.oscar_nominations,
        details.oscar_wins
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use insights::{ChartKind, RatingBucket};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_pick_option_covers_every_option() {
        let mut rng = StdRng::seed_from_u64(7);
        let options: Vec<String> = ["Drama", "Crime", "War"].map(String::from).to_vec();

        let mut seen = [0usize; 3];
        let mut unset = 0;
        for _ in 0..600 {
            match pick_option(&mut rng, &options) {
                Some(value) => {
                    let index = options.iter().position(|o| o == value).unwrap();
                    seen[index] += 1;
                }
                None => unset += 1,
            }
        }

        assert!(seen.iter().all(|&count| count > 50), "{:?}", seen);
        assert!(unset > 200 && unset < 400, "{}", unset);
        assert_eq!(pick_option(&mut rng, &[]), None);
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_criteria_args() {
        let args = CriteriaArgs {
            year: Some("1994".to_string()),
            rating: Some("8.0-8.9".to_string()),
            country: Some(String::new()),
            ..Default::default()
        };

        let criteria = args.to_criteria();

        assert_eq!(criteria.year, Some(1994));
        assert_eq!(criteria.rating_bucket, Some(RatingBucket::Eight));
        assert_eq!(criteria.country, None);
        assert_eq!(criteria.genre, None);
    }

    #[test]
    fn test_parse_chart_command() {
        let cli = Cli::try_parse_from([
            "movie-dash",
            "--json",
            "chart",
            "--kind",
            "genres",
            "--year",
            "1972",
        ])
        .unwrap();

        assert!(cli.json);
        match cli.command {
            Commands::Chart { kind, criteria } => {
                assert_eq!(kind, "genres");
                assert_eq!(criteria.year.as_deref(), Some("1972"));
                assert_eq!(ChartKind::from_selection(&kind), ChartKind::Genres);
            }
            _ => panic!("expected chart command"),
        }
    }
}
