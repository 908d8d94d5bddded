//! Top-N rankings for the "Top Performers" panel.
//!
//! All three rankings use stable sorts, so movies (or actors) that tie
//! keep the order in which they appear in the input.

use crate::error::UnknownSelection;
use crate::histogram::{rank_by_count, tally};
use data_loader::Movie;
use serde::Serialize;
use std::cmp::Ordering;
use std::str::FromStr;

/// Entries per ranking list
pub const TOP_N: usize = 5;

/// An actor and the number of movies crediting them
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorCredits {
    pub actor: String,
    pub count: usize,
}

impl ActorCredits {
    /// "1 movie" / "4 movies"
    pub fn metric_label(&self) -> String {
        format!("{} movie{}", self.count, if self.count == 1 { "" } else { "s" })
    }
}

fn top_by<'a, F>(movies: impl IntoIterator<Item = &'a Movie>, compare: F) -> Vec<&'a Movie>
where
    F: Fn(&Movie, &Movie) -> Ordering,
{
    let mut ranked: Vec<&'a Movie> = movies.into_iter().collect();
    // slice::sort_by is stable
    ranked.sort_by(|a, b| compare(*a, *b));
    ranked.truncate(TOP_N);
    ranked
}

/// Highest IMDb ratings first
pub fn top_rated<'a>(movies: impl IntoIterator<Item = &'a Movie>) -> Vec<&'a Movie> {
    top_by(movies, |a, b| b.imdb_rating.total_cmp(&a.imdb_rating))
}

/// Most Oscar wins first; a missing win count was decoded as 0
pub fn top_oscar_winners<'a>(movies: impl IntoIterator<Item = &'a Movie>) -> Vec<&'a Movie> {
    top_by(movies, |a, b| b.oscar_winning.cmp(&a.oscar_winning))
}

/// Actors credited in the most movies
pub fn top_actors<'a>(movies: impl IntoIterator<Item = &'a Movie>) -> Vec<ActorCredits> {
    let credits = tally(
        movies
            .into_iter()
            .flat_map(|m| m.cast.iter().map(String::as_str)),
    );

    rank_by_count(credits)
        .into_iter()
        .take(TOP_N)
        .map(|(actor, count)| ActorCredits {
            actor: actor.to_string(),
            count,
        })
        .collect()
}

/// "★ 9.3"
pub fn rating_label(movie: &Movie) -> String {
    format!("★ {:.1}", movie.imdb_rating)
}

/// "1 Oscar" / "3 Oscars"
pub fn oscar_label(movie: &Movie) -> String {
    let wins = movie.oscar_winning;
    format!("{} Oscar{}", wins, if wins == 1 { "" } else { "s" })
}

/// Which ranking the Top Performers panel shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum RankingTab {
    #[default]
    Ratings,
    Oscars,
    Actors,
}

impl RankingTab {
    pub const ALL: [RankingTab; 3] = [RankingTab::Ratings, RankingTab::Oscars, RankingTab::Actors];

    /// Lenient parse for UI input; unknown tabs show top-rated
    pub fn from_selection(selection: &str) -> Self {
        selection.parse().unwrap_or_default()
    }

    pub fn id(self) -> &'static str {
        match self {
            RankingTab::Ratings => "ratings",
            RankingTab::Oscars => "oscars",
            RankingTab::Actors => "actors",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RankingTab::Ratings => "Top Rated",
            RankingTab::Oscars => "Oscar Wins",
            RankingTab::Actors => "Top Actors",
        }
    }

    pub fn heading(self) -> &'static str {
        match self {
            RankingTab::Ratings => "Highest IMDb Rated Movies",
            RankingTab::Oscars => "Most Oscar Wins",
            RankingTab::Actors => "Most Appearances",
        }
    }
}

impl FromStr for RankingTab {
    type Err = UnknownSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RankingTab::ALL
            .into_iter()
            .find(|tab| tab.id() == s.trim())
            .ok_or_else(|| UnknownSelection::new("ranking tab", s.trim()))
    }
}

/// All three rankings over one dataset
#[derive(Debug, Clone, Serialize)]
pub struct TopPerformers<'a> {
    pub top_rated: Vec<&'a Movie>,
    pub top_oscar_winners: Vec<&'a Movie>,
    pub top_actors: Vec<ActorCredits>,
}

impl<'a> TopPerformers<'a> {
    pub fn compute(movies: &[&'a Movie]) -> Self {
        Self {
            top_rated: top_rated(movies.iter().copied()),
            top_oscar_winners: top_oscar_winners(movies.iter().copied()),
            top_actors: top_actors(movies.iter().copied()),
        }
    }
}
