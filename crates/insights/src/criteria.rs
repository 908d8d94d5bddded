//! Filter criteria chosen by the user.
//!
//! Raw selections arrive as strings (option values from the filter
//! panel). They are parsed into typed form once, when a field is set, so
//! the filters never compare strings against numbers.

use crate::error::UnknownSelection;
use serde::Serialize;
use std::str::FromStr;
use tracing::debug;

/// The four IMDb rating bands offered by the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RatingBucket {
    /// 9.0 and above
    NinePlus,
    /// [8.0, 9.0)
    Eight,
    /// [7.0, 8.0)
    Seven,
    /// below 7.0
    BelowSeven,
}

impl RatingBucket {
    pub const ALL: [RatingBucket; 4] = [
        RatingBucket::NinePlus,
        RatingBucket::Eight,
        RatingBucket::Seven,
        RatingBucket::BelowSeven,
    ];

    pub fn contains(self, rating: f64) -> bool {
        match self {
            RatingBucket::NinePlus => rating >= 9.0,
            RatingBucket::Eight => (8.0..9.0).contains(&rating),
            RatingBucket::Seven => (7.0..8.0).contains(&rating),
            RatingBucket::BelowSeven => rating < 7.0,
        }
    }

    /// Display label used in the rating dropdown
    pub fn label(self) -> &'static str {
        match self {
            RatingBucket::NinePlus => "9.0+",
            RatingBucket::Eight => "8.0-8.9",
            RatingBucket::Seven => "7.0-7.9",
            RatingBucket::BelowSeven => "< 7.0",
        }
    }

    /// Option value submitted by the rating dropdown
    pub fn value(self) -> &'static str {
        match self {
            RatingBucket::NinePlus => "9",
            RatingBucket::Eight => "8",
            RatingBucket::Seven => "7",
            RatingBucket::BelowSeven => "6",
        }
    }
}

impl FromStr for RatingBucket {
    type Err = UnknownSelection;

    /// Accepts either the option value ("9") or the label ("9.0+")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RatingBucket::ALL
            .into_iter()
            .find(|bucket| bucket.value() == s || bucket.label() == s)
            .ok_or_else(|| UnknownSelection::new("rating bucket", s))
    }
}

/// Keys the filter panel knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    Year,
    Genre,
    RatingBucket,
    Country,
    Language,
}

impl FromStr for FilterKey {
    type Err = UnknownSelection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "year" => Ok(FilterKey::Year),
            "genre" => Ok(FilterKey::Genre),
            "ratingBucket" | "rating" => Ok(FilterKey::RatingBucket),
            "country" => Ok(FilterKey::Country),
            "language" => Ok(FilterKey::Language),
            other => Err(UnknownSelection::new("filter key", other)),
        }
    }
}

/// Current filter selections. `None` means "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub rating_bucket: Option<RatingBucket>,
    pub country: Option<String>,
    pub language: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style year constraint
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    pub fn with_rating_bucket(mut self, bucket: RatingBucket) -> Self {
        self.rating_bucket = Some(bucket);
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Apply one raw selection from the UI.
    ///
    /// An empty value clears the field. Unknown keys and values that do
    /// not parse (a non-numeric year, an unknown rating bucket) leave the
    /// field unset rather than excluding everything.
    pub fn set(&mut self, key: &str, value: &str) {
        match key.parse::<FilterKey>() {
            Ok(key) => self.set_field(key, value),
            Err(e) => debug!("Ignoring filter update: {}", e),
        }
    }

    /// Typed-key variant of [`FilterCriteria::set`]
    pub fn set_field(&mut self, key: FilterKey, value: &str) {
        let value = value.trim();
        let text = (!value.is_empty()).then(|| value.to_string());

        match key {
            FilterKey::Year => {
                self.year = text.as_deref().and_then(|v| v.parse().ok());
                if text.is_some() && self.year.is_none() {
                    debug!("Ignoring unparseable year {:?}", value);
                }
            }
            FilterKey::Genre => self.genre = text,
            FilterKey::RatingBucket => {
                self.rating_bucket = text.as_deref().and_then(|v| v.parse().ok());
                if text.is_some() && self.rating_bucket.is_none() {
                    debug!("Ignoring unknown rating bucket {:?}", value);
                }
            }
            FilterKey::Country => self.country = text,
            FilterKey::Language => self.language = text,
        }
    }

    /// Clear every field
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when no field constrains the dataset
    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.genre.is_none()
            && self.rating_bucket.is_none()
            && self.country.is_none()
            && self.language.is_none()
    }
}
