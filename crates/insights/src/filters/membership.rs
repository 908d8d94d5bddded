//! Filter on list-valued facets (genre, country, language).
//!
//! A movie with several genres matches a genre criterion if any one of
//! them equals the selected value. Comparison is exact and case-sensitive.

use crate::facets::Facet;
use crate::traits::Filter;
use data_loader::Movie;

/// Keeps movies whose `facet` list contains `value`.
pub struct MembershipFilter {
    facet: Facet,
    value: String,
    name: String,
}

impl MembershipFilter {
    pub fn new(facet: Facet, value: impl Into<String>) -> Self {
        Self {
            facet,
            value: value.into(),
            name: format!("{}Filter", facet.label()),
        }
    }

    pub fn genre(value: impl Into<String>) -> Self {
        Self::new(Facet::Genre, value)
    }

    pub fn country(value: impl Into<String>) -> Self {
        Self::new(Facet::Country, value)
    }

    pub fn language(value: impl Into<String>) -> Self {
        Self::new(Facet::Language, value)
    }
}

impl Filter for MembershipFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, movie: &Movie) -> bool {
        self.facet.values(movie).iter().any(|v| *v == self.value)
    }
}
