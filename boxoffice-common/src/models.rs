//! Normalized movie model
//!
//! A `MovieRecord` is built fresh from the upstream payload on every request
//! and dropped once the response is formatted. Optional fields use `Option`
//! so an absent value is never confused with zero.

use serde::Serialize;
use std::fmt;

/// One normalized movie
#[derive(Debug, Clone, PartialEq)]
pub struct MovieRecord {
    /// Provider identifier (e.g. `tt1234567`), if reported
    pub id: Option<String>,
    /// Display title, never empty
    pub title: String,
    /// Lower-cased, trimmed genre tags in upstream order
    pub genres: Vec<String>,
    /// Average rating in 0.0..=10.0, `None` when unrated
    pub rating: Option<f64>,
    /// Number of votes behind the rating
    pub votes: Option<u64>,
    /// Opening weekend gross in minor currency units (cents)
    pub opening_gross: Option<u64>,
    /// ISO currency code of `opening_gross`
    pub currency: Option<String>,
    pub release_year: Option<i32>,
}

impl MovieRecord {
    /// Create a record with only a title; every optional field absent
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            genres: Vec::new(),
            rating: None,
            votes: None,
            opening_gross: None,
            currency: None,
            release_year: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_genres<I, S>(mut self, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.genres = genres
            .into_iter()
            .map(|g| normalize_tag(g.as_ref()))
            .filter(|g| !g.is_empty())
            .collect();
        self
    }

    pub fn with_opening_gross(mut self, minor_units: u64) -> Self {
        self.opening_gross = Some(minor_units);
        self
    }
}

/// Canonical form of a genre tag used for matching
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

/// Derived views served over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Full normalized list in upstream order
    All,
    Rating,
    Genre,
    HighestOpening,
    Stats,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::All => "all",
            View::Rating => "rating",
            View::Genre => "genre",
            View::HighestOpening => "highest_opening",
            View::Stats => "stats",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
