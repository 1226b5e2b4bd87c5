//! Response formatting
//!
//! Maps `MovieRecord`s to the public JSON shape. Absent optional fields are
//! rendered as a string marker (`"unrated"` for rating, `"unknown"` for the
//! rest) so a consumer never mistakes them for zero.

use serde::Serialize;

use crate::query::Summary;
use crate::{MovieRecord, View};

/// Marker emitted for a missing rating
pub const UNRATED: &str = "unrated";
/// Marker emitted for any other missing value
pub const UNKNOWN: &str = "unknown";

/// A reported value or the marker standing in for it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Reported<T> {
    Value(T),
    Missing(&'static str),
}

impl<T> Reported<T> {
    fn from_option(value: Option<T>, marker: &'static str) -> Self {
        value.map_or(Reported::Missing(marker), Reported::Value)
    }
}

/// Public representation of one movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieView {
    pub id: Option<String>,
    pub title: String,
    pub genres: Vec<String>,
    pub rating: Reported<f64>,
    pub votes: Reported<u64>,
    pub opening_weekend_gross: Reported<u64>,
    pub currency: Reported<String>,
    pub release_year: Reported<i32>,
}

impl From<MovieRecord> for MovieView {
    fn from(record: MovieRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            genres: record.genres,
            rating: Reported::from_option(record.rating, UNRATED),
            votes: Reported::from_option(record.votes, UNKNOWN),
            opening_weekend_gross: Reported::from_option(record.opening_gross, UNKNOWN),
            currency: Reported::from_option(record.currency, UNKNOWN),
            release_year: Reported::from_option(record.release_year, UNKNOWN),
        }
    }
}

/// Body of every view endpoint
#[derive(Debug, Clone, Serialize)]
pub struct MoviesResponse {
    pub view: View,
    pub count: usize,
    pub movies: Vec<MovieView>,
}

/// Format records, preserving their order
pub fn format(view: View, records: Vec<MovieRecord>) -> MoviesResponse {
    let movies: Vec<MovieView> = records.into_iter().map(MovieView::from).collect();
    MoviesResponse {
        view,
        count: movies.len(),
        movies,
    }
}

/// Public representation of `Summary`
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub total_movies: usize,
    pub rated_movies: usize,
    pub average_rating: Reported<f64>,
    pub total_votes: u64,
    pub total_opening_gross: u64,
}

pub fn format_summary(summary: Summary) -> StatsResponse {
    StatsResponse {
        total_movies: summary.total_movies,
        rated_movies: summary.rated_movies,
        average_rating: Reported::from_option(summary.average_rating, UNRATED),
        total_votes: summary.total_votes,
        total_opening_gross: summary.total_opening_gross,
    }
}
