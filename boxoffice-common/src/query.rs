//! View queries over normalized records
//!
//! Every function here is pure: inputs are borrowed, never reordered in
//! place, and results depend only on the input sequence. All sorts are stable,
//! so ties keep upstream order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::normalize_tag;
use crate::MovieRecord;

/// Direction of the rating view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Records by rating, highest first, unrated last
pub fn rank_by_rating(records: &[MovieRecord]) -> Vec<MovieRecord> {
    rank_by_rating_ordered(records, SortOrder::Desc)
}

/// Records by rating in the given direction.
///
/// Unrated records always follow every rated one, whatever the direction.
pub fn rank_by_rating_ordered(records: &[MovieRecord], order: SortOrder) -> Vec<MovieRecord> {
    let mut ranked = records.to_vec();
    ranked.sort_by(|a, b| match (a.rating, b.rating) {
        (Some(x), Some(y)) => match order {
            SortOrder::Desc => y.total_cmp(&x),
            SortOrder::Asc => x.total_cmp(&y),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    ranked
}

/// Records tagged with `genre`, compared after trim + lower-case.
///
/// An unknown or blank genre gives an empty result.
pub fn filter_by_genre(records: &[MovieRecord], genre: &str) -> Vec<MovieRecord> {
    let wanted = normalize_tag(genre);
    if wanted.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| r.genres.iter().any(|g| *g == wanted))
        .cloned()
        .collect()
}

/// Records with a reported opening gross, highest first, truncated to `limit`
pub fn top_by_opening_gross(records: &[MovieRecord], limit: Option<usize>) -> Vec<MovieRecord> {
    let mut ranked: Vec<MovieRecord> = records
        .iter()
        .filter(|r| r.opening_gross.is_some())
        .cloned()
        .collect();
    ranked.sort_by(|a, b| b.opening_gross.cmp(&a.opening_gross));
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    ranked
}

/// Aggregate figures over a record set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_movies: usize,
    pub rated_movies: usize,
    /// Mean rating of rated records, two decimals; `None` when nothing is rated
    pub average_rating: Option<f64>,
    pub total_votes: u64,
    /// Sum of reported opening gross, minor units
    pub total_opening_gross: u64,
}

pub fn summarize(records: &[MovieRecord]) -> Summary {
    let ratings: Vec<f64> = records.iter().filter_map(|r| r.rating).collect();
    let average_rating = if ratings.is_empty() {
        None
    } else {
        let mean = ratings.iter().sum::<f64>() / ratings.len() as f64;
        Some((mean * 100.0).round() / 100.0)
    };

    Summary {
        total_movies: records.len(),
        rated_movies: ratings.len(),
        average_rating,
        total_votes: records
            .iter()
            .filter_map(|r| r.votes)
            .fold(0u64, u64::saturating_add),
        total_opening_gross: records
            .iter()
            .filter_map(|r| r.opening_gross)
            .fold(0u64, u64::saturating_add),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(records: &[MovieRecord]) -> Vec<&str> {
        records.iter().map(|r| r.title.as_str()).collect()
    }

    #[test]
    fn test_rank_by_rating_scenario() {
        let records = vec![
            MovieRecord::new("A").with_rating(7.5),
            MovieRecord::new("B"),
            MovieRecord::new("C").with_rating(9.0),
        ];
        let ranked = rank_by_rating(&records);
        assert_eq!(titles(&ranked), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_rank_by_rating_ties_keep_input_order() {
        let records = vec![
            MovieRecord::new("Zeta").with_rating(8.0),
            MovieRecord::new("unrated 1"),
            MovieRecord::new("Alpha").with_rating(8.0),
            MovieRecord::new("unrated 2"),
            MovieRecord::new("Mid").with_rating(5.0),
        ];
        let ranked = rank_by_rating(&records);
        assert_eq!(
            titles(&ranked),
            vec!["Zeta", "Alpha", "Mid", "unrated 1", "unrated 2"]
        );
    }

    #[test]
    fn test_zero_rating_sorts_before_unrated() {
        let records = vec![
            MovieRecord::new("none"),
            MovieRecord::new("zero").with_rating(0.0),
        ];
        assert_eq!(titles(&rank_by_rating(&records)), vec!["zero", "none"]);
    }

    #[test]
    fn test_ascending_keeps_unrated_last() {
        let records = vec![
            MovieRecord::new("none"),
            MovieRecord::new("high").with_rating(9.1),
            MovieRecord::new("low").with_rating(3.2),
        ];
        let ranked = rank_by_rating_ordered(&records, SortOrder::Asc);
        assert_eq!(titles(&ranked), vec!["low", "high", "none"]);
    }

    #[test]
    fn test_filter_by_genre_uppercase_query() {
        let records = vec![
            MovieRecord::new("Funny").with_genres(["comedy"]),
            MovieRecord::new("Sad").with_genres(["drama"]),
            MovieRecord::new("Both").with_genres(["Drama", "Comedy"]),
        ];
        assert_eq!(
            titles(&filter_by_genre(&records, "COMEDY")),
            vec!["Funny", "Both"]
        );
        assert!(filter_by_genre(&records, "western").is_empty());
        assert!(filter_by_genre(&records, "   ").is_empty());
    }

    #[test]
    fn test_top_by_opening_gross_excludes_absent_and_limits() {
        let records = vec![
            MovieRecord::new("small").with_opening_gross(100),
            MovieRecord::new("unknown"),
            MovieRecord::new("big").with_opening_gross(9_000),
            MovieRecord::new("tie").with_opening_gross(100),
        ];
        let all = top_by_opening_gross(&records, None);
        assert_eq!(titles(&all), vec!["big", "small", "tie"]);

        let top_two = top_by_opening_gross(&records, Some(2));
        assert_eq!(titles(&top_two), vec!["big", "small"]);

        assert!(top_by_opening_gross(&records, Some(0)).is_empty());
    }

    #[test]
    fn test_empty_input_gives_empty_views() {
        assert!(rank_by_rating(&[]).is_empty());
        assert!(filter_by_genre(&[], "comedy").is_empty());
        assert!(top_by_opening_gross(&[], Some(5)).is_empty());
    }

    #[test]
    fn test_summarize() {
        let mut voted = MovieRecord::new("voted").with_rating(7.0);
        voted.votes = Some(10);
        let records = vec![
            voted,
            MovieRecord::new("rated").with_rating(8.333),
            MovieRecord::new("gross").with_opening_gross(500),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.total_movies, 3);
        assert_eq!(summary.rated_movies, 2);
        assert_eq!(summary.average_rating, Some(7.67));
        assert_eq!(summary.total_votes, 10);
        assert_eq!(summary.total_opening_gross, 500);
    }

    #[test]
    fn test_summarize_without_ratings() {
        let summary = summarize(&[MovieRecord::new("x")]);
        assert_eq!(summary.average_rating, None);
        assert_eq!(summary.rated_movies, 0);
    }
}
