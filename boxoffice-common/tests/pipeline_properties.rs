//! Behavioural properties of the normalize → query → format pipeline,
//! checked over a varied hand-built corpus.

use boxoffice_common::normalize::normalize;
use boxoffice_common::query::{filter_by_genre, rank_by_rating, top_by_opening_gross};
use boxoffice_common::{MovieRecord, NoopObserver};
use serde_json::json;

/// Ratings, gross values and genres chosen to hit ties, zeros and gaps
fn corpus() -> Vec<Vec<MovieRecord>> {
    let base = vec![
        MovieRecord::new("a").with_rating(7.5).with_genres(["Comedy"]),
        MovieRecord::new("b").with_opening_gross(0),
        MovieRecord::new("c").with_rating(9.0).with_opening_gross(5_000),
        MovieRecord::new("d").with_rating(7.5).with_genres(["drama", "COMEDY"]),
        MovieRecord::new("e").with_rating(0.0).with_opening_gross(5_000),
        MovieRecord::new("f").with_genres(["horror"]),
        MovieRecord::new("g").with_rating(10.0).with_opening_gross(12),
    ];

    let mut reversed = base.clone();
    reversed.reverse();

    vec![
        Vec::new(),
        vec![MovieRecord::new("solo")],
        base.clone(),
        reversed,
        base.iter().filter(|r| r.rating.is_none()).cloned().collect(),
    ]
}

fn titles(records: &[MovieRecord]) -> Vec<String> {
    records.iter().map(|r| r.title.clone()).collect()
}

#[test]
fn test_rank_by_rating_keeps_every_record_and_orders_rated_first() {
    for records in corpus() {
        let ranked = rank_by_rating(&records);
        assert_eq!(ranked.len(), records.len());

        let first_unrated = ranked.iter().position(|r| r.rating.is_none());
        if let Some(pos) = first_unrated {
            assert!(ranked[pos..].iter().all(|r| r.rating.is_none()));
        }

        let rated: Vec<f64> = ranked.iter().filter_map(|r| r.rating).collect();
        assert!(rated.windows(2).all(|w| w[0] >= w[1]));

        let mut sorted_in = titles(&records);
        let mut sorted_out = titles(&ranked);
        sorted_in.sort();
        sorted_out.sort();
        assert_eq!(sorted_in, sorted_out);
    }
}

#[test]
fn test_filter_by_genre_is_exact_subset() {
    for records in corpus() {
        for genre in ["comedy", "COMEDY", " Drama ", "horror", "western"] {
            let filtered = filter_by_genre(&records, genre);
            let wanted = genre.trim().to_lowercase();

            assert!(filtered.iter().all(|r| r.genres.contains(&wanted)));

            let expected: Vec<String> = records
                .iter()
                .filter(|r| r.genres.contains(&wanted))
                .map(|r| r.title.clone())
                .collect();
            assert_eq!(titles(&filtered), expected);
        }
    }
}

#[test]
fn test_top_by_opening_gross_limit_is_prefix() {
    for records in corpus() {
        let unlimited = top_by_opening_gross(&records, None);
        assert!(unlimited.iter().all(|r| r.opening_gross.is_some()));
        assert!(unlimited
            .windows(2)
            .all(|w| w[0].opening_gross >= w[1].opening_gross));

        for k in 0..=unlimited.len() + 1 {
            let limited = top_by_opening_gross(&records, Some(k));
            assert!(limited.len() <= k);
            assert_eq!(limited[..], unlimited[..limited.len()]);
        }
    }
}

#[test]
fn test_views_are_idempotent_and_leave_input_untouched() {
    for records in corpus() {
        let snapshot = records.clone();

        assert_eq!(rank_by_rating(&records), rank_by_rating(&records));
        assert_eq!(
            filter_by_genre(&records, "comedy"),
            filter_by_genre(&records, "comedy")
        );
        assert_eq!(
            top_by_opening_gross(&records, Some(2)),
            top_by_opening_gross(&records, Some(2))
        );
        assert_eq!(records, snapshot);
    }
}

#[test]
fn test_missing_title_entry_shortens_output_by_one() {
    let payload = json!([
        {"primaryTitle": "One", "averageRating": 6.1},
        {"averageRating": 8.8, "genres": ["Drama"]},
        {"primaryTitle": "Three", "weekendGrossAmount": 1000}
    ]);

    let records = normalize(&payload, &NoopObserver).unwrap();
    assert_eq!(records.len(), 2);
}

#[test]
fn test_normalized_payload_through_rating_view() {
    let payload = json!([
        {"primaryTitle": "A", "averageRating": 7.5},
        {"primaryTitle": "B"},
        {"primaryTitle": "C", "averageRating": 9.0}
    ]);

    let records = normalize(&payload, &NoopObserver).unwrap();
    let ranked = rank_by_rating(&records);

    assert_eq!(titles(&ranked), vec!["C", "A", "B"]);
    assert_eq!(ranked[2].rating, None);
}
