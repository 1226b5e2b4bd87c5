//! Record normalization
//!
//! Turns the loosely-typed upstream JSON into `MovieRecord`s. Each field is
//! coerced on its own: an unusable value becomes `None` for that field. Only a
//! missing title (or a non-object entry) drops the whole entry, and only a
//! payload that is not a list fails the batch.

use serde_json::{Map, Value};

use crate::models::normalize_tag;
use crate::observer::{DropReason, PipelineObserver};
use crate::{FetchError, MovieRecord};

/// Raw upstream payload as decoded JSON
pub type RawPayload = Value;

const TITLE_FIELDS: [&str; 3] = ["primaryTitle", "originalTitle", "title"];
const RATING_MAX: f64 = 10.0;
const MINOR_UNITS_PER_MAJOR: u64 = 100;
const YEAR_RANGE: std::ops::RangeInclusive<i64> = 1800..=9999;

/// Normalize a whole payload.
///
/// Fails with `UpstreamMalformed` only when the payload is not a JSON array.
/// Dropped entries are reported to `observer` with their index.
pub fn normalize(
    payload: &RawPayload,
    observer: &dyn PipelineObserver,
) -> Result<Vec<MovieRecord>, FetchError> {
    let entries = payload.as_array().ok_or_else(|| {
        FetchError::UpstreamMalformed(format!("expected a JSON array, got {}", json_type(payload)))
    })?;

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match normalize_entry(entry) {
            Ok(record) => records.push(record),
            Err(reason) => observer.entry_dropped(index, reason),
        }
    }
    Ok(records)
}

/// Normalize a single upstream entry
pub fn normalize_entry(entry: &Value) -> Result<MovieRecord, DropReason> {
    let fields = entry.as_object().ok_or(DropReason::NotAnObject)?;
    let title = coerce_title(fields).ok_or(DropReason::MissingTitle)?;

    Ok(MovieRecord {
        id: fields
            .get("id")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        title,
        genres: coerce_genres(fields.get("genres")),
        rating: fields.get("averageRating").and_then(coerce_rating),
        votes: fields.get("numVotes").and_then(coerce_count),
        opening_gross: fields.get("weekendGrossAmount").and_then(coerce_gross),
        currency: fields
            .get("weekendGrossCurrency")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty()),
        release_year: coerce_year(fields),
    })
}

fn coerce_title(fields: &Map<String, Value>) -> Option<String> {
    TITLE_FIELDS
        .iter()
        .filter_map(|key| fields.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// Accepts an array of strings or one comma-separated string
fn coerce_genres(value: Option<&Value>) -> Vec<String> {
    let raw: Vec<&str> = match value {
        Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(s)) => s.split(',').collect(),
        _ => Vec::new(),
    };

    let mut genres: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw.into_iter().map(normalize_tag) {
        if !tag.is_empty() && !genres.contains(&tag) {
            genres.push(tag);
        }
    }
    genres
}

fn coerce_rating(value: &Value) -> Option<f64> {
    let rating = as_f64(value)?;
    // -0.0 + 0.0 == +0.0, so a negative zero never sorts apart from 0.0
    (rating.is_finite() && (0.0..=RATING_MAX).contains(&rating)).then_some(rating + 0.0)
}

fn coerce_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => clean_numeric(s).parse::<u64>().ok(),
        _ => None,
    }
}

/// Whole currency units from upstream, stored as minor units
fn coerce_gross(value: &Value) -> Option<u64> {
    if let Some(whole) = coerce_count(value) {
        return whole.checked_mul(MINOR_UNITS_PER_MAJOR);
    }
    let amount = as_f64(value)?;
    if !amount.is_finite() || amount < 0.0 {
        return None;
    }
    let minor = (amount * MINOR_UNITS_PER_MAJOR as f64).round();
    // u64::MAX as f64 rounds up to 2^64, which does not fit
    (minor < u64::MAX as f64).then_some(minor as u64)
}

fn coerce_year(fields: &Map<String, Value>) -> Option<i32> {
    let from_start_year = fields.get("startYear").and_then(|v| match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    });

    let from_release_date = || {
        fields
            .get("releaseDate")
            .and_then(Value::as_str)
            .and_then(|d| d.trim().get(..4))
            .filter(|y| y.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|y| y.parse::<i64>().ok())
    };

    from_start_year
        .filter(|y| YEAR_RANGE.contains(y))
        .or_else(|| from_release_date().filter(|y| YEAR_RANGE.contains(y)))
        .and_then(|y| i32::try_from(y).ok())
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => clean_numeric(s).parse::<f64>().ok(),
        _ => None,
    }
}

/// Strip whitespace, thousands separators and a leading currency sign
fn clean_numeric(s: &str) -> String {
    s.trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| !matches!(c, ',' | '_') && !c.is_whitespace())
        .collect()
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
