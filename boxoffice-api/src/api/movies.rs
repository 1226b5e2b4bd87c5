//! Movie view endpoints
//!
//! - GET /movies
//! - GET /movies/rating?order=asc|desc
//! - GET /movies/genre/{genre}
//! - GET /movies/highest_opening?limit=N
//! - GET /movies/stats

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use boxoffice_common::format::{MoviesResponse, StatsResponse};
use boxoffice_common::query::SortOrder;
use serde::Deserialize;

use super::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RatingQuery {
    #[serde(default)]
    pub order: SortOrder,
}

#[derive(Debug, Deserialize)]
pub struct OpeningQuery {
    pub limit: Option<usize>,
}

/// GET /movies
pub async fn list_movies(State(state): State<AppState>) -> Result<Json<MoviesResponse>, ApiError> {
    Ok(Json(state.pipeline.all().await?))
}

/// GET /movies/rating
pub async fn movies_by_rating(
    State(state): State<AppState>,
    Query(query): Query<RatingQuery>,
) -> Result<Json<MoviesResponse>, ApiError> {
    Ok(Json(state.pipeline.by_rating(query.order).await?))
}

/// GET /movies/genre/:genre
///
/// Genre match is case-insensitive; an unknown genre returns an empty list.
pub async fn movies_by_genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
) -> Result<Json<MoviesResponse>, ApiError> {
    Ok(Json(state.pipeline.by_genre(&genre).await?))
}

/// GET /movies/highest_opening
pub async fn highest_opening(
    State(state): State<AppState>,
    Query(query): Query<OpeningQuery>,
) -> Result<Json<MoviesResponse>, ApiError> {
    Ok(Json(state.pipeline.highest_opening(query.limit).await?))
}

/// GET /movies/stats
pub async fn movie_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, ApiError> {
    Ok(Json(state.pipeline.stats().await?))
}

pub fn movie_routes() -> Router<AppState> {
    Router::new()
        .route("/movies", get(list_movies))
        .route("/movies/rating", get(movies_by_rating))
        .route("/movies/genre/:genre", get(movies_by_genre))
        .route("/movies/highest_opening", get(highest_opening))
        .route("/movies/stats", get(movie_stats))
}
