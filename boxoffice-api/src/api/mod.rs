//! HTTP API handlers for boxoffice-api

pub mod error;
pub mod health;
pub mod movies;

pub use error::ApiError;
pub use health::health_routes;
pub use movies::movie_routes;
