//! # Box Office Common Library
//!
//! Shared code for the box-office aggregation service:
//! - Normalized movie model (`MovieRecord`)
//! - Error types (configuration and upstream fetch errors)
//! - Configuration loading
//! - Pipeline observer interface
//! - Record normalization, view queries and response formatting
//!
//! Everything in this crate is free of network I/O. Normalization, querying and
//! formatting are pure functions over their inputs.

pub mod config;
pub mod error;
pub mod format;
pub mod models;
pub mod normalize;
pub mod observer;
pub mod query;

pub use error::{Error, FetchError, Result};
pub use models::{MovieRecord, View};
pub use observer::{NoopObserver, PipelineObserver, TracingObserver};
