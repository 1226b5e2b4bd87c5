//! Pipeline observer
//!
//! The pipeline reports progress through an injected observer instead of
//! logging from inside pure code. `TracingObserver` forwards events to
//! `tracing`; tests can plug in a recording implementation.

use crate::{FetchError, View};
use std::fmt;

/// Why a raw upstream entry was dropped during normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Entry is not a JSON object
    NotAnObject,
    /// No usable title field
    MissingTitle,
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DropReason::NotAnObject => f.write_str("entry is not an object"),
            DropReason::MissingTitle => f.write_str("entry has no title"),
        }
    }
}

/// Hooks called at fixed points of a view request.
///
/// All methods default to no-ops.
pub trait PipelineObserver: Send + Sync {
    fn request_started(&self, _view: View) {}

    fn entry_dropped(&self, _index: usize, _reason: DropReason) {}

    fn request_failed(&self, _view: View, _error: &FetchError) {}

    fn request_completed(&self, _view: View, _count: usize) {}
}

/// Observer that ignores every event
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Observer that emits `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn request_started(&self, view: View) {
        tracing::info!(view = %view, "Fetching movies from upstream");
    }

    fn entry_dropped(&self, index: usize, reason: DropReason) {
        tracing::warn!(index = index, reason = %reason, "Dropping upstream entry");
    }

    fn request_failed(&self, view: View, error: &FetchError) {
        tracing::error!(view = %view, kind = error.kind(), "Request failed: {}", error);
    }

    fn request_completed(&self, view: View, count: usize) {
        tracing::info!(view = %view, count = count, "Returning movies");
    }
}
