//! Request pipeline: fetch → normalize → query → format
//!
//! Holds no per-request state. Each call makes exactly one upstream request
//! and builds its records from scratch.

use std::sync::Arc;

use boxoffice_common::format::{format, format_summary, MoviesResponse, StatsResponse};
use boxoffice_common::normalize::normalize;
use boxoffice_common::query::{self, SortOrder};
use boxoffice_common::{FetchError, MovieRecord, PipelineObserver, View};

use crate::upstream::UpstreamClient;

pub struct Pipeline {
    client: UpstreamClient,
    observer: Arc<dyn PipelineObserver>,
}

impl Pipeline {
    pub fn new(client: UpstreamClient, observer: Arc<dyn PipelineObserver>) -> Self {
        Self { client, observer }
    }

    /// Fetch and normalize, reporting start and failure to the observer
    async fn records(
        &self,
        view: View,
        genre: Option<&str>,
    ) -> Result<Vec<MovieRecord>, FetchError> {
        self.observer.request_started(view);

        let result = match self.client.fetch(genre).await {
            Ok(payload) => normalize(&payload, self.observer.as_ref()),
            Err(e) => Err(e),
        };

        if let Err(e) = &result {
            self.observer.request_failed(view, e);
        }
        result
    }

    fn respond(&self, view: View, records: Vec<MovieRecord>) -> MoviesResponse {
        self.observer.request_completed(view, records.len());
        format(view, records)
    }

    /// Every normalized movie in upstream order
    pub async fn all(&self) -> Result<MoviesResponse, FetchError> {
        let records = self.records(View::All, None).await?;
        Ok(self.respond(View::All, records))
    }

    pub async fn by_rating(&self, order: SortOrder) -> Result<MoviesResponse, FetchError> {
        let records = self.records(View::Rating, None).await?;
        let ranked = query::rank_by_rating_ordered(&records, order);
        Ok(self.respond(View::Rating, ranked))
    }

    pub async fn by_genre(&self, genre: &str) -> Result<MoviesResponse, FetchError> {
        let records = self.records(View::Genre, Some(genre)).await?;
        let filtered = query::filter_by_genre(&records, genre);
        Ok(self.respond(View::Genre, filtered))
    }

    pub async fn highest_opening(
        &self,
        limit: Option<usize>,
    ) -> Result<MoviesResponse, FetchError> {
        let records = self.records(View::HighestOpening, None).await?;
        let ranked = query::top_by_opening_gross(&records, limit);
        Ok(self.respond(View::HighestOpening, ranked))
    }

    pub async fn stats(&self) -> Result<StatsResponse, FetchError> {
        let records = self.records(View::Stats, None).await?;
        self.observer.request_completed(View::Stats, records.len());
        Ok(format_summary(query::summarize(&records)))
    }
}
