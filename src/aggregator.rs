//! Search, then scrape every retained hit concurrently.

use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::Semaphore;

use crate::data_models::{AggregatedResult, SearchOptions, SearchResponse, SearchResultItem};
use crate::discovery::SearchProvider;
use crate::error::Result;
use crate::extraction::ContentExtractor;

pub struct Aggregator<S, E> {
    provider: S,
    extractor: E,
    concurrent_extractions: Option<Arc<Semaphore>>,
}

impl<S, E> Aggregator<S, E>
where
    S: SearchProvider,
    E: ContentExtractor,
{
    pub fn new(provider: S, extractor: E) -> Aggregator<S, E> {
        Aggregator {
            provider,
            extractor,
            concurrent_extractions: None,
        }
    }

    /// Caps in-flight extractions across every `search` on this aggregator.
    ///
    /// `max` is clamped to `1..=Semaphore::MAX_PERMITS`, so `0` behaves as `1`.
    pub fn with_max_concurrent_extractions(mut self, max: usize) -> Self {
        let permits = max.clamp(1, Semaphore::MAX_PERMITS);
        self.concurrent_extractions = Some(Arc::new(Semaphore::new(permits)));
        self
    }

    /// Discovery errors propagate. Extraction errors are logged and turn into
    /// an entry with empty markdown, so `data` always mirrors the first
    /// `limit` provider items in provider order.
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<SearchResponse> {
        let mut items = match self.provider.query_search(query).await {
            Ok(items) => items,
            Err(e) => {
                tracing::error!(query, error = %e, "search failed");
                return Err(e);
            }
        };
        items.truncate(options.effective_limit());
        tracing::debug!(query, count = items.len(), "extracting search results");

        let data = join_all(
            items
                .iter()
                .map(|item| self.extract_item(item, options.timeout_seconds)),
        )
        .await;

        let extracted = data.iter().filter(|r| !r.markdown.is_empty()).count();
        tracing::info!(query, results = data.len(), extracted, "search complete");

        Ok(SearchResponse {
            success: true,
            data,
        })
    }

    async fn extract_item(
        &self,
        item: &SearchResultItem,
        timeout_seconds: Option<u64>,
    ) -> AggregatedResult {
        let _permit = match &self.concurrent_extractions {
            // the semaphore is never closed
            Some(semaphore) => semaphore.acquire().await.ok(),
            None => None,
        };

        match self.extractor.extract(&item.url, timeout_seconds).await {
            Ok(doc) => AggregatedResult::extracted(item, doc),
            Err(e) => {
                tracing::warn!(url = %item.url, error = %e, "failed to scrape url");
                AggregatedResult::empty(item)
            }
        }
    }
}
