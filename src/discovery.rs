//! Search provider boundary and the Google Custom Search client behind it.

use reqwest::Url;
use serde::Deserialize;
use std::future::Future;

use crate::config::{GoogleSearchConfig, endpoint_url};
use crate::data_models::SearchResultItem;
use crate::error::{Result, ScoutError};

/// Turns a query into ranked result items.
///
/// Implementations return items in the provider's relevance order.
pub trait SearchProvider: Send + Sync {
    fn query_search(&self, query: &str)
    -> impl Future<Output = Result<Vec<SearchResultItem>>> + Send;
}

#[derive(Debug, Deserialize)]
struct GoogleSearchResponse {
    // absent when the query has no hits
    #[serde(default)]
    items: Vec<GoogleSearchItem>,
}

#[derive(Debug, Deserialize)]
struct GoogleSearchItem {
    link: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    snippet: String,
}

impl From<GoogleSearchItem> for SearchResultItem {
    fn from(item: GoogleSearchItem) -> Self {
        SearchResultItem::new(item.link, item.title, item.snippet)
    }
}

pub struct GoogleSearchClient {
    client: reqwest::Client,
    endpoint: Url,
    config: GoogleSearchConfig,
}

impl GoogleSearchClient {
    pub fn new(config: GoogleSearchConfig) -> Result<GoogleSearchClient> {
        config.validate()?;
        let endpoint = endpoint_url(&config.base_url, "customsearch/v1")?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| ScoutError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(GoogleSearchClient {
            client,
            endpoint,
            config,
        })
    }

    async fn fetch(&self, query: &str) -> Result<Vec<SearchResultItem>> {
        let res = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.engine_id.as_str()),
                ("q", query),
            ])
            .send()
            .await
            // without_url keeps the api key out of the message
            .map_err(|e| ScoutError::Discovery(format!("request failed: {}", e.without_url())))?;

        let status = res.status();
        if !status.is_success() {
            return Err(ScoutError::Discovery(format!(
                "search provider returned status {status}"
            )));
        }

        let body: GoogleSearchResponse = res.json().await.map_err(|e| {
            ScoutError::Discovery(format!("malformed response: {}", e.without_url()))
        })?;

        Ok(body.items.into_iter().map(SearchResultItem::from).collect())
    }
}

impl SearchProvider for GoogleSearchClient {
    async fn query_search(&self, query: &str) -> Result<Vec<SearchResultItem>> {
        let items = self.fetch(query).await?;
        tracing::debug!(query, count = items.len(), "search provider returned items");
        Ok(items)
    }
}
