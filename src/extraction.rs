//! Content extractor boundary and the Jina Reader client behind it.

use reqwest::Url;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

use crate::config::{JinaConfig, endpoint_url};
use crate::data_models::ExtractedDocument;
use crate::error::{Result, ScoutError};

/// Fetches one url and returns its readable text.
pub trait ContentExtractor: Send + Sync {
    fn extract(
        &self,
        url: &str,
        timeout_seconds: Option<u64>,
    ) -> impl Future<Output = Result<ExtractedDocument>> + Send;
}

#[derive(Debug, Serialize)]
struct ReaderRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct ReaderResponse {
    data: ReaderData,
}

#[derive(Debug, Deserialize)]
struct ReaderData {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    content: String,
    #[serde(default)]
    usage: ReaderUsage,
}

#[derive(Debug, Default, Deserialize)]
struct ReaderUsage {
    #[serde(default)]
    tokens: u64,
}

impl From<ReaderData> for ExtractedDocument {
    fn from(data: ReaderData) -> Self {
        ExtractedDocument {
            title: data.title,
            description: data.description,
            url: data.url,
            content: data.content,
            token_usage: data.usage.tokens,
        }
    }
}

pub struct JinaReaderClient {
    client: reqwest::Client,
    endpoint: Url,
    config: JinaConfig,
}

impl JinaReaderClient {
    pub fn new(config: JinaConfig) -> Result<JinaReaderClient> {
        config.validate()?;
        let endpoint = endpoint_url(&config.base_url, "")?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| ScoutError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(JinaReaderClient {
            client,
            endpoint,
            config,
        })
    }

    async fn fetch(&self, url: &str, timeout_seconds: Option<u64>) -> Result<ExtractedDocument> {
        let mut req = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.config.api_key)
            .header("X-Return-Format", "markdown")
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&ReaderRequest { url });
        // zero means the reader's own default
        if let Some(timeout) = timeout_seconds.filter(|t| *t > 0) {
            req = req.header("X-Timeout", timeout.to_string());
        }

        let res = req
            .send()
            .await
            .map_err(|e| ScoutError::extraction(url, e.without_url()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(ScoutError::extraction(
                url,
                format!("reader returned status {status}"),
            ));
        }

        let body: ReaderResponse = res
            .json()
            .await
            .map_err(|e| ScoutError::extraction(url, format!("malformed response: {e}")))?;

        Ok(body.data.into())
    }
}

impl ContentExtractor for JinaReaderClient {
    async fn extract(&self, url: &str, timeout_seconds: Option<u64>) -> Result<ExtractedDocument> {
        let doc = self.fetch(url, timeout_seconds).await?;
        tracing::debug!(url, tokens = doc.token_usage, "extracted page content");
        Ok(doc)
    }
}
