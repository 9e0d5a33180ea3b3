use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: usize = 5;

/// One ranked hit from the search provider.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResultItem {
    pub url: String,
    pub title: String,
    pub snippet: String,
}

impl SearchResultItem {
    pub fn new(url: String, title: String, snippet: String) -> SearchResultItem {
        SearchResultItem {
            url,
            title,
            snippet,
        }
    }
}

/// Page text as returned by the content extractor.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDocument {
    pub title: String,
    pub description: String,
    pub url: String,
    pub content: String,
    pub token_usage: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AggregatedResult {
    pub url: String,
    pub title: String,
    /// Empty when extraction failed for this url.
    pub markdown: String,
}

impl AggregatedResult {
    pub fn extracted(item: &SearchResultItem, doc: ExtractedDocument) -> AggregatedResult {
        AggregatedResult {
            url: item.url.clone(),
            title: item.title.clone(),
            markdown: doc.content,
        }
    }

    pub fn empty(item: &SearchResultItem) -> AggregatedResult {
        AggregatedResult {
            url: item.url.clone(),
            title: item.title.clone(),
            markdown: String::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub success: bool,
    pub data: Vec<AggregatedResult>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SearchOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = Some(timeout_seconds);
        self
    }

    pub fn effective_limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }
}
