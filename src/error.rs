use thiserror::Error;

/// Failures surfaced by the discovery and extraction clients.
///
/// Messages never carry credentials.
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("config error: {0}")]
    Config(String),

    #[error("discovery failed: {0}")]
    Discovery(String),

    #[error("extraction failed for {url}: {reason}")]
    Extraction { url: String, reason: String },
}

impl ScoutError {
    pub fn extraction(url: &str, reason: impl std::fmt::Display) -> Self {
        ScoutError::Extraction {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScoutError>;
