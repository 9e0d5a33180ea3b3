use dotenvy::dotenv;
use reqwest::Url;
use std::env;
use tokio::sync::Semaphore;

use crate::error::{Result, ScoutError};

pub const GOOGLE_SEARCH_BASE_URL: &str = "https://www.googleapis.com";
pub const JINA_READER_BASE_URL: &str = "https://r.jina.ai";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_JINA_REQUEST_TIMEOUT_SECONDS: u64 = 60;

#[derive(Debug, Clone)]
pub struct GoogleSearchConfig {
    pub api_key: String,
    /// Custom search engine id, sent as `cx`.
    pub engine_id: String,
    pub base_url: String,
}

impl GoogleSearchConfig {
    pub fn new(api_key: impl Into<String>, engine_id: impl Into<String>) -> Self {
        GoogleSearchConfig {
            api_key: api_key.into(),
            engine_id: engine_id.into(),
            base_url: GOOGLE_SEARCH_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() || self.engine_id.trim().is_empty() {
            return Err(ScoutError::Config(
                "GOOGLE_SEARCH_API_KEY or GOOGLE_CUSTOM_SEARCH_ENGINE_ID is not set".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct JinaConfig {
    pub api_key: String,
    pub base_url: String,
    /// Client side cap on a single reader request.
    pub request_timeout_seconds: u64,
}

impl JinaConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        JinaConfig {
            api_key: api_key.into(),
            base_url: JINA_READER_BASE_URL.to_string(),
            request_timeout_seconds: DEFAULT_JINA_REQUEST_TIMEOUT_SECONDS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ScoutError::Config("JINA_API_KEY is not set".into()));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ScoutError::Config(
                "request_timeout_seconds must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub google: GoogleSearchConfig,
    pub jina: JinaConfig,
    pub bind_addr: String,
    /// `None` runs every extraction of a batch at once.
    pub max_concurrent_extractions: Option<usize>,
}

impl Config {
    /// Reads the process environment, after loading `.env` if present.
    pub fn from_env() -> Result<Config> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let google = GoogleSearchConfig::new(
            get_var(&lookup, "GOOGLE_SEARCH_API_KEY")?,
            get_var(&lookup, "GOOGLE_CUSTOM_SEARCH_ENGINE_ID")?,
        );
        let jina = JinaConfig::new(get_var(&lookup, "JINA_API_KEY")?);

        let bind_addr = get_var_or_default(&lookup, "SCOUT_BIND_ADDR", DEFAULT_BIND_ADDR);
        let max_concurrent_extractions = match lookup("SCOUT_MAX_CONCURRENT_EXTRACTIONS") {
            Some(raw) => {
                let n = raw.trim().parse::<usize>().map_err(|_| {
                    ScoutError::Config(format!(
                        "SCOUT_MAX_CONCURRENT_EXTRACTIONS must be a positive integer, got {raw:?}"
                    ))
                })?;
                if n == 0 || n > Semaphore::MAX_PERMITS {
                    return Err(ScoutError::Config(format!(
                        "SCOUT_MAX_CONCURRENT_EXTRACTIONS must be between 1 and {}",
                        Semaphore::MAX_PERMITS
                    )));
                }
                Some(n)
            }
            None => None,
        };

        Ok(Config {
            google,
            jina,
            bind_addr,
            max_concurrent_extractions,
        })
    }
}

/// Resolves `path` under `base_url`, keeping any path prefix the base carries.
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)
        .map_err(|e| ScoutError::Config(format!("invalid base url {base_url:?}: {e}")))?;
    if !base.path().ends_with('/') {
        let prefixed = format!("{}/", base.path());
        base.set_path(&prefixed);
    }
    base.join(path.trim_start_matches('/'))
        .map_err(|e| ScoutError::Config(format!("invalid endpoint path {path:?}: {e}")))
}

fn get_var<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ScoutError::Config(format!("missing required environment variable: {key}")))
}

fn get_var_or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_string())
}
