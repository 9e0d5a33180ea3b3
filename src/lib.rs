pub mod aggregator;
pub mod api;
pub mod config;
pub mod data_models;
pub mod discovery;
pub mod error;
pub mod extraction;

pub use aggregator::Aggregator;
pub use config::Config;
pub use data_models::{AggregatedResult, SearchOptions, SearchResponse};
pub use error::{Result, ScoutError};
