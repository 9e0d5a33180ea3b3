use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;
use std::time::Instant;

use crate::aggregator::Aggregator;
use crate::data_models::SearchResponse;
use crate::discovery::SearchProvider;
use crate::error::ScoutError;
use crate::extraction::ContentExtractor;

use super::models::SearchRequest;

pub async fn search_handler<S, E>(
    State(aggregator): State<Arc<Aggregator<S, E>>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)>
where
    S: SearchProvider,
    E: ContentExtractor,
{
    let start = Instant::now();

    if request.query.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query cannot be empty".to_string()));
    }

    let response = aggregator
        .search(&request.query, &request.options)
        .await
        .map_err(|e| match e {
            // providers may resolve credentials lazily
            ScoutError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            _ => (StatusCode::BAD_GATEWAY, format!("Search error: {e}")),
        })?;

    tracing::info!(
        query = %request.query,
        results = response.data.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "served search request"
    );

    Ok(Json(response))
}
