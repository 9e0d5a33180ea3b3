use axum::{Router, routing::post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::aggregator::Aggregator;
use crate::discovery::SearchProvider;
use crate::extraction::ContentExtractor;

pub mod handlers;
pub mod models;

pub fn create_router<S, E>(aggregator: Arc<Aggregator<S, E>>) -> Router
where
    S: SearchProvider + 'static,
    E: ContentExtractor + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/search", post(handlers::search_handler::<S, E>))
        .with_state(aggregator)
        .layer(cors)
}
