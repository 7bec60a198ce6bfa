use crate::handlers::{article_for_slack, article_redirect, health_check};
use axum::{Router, routing::get};

/// Creates and configures all application routes
pub fn create_routes() -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/", get(article_redirect).post(article_for_slack))
        .route("/slack", get(article_for_slack).post(article_for_slack))
}
