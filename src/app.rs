use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::picker::{ArticlePicker, NewsApiClient, SharedRng};
use crate::routes::create_routes;

/// Initialize tracing and logging for the application.
/// `RUST_LOG` wins over `default_filter` when set.
pub fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create the Axum application backed by the configured news API
pub fn create_app(config: &Config) -> Result<Router, anyhow::Error> {
    info!("Initializing news API client for {}", config.news.base_url);
    let client = NewsApiClient::new(&config.news)?;
    let picker = ArticlePicker::new(Arc::new(client), Arc::new(SharedRng::from_os_rng()));

    Ok(build_router(picker))
}

/// Router with all routes and middleware around an existing picker
pub fn build_router(picker: ArticlePicker) -> Router {
    info!("Initializing application router");

    Router::new()
        .merge(create_routes())
        .layer(Extension(picker))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
