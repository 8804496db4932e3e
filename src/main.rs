use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod state;

use state::AppState;
use streets_backend::backend::EsClient;
use streets_backend::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "streets_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("streets-backend (built {})", env!("BUILD_TIME"));

    let app_config = config::load_config()?;
    tracing::info!(
        "Using Elasticsearch index '{}' at {}",
        app_config.elasticsearch.index,
        app_config.elasticsearch.url
    );

    // One HTTP client for the Elasticsearch node, shared across all requests
    let http = reqwest::Client::new();
    let es_client = Arc::new(EsClient::new(
        http,
        &app_config.elasticsearch.url,
        &app_config.elasticsearch.index,
    ));

    let state = Arc::new(AppState::new(es_client));

    let cors = match app_config.server.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(Any)
            .allow_headers(Any),
        Err(_) => {
            tracing::warn!(
                "Invalid frontend_url '{}', falling back to permissive CORS",
                app_config.server.frontend_url
            );
            CorsLayer::permissive()
        }
    };

    let app = Router::new()
        .route("/api/search", get(api::search::search))
        .route("/api/delete/:id", post(api::search::delete))
        .route("/health", get(api::search::health))
        .fallback(api::search::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let bind_addr = app_config.get_bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server running at http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
