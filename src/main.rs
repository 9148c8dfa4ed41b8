mod config;
mod dictionary;
mod error;
mod game;
mod models;
mod routes;
mod utils;
mod websocket;

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use config::Config;
use dashmap::DashMap;
use dictionary::{Dictionary, RemoteDictionary, WordOracle};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

/// Application state shared across all handlers
pub struct AppState {
    pub config: Config,
    pub dictionary: Arc<dyn WordOracle>,
    /// Games in progress, keyed by the id of the connection hosting them
    pub active_games: DashMap<Uuid, GameSummary>,
}

/// Public information about a running game
#[derive(Debug, Clone)]
pub struct GameSummary {
    pub players: Vec<String>,
    pub started_at: DateTime<Utc>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordboard_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting word board backend server...");

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded");

    let dictionary = build_dictionary(&config).await?;

    // Create application state
    let state = Arc::new(AppState {
        config: config.clone(),
        dictionary,
        active_games: DashMap::new(),
    });

    let app = build_router(state);

    // Start server
    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Server listening on {}", addr);
    tracing::info!("WebSocket endpoint: ws://{}/ws", addr);
    tracing::info!("Health check: http://{}/health", addr);
    tracing::info!("Game frontend: http://{}/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Use the local word list when one is configured and loads, otherwise the
/// remote dictionary API
async fn build_dictionary(config: &Config) -> Result<Arc<dyn WordOracle>> {
    if let Some(path) = &config.dictionary.word_list_path {
        match Dictionary::load(path).await {
            Ok(dict) if dict.is_empty() => {
                tracing::warn!(
                    "Word list {} has no usable words. Falling back to {}",
                    path,
                    config.dictionary.api_url
                );
            }
            Ok(dict) => {
                tracing::info!("Using local word list from {}", path);
                return Ok(Arc::new(dict));
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load word list {}: {}. Falling back to {}",
                    path,
                    e,
                    config.dictionary.api_url
                );
            }
        }
    }

    // Shared HTTP client for reusing connections
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.dictionary.timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;
    tracing::info!("Using dictionary API at {}", config.dictionary.api_url);

    Ok(Arc::new(RemoteDictionary::new(
        http_client,
        config.dictionary.api_url.clone(),
    )))
}

pub fn build_router(state: Arc<AppState>) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Serve frontend static files
    let frontend_service = ServeDir::new(&state.config.server.frontend_dir);

    Router::new()
        // WebSocket endpoint
        .route("/ws", get(websocket::handle_websocket))
        // API routes
        .merge(routes::create_routes())
        .fallback_service(frontend_service)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
