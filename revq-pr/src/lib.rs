//! revq-pr library - Progress Reconciler module
//!
//! Receives "submission accepted" events from the browser-side observer
//! and reconciles them into the Notion review database: resolve the
//! scraped title to a page, then update its review-tracking fields.

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use revq_common::{Error, Result};

pub mod api;
pub mod config;
pub mod resolver;
pub mod review;
pub mod services;

use config::Config;
use services::google_search_client::GoogleSearchClient;
use services::notion_client::NotionClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolved service configuration
    pub config: Arc<Config>,
    /// Notion client; unset until the API key is configured
    pub notion: Option<Arc<NotionClient>>,
    /// Search client; unset until both Google options are configured
    pub search: Option<Arc<GoogleSearchClient>>,
}

impl AppState {
    /// Build state from resolved configuration.
    ///
    /// Missing Notion credentials leave the client unset; the update
    /// endpoint reports the missing option per request instead of the
    /// service refusing to boot.
    pub fn from_config(config: Config) -> Result<Self> {
        let notion = match &config.notion_api_key {
            Some(key) => {
                let client =
                    NotionClient::new(key).map_err(|e| Error::Internal(e.to_string()))?;
                Some(Arc::new(client))
            }
            None => {
                tracing::warn!("Notion API key not configured; update requests will fail");
                None
            }
        };

        let search = match (&config.google_api_key, &config.google_cx) {
            (Some(key), Some(cx)) => {
                let client =
                    GoogleSearchClient::new(key, cx).map_err(|e| Error::Internal(e.to_string()))?;
                Some(Arc::new(client))
            }
            _ => {
                tracing::warn!("Google search not configured; web-search fallback disabled");
                None
            }
        };

        Ok(Self {
            config: Arc::new(config),
            notion,
            search,
        })
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::post;

    Router::new()
        .route("/update-progress", post(api::update_progress))
        .merge(api::health_routes())
        // The observer POSTs from a browser page context
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
