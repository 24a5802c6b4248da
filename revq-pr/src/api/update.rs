//! Progress update endpoint

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use revq_common::time::today_local;

use crate::resolver::{ResolveError, TitleResolver};
use crate::review;
use crate::services::notion_client::NotionError;
use crate::AppState;

/// POST /update-progress request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressRequest {
    pub problem_title: String,
    #[serde(default)]
    pub problem_url: String,
}

/// Successful update response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgressResponse {
    pub success: bool,
    pub message: String,
    pub next_review: String,
}

/// POST /update-progress
///
/// Resolves the submitted title against the Notion database and applies
/// the review policy to the matched page.
pub async fn update_progress(
    State(state): State<AppState>,
    Json(request): Json<UpdateProgressRequest>,
) -> Result<Json<UpdateProgressResponse>, UpdateError> {
    let title = request.problem_title.trim();
    if title.is_empty() {
        return Err(UpdateError::EmptyTitle);
    }

    tracing::info!(title = %title, url = %request.problem_url, "Received update request");

    let Some(notion) = state.notion.clone() else {
        return Err(UpdateError::MissingConfig("REVQ_NOTION_API_KEY"));
    };
    let Some(database_id) = state.config.notion_database_id.clone() else {
        return Err(UpdateError::MissingConfig("REVQ_NOTION_DATABASE_ID"));
    };

    let resolver = TitleResolver::new(
        notion.clone(),
        state.search.clone(),
        database_id,
        state.config.title_variations,
    );

    let resolution = resolver
        .resolve(title)
        .await?
        .ok_or_else(|| UpdateError::NotFound(title.to_string()))?;

    let next_review = review::apply_review(&notion, &resolution.page, today_local()).await?;

    tracing::info!(
        matched = %resolution.matched_title,
        next_review = %next_review,
        "Updated review state"
    );

    Ok(Json(UpdateProgressResponse {
        success: true,
        message: "Notion updated successfully".to_string(),
        next_review,
    }))
}

/// Update endpoint errors
#[derive(Debug)]
pub enum UpdateError {
    EmptyTitle,
    MissingConfig(&'static str),
    NotFound(String),
    Resolve(ResolveError),
    Update(NotionError),
}

impl From<ResolveError> for UpdateError {
    fn from(e: ResolveError) -> Self {
        UpdateError::Resolve(e)
    }
}

impl From<NotionError> for UpdateError {
    fn from(e: NotionError) -> Self {
        UpdateError::Update(e)
    }
}

impl IntoResponse for UpdateError {
    fn into_response(self) -> Response {
        match self {
            UpdateError::EmptyTitle => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "problemTitle must not be empty" })),
            )
                .into_response(),
            UpdateError::MissingConfig(name) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("Missing {} in configuration", name) })),
            )
                .into_response(),
            UpdateError::NotFound(title) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "message": format!(
                        "Problem \"{}\" (and search result) not found in Notion database.",
                        title
                    )
                })),
            )
                .into_response(),
            UpdateError::Resolve(e) => {
                tracing::error!("Title resolution failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": e.to_string() })),
                )
                    .into_response()
            }
            UpdateError::Update(e) => {
                tracing::error!("Notion update failed: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": e.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
