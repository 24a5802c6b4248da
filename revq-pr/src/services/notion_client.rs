//! Notion API client
//!
//! Minimal wrapper over the two Notion operations the reconciler needs:
//! database query filtered on the `Name` title, and page property update.

use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

const NOTION_BASE_URL: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";
const USER_AGENT: &str = "revq/0.1.0";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Database property names used by the review tracker
const PROP_NAME: &str = "Name";
const PROP_STATUS: &str = "Status";
const PROP_REVIEWED: &str = "Reviewed";
const PROP_REVIEW_DATE: &str = "Review Date";
const PROP_COMPLETION_DATES: &str = "Completion Dates";

/// Notion client errors
#[derive(Debug, Error)]
pub enum NotionError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Notion API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Title match condition for database queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleFilter {
    /// Title equals the candidate exactly
    Equals,
    /// Title contains the candidate as a substring
    Contains,
}

impl TitleFilter {
    pub fn as_condition(&self) -> &'static str {
        match self {
            TitleFilter::Equals => "equals",
            TitleFilter::Contains => "contains",
        }
    }
}

/// A page returned from a database query
///
/// Properties stay as raw JSON; Notion property values are polymorphic
/// and only `Completion Dates` is ever read back.
#[derive(Debug, Clone, Deserialize)]
pub struct NotionPage {
    pub id: String,
    #[serde(default)]
    pub properties: Value,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: Vec<NotionPage>,
}

impl NotionPage {
    /// Completion-date history stored as JSON text inside the
    /// `Completion Dates` rich_text property.
    ///
    /// A missing property or malformed stored text yields the empty
    /// list rather than an error.
    pub fn completion_dates(&self) -> Vec<String> {
        let Some(text) = self
            .properties
            .get(PROP_COMPLETION_DATES)
            .and_then(|p| p.get("rich_text"))
            .and_then(|rt| rt.get(0))
            .and_then(|t| t.get("plain_text"))
            .and_then(|t| t.as_str())
        else {
            return Vec::new();
        };

        match serde_json::from_str::<Vec<String>>(text) {
            Ok(dates) => dates,
            Err(_) => {
                tracing::warn!(page_id = %self.id, "Stored completion dates are malformed; starting fresh");
                Vec::new()
            }
        }
    }
}

/// Review-tracking fields written back after an accepted submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewUpdate {
    /// ISO date of the next scheduled review
    pub next_review: String,
    /// Full completion history, today included
    pub completion_dates: Vec<String>,
}

/// Notion API client
pub struct NotionClient {
    http_client: reqwest::Client,
    api_key: String,
}

impl NotionClient {
    pub fn new(api_key: &str) -> Result<Self, NotionError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| NotionError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: api_key.to_string(),
        })
    }

    /// Query a database for pages whose `Name` title matches `title`
    pub async fn query_by_title(
        &self,
        database_id: &str,
        title: &str,
        filter: TitleFilter,
    ) -> Result<Vec<NotionPage>, NotionError> {
        let url = format!("{}/databases/{}/query", NOTION_BASE_URL, database_id);
        let body = title_query_body(title, filter);

        tracing::debug!(
            title = %title,
            condition = filter.as_condition(),
            "Querying Notion database"
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotionError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(NotionError::Api(status.as_u16(), error_text));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| NotionError::Parse(e.to_string()))?;

        Ok(parsed.results)
    }

    /// Write the review-tracking properties back to a page.
    ///
    /// A single PATCH carries every field, so a reported success always
    /// reflects a complete write.
    pub async fn update_review_state(
        &self,
        page_id: &str,
        update: &ReviewUpdate,
    ) -> Result<(), NotionError> {
        let url = format!("{}/pages/{}", NOTION_BASE_URL, page_id);
        let body = review_update_body(update);

        tracing::debug!(page_id = %page_id, next_review = %update.next_review, "Updating Notion page");

        let response = self
            .http_client
            .patch(&url)
            .bearer_auth(&self.api_key)
            .header("Notion-Version", NOTION_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotionError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(NotionError::Api(status.as_u16(), error_text));
        }

        Ok(())
    }
}

/// Query payload for a title-filtered database query
fn title_query_body(title: &str, filter: TitleFilter) -> Value {
    let condition = match filter {
        TitleFilter::Equals => json!({ "equals": title }),
        TitleFilter::Contains => json!({ "contains": title }),
    };

    json!({
        "filter": {
            "property": PROP_NAME,
            "title": condition,
        }
    })
}

/// Property payload for a review-state update
fn review_update_body(update: &ReviewUpdate) -> Value {
    let encoded_dates =
        serde_json::to_string(&update.completion_dates).unwrap_or_else(|_| "[]".to_string());

    json!({
        "properties": {
            PROP_STATUS: { "checkbox": true },
            PROP_REVIEWED: { "checkbox": true },
            PROP_REVIEW_DATE: { "date": { "start": update.next_review } },
            PROP_COMPLETION_DATES: {
                "rich_text": [
                    { "text": { "content": encoded_dates } }
                ]
            }
        }
    })
}
