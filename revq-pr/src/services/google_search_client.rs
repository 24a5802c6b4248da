//! Google Custom Search client
//!
//! Last-resort title source: search `"<title> leetcode"`, keep result
//! links pointing into `leetcode.com/problems/`, and derive a candidate
//! title from the URL slug.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

const CUSTOM_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";
const PROBLEM_LINK_MARKER: &str = "leetcode.com/problems/";
const USER_AGENT: &str = "revq/0.1.0";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Filler word carrying no matching signal in list-problem titles
const STOPWORD: &str = "linked";

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)leetcode\.com/problems/([a-z0-9-]+)").expect("valid regex"));

/// Search client errors
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Search API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// One result link from the Custom Search response
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

/// Google Custom Search API client
pub struct GoogleSearchClient {
    http_client: reqwest::Client,
    api_key: String,
    cx: String,
}

impl GoogleSearchClient {
    pub fn new(api_key: &str, cx: &str) -> Result<Self, SearchError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| SearchError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: api_key.to_string(),
            cx: cx.to_string(),
        })
    }

    /// Search for a problem title and derive a candidate title from the
    /// best matching result slug. `Ok(None)` when nothing usable came back.
    pub async fn find_problem_title(
        &self,
        problem_title: &str,
    ) -> Result<Option<String>, SearchError> {
        let query = format!("{} leetcode", problem_title);

        tracing::debug!(query = %query, "Querying Google Custom Search");

        let response = self
            .http_client
            .get(CUSTOM_SEARCH_URL)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cx.as_str()),
                ("q", query.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Network(e.to_string()))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SearchError::Api(status.as_u16(), error_text));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Parse(e.to_string()))?;

        if parsed.items.is_empty() {
            tracing::debug!("No items in search result");
            return Ok(None);
        }

        Ok(pick_candidate_title(problem_title, &parsed.items))
    }
}

/// Pick the best candidate title from search results.
///
/// Prefers the first slug containing every significant word of the
/// submitted title; otherwise falls back to the first problem link.
pub fn pick_candidate_title(problem_title: &str, items: &[SearchItem]) -> Option<String> {
    let candidates: Vec<&SearchItem> = items
        .iter()
        .filter(|item| item.link.contains(PROBLEM_LINK_MARKER))
        .collect();

    if candidates.is_empty() {
        tracing::debug!("No problem links found in search items");
        return None;
    }

    let words = significant_words(problem_title);

    for item in &candidates {
        let Some(slug) = extract_slug(&item.link) else {
            continue;
        };
        let from_slug = slug_to_title(&slug);

        if words.iter().all(|w| from_slug.contains(w.as_str())) {
            tracing::debug!(
                slug = %slug,
                matched_words = %words.join(", "),
                "Picked slug matching all significant words"
            );
            return Some(from_slug);
        }
    }

    // Unconditional fallback: first problem link
    let slug = extract_slug(&candidates[0].link)?;
    let from_slug = slug_to_title(&slug);
    tracing::debug!(slug = %slug, "Falling back to first problem link");
    Some(from_slug)
}

/// Extract the problem slug from a result link
pub fn extract_slug(link: &str) -> Option<String> {
    SLUG_RE.captures(link).map(|caps| caps[1].to_string())
}

/// Normalize a slug to a space-separated lowercase title
pub fn slug_to_title(slug: &str) -> String {
    slug.replace('-', " ").to_lowercase()
}

/// Significant words of a title: lowercased, punctuation stripped, short
/// words and the filler word dropped
pub fn significant_words(title: &str) -> Vec<String> {
    let normalized: String = title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    normalized
        .split_whitespace()
        .filter(|w| w.len() > 2 && *w != STOPWORD)
        .map(|w| w.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(link: &str) -> SearchItem {
        SearchItem {
            link: link.to_string(),
        }
    }

    #[test]
    fn test_client_creation() {
        let client = GoogleSearchClient::new("key", "cx");
        assert!(client.is_ok());
    }

    #[test]
    fn test_extract_slug() {
        assert_eq!(
            extract_slug("https://leetcode.com/problems/two-sum-ii/"),
            Some("two-sum-ii".to_string())
        );
        assert_eq!(
            extract_slug("https://leetcode.com/problems/3sum/description/"),
            Some("3sum".to_string())
        );
        assert_eq!(extract_slug("https://example.com/problems/two-sum/"), None);
    }

    #[test]
    fn test_slug_to_title() {
        assert_eq!(slug_to_title("two-sum-ii"), "two sum ii");
        assert_eq!(slug_to_title("invert-binary-tree"), "invert binary tree");
    }

    #[test]
    fn test_significant_words_drop_short_and_filler() {
        assert_eq!(
            significant_words("Linked List Cycle"),
            vec!["list".to_string(), "cycle".to_string()]
        );
        // "ii" is too short to carry signal
        assert_eq!(significant_words("Two Sum II"), vec!["two", "sum"]);
    }

    #[test]
    fn test_significant_words_strip_punctuation() {
        assert_eq!(
            significant_words("Best Time to Buy & Sell Stock!"),
            vec!["best", "time", "buy", "sell", "stock"]
        );
    }

    #[test]
    fn test_pick_prefers_slug_with_all_words() {
        let items = [
            item("https://leetcode.com/problems/two-sum/"),
            item("https://leetcode.com/problems/two-sum-ii-input-array-is-sorted/"),
        ];

        assert_eq!(
            pick_candidate_title("Two Sum II Input Array", &items),
            Some("two sum ii input array is sorted".to_string())
        );
    }

    #[test]
    fn test_pick_falls_back_to_first_problem_link() {
        let items = [
            item("https://leetcode.com/problems/three-sum-closest/"),
            item("https://leetcode.com/problems/two-sum/"),
        ];

        // No slug contains "nonexistent"; the first problem link wins
        assert_eq!(
            pick_candidate_title("Nonexistent Problem XYZ", &items),
            Some("three sum closest".to_string())
        );
    }

    #[test]
    fn test_pick_skips_non_problem_links() {
        let items = [
            item("https://en.wikipedia.org/wiki/Two_Sum"),
            item("https://leetcode.com/problems/two-sum/"),
        ];

        assert_eq!(
            pick_candidate_title("Two Sum", &items),
            Some("two sum".to_string())
        );
    }

    #[test]
    fn test_pick_none_without_problem_links() {
        let items = [
            item("https://en.wikipedia.org/wiki/Two_Sum"),
            item("https://example.com/blog/two-sum"),
        ];

        assert_eq!(pick_candidate_title("Two Sum", &items), None);
    }
}
