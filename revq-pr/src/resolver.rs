//! Title resolution against the Notion database
//!
//! Scraped titles rarely match stored titles byte-for-byte, so resolution
//! runs an ordered strategy chain with first-success iteration:
//! direct lookup → title variations → web-search slug.

use std::collections::HashSet;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::services::google_search_client::{GoogleSearchClient, SearchError};
use crate::services::notion_client::{NotionClient, NotionError, NotionPage, TitleFilter};

/// Noise suffixes that scraped titles sometimes carry
const STRIP_SUFFIXES: [&str; 4] = [" detection", " problem", " solution", " question"];

/// Roman numerals used by multi-part problems
const ROMAN_NUMERALS: [&str; 5] = [" i", " ii", " iii", " iv", " v"];

/// Interchangeable words seen across stored and scraped titles
const WORD_SYNONYMS: [(&str, &[&str]); 7] = [
    ("a", &["an", "the"]),
    ("an", &["a", "the"]),
    ("the", &["a", "an"]),
    ("tree", &["trees"]),
    ("trees", &["tree"]),
    ("list", &["lists"]),
    ("lists", &["list"]),
];

static ARTICLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(a|an|the)\b\s*").expect("valid regex"));
static WORD_INITIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w").expect("valid regex"));
static LEADING_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s*").expect("valid regex"));

/// Resolution strategies, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Exact-match lookup, then contains-match, with the submitted title
    Direct,
    /// Direct lookup over generated title variations
    Variations,
    /// Direct lookup with a title derived from web-search results
    WebSearch,
}

/// Strategy order for a resolver run
pub fn strategy_order(variations_enabled: bool) -> Vec<Strategy> {
    if variations_enabled {
        vec![Strategy::Direct, Strategy::Variations, Strategy::WebSearch]
    } else {
        vec![Strategy::Direct, Strategy::WebSearch]
    }
}

/// Resolver errors
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Notion(#[from] NotionError),

    #[error(transparent)]
    Search(#[from] SearchError),
}

/// A successful resolution: the page plus the title text that matched
#[derive(Debug, Clone)]
pub struct Resolution {
    pub page: NotionPage,
    pub matched_title: String,
}

/// Resolves submitted titles to database pages
pub struct TitleResolver {
    notion: Arc<NotionClient>,
    search: Option<Arc<GoogleSearchClient>>,
    database_id: String,
    variations_enabled: bool,
}

impl TitleResolver {
    pub fn new(
        notion: Arc<NotionClient>,
        search: Option<Arc<GoogleSearchClient>>,
        database_id: String,
        variations_enabled: bool,
    ) -> Self {
        Self {
            notion,
            search,
            database_id,
            variations_enabled,
        }
    }

    /// Resolve a submitted title to a database page.
    ///
    /// Strategies run in order; the first hit short-circuits the rest.
    pub async fn resolve(&self, title: &str) -> Result<Option<Resolution>, ResolveError> {
        for strategy in strategy_order(self.variations_enabled) {
            let resolution = match strategy {
                Strategy::Direct => self.lookup(title).await?,
                Strategy::Variations => self.lookup_variations(title).await?,
                Strategy::WebSearch => self.lookup_via_search(title).await?,
            };

            if let Some(resolution) = resolution {
                return Ok(Some(resolution));
            }
        }

        tracing::info!(title = %title, "Title not found after all strategies");
        Ok(None)
    }

    /// Exact-match query, then contains-match
    async fn lookup(&self, title: &str) -> Result<Option<Resolution>, ResolveError> {
        let pages = self
            .notion
            .query_by_title(&self.database_id, title, TitleFilter::Equals)
            .await?;
        if let Some(page) = pages.into_iter().next() {
            tracing::info!(title = %title, "Found exact match");
            return Ok(Some(Resolution {
                page,
                matched_title: title.to_string(),
            }));
        }

        let pages = self
            .notion
            .query_by_title(&self.database_id, title, TitleFilter::Contains)
            .await?;
        if let Some(page) = pages.into_iter().next() {
            tracing::info!(title = %title, "Found contains match");
            return Ok(Some(Resolution {
                page,
                matched_title: title.to_string(),
            }));
        }

        Ok(None)
    }

    async fn lookup_variations(&self, title: &str) -> Result<Option<Resolution>, ResolveError> {
        let variations = title_variations(title);
        tracing::debug!(count = variations.len(), "Trying title variations");

        for variation in variations {
            if variation == title {
                continue; // already tried by the direct strategy
            }

            if let Some(resolution) = self.lookup(&variation).await? {
                tracing::info!(variation = %variation, "Found match via variation");
                return Ok(Some(resolution));
            }
        }

        Ok(None)
    }

    async fn lookup_via_search(&self, title: &str) -> Result<Option<Resolution>, ResolveError> {
        let Some(search) = &self.search else {
            tracing::warn!("Search API not configured; skipping web-search fallback");
            return Ok(None);
        };

        let Some(derived) = search.find_problem_title(title).await? else {
            return Ok(None);
        };

        tracing::info!(derived = %derived, "Trying title derived from search results");
        self.lookup(&derived).await
    }
}

/// Generate the ordered, deduplicated variation set for a title.
///
/// The original title always comes first and the order of transforms is
/// fixed, so the output is deterministic.
pub fn title_variations(title: &str) -> Vec<String> {
    let mut variations: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    fn push_unique(variations: &mut Vec<String>, seen: &mut HashSet<String>, candidate: String) {
        if seen.insert(candidate.clone()) {
            variations.push(candidate);
        }
    }

    push_unique(&mut variations, &mut seen, title.to_string());

    // Strip noise suffixes (first occurrence, as scraped)
    for suffix in STRIP_SUFFIXES {
        if title.contains(suffix) {
            push_unique(&mut variations, &mut seen, title.replacen(suffix, "", 1));
        }
    }

    // Drop English articles
    let without_articles = ARTICLE_RE.replace_all(title, "").to_string();
    if without_articles != title {
        push_unique(&mut variations, &mut seen, without_articles);
    }

    // Multi-part problems carry roman numerals the scraped title may lack
    for numeral in ROMAN_NUMERALS {
        if !title.contains(numeral) {
            push_unique(&mut variations, &mut seen, format!("{}{}", title, numeral));
        }
    }

    // Title Case
    let title_case = WORD_INITIAL_RE
        .replace_all(title, |caps: &regex::Captures| caps[0].to_uppercase())
        .to_string();
    if title_case != title {
        push_unique(&mut variations, &mut seen, title_case);
    }

    // lowercase
    let lowercase = title.to_lowercase();
    if lowercase != title {
        push_unique(&mut variations, &mut seen, lowercase);
    }

    // Strip a leading "226. " style prefix
    let without_leading_number = LEADING_NUMBER_RE.replace(title, "").to_string();
    if without_leading_number != title {
        push_unique(&mut variations, &mut seen, without_leading_number);
    }

    // Trailing-s toggle
    if title.ends_with('s') && title.len() > 3 {
        push_unique(&mut variations, &mut seen, title[..title.len() - 1].to_string());
    } else if !title.ends_with('s') {
        push_unique(&mut variations, &mut seen, format!("{}s", title));
    }

    // Word synonyms (space-delimited, first occurrence)
    for (from, to_list) in WORD_SYNONYMS {
        let needle = format!(" {} ", from);
        if title.contains(&needle) {
            for to in to_list {
                push_unique(
                    &mut variations,
                    &mut seen,
                    title.replacen(&needle, &format!(" {} ", to), 1),
                );
            }
        }
    }

    variations
}
