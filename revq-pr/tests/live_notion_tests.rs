//! Live integration tests against real Notion credentials
//!
//! Ignored by default. Run with credentials in the environment (or a
//! .env file) and a title known to exist in the database:
//!
//! ```text
//! REVQ_NOTION_API_KEY=secret_... \
//! REVQ_NOTION_DATABASE_ID=... \
//! REVQ_LIVE_TEST_TITLE="Two Sum" \
//! cargo test -p revq-pr -- --ignored
//! ```

use std::sync::Arc;

use revq_pr::resolver::TitleResolver;
use revq_pr::services::notion_client::{NotionClient, TitleFilter};

fn live_env(name: &str) -> String {
    dotenvy::dotenv().ok();
    std::env::var(name)
        .unwrap_or_else(|_| panic!("Live tests require {} in the environment", name))
}

#[tokio::test]
#[ignore]
async fn live_exact_match_query_returns_page() {
    let api_key = live_env("REVQ_NOTION_API_KEY");
    let database_id = live_env("REVQ_NOTION_DATABASE_ID");
    let title = live_env("REVQ_LIVE_TEST_TITLE");

    let notion = NotionClient::new(&api_key).expect("Should build client");
    let pages = notion
        .query_by_title(&database_id, &title, TitleFilter::Equals)
        .await
        .expect("Query should succeed");

    assert!(
        !pages.is_empty(),
        "Expected an exact match for {:?} in the live database",
        title
    );
}

#[tokio::test]
#[ignore]
async fn live_resolver_finds_configured_title() {
    let api_key = live_env("REVQ_NOTION_API_KEY");
    let database_id = live_env("REVQ_NOTION_DATABASE_ID");
    let title = live_env("REVQ_LIVE_TEST_TITLE");

    let notion = Arc::new(NotionClient::new(&api_key).expect("Should build client"));
    let resolver = TitleResolver::new(notion, None, database_id, true);

    let resolution = resolver
        .resolve(&title)
        .await
        .expect("Resolution should not error");

    assert!(resolution.is_some(), "Expected {:?} to resolve", title);
}
