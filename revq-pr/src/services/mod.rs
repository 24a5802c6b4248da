//! External service clients for revq-pr

pub mod google_search_client;
pub mod notion_client;

pub use google_search_client::GoogleSearchClient;
pub use notion_client::NotionClient;
