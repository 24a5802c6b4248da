//! Spaced-repetition review policy
//!
//! Fixed interval: every accepted submission schedules the next review
//! two calendar days out and appends today to the completion history.

use chrono::NaiveDate;

use revq_common::time::{next_review_date, to_iso_date};

use crate::services::notion_client::{NotionClient, NotionError, NotionPage, ReviewUpdate};

/// Plan the review update for a completion on `today`.
///
/// Today's date is appended at most once per calendar day; the next
/// review date is computed fresh regardless of any prior value.
pub fn plan_review(existing_dates: Vec<String>, today: NaiveDate) -> ReviewUpdate {
    let today_iso = to_iso_date(today);
    let mut completion_dates = existing_dates;

    if completion_dates.contains(&today_iso) {
        tracing::debug!(date = %today_iso, "Already completed today");
    } else {
        completion_dates.push(today_iso);
        tracing::debug!(total = completion_dates.len(), "Added completion date");
    }

    ReviewUpdate {
        next_review: to_iso_date(next_review_date(today)),
        completion_dates,
    }
}

/// Apply the review policy to a resolved page.
///
/// Returns the next-review date. The write is a single page update, so a
/// reported success always reflects a complete write.
pub async fn apply_review(
    notion: &NotionClient,
    page: &NotionPage,
    today: NaiveDate,
) -> Result<String, NotionError> {
    let update = plan_review(page.completion_dates(), today);
    notion.update_review_state(&page.id, &update).await?;
    Ok(update.next_review)
}
