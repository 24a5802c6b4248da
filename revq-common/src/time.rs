//! Calendar date utilities for the review policy

use chrono::{Days, Local, NaiveDate};

/// Review interval applied after every accepted submission, in days
pub const REVIEW_INTERVAL_DAYS: u64 = 2;

/// Current local calendar date
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Format a date as ISO `YYYY-MM-DD`
pub fn to_iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Next review date for a completion on `today`
pub fn next_review_date(today: NaiveDate) -> NaiveDate {
    today + Days::new(REVIEW_INTERVAL_DAYS)
}
