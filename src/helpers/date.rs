//! Date helper functions

use chrono::NaiveDate;

/// Format a date in ISO 8601 form (like "2024-01-15")
pub fn iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Format date in full format (like "January 05, 2024")
pub fn full_date(date: &NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}
