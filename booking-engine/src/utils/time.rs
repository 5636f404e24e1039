//! Calendar date helpers
//!
//! Validators take `today` as an explicit parameter so tests stay
//! deterministic; this is where production code gets that value.

use chrono::NaiveDate;

/// The current calendar date in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}
