//! Rolling week window generation.
//!
//! # Algorithm
//! 1. Anchor on the Monday of the current week (`today - weekday`).
//! 2. Emit `num_weeks` Monday–Friday windows, each starting 7 days after
//!    the previous one.
//!
//! The output depends only on `today` and `num_weeks`, so repeated calls
//! with the same inputs produce the same sequence.

use chrono::{Datelike, Days, NaiveDate};

use crate::models::WeekWindow;

/// Default schedule horizon in weeks.
pub const DEFAULT_NUM_WEEKS: usize = 52;

/// Monday of the week containing `today`.
pub fn week_anchor(today: NaiveDate) -> NaiveDate {
    let offset = u64::from(today.weekday().num_days_from_monday());
    today - Days::new(offset)
}

/// Generates `num_weeks` consecutive Monday–Friday windows starting in
/// the current week.
pub fn generate_windows(today: NaiveDate, num_weeks: usize) -> Vec<WeekWindow> {
    let mut windows = Vec::with_capacity(num_weeks);
    let mut current = WeekWindow::starting(week_anchor(today));
    for _ in 0..num_weeks {
        windows.push(current);
        current = current.next();
    }
    windows
}
