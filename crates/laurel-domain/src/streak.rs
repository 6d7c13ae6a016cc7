//! Streak calculation over a set of dated events
//!
//! Computes the current streak (consecutive days ending today) and the best
//! streak (longest consecutive run ever) from an unordered, possibly
//! duplicated set of dates. Pure and deterministic; safe to call
//! redundantly after every mutation.

use chrono::{Days, NaiveDate};
use std::collections::BTreeSet;

/// Result of a streak computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakSummary {
    /// Consecutive days ending at the anchor date ("today")
    pub current: u32,

    /// Longest consecutive run anywhere in the history
    pub best: u32,
}

/// Compute current and best streaks from a set of dates
///
/// Duplicate dates count as a single occurrence per day. The current streak
/// is anchored at `today`: if `today` itself is absent, it is 0. Dates
/// after `today` are never produced by valid input and are ignored for the
/// current streak.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use laurel_domain::compute_streaks;
///
/// let d = |s: &str| s.parse::<NaiveDate>().unwrap();
/// let dates = [d("2025-01-01"), d("2025-01-02"), d("2025-01-03")];
/// let streaks = compute_streaks(&dates, d("2025-01-03"));
/// assert_eq!(streaks.current, 3);
/// assert_eq!(streaks.best, 3);
/// ```
pub fn compute_streaks(dates: &[NaiveDate], today: NaiveDate) -> StreakSummary {
    let distinct: BTreeSet<NaiveDate> = dates.iter().copied().collect();

    if distinct.is_empty() {
        return StreakSummary::default();
    }

    // Current streak: walk backward from today until the first missing day.
    let mut current = 0u32;
    let mut check_date = today;
    while distinct.contains(&check_date) {
        current += 1;
        match check_date.checked_sub_days(Days::new(1)) {
            Some(prev) => check_date = prev,
            None => break,
        }
    }

    // Best streak: single ascending scan, resetting on any gap.
    let sorted: Vec<NaiveDate> = distinct.into_iter().collect();
    let mut best = 1u32;
    let mut run = 1u32;
    for window in sorted.windows(2) {
        if window[0].checked_add_days(Days::new(1)) == Some(window[1]) {
            run += 1;
            best = best.max(run);
        } else {
            run = 1;
        }
    }

    StreakSummary { current, best }
}
