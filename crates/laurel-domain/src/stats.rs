//! Period statistics over scored event logs
//!
//! Aggregates mood-style logs into the fixed-shape record the reporting
//! endpoints display: count, mean, extremes, and trailing-window counts.

use crate::DatedEvent;
use chrono::{Days, NaiveDate};

/// Aggregated statistics over a windowed set of scored events
///
/// Every numeric field is 0 on empty input; an empty log is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MoodStatistics {
    /// Number of scored events in the input
    pub total_logs: u32,

    /// Mean score, rounded to one decimal place (half away from zero)
    pub average: f64,

    /// Highest score seen
    pub highest: i32,

    /// Lowest score seen
    pub lowest: i32,

    /// Events dated within the trailing 7 days (today inclusive)
    pub last_7_days: u32,

    /// Events dated within the trailing 30 days (today inclusive)
    pub last_30_days: u32,
}

/// Compute statistics over the events passed in
///
/// The caller applies its own window filter before calling; no independent
/// date filtering happens here except the trailing 7-day and 30-day counts,
/// which are always anchored at `today`. A caller window smaller than 30
/// days therefore legitimately caps those counts.
pub fn compute_statistics(events: &[DatedEvent], today: NaiveDate) -> MoodStatistics {
    let scored: Vec<(NaiveDate, i32)> = events
        .iter()
        .filter_map(|e| e.score.map(|s| (e.date, s)))
        .collect();

    if scored.is_empty() {
        return MoodStatistics::default();
    }

    let total: i64 = scored.iter().map(|&(_, s)| i64::from(s)).sum();
    let mean = total as f64 / scored.len() as f64;

    let week_floor = trailing_floor(today, 7);
    let month_floor = trailing_floor(today, 30);

    MoodStatistics {
        total_logs: scored.len() as u32,
        average: (mean * 10.0).round() / 10.0,
        highest: scored.iter().map(|&(_, s)| s).max().unwrap_or(0),
        lowest: scored.iter().map(|&(_, s)| s).min().unwrap_or(0),
        last_7_days: count_in_window(&scored, week_floor, today),
        last_30_days: count_in_window(&scored, month_floor, today),
    }
}

/// First date of an N-day trailing window ending at `today` (inclusive)
fn trailing_floor(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days - 1)).unwrap_or(today)
}

fn count_in_window(scored: &[(NaiveDate, i32)], floor: NaiveDate, today: NaiveDate) -> u32 {
    scored
        .iter()
        .filter(|&&(date, _)| date >= floor && date <= today)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let stats = compute_statistics(&[], d("2025-01-31"));
        assert_eq!(stats, MoodStatistics::default());
    }

    #[test]
    fn test_five_scores_over_five_days() {
        let today = d("2025-01-05");
        let events: Vec<DatedEvent> = (1..=5)
            .map(|i| DatedEvent::scored(d(&format!("2025-01-0{}", i)), i))
            .collect();

        let stats = compute_statistics(&events, today);
        assert_eq!(stats.total_logs, 5);
        assert_eq!(stats.average, 3.0);
        assert_eq!(stats.highest, 5);
        assert_eq!(stats.lowest, 1);
        assert_eq!(stats.last_7_days, 5);
        assert_eq!(stats.last_30_days, 5);
    }

    #[test]
    fn test_average_rounds_to_one_decimal() {
        let today = d("2025-02-03");
        let events = [
            DatedEvent::scored(d("2025-02-01"), 4),
            DatedEvent::scored(d("2025-02-02"), 4),
            DatedEvent::scored(d("2025-02-03"), 5),
        ];
        // 13 / 3 = 4.333... -> 4.3
        let stats = compute_statistics(&events, today);
        assert_eq!(stats.average, 4.3);
    }

    #[test]
    fn test_trailing_windows_anchor_at_today() {
        let today = d("2025-03-31");
        let events = [
            DatedEvent::scored(d("2025-03-31"), 3), // today
            DatedEvent::scored(d("2025-03-25"), 4), // day 7 of the window
            DatedEvent::scored(d("2025-03-24"), 5), // just outside 7 days
            DatedEvent::scored(d("2025-03-02"), 2), // day 30 of the window
            DatedEvent::scored(d("2025-03-01"), 1), // just outside 30 days
        ];
        let stats = compute_statistics(&events, today);
        assert_eq!(stats.total_logs, 5);
        assert_eq!(stats.last_7_days, 2);
        assert_eq!(stats.last_30_days, 4);
    }

    #[test]
    fn test_unscored_events_are_not_counted() {
        let today = d("2025-01-10");
        let events = [
            DatedEvent::on(d("2025-01-09")),
            DatedEvent::scored(d("2025-01-10"), 7),
        ];
        let stats = compute_statistics(&events, today);
        assert_eq!(stats.total_logs, 1);
        assert_eq!(stats.average, 7.0);
    }
}
