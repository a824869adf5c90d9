//! Consistency (streak) engine.
//!
//! A streak is the run of completed days ending at the most recent completed
//! day. Consecutive entries may be 0 or 1 day apart; any larger gap ends the
//! run. The value is recomputed from the full record set on every call so a
//! backfilled or edited completion is always reflected.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::time::parse_iso_date;

/// One day's completion state for a single trackable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub date: NaiveDate,
    pub completed: bool,
}

impl CompletionRecord {
    pub fn new(date: NaiveDate, completed: bool) -> Self {
        Self { date, completed }
    }

    /// Build a record from a canonical "YYYY-MM-DD" string.
    pub fn parse(date: &str, completed: bool) -> Result<Self> {
        let date = parse_iso_date(date).with_context(|| format!("completion record '{date}'"))?;
        Ok(Self { date, completed })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakPolicy {
    /// Collapse completed records that share a date before walking, so a
    /// duplicated day counts once.
    #[serde(default)]
    pub dedupe_same_day: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub current: u32,
    pub longest: u32,
    /// Most recent completion is today or yesterday.
    pub alive: bool,
    pub last_completed: Option<NaiveDate>,
}

/// Current streak with the default policy (same-day duplicates continue
/// the run).
pub fn streak(records: &[CompletionRecord]) -> u32 {
    streak_with(records, StreakPolicy::default())
}

pub fn streak_with(records: &[CompletionRecord], policy: StreakPolicy) -> u32 {
    let dates = completed_dates_desc(records, policy);
    let current = runs(&dates).next().unwrap_or(0);
    debug!("streak: {} completed of {} records -> {}", dates.len(), records.len(), current);
    current
}

/// Longest run anywhere in the log, using the same continuation rule.
pub fn longest_streak(records: &[CompletionRecord]) -> u32 {
    longest_streak_with(records, StreakPolicy::default())
}

pub fn longest_streak_with(records: &[CompletionRecord], policy: StreakPolicy) -> u32 {
    let dates = completed_dates_desc(records, policy);
    runs(&dates).max().unwrap_or(0)
}

/// Whether the current streak can still be extended today.
pub fn is_alive(records: &[CompletionRecord], today: NaiveDate) -> bool {
    last_completed(records)
        .map(|last| (0..=1).contains(&(today - last).num_days()))
        .unwrap_or(false)
}

pub fn summarize(records: &[CompletionRecord], today: NaiveDate, policy: StreakPolicy) -> StreakSummary {
    let dates = completed_dates_desc(records, policy);
    let mut lengths = runs(&dates);
    let current = lengths.next().unwrap_or(0);
    let longest = lengths.fold(current, u32::max);
    StreakSummary {
        current,
        longest,
        alive: is_alive(records, today),
        last_completed: dates.first().copied(),
    }
}

fn last_completed(records: &[CompletionRecord]) -> Option<NaiveDate> {
    records.iter().filter(|r| r.completed).map(|r| r.date).max()
}

fn completed_dates_desc(records: &[CompletionRecord], policy: StreakPolicy) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = records.iter().filter(|r| r.completed).map(|r| r.date).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    if policy.dedupe_same_day {
        dates.dedup();
    }
    dates
}

/// Run lengths over dates sorted newest first, most recent run first.
fn runs(dates: &[NaiveDate]) -> impl Iterator<Item = u32> + '_ {
    let mut rest = dates;
    std::iter::from_fn(move || {
        let (&first, tail) = rest.split_first()?;
        let mut anchor = first;
        let mut count = 1;
        let mut consumed = 1;
        for &date in tail {
            if (anchor - date).num_days() > 1 {
                break;
            }
            count += 1;
            consumed += 1;
            anchor = date;
        }
        rest = &rest[consumed..];
        Some(count)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn day(offset: i64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 13).unwrap() - Duration::days(offset)
    }

    fn done(offset: i64) -> CompletionRecord {
        CompletionRecord::new(day(offset), true)
    }

    fn missed(offset: i64) -> CompletionRecord {
        CompletionRecord::new(day(offset), false)
    }

    #[test]
    fn test_empty_log_is_zero() {
        assert_eq!(streak(&[]), 0);
        assert_eq!(longest_streak(&[]), 0);
    }

    #[test]
    fn test_only_missed_days_is_zero() {
        let rec = CompletionRecord::parse("2026-02-13", false).unwrap();
        assert_eq!(streak(&[rec]), 0);
    }

    #[test]
    fn test_three_consecutive_days() {
        assert_eq!(streak(&[done(0), done(1), done(2)]), 3);
    }

    #[test]
    fn test_gap_breaks_the_run() {
        assert_eq!(streak(&[done(0), missed(1), done(2)]), 1);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        assert_eq!(streak(&[done(2), done(0), done(1)]), 3);
    }

    #[test]
    fn test_streak_anchors_on_most_recent_completion() {
        // nothing recent, but an older run still counts
        assert_eq!(streak(&[done(10), done(11), done(20)]), 2);
    }

    #[test]
    fn test_same_day_duplicates_continue_by_default() {
        let records = [done(0), done(0), done(1)];
        assert_eq!(streak(&records), 3);

        let policy = StreakPolicy { dedupe_same_day: true };
        assert_eq!(streak_with(&records, policy), 2);
    }

    #[test]
    fn test_longest_streak_finds_older_run() {
        let records = [done(0), done(3), done(4), done(5), done(6), done(9)];
        assert_eq!(streak(&records), 1);
        assert_eq!(longest_streak(&records), 4);
    }

    #[test]
    fn test_is_alive() {
        let records = [done(1), done(2)];
        assert!(is_alive(&records, day(0)));
        assert!(is_alive(&records, day(1)));
        assert!(!is_alive(&records, day(-1)));
        assert!(!is_alive(&[missed(0)], day(0)));
    }

    #[test]
    fn test_summarize() {
        let records = [done(0), done(1), missed(2), done(3), done(4), done(5)];
        let summary = summarize(&records, day(0), StreakPolicy::default());
        assert_eq!(
            summary,
            StreakSummary {
                current: 2,
                longest: 3,
                alive: true,
                last_completed: Some(day(0)),
            }
        );
    }

    #[test]
    fn test_parse_rejects_malformed_date() {
        let err = CompletionRecord::parse("Feb 13", true).unwrap_err();
        assert!(err.to_string().contains("completion record"));
    }

    #[test]
    fn test_records_deserialize_from_iso_json() {
        let records: Vec<CompletionRecord> = serde_json::from_str(
            r#"[{"date":"2026-02-13","completed":true},{"date":"2026-02-12","completed":true}]"#,
        )
        .unwrap();
        assert_eq!(streak(&records), 2);
    }
}
