//! cadence-core: temporal reasoning for the Cadence habit and task tracker.
//!
//! Two pure components live here:
//! - [`IntakeParser`]: free text -> [`TaskDraft`]
//! - the streak engine: completion log -> current streak
//!
//! Neither does I/O or keeps state between calls. "Today" is always passed
//! in by the caller.

pub mod dates;
pub mod draft;
pub mod intake;
pub mod keywords;
pub mod streak;
pub mod time;

pub use dates::{DateMatch, DateRule, DateWordResolver};
pub use draft::{Priority, Recurrence, RecurrenceConfig, RecurrenceRule, TaskDraft};
pub use intake::{IntakeParser, ParserOptions};
pub use streak::{
    CompletionRecord, StreakPolicy, StreakSummary, is_alive, longest_streak, longest_streak_with,
    streak, streak_with, summarize,
};
pub use time::{parse_iso_date, today_in};
