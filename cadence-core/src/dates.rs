//! Date word resolution: relative days, weekdays and month+day expressions.
//!
//! Rules are tried in precedence order and the first one that produces a
//! date wins:
//! 1. relative day ("today", "tomorrow", "day after tomorrow")
//! 2. "this <weekday>" / "next <weekday>"
//! 3. bare "<weekday>"
//! 4. month + day ("25th of december", "dec 25")
//!
//! The matched byte span is returned with the date so the caller can remove
//! it from its working text.

use std::ops::Range;

use anyhow::Result;
use chrono::{Datelike, Duration, NaiveDate};
use log::{debug, trace};
use regex::{Captures, Regex};

use crate::time::weekday_index;

pub(crate) const WEEKDAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

const MONTH_PATTERN: &str = "january|february|march|april|may|june|july|august|september|october|november|december|jan|feb|mar|apr|jun|jul|aug|sept|sep|oct|nov|dec";

/// Roll-forward years tried for a month+day that does not exist every year.
const MAX_YEAR_ROLL: i32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateRule {
    RelativeDay,
    RelativeWeekday,
    BareWeekday,
    MonthDay,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatch {
    pub date: NaiveDate,
    pub span: Range<usize>,
    pub rule: DateRule,
}

#[derive(Debug, Clone)]
pub struct DateWordResolver {
    relative_day: Regex,
    relative_weekday: Regex,
    bare_weekday: Regex,
    day_month: Regex,
    month_day: Regex,
    repeat_marker: Regex,
    recurrence_aware: bool,
}

impl DateWordResolver {
    pub fn new() -> Result<Self> {
        let weekdays = WEEKDAY_NAMES.join("|");
        Ok(Self {
            relative_day: Regex::new(
                r"(?i)\b(?:the\s+)?(?P<word>day\s+after\s+tomorrow|tomorrow|today)\b",
            )?,
            relative_weekday: Regex::new(&format!(
                r"(?i)\b(?P<prefix>this|next)\s+(?P<day>{weekdays})\b"
            ))?,
            bare_weekday: Regex::new(&format!(r"(?i)\b(?P<day>{weekdays})\b"))?,
            day_month: Regex::new(&format!(
                r"(?i)\b(?P<dom>\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?(?P<month>{MONTH_PATTERN})\b\.?"
            ))?,
            month_day: Regex::new(&format!(
                r"(?i)\b(?P<month>{MONTH_PATTERN})\.?\s+(?P<dom>\d{{1,2}})(?:st|nd|rd|th)?\b"
            ))?,
            repeat_marker: Regex::new(r"(?i)\b(?:every|each)\s*$")?,
            recurrence_aware: false,
        })
    }

    /// Skip bare weekdays introduced by "every"/"each" so the recurrence
    /// pass can claim them.
    pub fn recurrence_aware(mut self, enabled: bool) -> Self {
        self.recurrence_aware = enabled;
        self
    }

    pub fn resolve(&self, text: &str, today: NaiveDate) -> Option<DateMatch> {
        self.relative_day(text, today)
            .or_else(|| self.relative_weekday(text, today))
            .or_else(|| self.bare_weekday(text, today))
            .or_else(|| self.month_and_day(text, today))
            .inspect(|m| debug!("date: {:?} '{}' -> {}", m.rule, &text[m.span.clone()], m.date))
    }

    fn relative_day(&self, text: &str, today: NaiveDate) -> Option<DateMatch> {
        let caps = self.relative_day.captures(text)?;
        let word = caps.name("word")?.as_str().to_ascii_lowercase();
        let offset = if word.starts_with("day") {
            2
        } else if word == "tomorrow" {
            1
        } else {
            0
        };
        Some(DateMatch {
            date: today + Duration::days(offset),
            span: caps.get(0)?.range(),
            rule: DateRule::RelativeDay,
        })
    }

    fn relative_weekday(&self, text: &str, today: NaiveDate) -> Option<DateMatch> {
        let caps = self.relative_weekday.captures(text)?;
        let target = weekday_from_name(caps.name("day")?.as_str())?;
        let force_next = caps.name("prefix")?.as_str().eq_ignore_ascii_case("next");
        Some(DateMatch {
            date: upcoming_weekday(today, target, force_next),
            span: caps.get(0)?.range(),
            rule: DateRule::RelativeWeekday,
        })
    }

    fn bare_weekday(&self, text: &str, today: NaiveDate) -> Option<DateMatch> {
        self.bare_weekday.captures_iter(text).find_map(|caps| {
            let whole = caps.get(0)?;
            if self.recurrence_aware && self.repeat_marker.is_match(&text[..whole.start()]) {
                trace!("date: leaving '{}' to the recurrence pass", whole.as_str());
                return None;
            }
            let target = weekday_from_name(caps.name("day")?.as_str())?;
            Some(DateMatch {
                date: upcoming_weekday(today, target, false),
                span: whole.range(),
                rule: DateRule::BareWeekday,
            })
        })
    }

    fn month_and_day(&self, text: &str, today: NaiveDate) -> Option<DateMatch> {
        let to_match = |caps: Captures<'_>| -> Option<DateMatch> {
            let month = month_from_name(caps.name("month")?.as_str())?;
            let dom: u32 = caps.name("dom")?.as_str().parse().ok()?;
            let date = month_day_on_or_after(today, month, dom);
            if date.is_none() {
                trace!("date: '{}' is not a calendar day", &caps[0]);
            }
            Some(DateMatch {
                date: date?,
                span: caps.get(0)?.range(),
                rule: DateRule::MonthDay,
            })
        };

        let day_first = self.day_month.captures_iter(text).find_map(&to_match);
        let month_first = self.month_day.captures_iter(text).find_map(&to_match);

        match (day_first, month_first) {
            (Some(a), Some(b)) => Some(if b.span.start < a.span.start { b } else { a }),
            (a, b) => a.or(b),
        }
    }
}

/// Next occurrence of `target` (Sunday = 0) strictly after today when the
/// naive delta is zero or negative, or when `force_next` is set.
pub fn upcoming_weekday(today: NaiveDate, target: u8, force_next: bool) -> NaiveDate {
    let mut delta = i64::from(target) - i64::from(weekday_index(today));
    if force_next || delta <= 0 {
        delta += 7;
    }
    today + Duration::days(delta)
}

/// `month`/`day` in the current year, or the next year in which it exists
/// when that date has already passed.
pub fn month_day_on_or_after(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    if let Some(date) = NaiveDate::from_ymd_opt(today.year(), month, day) {
        if date >= today {
            return Some(date);
        }
    }
    (1..=MAX_YEAR_ROLL).find_map(|n| NaiveDate::from_ymd_opt(today.year() + n, month, day))
}

pub(crate) fn weekday_from_name(name: &str) -> Option<u8> {
    let lower = name.to_ascii_lowercase();
    let singular = lower
        .strip_suffix('s')
        .filter(|n| n.ends_with("day"))
        .unwrap_or(lower.as_str());
    WEEKDAY_NAMES
        .iter()
        .position(|w| *w == singular)
        .map(|i| i as u8)
}

fn month_from_name(name: &str) -> Option<u32> {
    let prefix: String = name.to_ascii_lowercase().chars().take(3).collect();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}
