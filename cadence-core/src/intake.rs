//! Free-text task intake.
//!
//! `IntakeParser::parse` turns "gym every monday at 7am" into a [`TaskDraft`]
//! by running a fixed sequence of passes over a working copy of the input:
//!
//! 1. time (clock time, then a coarse time-of-day word as fallback)
//! 2. date (see [`DateWordResolver`])
//! 3. recurrence
//! 4. priority
//! 5. category (inferred only; consumes nothing)
//! 6. title cleanup
//!
//! Each pass removes what it matched before the next one runs, so a span
//! is owned by the first pass that claims it.

use std::ops::Range;

use anyhow::Result;
use chrono::NaiveDate;
use log::{debug, trace};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dates::{DateWordResolver, WEEKDAY_NAMES, weekday_from_name};
use crate::draft::{Priority, Recurrence, RecurrenceRule, TaskDraft};
use crate::keywords::{category_matchers, priority_matchers};

/// Coarse time-of-day words, used only when no clock time was found.
const TIME_OF_DAY: &[(&str, &str)] = &[
    ("morning", "09:00"),
    ("afternoon", "14:00"),
    ("evening", "18:00"),
    ("night", "21:00"),
    ("noon", "12:00"),
    ("midnight", "00:00"),
];

/// Parser switches for the behaviors that differ from the plain pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParserOptions {
    /// Leave "every <weekday>" to the recurrence pass instead of resolving
    /// the weekday as a one-off due date.
    #[serde(default)]
    pub recurrence_aware_weekdays: bool,
    /// Drop a filler preposition left dangling at the end of the title.
    #[serde(default)]
    pub sweep_trailing_fillers: bool,
    /// Read a bare 1-2 digit number as an hour ("buy 2 apples" -> 02:00).
    /// Off by default: a clock time then needs "at", `:MM` or am/pm, so the
    /// day in "december 3" is left for the date pass.
    #[serde(default)]
    pub bare_hour_times: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecurrenceKind {
    Daily,
    Weekly,
    Weekdays,
    Weekends,
    SpecificDay,
    Monthly,
    Interval,
}

#[derive(Debug, Clone)]
pub struct IntakeParser {
    options: ParserOptions,
    clock_time: Regex,
    time_of_day: Regex,
    dates: DateWordResolver,
    recurrence: Vec<(RecurrenceKind, Regex)>,
    priority: Vec<(Priority, Regex)>,
    categories: Vec<(&'static str, Regex)>,
    whitespace: Regex,
    leading_filler: Regex,
    trailing_filler: Regex,
}

impl IntakeParser {
    pub fn new() -> Result<Self> {
        Self::with_options(ParserOptions::default())
    }

    pub fn with_options(options: ParserOptions) -> Result<Self> {
        let weekdays = WEEKDAY_NAMES.join("|");
        let time_words = TIME_OF_DAY
            .iter()
            .map(|(word, _)| *word)
            .collect::<Vec<_>>()
            .join("|");

        let recurrence = vec![
            (RecurrenceKind::Daily, r"(?i)\b(?:daily|every\s*day|each\s+day)\b".to_string()),
            (RecurrenceKind::Weekly, r"(?i)\b(?:weekly|every\s+week|each\s+week)\b".to_string()),
            (
                RecurrenceKind::Weekdays,
                r"(?i)\b(?:every\s+weekday|(?:on\s+)?weekdays)\b".to_string(),
            ),
            (
                RecurrenceKind::Weekends,
                r"(?i)\b(?:every\s+weekend|(?:on\s+)?weekends)\b".to_string(),
            ),
            (
                RecurrenceKind::SpecificDay,
                format!(r"(?i)\b(?:every|each)\s+(?P<day>(?:{weekdays})s?)\b"),
            ),
            (RecurrenceKind::Monthly, r"(?i)\b(?:monthly|every\s+month|each\s+month)\b".to_string()),
            (
                RecurrenceKind::Interval,
                r"(?i)\b(?:every|each)\s+(?P<n>\d{1,3})\s+(?P<unit>days?|weeks?|months?)\b"
                    .to_string(),
            ),
        ]
        .into_iter()
        .map(|(kind, pattern)| Ok((kind, Regex::new(&pattern)?)))
        .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            options,
            clock_time: Regex::new(
                r"(?i)\b(?:(?P<at>at)\s+)?(?P<hour>\d{1,2})(?::(?P<minute>\d{2}))?(?:\s*(?P<meridiem>am|pm))?\b",
            )?,
            time_of_day: Regex::new(&format!(
                r"(?i)\b(?:(?:in\s+the|this|at)\s+)?(?P<word>{time_words})\b"
            ))?,
            dates: DateWordResolver::new()?.recurrence_aware(options.recurrence_aware_weekdays),
            recurrence,
            priority: priority_matchers()?,
            categories: category_matchers()?,
            whitespace: Regex::new(r"\s+")?,
            leading_filler: Regex::new(r"(?i)^(?:at|by|on|in)\s+")?,
            trailing_filler: Regex::new(r"(?i)\s+(?:at|by|on|in)$")?,
        })
    }

    pub fn options(&self) -> ParserOptions {
        self.options
    }

    /// Parse `raw` relative to the local calendar day `today`.
    ///
    /// Never fails: passes that find nothing leave their field unset. A draft
    /// whose title cleans up to nothing is returned as-is; check
    /// [`TaskDraft::is_actionable`].
    pub fn parse(&self, raw: &str, today: NaiveDate) -> TaskDraft {
        let mut text = raw.trim().to_string();
        let mut draft = TaskDraft::default();

        draft.due_time = self.extract_time(&mut text);

        if let Some(m) = self.dates.resolve(&text, today) {
            consume(&mut text, m.span);
            draft.due_date = Some(m.date);
        }

        draft.recurrence = self.extract_recurrence(&mut text);
        draft.priority = self.extract_priority(&mut text);
        draft.category = self.infer_category(&text);
        draft.title = self.finalize_title(&text);

        debug!("intake: '{}' -> {:?}", raw, draft);
        draft
    }

    fn extract_time(&self, text: &mut String) -> Option<String> {
        let clock = self.clock_time.captures_iter(text.as_str()).find_map(|caps| {
            let whole = caps.get(0)?;
            let hour: u32 = caps.name("hour")?.as_str().parse().ok()?;
            let minute: u32 = match caps.name("minute") {
                Some(m) => m.as_str().parse().ok()?,
                None => 0,
            };
            if minute > 59 {
                trace!("time: rejecting '{}'", whole.as_str());
                return None;
            }
            let meridiem = caps.name("meridiem").map(|m| m.as_str().to_ascii_lowercase());

            let anchored =
                caps.name("at").is_some() || caps.name("minute").is_some() || meridiem.is_some();
            if !anchored && !self.options.bare_hour_times {
                trace!("time: skipping bare number '{}'", whole.as_str());
                return None;
            }

            let hour = to_24_hour(hour, meridiem.as_deref())?;
            Some((whole.range(), format!("{hour:02}:{minute:02}")))
        });

        if let Some((span, time)) = clock {
            debug!("time: '{}' -> {}", &text[span.clone()], time);
            consume(text, span);
            return Some(time);
        }

        let (span, time) = {
            let caps = self.time_of_day.captures(text.as_str())?;
            let word = caps.name("word")?.as_str().to_ascii_lowercase();
            let (_, time) = TIME_OF_DAY.iter().find(|(w, _)| *w == word)?;
            (caps.get(0)?.range(), time.to_string())
        };
        debug!("time: coarse '{}' -> {}", &text[span.clone()], time);
        consume(text, span);
        Some(time)
    }

    fn extract_recurrence(&self, text: &mut String) -> Option<Recurrence> {
        let haystack = text.as_str();
        let (span, recurrence) = self.recurrence.iter().find_map(|(kind, re)| {
            let caps = re.captures(haystack)?;
            let recurrence = match kind {
                RecurrenceKind::Daily => Recurrence::new(RecurrenceRule::Daily),
                RecurrenceKind::Weekly => Recurrence::new(RecurrenceRule::Weekly),
                RecurrenceKind::Weekdays => Recurrence::weekly_on(1..=5),
                RecurrenceKind::Weekends => Recurrence::weekly_on([0, 6]),
                RecurrenceKind::SpecificDay => {
                    Recurrence::weekly_on([weekday_from_name(caps.name("day")?.as_str())?])
                }
                RecurrenceKind::Monthly => Recurrence::new(RecurrenceRule::Monthly),
                RecurrenceKind::Interval => {
                    let n: u32 = caps.name("n")?.as_str().parse().ok()?;
                    if n == 0 {
                        return None;
                    }
                    let unit = caps.name("unit")?.as_str().to_ascii_lowercase();
                    let rule = if unit.starts_with("day") {
                        RecurrenceRule::Daily
                    } else if unit.starts_with("week") {
                        RecurrenceRule::Weekly
                    } else {
                        RecurrenceRule::Monthly
                    };
                    Recurrence::every(rule, n)
                }
            };
            debug!("recurrence: {:?} '{}' -> {}", kind, &caps[0], recurrence);
            Some((caps.get(0)?.range(), recurrence))
        })?;

        consume(text, span);
        Some(recurrence)
    }

    fn extract_priority(&self, text: &mut String) -> Option<Priority> {
        let haystack = text.as_str();
        let (span, priority) = self
            .priority
            .iter()
            .find_map(|(priority, re)| re.find(haystack).map(|m| (m.range(), *priority)))?;
        debug!("priority: '{}' -> {}", &text[span.clone()], priority);
        consume(text, span);
        Some(priority)
    }

    /// Category words usually belong in the title, so nothing is removed.
    fn infer_category(&self, text: &str) -> Option<String> {
        let (category, _) = self.categories.iter().find(|(_, re)| re.is_match(text))?;
        debug!("category: {}", category);
        Some(category.to_string())
    }

    fn finalize_title(&self, text: &str) -> String {
        let collapsed = self.whitespace.replace_all(text.trim(), " ");
        let stripped = self.leading_filler.replace(&collapsed, "");
        let title = if self.options.sweep_trailing_fillers {
            self.trailing_filler.replace(stripped.trim(), "").trim().to_string()
        } else {
            stripped.trim().to_string()
        };
        capitalize_first(&title)
    }
}

/// 12-hour clock rules when a meridiem is present; otherwise the hour is
/// taken as 24-hour.
fn to_24_hour(hour: u32, meridiem: Option<&str>) -> Option<u32> {
    match meridiem {
        Some(_) if !(1..=12).contains(&hour) => None,
        Some("am") if hour == 12 => Some(0),
        Some("pm") if hour != 12 => Some(hour + 12),
        Some(_) => Some(hour),
        None if hour <= 23 => Some(hour),
        None => None,
    }
}

/// Replace a matched span with a single space so neighbours stay separate.
fn consume(text: &mut String, span: Range<usize>) {
    text.replace_range(span, " ");
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
