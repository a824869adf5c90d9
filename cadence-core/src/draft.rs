//! Task draft model: the structured result of parsing free text.
//!
//! Drafts are ephemeral. The caller that persists them owns defaults such as
//! "medium" priority or an "inbox" category; a missing field here means
//! "unspecified", never "default".

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceRule {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceConfig {
    /// Repeat every `interval` units of the rule (1 = every day/week/month).
    pub interval: u32,
    /// Sunday = 0 through Saturday = 6. Empty means "any day".
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub days_of_week: BTreeSet<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    pub rule: RecurrenceRule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<RecurrenceConfig>,
}

impl Recurrence {
    pub fn new(rule: RecurrenceRule) -> Self {
        Self { rule, config: None }
    }

    /// Weekly recurrence restricted to the given weekday indices.
    pub fn weekly_on(days: impl IntoIterator<Item = u8>) -> Self {
        Self {
            rule: RecurrenceRule::Weekly,
            config: Some(RecurrenceConfig {
                interval: 1,
                days_of_week: days.into_iter().filter(|d| *d <= 6).collect(),
            }),
        }
    }

    pub fn every(rule: RecurrenceRule, interval: u32) -> Self {
        Self {
            rule,
            config: Some(RecurrenceConfig {
                interval,
                days_of_week: BTreeSet::new(),
            }),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self.rule {
            RecurrenceRule::Daily => "day",
            RecurrenceRule::Weekly => "week",
            RecurrenceRule::Monthly => "month",
        };
        let Some(config) = &self.config else {
            return write!(f, "every {unit}");
        };
        if config.interval > 1 {
            write!(f, "every {} {unit}s", config.interval)?;
        } else {
            write!(f, "every {unit}")?;
        }
        if !config.days_of_week.is_empty() {
            let names: Vec<&str> = config
                .days_of_week
                .iter()
                .filter_map(|d| WEEKDAY_SHORT.get(*d as usize).copied())
                .collect();
            if !names.is_empty() {
                write!(f, " on {}", names.join(","))?;
            }
        }
        Ok(())
    }
}

const WEEKDAY_SHORT: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

/// Structured, not-yet-persisted task.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    /// 24-hour "HH:MM".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_time: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// An empty title after cleanup means there is nothing to create.
    pub fn is_actionable(&self) -> bool {
        !self.title.trim().is_empty()
    }
}
