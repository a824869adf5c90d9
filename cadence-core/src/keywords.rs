//! Ordered keyword tables for priority and category inference.
//!
//! Order matters: the first class/category with a hit wins, so these are
//! slices rather than maps.

use anyhow::Result;
use regex::Regex;

use crate::draft::Priority;

/// Priority classes in the order they are tried. Medium is never inferred.
pub const PRIORITY_PATTERNS: &[(Priority, &str)] = &[
    (Priority::Urgent, r"(?i)\b(?:urgent|urgently|asap|critical)\b|!!!"),
    (Priority::High, r"(?i)\b(?:high\s+priority|important)\b|!!"),
    (
        Priority::Low,
        r"(?i)\b(?:low\s+priority|someday|whenever|eventually|no\s+rush)\b",
    ),
];

/// Topical keywords per category, scanned in this order.
pub const CATEGORY_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "health",
        &[
            "gym", "workout", "exercise", "run", "running", "jog", "yoga", "meditate",
            "meditation", "doctor", "dentist", "medicine", "pills", "walk", "stretch",
            "sleep",
        ],
    ),
    (
        "work",
        &[
            "meeting", "report", "email", "presentation", "project", "deadline", "client",
            "standup", "slides", "review", "office",
        ],
    ),
    (
        "finance",
        &[
            "pay", "bill", "bills", "rent", "bank", "tax", "taxes", "budget", "invoice",
            "insurance", "savings",
        ],
    ),
    (
        "shopping",
        &["buy", "groceries", "grocery", "shop", "shopping", "order", "pick up"],
    ),
    (
        "learning",
        &[
            "read", "study", "learn", "course", "homework", "practice", "lesson", "class",
            "book",
        ],
    ),
    (
        "personal",
        &[
            "call", "mom", "dad", "family", "friend", "friends", "birthday", "clean",
            "laundry", "cook", "dinner",
        ],
    ),
];

/// Compile the priority table, preserving order.
pub fn priority_matchers() -> Result<Vec<(Priority, Regex)>> {
    PRIORITY_PATTERNS
        .iter()
        .map(|(priority, pattern)| Ok((*priority, Regex::new(pattern)?)))
        .collect()
}

/// Compile one whole-word alternation per category, preserving order.
pub fn category_matchers() -> Result<Vec<(&'static str, Regex)>> {
    CATEGORY_KEYWORDS
        .iter()
        .map(|(category, words)| {
            let alternation = words
                .iter()
                .map(|w| regex::escape(w).replace(' ', r"\s+"))
                .collect::<Vec<_>>()
                .join("|");
            Ok((*category, Regex::new(&format!(r"(?i)\b(?:{alternation})\b"))?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categorize(text: &str) -> Option<&'static str> {
        category_matchers()
            .unwrap()
            .into_iter()
            .find(|(_, re)| re.is_match(text))
            .map(|(c, _)| c)
    }

    #[test]
    fn test_categorize_health() {
        assert_eq!(categorize("gym with sam"), Some("health"));
        assert_eq!(categorize("Meditate"), Some("health"));
    }

    #[test]
    fn test_categorize_work() {
        assert_eq!(categorize("finish report by"), Some("work"));
    }

    #[test]
    fn test_categorize_personal() {
        assert_eq!(categorize("call mom"), Some("personal"));
    }

    #[test]
    fn test_first_category_in_table_order_wins() {
        // health is listed before personal
        assert_eq!(categorize("walk with mom"), Some("health"));
    }

    #[test]
    fn test_keywords_match_whole_words_only() {
        assert_eq!(categorize("brunch"), None);
        assert_eq!(categorize("payroll question"), None);
        assert_eq!(categorize("pick  up parcel"), Some("shopping"));
    }

    #[test]
    fn test_priority_table_order() {
        let matchers = priority_matchers().unwrap();
        let first = |text: &str| {
            matchers
                .iter()
                .find(|(_, re)| re.is_match(text))
                .map(|(p, _)| *p)
        };
        assert_eq!(first("fix prod!!!"), Some(Priority::Urgent));
        assert_eq!(first("fix prod!!"), Some(Priority::High));
        assert_eq!(first("important but also someday"), Some(Priority::High));
        assert_eq!(first("clean garage someday"), Some(Priority::Low));
        assert_eq!(first("clean garage"), None);
    }
}
