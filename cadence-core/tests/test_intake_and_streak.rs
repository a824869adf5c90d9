use cadence_core::{
    CompletionRecord, IntakeParser, ParserOptions, Priority, Recurrence, RecurrenceRule,
    StreakPolicy, TaskDraft, streak, streak_with, summarize,
};
use chrono::{Duration, NaiveDate};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// 2026-10-19 is a Monday, 2026-10-23 a Friday.
fn monday() -> NaiveDate {
    ymd(2026, 10, 19)
}

fn friday() -> NaiveDate {
    ymd(2026, 10, 23)
}

#[test]
fn test_call_mom_tomorrow_at_3pm() {
    let parser = IntakeParser::new().unwrap();
    let draft = parser.parse("call mom tomorrow at 3pm", monday());

    assert_eq!(
        draft,
        TaskDraft {
            title: "Call mom".to_string(),
            due_date: Some(ymd(2026, 10, 20)),
            due_time: Some("15:00".to_string()),
            priority: None,
            category: Some("personal".to_string()),
            recurrence: None,
        }
    );
}

#[test]
fn test_meditate_daily() {
    let draft = IntakeParser::new().unwrap().parse("meditate daily", monday());
    assert_eq!(draft.recurrence, Some(Recurrence::new(RecurrenceRule::Daily)));
    assert_eq!(draft.category.as_deref(), Some("health"));
    assert_eq!(draft.title, "Meditate");
}

#[test]
fn test_finish_report_by_friday() {
    let parser = IntakeParser::new().unwrap();

    let draft = parser.parse("finish report by friday", monday());
    assert_eq!(draft.due_date, Some(friday()));
    assert_eq!(draft.category.as_deref(), Some("work"));
    assert_eq!(draft.priority, None);

    // on a Friday, "friday" means next week
    let draft = parser.parse("finish report by friday", friday());
    assert_eq!(draft.due_date, Some(friday() + Duration::days(7)));
}

#[test]
fn test_reparsing_clean_title_is_stable() {
    let parser = IntakeParser::new().unwrap();
    let first = parser.parse("call mom tomorrow at 3pm", monday());
    let second = parser.parse(&first.title, monday());

    assert_eq!(second.title, first.title);
    assert_eq!(second.due_date, None);
    assert_eq!(second.due_time, None);
    assert_eq!(second.recurrence, None);
    assert_eq!(second.priority, None);
    // category words are never consumed, so the inference repeats
    assert_eq!(second.category, first.category);

    let third = parser.parse(&second.title, monday());
    assert_eq!(third, second);
}

#[test]
fn test_same_weekday_rolls_a_full_week() {
    let draft = IntakeParser::new().unwrap().parse("gym monday", monday());
    assert_eq!(draft.due_date, Some(ymd(2026, 10, 26)));
    assert_eq!(draft.title, "Gym");
}

#[test]
fn test_every_weekday_ownership_depends_on_options() {
    let plain = IntakeParser::new().unwrap();
    let draft = plain.parse("team sync every friday", monday());
    assert_eq!(draft.due_date, Some(friday()));
    assert_eq!(draft.recurrence, None);
    assert_eq!(draft.title, "Team sync every");

    let aware = IntakeParser::with_options(ParserOptions {
        recurrence_aware_weekdays: true,
        ..ParserOptions::default()
    })
    .unwrap();
    let draft = aware.parse("team sync every friday", monday());
    assert_eq!(draft.due_date, None);
    assert_eq!(draft.recurrence, Some(Recurrence::weekly_on([5])));
    assert_eq!(draft.title, "Team sync");
}

#[test]
fn test_full_pipeline_draft() {
    let parser = IntakeParser::new().unwrap();
    let draft = parser.parse("URGENT pay electricity bill next tuesday evening", monday());

    assert_eq!(draft.priority, Some(Priority::Urgent));
    assert_eq!(draft.due_date, Some(ymd(2026, 10, 27)));
    assert_eq!(draft.due_time.as_deref(), Some("18:00"));
    assert_eq!(draft.category.as_deref(), Some("finance"));
    assert_eq!(draft.title, "Pay electricity bill");

    let json = serde_json::to_value(&draft).unwrap();
    assert_eq!(json["dueDate"], "2026-10-27");
    assert_eq!(json["priority"], "urgent");
}

#[test]
fn test_streak_properties() {
    assert_eq!(streak(&[]), 0);
    assert_eq!(
        streak(&[CompletionRecord::parse("2026-02-13", false).unwrap()]),
        0
    );

    let d = ymd(2026, 2, 13);
    let run = [
        CompletionRecord::new(d, true),
        CompletionRecord::new(d - Duration::days(1), true),
        CompletionRecord::new(d - Duration::days(2), true),
    ];
    assert_eq!(streak(&run), 3);

    let broken = [
        CompletionRecord::new(d, true),
        CompletionRecord::new(d - Duration::days(1), false),
        CompletionRecord::new(d - Duration::days(2), true),
    ];
    assert_eq!(streak(&broken), 1);
}

#[test]
fn test_streak_from_json_log_with_duplicates() {
    let log = r#"[
        {"date": "2026-02-13", "completed": true},
        {"date": "2026-02-13", "completed": true},
        {"date": "2026-02-12", "completed": true},
        {"date": "2026-02-10", "completed": true}
    ]"#;
    let records: Vec<CompletionRecord> = serde_json::from_str(log).unwrap();

    assert_eq!(streak(&records), 3);
    assert_eq!(streak_with(&records, StreakPolicy { dedupe_same_day: true }), 2);

    let summary = summarize(&records, ymd(2026, 2, 15), StreakPolicy::default());
    assert_eq!(summary.current, 3);
    assert!(!summary.alive);
}
