use anyhow::{Context, Result};
use cadence_core::{IntakeParser, TaskDraft};
use chrono::NaiveDate;
use log::{info, warn};

use crate::config::Config;

pub fn run(cfg: &Config, text: &str, today: NaiveDate, json: bool) -> Result<()> {
    let trimmed = text.trim();
    if too_short(trimmed, cfg.intake.min_input_length) {
        warn!(
            "input '{}' is shorter than min_input_length={}",
            trimmed, cfg.intake.min_input_length
        );
        println!(
            "Input too short (need at least {} characters); nothing parsed.",
            cfg.intake.min_input_length
        );
        return Ok(());
    }

    let parser = IntakeParser::with_options(cfg.intake.options).context("build intake parser")?;
    let draft = parser.parse(trimmed, today);
    info!("parsed draft relative to {today}");

    if json {
        println!("{}", serde_json::to_string_pretty(&draft).context("serialize draft")?);
        return Ok(());
    }

    if !draft.is_actionable() {
        println!("No actionable task (title is empty after extraction).");
    }
    print!("{}", render(&draft));
    Ok(())
}

/// Length is counted in characters after trimming surrounding whitespace.
fn too_short(text: &str, min: usize) -> bool {
    text.trim().chars().count() < min
}

fn render(draft: &TaskDraft) -> String {
    let unset = "-".to_string();
    let due_date = draft
        .due_date
        .map(|d| format!("{} ({})", d, d.format("%a")))
        .unwrap_or_else(|| unset.clone());

    let rows = [
        ("Title", draft.title.clone()),
        ("Due date", due_date),
        ("Due time", draft.due_time.clone().unwrap_or_else(|| unset.clone())),
        (
            "Priority",
            draft.priority.map(|p| p.to_string()).unwrap_or_else(|| unset.clone()),
        ),
        ("Category", draft.category.clone().unwrap_or_else(|| unset.clone())),
        (
            "Recurrence",
            draft.recurrence.as_ref().map(|r| r.to_string()).unwrap_or(unset),
        ),
    ];

    rows.iter()
        .map(|(label, value)| format!("{:<11} {}\n", format!("{label}:"), value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_short_counts_trimmed_chars() {
        assert!(too_short("ab", 3));
        assert!(!too_short("abc", 3));
        assert!(!too_short("abcd", 3));
        assert!(too_short("  ab  ", 3));
        assert!(!too_short("  abc  ", 3));
        assert!(too_short("   ", 1));
        assert!(!too_short("", 0));
        // characters, not bytes
        assert!(!too_short("été", 3));
    }

    #[test]
    fn test_render_marks_unset_fields() {
        let mut draft = TaskDraft::new("Call mom");
        draft.due_date = NaiveDate::from_ymd_opt(2026, 10, 20);
        draft.due_time = Some("15:00".to_string());

        let out = render(&draft);
        assert!(out.contains("Title:      Call mom\n"));
        assert!(out.contains("Due date:   2026-10-20 (Tue)\n"));
        assert!(out.contains("Priority:   -\n"));
        assert!(out.contains("Recurrence: -\n"));
    }
}
