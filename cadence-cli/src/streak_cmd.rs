use anyhow::{Context, Result, bail};
use cadence_core::{CompletionRecord, StreakPolicy, summarize};
use chrono::NaiveDate;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One row of an exported completion log; dates stay strings until validated.
#[derive(Debug, Deserialize)]
struct LogEntry {
    date: String,
    completed: bool,
}

pub fn read_log(path: &Path) -> Result<Vec<CompletionRecord>> {
    if !path.exists() {
        bail!("completion log not found: {}", path.display());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_log(&s).with_context(|| format!("parse {}", path.display()))
}

fn parse_log(s: &str) -> Result<Vec<CompletionRecord>> {
    let entries: Vec<LogEntry> = serde_json::from_str(s)?;
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| CompletionRecord::parse(&e.date, e.completed).with_context(|| format!("entry {i}")))
        .collect()
}

pub fn run(path: &Path, policy: StreakPolicy, today: NaiveDate, json: bool) -> Result<()> {
    let records = read_log(path)?;
    debug!("loaded {} completion records from {}", records.len(), path.display());

    let summary = summarize(&records, today, policy);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary).context("serialize summary")?);
        return Ok(());
    }

    println!("Current streak: {}", summary.current);
    println!("Longest streak: {}", summary.longest);
    match summary.last_completed {
        Some(d) => println!("Last completed: {d}"),
        None => println!("Last completed: never"),
    }
    if summary.current > 0 && !summary.alive {
        println!("Streak is no longer alive as of {today}.");
    }
    Ok(())
}
