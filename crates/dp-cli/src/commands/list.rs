//! List command for showing the time blocks of one day.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use dp_core::duration::entry_duration;
use dp_core::{DurationSummary, EntryStorage, EntryStore, TimeEntry};

use super::util::resolve_date;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Day to show (YYYY-MM-DD, today, yesterday, "N days ago"). Defaults to today.
    #[arg(long)]
    pub date: Option<String>,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON form of a day.
#[derive(Debug, Serialize)]
struct DayListing<'a> {
    date: NaiveDate,
    total: DurationSummary,
    entries: Vec<ListedEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ListedEntry<'a> {
    #[serde(flatten)]
    entry: &'a TimeEntry,
    duration: DurationSummary,
}

pub fn run<W: Write, S: EntryStorage>(
    writer: &mut W,
    store: &EntryStore<S>,
    args: &ListArgs,
    today: NaiveDate,
) -> Result<()> {
    let date = resolve_date(args.date.as_deref(), today)?;
    let entries = store.entries_for_date(date);
    let total = store.total_for_date(date);

    if args.json {
        let listing = DayListing {
            date,
            total: total.summary(),
            entries: entries
                .iter()
                .map(|&entry| ListedEntry {
                    entry,
                    duration: entry_duration(entry).summary(),
                })
                .collect(),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&listing)?)?;
        return Ok(());
    }

    writeln!(writer, "{}", date.format("%A, %B %-d, %Y"))?;
    writeln!(writer, "Total tracked: {total}")?;

    if entries.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "No entries for this day.")?;
        return Ok(());
    }

    for entry in entries {
        writeln!(writer)?;
        writeln!(
            writer,
            "[{}] {}    {} ({})",
            entry.id,
            entry.interval(),
            entry.title,
            entry_duration(entry)
        )?;
        if let Some(notes) = &entry.notes {
            writeln!(writer, "    {notes}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use dp_core::calendar::parse_date;
    use dp_core::seed_entries;
    use insta::assert_snapshot;

    use crate::commands::util::test_store;

    fn today() -> NaiveDate {
        parse_date("2025-11-02").unwrap()
    }

    fn list(args: &ListArgs) -> String {
        let store = test_store(seed_entries());
        let mut output = Vec::new();
        run(&mut output, &store, args, today()).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn list_shows_day_in_start_order() {
        let output = list(&ListArgs {
            date: None,
            json: false,
        });
        assert_snapshot!(output, @r"
        Sunday, November 2, 2025
        Total tracked: 16 hours

        [1] 00:00 - 06:00    Sleeping (6 hours)
            Deep sleep cycle.

        [2] 06:00 - 09:00    Morning routine & prepare for school (3 hours)

        [3] 09:00 - 16:00    School (7 hours)
            Classes and study sessions.
        ");
    }

    #[test]
    fn list_empty_day() {
        let output = list(&ListArgs {
            date: Some("tomorrow".to_string()),
            json: false,
        });
        assert_snapshot!(output, @r"
        Monday, November 3, 2025
        Total tracked: 0 minutes

        No entries for this day.
        ");
    }

    #[test]
    fn list_json_includes_durations() {
        let output = list(&ListArgs {
            date: Some("2025-11-02".to_string()),
            json: true,
        });
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["date"], "2025-11-02");
        assert_eq!(value["total"]["display"], "16 hours");
        assert_eq!(value["entries"][0]["startTime"], "00:00");
        assert_eq!(value["entries"][0]["duration"]["hours"], 6);
        assert!(value["entries"][1].get("notes").is_none());
    }
}
