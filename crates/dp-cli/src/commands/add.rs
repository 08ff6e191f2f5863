//! Add command for recording a new time block.

use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;

use dp_core::calendar::{add_hours_wrapping, format_date};
use dp_core::duration::entry_duration;
use dp_core::{EntryStorage, EntryStore, NewEntry, Title};

use super::util::{parse_time_arg, resolve_date};

#[derive(Debug, Args)]
pub struct AddArgs {
    /// What the time was spent on.
    pub title: String,

    /// Day of the entry. Defaults to today.
    #[arg(long)]
    pub date: Option<String>,

    /// Start time (HH:MM). Defaults to the end of the day's last entry.
    #[arg(long)]
    pub start: Option<String>,

    /// End time (HH:MM). Defaults to one hour after the start.
    ///
    /// An end at or before the start runs past midnight.
    #[arg(long)]
    pub end: Option<String>,

    /// Free-form notes.
    #[arg(long)]
    pub notes: Option<String>,
}

pub fn run<W: Write, S: EntryStorage>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    args: &AddArgs,
    today: NaiveDate,
) -> Result<()> {
    let date = resolve_date(args.date.as_deref(), today)?;
    let suggested = store.suggest_next_slot(date);

    let start_time = match &args.start {
        Some(start) => parse_time_arg(start)?,
        None => suggested.start(),
    };
    let end_time = match (&args.end, &args.start) {
        (Some(end), _) => parse_time_arg(end)?,
        (None, Some(_)) => add_hours_wrapping(start_time, 1),
        (None, None) => suggested.end(),
    };

    let new = NewEntry {
        date,
        start_time,
        end_time,
        title: Title::new(args.title.as_str())?,
        notes: args.notes.clone(),
    };
    let entry = store.add(new).context("failed to add entry")?;

    writeln!(
        writer,
        "Added {} on {}: {}    {} ({})",
        entry.id,
        format_date(entry.date),
        entry.interval(),
        entry.title,
        entry_duration(&entry)
    )?;
    Ok(())
}
