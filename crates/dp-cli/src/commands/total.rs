//! Total command for tracked time over a day or a date range.

use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use dp_core::calendar::{days_between_inclusive, days_in_range, format_date};
use dp_core::{DurationSummary, EntryStorage, EntryStore, TrackedDuration, total_for_range};

use super::util::RangeArgs;

#[derive(Debug, Args)]
pub struct TotalArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Output as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RangeTotals {
    start: NaiveDate,
    end: NaiveDate,
    days: i64,
    total: DurationSummary,
    per_day: Vec<DayTotal>,
}

#[derive(Debug, Serialize)]
struct DayTotal {
    date: NaiveDate,
    total: DurationSummary,
}

pub fn run<W: Write, S: EntryStorage>(
    writer: &mut W,
    store: &EntryStore<S>,
    args: &TotalArgs,
    today: NaiveDate,
) -> Result<()> {
    let (start, end) = args.range.resolve(today)?;
    let (start, end) = if start > end { (end, start) } else { (start, end) };

    let per_day: Vec<(NaiveDate, TrackedDuration)> = days_in_range(start, end)
        .map(|day| (day, store.total_for_date(day)))
        .filter(|(_, total)| !total.is_zero())
        .collect();
    let total = total_for_range(start, end, store.entries());

    if args.json {
        let totals = RangeTotals {
            start,
            end,
            days: days_between_inclusive(start, end),
            total: total.summary(),
            per_day: per_day
                .into_iter()
                .map(|(date, total)| DayTotal {
                    date,
                    total: total.summary(),
                })
                .collect(),
        };
        writeln!(writer, "{}", serde_json::to_string_pretty(&totals)?)?;
        return Ok(());
    }

    if start == end {
        writeln!(writer, "{}: {total}", format_date(start))?;
        return Ok(());
    }

    let days = days_between_inclusive(start, end);
    writeln!(
        writer,
        "{} to {} ({days} days)",
        format_date(start),
        format_date(end)
    )?;
    for (date, day_total) in &per_day {
        writeln!(writer, "  {}: {day_total}", format_date(*date))?;
    }
    writeln!(writer, "Total tracked: {total}")?;

    Ok(())
}
