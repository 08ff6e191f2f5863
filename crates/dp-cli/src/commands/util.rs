//! Shared utilities for CLI commands.

use std::fs::{self, File};
use std::sync::LazyLock;

use anyhow::{Context, Result, bail};
use chrono::{Duration, NaiveDate, NaiveTime};
use clap::Args;
use fs2::FileExt;
use regex::Regex;

use dp_core::calendar::{parse_date, parse_time};
use dp_core::EntryStore;
use dp_db::Database;

use crate::Config;

/// Pre-compiled regex for relative dates.
static RELATIVE_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+(day|week)s?\s+(ago|ahead)$").unwrap());

/// Conservative bound for relative dates (~100 years in days).
const MAX_RELATIVE_DAYS: i64 = 100 * 366;

/// Parse a date argument relative to `today`.
///
/// Supports:
/// - ISO dates: "2025-11-02"
/// - Keywords: "today", "yesterday", "tomorrow"
/// - Relative: "3 days ago", "1 week ago", "2 days ahead"
pub fn parse_date_arg(s: &str, today: NaiveDate) -> Result<NaiveDate> {
    let s = s.trim();
    match s.to_ascii_lowercase().as_str() {
        "today" => return Ok(today),
        "yesterday" => return Ok(today - Duration::days(1)),
        "tomorrow" => return Ok(today + Duration::days(1)),
        _ => {}
    }

    if let Ok(date) = parse_date(s) {
        return Ok(date);
    }

    let Some(caps) = RELATIVE_DATE_RE.captures(s) else {
        bail!(
            "Invalid date: {s}. Use YYYY-MM-DD, today, yesterday, tomorrow, or relative (e.g., '3 days ago')"
        );
    };

    let n: i64 = caps[1]
        .parse()
        .context("failed to parse number in relative date")?;
    let days = match &caps[2] {
        "day" => n,
        "week" => n.saturating_mul(7),
        unit => bail!("Unknown date unit: {unit}"),
    };
    if days > MAX_RELATIVE_DAYS {
        bail!("Relative date too far away: {s}");
    }

    let offset = Duration::days(days);
    Ok(if &caps[3] == "ago" {
        today - offset
    } else {
        today + offset
    })
}

/// Resolve an optional date argument, defaulting to `today`.
pub fn resolve_date(arg: Option<&str>, today: NaiveDate) -> Result<NaiveDate> {
    arg.map_or(Ok(today), |s| parse_date_arg(s, today))
}

/// Parse an `HH:MM` time argument.
pub fn parse_time_arg(s: &str) -> Result<NaiveTime> {
    Ok(parse_time(s)?)
}

/// A single day or an inclusive date range.
#[derive(Debug, Clone, Default, Args)]
pub struct RangeArgs {
    /// Day to use (YYYY-MM-DD, today, yesterday, "N days ago"). Defaults to today.
    #[arg(long, conflicts_with_all = ["from", "to"])]
    pub date: Option<String>,

    /// First day of the range.
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Last day of the range.
    #[arg(long, requires = "from")]
    pub to: Option<String>,
}

impl RangeArgs {
    /// Returns the `(start, end)` bounds as given; callers decide how to order them.
    pub fn resolve(&self, today: NaiveDate) -> Result<(NaiveDate, NaiveDate)> {
        match (&self.from, &self.to) {
            (Some(from), Some(to)) => {
                Ok((parse_date_arg(from, today)?, parse_date_arg(to, today)?))
            }
            (None, None) => {
                let date = resolve_date(self.date.as_deref(), today)?;
                Ok((date, date))
            }
            _ => bail!("--from and --to must be given together"),
        }
    }
}

/// How a command needs the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// An entry store over the configured database, holding the data directory lock.
///
/// The lock is released when this value is dropped.
pub struct LockedStore {
    pub store: EntryStore<Database>,
    _lock: File,
}

/// Open the configured database behind an advisory lock.
///
/// Writers take the lock exclusively so that validation and commit cannot race
/// with another `dp` process; readers share it.
pub fn open_store(config: &Config, access: Access) -> Result<LockedStore> {
    if let Some(parent) = config.database_path.parent() {
        fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let lock_path = config.database_path.with_extension("lock");
    let lock = File::create(&lock_path)
        .with_context(|| format!("failed to create lock file {}", lock_path.display()))?;
    match access {
        Access::Write => FileExt::lock_exclusive(&lock),
        Access::Read => FileExt::lock_shared(&lock),
    }
    .context("failed to acquire lock")?;

    let db = Database::open(&config.database_path)
        .with_context(|| format!("failed to open {}", config.database_path.display()))?;
    let store = EntryStore::open(db, config.inversion_policy).context("failed to load entries")?;
    tracing::debug!(?access, path = %config.database_path.display(), "opened entry store");

    Ok(LockedStore { store, _lock: lock })
}

/// Store over in-memory storage for command tests.
#[cfg(test)]
pub fn test_store(
    entries: Vec<dp_core::TimeEntry>,
) -> EntryStore<dp_core::MemoryStorage> {
    EntryStore::open(
        dp_core::MemoryStorage::new(entries),
        dp_core::InversionPolicy::default(),
    )
    .unwrap()
}
