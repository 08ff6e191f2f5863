//! Duration of entries and tracked-time totals.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use chrono::{Duration, NaiveDate, NaiveTime};
use serde::Serialize;

use crate::entry::TimeEntry;

/// A whole-minute duration split into hours and minutes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TrackedDuration {
    pub hours: u32,
    pub minutes: u32,
}

impl TrackedDuration {
    pub const ZERO: Self = Self {
        hours: 0,
        minutes: 0,
    };

    pub const fn from_minutes(total: u32) -> Self {
        Self {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    pub const fn total_minutes(self) -> u32 {
        self.hours * 60 + self.minutes
    }

    pub const fn is_zero(self) -> bool {
        self.total_minutes() == 0
    }

    /// `"{h} hours {m} minutes"` with both units always present, as used in
    /// exported reports.
    pub fn numeric_label(self) -> String {
        format!("{} hours {} minutes", self.hours, self.minutes)
    }

    pub fn summary(self) -> DurationSummary {
        DurationSummary {
            hours: self.hours,
            minutes: self.minutes,
            display: self.to_string(),
        }
    }
}

/// Human-readable form: zero units are omitted, "0 minutes" when empty.
impl fmt::Display for TrackedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn unit(n: u32, singular: &str) -> String {
            if n == 1 {
                format!("{n} {singular}")
            } else {
                format!("{n} {singular}s")
            }
        }

        match (self.hours, self.minutes) {
            (0, 0) => write!(f, "0 minutes"),
            (h, 0) => write!(f, "{}", unit(h, "hour")),
            (0, m) => write!(f, "{}", unit(m, "minute")),
            (h, m) => write!(f, "{} {}", unit(h, "hour"), unit(m, "minute")),
        }
    }
}

impl Add for TrackedDuration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_minutes(self.total_minutes() + rhs.total_minutes())
    }
}

impl Sum for TrackedDuration {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

/// Structured duration plus its display string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationSummary {
    pub hours: u32,
    pub minutes: u32,
    pub display: String,
}

/// Duration of a single interval anchored to `date`.
///
/// When `end <= start` the end is moved to the following day, which covers
/// both overnight spans and full-day blocks (24 hours).
pub fn duration(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> TrackedDuration {
    let start_at = date.and_time(start);
    let mut end_at = date.and_time(end);
    if end_at <= start_at {
        end_at += Duration::days(1);
    }
    let minutes = (end_at - start_at).num_minutes();
    TrackedDuration::from_minutes(u32::try_from(minutes).unwrap_or_default())
}

pub fn entry_duration(entry: &TimeEntry) -> TrackedDuration {
    duration(entry.date, entry.start_time, entry.end_time)
}

/// Sum of the durations of every entry on `date`.
///
/// This is a plain sum; non-overlap is the store's responsibility.
pub fn total_for_date(date: NaiveDate, entries: &[TimeEntry]) -> TrackedDuration {
    entries
        .iter()
        .filter(|entry| entry.date == date)
        .map(entry_duration)
        .sum()
}

/// Sum of day totals across the inclusive range; the bounds may be given in either order.
pub fn total_for_range(
    start: NaiveDate,
    end: NaiveDate,
    entries: &[TimeEntry],
) -> TrackedDuration {
    let (start, end) = if start > end { (end, start) } else { (start, end) };
    entries
        .iter()
        .filter(|entry| (start..=end).contains(&entry.date))
        .map(entry_duration)
        .sum()
}

pub fn compute_duration(date: NaiveDate, start: NaiveTime, end: NaiveTime) -> DurationSummary {
    duration(date, start, end).summary()
}

pub fn compute_day_total(date: NaiveDate, all_entries: &[TimeEntry]) -> DurationSummary {
    total_for_date(date, all_entries).summary()
}
