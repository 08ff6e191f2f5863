//! The persisted time entry and the command payload that creates one.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::hhmm;
use crate::interval::Interval;
use crate::types::{EntryId, Title};

/// One recorded time block on a calendar day.
///
/// Field names serialize in the same camelCase layout as the planner's
/// JSON exports (`startTime`, `endTime`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub title: Title,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TimeEntry {
    /// Materialises a new entry, assigning its ID and creation timestamp.
    pub fn create(new: NewEntry, created_at: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::generate(),
            date: new.date,
            start_time: new.start_time,
            end_time: new.end_time,
            title: new.title,
            notes: normalize_notes(new.notes),
            created_at,
        }
    }

    pub const fn interval(&self) -> Interval {
        Interval::new(self.start_time, self.end_time)
    }
}

/// Everything needed to create an entry; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub title: Title,
    pub notes: Option<String>,
}

impl NewEntry {
    pub const fn interval(&self) -> Interval {
        Interval::new(self.start_time, self.end_time)
    }
}

/// Blank notes are stored as absent.
pub fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes.filter(|n| !n.trim().is_empty())
}

/// Sorts entries by start time; entries sharing a start keep their relative order.
pub fn sort_by_start(entries: &mut [&TimeEntry]) {
    entries.sort_by_key(|entry| entry.start_time);
}

/// The demo day the planner ships with: a school day on 2025-11-02.
pub fn seed_entries() -> Vec<TimeEntry> {
    let date = NaiveDate::from_ymd_opt(2025, 11, 2).unwrap_or_default();
    let created_at = date
        .and_hms_opt(12, 0, 0)
        .unwrap_or_default()
        .and_utc();
    let rows = [
        ("1", 0, 6, "Sleeping", Some("Deep sleep cycle.")),
        ("2", 6, 9, "Morning routine & prepare for school", None),
        ("3", 9, 16, "School", Some("Classes and study sessions.")),
    ];

    rows.into_iter()
        .filter_map(|(id, start, end, title, notes)| {
            Some(TimeEntry {
                id: EntryId::new(id).ok()?,
                date,
                start_time: NaiveTime::from_hms_opt(start, 0, 0)?,
                end_time: NaiveTime::from_hms_opt(end, 0, 0)?,
                title: Title::new(title).ok()?,
                notes: notes.map(String::from),
                created_at,
            })
        })
        .collect()
}
