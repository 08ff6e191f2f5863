//! Plain-text export of a date range.
//!
//! The layout is fixed so that existing exports stay comparable:
//!
//! ```text
//! Date: 2025-11-02
//!
//! 00:00 - 06:00    Sleeping
//! 06:00 - 09:00    Morning routine & prepare for school
//!
//! Total tracked: 9 hours 0 minutes
//!
//! Date: 2025-11-03
//!
//! 09:00 - 16:00    School
//!
//! Total tracked: 7 hours 0 minutes
//!
//!
//! Overall Total: 16 hours 0 minutes
//! ```
//!
//! Days without entries are skipped. The overall footer only appears when the
//! range spans more than one day. There is no trailing newline.

use chrono::NaiveDate;
use thiserror::Error;

use crate::calendar::{days_in_range, format_date, format_time};
use crate::duration::{TrackedDuration, total_for_date};
use crate::entry::{TimeEntry, sort_by_start};

/// A rendered export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// First day of the range, after ordering the bounds.
    pub start: NaiveDate,
    /// Last day of the range, after ordering the bounds.
    pub end: NaiveDate,
    pub text: String,
    /// Sum of the per-day totals.
    pub total: TrackedDuration,
    /// Number of days that produced a block.
    pub days_with_entries: usize,
}

impl Report {
    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// `tracker-{date}.txt` for one day, `tracker-{start}_to_{end}.txt` for a range.
    pub fn file_name(&self) -> String {
        if self.is_single_day() {
            format!("tracker-{}.txt", format_date(self.start))
        } else {
            format!(
                "tracker-{}_to_{}.txt",
                format_date(self.start),
                format_date(self.end)
            )
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// No day in the range has any entries.
    #[error("no entries found between {start} and {end}")]
    EmptyRange { start: NaiveDate, end: NaiveDate },
}

/// Either a rendered report or the signal that the range held nothing to export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    Text(Report),
    Empty,
}

/// Renders the report for `[start, end]`, swapping the bounds when inverted.
pub fn render(
    start: NaiveDate,
    end: NaiveDate,
    entries: &[TimeEntry],
) -> Result<Report, ReportError> {
    let (start, end) = if start > end { (end, start) } else { (start, end) };

    let mut text = String::new();
    let mut overall = TrackedDuration::ZERO;
    let mut days_with_entries = 0;

    for day in days_in_range(start, end) {
        let mut day_entries: Vec<&TimeEntry> =
            entries.iter().filter(|entry| entry.date == day).collect();
        if day_entries.is_empty() {
            continue;
        }
        sort_by_start(&mut day_entries);

        if !text.is_empty() {
            text.push_str("\n\n");
        }
        text.push_str(&format!("Date: {}\n\n", format_date(day)));
        for entry in &day_entries {
            text.push_str(&format!(
                "{} - {}    {}\n",
                format_time(entry.start_time),
                format_time(entry.end_time),
                entry.title
            ));
        }

        let day_total = total_for_date(day, entries);
        overall = overall + day_total;
        days_with_entries += 1;
        text.push_str(&format!("\nTotal tracked: {}", day_total.numeric_label()));
    }

    if days_with_entries == 0 {
        tracing::debug!(%start, %end, "no entries in export range");
        return Err(ReportError::EmptyRange { start, end });
    }

    if start != end && !overall.is_zero() {
        text.push_str(&format!("\n\n\nOverall Total: {}", overall.numeric_label()));
    }

    Ok(Report {
        start,
        end,
        text,
        total: overall,
        days_with_entries,
    })
}

pub fn generate_report(
    start: NaiveDate,
    end: NaiveDate,
    all_entries: &[TimeEntry],
) -> ReportOutcome {
    match render(start, end, all_entries) {
        Ok(report) => ReportOutcome::Text(report),
        Err(ReportError::EmptyRange { .. }) => ReportOutcome::Empty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{parse_date, parse_time};
    use crate::entry::seed_entries;
    use crate::types::{EntryId, Title};

    use insta::assert_snapshot;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn entry(id: &str, day: &str, start: &str, end: &str, title: &str) -> TimeEntry {
        TimeEntry {
            id: EntryId::new(id).unwrap(),
            date: date(day),
            start_time: parse_time(start).unwrap(),
            end_time: parse_time(end).unwrap(),
            title: Title::new(title).unwrap(),
            notes: None,
            created_at: "2025-11-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_report_seed_day() {
        let report = render(date("2025-11-02"), date("2025-11-02"), &seed_entries()).unwrap();
        assert_eq!(report.days_with_entries, 1);
        assert_eq!(report.file_name(), "tracker-2025-11-02.txt");
        assert_snapshot!(report.text, @r"
        Date: 2025-11-02

        00:00 - 06:00    Sleeping
        06:00 - 09:00    Morning routine & prepare for school
        09:00 - 16:00    School

        Total tracked: 16 hours 0 minutes
        ");
    }

    #[test]
    fn single_day_text_is_exact() {
        let entries = [entry("x", "2025-11-04", "13:00", "13:45", "Lunch")];
        let report = render(date("2025-11-04"), date("2025-11-04"), &entries).unwrap();
        assert_eq!(
            report.text,
            "Date: 2025-11-04\n\n13:00 - 13:45    Lunch\n\nTotal tracked: 0 hours 45 minutes"
        );
    }

    #[test]
    fn test_report_multi_day_range() {
        let mut entries = seed_entries();
        entries.push(entry("4", "2025-11-04", "22:00", "06:00", "Night shift"));
        entries.push(entry("5", "2025-11-04", "08:30", "09:15", "Gym"));

        let report = render(date("2025-11-01"), date("2025-11-05"), &entries).unwrap();
        assert_eq!(report.days_with_entries, 2);
        assert_eq!(report.total, TrackedDuration { hours: 24, minutes: 45 });
        assert_eq!(report.file_name(), "tracker-2025-11-01_to_2025-11-05.txt");
        assert_snapshot!(report.text, @r"
        Date: 2025-11-02

        00:00 - 06:00    Sleeping
        06:00 - 09:00    Morning routine & prepare for school
        09:00 - 16:00    School

        Total tracked: 16 hours 0 minutes

        Date: 2025-11-04

        08:30 - 09:15    Gym
        22:00 - 06:00    Night shift

        Total tracked: 8 hours 45 minutes


        Overall Total: 24 hours 45 minutes
        ");
    }

    #[test]
    fn multi_day_range_separators_are_exact() {
        let entries = [
            entry("a", "2025-11-01", "09:00", "10:00", "A"),
            entry("b", "2025-11-02", "09:00", "09:30", "B"),
        ];
        let report = render(date("2025-11-01"), date("2025-11-02"), &entries).unwrap();
        assert_eq!(
            report.text,
            "Date: 2025-11-01\n\n09:00 - 10:00    A\n\nTotal tracked: 1 hours 0 minutes\
             \n\nDate: 2025-11-02\n\n09:00 - 09:30    B\n\nTotal tracked: 0 hours 30 minutes\
             \n\n\nOverall Total: 1 hours 30 minutes"
        );
    }

    #[test]
    fn range_with_one_populated_day_still_gets_overall_total() {
        let report = render(date("2025-11-02"), date("2025-11-03"), &seed_entries()).unwrap();
        assert!(report.text.ends_with("\n\n\nOverall Total: 16 hours 0 minutes"));
    }

    #[test]
    fn swapped_range_renders_identically() {
        let entries = seed_entries();
        let forward = render(date("2025-10-30"), date("2025-11-03"), &entries).unwrap();
        let backward = render(date("2025-11-03"), date("2025-10-30"), &entries).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(backward.file_name(), "tracker-2025-10-30_to_2025-11-03.txt");
    }

    #[test]
    fn empty_range_is_signalled() {
        let err = render(date("2025-12-01"), date("2025-12-07"), &seed_entries()).unwrap_err();
        assert_eq!(
            err,
            ReportError::EmptyRange {
                start: date("2025-12-01"),
                end: date("2025-12-07"),
            }
        );
        assert_eq!(
            generate_report(date("2025-12-07"), date("2025-12-01"), &seed_entries()),
            ReportOutcome::Empty
        );
    }

    #[test]
    fn entries_are_listed_by_start_time() {
        let entries = [
            entry("a", "2025-11-06", "10:00", "12:00", "Late"),
            entry("b", "2025-11-06", "08:00", "09:00", "Early"),
        ];
        let ReportOutcome::Text(report) =
            generate_report(date("2025-11-06"), date("2025-11-06"), &entries)
        else {
            panic!("expected a report");
        };
        let lines: Vec<_> = report.text.lines().collect();
        assert_eq!(lines[2], "08:00 - 09:00    Early");
        assert_eq!(lines[3], "10:00 - 12:00    Late");
        assert_eq!(lines[5], "Total tracked: 3 hours 0 minutes");
    }
}
