//! Overlap and ordering checks for candidate intervals.
//!
//! Validation runs against the entries of a single date. The rules apply in order:
//!
//! 1. Ordering, per [`InversionPolicy`]. Under the default policy an end before the
//!    start is an overnight span and passes; under `Strict` it is rejected as
//!    inverted. Equal endpoints are a full-day block and always pass.
//! 2. Half-open overlap against every entry except `exclude_id`, after rolling
//!    overnight and full-day ends forward by 24 hours.

use chrono::NaiveTime;
use thiserror::Error;

use crate::entry::TimeEntry;
use crate::interval::{Interval, IntervalKind};
use crate::types::{EntryId, InversionPolicy};

/// Why a candidate interval was refused.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// End before start while overnight spans are disallowed.
    #[error(
        "end time {} cannot be before start time {}",
        .end.format("%H:%M"),
        .start.format("%H:%M")
    )]
    Inverted { start: NaiveTime, end: NaiveTime },

    /// The candidate shares time with an existing entry on the same date.
    #[error("time block overlaps with existing entry {conflicting} ({interval})")]
    Overlap {
        conflicting: EntryId,
        interval: Interval,
    },
}

impl Rejection {
    /// Short machine-readable reason.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::Inverted { .. } => "inverted",
            Self::Overlap { .. } => "overlap",
        }
    }
}

/// Validates `candidate` against the entries of its date.
///
/// `existing` is expected to hold only entries of the candidate's date; the
/// caller owns that filtering.
pub fn validate<'a, I>(
    candidate: &Interval,
    existing: I,
    exclude_id: Option<&EntryId>,
    policy: InversionPolicy,
) -> Result<(), Rejection>
where
    I: IntoIterator<Item = &'a TimeEntry>,
{
    if policy == InversionPolicy::Strict && candidate.kind() == IntervalKind::Overnight {
        return Err(Rejection::Inverted {
            start: candidate.start(),
            end: candidate.end(),
        });
    }

    let conflict = existing
        .into_iter()
        .filter(|entry| exclude_id != Some(&entry.id))
        .find(|entry| candidate.overlaps(&entry.interval()));

    match conflict {
        Some(entry) => Err(Rejection::Overlap {
            conflicting: entry.id.clone(),
            interval: entry.interval(),
        }),
        None => Ok(()),
    }
}

/// Validates with the default policy, where time ordering alone never rejects.
pub fn validate_candidate<'a, I>(
    candidate: &Interval,
    entries_for_date: I,
    exclude_id: Option<&EntryId>,
) -> Result<(), Rejection>
where
    I: IntoIterator<Item = &'a TimeEntry>,
{
    validate(
        candidate,
        entries_for_date,
        exclude_id,
        InversionPolicy::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{parse_date, parse_time};
    use crate::types::Title;

    fn iv(start: &str, end: &str) -> Interval {
        Interval::new(parse_time(start).unwrap(), parse_time(end).unwrap())
    }

    fn entry(id: &str, start: &str, end: &str) -> TimeEntry {
        TimeEntry {
            id: EntryId::new(id).unwrap(),
            date: parse_date("2025-11-02").unwrap(),
            start_time: parse_time(start).unwrap(),
            end_time: parse_time(end).unwrap(),
            title: Title::new(format!("Task {id}")).unwrap(),
            notes: None,
            created_at: "2025-11-02T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn touching_boundary_is_accepted() {
        let existing = [entry("a", "10:00", "11:00")];
        assert_eq!(
            validate_candidate(&iv("09:00", "10:00"), &existing, None),
            Ok(())
        );
    }

    #[test]
    fn partial_overlap_is_rejected() {
        let existing = [entry("a", "10:00", "11:00")];
        let err = validate_candidate(&iv("09:30", "10:30"), &existing, None).unwrap_err();
        assert_eq!(err.reason(), "overlap");
        assert_eq!(
            err,
            Rejection::Overlap {
                conflicting: EntryId::new("a").unwrap(),
                interval: iv("10:00", "11:00"),
            }
        );
    }

    #[test]
    fn editing_an_entry_ignores_itself() {
        let existing = [entry("a", "10:00", "11:00"), entry("b", "11:00", "12:00")];
        let id = EntryId::new("a").unwrap();
        assert_eq!(
            validate_candidate(&iv("10:00", "11:00"), &existing, Some(&id)),
            Ok(())
        );
        // Growing into the neighbour is still caught.
        let err = validate_candidate(&iv("10:00", "11:30"), &existing, Some(&id)).unwrap_err();
        assert!(matches!(
            err,
            Rejection::Overlap { ref conflicting, .. } if conflicting.as_str() == "b"
        ));
    }

    #[test]
    fn overnight_is_accepted_by_default() {
        let existing = [entry("a", "09:00", "17:00")];
        assert_eq!(
            validate_candidate(&iv("22:00", "06:00"), &existing, None),
            Ok(())
        );
    }

    #[test]
    fn overnight_is_inverted_under_strict_policy() {
        let err = validate(
            &iv("22:00", "06:00"),
            std::iter::empty(),
            None,
            InversionPolicy::Strict,
        )
        .unwrap_err();
        assert_eq!(err.reason(), "inverted");
        assert_eq!(
            err.to_string(),
            "end time 06:00 cannot be before start time 22:00"
        );
    }

    #[test]
    fn full_day_passes_strict_ordering() {
        assert_eq!(
            validate(
                &iv("00:00", "00:00"),
                std::iter::empty(),
                None,
                InversionPolicy::Strict
            ),
            Ok(())
        );
    }

    #[test]
    fn full_day_conflicts_with_any_entry_after_its_start() {
        let existing = [entry("a", "09:00", "10:00")];
        assert!(validate_candidate(&iv("00:00", "00:00"), &existing, None).is_err());
    }

    #[test]
    fn full_day_conflicts_with_earlier_entry() {
        let existing = [entry("a", "00:00", "06:00")];
        let err = validate_candidate(&iv("20:00", "20:00"), &existing, None).unwrap_err();
        assert_eq!(err.reason(), "overlap");
    }

    #[test]
    fn existing_full_day_blocks_every_candidate() {
        let existing = [entry("a", "20:00", "20:00")];
        assert!(validate_candidate(&iv("06:00", "07:00"), &existing, None).is_err());
        assert!(validate_candidate(&iv("21:00", "22:00"), &existing, None).is_err());
        assert!(validate_candidate(&iv("23:00", "01:00"), &existing, None).is_err());
    }

    #[test]
    fn full_day_can_replace_itself() {
        let existing = [entry("a", "20:00", "20:00")];
        let id = EntryId::new("a").unwrap();
        assert_eq!(
            validate_candidate(&iv("08:00", "08:00"), &existing, Some(&id)),
            Ok(())
        );
    }

    #[test]
    fn overnight_conflicts_with_late_evening_entry() {
        let existing = [entry("a", "23:00", "23:45")];
        let err = validate_candidate(&iv("21:00", "02:00"), &existing, None).unwrap_err();
        assert_eq!(err.reason(), "overlap");
    }

    #[test]
    fn overnight_existing_blocks_late_candidate() {
        let existing = [entry("a", "22:00", "06:00")];
        assert!(validate_candidate(&iv("23:00", "23:30"), &existing, None).is_err());
        assert!(validate_candidate(&iv("20:00", "22:00"), &existing, None).is_ok());
    }

    #[test]
    fn reports_first_conflict_in_iteration_order() {
        let existing = [entry("a", "08:00", "09:00"), entry("b", "09:00", "10:00")];
        let err = validate_candidate(&iv("08:30", "09:30"), &existing, None).unwrap_err();
        assert!(matches!(
            err,
            Rejection::Overlap { ref conflicting, .. } if conflicting.as_str() == "a"
        ));
    }
}
