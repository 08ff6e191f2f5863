//! Wall-clock intervals that may cross midnight.
//!
//! An interval is a start/end time-of-day pair anchored to a nominal day. The
//! pair alone decides its shape:
//!
//! | Condition     | Kind        | Covers                     |
//! |---------------|-------------|----------------------------|
//! | `end > start` | same day    | `[start, end)`             |
//! | `end == start`| full day    | `[start, start + 24h)`     |
//! | `end < start` | overnight   | `[start, end + 24h)`       |
//!
//! Positions are minutes from the nominal day's midnight, so an overnight or
//! full-day interval extends past 1440. For overlap purposes a full-day
//! interval claims the whole date and conflicts with every other interval.

use std::fmt;

use chrono::NaiveTime;

use crate::calendar::{MINUTES_PER_DAY, format_time, minute_of_day};

/// Shape of an interval, derived from its two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalKind {
    SameDay,
    FullDay,
    Overnight,
}

/// A start/end time-of-day pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval {
    start: NaiveTime,
    end: NaiveTime,
}

impl Interval {
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn kind(&self) -> IntervalKind {
        use std::cmp::Ordering;

        match self.end.cmp(&self.start) {
            Ordering::Greater => IntervalKind::SameDay,
            Ordering::Equal => IntervalKind::FullDay,
            Ordering::Less => IntervalKind::Overnight,
        }
    }

    pub fn start_minute(&self) -> u32 {
        minute_of_day(self.start)
    }

    /// End position, rolled forward a day when `end <= start`.
    pub fn effective_end_minute(&self) -> u32 {
        let start = self.start_minute();
        let end = minute_of_day(self.end);
        if end <= start {
            end + MINUTES_PER_DAY
        } else {
            end
        }
    }

    /// Length in whole minutes, in `1..=1440`.
    pub fn length_minutes(&self) -> u32 {
        self.effective_end_minute() - self.start_minute()
    }

    /// Half-open overlap test; intervals that only touch do not overlap.
    ///
    /// A full-day interval overlaps everything, whichever side it is on.
    pub fn overlaps(&self, other: &Self) -> bool {
        if self.kind() == IntervalKind::FullDay || other.kind() == IntervalKind::FullDay {
            return true;
        }
        self.start_minute() < other.effective_end_minute()
            && self.effective_end_minute() > other.start_minute()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", format_time(self.start), format_time(self.end))
    }
}
