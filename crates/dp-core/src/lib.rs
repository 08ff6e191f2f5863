//! Core domain logic for the day planner.
//!
//! This crate contains the temporal reasoning behind the planner:
//! - Interval model: time-of-day pairs that may cross midnight
//! - Validation: overlap and ordering checks for new or edited entries
//! - Duration aggregation: per-entry durations and day/range totals
//! - Entry store: the owned entry collection with injected persistence
//! - Report generation: the plain-text export of a date range

pub mod calendar;
pub mod duration;
pub mod entry;
pub mod interval;
pub mod report;
pub mod store;
pub mod types;
pub mod validation;

pub use duration::{
    DurationSummary, TrackedDuration, compute_day_total, compute_duration, total_for_date,
    total_for_range,
};
pub use entry::{NewEntry, TimeEntry, seed_entries};
pub use interval::{Interval, IntervalKind};
pub use report::{Report, ReportError, ReportOutcome, generate_report, render};
pub use store::{EntryStorage, EntryStore, MemoryStorage, StorageError, StoreError};
pub use types::{EntryId, InversionPolicy, Title, ValidationError};
pub use validation::{Rejection, validate, validate_candidate};
