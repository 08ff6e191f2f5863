//! The entry store: the single owner of the entry collection.
//!
//! # Responsibility
//! - Load entries through an [`EntryStorage`] on open and save after each mutation.
//! - Validate every add/update against the entries of the target date before committing.
//!
//! # Invariants
//! - Entry IDs are unique across the whole collection.
//! - Entries on the same date never overlap (see [`crate::validation`]).
//! - A failed save leaves the in-memory collection untouched.
//!
//! Mutations take `&mut self`, so the read-validate-write sequence cannot
//! interleave with another writer of the same store.

use std::collections::HashSet;
use std::convert::Infallible;

use chrono::{NaiveDate, NaiveTime, Utc};
use thiserror::Error;

use crate::calendar::add_hours_wrapping;
use crate::duration::{TrackedDuration, total_for_date};
use crate::entry::{NewEntry, TimeEntry, normalize_notes, sort_by_start};
use crate::interval::Interval;
use crate::types::{EntryId, InversionPolicy};
use crate::validation::{Rejection, validate};

/// Boxed error raised by a storage backend.
pub type StorageError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by store commands.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The candidate failed validation.
    #[error(transparent)]
    Rejected(#[from] Rejection),
    /// No entry has the given ID.
    #[error("entry not found: {0}")]
    NotFound(EntryId),
    /// The storage backend failed to load or save.
    #[error("storage error: {0}")]
    Storage(#[source] StorageError),
}

/// Load/save hooks the store calls on open and after every mutation.
///
/// This trait keeps the store independent of any storage technology
/// (e.g. the SQLite database in `dp-db`, or [`MemoryStorage`] in tests).
pub trait EntryStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns every persisted entry.
    fn load_entries(&mut self) -> Result<Vec<TimeEntry>, Self::Error>;

    /// Replaces the persisted collection with `entries`.
    fn save_entries(&mut self, entries: &[TimeEntry]) -> Result<(), Self::Error>;
}

/// In-memory storage that never fails.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: Vec<TimeEntry>,
    saves: usize,
}

impl MemoryStorage {
    pub const fn new(entries: Vec<TimeEntry>) -> Self {
        Self { entries, saves: 0 }
    }

    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    /// Number of successful saves so far.
    pub const fn saves(&self) -> usize {
        self.saves
    }
}

impl EntryStorage for MemoryStorage {
    type Error = Infallible;

    fn load_entries(&mut self) -> Result<Vec<TimeEntry>, Self::Error> {
        Ok(self.entries.clone())
    }

    fn save_entries(&mut self, entries: &[TimeEntry]) -> Result<(), Self::Error> {
        self.entries = entries.to_vec();
        self.saves += 1;
        Ok(())
    }
}

/// Owned aggregate of all entries behind command/query methods.
pub struct EntryStore<S: EntryStorage> {
    storage: S,
    entries: Vec<TimeEntry>,
    policy: InversionPolicy,
}

impl<S: EntryStorage> EntryStore<S> {
    /// Loads the initial entries from `storage`.
    ///
    /// Entries whose ID was already seen are dropped with a warning.
    pub fn open(mut storage: S, policy: InversionPolicy) -> Result<Self, StoreError> {
        let loaded = storage
            .load_entries()
            .map_err(|e| StoreError::Storage(Box::new(e)))?;

        let mut seen = HashSet::new();
        let mut entries = Vec::with_capacity(loaded.len());
        for entry in loaded {
            if seen.insert(entry.id.clone()) {
                entries.push(entry);
            } else {
                tracing::warn!(id = %entry.id, "skipping entry with duplicate ID");
            }
        }
        tracing::debug!(count = entries.len(), %policy, "loaded entries");

        Ok(Self {
            storage,
            entries,
            policy,
        })
    }

    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn get(&self, id: &EntryId) -> Option<&TimeEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Entries on `date`, ordered by start time.
    pub fn entries_for_date(&self, date: NaiveDate) -> Vec<&TimeEntry> {
        let mut day: Vec<&TimeEntry> = self.entries.iter().filter(|e| e.date == date).collect();
        sort_by_start(&mut day);
        day
    }

    pub fn total_for_date(&self, date: NaiveDate) -> TrackedDuration {
        total_for_date(date, &self.entries)
    }

    /// Checks a candidate against `date` without committing anything.
    pub fn check(
        &self,
        date: NaiveDate,
        candidate: &Interval,
        exclude_id: Option<&EntryId>,
    ) -> Result<(), Rejection> {
        validate(
            candidate,
            self.entries.iter().filter(|e| e.date == date),
            exclude_id,
            self.policy,
        )
    }

    /// Default interval for a new entry on `date`.
    ///
    /// Starts where the latest-starting entry ends and lasts one hour; an empty
    /// day gets 09:00 to 17:00.
    pub fn suggest_next_slot(&self, date: NaiveDate) -> Interval {
        match self.entries_for_date(date).last() {
            Some(last) => {
                let start = last.end_time;
                Interval::new(start, add_hours_wrapping(start, 1))
            }
            None => Interval::new(
                NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
                NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            ),
        }
    }

    /// Creates an entry, assigning its ID and creation time.
    pub fn add(&mut self, new: NewEntry) -> Result<TimeEntry, StoreError> {
        if let Err(rejection) = self.check(new.date, &new.interval(), None) {
            tracing::warn!(
                date = %new.date,
                interval = %new.interval(),
                %rejection,
                "rejected new entry"
            );
            return Err(rejection.into());
        }

        let entry = TimeEntry::create(new, Utc::now());
        let mut next = self.entries.clone();
        next.push(entry.clone());
        self.commit(next)?;

        tracing::debug!(id = %entry.id, date = %entry.date, "added entry");
        Ok(entry)
    }

    /// Replaces the entry with the same ID.
    ///
    /// The stored `created_at` is kept; every other field comes from `entry`.
    pub fn update(&mut self, entry: TimeEntry) -> Result<TimeEntry, StoreError> {
        let Some(index) = self.position(&entry.id) else {
            return Err(StoreError::NotFound(entry.id));
        };

        if let Err(rejection) = self.check(entry.date, &entry.interval(), Some(&entry.id)) {
            tracing::warn!(
                id = %entry.id,
                interval = %entry.interval(),
                %rejection,
                "rejected entry update"
            );
            return Err(rejection.into());
        }

        let updated = TimeEntry {
            created_at: self.entries[index].created_at,
            notes: normalize_notes(entry.notes),
            ..entry
        };
        let mut next = self.entries.clone();
        next[index] = updated.clone();
        self.commit(next)?;

        tracing::debug!(id = %updated.id, "updated entry");
        Ok(updated)
    }

    /// Removes the entry with `id` and returns it.
    pub fn delete(&mut self, id: &EntryId) -> Result<TimeEntry, StoreError> {
        let Some(index) = self.position(id) else {
            return Err(StoreError::NotFound(id.clone()));
        };

        let mut next = self.entries.clone();
        let removed = next.remove(index);
        self.commit(next)?;

        tracing::debug!(id = %removed.id, "deleted entry");
        Ok(removed)
    }

    fn position(&self, id: &EntryId) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.id == id)
    }

    fn commit(&mut self, next: Vec<TimeEntry>) -> Result<(), StoreError> {
        self.storage
            .save_entries(&next)
            .map_err(|e| StoreError::Storage(Box::new(e)))?;
        self.entries = next;
        Ok(())
    }
}
