//! Edit command for changing an existing time block.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Args;

use dp_core::calendar::format_date;
use dp_core::duration::entry_duration;
use dp_core::{EntryId, EntryStorage, EntryStore, Title};

use super::util::{parse_date_arg, parse_time_arg};

#[derive(Debug, Args)]
pub struct EditArgs {
    /// ID of the entry to change.
    pub id: String,

    /// Move the entry to another day.
    #[arg(long)]
    pub date: Option<String>,

    /// New start time (HH:MM).
    #[arg(long)]
    pub start: Option<String>,

    /// New end time (HH:MM).
    #[arg(long)]
    pub end: Option<String>,

    /// New title.
    #[arg(long)]
    pub title: Option<String>,

    /// New notes.
    #[arg(long, conflicts_with = "clear_notes")]
    pub notes: Option<String>,

    /// Remove the notes.
    #[arg(long)]
    pub clear_notes: bool,
}

impl EditArgs {
    const fn changes_anything(&self) -> bool {
        self.date.is_some()
            || self.start.is_some()
            || self.end.is_some()
            || self.title.is_some()
            || self.notes.is_some()
            || self.clear_notes
    }
}

pub fn run<W: Write, S: EntryStorage>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    args: &EditArgs,
    today: NaiveDate,
) -> Result<()> {
    if !args.changes_anything() {
        bail!("nothing to change; pass at least one field to update (see `dp edit --help`)");
    }

    let id = EntryId::new(args.id.as_str())?;
    let Some(current) = store.get(&id) else {
        bail!("entry not found: {id}");
    };

    let mut entry = current.clone();
    if let Some(date) = &args.date {
        entry.date = parse_date_arg(date, today)?;
    }
    if let Some(start) = &args.start {
        entry.start_time = parse_time_arg(start)?;
    }
    if let Some(end) = &args.end {
        entry.end_time = parse_time_arg(end)?;
    }
    if let Some(title) = &args.title {
        entry.title = Title::new(title.as_str())?;
    }
    if args.clear_notes {
        entry.notes = None;
    } else if let Some(notes) = &args.notes {
        entry.notes = Some(notes.clone());
    }

    let updated = store
        .update(entry)
        .with_context(|| format!("failed to update entry {id}"))?;

    writeln!(
        writer,
        "Updated {} on {}: {}    {} ({})",
        updated.id,
        format_date(updated.date),
        updated.interval(),
        updated.title,
        entry_duration(&updated)
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use dp_core::calendar::parse_date;
    use dp_core::{Rejection, StoreError, seed_entries};
    use insta::assert_snapshot;

    use crate::commands::util::test_store;

    fn today() -> NaiveDate {
        parse_date("2025-11-02").unwrap()
    }

    fn args(id: &str) -> EditArgs {
        EditArgs {
            id: id.to_string(),
            date: None,
            start: None,
            end: None,
            title: None,
            notes: None,
            clear_notes: false,
        }
    }

    #[test]
    fn edit_changes_only_given_fields() {
        let mut store = test_store(seed_entries());
        let mut args = args("3");
        args.end = Some("17:30".to_string());

        let mut output = Vec::new();
        run(&mut output, &mut store, &args, today()).unwrap();

        let entry = store.get(&EntryId::new("3").unwrap()).unwrap();
        assert_eq!(entry.title.as_str(), "School");
        assert_eq!(entry.notes.as_deref(), Some("Classes and study sessions."));
        assert_snapshot!(
            String::from_utf8(output).unwrap(),
            @"Updated 3 on 2025-11-02: 09:00 - 17:30    School (8 hours 30 minutes)"
        );
    }

    #[test]
    fn edit_clears_notes() {
        let mut store = test_store(seed_entries());
        let mut args = args("1");
        args.clear_notes = true;
        run(&mut Vec::new(), &mut store, &args, today()).unwrap();
        assert_eq!(store.get(&EntryId::new("1").unwrap()).unwrap().notes, None);
    }

    #[test]
    fn edit_rejects_overlap_and_keeps_entry() {
        let mut store = test_store(seed_entries());
        let mut args = args("2");
        args.end = Some("10:00".to_string());

        let err = run(&mut Vec::new(), &mut store, &args, today()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::Rejected(Rejection::Overlap { .. }))
        ));
        let entry = store.get(&EntryId::new("2").unwrap()).unwrap();
        assert_eq!(entry.interval().to_string(), "06:00 - 09:00");
    }

    #[test]
    fn edit_unknown_id_fails() {
        let mut store = test_store(seed_entries());
        let mut args = args("42");
        args.title = Some("Anything".to_string());
        let err = run(&mut Vec::new(), &mut store, &args, today()).unwrap_err();
        assert_eq!(err.to_string(), "entry not found: 42");
    }

    #[test]
    fn edit_without_changes_fails() {
        let mut store = test_store(seed_entries());
        assert!(run(&mut Vec::new(), &mut store, &args("1"), today()).is_err());
    }
}
