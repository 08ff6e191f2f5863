//! Delete command for removing a time block.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;

use dp_core::calendar::format_date;
use dp_core::{EntryId, EntryStorage, EntryStore};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// ID of the entry to remove.
    pub id: String,
}

pub fn run<W: Write, S: EntryStorage>(
    writer: &mut W,
    store: &mut EntryStore<S>,
    args: &DeleteArgs,
) -> Result<()> {
    let id = EntryId::new(args.id.as_str())?;
    let removed = store
        .delete(&id)
        .with_context(|| format!("failed to delete entry {id}"))?;

    writeln!(
        writer,
        "Deleted {} on {}: {}    {}",
        removed.id,
        format_date(removed.date),
        removed.interval(),
        removed.title
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use dp_core::{StoreError, seed_entries};
    use insta::assert_snapshot;

    use crate::commands::util::test_store;

    #[test]
    fn delete_removes_entry() {
        let mut store = test_store(seed_entries());
        let mut output = Vec::new();
        run(&mut output, &mut store, &DeleteArgs { id: "2".to_string() }).unwrap();

        assert_eq!(store.entries().len(), 2);
        assert_snapshot!(
            String::from_utf8(output).unwrap(),
            @"Deleted 2 on 2025-11-02: 06:00 - 09:00    Morning routine & prepare for school"
        );
    }

    #[test]
    fn delete_unknown_id_fails() {
        let mut store = test_store(seed_entries());
        let args = DeleteArgs { id: "9".to_string() };
        let err = run(&mut Vec::new(), &mut store, &args).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::NotFound(_))
        ));
        assert_eq!(store.entries().len(), 3);
    }
}
