//! Export command for writing plain-text reports.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Args;

use dp_core::{EntryStorage, EntryStore, ReportOutcome, generate_report};

use super::util::RangeArgs;

#[derive(Debug, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub range: RangeArgs,

    /// Directory to write the report to. Defaults to the configured export directory.
    #[arg(long, conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Print the report instead of writing a file.
    #[arg(long)]
    pub stdout: bool,
}

pub fn run<W: Write, S: EntryStorage>(
    writer: &mut W,
    store: &EntryStore<S>,
    args: &ExportArgs,
    export_dir: &Path,
    today: NaiveDate,
) -> Result<()> {
    let (start, end) = args.range.resolve(today)?;
    let ReportOutcome::Text(report) = generate_report(start, end, store.entries()) else {
        bail!("no entries found in the selected date range to export");
    };

    if args.stdout {
        writeln!(writer, "{}", report.text)?;
        return Ok(());
    }

    let dir = args.output.as_deref().unwrap_or(export_dir);
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create export directory {}", dir.display()))?;
    let path = dir.join(report.file_name());
    fs::write(&path, &report.text)
        .with_context(|| format!("failed to write {}", path.display()))?;

    tracing::info!(path = %path.display(), days = report.days_with_entries, "exported report");
    writeln!(writer, "Exported {} ({})", path.display(), report.total)?;
    Ok(())
}
