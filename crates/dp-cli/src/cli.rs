//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{add, delete, edit, export, list, total};

/// Single-user day planner.
///
/// Records what you did as time blocks on a calendar day, totals the tracked
/// time and exports plain-text reports.
#[derive(Debug, Parser)]
#[command(name = "dp", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Record a new time block.
    Add(add::AddArgs),

    /// Change an existing time block.
    Edit(edit::EditArgs),

    /// Remove a time block.
    Delete(delete::DeleteArgs),

    /// Show the time blocks of one day.
    List(list::ListArgs),

    /// Show tracked time for a day or a date range.
    Total(total::TotalArgs),

    /// Write a plain-text report for a day or a date range.
    Export(export::ExportArgs),
}
