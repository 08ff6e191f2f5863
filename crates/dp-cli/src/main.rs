use std::io;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dp_cli::commands::util::{Access, open_store};
use dp_cli::commands::{add, delete, edit, export, list, total};
use dp_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let config =
        Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let today = Local::now().date_naive();
    let mut stdout = io::stdout().lock();

    match command {
        Commands::Add(args) => {
            let mut locked = open_store(&config, Access::Write)?;
            add::run(&mut stdout, &mut locked.store, args, today)?;
        }
        Commands::Edit(args) => {
            let mut locked = open_store(&config, Access::Write)?;
            edit::run(&mut stdout, &mut locked.store, args, today)?;
        }
        Commands::Delete(args) => {
            let mut locked = open_store(&config, Access::Write)?;
            delete::run(&mut stdout, &mut locked.store, args)?;
        }
        Commands::List(args) => {
            let locked = open_store(&config, Access::Read)?;
            list::run(&mut stdout, &locked.store, args, today)?;
        }
        Commands::Total(args) => {
            let locked = open_store(&config, Access::Read)?;
            total::run(&mut stdout, &locked.store, args, today)?;
        }
        Commands::Export(args) => {
            let locked = open_store(&config, Access::Read)?;
            export::run(&mut stdout, &locked.store, args, &config.export_dir, today)?;
        }
    }

    Ok(())
}
