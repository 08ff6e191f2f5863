//! CLI subcommand implementations.

pub mod add;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod total;
pub mod util;
