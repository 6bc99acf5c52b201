//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::{Parser, Subcommand};

/// Firebase Authentication のユーザーを BigQuery にエクスポートするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "authsync")]
#[command(about = "Export Firebase Authentication users to BigQuery", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, default_value = "./.authsync/config.json")]
    pub config: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create the dataset and the authentication table if they do not exist
    CreateTable,

    /// Delete the authentication table if it exists
    DeleteTable,

    /// Copy every user into the authentication table
    Export {
        /// Print progress while exporting
        #[arg(short, long)]
        verbose: bool,

        /// Dry run mode - fetch and transform users but don't insert
        #[arg(long)]
        dry_run: bool,

        /// Override the configured number of concurrent insert requests
        #[arg(long)]
        max_concurrent_inserts: Option<usize>,
    },
}

impl Args {
    pub fn is_verbose(&self) -> bool {
        matches!(self.command, Command::Export { verbose: true, .. })
    }
}
