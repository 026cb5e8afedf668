//! Command-line argument definitions.

use chrono::NaiveDate;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DATA_DIR_ENV;

#[derive(Parser)]
#[command(
    name = "training-log",
    version,
    about = "Log strength-training sets",
    long_about = "Keep a list of exercise menus and log date/weight/reps sets against them.\n\n\
                  Data is stored locally; export and import move it between machines as JSON."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the training database.
    #[arg(long = "data-dir", value_name = "DIR", env = DATA_DIR_ENV, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage exercise menus.
    #[command(subcommand)]
    Menu(MenuCommand),

    /// Manage logged sets.
    #[command(subcommand)]
    Record(RecordCommand),

    /// Write all menus and records to a JSON file.
    Export(ExportArgs),

    /// Replace all menus and records with the contents of a JSON file.
    Import(ImportArgs),
}

#[derive(Subcommand)]
pub enum MenuCommand {
    /// List menus in display order; the first one is preselected for new records.
    List,
    /// Add a menu and make it active.
    Add {
        #[arg(value_name = "NAME")]
        name: String,
    },
    /// Remove a menu. Records logged against it are kept.
    Remove {
        #[arg(value_name = "NAME")]
        name: String,
    },
}

#[derive(Subcommand)]
pub enum RecordCommand {
    /// List records, newest date first.
    List,
    /// Log a set.
    Add(AddRecordArgs),
    /// Delete a record by id.
    Remove {
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Args)]
pub struct AddRecordArgs {
    /// Date of the set (defaults to today).
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Exercise name (defaults to the first menu).
    #[arg(long, value_name = "NAME")]
    pub menu: Option<String>,

    /// Weight lifted.
    #[arg(long, value_name = "WEIGHT", allow_hyphen_values = true)]
    pub weight: String,

    /// Repetitions.
    #[arg(long, value_name = "REPS", allow_hyphen_values = true)]
    pub reps: String,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Directory to write the export file into (defaults to Documents).
    #[arg(long = "out", value_name = "DIR", conflicts_with = "stdout")]
    pub out: Option<String>,

    /// Print the export document instead of writing a file.
    #[arg(long)]
    pub stdout: bool,
}

#[derive(Args)]
pub struct ImportArgs {
    /// Export file to import.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}
