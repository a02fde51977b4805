use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use kerja_core::Status;

use crate::common::{parse_clock, parse_date, parse_index, parse_status};
use crate::render::ColorMode;

/// kerja: track and review daily work logs from your terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Defaults to `today` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the log entries for today or a specific date.
    Today(DateArgs),
    /// Show the previous day's log entries.
    Prev(DateArgs),
    /// Show the next day's log entries.
    Next(DateArgs),
    /// Show entries for the specified date (e.g., `kerja jump 2025-11-04`).
    Jump {
        #[arg(value_parser = parse_date)]
        date: NaiveDate,
    },
    /// List entries across a range of days ending on the target date.
    List {
        #[command(flatten)]
        date: DateArgs,
        /// Number of days to include ending on the target date.
        #[arg(long, default_value_t = 1)]
        days: u32,
        /// Shortcut for `--days 7`.
        #[arg(long)]
        week: bool,
    },
    /// Search entries by text or `#tag` within the month.
    Search {
        term: String,
        #[command(flatten)]
        date: DateArgs,
        /// Match term with case sensitivity.
        #[arg(long)]
        case_sensitive: bool,
        /// Emit results as JSON objects.
        #[arg(long)]
        json: bool,
        /// Include entry text when matching `#tag` searches.
        #[arg(long)]
        include_text: bool,
    },
    /// Record a completed entry (e.g., `kerja log Fixed login bug #auth`).
    Log(AddArgs),
    /// Capture a todo entry (e.g., `kerja todo Review PR #review`).
    Todo(AddArgs),
    /// Flip the status of an entry by index.
    Toggle(IndexArgs),
    /// Remove an entry by index.
    Delete(IndexArgs),
    /// Modify an entry by index. Fields that are not given stay unchanged.
    Edit {
        #[command(flatten)]
        target: IndexArgs,
        /// New text and `#tags`. Replaces both when given.
        text: Vec<String>,
        /// New timestamp in HH:MM.
        #[arg(long, value_parser = parse_clock)]
        time: Option<NaiveTime>,
        /// New status: todo or done.
        #[arg(long, value_parser = parse_status)]
        status: Option<Status>,
    },
    /// Prints the logbook root directory.
    Path,
}

#[derive(Args, Debug, Clone, Default)]
pub struct DateArgs {
    /// Target date in YYYY-MM-DD (default: today).
    #[arg(long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Entry text; words starting with `#` become tags.
    #[arg(required = true)]
    pub text: Vec<String>,
    #[command(flatten)]
    pub date: DateArgs,
    /// Timestamp in HH:MM (default: current time).
    #[arg(long, value_parser = parse_clock)]
    pub time: Option<NaiveTime>,
}

#[derive(Args, Debug, Clone)]
pub struct IndexArgs {
    /// 1-based position of the entry within the day.
    #[arg(value_parser = parse_index)]
    pub index: usize,
    #[command(flatten)]
    pub date: DateArgs,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}
