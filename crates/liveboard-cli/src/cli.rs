use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "liveboard")]
#[command(about = "Inspect scheduling timelines for a streaming studio")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lay out a day of shifts into per-room columns
    Layout {
        /// Schedule date, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        date: String,
        /// JSON file holding the day's shift rows
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List conflicting shift pairs for a day
    Conflicts {
        /// Schedule date, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        date: String,
        /// JSON file holding the day's shift rows
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate moving a block to a new room, brand or start time
    Move {
        /// Schedule date, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        date: String,
        /// JSON file holding the day's shift rows
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,
        /// Shift id picking the block to move; a merged block moves whole
        #[arg(long, value_name = "ID")]
        id: i64,
        /// Destination room number
        #[arg(long, value_name = "ROOM")]
        room: i64,
        /// Destination brand; omitted keeps the block's brand
        #[arg(long, value_name = "NAME")]
        brand: Option<String>,
        /// Destination start time, HH:MM
        #[arg(long, value_name = "TIME")]
        start: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Emit a deterministic sample day
    Fixture {
        /// Schedule date, YYYY-MM-DD
        #[arg(long, value_name = "DATE")]
        date: String,
        /// Rooms to fill
        #[arg(long, default_value = "3")]
        rooms: i64,
        /// Leave out the planted conflict scenarios
        #[arg(long)]
        no_conflicts: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
