//! liveboard - Inspect scheduling timelines from the command line

mod cli;
mod commands;
mod error;
#[cfg(test)]
mod tests;

use clap::Parser;
use liveboard_core::fixtures::FixtureConfig;
use liveboard_core::models::RoomId;
use liveboard_core::ShiftId;

use crate::cli::{Cli, Commands};
use crate::commands::common::{parse_schedule_date, parse_start_time};
use crate::commands::conflicts::run_conflicts;
use crate::commands::fixture::run_fixture;
use crate::commands::layout::run_layout;
use crate::commands::relocate::{run_move, MoveRequest};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("liveboard=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Layout { date, input, json } => {
            run_layout(parse_schedule_date(&date)?, &input, json).await?;
        }
        Commands::Conflicts { date, input, json } => {
            run_conflicts(parse_schedule_date(&date)?, &input, json).await?;
        }
        Commands::Move {
            date,
            input,
            id,
            room,
            brand,
            start,
            json,
        } => {
            let request = MoveRequest {
                id: ShiftId::new(id),
                room: RoomId::new(room),
                brand,
                start: parse_start_time(&start)?,
            };
            run_move(parse_schedule_date(&date)?, &input, request, json).await?;
        }
        Commands::Fixture {
            date,
            rooms,
            no_conflicts,
            json,
        } => {
            let config = FixtureConfig {
                rooms,
                with_conflicts: !no_conflicts,
            };
            run_fixture(parse_schedule_date(&date)?, &config, json)?;
        }
    }

    Ok(())
}
