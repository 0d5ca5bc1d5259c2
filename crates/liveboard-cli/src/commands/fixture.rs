use chrono::NaiveDate;
use liveboard_core::fixtures::{fixture_day, FixtureConfig};

use crate::commands::common::format_shift_lines;
use crate::error::CliError;

pub fn run_fixture(date: NaiveDate, config: &FixtureConfig, as_json: bool) -> Result<(), CliError> {
    let day = fixture_day(config);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&day)?);
    } else {
        println!(
            "Fixture day {date}: {} shifts across {} rooms",
            day.len(),
            config.rooms
        );
        for line in format_shift_lines(&day) {
            println!("{line}");
        }
    }

    Ok(())
}
