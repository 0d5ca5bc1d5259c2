use std::path::Path;

use chrono::NaiveDate;
use liveboard_core::timeline::conflict::detect_conflicts;

use crate::commands::common::{format_conflict_lines, load_day};
use crate::error::CliError;

pub async fn run_conflicts(date: NaiveDate, input: &Path, as_json: bool) -> Result<(), CliError> {
    let mut shifts = load_day(date, input).await?;
    let conflicts = detect_conflicts(&mut shifts);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&conflicts)?);
    } else if conflicts.is_empty() {
        println!("No conflicts on {date}");
    } else {
        for line in format_conflict_lines(&conflicts) {
            println!("{line}");
        }
    }

    Ok(())
}
