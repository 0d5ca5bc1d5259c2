use std::path::Path;

use chrono::NaiveDate;
use liveboard_core::timeline::compute_room_layout;

use crate::commands::common::{format_layout_lines, load_day};
use crate::error::CliError;

pub async fn run_layout(date: NaiveDate, input: &Path, as_json: bool) -> Result<(), CliError> {
    let layout = compute_room_layout(load_day(date, input).await?);

    if as_json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else {
        for line in format_layout_lines(&layout) {
            println!("{line}");
        }
    }

    Ok(())
}
