use std::fmt::Write;
use std::path::PathBuf;

use bullplanner_core::{format_range, DayOfWeek, ScheduleItem, WeeklyGrid};
use chrono::Datelike;
use clap::Args;

use super::load_schedule;

#[derive(Args)]
pub struct GridArgs {
    /// JSON file with an array of schedule items
    #[arg(short, long)]
    pub file: PathBuf,

    /// Print the grid as JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: GridArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_schedule(&args.file)?;
    let grid = WeeklyGrid::project(store.items());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
    } else {
        let today = DayOfWeek::from(chrono::Local::now().weekday());
        print!("{}", render(&grid, Some(today)));
    }
    Ok(())
}

/// Text rendering: one block per weekday, Monday first.
///
/// AI-suggested items carry a leading `*`.
pub fn render(grid: &WeeklyGrid, today: Option<DayOfWeek>) -> String {
    let mut out = String::new();
    for column in grid.iter() {
        if today == Some(column.day) {
            let _ = writeln!(out, "{} (today)", column.day);
        } else {
            let _ = writeln!(out, "{}", column.day);
        }
        if column.is_empty() {
            let _ = writeln!(out, "    (no activities)");
            continue;
        }
        for item in &column.items {
            let _ = writeln!(out, "{}", render_item(item));
        }
    }
    out
}

pub fn render_item(item: &ScheduleItem) -> String {
    let marker = if item.is_ai_suggested() { "*" } else { " " };
    let mut line = format!(
        "  {marker} {}  {} [{}, {}]",
        format_range(item.start_time(), item.end_time()),
        item.title(),
        item.activity_type(),
        item.priority(),
    );
    if let Some(location) = &item.item.location {
        let _ = write!(line, " @ {location}");
    }
    line
}
