use std::path::PathBuf;

use bullplanner_core::{Config, GeminiClient, Planner, SuggestionStatus};
use clap::Args;

use super::{load_schedule, runtime};

#[derive(Args)]
pub struct SuggestArgs {
    /// JSON file with an array of schedule items
    #[arg(short, long)]
    pub file: PathBuf,
}

pub fn run(args: SuggestArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_schedule(&args.file)?;
    let config = Config::load_or_default();
    let client = GeminiClient::from_config(&config.gateway);
    let mut planner = Planner::new(store).with_swipe_threshold(config.review.swipe_threshold);

    let status = runtime()?.block_on(planner.generate_suggestions(&client))?;
    match status {
        SuggestionStatus::Reviewing { .. } => {
            let candidates = planner.review().map(|r| r.candidates()).unwrap_or_default();
            println!("{}", serde_json::to_string_pretty(candidates)?);
        }
        SuggestionStatus::NoSlots => {
            println!("{}", planner.message().unwrap_or_default());
        }
        SuggestionStatus::Failed => {
            return Err(planner.message().unwrap_or_default().into());
        }
    }
    Ok(())
}
