//! Interactive planning session.
//!
//! Everything lives in memory; "Export JSON" prints the schedule in the same
//! format `--file` reads.

use std::fmt;
use std::path::PathBuf;

use bullplanner_core::schedule::form::{form_minutes, TimeField, TimePart};
use bullplanner_core::{
    format_range, ActivityDraft, ActivityType, Config, DayOfWeek, GeminiClient, Gesture, Meridiem,
    Planner, Priority, ReviewEvent, ScheduleStore, SuggestionStatus,
};
use chrono::Datelike;
use clap::Args;
use inquire::{CustomType, InquireError, MultiSelect, Select, Text};

use super::grid::{render, render_item};
use super::{load_schedule, runtime};

#[derive(Args)]
pub struct SessionArgs {
    /// Start from a JSON file with an array of schedule items
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Add,
    Remove,
    View,
    Generate,
    Export,
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 6] = [
        Self::Add,
        Self::Remove,
        Self::View,
        Self::Generate,
        Self::Export,
        Self::Quit,
    ];
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Add => "Add activity",
            Self::Remove => "Remove activity",
            Self::View => "View week",
            Self::Generate => "Generate study plan",
            Self::Export => "Export JSON",
            Self::Quit => "Quit",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ReviewChoice {
    Accept,
    Reject,
    Drag,
    Back,
}

impl ReviewChoice {
    const ALL: [ReviewChoice; 4] = [Self::Accept, Self::Reject, Self::Drag, Self::Back];
}

impl fmt::Display for ReviewChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Accept => "Accept (swipe right)",
            Self::Reject => "Reject (swipe left)",
            Self::Drag => "Drag by a distance",
            Self::Back => "Back to editor",
        })
    }
}

pub fn run(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = match &args.file {
        Some(path) => load_schedule(path)?,
        None => ScheduleStore::new(),
    };
    let config = Config::load_or_default();
    let client = GeminiClient::from_config(&config.gateway);
    let mut planner = Planner::new(store).with_swipe_threshold(config.review.swipe_threshold);
    let mut draft = ActivityDraft::default();
    let rt = runtime()?;

    loop {
        flush_message(&mut planner);
        let Some(choice) = optional(Select::new("What next?", MenuItem::ALL.to_vec()).prompt())? else {
            break;
        };
        match choice {
            MenuItem::Add => add_activity(&mut planner, &mut draft)?,
            MenuItem::Remove => remove_activity(&mut planner)?,
            MenuItem::View => print!("{}", render(&planner.grid(), Some(today()))),
            MenuItem::Generate => {
                println!("Asking the AI for study blocks...");
                match rt.block_on(planner.generate_suggestions(&client)) {
                    Ok(SuggestionStatus::Reviewing { count }) => {
                        println!("{count} suggestion(s) to review.");
                        review(&mut planner)?;
                    }
                    Ok(_) => {}
                    Err(e) if planner.message().is_none() => println!("{e}"),
                    Err(_) => {}
                }
            }
            MenuItem::Export => println!("{}", serde_json::to_string_pretty(planner.items())?),
            MenuItem::Quit => break,
        }
    }
    Ok(())
}

fn today() -> DayOfWeek {
    DayOfWeek::from(chrono::Local::now().weekday())
}

/// Esc or Ctrl-C on a prompt backs out instead of failing.
fn optional<T>(answer: Result<T, InquireError>) -> Result<Option<T>, InquireError> {
    match answer {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e),
    }
}

fn flush_message(planner: &mut Planner) {
    if let Some(message) = planner.message() {
        println!("{message}");
    }
    planner.clear_message();
}

fn add_activity(planner: &mut Planner, draft: &mut ActivityDraft) -> Result<(), InquireError> {
    let Some(title) = optional(Text::new("Title:").with_initial_value(&draft.title).prompt())? else {
        return Ok(());
    };
    draft.title = title;

    let types = ActivityType::ALL.to_vec();
    let cursor = types.iter().position(|t| *t == draft.activity_type).unwrap_or(0);
    let Some(kind) = optional(Select::new("Type:", types).with_starting_cursor(cursor).prompt())? else {
        return Ok(());
    };
    draft.activity_type = kind;

    let preselected: Vec<usize> = draft.selected_days().iter().map(|d| d.index()).collect();
    let Some(days) = optional(
        MultiSelect::new("Days:", DayOfWeek::ALL.to_vec())
            .with_default(&preselected)
            .prompt(),
    )?
    else {
        return Ok(());
    };
    for day in DayOfWeek::ALL {
        if days.contains(&day) != draft.is_selected(day) {
            draft.toggle_day(day);
        }
    }

    for (field, label) in [(TimeField::Start, "Start"), (TimeField::End, "End")] {
        if !edit_time(draft, field, label)? {
            return Ok(());
        }
    }

    let priorities = Priority::ALL.to_vec();
    let cursor = priorities.iter().position(|p| *p == draft.priority).unwrap_or(0);
    let Some(priority) = optional(Select::new("Priority:", priorities).with_starting_cursor(cursor).prompt())? else {
        return Ok(());
    };
    draft.priority = priority;

    let Some(location) = optional(Text::new("Location (optional):").prompt())? else {
        return Ok(());
    };
    let location = location.trim();
    draft.location = (!location.is_empty()).then(|| location.to_string());

    if let Ok(added) = planner.add_activity(draft) {
        println!("Added {} item(s).", added.len());
        draft.reset_after_submit();
    }
    Ok(())
}

/// Hour, minute and AM/PM selectors for one field. Returns false if the user backed out.
fn edit_time(draft: &mut ActivityDraft, field: TimeField, label: &str) -> Result<bool, InquireError> {
    let current = draft.display(field);

    let hours: Vec<u8> = (1..=12).collect();
    let message = format!("{label} hour:");
    let cursor = usize::from(current.hour.clamp(1, 12) - 1);
    let Some(hour) = optional(Select::new(&message, hours).with_starting_cursor(cursor).prompt())? else {
        return Ok(false);
    };

    let minutes: Vec<u8> = form_minutes().collect();
    let labels: Vec<String> = minutes.iter().map(|m| format!("{m:02}")).collect();
    let message = format!("{label} minute:");
    let cursor = minutes.iter().position(|m| *m == current.minute).unwrap_or(0);
    let Some(picked) = optional(Select::new(&message, labels).with_starting_cursor(cursor).raw_prompt())? else {
        return Ok(false);
    };

    let meridiems = vec![Meridiem::Am, Meridiem::Pm];
    let message = format!("{label} AM/PM:");
    let cursor = usize::from(current.meridiem == Meridiem::Pm);
    let Some(meridiem) = optional(Select::new(&message, meridiems).with_starting_cursor(cursor).prompt())? else {
        return Ok(false);
    };

    let parts = [
        TimePart::Hour(hour),
        TimePart::Minute(minutes[picked.index]),
        TimePart::Meridiem(meridiem),
    ];
    for part in parts {
        if let Err(e) = draft.edit_time(field, part) {
            println!("{e}");
        }
    }
    Ok(true)
}

fn remove_activity(planner: &mut Planner) -> Result<(), InquireError> {
    if planner.store().is_empty() {
        println!("Nothing to remove.");
        return Ok(());
    }
    let labels: Vec<String> = planner
        .items()
        .iter()
        .map(|item| format!("{} {}", item.day().short(), render_item(item).trim()))
        .collect();
    let Some(picked) = optional(Select::new("Remove which?", labels).raw_prompt())? else {
        return Ok(());
    };
    let id = planner.items()[picked.index].id.clone();
    if let Some(removed) = planner.remove_item(&id) {
        println!("Removed {}.", removed.title());
    }
    Ok(())
}

fn review(planner: &mut Planner) -> Result<(), InquireError> {
    loop {
        let Some(session) = planner.review() else {
            break;
        };
        let Some(card) = session.current().cloned() else {
            break;
        };
        println!();
        println!("Card {}/{}: {}", session.position() + 1, session.total(), card.title);
        println!("  {} {}", card.day, format_range(card.start_time, card.end_time));
        println!("  Why: {}", card.reason);

        let Some(choice) = optional(Select::new("Keep it?", ReviewChoice::ALL.to_vec()).prompt())? else {
            planner.back_to_editor();
            break;
        };
        let events = match choice {
            ReviewChoice::Accept => planner.gesture(Gesture::Accept),
            ReviewChoice::Reject => planner.gesture(Gesture::Reject),
            ReviewChoice::Drag => {
                let Some(dx) = optional(CustomType::<f64>::new("Drag distance (negative is left):").prompt())?
                else {
                    continue;
                };
                planner.swipe(dx)
            }
            ReviewChoice::Back => {
                planner.back_to_editor();
                break;
            }
        };
        match events {
            Ok(events) if events.is_empty() => println!("Not far enough, the card springs back."),
            Ok(events) => report(&events),
            Err(e) => println!("{e}"),
        }
    }
    Ok(())
}

fn report(events: &[ReviewEvent]) {
    for event in events {
        match event {
            ReviewEvent::Accepted { item } => println!("Added {} on {}.", item.title(), item.day()),
            ReviewEvent::Rejected { suggestion } => println!("Skipped {}.", suggestion.title),
            ReviewEvent::Finished { accepted, rejected } => {
                println!("Review finished: {accepted} accepted, {rejected} rejected.")
            }
        }
    }
}
