//! Prompt construction for study-block suggestions.

use indoc::formatdoc;
use serde::{Deserialize, Serialize};

use crate::schedule::{ActivityType, DayOfWeek, Priority, ScheduleItem};

/// Compact view of one item as sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub title: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub day: DayOfWeek,
    /// `HH:mm - HH:mm`
    pub time: String,
    pub priority: Priority,
}

impl From<&ScheduleItem> for ScheduleSummary {
    fn from(item: &ScheduleItem) -> Self {
        Self {
            title: item.item.title.clone(),
            activity_type: item.item.activity_type,
            day: item.item.day,
            time: format!("{} - {}", item.item.start_time, item.item.end_time),
            priority: item.item.priority,
        }
    }
}

pub fn summarize(items: &[ScheduleItem]) -> Vec<ScheduleSummary> {
    items.iter().map(ScheduleSummary::from).collect()
}

/// Build the instruction text with the pretty-printed schedule embedded.
///
/// # Errors
/// Only if the summary fails to serialize.
pub fn build_prompt(items: &[ScheduleItem]) -> Result<String, serde_json::Error> {
    let summary = serde_json::to_string_pretty(&summarize(items))?;
    Ok(formatdoc! {"
        You are a smart schedule assistant for a university student.
        Here is their current weekly schedule of fixed commitments (Classes, Work, etc.) including their priority levels:
        {summary}

        Please identify optimal time blocks for studying.
        Rules:
        1. Suggest exactly 5 distinct study sessions throughout the week.
        2. Prioritize gaps between classes or before/after work.
        3. Avoid very late nights (after 11 PM) or very early mornings (before 7 AM) unless the schedule is packed.
        4. Keep sessions between 45 minutes and 2 hours long.
        5. Try to balance the workload across the week.
        6. Take note of high priority items; ensure there is study time scheduled before them if they are later in the week.
        7. Return ONLY the JSON array matching the schema.
    ", summary = summary})
}
