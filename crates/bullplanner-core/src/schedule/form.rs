//! Activity entry form state.
//!
//! Times are edited in 12-hour parts but held canonically, so the draft
//! always carries a valid `HH:mm` value between edits.

use serde::{Deserialize, Serialize};

use super::{ActivityType, DayOfWeek, NewScheduleItem, Priority};
use crate::clock::{DisplayTime, Meridiem, WallTime};
use crate::error::ValidationError;

/// Minute choices offered by the entry form. The codec itself accepts any minute.
pub const FORM_MINUTE_STEP: u8 = 5;

/// Which of the two time fields an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeField {
    Start,
    End,
}

/// One edit of a 12-hour time selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimePart {
    Hour(u8),
    Minute(u8),
    Meridiem(Meridiem),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDraft {
    pub title: String,
    pub activity_type: ActivityType,
    selected_days: Vec<DayOfWeek>,
    start_time: WallTime,
    end_time: WallTime,
    pub priority: Priority,
    #[serde(default)]
    pub location: Option<String>,
}

impl Default for ActivityDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            activity_type: ActivityType::Class,
            selected_days: Vec::new(),
            start_time: WallTime::from(default_start()),
            end_time: WallTime::from(default_end()),
            priority: Priority::Medium,
            location: None,
        }
    }
}

fn default_start() -> chrono::NaiveTime {
    chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default()
}

fn default_end() -> chrono::NaiveTime {
    chrono::NaiveTime::from_hms_opt(10, 15, 0).unwrap_or_default()
}

impl ActivityDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Select a day, or deselect it when already selected.
    pub fn toggle_day(&mut self, day: DayOfWeek) {
        if let Some(pos) = self.selected_days.iter().position(|d| *d == day) {
            self.selected_days.remove(pos);
        } else {
            self.selected_days.push(day);
        }
    }

    pub fn selected_days(&self) -> &[DayOfWeek] {
        &self.selected_days
    }

    pub fn is_selected(&self, day: DayOfWeek) -> bool {
        self.selected_days.contains(&day)
    }

    pub fn start_time(&self) -> WallTime {
        self.start_time
    }

    pub fn end_time(&self) -> WallTime {
        self.end_time
    }

    pub fn set_time(&mut self, field: TimeField, time: WallTime) {
        match field {
            TimeField::Start => self.start_time = time,
            TimeField::End => self.end_time = time,
        }
    }

    /// Current 12-hour view of a time field.
    pub fn display(&self, field: TimeField) -> DisplayTime {
        match field {
            TimeField::Start => self.start_time.to_display(),
            TimeField::End => self.end_time.to_display(),
        }
    }

    /// Apply a single selector change, keeping the other two parts.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidTime`] if the edited parts do not form
    /// a valid time; the draft is left unchanged.
    pub fn edit_time(&mut self, field: TimeField, part: TimePart) -> Result<WallTime, ValidationError> {
        let current = self.display(field);
        let edited = match part {
            TimePart::Hour(h) => current.with_hour(h),
            TimePart::Minute(m) => current.with_minute(m),
            TimePart::Meridiem(mer) => current.with_meridiem(mer),
        };
        let canonical = edited.to_canonical()?;
        self.set_time(field, canonical);
        Ok(canonical)
    }

    /// Produce one item per selected day, in selection order.
    ///
    /// # Errors
    /// [`ValidationError::EmptyTitle`], [`ValidationError::NoDaySelected`] or
    /// [`ValidationError::InvalidTimeRange`]. Nothing is produced on error.
    pub fn submit(&self) -> Result<Vec<NewScheduleItem>, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.selected_days.is_empty() {
            return Err(ValidationError::NoDaySelected);
        }

        let items: Vec<NewScheduleItem> = self
            .selected_days
            .iter()
            .map(|&day| NewScheduleItem {
                title: title.to_string(),
                activity_type: self.activity_type,
                day,
                start_time: self.start_time,
                end_time: self.end_time,
                location: self.location.clone(),
                priority: self.priority,
                is_ai_suggested: false,
            })
            .collect();

        for item in &items {
            item.validate()?;
        }
        Ok(items)
    }

    /// Partial reset after a successful submit: type and times are kept.
    pub fn reset_after_submit(&mut self) {
        self.title.clear();
        self.selected_days.clear();
        self.priority = Priority::Medium;
        self.location = None;
    }
}

/// The minute values offered by the entry form (`00`, `05`, ... `55`).
pub fn form_minutes() -> impl Iterator<Item = u8> {
    (0..60).step_by(FORM_MINUTE_STEP as usize)
}
