//! Schedule data model: commitments, study blocks, and AI candidates.
//!
//! Items recur every week; `day` is a weekday label, never a calendar date.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::clock::WallTime;
use crate::error::ValidationError;

pub mod form;

pub use form::ActivityDraft;

/// Day of the week. Ordering follows the grid: Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    /// All seven days in grid order.
    pub const ALL: [DayOfWeek; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    /// Three-letter label used on the day toggles.
    pub fn short(&self) -> &'static str {
        &self.as_str()[..3]
    }

    /// Position in [`DayOfWeek::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayOfWeek {
    type Err = ValidationError;

    /// Accepts full or three-letter names, any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(needle) || d.short().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::UnknownDay(s.to_string()))
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(w: chrono::Weekday) -> Self {
        Self::ALL[w.num_days_from_monday() as usize]
    }
}

/// Kind of commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    Class,
    Work,
    Event,
    Extracurricular,
    /// Added by the AI review or manually by the user
    Study,
}

impl ActivityType {
    pub const ALL: [ActivityType; 5] = [
        Self::Class,
        Self::Work,
        Self::Event,
        Self::Extracurricular,
        Self::Study,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Class => "Class",
            Self::Work => "Work",
            Self::Event => "Event",
            Self::Extracurricular => "Extracurricular",
            Self::Study => "Study",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(needle))
            .or_else(|| needle.eq_ignore_ascii_case("extra").then_some(Self::Extracurricular))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "type".to_string(),
                value: s.to_string(),
            })
    }
}

/// User-assigned importance. Informative only; never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "priority".to_string(),
                value: s.to_string(),
            })
    }
}

/// A schedule item before the store assigns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduleItem {
    pub title: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub day: DayOfWeek,
    pub start_time: WallTime,
    pub end_time: WallTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub is_ai_suggested: bool,
}

impl NewScheduleItem {
    pub fn new(
        title: impl Into<String>,
        activity_type: ActivityType,
        day: DayOfWeek,
        start_time: WallTime,
        end_time: WallTime,
        priority: Priority,
    ) -> Self {
        Self {
            title: title.into(),
            activity_type,
            day,
            start_time,
            end_time,
            location: None,
            priority,
            is_ai_suggested: false,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Check the invariants the store relies on.
    ///
    /// # Errors
    /// [`ValidationError::EmptyTitle`] for a blank title,
    /// [`ValidationError::InvalidTimeRange`] unless `start_time < end_time`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        check_range(self.start_time, self.end_time)
    }

    pub fn duration_minutes(&self) -> u32 {
        self.end_time
            .minutes_since_midnight()
            .saturating_sub(self.start_time.minutes_since_midnight())
    }
}

/// A stored schedule item. Never mutated in place: replace via remove + add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: String,
    #[serde(flatten)]
    pub item: NewScheduleItem,
}

impl ScheduleItem {
    pub fn title(&self) -> &str {
        &self.item.title
    }

    pub fn day(&self) -> DayOfWeek {
        self.item.day
    }

    pub fn start_time(&self) -> WallTime {
        self.item.start_time
    }

    pub fn end_time(&self) -> WallTime {
        self.item.end_time
    }

    pub fn activity_type(&self) -> ActivityType {
        self.item.activity_type
    }

    pub fn priority(&self) -> Priority {
        self.item.priority
    }

    pub fn is_ai_suggested(&self) -> bool {
        self.item.is_ai_suggested
    }
}

/// A candidate study block proposed by the AI gateway.
///
/// Transient: it lives inside a review session until accepted (converted
/// into a [`NewScheduleItem`]) or rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSuggestion {
    pub title: String,
    pub day: DayOfWeek,
    pub start_time: WallTime,
    pub end_time: WallTime,
    pub reason: String,
}

impl AiSuggestion {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        check_range(self.start_time, self.end_time)
    }

    /// Accepted suggestions become Study items with Medium priority.
    pub fn into_new_item(self) -> NewScheduleItem {
        NewScheduleItem {
            title: self.title,
            activity_type: ActivityType::Study,
            day: self.day,
            start_time: self.start_time,
            end_time: self.end_time,
            location: None,
            priority: Priority::Medium,
            is_ai_suggested: true,
        }
    }
}

fn check_range(start: WallTime, end: WallTime) -> Result<(), ValidationError> {
    if start >= end {
        return Err(ValidationError::InvalidTimeRange { start, end });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> WallTime {
        s.parse().unwrap()
    }

    #[test]
    fn day_parsing_accepts_full_and_short_names() {
        assert_eq!("monday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Monday);
        assert_eq!("Thu".parse::<DayOfWeek>().unwrap(), DayOfWeek::Thursday);
        assert!("Funday".parse::<DayOfWeek>().is_err());
    }

    #[test]
    fn day_from_chrono_weekday() {
        assert_eq!(DayOfWeek::from(chrono::Weekday::Mon), DayOfWeek::Monday);
        assert_eq!(DayOfWeek::from(chrono::Weekday::Sun), DayOfWeek::Sunday);
    }

    #[test]
    fn activity_type_serializes_with_display_names() {
        let json = serde_json::to_string(&ActivityType::Extracurricular).unwrap();
        assert_eq!(json, "\"Extracurricular\"");
        assert_eq!("extra".parse::<ActivityType>().unwrap(), ActivityType::Extracurricular);
    }

    #[test]
    fn item_wire_format_is_camel_case() {
        let item = ScheduleItem {
            id: "abc".to_string(),
            item: NewScheduleItem::new(
                "CS101",
                ActivityType::Class,
                DayOfWeek::Monday,
                t("09:00"),
                t("10:15"),
                Priority::High,
            ),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "abc");
        assert_eq!(json["type"], "Class");
        assert_eq!(json["startTime"], "09:00");
        assert_eq!(json["endTime"], "10:15");
        assert_eq!(json["isAiSuggested"], false);
        assert!(json.get("location").is_none());
    }

    #[test]
    fn new_item_defaults_when_fields_missing() {
        let json = r#"{"title":"Shift","type":"Work","day":"Friday","startTime":"17:00","endTime":"21:00"}"#;
        let item: NewScheduleItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.priority, Priority::Medium);
        assert!(!item.is_ai_suggested);
        assert_eq!(item.duration_minutes(), 240);
    }

    #[test]
    fn validate_rejects_blank_title_and_inverted_range() {
        let mut item = NewScheduleItem::new(
            "  ",
            ActivityType::Class,
            DayOfWeek::Monday,
            t("09:00"),
            t("10:00"),
            Priority::Low,
        );
        assert_eq!(item.validate(), Err(ValidationError::EmptyTitle));

        item.title = "Lab".to_string();
        item.end_time = t("09:00");
        assert!(matches!(item.validate(), Err(ValidationError::InvalidTimeRange { .. })));
    }

    #[test]
    fn accepted_suggestion_becomes_medium_study_block() {
        let suggestion = AiSuggestion {
            title: "Algebra Review".to_string(),
            day: DayOfWeek::Tuesday,
            start_time: t("14:00"),
            end_time: t("15:00"),
            reason: "gap before work".to_string(),
        };
        let item = suggestion.into_new_item();
        assert_eq!(item.activity_type, ActivityType::Study);
        assert_eq!(item.priority, Priority::Medium);
        assert!(item.is_ai_suggested);
        assert_eq!(item.title, "Algebra Review");
        assert_eq!(item.day, DayOfWeek::Tuesday);
    }
}
