//! End-to-end planner sessions: form entry, grid, suggestions, review.

use async_trait::async_trait;
use bullplanner_core::gateway::GatewayError;
use bullplanner_core::planner::{MSG_CONNECT_FAILED, MSG_NO_ITEMS, MSG_NO_SLOTS};
use bullplanner_core::schedule::form::{TimeField, TimePart};
use bullplanner_core::{
    ActivityDraft, ActivityType, AiSuggestion, DayOfWeek, Gesture, Meridiem, Planner, PlannerError,
    Priority, ReviewEvent, ScheduleItem, SuggestionSource, SuggestionStatus, WallTime,
};

struct Canned(Vec<AiSuggestion>);

#[async_trait]
impl SuggestionSource for Canned {
    fn name(&self) -> &str {
        "canned"
    }

    async fn fetch(&self, _items: &[ScheduleItem]) -> Result<Vec<AiSuggestion>, GatewayError> {
        Ok(self.0.clone())
    }
}

struct Offline;

#[async_trait]
impl SuggestionSource for Offline {
    fn name(&self) -> &str {
        "offline"
    }

    async fn fetch(&self, _items: &[ScheduleItem]) -> Result<Vec<AiSuggestion>, GatewayError> {
        Err(GatewayError::Status {
            status: 503,
            body: "unavailable".to_string(),
        })
    }
}

fn suggestion(title: &str, day: DayOfWeek, start: &str, end: &str) -> AiSuggestion {
    AiSuggestion {
        title: title.to_string(),
        day,
        start_time: start.parse().unwrap(),
        end_time: end.parse().unwrap(),
        reason: "free slot".to_string(),
    }
}

fn planner_with_cs101() -> Planner {
    let mut planner = Planner::default();
    let mut draft = ActivityDraft::new("CS101");
    draft.priority = Priority::High;
    draft.toggle_day(DayOfWeek::Monday);
    draft.toggle_day(DayOfWeek::Wednesday);
    planner.add_activity(&draft).unwrap();
    planner
}

#[test]
fn test_form_entry_lands_on_each_selected_day() {
    let planner = planner_with_cs101();
    let grid = planner.grid();

    for day in [DayOfWeek::Monday, DayOfWeek::Wednesday] {
        let column = grid.day(day);
        assert_eq!(column.items.len(), 1);
        let item = &column.items[0];
        assert_eq!(item.title(), "CS101");
        assert_eq!(item.activity_type(), ActivityType::Class);
        assert_eq!(item.start_time().to_string(), "09:00");
        assert_eq!(item.end_time().to_string(), "10:15");
        assert!(!item.is_ai_suggested());
    }
    assert!(grid.day(DayOfWeek::Tuesday).is_empty());
    assert_ne!(
        grid.day(DayOfWeek::Monday).items[0].id,
        grid.day(DayOfWeek::Wednesday).items[0].id
    );
}

#[test]
fn test_twelve_hour_edits_reach_the_store() {
    let mut planner = Planner::default();
    let mut draft = ActivityDraft::new("Shift");
    draft.activity_type = ActivityType::Work;
    draft.toggle_day(DayOfWeek::Friday);
    draft.edit_time(TimeField::Start, TimePart::Hour(1)).unwrap();
    draft.edit_time(TimeField::Start, TimePart::Meridiem(Meridiem::Pm)).unwrap();
    draft.edit_time(TimeField::End, TimePart::Hour(5)).unwrap();
    draft.edit_time(TimeField::End, TimePart::Minute(30)).unwrap();
    draft.edit_time(TimeField::End, TimePart::Meridiem(Meridiem::Pm)).unwrap();

    let added = planner.add_activity(&draft).unwrap();
    assert_eq!(added[0].start_time().to_string(), "13:00");
    assert_eq!(added[0].end_time().to_string(), "17:30");
}

#[test]
fn test_day_columns_are_sorted_by_start() {
    let mut planner = Planner::default();
    for (title, hour) in [("Late", 16), ("Early", 8), ("Noon", 12)] {
        let mut draft = ActivityDraft::new(title);
        draft.toggle_day(DayOfWeek::Thursday);
        draft.set_time(TimeField::Start, WallTime::from_hm(hour, 0).unwrap());
        draft.set_time(TimeField::End, WallTime::from_hm(hour + 1, 0).unwrap());
        planner.add_activity(&draft).unwrap();
    }

    let grid = planner.grid();
    let titles: Vec<&str> = grid.day(DayOfWeek::Thursday).items.iter().map(|i| i.title()).collect();
    assert_eq!(titles, vec!["Early", "Noon", "Late"]);
}

#[tokio::test]
async fn test_empty_schedule_never_calls_gateway() {
    let mut planner = Planner::default();
    let err = planner.generate_suggestions(&Offline).await.unwrap_err();
    assert_eq!(err, PlannerError::NoItems);
    assert_eq!(planner.message(), Some(MSG_NO_ITEMS));
    assert!(!planner.is_loading());
}

#[tokio::test]
async fn test_full_review_cycle() {
    let mut planner = planner_with_cs101();
    let source = Canned(vec![
        suggestion("Algebra Review", DayOfWeek::Tuesday, "14:00", "15:00"),
        suggestion("Reading", DayOfWeek::Thursday, "10:00", "11:30"),
        suggestion("Lab prep", DayOfWeek::Friday, "16:00", "17:00"),
    ]);

    let status = planner.generate_suggestions(&source).await.unwrap();
    assert_eq!(status, SuggestionStatus::Reviewing { count: 3 });
    assert_eq!(planner.store().len(), 2, "nothing is written before a gesture");

    let review = planner.review().unwrap();
    assert_eq!(review.current().unwrap().title, "Algebra Review");

    // Short drag springs back.
    assert!(planner.swipe(100.0).unwrap().is_empty());
    assert_eq!(planner.review().unwrap().position(), 0);

    let events = planner.swipe(140.0).unwrap();
    assert!(matches!(&events[0], ReviewEvent::Accepted { item } if item.is_ai_suggested()));

    let events = planner.swipe(-150.0).unwrap();
    assert!(matches!(&events[0], ReviewEvent::Rejected { suggestion } if suggestion.title == "Reading"));
    assert!(planner.is_reviewing());

    let events = planner.gesture(Gesture::Accept).unwrap();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[1], ReviewEvent::Finished { accepted: 2, rejected: 1 }));
    assert!(!planner.is_reviewing());

    let grid = planner.grid();
    let tuesday = &grid.day(DayOfWeek::Tuesday).items;
    assert_eq!(tuesday.len(), 1);
    assert_eq!(tuesday[0].activity_type(), ActivityType::Study);
    assert_eq!(tuesday[0].priority(), Priority::Medium);
    assert!(grid.day(DayOfWeek::Thursday).is_empty());
    assert_eq!(grid.total_items(), 4);
}

#[tokio::test]
async fn test_failed_gateway_leaves_schedule_alone() {
    let mut planner = planner_with_cs101();
    let before: Vec<String> = planner.items().iter().map(|i| i.id.clone()).collect();

    let status = planner.generate_suggestions(&Offline).await.unwrap();
    assert_eq!(status, SuggestionStatus::Failed);
    assert_eq!(planner.message(), Some(MSG_CONNECT_FAILED));

    let after: Vec<String> = planner.items().iter().map(|i| i.id.clone()).collect();
    assert_eq!(before, after);
    assert!(planner.can_request_suggestions());
}

#[tokio::test]
async fn test_invalid_suggestions_are_dropped() {
    let mut planner = planner_with_cs101();
    let source = Canned(vec![
        suggestion("Backwards", DayOfWeek::Tuesday, "15:00", "14:00"),
        suggestion("", DayOfWeek::Tuesday, "08:00", "09:00"),
    ]);
    let status = planner.generate_suggestions(&source).await.unwrap();
    assert_eq!(status, SuggestionStatus::NoSlots);
    assert_eq!(planner.message(), Some(MSG_NO_SLOTS));

    let source = Canned(vec![
        suggestion("Backwards", DayOfWeek::Tuesday, "15:00", "14:00"),
        suggestion("Quiz prep", DayOfWeek::Saturday, "11:00", "12:00"),
    ]);
    let status = planner.generate_suggestions(&source).await.unwrap();
    assert_eq!(status, SuggestionStatus::Reviewing { count: 1 });
}

#[tokio::test]
async fn test_item_removed_mid_review_does_not_disturb_cards() {
    let mut planner = planner_with_cs101();
    let source = Canned(vec![
        suggestion("Essay", DayOfWeek::Sunday, "13:00", "14:00"),
        suggestion("Flashcards", DayOfWeek::Sunday, "18:00", "18:45"),
    ]);
    planner.generate_suggestions(&source).await.unwrap();
    planner.gesture(Gesture::Accept).unwrap();

    let essay_id = planner.review().unwrap().accepted_ids()[0].clone();
    assert!(planner.remove_item(&essay_id).is_some());
    assert_eq!(planner.review().unwrap().current().unwrap().title, "Flashcards");

    planner.gesture(Gesture::Accept).unwrap();
    let grid = planner.grid();
    let sunday = &grid.day(DayOfWeek::Sunday).items;
    assert_eq!(sunday.len(), 1);
    assert_eq!(sunday[0].title(), "Flashcards");
}
