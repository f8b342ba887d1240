//! Planner controller.
//!
//! Owns every piece of session state: the item store, the current view, the
//! `loading` flag guarding the single outstanding gateway call, and the last
//! user-facing message. Each field has exactly one writer, this type.
//!
//! ```text
//! Editing --generate--> (loading) --Ready(n>0)--> Reviewing --Finished--> Editing
//!                              \--Ready(0) | Failed--> Editing + message
//! ```

use thiserror::Error;
use tracing::{debug, info};

use crate::error::ValidationError;
use crate::gateway::{request_suggestions, SuggestionOutcome, SuggestionSource};
use crate::grid::WeeklyGrid;
use crate::review::{Gesture, ReviewEvent, ReviewSession, SWIPE_THRESHOLD};
use crate::schedule::{ActivityDraft, NewScheduleItem, ScheduleItem};
use crate::store::ScheduleStore;

pub const MSG_NO_ITEMS: &str = "Please add at least one item to your schedule first.";
pub const MSG_NO_SLOTS: &str =
    "AI couldn't find good slots. Try adding more fixed events or freeing up space.";
pub const MSG_CONNECT_FAILED: &str = "Failed to connect to AI. Please check your API key.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("Please add at least one item to your schedule first.")]
    NoItems,

    #[error("A suggestion request is already in progress")]
    AlreadyLoading,

    #[error("Finish or leave the current review first")]
    ReviewInProgress,

    #[error("No suggestion review is active")]
    NotReviewing,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Which screen the planner is on.
#[derive(Debug, Clone)]
pub enum PlannerView {
    Editing,
    Reviewing(ReviewSession),
}

/// How a completed gateway call was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestionStatus {
    /// A review session started with this many cards.
    Reviewing { count: usize },
    /// The call succeeded with nothing usable.
    NoSlots,
    /// The call failed.
    Failed,
}

#[derive(Debug, Clone)]
pub struct Planner {
    store: ScheduleStore,
    view: PlannerView,
    loading: bool,
    message: Option<String>,
    swipe_threshold: f64,
}

impl Default for Planner {
    fn default() -> Self {
        Self::new(ScheduleStore::new())
    }
}

impl Planner {
    pub fn new(store: ScheduleStore) -> Self {
        Self {
            store,
            view: PlannerView::Editing,
            loading: false,
            message: None,
            swipe_threshold: SWIPE_THRESHOLD,
        }
    }

    pub fn with_swipe_threshold(mut self, threshold: f64) -> Self {
        self.swipe_threshold = threshold.abs();
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn store(&self) -> &ScheduleStore {
        &self.store
    }

    pub fn items(&self) -> &[ScheduleItem] {
        self.store.items()
    }

    /// Grid over the live collection. The same projection serves the edit
    /// view and the review view.
    pub fn grid(&self) -> WeeklyGrid {
        WeeklyGrid::project(self.store.items())
    }

    pub fn view(&self) -> &PlannerView {
        &self.view
    }

    pub fn review(&self) -> Option<&ReviewSession> {
        match &self.view {
            PlannerView::Reviewing(session) => Some(session),
            PlannerView::Editing => None,
        }
    }

    pub fn is_reviewing(&self) -> bool {
        self.review().is_some()
    }

    /// True while a gateway call is outstanding; the trigger should be disabled.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the "generate" control is enabled.
    pub fn can_request_suggestions(&self) -> bool {
        !self.loading && !self.store.is_empty() && !self.is_reviewing()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    // ── Editing ──────────────────────────────────────────────────────

    /// Submit the entry form: one item per selected day.
    ///
    /// # Errors
    /// The draft's validation error; nothing is added and the message is set.
    pub fn add_activity(&mut self, draft: &ActivityDraft) -> Result<Vec<ScheduleItem>, PlannerError> {
        let result = draft
            .submit()
            .and_then(|items| self.store.add_all(items));
        self.report(result)
    }

    pub fn add_item(&mut self, item: NewScheduleItem) -> Result<ScheduleItem, PlannerError> {
        let result = self.store.add(item).cloned();
        self.report(result)
    }

    /// Remove an item; unknown ids are ignored.
    pub fn remove_item(&mut self, id: &str) -> Option<ScheduleItem> {
        self.store.remove(id)
    }

    fn report<T>(&mut self, result: Result<T, ValidationError>) -> Result<T, PlannerError> {
        match result {
            Ok(value) => Ok(value),
            Err(e) => {
                self.message = Some(e.to_string());
                Err(e.into())
            }
        }
    }

    // ── Suggestions ──────────────────────────────────────────────────

    /// Start a suggestion request: check preconditions, raise `loading`, and
    /// return the snapshot to send.
    ///
    /// # Errors
    /// [`PlannerError::NoItems`] on an empty schedule (message set),
    /// [`PlannerError::AlreadyLoading`] while a call is outstanding,
    /// [`PlannerError::ReviewInProgress`] during a review.
    pub fn begin_suggestions(&mut self) -> Result<Vec<ScheduleItem>, PlannerError> {
        if self.loading {
            return Err(PlannerError::AlreadyLoading);
        }
        if self.is_reviewing() {
            return Err(PlannerError::ReviewInProgress);
        }
        if self.store.is_empty() {
            self.message = Some(MSG_NO_ITEMS.to_string());
            return Err(PlannerError::NoItems);
        }
        self.loading = true;
        self.message = None;
        debug!(items = self.store.len(), "suggestion request started");
        Ok(self.store.items().to_vec())
    }

    /// Finish a request started with [`begin_suggestions`](Self::begin_suggestions).
    /// The store is not touched here; only accepted cards reach it.
    pub fn complete_suggestions(&mut self, outcome: SuggestionOutcome) -> SuggestionStatus {
        self.loading = false;
        match outcome {
            SuggestionOutcome::Failed(_) => {
                self.message = Some(MSG_CONNECT_FAILED.to_string());
                SuggestionStatus::Failed
            }
            SuggestionOutcome::Ready(list) => {
                let usable: Vec<_> = list.into_iter().filter(|s| s.validate().is_ok()).collect();
                match ReviewSession::new(usable) {
                    Ok(session) => {
                        let session = session.with_threshold(self.swipe_threshold);
                        let count = session.total();
                        info!(count, "suggestion review started");
                        self.view = PlannerView::Reviewing(session);
                        SuggestionStatus::Reviewing { count }
                    }
                    Err(e) => {
                        debug!(error = %e, "no reviewable suggestions");
                        self.message = Some(MSG_NO_SLOTS.to_string());
                        SuggestionStatus::NoSlots
                    }
                }
            }
        }
    }

    /// Full round trip: begin, one gateway call, complete.
    pub async fn generate_suggestions<S>(&mut self, source: &S) -> Result<SuggestionStatus, PlannerError>
    where
        S: SuggestionSource + ?Sized,
    {
        let snapshot = self.begin_suggestions()?;
        let outcome = request_suggestions(source, &snapshot).await;
        Ok(self.complete_suggestions(outcome))
    }

    // ── Review ───────────────────────────────────────────────────────

    /// Apply a committed gesture to the visible card.
    ///
    /// # Errors
    /// [`PlannerError::NotReviewing`] outside a review.
    pub fn gesture(&mut self, gesture: Gesture) -> Result<Vec<ReviewEvent>, PlannerError> {
        let PlannerView::Reviewing(session) = &mut self.view else {
            return Err(PlannerError::NotReviewing);
        };
        let events = session.apply(gesture, &mut self.store);
        self.after_review_events(&events);
        Ok(events)
    }

    /// Resolve a released drag; short drags do nothing.
    pub fn swipe(&mut self, dx: f64) -> Result<Vec<ReviewEvent>, PlannerError> {
        let PlannerView::Reviewing(session) = &mut self.view else {
            return Err(PlannerError::NotReviewing);
        };
        let events = session.release(dx, &mut self.store);
        self.after_review_events(&events);
        Ok(events)
    }

    /// Leave the review early. Already accepted items stay.
    pub fn back_to_editor(&mut self) {
        if self.is_reviewing() {
            debug!("suggestion review abandoned");
        }
        self.view = PlannerView::Editing;
    }

    fn after_review_events(&mut self, events: &[ReviewEvent]) {
        if events.iter().any(|e| matches!(e, ReviewEvent::Finished { .. })) {
            self.view = PlannerView::Editing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::GatewayError;
    use crate::schedule::{AiSuggestion, DayOfWeek};

    fn draft(title: &str, days: &[DayOfWeek]) -> ActivityDraft {
        let mut d = ActivityDraft::new(title);
        for day in days {
            d.toggle_day(*day);
        }
        d
    }

    fn suggestions(n: usize) -> Vec<AiSuggestion> {
        (0..n)
            .map(|i| AiSuggestion {
                title: format!("Study {i}"),
                day: DayOfWeek::ALL[i % 7],
                start_time: "15:00".parse().unwrap(),
                end_time: "16:00".parse().unwrap(),
                reason: "open afternoon".to_string(),
            })
            .collect()
    }

    #[test]
    fn add_activity_creates_item_per_day() {
        let mut planner = Planner::default();
        let added = planner
            .add_activity(&draft("Physics", &[DayOfWeek::Tuesday, DayOfWeek::Thursday]))
            .unwrap();
        assert_eq!(added.len(), 2);
        assert_eq!(planner.grid().day(DayOfWeek::Tuesday).items.len(), 1);
        assert_eq!(planner.grid().day(DayOfWeek::Thursday).items.len(), 1);
    }

    #[test]
    fn invalid_form_sets_message_and_keeps_store() {
        let mut planner = Planner::default();
        let err = planner.add_activity(&draft("Physics", &[])).unwrap_err();
        assert_eq!(err, PlannerError::Validation(ValidationError::NoDaySelected));
        assert!(planner.message().is_some());
        assert!(planner.store().is_empty());
    }

    #[test]
    fn empty_schedule_cannot_request() {
        let mut planner = Planner::default();
        assert!(!planner.can_request_suggestions());
        assert_eq!(planner.begin_suggestions().unwrap_err(), PlannerError::NoItems);
        assert_eq!(planner.message(), Some(MSG_NO_ITEMS));
        assert!(!planner.is_loading());
    }

    #[test]
    fn loading_flag_blocks_reentry() {
        let mut planner = Planner::default();
        planner.add_activity(&draft("Work", &[DayOfWeek::Monday])).unwrap();
        planner.begin_suggestions().unwrap();
        assert!(planner.is_loading());
        assert!(!planner.can_request_suggestions());
        assert_eq!(planner.begin_suggestions().unwrap_err(), PlannerError::AlreadyLoading);

        planner.complete_suggestions(SuggestionOutcome::Ready(Vec::new()));
        assert!(!planner.is_loading());
    }

    #[test]
    fn empty_and_failed_results_have_distinct_messages() {
        let mut planner = Planner::default();
        planner.add_activity(&draft("Work", &[DayOfWeek::Monday])).unwrap();

        planner.begin_suggestions().unwrap();
        let status = planner.complete_suggestions(SuggestionOutcome::Ready(Vec::new()));
        assert_eq!(status, SuggestionStatus::NoSlots);
        assert_eq!(planner.message(), Some(MSG_NO_SLOTS));

        planner.begin_suggestions().unwrap();
        let status = planner.complete_suggestions(SuggestionOutcome::Failed(GatewayError::MissingCredential));
        assert_eq!(status, SuggestionStatus::Failed);
        assert_eq!(planner.message(), Some(MSG_CONNECT_FAILED));

        assert_eq!(planner.store().len(), 1);
        assert!(!planner.is_reviewing());
    }

    #[test]
    fn review_returns_to_editing_once_finished() {
        let mut planner = Planner::default();
        planner.add_activity(&draft("Work", &[DayOfWeek::Monday])).unwrap();
        planner.begin_suggestions().unwrap();
        let status = planner.complete_suggestions(SuggestionOutcome::Ready(suggestions(2)));
        assert_eq!(status, SuggestionStatus::Reviewing { count: 2 });
        assert!(planner.is_reviewing());
        assert!(planner.begin_suggestions().is_err());

        // Below threshold: nothing changes.
        assert!(planner.swipe(60.0).unwrap().is_empty());
        planner.swipe(180.0).unwrap();
        assert!(planner.is_reviewing());
        let events = planner.gesture(Gesture::Reject).unwrap();
        assert!(matches!(events.last(), Some(ReviewEvent::Finished { accepted: 1, rejected: 1 })));

        assert!(!planner.is_reviewing());
        assert_eq!(planner.gesture(Gesture::Accept).unwrap_err(), PlannerError::NotReviewing);
        assert_eq!(planner.store().len(), 2);
    }

    #[test]
    fn leaving_review_keeps_accepted_items() {
        let mut planner = Planner::default();
        planner.add_activity(&draft("Work", &[DayOfWeek::Monday])).unwrap();
        planner.begin_suggestions().unwrap();
        planner.complete_suggestions(SuggestionOutcome::Ready(suggestions(3)));
        planner.gesture(Gesture::Accept).unwrap();
        planner.back_to_editor();
        assert!(!planner.is_reviewing());
        assert_eq!(planner.store().len(), 2);
        assert!(planner.can_request_suggestions());
    }
}
