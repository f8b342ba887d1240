//! Swipe review of AI study-block suggestions.
//!
//! A review session walks a fixed candidate list one card at a time. Each
//! gesture resolves the visible card and advances the cursor:
//!
//! ```text
//! Reviewing(0) -> Reviewing(1) -> ... -> Reviewing(N) == Done
//! ```
//!
//! Reaching the end emits a single `Finished` event. Gestures after that are
//! ignored.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::ValidationError;
use crate::schedule::{AiSuggestion, ScheduleItem};
use crate::store::ScheduleStore;

/// Horizontal drag distance, in display units, that commits a card.
pub const SWIPE_THRESHOLD: f64 = 100.0;

/// Decision derived from a released drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeOutcome {
    Accept,
    Reject,
    /// Below threshold: the card springs back.
    None,
}

/// Resolve a drag released at horizontal offset `dx` with the default threshold.
pub fn resolve_swipe(dx: f64) -> SwipeOutcome {
    resolve_swipe_with(dx, SWIPE_THRESHOLD)
}

/// Right of `+threshold` accepts, left of `-threshold` rejects. Both bounds are exclusive.
pub fn resolve_swipe_with(dx: f64, threshold: f64) -> SwipeOutcome {
    if dx > threshold {
        SwipeOutcome::Accept
    } else if dx < -threshold {
        SwipeOutcome::Reject
    } else {
        SwipeOutcome::None
    }
}

/// A committed gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gesture {
    Accept,
    Reject,
}

impl SwipeOutcome {
    pub fn gesture(self) -> Option<Gesture> {
        match self {
            Self::Accept => Some(Gesture::Accept),
            Self::Reject => Some(Gesture::Reject),
            Self::None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "state", content = "index")]
pub enum ReviewState {
    Reviewing(usize),
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewEvent {
    /// The candidate was written to the store.
    Accepted { item: ScheduleItem },
    Rejected { suggestion: AiSuggestion },
    /// Emitted once, on the gesture that resolves the last card.
    Finished { accepted: usize, rejected: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReviewError {
    #[error("No suggestions to review")]
    NoCandidates,

    #[error("Suggestion {index} is invalid: {source}")]
    InvalidCandidate {
        index: usize,
        #[source]
        source: ValidationError,
    },
}

#[derive(Debug, Clone)]
pub struct ReviewSession {
    candidates: Vec<AiSuggestion>,
    state: ReviewState,
    accepted_ids: Vec<String>,
    rejected: usize,
    threshold: f64,
}

impl ReviewSession {
    /// Start a session at the first card.
    ///
    /// # Errors
    /// [`ReviewError::NoCandidates`] for an empty list (the session never
    /// starts), [`ReviewError::InvalidCandidate`] if any candidate breaks the
    /// item invariants.
    pub fn new(candidates: Vec<AiSuggestion>) -> Result<Self, ReviewError> {
        if candidates.is_empty() {
            return Err(ReviewError::NoCandidates);
        }
        for (index, candidate) in candidates.iter().enumerate() {
            candidate
                .validate()
                .map_err(|source| ReviewError::InvalidCandidate { index, source })?;
        }
        Ok(Self {
            candidates,
            state: ReviewState::Reviewing(0),
            accepted_ids: Vec::new(),
            rejected: 0,
            threshold: SWIPE_THRESHOLD,
        })
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold.abs();
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> ReviewState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == ReviewState::Done
    }

    /// The single card currently open for a gesture.
    pub fn current(&self) -> Option<&AiSuggestion> {
        match self.state {
            ReviewState::Reviewing(index) => self.candidates.get(index),
            ReviewState::Done => None,
        }
    }

    /// Cursor position; equals the candidate count once done.
    pub fn position(&self) -> usize {
        match self.state {
            ReviewState::Reviewing(index) => index,
            ReviewState::Done => self.candidates.len(),
        }
    }

    pub fn total(&self) -> usize {
        self.candidates.len()
    }

    pub fn candidates(&self) -> &[AiSuggestion] {
        &self.candidates
    }

    pub fn remaining(&self) -> usize {
        self.total() - self.position()
    }

    /// Ids of items this session wrote to the store, in acceptance order.
    pub fn accepted_ids(&self) -> &[String] {
        &self.accepted_ids
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Resolve a released drag. Below threshold nothing happens.
    pub fn release(&mut self, dx: f64, store: &mut ScheduleStore) -> Vec<ReviewEvent> {
        match resolve_swipe_with(dx, self.threshold).gesture() {
            Some(gesture) => self.apply(gesture, store),
            None => Vec::new(),
        }
    }

    /// Resolve the current card and advance.
    pub fn apply(&mut self, gesture: Gesture, store: &mut ScheduleStore) -> Vec<ReviewEvent> {
        let ReviewState::Reviewing(index) = self.state else {
            return Vec::new();
        };
        let Some(candidate) = self.candidates.get(index).cloned() else {
            self.state = ReviewState::Done;
            return Vec::new();
        };

        let mut events = Vec::with_capacity(2);
        match gesture {
            Gesture::Accept => match store.add(candidate.clone().into_new_item()) {
                Ok(item) => {
                    debug!(index, id = %item.id, title = %item.item.title, "suggestion accepted");
                    self.accepted_ids.push(item.id.clone());
                    events.push(ReviewEvent::Accepted { item: item.clone() });
                }
                Err(e) => {
                    warn!(index, error = %e, "accepted suggestion could not be stored");
                    self.rejected += 1;
                    events.push(ReviewEvent::Rejected { suggestion: candidate });
                }
            },
            Gesture::Reject => {
                debug!(index, title = %candidate.title, "suggestion rejected");
                self.rejected += 1;
                events.push(ReviewEvent::Rejected { suggestion: candidate });
            }
        }

        let next = index + 1;
        if next >= self.candidates.len() {
            self.state = ReviewState::Done;
            info!(
                accepted = self.accepted_ids.len(),
                rejected = self.rejected,
                "suggestion review finished"
            );
            events.push(ReviewEvent::Finished {
                accepted: self.accepted_ids.len(),
                rejected: self.rejected,
            });
        } else {
            self.state = ReviewState::Reviewing(next);
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{ActivityType, DayOfWeek, Priority};

    fn suggestion(title: &str, day: DayOfWeek, start: &str, end: &str) -> AiSuggestion {
        AiSuggestion {
            title: title.to_string(),
            day,
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            reason: "free slot".to_string(),
        }
    }

    fn three() -> Vec<AiSuggestion> {
        vec![
            suggestion("Review A", DayOfWeek::Monday, "13:00", "14:00"),
            suggestion("Review B", DayOfWeek::Tuesday, "15:00", "16:30"),
            suggestion("Review C", DayOfWeek::Friday, "10:00", "11:00"),
        ]
    }

    fn finished_count(events: &[ReviewEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, ReviewEvent::Finished { .. }))
            .count()
    }

    #[test]
    fn swipe_threshold_is_exclusive() {
        assert_eq!(resolve_swipe(100.0), SwipeOutcome::None);
        assert_eq!(resolve_swipe(100.5), SwipeOutcome::Accept);
        assert_eq!(resolve_swipe(-100.0), SwipeOutcome::None);
        assert_eq!(resolve_swipe(-140.0), SwipeOutcome::Reject);
        assert_eq!(resolve_swipe(0.0), SwipeOutcome::None);
    }

    #[test]
    fn empty_candidate_list_never_starts() {
        assert_eq!(ReviewSession::new(Vec::new()).unwrap_err(), ReviewError::NoCandidates);
    }

    #[test]
    fn invalid_candidate_is_rejected_up_front() {
        let bad = vec![suggestion("Backwards", DayOfWeek::Monday, "12:00", "11:00")];
        assert!(matches!(
            ReviewSession::new(bad),
            Err(ReviewError::InvalidCandidate { index: 0, .. })
        ));
    }

    #[test]
    fn n_gestures_reach_done_with_single_finish() {
        let mut store = ScheduleStore::new();
        let mut session = ReviewSession::new(three()).unwrap();
        assert_eq!(session.state(), ReviewState::Reviewing(0));

        let mut all = Vec::new();
        all.extend(session.apply(Gesture::Accept, &mut store));
        assert_eq!(session.state(), ReviewState::Reviewing(1));
        all.extend(session.apply(Gesture::Reject, &mut store));
        assert_eq!(session.state(), ReviewState::Reviewing(2));
        all.extend(session.apply(Gesture::Accept, &mut store));
        assert_eq!(session.state(), ReviewState::Done);

        assert_eq!(finished_count(&all), 1);
        assert_eq!(
            all.last(),
            Some(&ReviewEvent::Finished { accepted: 2, rejected: 1 })
        );

        // Further gestures and queries do not re-signal.
        assert!(session.apply(Gesture::Accept, &mut store).is_empty());
        assert!(session.release(500.0, &mut store).is_empty());
        assert!(session.is_done());
        assert!(session.current().is_none());
        assert_eq!(session.remaining(), 0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn accept_writes_study_block_to_store() {
        let mut store = ScheduleStore::new();
        let mut session = ReviewSession::new(vec![AiSuggestion {
            title: "Algebra Review".to_string(),
            day: DayOfWeek::Tuesday,
            start_time: "14:00".parse().unwrap(),
            end_time: "15:00".parse().unwrap(),
            reason: "gap before work".to_string(),
        }])
        .unwrap();

        let events = session.apply(Gesture::Accept, &mut store);
        let ReviewEvent::Accepted { item } = &events[0] else {
            panic!("expected Accepted, got {events:?}");
        };
        assert_eq!(item.title(), "Algebra Review");
        assert_eq!(item.day(), DayOfWeek::Tuesday);
        assert_eq!(item.start_time().to_string(), "14:00");
        assert_eq!(item.end_time().to_string(), "15:00");
        assert_eq!(item.priority(), Priority::Medium);
        assert_eq!(item.activity_type(), ActivityType::Study);
        assert!(item.is_ai_suggested());
        assert!(!item.id.is_empty());
        assert_eq!(store.get(&item.id), Some(item));
        assert_eq!(session.accepted_ids(), &[item.id.clone()]);
    }

    #[test]
    fn short_drag_springs_back() {
        let mut store = ScheduleStore::new();
        let mut session = ReviewSession::new(three()).unwrap();
        assert!(session.release(42.0, &mut store).is_empty());
        assert!(session.release(-99.9, &mut store).is_empty());
        assert_eq!(session.state(), ReviewState::Reviewing(0));
        assert_eq!(session.current().map(|s| s.title.as_str()), Some("Review A"));
    }

    #[test]
    fn release_maps_direction_to_gesture() {
        let mut store = ScheduleStore::new();
        let mut session = ReviewSession::new(three()).unwrap();
        let events = session.release(-150.0, &mut store);
        assert!(matches!(events[0], ReviewEvent::Rejected { .. }));
        let events = session.release(150.0, &mut store);
        assert!(matches!(events[0], ReviewEvent::Accepted { .. }));
        assert_eq!(store.len(), 1);
        assert_eq!(session.remaining(), 1);
    }

    #[test]
    fn custom_threshold_applies_to_release() {
        let mut store = ScheduleStore::new();
        let mut session = ReviewSession::new(three()).unwrap().with_threshold(30.0);
        assert_eq!(session.release(40.0, &mut store).len(), 1);
        assert_eq!(session.position(), 1);
    }
}
