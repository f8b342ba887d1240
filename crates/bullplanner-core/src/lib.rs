//! # BullPlanner Core Library
//!
//! Weekly schedule planning for university students: fixed commitments are
//! entered per weekday, projected onto a seven-day grid, and an external
//! generative model proposes study blocks that the student accepts or rejects
//! one card at a time.
//!
//! ## Architecture
//!
//! - **Clock**: `HH:mm` canonical times and the 12-hour display codec
//! - **Store**: in-memory item collection with day-partitioned, time-sorted views
//! - **Grid**: pure weekly projection of the store
//! - **Review**: swipe-card state machine over AI candidates
//! - **Gateway**: prompt, schema, and HTTP client for the suggestion model
//! - **Planner**: controller that owns all of the above for one session
//!
//! All schedule state is in memory for the lifetime of a session. Only the
//! configuration file is persisted.
//!
//! ## Key Components
//!
//! - [`Planner`]: session controller
//! - [`ScheduleStore`]: item collection
//! - [`WeeklyGrid`]: per-day projection
//! - [`ReviewSession`]: suggestion review state machine
//! - [`GeminiClient`]: suggestion gateway client
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod gateway;
pub mod grid;
pub mod planner;
pub mod review;
pub mod schedule;
pub mod storage;
pub mod store;

pub use clock::{format_range, DisplayTime, Meridiem, WallTime};
pub use error::{ConfigError, CoreError, ValidationError};
pub use gateway::{request_suggestions, GatewayError, GeminiClient, SuggestionOutcome, SuggestionSource};
pub use grid::{DayColumn, WeeklyGrid};
pub use planner::{Planner, PlannerError, PlannerView, SuggestionStatus};
pub use review::{resolve_swipe, Gesture, ReviewEvent, ReviewSession, ReviewState, SwipeOutcome};
pub use schedule::{ActivityDraft, ActivityType, AiSuggestion, DayOfWeek, NewScheduleItem, Priority, ScheduleItem};
pub use storage::Config;
pub use store::ScheduleStore;
