//! AI suggestion gateway.
//!
//! The only outbound integration: the current schedule is summarized into a
//! prompt, sent to a hosted generative model, and the structured reply is
//! validated into [`AiSuggestion`] values.
//!
//! ## Failure model
//!
//! Every failure (missing credential, transport error, timeout, bad status,
//! malformed or off-schema reply) is caught here. [`request_suggestions`]
//! turns it into [`SuggestionOutcome::Failed`], and callers that only want a
//! list get an empty one from [`SuggestionOutcome::into_suggestions`].

use async_trait::async_trait;
use thiserror::Error;
use tracing::{error, info};

use crate::schedule::{AiSuggestion, ScheduleItem};

pub mod client;
pub mod prompt;
pub mod schema;

pub use client::GeminiClient;
pub use prompt::{build_prompt, ScheduleSummary};
pub use schema::{parse_suggestions, response_schema};

/// Gateway-boundary errors. None of these are fatal to the planner.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("No API key configured for the AI gateway")]
    MissingCredential,

    #[error("Request to AI service failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("AI service did not answer within {secs} seconds")]
    Timeout { secs: u64 },

    #[error("AI service returned no text")]
    EmptyResponse,

    #[error("AI reply is not valid JSON: {0}")]
    Malformed(String),

    #[error("AI reply does not match the suggestion schema: {0}")]
    Schema(String),

    #[error("Failed to build request: {0}")]
    Request(String),
}

/// Anything that can propose study blocks for a schedule.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Identifier used in logs.
    fn name(&self) -> &str;

    /// One request for the given schedule. No retries.
    async fn fetch(&self, items: &[ScheduleItem]) -> Result<Vec<AiSuggestion>, GatewayError>;
}

/// Result of a gateway call as seen by the planner.
#[derive(Debug)]
pub enum SuggestionOutcome {
    /// The call succeeded; the list may still be empty.
    Ready(Vec<AiSuggestion>),
    Failed(GatewayError),
}

impl SuggestionOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Degrade to a plain list: failures become an empty list.
    pub fn into_suggestions(self) -> Vec<AiSuggestion> {
        match self {
            Self::Ready(list) => list,
            Self::Failed(_) => Vec::new(),
        }
    }
}

/// Call `source` once and catch every failure at this boundary.
pub async fn request_suggestions<S>(source: &S, items: &[ScheduleItem]) -> SuggestionOutcome
where
    S: SuggestionSource + ?Sized,
{
    match source.fetch(items).await {
        Ok(list) => {
            info!(source = source.name(), count = list.len(), "received study suggestions");
            SuggestionOutcome::Ready(list)
        }
        Err(e) => {
            error!(source = source.name(), error = %e, "error generating suggestions");
            SuggestionOutcome::Failed(e)
        }
    }
}
