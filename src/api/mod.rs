//! Goals API: the remote collaborator behind creation, loading, and toggles.
//!
//! DESIGN
//! ======
//! Flows depend on the `GoalsApi` trait rather than on HTTP so they can run
//! against in-memory doubles. `HttpGoalsApi` is the production adapter.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become `ApiError::Status` carrying the server's `error`
//! string when the body has one. Transport failures become
//! `ApiError::Request`. Callers decide what a failure means (rollback,
//! not-found, inline message); nothing here retries.

pub mod http;

use crate::model::{BingoId, GoalRow, GoalUpdate};

pub use http::HttpGoalsApi;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never produced a response (connect, DNS, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error(
        "server responded with status {status}{}",
        message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
    )]
    Status { status: u16, message: Option<String> },

    /// A success response body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

/// The three goals-API calls the client makes.
#[async_trait::async_trait]
pub trait GoalsApi: Send + Sync {
    /// `POST /api/createGoals`: create a bingo from eight goal strings.
    async fn create_goals(&self, goals: &[String]) -> Result<BingoId, ApiError>;

    /// `GET /api/goals?bingoId=...`: read a bingo's goal rows.
    async fn fetch_goals(&self, bingo_id: BingoId) -> Result<Vec<GoalRow>, ApiError>;

    /// `PUT /api/goals/{bingoId}`: store the achieved flag of every goal.
    async fn update_goals(&self, bingo_id: BingoId, update: &GoalUpdate) -> Result<(), ApiError>;
}
