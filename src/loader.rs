//! Board loading: raw identifier in, session or "not found" out.
//!
//! Every failure on this path is a not-found outcome for the board page:
//! a malformed identifier (never sent to the backend), an unavailable or
//! failing read, or a goal list that cannot form a board.

#[cfg(test)]
#[path = "loader_test.rs"]
mod loader_test;

use tracing::{info, warn};

use crate::api::{ApiError, GoalsApi};
use crate::model::{BingoId, BingoSession, SessionError};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NotFound {
    #[error("board not found: '{0}' is not a valid board id")]
    MalformedId(String),
    #[error("board not found: {0}")]
    Unavailable(ApiError),
    #[error("board not found: {0}")]
    Incomplete(SessionError),
}

/// Load the session for a raw board identifier (e.g. a URL path segment).
///
/// # Errors
///
/// Returns [`NotFound`] describing why the board cannot be shown.
pub async fn load_session(api: &dyn GoalsApi, raw_id: &str) -> Result<BingoSession, NotFound> {
    let Ok(bingo_id) = BingoId::parse(raw_id) else {
        info!(raw_id, "load: malformed board id");
        return Err(NotFound::MalformedId(raw_id.to_owned()));
    };

    let rows = api.fetch_goals(bingo_id).await.map_err(|e| {
        warn!(error = %e, %bingo_id, "load: goals read failed");
        NotFound::Unavailable(e)
    })?;

    BingoSession::from_rows(bingo_id, rows).map_err(|e| {
        warn!(error = %e, %bingo_id, "load: goal rows cannot form a board");
        NotFound::Incomplete(e)
    })
}
