//! Domain records shared by the board, the controller, and the API client.
//!
//! DESIGN
//! ======
//! The goals API owns goal identity; this crate only ever holds a projection
//! of one bingo (`BingoSession`) at a time. Wire rows keep the API's
//! camelCase names and are mapped into domain records at the edge.

#[cfg(test)]
#[path = "model_test.rs"]
mod model_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of user goals on a board. The ninth cell is the fixed center.
pub const GOAL_COUNT: usize = 8;

// =============================================================================
// IDENTIFIERS
// =============================================================================

/// Identifier of a remote bingo record. Always a well-formed UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BingoId(Uuid);

impl BingoId {
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse a raw identifier (e.g. a URL path segment).
    ///
    /// # Errors
    ///
    /// Returns the UUID parse error if `raw` is not a UUID.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw.trim()).map(Self)
    }

    #[must_use]
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Path of this bingo's board page.
    #[must_use]
    pub fn board_path(&self) -> String {
        format!("/33bingos/{}", self.0)
    }
}

impl fmt::Display for BingoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for BingoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// =============================================================================
// GOALS
// =============================================================================

/// One persisted goal. Only `achieved` ever changes after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Goal {
    pub id: String,
    pub text: String,
    pub achieved: bool,
}

impl Goal {
    #[must_use]
    pub fn new(id: impl Into<String>, text: impl Into<String>, achieved: bool) -> Self {
        Self { id: id.into(), text: text.into(), achieved }
    }
}

/// A row returned by `GET /api/goals?bingoId=...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalRow {
    pub goal_id: String,
    pub bingo_id: String,
    pub goal: String,
    #[serde(default)]
    pub is_achieved: bool,
}

impl From<GoalRow> for Goal {
    fn from(row: GoalRow) -> Self {
        Self { id: row.goal_id, text: row.goal, achieved: row.is_achieved }
    }
}

/// Body of `PUT /api/goals/{bingoId}`: index-aligned parallel arrays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    pub goal_ids: Vec<String>,
    pub is_achieveds: Vec<bool>,
}

impl GoalUpdate {
    pub fn push(&mut self, goal_id: impl Into<String>, achieved: bool) {
        self.goal_ids.push(goal_id.into());
        self.is_achieveds.push(achieved);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.goal_ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.goal_ids.is_empty()
    }

    /// Iterate `(goal_id, achieved)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, bool)> {
        self.goal_ids
            .iter()
            .map(String::as_str)
            .zip(self.is_achieveds.iter().copied())
    }
}

// =============================================================================
// SESSION
// =============================================================================

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("expected {expected} goals, got {actual}")]
    GoalCount { expected: usize, actual: usize },
}

/// One loaded bingo: its identifier plus the ordered list of its goals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BingoSession {
    bingo_id: BingoId,
    goals: Vec<Goal>,
}

impl BingoSession {
    /// # Errors
    ///
    /// Returns an error unless exactly [`GOAL_COUNT`] goals are supplied.
    pub fn new(bingo_id: BingoId, goals: Vec<Goal>) -> Result<Self, SessionError> {
        if goals.len() != GOAL_COUNT {
            return Err(SessionError::GoalCount { expected: GOAL_COUNT, actual: goals.len() });
        }
        Ok(Self { bingo_id, goals })
    }

    /// Build a session from read-endpoint rows, dropping the per-row bingo id.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly [`GOAL_COUNT`] rows are supplied.
    pub fn from_rows(bingo_id: BingoId, rows: Vec<GoalRow>) -> Result<Self, SessionError> {
        Self::new(bingo_id, rows.into_iter().map(Goal::from).collect())
    }

    #[must_use]
    pub fn bingo_id(&self) -> BingoId {
        self.bingo_id
    }

    #[must_use]
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }
}
