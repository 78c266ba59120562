//! Fixtures and in-memory goals API doubles for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use tokio::sync::Notify;

use crate::api::{ApiError, GoalsApi};
use crate::model::{BingoId, BingoSession, Goal, GoalRow, GoalUpdate};

pub const BINGO_ID: &str = "11111111-1111-1111-1111-111111111111";
pub const OTHER_BINGO_ID: &str = "22222222-2222-2222-2222-222222222222";

pub fn bingo_id() -> BingoId {
    BingoId::parse(BINGO_ID).unwrap()
}

pub fn goals() -> Vec<Goal> {
    ["a", "b", "c", "d", "e", "f", "g", "h"]
        .iter()
        .enumerate()
        .map(|(i, text)| Goal::new(format!("goal-{i}"), *text, false))
        .collect()
}

pub fn session() -> BingoSession {
    BingoSession::new(bingo_id(), goals()).unwrap()
}

pub fn rows(bingo_id: &str, count: usize) -> Vec<GoalRow> {
    (0..count)
        .map(|i| GoalRow {
            goal_id: format!("goal-{i}"),
            bingo_id: bingo_id.into(),
            goal: format!("goal{i}"),
            is_achieved: false,
        })
        .collect()
}

pub fn server_error() -> ApiError {
    ApiError::Status { status: 500, message: None }
}

// =============================================================================
// SCRIPTED API
// =============================================================================

/// Records every call and answers from scripted queues. Empty queues answer
/// with success.
#[derive(Default)]
pub struct MockApi {
    create_results: Mutex<VecDeque<Result<BingoId, ApiError>>>,
    fetch_results: Mutex<VecDeque<Result<Vec<GoalRow>, ApiError>>>,
    update_results: Mutex<VecDeque<Result<(), ApiError>>>,
    pub creates: Mutex<Vec<Vec<String>>>,
    pub fetches: Mutex<Vec<BingoId>>,
    pub updates: Mutex<Vec<(BingoId, GoalUpdate)>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_create(self, result: Result<BingoId, ApiError>) -> Self {
        self.create_results.lock().unwrap().push_back(result);
        self
    }

    pub fn with_fetch(self, result: Result<Vec<GoalRow>, ApiError>) -> Self {
        self.fetch_results.lock().unwrap().push_back(result);
        self
    }

    pub fn with_update(self, result: Result<(), ApiError>) -> Self {
        self.update_results.lock().unwrap().push_back(result);
        self
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl GoalsApi for MockApi {
    async fn create_goals(&self, goals: &[String]) -> Result<BingoId, ApiError> {
        self.creates.lock().unwrap().push(goals.to_vec());
        self.create_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(bingo_id()))
    }

    async fn fetch_goals(&self, bingo_id: BingoId) -> Result<Vec<GoalRow>, ApiError> {
        self.fetches.lock().unwrap().push(bingo_id);
        self.fetch_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(rows(&bingo_id.to_string(), 8)))
    }

    async fn update_goals(&self, bingo_id: BingoId, update: &GoalUpdate) -> Result<(), ApiError> {
        self.updates.lock().unwrap().push((bingo_id, update.clone()));
        self.update_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(()))
    }
}

// =============================================================================
// GATED API
// =============================================================================

/// Holds create and update calls open until the test releases them.
///
/// `entered` fires as soon as the call starts, before the inner mock records
/// it; the call then waits on `release` before answering from the inner script.
#[derive(Default)]
pub struct GatedApi {
    pub inner: MockApi,
    pub entered: Notify,
    pub release: Notify,
}

impl GatedApi {
    pub fn new(inner: MockApi) -> Self {
        Self { inner, entered: Notify::new(), release: Notify::new() }
    }
}

#[async_trait::async_trait]
impl GoalsApi for GatedApi {
    async fn create_goals(&self, goals: &[String]) -> Result<BingoId, ApiError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.create_goals(goals).await
    }

    async fn fetch_goals(&self, bingo_id: BingoId) -> Result<Vec<GoalRow>, ApiError> {
        self.inner.fetch_goals(bingo_id).await
    }

    async fn update_goals(&self, bingo_id: BingoId, update: &GoalUpdate) -> Result<(), ApiError> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.update_goals(bingo_id, update).await
    }
}
