//! Board controller: optimistic toggling with snapshot rollback.
//!
//! SYSTEM CONTEXT
//! ==============
//! The controller exclusively owns the live `Board` for one bingo. A UI reads
//! it through [`BoardController::snapshot`] or re-renders on every change via
//! [`BoardController::subscribe`].
//!
//! STATE MACHINE
//! =============
//! `Idle --toggle--> Updating --ok--> Idle`
//! `Updating --err--> Idle` with the pre-toggle board restored.
//!
//! At most one update is in flight. A toggle attempted while `Updating` is
//! dropped, not queued, so a fast double click loses its second click.
//! There is no timeout; a slow request simply delays the resolution.
//!
//! Every accepted toggle sends the achieved flag of all eight goals, not just
//! the toggled one. On failure the whole board snapshot captured before the
//! flip is restored.
//!
//! If the caller drops a `toggle_cell` future before the update resolves
//! (a timeout, a `select!`, a cancelled task), the pre-toggle board is
//! restored and the controller returns to `Idle`.
//!
//! `reset` bumps a generation counter. A response that arrives for an older
//! generation is discarded so it cannot roll back the newly loaded board.

#[cfg(test)]
#[path = "controller_test.rs"]
mod controller_test;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::GoalsApi;
use crate::board::{Board, BoardError, build_board, cell_index};
use crate::model::{BingoId, BingoSession};

// =============================================================================
// TYPES
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// No update in flight; toggles are accepted.
    #[default]
    Idle,
    /// One update is in flight; toggles are ignored.
    Updating,
}

/// What a UI needs to render the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardView {
    pub bingo_id: BingoId,
    pub board: Board,
    pub phase: Phase,
}

/// Result of one `toggle_cell` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The update succeeded; the cell keeps its new mark.
    Confirmed { marked: bool },
    /// The update failed; the board was restored to its pre-toggle snapshot.
    RolledBack,
    /// Another update was in flight; nothing changed.
    Busy,
    /// The fixed center cell was addressed; nothing changed.
    Fixed,
    /// Coordinates are off the board; nothing changed.
    OutOfRange,
    /// The board was reset while the update was in flight; its result was dropped.
    Superseded,
}

struct Inner {
    bingo_id: BingoId,
    board: Board,
    phase: Phase,
    generation: u64,
}

impl Inner {
    fn view(&self) -> BoardView {
        BoardView { bingo_id: self.bingo_id, board: self.board.clone(), phase: self.phase }
    }
}

/// Rolls back an optimistic flip whose `toggle_cell` future was dropped
/// before the update resolved. Taking `snapshot` disarms it.
struct PendingToggle<'a> {
    controller: &'a BoardController,
    generation: u64,
    snapshot: Option<Board>,
}

impl Drop for PendingToggle<'_> {
    fn drop(&mut self) {
        let Some(snapshot) = self.snapshot.take() else {
            return;
        };
        let mut inner = self.controller.lock();
        if inner.generation != self.generation {
            return;
        }
        warn!(bingo_id = %inner.bingo_id, "board: toggle cancelled before the update resolved; rolling back");
        inner.board = snapshot;
        inner.phase = Phase::Idle;
        self.controller.publish(&inner);
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

pub struct BoardController {
    api: Arc<dyn GoalsApi>,
    inner: Mutex<Inner>,
    view: watch::Sender<BoardView>,
}

impl BoardController {
    /// Build the board for `session` and start `Idle`.
    ///
    /// # Errors
    ///
    /// Returns an error if the session's goals cannot form a board.
    pub fn new(api: Arc<dyn GoalsApi>, session: &BingoSession) -> Result<Self, BoardError> {
        let inner = Inner {
            bingo_id: session.bingo_id(),
            board: build_board(session.goals())?,
            phase: Phase::Idle,
            generation: 0,
        };
        let (view, _) = watch::channel(inner.view());
        Ok(Self { api, inner: Mutex::new(inner), view })
    }

    /// Current board and phase.
    #[must_use]
    pub fn snapshot(&self) -> BoardView {
        self.lock().view()
    }

    /// Receiver that observes every published board change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<BoardView> {
        self.view.subscribe()
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.lock().phase
    }

    /// Rebuild from a (new) session, discarding any in-flight optimistic state.
    ///
    /// # Errors
    ///
    /// Returns an error if the session's goals cannot form a board; the
    /// current board is kept in that case.
    pub fn reset(&self, session: &BingoSession) -> Result<(), BoardError> {
        let board = build_board(session.goals())?;
        let mut inner = self.lock();
        inner.bingo_id = session.bingo_id();
        inner.board = board;
        inner.phase = Phase::Idle;
        inner.generation = inner.generation.wrapping_add(1);
        info!(bingo_id = %inner.bingo_id, generation = inner.generation, "board: reset");
        self.publish(&inner);
        Ok(())
    }

    /// Toggle the cell at `(row, col)` optimistically and persist the board.
    pub async fn toggle_cell(&self, row: usize, col: usize) -> ToggleOutcome {
        let (bingo_id, generation, snapshot, update, marked) = {
            let mut inner = self.lock();
            if inner.phase == Phase::Updating {
                debug!(row, col, "board: toggle ignored while updating");
                return ToggleOutcome::Busy;
            }
            if cell_index(row, col).is_none() {
                return ToggleOutcome::OutOfRange;
            }
            if Board::is_center(row, col) {
                return ToggleOutcome::Fixed;
            }

            let snapshot = inner.board.clone();
            let Some(marked) = inner.board.toggle(row, col) else {
                return ToggleOutcome::Fixed;
            };
            inner.phase = Phase::Updating;
            let update = inner.board.goal_update();
            self.publish(&inner);
            (inner.bingo_id, inner.generation, snapshot, update, marked)
        };

        let mut pending = PendingToggle { controller: self, generation, snapshot: Some(snapshot) };
        let result = self.api.update_goals(bingo_id, &update).await;
        let snapshot = pending.snapshot.take();

        let mut inner = self.lock();
        if inner.generation != generation {
            info!(%bingo_id, row, col, "board: update finished after reset; result dropped");
            return ToggleOutcome::Superseded;
        }

        inner.phase = Phase::Idle;
        let outcome = match result {
            Ok(()) => ToggleOutcome::Confirmed { marked },
            Err(e) => {
                warn!(error = %e, %bingo_id, row, col, "board: update failed; rolling back");
                if let Some(snapshot) = snapshot {
                    inner.board = snapshot;
                }
                ToggleOutcome::RolledBack
            }
        };
        self.publish(&inner);
        outcome
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, inner: &Inner) {
        self.view.send_replace(inner.view());
    }
}
