//! The 3x3 bingo board and its builder.
//!
//! DESIGN
//! ======
//! A board is derived data: it is rebuilt from the session's goal list and
//! never owns goals itself. Cells hold the goal id they project so the
//! controller can turn the whole board back into an update payload.
//!
//! Layout is row-major. Linear index 4 is the fixed center cell; the eight
//! goals fill the remaining cells in input order.

#[cfg(test)]
#[path = "board_test.rs"]
mod board_test;

use crate::model::{GOAL_COUNT, Goal, GoalUpdate};

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;
pub const CENTER_INDEX: usize = 4;
pub const CENTER_LABEL: &str = "set a goal";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board needs exactly {expected} goals, got {actual}")]
    GoalCount { expected: usize, actual: usize },
}

// =============================================================================
// CELL
// =============================================================================

/// One board cell. `source_goal_id` is `None` only for the center cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardCell {
    pub source_goal_id: Option<String>,
    pub label: String,
    pub marked: bool,
}

impl BoardCell {
    fn center() -> Self {
        Self { source_goal_id: None, label: CENTER_LABEL.to_owned(), marked: true }
    }

    fn from_goal(goal: &Goal) -> Self {
        Self { source_goal_id: Some(goal.id.clone()), label: goal.text.clone(), marked: goal.achieved }
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.source_goal_id.is_none()
    }
}

// =============================================================================
// BOARD
// =============================================================================

/// Row-major 3x3 matrix of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: Vec<BoardCell>,
}

/// Source goal index for a non-center linear cell index.
#[must_use]
pub fn source_index(cell_index: usize) -> usize {
    if cell_index < CENTER_INDEX { cell_index } else { cell_index - 1 }
}

/// Linear index for `(row, col)`, or `None` when off the board.
#[must_use]
pub fn cell_index(row: usize, col: usize) -> Option<usize> {
    (row < BOARD_SIZE && col < BOARD_SIZE).then_some(row * BOARD_SIZE + col)
}

/// Build a board from exactly eight goals.
///
/// # Errors
///
/// Returns [`BoardError::GoalCount`] when `goals` does not hold eight entries.
/// Callers are expected to have checked this upstream.
pub fn build_board(goals: &[Goal]) -> Result<Board, BoardError> {
    if goals.len() != GOAL_COUNT {
        return Err(BoardError::GoalCount { expected: GOAL_COUNT, actual: goals.len() });
    }

    let cells = (0..CELL_COUNT)
        .map(|index| {
            if index == CENTER_INDEX {
                BoardCell::center()
            } else {
                BoardCell::from_goal(&goals[source_index(index)])
            }
        })
        .collect();

    Ok(Board { cells })
}

impl Board {
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&BoardCell> {
        cell_index(row, col).map(|index| &self.cells[index])
    }

    /// All nine cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[BoardCell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[BoardCell]> {
        self.cells.chunks(BOARD_SIZE)
    }

    #[must_use]
    pub fn is_center(row: usize, col: usize) -> bool {
        cell_index(row, col) == Some(CENTER_INDEX)
    }

    /// Flip a goal cell's mark. Returns the new value, or `None` for the
    /// center cell and off-board coordinates.
    pub(crate) fn toggle(&mut self, row: usize, col: usize) -> Option<bool> {
        let cell = &mut self.cells[cell_index(row, col)?];
        if cell.is_fixed() {
            return None;
        }
        cell.marked = !cell.marked;
        Some(cell.marked)
    }

    /// Full `(goalId, achieved)` snapshot of every goal cell, in board order.
    #[must_use]
    pub fn goal_update(&self) -> GoalUpdate {
        let mut update = GoalUpdate::default();
        for cell in &self.cells {
            if let Some(goal_id) = &cell.source_goal_id {
                update.push(goal_id.clone(), cell.marked);
            }
        }
        update
    }

    /// Number of marked goal cells (the center is not counted).
    #[must_use]
    pub fn marked_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| !cell.is_fixed() && cell.marked)
            .count()
    }
}
