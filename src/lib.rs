//! Goal Bingo client.
//!
//! ARCHITECTURE
//! ============
//! A user enters eight goals (`creation`), the goals API stores them and
//! returns a bingo id, the board page loads the goals back (`loader`), and
//! `board` lays them out as a 3x3 grid around a fixed center cell. The
//! `controller` then owns that board: it flips cells optimistically, sends
//! the full set of achieved flags to the API, and restores the previous
//! board if the update fails.
//!
//! The goals API is reached only through the `api::GoalsApi` trait, built
//! from an explicit `config::ApiConfig`.

pub mod api;
pub mod board;
pub mod config;
pub mod controller;
pub mod creation;
pub mod loader;
pub mod model;
pub mod render;
pub mod validation;

#[cfg(test)]
mod test_helpers;

pub use api::{ApiError, GoalsApi, HttpGoalsApi};
pub use board::{Board, BoardCell, BoardError, build_board};
pub use config::{ApiConfig, ConfigError};
pub use controller::{BoardController, BoardView, Phase, ToggleOutcome};
pub use creation::{CreatedBoard, CreationError, CreationFlow, GoalForm};
pub use loader::{NotFound, load_session};
pub use model::{BingoId, BingoSession, GOAL_COUNT, Goal, GoalRow, GoalUpdate};
pub use validation::{ValidGoals, ValidationReport, validate_goals};
