//! Plain-text board rendering for terminals.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt::Write as _;

use crate::board::{Board, BoardCell};
use crate::controller::{BoardView, Phase};

const MARK_ON: &str = "[x]";
const MARK_OFF: &str = "[ ]";

/// Terminal columns a goal label occupies. Goal text is ASCII or Japanese,
/// and Japanese characters render full-width.
fn display_width(text: &str) -> usize {
    text.chars().map(|ch| if ch.is_ascii() { 1 } else { 2 }).sum()
}

fn cell_text(cell: &BoardCell) -> String {
    let mark = if cell.marked { MARK_ON } else { MARK_OFF };
    format!("{mark} {}", cell.label)
}

/// Render the board as a boxed 3x3 grid, one line per row.
#[must_use]
pub fn render_board(board: &Board) -> String {
    let texts: Vec<String> = board.cells().iter().map(cell_text).collect();
    let width = texts.iter().map(|t| display_width(t)).max().unwrap_or(0);
    let border = format!("+{}", format!("{}+", "-".repeat(width + 2)).repeat(3));

    let mut out = String::new();
    out.push_str(&border);
    out.push('\n');
    for row in texts.chunks(3) {
        out.push('|');
        for text in row {
            let pad = width - display_width(text);
            let _ = write!(out, " {text}{} |", " ".repeat(pad));
        }
        out.push('\n');
        out.push_str(&border);
        out.push('\n');
    }
    out
}

/// Board plus a status line with the bingo id and progress.
#[must_use]
pub fn render_view(view: &BoardView) -> String {
    let status = match view.phase {
        Phase::Idle => "",
        Phase::Updating => " (saving)",
    };
    format!(
        "bingo {}: {}/8 achieved{status}\n{}",
        view.bingo_id,
        view.board.marked_count(),
        render_board(&view.board)
    )
}
