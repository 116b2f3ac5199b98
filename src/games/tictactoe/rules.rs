//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`]. The outcome is always recomputed
//! from the board, never stored next to it.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, check_winner};

use super::{Board, Mark, Outcome};
use tracing::instrument;

/// Derives the outcome of a board.
///
/// A completed line always wins over a full board.
#[instrument(level = "trace", skip(board))]
pub fn check_outcome(board: &Board) -> Outcome {
    match check_winner(board) {
        Some(Mark::X) => Outcome::PlayerWin,
        Some(Mark::O) => Outcome::OpponentWin,
        None if is_full(board) => Outcome::Draw,
        None => Outcome::InProgress,
    }
}
