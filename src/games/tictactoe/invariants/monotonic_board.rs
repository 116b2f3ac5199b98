//! Monotonic board invariant: squares never change once set.

use super::super::{Board, Round};
use super::Invariant;

/// Invariant: Board squares are never overwritten.
///
/// Verified by replaying the move history onto an empty board: every
/// move must land on an empty square and the result must equal the
/// current board.
pub struct MonotonicBoardInvariant;

impl Invariant<Round> for MonotonicBoardInvariant {
    fn holds(round: &Round) -> bool {
        let mut reconstructed = Board::new();
        for mov in round.history() {
            if reconstructed.place(mov.position, mov.mark).is_err() {
                return false;
            }
        }
        reconstructed == *round.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}
