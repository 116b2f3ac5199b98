//! One round of tic-tac-toe: the board, the side to move, and the move log.

use super::action::Move;
use super::invariants::{InvariantSet, RoundInvariants};
use super::rules::check_outcome;
use super::{Board, BoardError, Outcome, Position, Turn};
use tracing::{instrument, trace};

/// Owned game state for a single round.
///
/// The round is the only writer of its board. Outside code reads it
/// through [`Round::board`], which hands out a shared reference or a copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub(super) board: Board,
    pub(super) turn: Turn,
    pub(super) history: Vec<Move>,
}

impl Round {
    /// Fresh round: empty board, player to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Turn::Player,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Returns the moves played so far.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Outcome derived from the current board.
    pub fn outcome(&self) -> Outcome {
        check_outcome(&self.board)
    }

    /// Places the mark of the side to move.
    ///
    /// The turn only passes to the other side while the game is still in
    /// progress; a finished round keeps the turn of the last mover.
    #[instrument(skip(self), fields(turn = %self.turn))]
    pub fn play(&mut self, position: Position) -> Result<Outcome, BoardError> {
        if self.outcome().is_terminal() {
            return Err(BoardError::GameOver);
        }
        let mark = self.turn.mark();
        self.board.place(position, mark)?;
        self.history.push(Move::new(mark, position));

        let outcome = self.outcome();
        if outcome == Outcome::InProgress {
            self.turn = self.turn.next();
        }
        trace!(%outcome, moves = self.history.len(), "Move applied");

        debug_assert!(
            RoundInvariants::check_all(self).is_ok(),
            "round invariants violated: {:?}",
            RoundInvariants::check_all(self)
        );

        Ok(outcome)
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}
