//! Properties every [`Round`](super::Round) keeps after each move.
//!
//! [`Round::play`](super::Round::play) asserts the whole set in debug
//! builds; each invariant is also usable on its own.

/// A property of `S`.
pub trait Invariant<S> {
    /// Whether `state` satisfies the property.
    fn holds(state: &S) -> bool;

    /// Sentence naming the property, used in violation reports.
    fn description() -> &'static str;
}

/// A property that did not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// What was expected.
    pub description: String,
}

impl InvariantViolation {
    /// Violation carrying the property's description.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// Several invariants checked as one, implemented for tuples.
pub trait InvariantSet<S> {
    /// Checks every member, collecting each violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($member:ident),+) => {
        impl<S, $($member: Invariant<S>),+> InvariantSet<S> for ($($member,)+) {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let violations: Vec<_> = [$(($member::holds(state), $member::description())),+]
                    .into_iter()
                    .filter(|(holds, _)| !holds)
                    .map(|(_, description)| InvariantViolation::new(description))
                    .collect();
                if violations.is_empty() { Ok(()) } else { Err(violations) }
            }
        }
    };
}

impl_invariant_set!(A, B);
impl_invariant_set!(A, B, C);

pub mod alternating_turn;
pub mod history_consistent;
pub mod monotonic_board;

pub use alternating_turn::AlternatingTurnInvariant;
pub use history_consistent::HistoryConsistentInvariant;
pub use monotonic_board::MonotonicBoardInvariant;

/// All round invariants as a composable set.
pub type RoundInvariants = (
    MonotonicBoardInvariant,
    AlternatingTurnInvariant,
    HistoryConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Mark, Position, Round, Square};

    #[test]
    fn test_invariant_set_holds_for_fresh_round() {
        assert!(RoundInvariants::check_all(&Round::new()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let mut round = Round::new();
        for pos in [Position::TopLeft, Position::Center, Position::TopRight] {
            round.play(pos).unwrap();
        }
        assert!(RoundInvariants::check_all(&round).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut round = Round::new();
        round.play(Position::Center).unwrap();

        // Mark a square behind the history's back
        round.board = crate::games::tictactoe::Board::from_squares({
            let mut squares = *round.board.squares();
            squares[Position::TopLeft.index()] = Square::Occupied(Mark::O);
            squares
        });

        let violations = RoundInvariants::check_all(&round).unwrap_err();
        assert!(!violations.is_empty());
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (MonotonicBoardInvariant, AlternatingTurnInvariant);
        assert!(TwoInvariants::check_all(&Round::new()).is_ok());
    }
}
