//! Alternating turn invariant: marks alternate X, O, X, O, ...

use super::super::{Mark, Outcome, Round, Turn};
use super::Invariant;

/// Invariant: Marks alternate and the turn agrees with the history.
///
/// The player's X always opens. While the round is in progress the side
/// to move is fixed by the parity of the history; once it is over the
/// turn stays with whoever moved last.
pub struct AlternatingTurnInvariant;

impl Invariant<Round> for AlternatingTurnInvariant {
    fn holds(round: &Round) -> bool {
        let history = round.history();

        let alternates = history.iter().enumerate().all(|(i, mov)| {
            let expected = if i % 2 == 0 { Mark::PLAYER } else { Mark::OPPONENT };
            mov.mark == expected
        });
        if !alternates {
            return false;
        }

        let expected_turn = match (round.outcome(), history.last()) {
            (Outcome::InProgress, _) if history.len() % 2 == 0 => Turn::Player,
            (Outcome::InProgress, _) => Turn::Opponent,
            (_, Some(last)) if last.mark == Mark::PLAYER => Turn::Player,
            (_, Some(_)) => Turn::Opponent,
            (_, None) => return false,
        };
        round.turn() == expected_turn
    }

    fn description() -> &'static str {
        "Marks alternate starting with X and the turn follows the history"
    }
}
