//! History consistency invariant: history length matches occupied squares.

use super::super::Round;
use super::Invariant;

/// Invariant: History length equals number of occupied squares.
///
/// Exactly one mark is placed per turn.
pub struct HistoryConsistentInvariant;

impl Invariant<Round> for HistoryConsistentInvariant {
    fn holds(round: &Round) -> bool {
        round.history().len() == round.board().occupied()
    }

    fn description() -> &'static str {
        "History length matches number of occupied squares"
    }
}
