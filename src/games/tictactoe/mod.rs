//! Tic-tac-toe: board, rules, round state and the minimax opponent.

mod action;
pub mod engine;
pub mod invariants;
mod position;
pub mod rules;
mod round;
mod types;

pub use action::Move;
pub use engine::{DecisionEngine, Difficulty, EnginePolicy, SearchMode};
pub use position::Position;
pub use round::Round;
pub use rules::check_outcome;
pub use types::{Board, BoardError, Mark, Outcome, Square, Turn};
