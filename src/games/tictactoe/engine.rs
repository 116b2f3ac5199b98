//! Minimax opponent for tic-tac-toe.
//!
//! The engine always plays [`Mark::O`] and maximises; the player's
//! [`Mark::X`] minimises. Terminal boards score `+10` for an O line,
//! `-10` for an X line and `0` otherwise. A depth cutoff on a
//! non-terminal board scores `0` as well.
//!
//! Ties between equally scored moves go to the lowest board index, so a
//! search-mode engine is fully deterministic. [`SearchMode::Random`]
//! ignores the tree and picks uniformly among empty squares.

use super::rules::check_outcome;
use super::{Board, Mark, Outcome, Position};
use derive_getters::Getters;
use derive_more::Display;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a board won by the engine.
pub const WIN_SCORE: i32 = 10;

/// Depth that covers every remaining ply of a 3x3 game.
pub const FULL_DEPTH: u8 = 9;

/// Opponent strength selected by the player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Difficulty {
    /// One ply of lookahead.
    Easy,
    /// Three plies of lookahead.
    #[default]
    Medium,
    /// Exhaustive search.
    Hard,
}

impl Difficulty {
    /// Search depth used when no policy overrides it.
    pub fn default_depth(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 3,
            Difficulty::Hard => FULL_DEPTH,
        }
    }
}

/// How the engine picks a move for one difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SearchMode {
    /// Depth-bounded minimax.
    Minimax {
        /// Plies explored before the board is scored.
        depth: u8,
    },
    /// Uniformly random empty square.
    Random,
}

/// Mapping from difficulty to search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginePolicy {
    /// Mode used on [`Difficulty::Easy`].
    easy: SearchMode,
    /// Mode used on [`Difficulty::Medium`].
    medium: SearchMode,
    /// Mode used on [`Difficulty::Hard`].
    hard: SearchMode,
}

impl EnginePolicy {
    /// Creates a policy from explicit modes.
    pub fn new(easy: SearchMode, medium: SearchMode, hard: SearchMode) -> Self {
        Self { easy, medium, hard }
    }

    /// Mode for the given difficulty.
    pub fn mode(&self, difficulty: Difficulty) -> SearchMode {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }
}

impl Default for EnginePolicy {
    fn default() -> Self {
        let minimax = |d: Difficulty| SearchMode::Minimax {
            depth: d.default_depth(),
        };
        Self {
            easy: minimax(Difficulty::Easy),
            medium: minimax(Difficulty::Medium),
            hard: minimax(Difficulty::Hard),
        }
    }
}

/// Terminal score of a board from the engine's point of view.
pub fn score(board: &Board) -> i32 {
    match check_outcome(board) {
        Outcome::OpponentWin => WIN_SCORE,
        Outcome::PlayerWin => -WIN_SCORE,
        Outcome::InProgress | Outcome::Draw => 0,
    }
}

/// Minimax value of `board` searched `depth` plies deep.
///
/// `maximizing` is true when the engine (O) is to move.
pub fn minimax(board: &Board, depth: u8, maximizing: bool) -> i32 {
    Search::plain().value(board, depth, maximizing, 0)
}

/// Best engine move found with a `depth`-ply search.
///
/// Returns `None` only for a full board. A depth of zero behaves like
/// a depth of one: every candidate is scored as it stands.
pub fn best_move(board: &Board, depth: u8) -> Option<Position> {
    Search::plain().best(board, depth)
}

#[derive(Debug, Clone, Copy)]
struct Search {
    depth_discount: bool,
}

impl Search {
    fn plain() -> Self {
        Self {
            depth_discount: false,
        }
    }

    fn terminal_value(&self, board: &Board, ply: u8) -> i32 {
        let raw = score(board);
        if !self.depth_discount || raw == 0 {
            return raw;
        }
        // Faster wins and slower losses score better
        raw - raw.signum() * i32::from(ply)
    }

    fn value(&self, board: &Board, depth: u8, maximizing: bool, ply: u8) -> i32 {
        if depth == 0 || check_outcome(board).is_terminal() {
            return self.terminal_value(board, ply);
        }

        let mark = if maximizing { Mark::O } else { Mark::X };
        let children = board
            .empty_positions()
            .map(|pos| self.value(&board.with_mark(pos, mark), depth - 1, !maximizing, ply + 1));

        let best = if maximizing { children.max() } else { children.min() };
        best.unwrap_or(0)
    }

    fn best(&self, board: &Board, depth: u8) -> Option<Position> {
        let depth = depth.max(1);
        let mut best: Option<(Position, i32)> = None;
        for pos in board.empty_positions() {
            let value = self.value(&board.with_mark(pos, Mark::O), depth - 1, false, 1);
            // Strictly greater keeps the lowest index on ties
            if best.is_none_or(|(_, top)| value > top) {
                best = Some((pos, value));
            }
        }
        best.map(|(pos, _)| pos)
    }
}

/// The opponent: a policy plus the randomness for random mode.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    policy: EnginePolicy,
    depth_discount: bool,
    rng: StdRng,
}

impl DecisionEngine {
    /// Creates an engine seeded from system entropy.
    pub fn new(policy: EnginePolicy, depth_discount: bool) -> Self {
        Self::with_seed(policy, depth_discount, rand::random::<u64>())
    }

    /// Creates an engine whose random mode is reproducible.
    pub fn with_seed(policy: EnginePolicy, depth_discount: bool, seed: u64) -> Self {
        Self {
            policy,
            depth_discount,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the difficulty policy.
    pub fn policy(&self) -> &EnginePolicy {
        &self.policy
    }

    /// Chooses the engine's move on `board`.
    ///
    /// The board is read, never modified. Returns `None` only when no
    /// square is empty; the returned position is always empty.
    #[instrument(skip(self, board), fields(occupied = board.occupied()))]
    pub fn choose_move(&mut self, board: &Board, difficulty: Difficulty) -> Option<Position> {
        let mode = self.policy.mode(difficulty);
        let choice = match mode {
            SearchMode::Minimax { depth } => Search {
                depth_discount: self.depth_discount,
            }
            .best(board, depth),
            SearchMode::Random => {
                let empty: Vec<Position> = board.empty_positions().collect();
                empty.choose(&mut self.rng).copied()
            }
        };
        debug!(?mode, ?choice, "Engine chose move");
        choice
    }
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(EnginePolicy::default(), false)
    }
}
