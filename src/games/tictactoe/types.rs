//! Core domain types for tic-tac-toe.

use super::position::Position;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Mark placed on the board.
///
/// `X` always belongs to the paying player, `O` to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Mark {
    /// The human player's mark (moves first).
    X,
    /// The engine's mark.
    O,
}

impl Mark {
    /// Mark used by the human player.
    pub const PLAYER: Mark = Mark::X;
    /// Mark used by the engine.
    pub const OPPONENT: Mark = Mark::O;

    /// Returns the other mark.
    pub fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

/// Error returned when a mark cannot be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum BoardError {
    /// The square already holds a mark.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),
    /// The round already has an outcome.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for BoardError {}

/// 3x3 tic-tac-toe board.
///
/// A plain value: copying it is how the engine gets a read-only view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Builds a board from nine squares in row-major order.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.index()]
    }

    /// Places a mark on an empty square.
    ///
    /// Marked squares are never overwritten.
    pub fn place(&mut self, pos: Position, mark: Mark) -> Result<(), BoardError> {
        if !self.is_empty(pos) {
            return Err(BoardError::SquareOccupied(pos));
        }
        self.squares[pos.index()] = Square::Occupied(mark);
        Ok(())
    }

    /// Returns a copy of this board with `mark` placed at `pos`.
    ///
    /// The caller guarantees the square is empty.
    pub(crate) fn with_mark(mut self, pos: Position, mark: Mark) -> Self {
        self.squares[pos.index()] = Square::Occupied(mark);
        self
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Empty positions in ascending index order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::iter().filter(move |pos| self.is_empty(*pos))
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Number of occupied squares.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Parses nine characters of `X`, `O` and `.` (or `_`, `-`).
    ///
    /// Whitespace and `|` separators are skipped.
    pub fn parse(s: &str) -> Option<Self> {
        let mut squares = [Square::Empty; 9];
        let mut count = 0;
        for c in s.chars().filter(|c| !c.is_whitespace() && *c != '|') {
            if count == 9 {
                return None;
            }
            squares[count] = match c {
                'X' | 'x' => Square::Occupied(Mark::X),
                'O' | 'o' => Square::Occupied(Mark::O),
                '.' | '_' | '-' => Square::Empty,
                _ => return None,
            };
            count += 1;
        }
        (count == 9).then_some(Self { squares })
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Whose move it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Turn {
    /// The human player moves next.
    Player,
    /// The engine moves next.
    Opponent,
}

impl Turn {
    /// Mark placed by the side to move.
    pub fn mark(self) -> Mark {
        match self {
            Turn::Player => Mark::PLAYER,
            Turn::Opponent => Mark::OPPONENT,
        }
    }

    /// The other side.
    pub fn next(self) -> Self {
        match self {
            Turn::Player => Turn::Opponent,
            Turn::Opponent => Turn::Player,
        }
    }
}

/// Outcome derived from a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Outcome {
    /// No line completed and at least one empty square.
    #[display("In progress")]
    InProgress,
    /// Three X in a line.
    #[display("Player wins")]
    PlayerWin,
    /// Three O in a line.
    #[display("Opponent wins")]
    OpponentWin,
    /// Full board, no line.
    #[display("Draw")]
    Draw,
}

impl Outcome {
    /// Returns true once the game can accept no more moves.
    pub fn is_terminal(self) -> bool {
        self != Outcome::InProgress
    }

    /// Returns the winning mark, if any.
    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::PlayerWin => Some(Mark::PLAYER),
            Outcome::OpponentWin => Some(Mark::OPPONENT),
            Outcome::InProgress | Outcome::Draw => None,
        }
    }
}
