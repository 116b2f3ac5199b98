//! Arcade tic-tac-toe library - a minimax opponent behind a payment gate
//!
//! Each game costs a small fee. A [`Session`] refuses moves until the
//! fee is confirmed, lets the player move, answers with the
//! [`DecisionEngine`] and freezes the board once the round has an
//! outcome. Replaying costs another fee.
//!
//! # Architecture
//!
//! - **Games**: board, rules, round invariants and the minimax engine
//! - **Session**: the synchronous payment-gated state machine
//! - **Payment**: the wallet capability the session depends on
//! - **Arcade**: async driver adding the opponent delay and payment timeout
//! - **Config**: TOML configuration
//!
//! # Example
//!
//! ```no_run
//! use arcade_tictactoe::{ArcadeCommand, ArcadeConfig, SimulatedWallet, spawn};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = ArcadeConfig::default();
//! let handle = spawn(&config, Arc::new(SimulatedWallet::new(100_000_000)));
//! handle.commands.send(ArcadeCommand::Start)?;
//! handle.commands.send(ArcadeCommand::Click(4))?;
//! handle.commands.send(ArcadeCommand::End)?;
//! let scoreboard = handle.task.await??;
//! println!("{}", scoreboard);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod arcade;
mod config;
mod games;
mod payment;
mod session;

// Crate-level exports - Driver
pub use arcade::{ArcadeCommand, ArcadeDriver, ArcadeEvent, ArcadeHandle, Scoreboard, spawn};

// Crate-level exports - Configuration
pub use config::{ArcadeConfig, ConfigError, DEFAULT_FEE_LAMPORTS, DEFAULT_RECEIVER, DEFAULT_RPC_URL};

// Crate-level exports - Payment
pub use payment::{
    LAMPORTS_PER_SOL, PaymentError, PaymentGateway, PaymentReceipt, PaymentRequest,
    SimulatedWallet,
};

// Crate-level exports - Session management
pub use session::{
    OpponentMove, OpponentTicket, PaymentOrder, PaymentTicket, PlayerMoveResult, Session,
    SessionId, SessionSnapshot, SessionState,
};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::engine::{FULL_DEPTH, WIN_SCORE, best_move, minimax, score};
pub use games::tictactoe::invariants::{
    AlternatingTurnInvariant, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, MonotonicBoardInvariant, RoundInvariants,
};
pub use games::tictactoe::rules::{LINES, check_winner, is_draw, is_full};
pub use games::tictactoe::{
    Board, BoardError, DecisionEngine, Difficulty, EnginePolicy, Mark, Move, Outcome, Position,
    Round, SearchMode, Square, Turn, check_outcome,
};
