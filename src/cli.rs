//! Command-line interface for arcade_tictactoe.

use arcade_tictactoe::Difficulty;
use clap::{Parser, Subcommand};

/// Arcade tic-tac-toe - pay a small fee, beat the minimax opponent
#[derive(Parser, Debug)]
#[command(name = "arcade_tictactoe")]
#[command(about = "Pay-to-play tic-tac-toe against a minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal with a simulated wallet
    Play {
        /// Path to the arcade config (defaults apply if missing)
        #[arg(short, long, default_value = "arcade.toml")]
        config: std::path::PathBuf,

        /// Starting difficulty (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Simulated wallet balance in lamports
        #[arg(long, default_value = "100000000")]
        balance: u64,

        /// Simulated confirmation latency in milliseconds
        #[arg(long, default_value = "300")]
        latency_ms: u64,
    },

    /// Print the engine's move for a board
    Solve {
        /// Nine characters of X, O and '.', row by row (e.g. "XX.OO....")
        board: String,

        /// Difficulty to search with
        #[arg(short, long, default_value = "hard")]
        difficulty: Difficulty,

        /// Prefer faster wins and slower losses
        #[arg(long)]
        depth_discount: bool,
    },
}
