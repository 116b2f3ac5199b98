//! Arcade tic-tac-toe - terminal front end
//!
//! Plays against the minimax opponent with a simulated wallet, or asks
//! the engine for a single move.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use arcade_tictactoe::{
    ArcadeCommand, ArcadeConfig, ArcadeEvent, Board, DecisionEngine, Difficulty, Outcome, Position,
    SimulatedWallet, check_outcome, spawn,
};
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so the board on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Play {
            config,
            difficulty,
            balance,
            latency_ms,
        } => run_play(&config, difficulty, balance, latency_ms).await,
        Command::Solve {
            board,
            difficulty,
            depth_discount,
        } => run_solve(&board, difficulty, depth_discount),
    }
}

/// Loads the config file if present, otherwise the defaults.
#[instrument]
fn load_config(path: &Path) -> Result<ArcadeConfig> {
    let config = if path.exists() {
        ArcadeConfig::from_file(path)?
    } else {
        debug!("No config file, using defaults");
        ArcadeConfig::default()
    };
    Ok(config.apply_env())
}

/// Interactive game against a simulated wallet.
async fn run_play(
    config_path: &Path,
    difficulty: Option<Difficulty>,
    balance: u64,
    latency_ms: u64,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(difficulty) = difficulty {
        config = config.with_difficulty(difficulty);
    }

    let wallet = SimulatedWallet::new(balance).with_latency(Duration::from_millis(latency_ms));
    info!(balance, rpc_url = %config.rpc_url(), "Simulated wallet connected");

    let mut handle = spawn(&config, Arc::new(wallet));
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut input_open = true;

    loop {
        tokio::select! {
            line = lines.next_line(), if input_open => match line.context("Failed to read input")? {
                Some(line) => match parse_command(&line) {
                    Some(command) => handle.commands.send(command)?,
                    None if line.trim().is_empty() => {}
                    None => {
                        warn!(input = %line.trim(), "Unrecognised input");
                        print_help();
                    }
                },
                None => {
                    input_open = false;
                    handle.commands.send(ArcadeCommand::End)?;
                }
            },
            event = handle.events.recv() => match event {
                Some(ArcadeEvent::Exited { scoreboard }) => {
                    println!("Thanks for playing. {}", scoreboard);
                    break;
                }
                Some(event) => render(&event),
                None => break,
            },
        }
    }

    handle.task.await??;
    Ok(())
}

fn print_help() {
    println!("Commands: start | 1-9 (cell) | replay | difficulty <easy|medium|hard> | quit");
}

/// Maps a line of user input to a command.
fn parse_command(line: &str) -> Option<ArcadeCommand> {
    let mut words = line.split_whitespace();
    let head = words.next()?.to_lowercase();
    match head.as_str() {
        "start" | "s" | "pay" => Some(ArcadeCommand::Start),
        "replay" | "r" | "again" => Some(ArcadeCommand::Replay),
        "quit" | "q" | "exit" => Some(ArcadeCommand::End),
        "difficulty" | "d" => words
            .next()?
            .parse::<Difficulty>()
            .ok()
            .map(ArcadeCommand::SetDifficulty),
        _ => Position::from_label_or_number(line).map(|pos| ArcadeCommand::Click(pos.index())),
    }
}

fn render(event: &ArcadeEvent) {
    match event {
        ArcadeEvent::StateChanged {
            snapshot,
            scoreboard,
        } => {
            println!();
            println!("{}", snapshot.board.display());
            println!(
                "[{} | {}] {}",
                snapshot.difficulty,
                scoreboard,
                snapshot.status_line()
            );
        }
        ArcadeEvent::PaymentSubmitted(request) => println!("Sending {}...", request),
        ArcadeEvent::OpponentThinking => {}
        ArcadeEvent::MoveMade { mark, position } => println!("{} plays {}", mark, position),
        ArcadeEvent::Exited { .. } => {}
    }
}

/// Prints the engine's choice for a board given on the command line.
#[instrument]
fn run_solve(board: &str, difficulty: Difficulty, depth_discount: bool) -> Result<()> {
    let board = Board::parse(board)
        .context("Board must be nine characters of X, O and '.' (row by row)")?;
    println!("{}", board.display());

    let outcome = check_outcome(&board);
    if outcome != Outcome::InProgress {
        println!("No move: {}", outcome);
        return Ok(());
    }

    let mut engine = DecisionEngine::new(Default::default(), depth_discount);
    match engine.choose_move(&board, difficulty) {
        Some(position) => println!(
            "Engine ({}) plays cell {} ({})",
            difficulty,
            position.index() + 1,
            position
        ),
        None => println!("No empty square"),
    }
    Ok(())
}
