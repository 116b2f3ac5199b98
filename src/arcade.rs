//! Async driver around a [`Session`].
//!
//! The driver owns the session and runs one `select!` loop over UI
//! commands and its own completions (payment results, opponent timers),
//! so transitions never overlap. Every state change is published as an
//! [`ArcadeEvent`].

use crate::config::ArcadeConfig;
use crate::games::tictactoe::{Difficulty, Mark, Outcome, Position};
use crate::payment::{PaymentError, PaymentGateway, PaymentReceipt, PaymentRequest};
use crate::session::{
    OpponentTicket, PaymentOrder, PaymentTicket, PlayerMoveResult, Session, SessionSnapshot,
};
use anyhow::Result;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument};

/// Input from the game screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArcadeCommand {
    /// Pay and start the first game.
    Start,
    /// Click on cell 0-8.
    Click(usize),
    /// Pay and play again after a finished game.
    Replay,
    /// Pick the difficulty for the next game.
    SetDifficulty(Difficulty),
    /// Leave the game screen.
    End,
}

/// Results across the games played on one screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("W {wins} / L {losses} / D {draws} ({paid_games} paid)")]
pub struct Scoreboard {
    /// Games won by the player.
    pub wins: u32,
    /// Games won by the engine.
    pub losses: u32,
    /// Drawn games.
    pub draws: u32,
    /// Confirmed payments.
    pub paid_games: u32,
}

impl Scoreboard {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::PlayerWin => self.wins += 1,
            Outcome::OpponentWin => self.losses += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::InProgress => {}
        }
    }
}

/// Messages sent from the driver to the UI.
#[derive(Debug, Clone)]
pub enum ArcadeEvent {
    /// Session state after a change.
    StateChanged {
        /// Renderable session state.
        snapshot: SessionSnapshot,
        /// Running totals.
        scoreboard: Scoreboard,
    },
    /// A fee transfer was handed to the wallet.
    PaymentSubmitted(PaymentRequest),
    /// The engine will reply after the display delay.
    OpponentThinking,
    /// A mark was placed.
    MoveMade {
        /// Who placed it.
        mark: Mark,
        /// Where.
        position: Position,
    },
    /// The session was discarded.
    Exited {
        /// Final totals.
        scoreboard: Scoreboard,
    },
}

enum Completion {
    Payment(PaymentTicket, Result<PaymentReceipt, PaymentError>),
    Opponent(OpponentTicket),
}

/// Drives one session against a payment gateway.
pub struct ArcadeDriver {
    session: Session,
    gateway: Arc<dyn PaymentGateway>,
    opponent_delay: Duration,
    payment_timeout: Duration,
    event_tx: mpsc::UnboundedSender<ArcadeEvent>,
    scoreboard: Scoreboard,
    tasks: Vec<JoinHandle<()>>,
}

impl ArcadeDriver {
    /// Creates a driver for `session`.
    pub fn new(
        session: Session,
        gateway: Arc<dyn PaymentGateway>,
        opponent_delay: Duration,
        payment_timeout: Duration,
        event_tx: mpsc::UnboundedSender<ArcadeEvent>,
    ) -> Self {
        Self {
            session,
            gateway,
            opponent_delay,
            payment_timeout,
            event_tx,
            scoreboard: Scoreboard::default(),
            tasks: Vec::new(),
        }
    }

    /// Creates a driver with a fresh session built from `config`.
    pub fn from_config(
        config: &ArcadeConfig,
        gateway: Arc<dyn PaymentGateway>,
        event_tx: mpsc::UnboundedSender<ArcadeEvent>,
    ) -> Self {
        Self::new(
            Session::from_config(config),
            gateway,
            config.opponent_delay(),
            config.payment_timeout(),
            event_tx,
        )
    }

    /// Runs until [`ArcadeCommand::End`] or until the command channel closes.
    ///
    /// Returns the final scoreboard. Fails only when the event receiver
    /// has been dropped.
    #[instrument(skip_all, fields(session_id = self.session.id(), gateway = self.gateway.name()))]
    pub async fn run(mut self, mut commands: mpsc::UnboundedReceiver<ArcadeCommand>) -> Result<Scoreboard> {
        info!("Starting arcade session");
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();
        self.publish()?;

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(ArcadeCommand::End) | None => break,
                    Some(command) => self.handle_command(command, &done_tx)?,
                },
                Some(done) = done_rx.recv() => self.handle_completion(done)?,
            }
        }

        Ok(self.shutdown())
    }

    fn handle_command(
        &mut self,
        command: ArcadeCommand,
        done_tx: &mpsc::UnboundedSender<Completion>,
    ) -> Result<()> {
        debug!(?command, "Command received");
        match command {
            ArcadeCommand::Start => {
                if let Some(order) = self.session.request_start() {
                    self.submit_payment(order, done_tx)?;
                }
            }
            ArcadeCommand::Replay => {
                if let Some(order) = self.session.request_replay() {
                    self.submit_payment(order, done_tx)?;
                }
            }
            ArcadeCommand::Click(index) => match self.session.player_move(index) {
                PlayerMoveResult::Ignored => return Ok(()),
                PlayerMoveResult::Finished(outcome) => {
                    self.announce_player_move(index)?;
                    self.scoreboard.record(outcome);
                }
                PlayerMoveResult::OpponentDue(ticket) => {
                    self.announce_player_move(index)?;
                    self.event_tx.send(ArcadeEvent::OpponentThinking)?;
                    self.schedule_opponent(ticket, done_tx);
                }
            },
            ArcadeCommand::SetDifficulty(difficulty) => {
                if !self.session.set_difficulty(difficulty) {
                    return Ok(());
                }
            }
            ArcadeCommand::End => {}
        }
        self.publish()
    }

    fn handle_completion(&mut self, done: Completion) -> Result<()> {
        match done {
            Completion::Payment(ticket, Ok(receipt)) => {
                if self.session.payment_confirmed(ticket, &receipt) {
                    self.scoreboard.paid_games += 1;
                }
            }
            Completion::Payment(ticket, Err(error)) => {
                self.session.payment_failed(ticket, &error);
            }
            Completion::Opponent(ticket) => {
                let Some(reply) = self.session.apply_opponent_move(ticket) else {
                    return Ok(());
                };
                self.event_tx.send(ArcadeEvent::MoveMade {
                    mark: Mark::OPPONENT,
                    position: reply.position,
                })?;
                self.scoreboard.record(reply.outcome);
            }
        }
        self.publish()
    }

    fn announce_player_move(&self, index: usize) -> Result<()> {
        if let Some(position) = Position::from_index(index) {
            self.event_tx.send(ArcadeEvent::MoveMade {
                mark: Mark::PLAYER,
                position,
            })?;
        }
        Ok(())
    }

    fn submit_payment(
        &mut self,
        order: PaymentOrder,
        done_tx: &mpsc::UnboundedSender<Completion>,
    ) -> Result<()> {
        self.event_tx
            .send(ArcadeEvent::PaymentSubmitted(order.request.clone()))?;

        let gateway = Arc::clone(&self.gateway);
        let timeout = self.payment_timeout;
        let done_tx = done_tx.clone();
        self.track(tokio::spawn(async move {
            let result = tokio::time::timeout(timeout, gateway.submit_payment(&order.request))
                .await
                .unwrap_or(Err(PaymentError::Timeout(timeout)));
            // The driver may already be gone
            let _ = done_tx.send(Completion::Payment(order.ticket, result));
        }));
        Ok(())
    }

    fn schedule_opponent(&mut self, ticket: OpponentTicket, done_tx: &mpsc::UnboundedSender<Completion>) {
        let delay = self.opponent_delay;
        let done_tx = done_tx.clone();
        self.track(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = done_tx.send(Completion::Opponent(ticket));
        }));
    }

    fn track(&mut self, task: JoinHandle<()>) {
        self.tasks.retain(|t| !t.is_finished());
        self.tasks.push(task);
    }

    fn publish(&self) -> Result<()> {
        self.event_tx.send(ArcadeEvent::StateChanged {
            snapshot: self.session.snapshot(),
            scoreboard: self.scoreboard,
        })?;
        Ok(())
    }

    fn shutdown(self) -> Scoreboard {
        for task in &self.tasks {
            task.abort();
        }
        let scoreboard = self.scoreboard;
        info!(%scoreboard, "Leaving arcade session");
        self.session.end();
        // The UI may have stopped listening
        let _ = self.event_tx.send(ArcadeEvent::Exited { scoreboard });
        scoreboard
    }
}

/// Channels and task of a spawned driver.
pub struct ArcadeHandle {
    /// Send commands here.
    pub commands: mpsc::UnboundedSender<ArcadeCommand>,
    /// Receive events here.
    pub events: mpsc::UnboundedReceiver<ArcadeEvent>,
    /// Resolves to the final scoreboard.
    pub task: JoinHandle<Result<Scoreboard>>,
}

/// Spawns a driver for a fresh session on the current runtime.
pub fn spawn(config: &ArcadeConfig, gateway: Arc<dyn PaymentGateway>) -> ArcadeHandle {
    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let driver = ArcadeDriver::from_config(config, gateway, event_tx);
    ArcadeHandle {
        commands: command_tx,
        events: event_rx,
        task: tokio::spawn(driver.run(command_rx)),
    }
}
