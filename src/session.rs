//! Payment-gated game session.
//!
//! A [`Session`] walks `Idle -> AwaitingPayment -> Active -> Terminal`
//! and back to `AwaitingPayment` on replay. It is a plain synchronous
//! state machine: the caller performs the payment and the opponent delay,
//! then reports back with the ticket it was handed. Tickets from an
//! earlier round, or from another session, are ignored.
//!
//! Every input that does not fit the current state is a silent no-op.
//! Early and duplicate clicks are normal while a wallet confirms.

use crate::config::ArcadeConfig;
use crate::games::tictactoe::{
    Board, DecisionEngine, Difficulty, Outcome, Position, Round, Turn,
};
use crate::payment::{PaymentError, PaymentReceipt, PaymentRequest};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

/// Unique identifier for a game session.
pub type SessionId = u64;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum SessionState {
    /// Nothing requested yet, or the last payment failed.
    Idle,
    /// A fee transfer is outstanding.
    AwaitingPayment,
    /// The board accepts moves.
    Active,
    /// The round has an outcome; the board is frozen.
    Terminal,
}

/// Proof that a payment result belongs to the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaymentTicket {
    session: SessionId,
    generation: u32,
}

/// Proof that an opponent move was scheduled by the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpponentTicket {
    session: SessionId,
    generation: u32,
    ply: usize,
}

/// A payment the caller must submit exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOrder {
    /// Hand this back with the result.
    pub ticket: PaymentTicket,
    /// The transfer to submit.
    pub request: PaymentRequest,
}

/// What a player click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMoveResult {
    /// The click did not fit the current state and changed nothing.
    Ignored,
    /// The move ended the round.
    Finished(Outcome),
    /// The engine replies once the ticket is handed back.
    OpponentDue(OpponentTicket),
}

/// A move the engine made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentMove {
    /// Where the engine played.
    pub position: Position,
    /// Outcome after the move.
    pub outcome: Outcome,
}

/// Everything a renderer needs, taken after each state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Session identifier.
    pub id: SessionId,
    /// Lifecycle state.
    pub state: SessionState,
    /// Current board.
    pub board: Board,
    /// Side to move.
    pub turn: Turn,
    /// Outcome derived from the board.
    pub outcome: Outcome,
    /// Selected difficulty.
    pub difficulty: Difficulty,
    /// Whether the current round has been paid for.
    pub paid: bool,
    /// Message from the last failed payment.
    pub last_error: Option<String>,
    /// The fee each round costs.
    pub fee: PaymentRequest,
}

impl SessionSnapshot {
    /// One line describing the situation to the player.
    pub fn status_line(&self) -> String {
        match self.state {
            SessionState::Idle => match &self.last_error {
                Some(message) => format!("{}. Start again to retry.", message),
                None => format!("Pay {} to start a game.", self.fee),
            },
            SessionState::AwaitingPayment => "Waiting for payment confirmation...".to_string(),
            SessionState::Active => match self.turn {
                Turn::Player => "Your move.".to_string(),
                Turn::Opponent => "Opponent is thinking...".to_string(),
            },
            SessionState::Terminal => match self.outcome {
                Outcome::PlayerWin => "You won!".to_string(),
                Outcome::OpponentWin => "You lost.".to_string(),
                Outcome::Draw => "Draw.".to_string(),
                Outcome::InProgress => "Game over.".to_string(),
            },
        }
    }
}

/// One player's game screen: a round, its payment gate and its opponent.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    state: SessionState,
    round: Round,
    difficulty: Difficulty,
    paid: bool,
    generation: u32,
    pending_opponent: Option<OpponentTicket>,
    last_error: Option<String>,
    fee: PaymentRequest,
    engine: DecisionEngine,
}

impl Session {
    /// Creates an idle session.
    #[instrument(skip(engine))]
    pub fn new(fee: PaymentRequest, difficulty: Difficulty, engine: DecisionEngine) -> Self {
        let id = rand::random::<SessionId>();
        info!(session_id = id, "Creating new game session");
        Self {
            id,
            state: SessionState::Idle,
            round: Round::new(),
            difficulty,
            paid: false,
            generation: 0,
            pending_opponent: None,
            last_error: None,
            fee,
            engine,
        }
    }

    /// Creates an idle session from configuration.
    pub fn from_config(config: &ArcadeConfig) -> Self {
        let engine = DecisionEngine::new(*config.policy(), *config.depth_discount());
        Self::new(config.payment_request(), *config.difficulty(), engine)
    }

    /// Returns the session id.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        self.round.board()
    }

    /// Returns the side to move.
    pub fn turn(&self) -> Turn {
        self.round.turn()
    }

    /// Outcome derived from the board.
    pub fn outcome(&self) -> Outcome {
        self.round.outcome()
    }

    /// Returns the selected difficulty.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Whether the current round is paid for.
    pub fn paid(&self) -> bool {
        self.paid
    }

    /// Message from the last failed payment.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Captures the renderable state.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            state: self.state,
            board: *self.round.board(),
            turn: self.round.turn(),
            outcome: self.round.outcome(),
            difficulty: self.difficulty,
            paid: self.paid,
            last_error: self.last_error.clone(),
            fee: self.fee.clone(),
        }
    }

    /// `Idle -> AwaitingPayment`.
    ///
    /// Returns the payment to submit, or `None` when not idle.
    #[instrument(skip(self), fields(session_id = self.id, state = %self.state))]
    pub fn request_start(&mut self) -> Option<PaymentOrder> {
        if self.state != SessionState::Idle {
            debug!("Start ignored");
            return None;
        }
        Some(self.open_payment())
    }

    /// `Terminal -> AwaitingPayment`.
    #[instrument(skip(self), fields(session_id = self.id, state = %self.state))]
    pub fn request_replay(&mut self) -> Option<PaymentOrder> {
        if self.state != SessionState::Terminal {
            debug!("Replay ignored");
            return None;
        }
        Some(self.open_payment())
    }

    fn open_payment(&mut self) -> PaymentOrder {
        self.generation += 1;
        self.paid = false;
        self.pending_opponent = None;
        self.last_error = None;
        self.state = SessionState::AwaitingPayment;
        info!(generation = self.generation, fee = %self.fee, "Awaiting payment");
        PaymentOrder {
            ticket: PaymentTicket {
                session: self.id,
                generation: self.generation,
            },
            request: self.fee.clone(),
        }
    }

    fn expects_payment(&self, ticket: PaymentTicket) -> bool {
        self.state == SessionState::AwaitingPayment
            && ticket.session == self.id
            && ticket.generation == self.generation
    }

    /// `AwaitingPayment -> Active`: fresh board, player to move.
    #[instrument(skip(self, receipt), fields(session_id = self.id, signature = %receipt.signature))]
    pub fn payment_confirmed(&mut self, ticket: PaymentTicket, receipt: &PaymentReceipt) -> bool {
        if !self.expects_payment(ticket) {
            debug!(?ticket, "Stale payment confirmation ignored");
            return false;
        }
        self.round = Round::new();
        self.paid = true;
        self.state = SessionState::Active;
        info!("Payment confirmed, game started");
        true
    }

    /// `AwaitingPayment -> Idle`, keeping the message for the player.
    #[instrument(skip(self), fields(session_id = self.id))]
    pub fn payment_failed(&mut self, ticket: PaymentTicket, error: &PaymentError) -> bool {
        if !self.expects_payment(ticket) {
            debug!(?ticket, "Stale payment failure ignored");
            return false;
        }
        warn!(%error, "Payment failed");
        self.last_error = Some(error.to_string());
        self.state = SessionState::Idle;
        true
    }

    /// Player click on cell `index` (0-8).
    ///
    /// Accepted only while active, on the player's turn, with no engine
    /// move pending and on an empty cell.
    #[instrument(skip(self), fields(session_id = self.id, state = %self.state))]
    pub fn player_move(&mut self, index: usize) -> PlayerMoveResult {
        if self.state != SessionState::Active
            || self.round.turn() != Turn::Player
            || self.pending_opponent.is_some()
        {
            debug!("Click ignored outside the player's turn");
            return PlayerMoveResult::Ignored;
        }
        let Some(position) = Position::from_index(index) else {
            debug!("Click ignored outside the board");
            return PlayerMoveResult::Ignored;
        };

        let outcome = match self.round.play(position) {
            Ok(outcome) => outcome,
            Err(e) => {
                debug!(error = %e, "Click ignored");
                return PlayerMoveResult::Ignored;
            }
        };
        info!(%position, %outcome, "Player moved");

        if outcome.is_terminal() {
            self.finish(outcome);
            return PlayerMoveResult::Finished(outcome);
        }

        let ticket = OpponentTicket {
            session: self.id,
            generation: self.generation,
            ply: self.round.history().len(),
        };
        self.pending_opponent = Some(ticket);
        PlayerMoveResult::OpponentDue(ticket)
    }

    /// Applies the engine's reply scheduled by [`Session::player_move`].
    ///
    /// Returns `None` for a ticket that is stale or already used.
    #[instrument(skip(self), fields(session_id = self.id, difficulty = %self.difficulty))]
    pub fn apply_opponent_move(&mut self, ticket: OpponentTicket) -> Option<OpponentMove> {
        if self.state != SessionState::Active || self.pending_opponent != Some(ticket) {
            debug!(?ticket, "Stale opponent move ignored");
            return None;
        }
        self.pending_opponent = None;

        // The engine searches a copy; only the round writes the board
        let view = *self.round.board();
        let Some(position) = self.engine.choose_move(&view, self.difficulty) else {
            error!("Engine asked to move on a full board");
            return None;
        };

        let outcome = match self.round.play(position) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(error = %e, %position, "Engine chose an illegal move");
                return None;
            }
        };
        info!(%position, %outcome, "Opponent moved");

        if outcome.is_terminal() {
            self.finish(outcome);
        }
        Some(OpponentMove { position, outcome })
    }

    fn finish(&mut self, outcome: Outcome) {
        self.state = SessionState::Terminal;
        info!(%outcome, winner = ?outcome.winner(), "Round finished");
    }

    /// Changes difficulty between games.
    ///
    /// Returns `false` and changes nothing while a game is active.
    #[instrument(skip(self), fields(session_id = self.id, state = %self.state))]
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.state == SessionState::Active {
            debug!("Difficulty change ignored mid-game");
            return false;
        }
        self.difficulty = difficulty;
        true
    }

    /// Leaves the game screen, discarding the session.
    #[instrument(skip(self), fields(session_id = self.id, state = %self.state))]
    pub fn end(self) {
        info!(pending_opponent = self.pending_opponent.is_some(), "Session discarded");
    }
}
