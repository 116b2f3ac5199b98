//! Arcade configuration loaded from TOML.

use crate::games::tictactoe::{Difficulty, EnginePolicy};
use crate::payment::{LAMPORTS_PER_SOL, PaymentRequest};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Fee charged per game: 0.01 SOL.
pub const DEFAULT_FEE_LAMPORTS: u64 = LAMPORTS_PER_SOL / 100;

/// Address that receives game fees.
pub const DEFAULT_RECEIVER: &str = "3hhyWcsVjchWy5zuNFJvjskgcZ8WDuuvWDuSyr3GQoUe";

/// Test network RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "https://staging-rpc.dev2.eclipsenetwork.xyz";

/// Environment variable overriding the fee receiver.
pub const RECEIVER_ENV: &str = "ARCADE_RECEIVER";

/// Configuration for one arcade screen.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct ArcadeConfig {
    /// Fee per game, in lamports.
    #[serde(default = "default_fee_lamports")]
    fee_lamports: u64,

    /// Address receiving the fee.
    #[serde(default = "default_receiver")]
    receiver: String,

    /// RPC endpoint of the network the wallet pays on.
    #[serde(default = "default_rpc_url")]
    rpc_url: String,

    /// Difficulty a new screen starts with.
    #[serde(default)]
    difficulty: Difficulty,

    /// Pause before the engine's move is shown, in milliseconds.
    #[serde(default = "default_opponent_delay_ms")]
    opponent_delay_ms: u64,

    /// How long to wait for a payment confirmation, in milliseconds.
    #[serde(default = "default_payment_timeout_ms")]
    payment_timeout_ms: u64,

    /// Prefer faster wins and slower losses when searching.
    #[serde(default)]
    depth_discount: bool,

    /// Search mode per difficulty.
    #[serde(default)]
    policy: EnginePolicy,
}

fn default_fee_lamports() -> u64 {
    DEFAULT_FEE_LAMPORTS
}

fn default_receiver() -> String {
    DEFAULT_RECEIVER.to_string()
}

fn default_rpc_url() -> String {
    DEFAULT_RPC_URL.to_string()
}

fn default_opponent_delay_ms() -> u64 {
    500
}

fn default_payment_timeout_ms() -> u64 {
    60_000
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            fee_lamports: default_fee_lamports(),
            receiver: default_receiver(),
            rpc_url: default_rpc_url(),
            difficulty: Difficulty::default(),
            opponent_delay_ms: default_opponent_delay_ms(),
            payment_timeout_ms: default_payment_timeout_ms(),
            depth_discount: false,
            policy: EnginePolicy::default(),
        }
    }
}

impl ArcadeConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            fee = config.fee_lamports,
            difficulty = %config.difficulty,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from the environment.
    #[instrument(skip(self))]
    pub fn apply_env(mut self) -> Self {
        if let Ok(receiver) = std::env::var(RECEIVER_ENV) {
            debug!(%receiver, "Receiver overridden from environment");
            self.receiver = receiver;
        }
        self
    }

    /// Overrides the starting difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Overrides the opponent delay.
    pub fn with_opponent_delay(mut self, delay: Duration) -> Self {
        self.opponent_delay_ms = delay.as_millis() as u64;
        self
    }

    /// Overrides the payment timeout.
    pub fn with_payment_timeout(mut self, timeout: Duration) -> Self {
        self.payment_timeout_ms = (timeout.as_millis() as u64).max(1);
        self
    }

    /// Overrides the engine policy.
    pub fn with_policy(mut self, policy: EnginePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The fee transfer every game requires.
    pub fn payment_request(&self) -> PaymentRequest {
        PaymentRequest::new(self.fee_lamports, self.receiver.clone())
    }

    /// Opponent delay as a duration.
    pub fn opponent_delay(&self) -> Duration {
        Duration::from_millis(self.opponent_delay_ms)
    }

    /// Payment timeout as a duration.
    pub fn payment_timeout(&self) -> Duration {
        Duration::from_millis(self.payment_timeout_ms)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.receiver.trim().is_empty() {
            return Err(ConfigError::new("receiver must not be empty".to_string()));
        }
        if self.payment_timeout_ms == 0 {
            return Err(ConfigError::new(
                "payment_timeout_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
