//! Payment collaborator: the fee that unlocks each game.
//!
//! The session never talks to a wallet directly. Whatever adapter the
//! integration picks implements [`PaymentGateway`] once, and the driver
//! hands it every [`PaymentRequest`] the session emits.

use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Lamports in one SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// A fee transfer the session needs confirmed before play starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display, derive_new::new)]
#[display("{} SOL to {}", *fee_lamports as f64 / LAMPORTS_PER_SOL as f64, receiver)]
pub struct PaymentRequest {
    /// Amount to transfer, in lamports.
    pub fee_lamports: u64,
    /// Address receiving the fee.
    pub receiver: String,
}

/// Proof that a fee transfer was confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct PaymentReceipt {
    /// Transaction signature reported by the wallet.
    pub signature: String,
    /// Amount that was transferred, in lamports.
    pub fee_lamports: u64,
}

/// Why a payment did not go through.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum PaymentError {
    /// The wallet or network refused the transfer.
    #[display("Payment rejected: {}", _0)]
    Rejected(String),
    /// No confirmation arrived in time.
    #[display("Payment not confirmed after {:?}", _0)]
    Timeout(Duration),
    /// No wallet is connected.
    #[display("Wallet not connected")]
    WalletNotConnected,
}

impl std::error::Error for PaymentError {}

/// A wallet capable of sending the game fee.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Submits the transfer and waits for confirmation.
    async fn submit_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError>;

    /// Short name for logs.
    fn name(&self) -> &str;
}

/// In-process wallet with a lamport balance.
///
/// Confirms a transfer after a fixed latency when the balance covers it.
#[derive(Debug)]
pub struct SimulatedWallet {
    connected: bool,
    balance: Mutex<u64>,
    latency: Duration,
}

impl SimulatedWallet {
    /// Creates a connected wallet holding `balance_lamports`.
    pub fn new(balance_lamports: u64) -> Self {
        Self {
            connected: true,
            balance: Mutex::new(balance_lamports),
            latency: Duration::from_millis(300),
        }
    }

    /// Sets the confirmation latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Marks the wallet as disconnected; every payment then fails.
    pub fn disconnected(mut self) -> Self {
        self.connected = false;
        self
    }

    /// Remaining balance in lamports.
    pub fn balance(&self) -> u64 {
        // A poisoned lock still holds a valid balance
        *self.balance.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn debit(&self, amount: u64) -> Result<u64, PaymentError> {
        let mut balance = self.balance.lock().unwrap_or_else(|e| e.into_inner());
        let remaining = balance.checked_sub(amount).ok_or_else(|| {
            PaymentError::Rejected(format!(
                "insufficient funds: balance {} lamports, fee {} lamports",
                *balance, amount
            ))
        })?;
        *balance = remaining;
        Ok(remaining)
    }
}

#[async_trait::async_trait]
impl PaymentGateway for SimulatedWallet {
    #[instrument(skip(self), fields(wallet = "simulated", fee = request.fee_lamports))]
    async fn submit_payment(&self, request: &PaymentRequest) -> Result<PaymentReceipt, PaymentError> {
        if !self.connected {
            warn!("Payment attempted without a connected wallet");
            return Err(PaymentError::WalletNotConnected);
        }

        debug!(latency_ms = self.latency.as_millis() as u64, "Waiting for confirmation");
        tokio::time::sleep(self.latency).await;

        let remaining = self.debit(request.fee_lamports).inspect_err(|e| {
            warn!(error = %e, "Simulated transfer failed");
        })?;

        let signature = format!("sim-{:016x}", rand::random::<u64>());
        info!(%signature, remaining, receiver = %request.receiver, "Payment confirmed");
        Ok(PaymentReceipt::new(signature, request.fee_lamports))
    }

    fn name(&self) -> &str {
        "simulated"
    }
}
