//! Payment relay: decode → build → sign → submit.
//!
//! One instance is shared by every request. It holds only immutable data
//! (keypair, network, fee policy) and the ledger client; no sequence counter
//! lives here.

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

use super::builder::TransactionBuilder;
use super::decoder::{TransferRequest, decode_transfer_request};
use super::envelope::Network;
use super::error::RelayError;
use super::state::PaymentState;
use super::submitter::Submitter;
use crate::config::{LedgerConfig, MIN_BASE_FEE};
use crate::ledger::{AccountId, HorizonClient, LedgerClient, SourceAccountState, StubLedger};
use crate::signer::{Keypair, SecretProvider};

#[derive(Debug, Clone)]
pub struct RelaySettings {
    pub network: Network,
    pub base_fee: u32,
    pub tx_timeout: Duration,
}

impl Default for RelaySettings {
    fn default() -> Self {
        Self {
            network: Network::testnet(),
            base_fee: MIN_BASE_FEE,
            tx_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&LedgerConfig> for RelaySettings {
    fn from(cfg: &LedgerConfig) -> Self {
        Self {
            network: Network::new(cfg.network_passphrase.clone()),
            base_fee: cfg.base_fee,
            tx_timeout: cfg.tx_timeout(),
        }
    }
}

/// Outcome of an accepted payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentReceipt {
    pub hash: String,
    /// Sequence number the accepted transaction consumed
    pub sequence: i64,
    pub ledger: Option<u32>,
}

pub struct PaymentRelay {
    keypair: Keypair,
    builder: TransactionBuilder,
    submitter: Submitter,
}

impl PaymentRelay {
    pub fn new(ledger: Arc<dyn LedgerClient>, keypair: Keypair, settings: RelaySettings) -> Self {
        let builder = TransactionBuilder::new(
            ledger.clone(),
            keypair.account_id(),
            settings.base_fee,
            settings.tx_timeout,
        );
        let submitter = Submitter::new(ledger, settings.network);
        Self {
            keypair,
            builder,
            submitter,
        }
    }

    /// Resolve the source key, pick the ledger backend and wire up the relay.
    ///
    /// `cfg.mock` swaps Horizon for an in-memory ledger seeded with the source
    /// account at sequence 0.
    pub fn from_config(
        cfg: &LedgerConfig,
        secrets: &dyn SecretProvider,
    ) -> Result<Self, RelayError> {
        let keypair = secrets.source_keypair()?;
        let settings = RelaySettings::from(cfg);

        let ledger: Arc<dyn LedgerClient> = if cfg.mock {
            warn!("ledger.mock is set: payments go to an in-memory ledger, nothing reaches the network");
            Arc::new(
                StubLedger::new(settings.network.clone()).with_account(keypair.account_id(), 0),
            )
        } else {
            Arc::new(HorizonClient::new(&cfg.horizon_url, cfg.request_timeout())?)
        };

        Ok(Self::new(ledger, keypair, settings))
    }

    pub fn source_account(&self) -> AccountId {
        self.keypair.account_id()
    }

    pub fn network(&self) -> &Network {
        self.submitter.network()
    }

    pub fn ledger_name(&self) -> &'static str {
        self.submitter.ledger_name()
    }

    /// Current ledger view of the source account
    pub async fn source_state(&self) -> Result<SourceAccountState, RelayError> {
        self.builder.load_source().await
    }

    /// Decode a raw `POST /api/send` body and relay it
    pub async fn relay(&self, body: &[u8]) -> Result<PaymentReceipt, RelayError> {
        info!(state = %PaymentState::Received, bytes = body.len(), "Payment request");
        let req = match decode_transfer_request(body) {
            Ok(req) => req,
            Err(e) => {
                warn!(state = %PaymentState::Errored, error = %e, "Rejected request body");
                return Err(e.into());
            }
        };
        info!(
            state = %PaymentState::Decoded,
            destination = %req.destination.short(),
            amount = %req.amount,
            "Decoded transfer"
        );
        self.send(&req).await
    }

    pub async fn send(&self, req: &TransferRequest) -> Result<PaymentReceipt, RelayError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| RelayError::Unexpected(format!("system clock before epoch: {}", e)))?
            .as_secs();
        self.send_at(req, now).await
    }

    /// [`Self::send`] with an explicit clock, in unix seconds
    pub async fn send_at(
        &self,
        req: &TransferRequest,
        now_unix: u64,
    ) -> Result<PaymentReceipt, RelayError> {
        let result = self.run(req, now_unix).await;

        let terminal = PaymentState::terminal_for(&result);
        match &result {
            Ok(receipt) => info!(
                state = %terminal,
                hash = %receipt.hash,
                sequence = receipt.sequence,
                "Payment succeeded"
            ),
            Err(RelayError::LedgerRejection(code)) => {
                warn!(state = %terminal, result_code = %code, "Payment rejected by ledger")
            }
            Err(e) => warn!(state = %terminal, code = e.code(), error = %e, "Payment failed"),
        }
        result
    }

    async fn run(&self, req: &TransferRequest, now_unix: u64) -> Result<PaymentReceipt, RelayError> {
        let envelope = self.builder.build(req, now_unix).await?;
        let sequence = envelope.sequence_number;
        info!(state = %PaymentState::Built, sequence, fee = envelope.fee, "Built transaction");

        let signed = self.submitter.sign(envelope, &self.keypair)?;
        info!(state = %PaymentState::Signed, sequence, "Signed transaction");

        info!(state = %PaymentState::Submitted, sequence, "Submitting transaction");
        let tx = self.submitter.submit(&signed).await?;

        Ok(PaymentReceipt {
            hash: tx.hash,
            sequence,
            ledger: tx.ledger,
        })
    }
}
