//! Signing and submission

use std::sync::Arc;
use tracing::{debug, warn};

use super::envelope::{DecoratedSignature, Network, SignedEnvelope, TransactionEnvelope};
use super::error::RelayError;
use crate::ledger::{LedgerClient, SubmissionResult};
use crate::signer::{Keypair, SignerError};

pub struct Submitter {
    ledger: Arc<dyn LedgerClient>,
    network: Network,
}

impl Submitter {
    pub fn new(ledger: Arc<dyn LedgerClient>, network: Network) -> Self {
        Self { ledger, network }
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn ledger_name(&self) -> &'static str {
        self.ledger.name()
    }

    /// Sign `envelope` with the source keypair.
    ///
    /// Deterministic: the same envelope, network and key always produce the
    /// same signature bytes.
    pub fn sign(
        &self,
        envelope: TransactionEnvelope,
        keypair: &Keypair,
    ) -> Result<SignedEnvelope, RelayError> {
        if keypair.account_id() != envelope.source_account {
            return Err(SignerError::SourceMismatch {
                keypair: keypair.account_id().to_string(),
                source_account: envelope.source_account.to_string(),
            }
            .into());
        }

        let hash = envelope.hash(&self.network)?;
        let signature = DecoratedSignature {
            hint: keypair.signature_hint(),
            signature: keypair.sign(&hash),
        };

        Ok(SignedEnvelope {
            tx: envelope,
            signatures: vec![signature],
        })
    }

    /// Submit a signed envelope. Returns the transaction hash on acceptance.
    pub async fn submit(&self, envelope: &SignedEnvelope) -> Result<SubmittedTx, RelayError> {
        let expected_hash = envelope.hash_hex(&self.network)?;
        match self.ledger.submit(envelope).await? {
            SubmissionResult::Success { hash, ledger } => {
                if hash != expected_hash {
                    // Horizon is authoritative; just note the drift
                    warn!(reported = %hash, computed = %expected_hash, "Ledger reported a different transaction hash");
                }
                debug!(hash = %hash, ?ledger, "Transaction accepted");
                Ok(SubmittedTx { hash, ledger })
            }
            SubmissionResult::Rejected(code) => Err(RelayError::LedgerRejection(code)),
        }
    }
}

/// An accepted transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedTx {
    pub hash: String,
    pub ledger: Option<u32>,
}
