//! Transaction Builder
//!
//! One read-only ledger call (source account lookup), then pure assembly.
//! The ledger is the only source of truth for sequence numbers: nothing here
//! caches or increments a counter between requests.

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::decoder::TransferRequest;
use super::envelope::{PaymentOperation, TimeBounds, TransactionEnvelope};
use super::error::RelayError;
use crate::ledger::{AccountId, LedgerClient, SourceAccountState};

pub struct TransactionBuilder {
    ledger: Arc<dyn LedgerClient>,
    source: AccountId,
    base_fee: u32,
    timeout: Duration,
}

impl TransactionBuilder {
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        source: AccountId,
        base_fee: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            ledger,
            source,
            base_fee,
            timeout,
        }
    }

    /// Fetch the source account's latest sequence number
    pub async fn load_source(&self) -> Result<SourceAccountState, RelayError> {
        let state = self.ledger.load_account(&self.source).await?;
        debug!(
            ledger = self.ledger.name(),
            account = %self.source.short(),
            sequence = state.sequence,
            "Loaded source account"
        );
        Ok(state)
    }

    /// Build an unsigned envelope for `req` against the ledger's current state
    pub async fn build(
        &self,
        req: &TransferRequest,
        now_unix: u64,
    ) -> Result<TransactionEnvelope, RelayError> {
        let state = self.load_source().await?;
        self.assemble(&state, req, now_unix)
    }

    /// Pure part of [`Self::build`]
    pub fn assemble(
        &self,
        state: &SourceAccountState,
        req: &TransferRequest,
        now_unix: u64,
    ) -> Result<TransactionEnvelope, RelayError> {
        if state.account_id != self.source {
            return Err(RelayError::Unexpected(format!(
                "account state for {} used to build for {}",
                state.account_id, self.source
            )));
        }

        let operations = vec![PaymentOperation::native(req.destination, req.amount)];

        let sequence_number = state
            .sequence
            .checked_add(1)
            .ok_or_else(|| RelayError::Unexpected("source sequence number exhausted".into()))?;
        let fee = self
            .base_fee
            .checked_mul(operations.len() as u32)
            .ok_or_else(|| RelayError::Unexpected("fee overflow".into()))?;
        let max_time = now_unix
            .checked_add(self.timeout.as_secs())
            .ok_or_else(|| RelayError::Unexpected("time bound overflow".into()))?;

        Ok(TransactionEnvelope {
            source_account: self.source,
            fee,
            sequence_number,
            time_bounds: TimeBounds {
                min_time: 0,
                max_time,
            },
            operations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{LedgerError, StubLedger};
    use crate::payment::amount::NativeAmount;
    use crate::payment::envelope::{Asset, Network};
    use crate::signer::Keypair;

    const NOW: u64 = 1_700_000_000;

    fn source() -> AccountId {
        Keypair::from_seed([1u8; 32]).account_id()
    }

    fn request(amount: &str) -> TransferRequest {
        TransferRequest {
            destination: Keypair::from_seed([2u8; 32]).account_id(),
            amount: NativeAmount::parse(amount).unwrap(),
        }
    }

    fn builder(ledger: Arc<StubLedger>) -> TransactionBuilder {
        TransactionBuilder::new(ledger, source(), 100, Duration::from_secs(30))
    }

    #[tokio::test]
    async fn test_build_uses_next_sequence() {
        let ledger = Arc::new(StubLedger::new(Network::testnet()).with_account(source(), 42));
        let tx = builder(ledger.clone()).build(&request("10.5"), NOW).await.unwrap();

        assert_eq!(tx.sequence_number, 43);
        assert_eq!(tx.source_account, source());
        assert_eq!(tx.fee, 100);
        assert_eq!(tx.time_bounds, TimeBounds { min_time: 0, max_time: NOW + 30 });
        assert_eq!(ledger.load_calls(), 1);
        assert_eq!(ledger.submit_calls(), 0);
    }

    #[tokio::test]
    async fn test_single_payment_matches_request_verbatim() {
        let ledger = Arc::new(StubLedger::new(Network::testnet()).with_account(source(), 0));
        let req = request("1234.0000001");
        let tx = builder(ledger).build(&req, NOW).await.unwrap();

        assert_eq!(tx.operations.len(), 1);
        let op = &tx.operations[0];
        assert_eq!(op.destination, req.destination);
        assert_eq!(op.asset, Asset::Native);
        assert_eq!(op.amount, req.amount);
        assert_eq!(op.amount.to_string(), "1234.0000001");
    }

    #[tokio::test]
    async fn test_build_does_not_cache_sequence() {
        let ledger = Arc::new(StubLedger::new(Network::testnet()).with_account(source(), 7));
        let b = builder(ledger.clone());

        let first = b.build(&request("1"), NOW).await.unwrap();
        let second = b.build(&request("1"), NOW).await.unwrap();

        // nothing was submitted, so the ledger still says 7
        assert_eq!(first.sequence_number, 8);
        assert_eq!(second.sequence_number, 8);
        assert_eq!(ledger.load_calls(), 2);
    }

    #[tokio::test]
    async fn test_account_not_found() {
        let ledger = Arc::new(StubLedger::new(Network::testnet()));
        let err = builder(ledger).build(&request("1"), NOW).await.unwrap_err();
        assert!(matches!(err, RelayError::AccountNotFound(_)));
    }

    #[tokio::test]
    async fn test_network_error() {
        let ledger = Arc::new(StubLedger::new(Network::testnet()).with_account(source(), 1));
        ledger.fail_load_with(LedgerError::Timeout("operation timed out".into()));
        let err = builder(ledger).build(&request("1"), NOW).await.unwrap_err();
        assert!(matches!(err, RelayError::Network(_)));
    }

    #[test]
    fn test_sequence_overflow() {
        let ledger = Arc::new(StubLedger::new(Network::testnet()));
        let state = SourceAccountState {
            account_id: source(),
            sequence: i64::MAX,
        };
        let err = builder(ledger)
            .assemble(&state, &request("1"), NOW)
            .unwrap_err();
        assert!(matches!(err, RelayError::Unexpected(_)));
    }

    #[test]
    fn test_foreign_account_state_rejected() {
        let ledger = Arc::new(StubLedger::new(Network::testnet()));
        let state = SourceAccountState {
            account_id: Keypair::from_seed([9u8; 32]).account_id(),
            sequence: 1,
        };
        assert!(builder(ledger).assemble(&state, &request("1"), NOW).is_err());
    }
}
