//! In-memory ledger.
//!
//! Enforces the two rules the relay depends on: a transaction must carry
//! `sequence + 1` for its source account, and must be signed by that account.
//! Used by tests and by `ledger.mock: true` for local demos.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

use super::account::AccountId;
use super::client::{LedgerClient, SourceAccountState, SubmissionResult};
use super::error::LedgerError;
use super::result_code::ResultCode;
use crate::payment::envelope::{Network, SignedEnvelope};

pub struct StubLedger {
    network: Network,
    accounts: Mutex<HashMap<AccountId, i64>>,
    submitted: Mutex<Vec<SignedEnvelope>>,
    load_error: Mutex<Option<LedgerError>>,
    submit_error: Mutex<Option<LedgerError>>,
    forced_rejection: Mutex<Option<String>>,
    load_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    ledger_seq: AtomicU32,
}

fn locked<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl StubLedger {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            accounts: Mutex::new(HashMap::new()),
            submitted: Mutex::new(Vec::new()),
            load_error: Mutex::new(None),
            submit_error: Mutex::new(None),
            forced_rejection: Mutex::new(None),
            load_calls: AtomicUsize::new(0),
            submit_calls: AtomicUsize::new(0),
            ledger_seq: AtomicU32::new(1),
        }
    }

    pub fn with_account(self, account: AccountId, sequence: i64) -> Self {
        locked(&self.accounts).insert(account, sequence);
        self
    }

    /// Every lookup fails with `err`
    pub fn fail_load_with(&self, err: LedgerError) {
        *locked(&self.load_error) = Some(err);
    }

    /// Every submission fails with `err`
    pub fn fail_submit_with(&self, err: LedgerError) {
        *locked(&self.submit_error) = Some(err);
    }

    /// Reject every submission with a Horizon operation/transaction code
    pub fn reject_with(&self, code: impl Into<String>) {
        *locked(&self.forced_rejection) = Some(code.into());
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn sequence_of(&self, account: &AccountId) -> Option<i64> {
        locked(&self.accounts).get(account).copied()
    }

    /// Everything submitted, accepted or not
    pub fn submitted(&self) -> Vec<SignedEnvelope> {
        locked(&self.submitted).clone()
    }
}

#[async_trait]
impl LedgerClient for StubLedger {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn load_account(&self, account: &AccountId) -> Result<SourceAccountState, LedgerError> {
        self.load_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(err) = locked(&self.load_error).clone() {
            return Err(err);
        }

        let sequence = self
            .sequence_of(account)
            .ok_or_else(|| LedgerError::AccountNotFound(account.to_string()))?;

        Ok(SourceAccountState {
            account_id: *account,
            sequence,
        })
    }

    async fn submit(&self, envelope: &SignedEnvelope) -> Result<SubmissionResult, LedgerError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        locked(&self.submitted).push(envelope.clone());

        if let Some(err) = locked(&self.submit_error).clone() {
            return Err(err);
        }

        if let Some(code) = locked(&self.forced_rejection).clone() {
            return Ok(SubmissionResult::Rejected(ResultCode::from_code(&code)));
        }

        let source = envelope.tx.source_account;
        let mut accounts = locked(&self.accounts);
        let Some(current) = accounts.get(&source).copied() else {
            return Ok(SubmissionResult::Rejected(ResultCode::from_code(
                "tx_no_source_account",
            )));
        };

        if envelope.tx.sequence_number != current + 1 {
            debug!(
                expected = current + 1,
                got = envelope.tx.sequence_number,
                "stub ledger: bad sequence"
            );
            return Ok(SubmissionResult::Rejected(ResultCode::BadSequence));
        }

        if !envelope.is_signed_by(&self.network, &source)? {
            return Ok(SubmissionResult::Rejected(ResultCode::BadAuth));
        }

        // Sequence is consumed only by an accepted transaction
        accounts.insert(source, envelope.tx.sequence_number);
        let ledger = self.ledger_seq.fetch_add(1, Ordering::SeqCst);

        Ok(SubmissionResult::Success {
            hash: envelope.hash_hex(&self.network)?,
            ledger: Some(ledger),
        })
    }
}
