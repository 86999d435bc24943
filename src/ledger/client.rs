use async_trait::async_trait;

use super::account::AccountId;
use super::error::LedgerError;
use super::result_code::ResultCode;
use crate::payment::envelope::SignedEnvelope;

/// Account state as last seen by the ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAccountState {
    pub account_id: AccountId,
    /// Latest consumed sequence number; the next transaction uses `sequence + 1`
    pub sequence: i64,
}

/// Outcome of one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success { hash: String, ledger: Option<u32> },
    Rejected(ResultCode),
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success { .. })
    }
}

/// Remote ledger reached by network address.
///
/// Implementations make exactly one network round trip per call and never
/// retry.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Name for logging
    fn name(&self) -> &'static str;

    /// Read-only account lookup
    async fn load_account(&self, account: &AccountId) -> Result<SourceAccountState, LedgerError>;

    /// Submit a signed envelope and wait for the ledger's verdict
    async fn submit(&self, envelope: &SignedEnvelope) -> Result<SubmissionResult, LedgerError>;
}
