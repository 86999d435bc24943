use thiserror::Error;

use crate::payment::EncodeError;

/// Errors talking to the ledger endpoint.
///
/// A ledger *rejection* of a well-formed transaction is not an error here; it
/// is reported as [`super::SubmissionResult::Rejected`].
#[derive(Debug, Clone, Error)]
pub enum LedgerError {
    #[error("Ledger request timed out: {0}")]
    Timeout(String),

    #[error("Ledger endpoint unreachable: {0}")]
    Transport(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("Unexpected ledger response (HTTP {status}): {detail}")]
    UnexpectedResponse { status: u16, detail: String },

    #[error("Failed to decode ledger response: {0}")]
    Decode(String),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

impl LedgerError {
    /// Network-level failure (timeout or transport)
    pub fn is_network(&self) -> bool {
        matches!(self, LedgerError::Timeout(_) | LedgerError::Transport(_))
    }
}

impl From<reqwest::Error> for LedgerError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LedgerError::Timeout(e.to_string())
        } else if e.is_decode() {
            LedgerError::Decode(e.to_string())
        } else {
            LedgerError::Transport(e.to_string())
        }
    }
}
