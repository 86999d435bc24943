//! Relay error taxonomy
//!
//! | Variant           | HTTP | Exposed to caller        |
//! |-------------------|------|--------------------------|
//! | `Decode`          | 400  | reason                   |
//! | `LedgerRejection` | 400  | categorized result code  |
//! | `AccountNotFound` | 500  | generic message only     |
//! | `Network`         | 500  | generic message only     |
//! | `Signing`         | 500  | generic message only     |
//! | `Encode`          | 500  | generic message only     |
//! | `Unexpected`      | 500  | generic message only     |
//! | `NotImplemented`  | 501  | contract function name   |

use thiserror::Error;

use super::decoder::DecodeError;
use super::envelope::EncodeError;
use crate::ledger::{LedgerError, ResultCode};
use crate::signer::SignerError;

#[derive(Error, Debug, Clone)]
pub enum RelayError {
    #[error("Invalid request: {0}")]
    Decode(#[from] DecodeError),

    #[error("Source account not found: {0}")]
    AccountNotFound(String),

    #[error("Ledger unreachable: {0}")]
    Network(String),

    #[error("Transaction rejected by ledger: {0}")]
    LedgerRejection(ResultCode),

    #[error("Signing failed: {0}")]
    Signing(#[from] SignerError),

    #[error("Envelope encoding failed: {0}")]
    Encode(#[from] EncodeError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),

    #[error("Contract function `{0}` is not implemented by this relay")]
    NotImplemented(&'static str),
}

impl RelayError {
    /// Error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::Decode(_) => "INVALID_REQUEST",
            RelayError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            RelayError::Network(_) => "NETWORK_ERROR",
            RelayError::LedgerRejection(_) => "LEDGER_REJECTED",
            RelayError::Signing(_) => "SIGNING_ERROR",
            RelayError::Encode(_) => "ENCODE_ERROR",
            RelayError::Unexpected(_) => "INTERNAL_ERROR",
            RelayError::NotImplemented(_) => "NOT_IMPLEMENTED",
        }
    }

    pub fn http_status(&self) -> u16 {
        match self {
            RelayError::Decode(_) | RelayError::LedgerRejection(_) => 400,
            RelayError::AccountNotFound(_)
            | RelayError::Network(_)
            | RelayError::Signing(_)
            | RelayError::Encode(_)
            | RelayError::Unexpected(_) => 500,
            RelayError::NotImplemented(_) => 501,
        }
    }

    /// Whether the message may be shown to the caller verbatim
    pub fn is_client_visible(&self) -> bool {
        self.http_status() < 500 || matches!(self, RelayError::NotImplemented(_))
    }
}

impl From<LedgerError> for RelayError {
    fn from(e: LedgerError) -> Self {
        if e.is_network() {
            return RelayError::Network(e.to_string());
        }
        match e {
            LedgerError::AccountNotFound(id) => RelayError::AccountNotFound(id),
            LedgerError::Encode(inner) => RelayError::Encode(inner),
            other => RelayError::Unexpected(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payment::amount::AmountError;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            RelayError::Decode(DecodeError::MissingField("amount")).code(),
            "INVALID_REQUEST"
        );
        assert_eq!(
            RelayError::LedgerRejection(ResultCode::BadSequence).code(),
            "LEDGER_REJECTED"
        );
        assert_eq!(RelayError::NotImplemented("add_task").code(), "NOT_IMPLEMENTED");
    }

    #[test]
    fn test_http_status() {
        assert_eq!(
            RelayError::Decode(DecodeError::InvalidAmount(AmountError::Negative)).http_status(),
            400
        );
        assert_eq!(
            RelayError::LedgerRejection(ResultCode::InsufficientBalance).http_status(),
            400
        );
        assert_eq!(RelayError::AccountNotFound("G".into()).http_status(), 500);
        assert_eq!(RelayError::Network("timeout".into()).http_status(), 500);
        assert_eq!(RelayError::Unexpected("boom".into()).http_status(), 500);
        assert_eq!(RelayError::NotImplemented("task_deleted").http_status(), 501);
    }

    #[test]
    fn test_from_ledger_error() {
        assert!(matches!(
            RelayError::from(LedgerError::Timeout("5s".into())),
            RelayError::Network(_)
        ));
        assert!(matches!(
            RelayError::from(LedgerError::AccountNotFound("G".into())),
            RelayError::AccountNotFound(_)
        ));
        assert!(matches!(
            RelayError::from(LedgerError::Transport("connection refused".into())),
            RelayError::Network(_)
        ));
        assert!(matches!(
            RelayError::from(LedgerError::Decode("bad json".into())),
            RelayError::Unexpected(_)
        ));
        let err = RelayError::from(LedgerError::Encode(EncodeError::from(
            stellar_xdr::curr::Error::LengthExceedsMax,
        )));
        assert_eq!(err.code(), "ENCODE_ERROR");
        assert_eq!(err.http_status(), 500);
        assert!(!err.is_client_visible());
    }

    #[test]
    fn test_client_visibility() {
        assert!(RelayError::LedgerRejection(ResultCode::BadAuth).is_client_visible());
        assert!(RelayError::NotImplemented("add_task").is_client_visible());
        assert!(!RelayError::Network("10.0.0.3 refused".into()).is_client_visible());
    }

    #[test]
    fn test_display() {
        let err = RelayError::LedgerRejection(ResultCode::InsufficientBalance);
        assert_eq!(
            err.to_string(),
            "Transaction rejected by ledger: insufficient balance"
        );
    }
}
