//! Per-request payment lifecycle
//!
//! ```text
//! Received → Decoded → Built → Signed → Submitted → SUCCEEDED
//!    │          │        │                  ├──────→ REJECTED_BY_LEDGER
//!    └──────────┴────────┴──────────────────┴──────→ ERRORED
//! ```
//!
//! Nothing is persisted; the state only drives logging.

use std::fmt;

use super::error::RelayError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentState {
    Received,
    Decoded,
    Built,
    Signed,
    Submitted,
    Succeeded,
    RejectedByLedger,
    Errored,
}

impl PaymentState {
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentState::Succeeded | PaymentState::RejectedByLedger | PaymentState::Errored
        )
    }

    /// Terminal state for a finished request
    pub fn terminal_for<T>(result: &Result<T, RelayError>) -> Self {
        match result {
            Ok(_) => PaymentState::Succeeded,
            Err(RelayError::LedgerRejection(_)) => PaymentState::RejectedByLedger,
            Err(_) => PaymentState::Errored,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Received => "RECEIVED",
            PaymentState::Decoded => "DECODED",
            PaymentState::Built => "BUILT",
            PaymentState::Signed => "SIGNED",
            PaymentState::Submitted => "SUBMITTED",
            PaymentState::Succeeded => "SUCCEEDED",
            PaymentState::RejectedByLedger => "REJECTED_BY_LEDGER",
            PaymentState::Errored => "ERRORED",
        }
    }
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::ResultCode;

    #[test]
    fn test_terminal_states() {
        assert!(PaymentState::Succeeded.is_terminal());
        assert!(PaymentState::RejectedByLedger.is_terminal());
        assert!(PaymentState::Errored.is_terminal());

        assert!(!PaymentState::Received.is_terminal());
        assert!(!PaymentState::Decoded.is_terminal());
        assert!(!PaymentState::Built.is_terminal());
        assert!(!PaymentState::Signed.is_terminal());
        assert!(!PaymentState::Submitted.is_terminal());
    }

    #[test]
    fn test_terminal_for() {
        let ok: Result<(), RelayError> = Ok(());
        assert_eq!(PaymentState::terminal_for(&ok), PaymentState::Succeeded);

        let rejected: Result<(), RelayError> =
            Err(RelayError::LedgerRejection(ResultCode::BadSequence));
        assert_eq!(
            PaymentState::terminal_for(&rejected),
            PaymentState::RejectedByLedger
        );

        let errored: Result<(), RelayError> = Err(RelayError::Network("timeout".into()));
        assert_eq!(PaymentState::terminal_for(&errored), PaymentState::Errored);
    }

    #[test]
    fn test_display() {
        assert_eq!(PaymentState::RejectedByLedger.to_string(), "REJECTED_BY_LEDGER");
        assert_eq!(format!("{}", PaymentState::Built), "BUILT");
    }
}
