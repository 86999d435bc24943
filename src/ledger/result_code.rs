//! Ledger result codes
//!
//! Horizon reports a rejected transaction as a transaction-level code plus one
//! code per operation (`extras.result_codes`). The relay folds them into one
//! category and never exposes the raw `result_xdr`.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultCode {
    BadSequence,
    InsufficientBalance,
    Malformed,
    BadAuth,
    NoDestination,
    InsufficientFee,
    Expired,
    /// Anything not categorized above, kept verbatim
    Other(String),
}

impl ResultCode {
    /// Fold Horizon `result_codes` into a category.
    ///
    /// For `tx_failed` the first failing operation decides; otherwise the
    /// transaction-level code does.
    pub fn from_result_codes(transaction: &str, operations: &[String]) -> Self {
        if transaction == "tx_failed"
            && let Some(op) = operations.iter().find(|c| c.as_str() != "op_success")
        {
            return Self::from_code(op);
        }
        Self::from_code(transaction)
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "tx_bad_seq" => ResultCode::BadSequence,
            "tx_insufficient_balance" | "op_underfunded" | "op_low_reserve" => {
                ResultCode::InsufficientBalance
            }
            "tx_malformed" | "tx_missing_operation" | "op_malformed" => ResultCode::Malformed,
            "tx_bad_auth" | "tx_bad_auth_extra" | "op_bad_auth" => ResultCode::BadAuth,
            "op_no_destination" => ResultCode::NoDestination,
            "tx_insufficient_fee" => ResultCode::InsufficientFee,
            "tx_too_late" | "tx_too_early" => ResultCode::Expired,
            other => ResultCode::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ResultCode::BadSequence => "bad sequence",
            ResultCode::InsufficientBalance => "insufficient balance",
            ResultCode::Malformed => "malformed operation",
            ResultCode::BadAuth => "authorization failure",
            ResultCode::NoDestination => "destination account does not exist",
            ResultCode::InsufficientFee => "insufficient fee",
            ResultCode::Expired => "transaction outside its validity window",
            ResultCode::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
