//! Request decoding
//!
//! `POST /api/send` body: `{"destinationAccountId": "G...", "amount": "10.5"}`.
//! The body is decoded from raw bytes so that every rejection, including
//! malformed JSON, comes back as a [`DecodeError`] rather than a framework
//! rejection.

use serde::Deserialize;
use thiserror::Error;

use super::amount::{AmountError, NativeAmount};
use crate::ledger::{AccountId, InvalidAccountId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed body: {0}")]
    Malformed(String),

    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("invalid destinationAccountId: {0}")]
    InvalidDestination(#[from] InvalidAccountId),

    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),
}

/// A validated transfer request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub destination: AccountId,
    pub amount: NativeAmount,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTransferRequest {
    #[serde(default)]
    destination_account_id: Option<String>,
    #[serde(default)]
    amount: Option<String>,
}

pub fn decode_transfer_request(body: &[u8]) -> Result<TransferRequest, DecodeError> {
    let raw: RawTransferRequest =
        serde_json::from_slice(body).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let destination = raw
        .destination_account_id
        .filter(|s| !s.is_empty())
        .ok_or(DecodeError::MissingField("destinationAccountId"))?;
    let amount = raw.amount.ok_or(DecodeError::MissingField("amount"))?;

    Ok(TransferRequest {
        destination: destination.parse()?,
        amount: NativeAmount::parse(&amount)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dest() -> AccountId {
        AccountId::from_public_key([4u8; 32])
    }

    fn body(dest: &str, amount: &str) -> Vec<u8> {
        format!(r#"{{"destinationAccountId":"{}","amount":"{}"}}"#, dest, amount).into_bytes()
    }

    #[test]
    fn test_decode_valid() {
        let req = decode_transfer_request(&body(&dest().to_string(), "10.5")).unwrap();
        assert_eq!(req.destination, dest());
        assert_eq!(req.amount.to_string(), "10.5");
    }

    #[test]
    fn test_missing_amount() {
        let body = format!(r#"{{"destinationAccountId":"{}"}}"#, dest());
        assert_eq!(
            decode_transfer_request(body.as_bytes()),
            Err(DecodeError::MissingField("amount"))
        );
    }

    #[test]
    fn test_missing_destination() {
        assert_eq!(
            decode_transfer_request(br#"{"amount":"1"}"#),
            Err(DecodeError::MissingField("destinationAccountId"))
        );
        assert_eq!(
            decode_transfer_request(&body("", "1")),
            Err(DecodeError::MissingField("destinationAccountId"))
        );
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            decode_transfer_request(b"not json"),
            Err(DecodeError::Malformed(_))
        ));
        assert!(matches!(
            decode_transfer_request(b""),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_numeric_json_amount_rejected() {
        let body = format!(r#"{{"destinationAccountId":"{}","amount":10.5}}"#, dest());
        assert!(matches!(
            decode_transfer_request(body.as_bytes()),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn test_negative_and_non_numeric_amount() {
        assert_eq!(
            decode_transfer_request(&body(&dest().to_string(), "-3")),
            Err(DecodeError::InvalidAmount(AmountError::Negative))
        );
        assert!(matches!(
            decode_transfer_request(&body(&dest().to_string(), "abc")),
            Err(DecodeError::InvalidAmount(AmountError::NotNumeric(_)))
        ));
    }

    #[test]
    fn test_invalid_destination() {
        assert!(matches!(
            decode_transfer_request(&body("GABC...XYZ", "1")),
            Err(DecodeError::InvalidDestination(_))
        ));
    }
}
