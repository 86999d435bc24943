//! Transaction envelope
//!
//! ```text
//! TransactionEnvelope (ENVELOPE_TYPE_TX)
//! ├── Transaction
//! │   ├── source_account   MuxedAccount (ed25519)
//! │   ├── fee              u32, base fee * op count
//! │   ├── sequence_number  i64, account sequence + 1
//! │   ├── cond             PRECOND_TIME { min 0, max now + timeout }
//! │   ├── memo             MEMO_NONE
//! │   └── operations       [PAYMENT { destination, native, stroops }]
//! └── signatures           [DecoratedSignature { hint, sig }]
//! ```
//!
//! The relay keeps its own view of the envelope and lowers it into
//! `stellar_xdr::curr` types for hashing and transport. Signatures cover
//! `sha256(TransactionSignaturePayload)`, which is also the transaction hash
//! Horizon reports.

use sha2::{Digest, Sha256};
use stellar_xdr::curr as xdr;
use stellar_xdr::curr::{Limits, WriteXdr};
use thiserror::Error;

use super::amount::NativeAmount;
use crate::ledger::AccountId;
use crate::signer::verify_ed25519;

/// XDR lowering failed (collection bounds, size limits)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("XDR encoding failed: {0}")]
pub struct EncodeError(String);

impl From<xdr::Error> for EncodeError {
    fn from(e: xdr::Error) -> Self {
        EncodeError(e.to_string())
    }
}

/// Network a transaction is bound to, identified by `sha256(passphrase)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    passphrase: String,
    id: [u8; 32],
}

impl Network {
    pub fn new(passphrase: impl Into<String>) -> Self {
        let passphrase = passphrase.into();
        let digest = Sha256::digest(passphrase.as_bytes());
        let mut id = [0u8; 32];
        id.copy_from_slice(&digest);
        Self { passphrase, id }
    }

    pub fn testnet() -> Self {
        Self::new(crate::config::TESTNET_PASSPHRASE)
    }

    pub fn passphrase(&self) -> &str {
        &self.passphrase
    }

    pub fn id(&self) -> &[u8; 32] {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Native,
}

impl From<Asset> for xdr::Asset {
    fn from(asset: Asset) -> Self {
        match asset {
            Asset::Native => xdr::Asset::Native,
        }
    }
}

/// One native-asset payment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOperation {
    pub destination: AccountId,
    pub asset: Asset,
    pub amount: NativeAmount,
}

impl PaymentOperation {
    pub fn native(destination: AccountId, amount: NativeAmount) -> Self {
        Self {
            destination,
            asset: Asset::Native,
            amount,
        }
    }

    fn to_operation(&self) -> xdr::Operation {
        xdr::Operation {
            source_account: None,
            body: xdr::OperationBody::Payment(xdr::PaymentOp {
                destination: muxed(&self.destination),
                asset: self.asset.into(),
                amount: self.amount.stroops(),
            }),
        }
    }
}

/// Unix-seconds validity window; `max_time == 0` would mean unbounded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEnvelope {
    pub source_account: AccountId,
    pub fee: u32,
    pub sequence_number: i64,
    pub time_bounds: TimeBounds,
    pub operations: Vec<PaymentOperation>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoratedSignature {
    pub hint: [u8; 4],
    pub signature: [u8; 64],
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    pub tx: TransactionEnvelope,
    pub signatures: Vec<DecoratedSignature>,
}

fn muxed(account: &AccountId) -> xdr::MuxedAccount {
    xdr::MuxedAccount::Ed25519(xdr::Uint256(*account.as_bytes()))
}

impl TransactionEnvelope {
    pub fn to_transaction(&self) -> Result<xdr::Transaction, EncodeError> {
        let operations: Vec<xdr::Operation> =
            self.operations.iter().map(PaymentOperation::to_operation).collect();

        Ok(xdr::Transaction {
            source_account: muxed(&self.source_account),
            fee: self.fee,
            seq_num: xdr::SequenceNumber(self.sequence_number),
            cond: xdr::Preconditions::Time(xdr::TimeBounds {
                min_time: xdr::TimePoint(self.time_bounds.min_time),
                max_time: xdr::TimePoint(self.time_bounds.max_time),
            }),
            memo: xdr::Memo::None,
            operations: operations.try_into()?,
            ext: xdr::TransactionExt::V0,
        })
    }

    /// Bytes whose SHA-256 gets signed
    pub fn signature_payload(&self, network: &Network) -> Result<Vec<u8>, EncodeError> {
        let payload = xdr::TransactionSignaturePayload {
            network_id: xdr::Hash(*network.id()),
            tagged_transaction: xdr::TransactionSignaturePayloadTaggedTransaction::Tx(
                self.to_transaction()?,
            ),
        };
        Ok(payload.to_xdr(Limits::none())?)
    }

    pub fn hash(&self, network: &Network) -> Result<[u8; 32], EncodeError> {
        let digest = Sha256::digest(self.signature_payload(network)?);
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        Ok(out)
    }
}

impl DecoratedSignature {
    fn to_xdr_signature(self) -> Result<xdr::DecoratedSignature, EncodeError> {
        Ok(xdr::DecoratedSignature {
            hint: xdr::SignatureHint(self.hint),
            signature: xdr::Signature(self.signature.to_vec().try_into()?),
        })
    }
}

impl SignedEnvelope {
    pub fn to_envelope(&self) -> Result<xdr::TransactionEnvelope, EncodeError> {
        let signatures = self
            .signatures
            .iter()
            .map(|s| s.to_xdr_signature())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(xdr::TransactionEnvelope::Tx(xdr::TransactionV1Envelope {
            tx: self.tx.to_transaction()?,
            signatures: signatures.try_into()?,
        }))
    }

    /// Base64 XDR, as Horizon's `tx` form field expects
    pub fn to_base64(&self) -> Result<String, EncodeError> {
        Ok(self.to_envelope()?.to_xdr_base64(Limits::none())?)
    }

    pub fn hash_hex(&self, network: &Network) -> Result<String, EncodeError> {
        Ok(hex::encode(self.tx.hash(network)?))
    }

    /// True when some signature verifies against `account` for this network
    pub fn is_signed_by(&self, network: &Network, account: &AccountId) -> Result<bool, EncodeError> {
        let hash = self.tx.hash(network)?;
        let pk = account.as_bytes();
        Ok(self
            .signatures
            .iter()
            .filter(|s| s.hint == pk[28..32])
            .any(|s| verify_ed25519(pk, &hash, &s.signature)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signer::Keypair;
    use stellar_xdr::curr::ReadXdr;

    fn envelope(sequence: i64) -> TransactionEnvelope {
        let source = Keypair::from_seed([1u8; 32]).account_id();
        let dest = Keypair::from_seed([2u8; 32]).account_id();
        TransactionEnvelope {
            source_account: source,
            fee: 100,
            sequence_number: sequence,
            time_bounds: TimeBounds {
                min_time: 0,
                max_time: 1_700_000_030,
            },
            operations: vec![PaymentOperation::native(
                dest,
                NativeAmount::parse("10.5").unwrap(),
            )],
        }
    }

    #[test]
    fn test_network_id_is_sha256_of_passphrase() {
        let net = Network::testnet();
        let expected = Sha256::digest(b"Test SDF Network ; September 2015");
        assert_eq!(&net.id()[..], &expected[..]);
        assert_ne!(Network::new("other").id(), net.id());
    }

    #[test]
    fn test_transaction_layout() {
        let tx = envelope(43);
        let bytes = tx.to_transaction().unwrap().to_xdr(Limits::none()).unwrap();
        // source 36 + fee 4 + seq 8 + cond 20 + memo 4 + count 4 + op 56 + ext 4
        assert_eq!(bytes.len(), 136);
        // MuxedAccount discriminant then key
        assert_eq!(&bytes[0..4], &[0, 0, 0, 0]);
        assert_eq!(&bytes[4..36], tx.source_account.as_bytes());
        assert_eq!(&bytes[36..40], &100u32.to_be_bytes());
        assert_eq!(&bytes[40..48], &43i64.to_be_bytes());
        // amount is the last field before ext
        assert_eq!(&bytes[124..132], &105_000_000i64.to_be_bytes());
    }

    #[test]
    fn test_signature_payload_prefix() {
        let net = Network::testnet();
        let tx = envelope(43);
        let payload = tx.signature_payload(&net).unwrap();
        assert_eq!(payload.len(), 32 + 4 + 136);
        assert_eq!(&payload[0..32], net.id());
        // ENVELOPE_TYPE_TX
        assert_eq!(&payload[32..36], &2i32.to_be_bytes());
    }

    #[test]
    fn test_signed_envelope_decodes() {
        let signed = SignedEnvelope {
            tx: envelope(43),
            signatures: vec![DecoratedSignature {
                hint: [1, 2, 3, 4],
                signature: [9u8; 64],
            }],
        };
        let b64 = signed.to_base64().unwrap();
        let decoded = xdr::TransactionEnvelope::from_xdr_base64(&b64, Limits::none()).unwrap();
        assert_eq!(decoded, signed.to_envelope().unwrap());
        assert_eq!(decoded.to_xdr(Limits::none()).unwrap().len(), 4 + 136 + 4 + 72);

        let xdr::TransactionEnvelope::Tx(v1) = decoded else {
            panic!("expected a v1 envelope");
        };
        assert_eq!(v1.tx.seq_num.0, 43);
        assert_eq!(v1.signatures.len(), 1);
        assert_eq!(v1.signatures[0].hint.0, [1, 2, 3, 4]);
        match &v1.tx.operations[0].body {
            xdr::OperationBody::Payment(op) => {
                assert_eq!(op.amount, 105_000_000);
                assert_eq!(op.asset, xdr::Asset::Native);
            }
            other => panic!("unexpected operation {:?}", other),
        }
    }

    #[test]
    fn test_hash_depends_on_network_and_sequence() {
        let net = Network::testnet();
        let tx = envelope(43);
        let public = Network::new("Public Global Stellar Network ; September 2015");

        assert_eq!(tx.hash(&net).unwrap(), envelope(43).hash(&net).unwrap());
        assert_ne!(tx.hash(&net).unwrap(), envelope(44).hash(&net).unwrap());
        assert_ne!(tx.hash(&net).unwrap(), tx.hash(&public).unwrap());
    }

    #[test]
    fn test_too_many_operations_do_not_encode() {
        let mut tx = envelope(43);
        let op = tx.operations[0].clone();
        tx.operations = vec![op; 101];
        assert!(tx.to_transaction().is_err());
        assert!(tx.hash(&Network::testnet()).is_err());
    }

    #[test]
    fn test_is_signed_by() {
        let net = Network::testnet();
        let kp = Keypair::from_seed([1u8; 32]);
        let tx = envelope(43);
        let signed = SignedEnvelope {
            signatures: vec![DecoratedSignature {
                hint: kp.signature_hint(),
                signature: kp.sign(&tx.hash(&net).unwrap()),
            }],
            tx,
        };

        assert!(signed.is_signed_by(&net, &kp.account_id()).unwrap());
        assert!(!signed.is_signed_by(&Network::new("other"), &kp.account_id()).unwrap());
        let stranger = Keypair::from_seed([2u8; 32]).account_id();
        assert!(!signed.is_signed_by(&net, &stranger).unwrap());
    }
}
