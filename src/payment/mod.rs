//! Payment relay pipeline
//!
//! ```text
//! body ──decode──▶ TransferRequest ──build──▶ TransactionEnvelope
//!                                                   │ sign
//!                                                   ▼
//!       PaymentReceipt ◀──submit── SignedEnvelope
//! ```

pub mod amount;
pub mod builder;
pub mod decoder;
pub mod envelope;
pub mod error;
pub mod relay;
pub mod state;
pub mod submitter;

pub use amount::{AmountError, NativeAmount};
pub use builder::TransactionBuilder;
pub use decoder::{DecodeError, TransferRequest, decode_transfer_request};
pub use envelope::{
    Asset, DecoratedSignature, EncodeError, Network, PaymentOperation, SignedEnvelope, TimeBounds,
    TransactionEnvelope,
};
pub use error::RelayError;
pub use relay::{PaymentReceipt, PaymentRelay, RelaySettings};
pub use state::PaymentState;
pub use submitter::{SubmittedTx, Submitter};
