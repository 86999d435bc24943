//! Ledger endpoint collaborator
//!
//! The relay needs two things from the network: the source account's current
//! sequence number and a place to submit signed envelopes. [`LedgerClient`]
//! is that seam; [`HorizonClient`] talks to a real Horizon server and
//! [`StubLedger`] keeps everything in memory.

pub mod account;
pub mod client;
pub mod error;
pub mod horizon;
pub mod result_code;
pub mod stub;

pub use account::{AccountId, InvalidAccountId};
pub use client::{LedgerClient, SourceAccountState, SubmissionResult};
pub use error::LedgerError;
pub use horizon::HorizonClient;
pub use result_code::ResultCode;
pub use stub::StubLedger;
