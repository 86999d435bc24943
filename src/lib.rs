//! Task List Payment Relay
//!
//! HTTP relay that turns `{destinationAccountId, amount}` requests into signed
//! Stellar payments and submits them to a Horizon endpoint.
//!
//! # Modules
//!
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup
//! - [`ledger`] - Horizon client, account ids, result codes
//! - [`signer`] - Source keypair and secret providers
//! - [`payment`] - decode → build → sign → submit pipeline
//! - [`tasks`] - Task-list contract boundary
//! - [`gateway`] - HTTP server (axum)

pub mod config;
pub mod gateway;
pub mod ledger;
pub mod logging;
pub mod payment;
pub mod signer;
pub mod tasks;

// Convenient re-exports at crate root
pub use config::AppConfig;
pub use ledger::{AccountId, HorizonClient, LedgerClient, StubLedger};
pub use payment::{PaymentReceipt, PaymentRelay, RelayError};
pub use signer::{EnvSecretProvider, Keypair, SecretProvider};
