//! Source account signing

pub mod error;
pub mod keypair;
pub mod provider;

pub use error::SignerError;
pub use keypair::{Keypair, verify_ed25519};
pub use provider::{EnvSecretProvider, SecretProvider, StaticSecretProvider};
