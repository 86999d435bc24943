//! Where the source secret comes from.
//!
//! The relay never reads a secret literal out of its config file; it asks a
//! [`SecretProvider`] once at startup.

use super::error::SignerError;
use super::keypair::Keypair;

pub trait SecretProvider: Send + Sync {
    fn source_keypair(&self) -> Result<Keypair, SignerError>;
}

/// Reads the `S...` seed from an environment variable
#[derive(Debug, Clone)]
pub struct EnvSecretProvider {
    var: String,
}

impl EnvSecretProvider {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl SecretProvider for EnvSecretProvider {
    fn source_keypair(&self) -> Result<Keypair, SignerError> {
        let secret =
            std::env::var(&self.var).map_err(|_| SignerError::MissingSecret(self.var.clone()))?;
        Keypair::from_secret(&secret)
    }
}

/// Fixed seed, for tests and the in-memory demo ledger
#[derive(Debug, Clone)]
pub struct StaticSecretProvider {
    secret: String,
}

impl StaticSecretProvider {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::new(stellar_strkey::ed25519::PrivateKey(seed).to_string())
    }
}

impl SecretProvider for StaticSecretProvider {
    fn source_keypair(&self) -> Result<Keypair, SignerError> {
        Keypair::from_secret(&self.secret)
    }
}
