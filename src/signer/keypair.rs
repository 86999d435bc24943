//! Ed25519 source keypair.
//!
//! Signing uses the Ed25519 algorithm; keys travel as Stellar StrKeys
//! (`S...` secret seed, `G...` account id).

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use std::fmt;
use stellar_strkey::ed25519::PrivateKey;

use super::error::SignerError;
use crate::ledger::AccountId;

#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
    account_id: AccountId,
}

impl Keypair {
    /// Parse a `S...` secret seed
    pub fn from_secret(secret: &str) -> Result<Self, SignerError> {
        let seed = PrivateKey::from_string(secret.trim()).map_err(|_| SignerError::InvalidSecret)?;
        Ok(Self::from_seed(seed.0))
    }

    pub fn from_seed(seed: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        let account_id = AccountId::from_public_key(signing_key.verifying_key().to_bytes());
        Self {
            signing_key,
            account_id,
        }
    }

    pub fn account_id(&self) -> AccountId {
        self.account_id
    }

    pub fn public_key(&self) -> [u8; 32] {
        *self.account_id.as_bytes()
    }

    /// Last four bytes of the public key, attached to each signature so the
    /// network can match it to a signer without trying every key.
    pub fn signature_hint(&self) -> [u8; 4] {
        let pk = self.account_id.as_bytes();
        [pk[28], pk[29], pk[30], pk[31]]
    }

    pub fn sign(&self, message: &[u8]) -> [u8; 64] {
        self.signing_key.sign(message).to_bytes()
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("account_id", &self.account_id)
            .finish_non_exhaustive()
    }
}

/// Verify an Ed25519 signature.
///
/// Returns `false` for wrong-length keys or signatures instead of erroring.
pub fn verify_ed25519(public_key: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let pk_bytes: [u8; 32] = match public_key.try_into() {
        Ok(b) => b,
        Err(_) => return false,
    };

    let sig_bytes: [u8; 64] = match signature.try_into() {
        Ok(b) => b,
        Err(_) => return false,
    };

    let verifying_key = match VerifyingKey::from_bytes(&pk_bytes) {
        Ok(k) => k,
        Err(_) => return false,
    };

    let sig = Signature::from_bytes(&sig_bytes);
    verifying_key.verify(message, &sig).is_ok()
}
