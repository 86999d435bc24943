use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SignerError {
    #[error("Source secret not provided (env {0} is unset)")]
    MissingSecret(String),

    #[error("Source secret is not a valid Stellar secret seed")]
    InvalidSecret,

    #[error("Keypair {keypair} cannot sign for source account {source_account}")]
    SourceMismatch {
        keypair: String,
        source_account: String,
    },
}
