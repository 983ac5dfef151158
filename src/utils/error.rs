// src/utils/error.rs
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum ContextError {
    #[error("Credential generation error: {0}")]
    CredentialGeneration(String),

    #[error("Incomplete context: missing required field `{0}`")]
    IncompleteContext(&'static str),

    #[error("Wallet open error: {0}")]
    WalletOpen(#[source] StorageError),

    #[error("Wallet close error: {0}")]
    WalletClose(#[source] StorageError),

    #[error("Wallet deletion error: {0}")]
    WalletDeletion(#[source] StorageError),

    #[error("Wallet is closed")]
    WalletClosed,

    #[error("Wallet storage error: {0}")]
    Storage(#[source] StorageError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ContextError {
    /// Whether the same call may succeed if simply repeated later.
    ///
    /// A wallet still held open elsewhere, or a close that failed inside the
    /// database engine, is transient. Everything else needs the caller to
    /// change something first.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ContextError::WalletOpen(StorageError::AlreadyOpen(_))
                | ContextError::WalletClose(StorageError::Database(_))
        )
    }
}

impl From<serde_json::Error> for ContextError {
    fn from(error: serde_json::Error) -> Self {
        ContextError::Serialization(error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ContextError>;
