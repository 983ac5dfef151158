// src/storage/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Wallet not found: {0}")]
    NotFound(String),

    #[error("Wallet already open: {0}")]
    AlreadyOpen(String),

    #[error("Invalid wallet key for wallet: {0}")]
    InvalidKey(String),

    #[error("Invalid wallet handle: {0}")]
    InvalidHandle(i32),

    #[error("Encryption error: {0}")]
    EncryptionError(String),

    #[error("Decryption error: {0}")]
    DecryptionError(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, StorageError>;
