// src/storage/mod.rs
//! Wallet storage collaborators.
//!
//! The context core only ever talks to [`WalletStorage`]. Two engines ship
//! with the crate: [`InMemoryWalletStorage`] for tests and
//! [`RocksWalletStorage`], which keeps one encrypted RocksDB database per
//! wallet under a root directory.

mod errors;
pub mod encrypted;
pub mod memory;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use encrypted::RocksWalletStorage;
pub use errors::{Result, StorageError};
pub use memory::InMemoryWalletStorage;

/// Opaque token for an open wallet, issued by a [`WalletStorage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletHandle(pub i32);

impl fmt::Display for WalletHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage engine primitives a context needs from its wallet backend.
///
/// Opening an id that does not exist yet creates it. A wallet id can be open
/// at most once at a time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WalletStorage: Send + Sync {
    async fn open_wallet(&self, id: &str, key: &str) -> Result<WalletHandle>;

    async fn close_wallet(&self, handle: WalletHandle) -> Result<()>;

    async fn delete_wallet(&self, id: &str, key: &str) -> Result<()>;

    async fn add_record(&self, handle: WalletHandle, name: &str, value: &str) -> Result<()>;

    async fn get_record(&self, handle: WalletHandle, name: &str) -> Result<Option<String>>;
}

/// Rejects ids that cannot double as a single path component.
pub(crate) fn validate_wallet_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(StorageError::InvalidFormat("wallet id must not be empty".into()));
    }
    if id == "." || id == ".." || id.contains(['/', '\\', '\0']) {
        return Err(StorageError::InvalidFormat(format!(
            "wallet id is not a valid path component: {}",
            id
        )));
    }
    Ok(())
}
