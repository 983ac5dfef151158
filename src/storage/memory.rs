// src/storage/memory.rs
use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::debug;

use super::{validate_wallet_id, Result, StorageError, WalletHandle, WalletStorage};

struct MemoryWallet {
    key: String,
    records: HashMap<String, String>,
}

#[derive(Default)]
struct Tables {
    wallets: HashMap<String, MemoryWallet>,
    open: HashMap<WalletHandle, String>,
}

/// Process-local wallet engine. Nothing survives the value being dropped.
pub struct InMemoryWalletStorage {
    tables: Mutex<Tables>,
    next_handle: AtomicI32,
}

impl InMemoryWalletStorage {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            next_handle: AtomicI32::new(1),
        }
    }

    pub fn wallet_exists(&self, id: &str) -> bool {
        self.tables.lock().wallets.contains_key(id)
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.tables.lock().open.values().any(|open_id| open_id == id)
    }

    pub fn wallet_count(&self) -> usize {
        self.tables.lock().wallets.len()
    }
}

impl Default for InMemoryWalletStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WalletStorage for InMemoryWalletStorage {
    async fn open_wallet(&self, id: &str, key: &str) -> Result<WalletHandle> {
        validate_wallet_id(id)?;
        let mut tables = self.tables.lock();

        if tables.open.values().any(|open_id| open_id == id) {
            return Err(StorageError::AlreadyOpen(id.to_string()));
        }

        let key_matches = tables.wallets.get(id).map(|wallet| wallet.key == key);
        match key_matches {
            Some(false) => return Err(StorageError::InvalidKey(id.to_string())),
            Some(true) => {}
            None => {
                debug!("Creating in-memory wallet {}", id);
                tables.wallets.insert(
                    id.to_string(),
                    MemoryWallet {
                        key: key.to_string(),
                        records: HashMap::new(),
                    },
                );
            }
        }

        let handle = WalletHandle(self.next_handle.fetch_add(1, Ordering::SeqCst));
        tables.open.insert(handle, id.to_string());
        Ok(handle)
    }

    async fn close_wallet(&self, handle: WalletHandle) -> Result<()> {
        self.tables
            .lock()
            .open
            .remove(&handle)
            .map(|_| ())
            .ok_or(StorageError::InvalidHandle(handle.0))
    }

    async fn delete_wallet(&self, id: &str, key: &str) -> Result<()> {
        let mut tables = self.tables.lock();

        if tables.open.values().any(|open_id| open_id == id) {
            return Err(StorageError::AlreadyOpen(id.to_string()));
        }

        match tables.wallets.get(id).map(|wallet| wallet.key == key) {
            None => Err(StorageError::NotFound(id.to_string())),
            Some(false) => Err(StorageError::InvalidKey(id.to_string())),
            Some(true) => {
                tables.wallets.remove(id);
                Ok(())
            }
        }
    }

    async fn add_record(&self, handle: WalletHandle, name: &str, value: &str) -> Result<()> {
        let mut tables = self.tables.lock();
        let Tables { wallets, open } = &mut *tables;

        let id = open.get(&handle).ok_or(StorageError::InvalidHandle(handle.0))?;
        let wallet = wallets
            .get_mut(id)
            .ok_or_else(|| StorageError::NotFound(id.clone()))?;
        wallet.records.insert(name.to_string(), value.to_string());
        Ok(())
    }

    async fn get_record(&self, handle: WalletHandle, name: &str) -> Result<Option<String>> {
        let tables = self.tables.lock();

        let id = tables
            .open
            .get(&handle)
            .ok_or(StorageError::InvalidHandle(handle.0))?;
        let wallet = tables
            .wallets
            .get(id)
            .ok_or_else(|| StorageError::NotFound(id.clone()))?;
        Ok(wallet.records.get(name).cloned())
    }
}
