// src/storage/encrypted/store.rs
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use rocksdb::{Options, DB};
use tracing::{debug, info, warn};

use super::cipher::WalletCipher;
use crate::storage::{validate_wallet_id, Result, StorageError, WalletHandle, WalletStorage};

const KEY_CHECK_RECORD: &[u8] = b"meta:key_check";
const KEY_CHECK_VALUE: &[u8] = b"verity-wallet-v1";
const RECORD_PREFIX: &str = "record:";

struct OpenWallet {
    id: String,
    db: DB,
    cipher: WalletCipher,
}

/// One RocksDB database per wallet, stored at `<root>/<wallet id>`.
///
/// Every value is encrypted with a [`WalletCipher`] derived from the wallet
/// key. A fixed check record is written on creation so that a wrong key is
/// detected on open instead of on the first read.
pub struct RocksWalletStorage {
    root: PathBuf,
    open: Mutex<HashMap<WalletHandle, OpenWallet>>,
    next_handle: AtomicI32,
}

impl RocksWalletStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.exists() {
            std::fs::create_dir_all(&root)?;
        }

        Ok(Self {
            root,
            open: Mutex::new(HashMap::new()),
            next_handle: AtomicI32::new(1),
        })
    }

    pub fn wallet_path(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    pub fn wallet_exists(&self, id: &str) -> bool {
        self.wallet_path(id).exists()
    }

    fn open_db(path: &Path, create: bool) -> Result<DB> {
        let mut opts = Options::default();
        opts.create_if_missing(create);
        opts.set_keep_log_file_num(2);

        DB::open(&opts, path).map_err(|e| StorageError::Database(e.to_string()))
    }

    fn check_key(id: &str, db: &DB, cipher: &WalletCipher) -> Result<()> {
        let stored = db
            .get(KEY_CHECK_RECORD)
            .map_err(|e| StorageError::Database(e.to_string()))?;

        match stored {
            Some(encrypted) => match cipher.decrypt(&encrypted, KEY_CHECK_RECORD) {
                Ok(plain) if plain == KEY_CHECK_VALUE => Ok(()),
                _ => Err(StorageError::InvalidKey(id.to_string())),
            },
            None => {
                let encrypted = cipher.encrypt(KEY_CHECK_VALUE, KEY_CHECK_RECORD)?;
                db.put(KEY_CHECK_RECORD, encrypted)
                    .map_err(|e| StorageError::Database(e.to_string()))
            }
        }
    }

    fn record_key(name: &str) -> Vec<u8> {
        format!("{}{}", RECORD_PREFIX, name).into_bytes()
    }

    /// Runs `flush` against the open wallet and only releases the handle
    /// once it succeeded; a failed flush leaves the wallet open under the
    /// same handle.
    fn close_with<F>(&self, handle: WalletHandle, flush: F) -> Result<()>
    where
        F: FnOnce(&DB) -> Result<()>,
    {
        let mut open = self.open.lock();
        let wallet = open
            .get(&handle)
            .ok_or(StorageError::InvalidHandle(handle.0))?;

        flush(&wallet.db)?;

        if let Some(wallet) = open.remove(&handle) {
            info!("Closed wallet {} (handle {})", wallet.id, handle);
        }
        Ok(())
    }
}

#[async_trait]
impl WalletStorage for RocksWalletStorage {
    async fn open_wallet(&self, id: &str, key: &str) -> Result<WalletHandle> {
        validate_wallet_id(id)?;
        let mut open = self.open.lock();

        if open.values().any(|wallet| wallet.id == id) {
            return Err(StorageError::AlreadyOpen(id.to_string()));
        }

        let path = self.wallet_path(id);
        if !path.exists() {
            debug!("Creating wallet database at {:?}", path);
        }
        let db = Self::open_db(&path, true)?;
        let cipher = WalletCipher::new(key);
        Self::check_key(id, &db, &cipher)?;

        let handle = WalletHandle(self.next_handle.fetch_add(1, Ordering::SeqCst));
        open.insert(
            handle,
            OpenWallet {
                id: id.to_string(),
                db,
                cipher,
            },
        );

        info!("Opened wallet {} with handle {}", id, handle);
        Ok(handle)
    }

    async fn close_wallet(&self, handle: WalletHandle) -> Result<()> {
        self.close_with(handle, |db| {
            db.flush().map_err(|e| StorageError::Database(e.to_string()))
        })
    }

    async fn delete_wallet(&self, id: &str, key: &str) -> Result<()> {
        validate_wallet_id(id)?;
        let open = self.open.lock();

        if open.values().any(|wallet| wallet.id == id) {
            return Err(StorageError::AlreadyOpen(id.to_string()));
        }

        let path = self.wallet_path(id);
        if !path.exists() {
            return Err(StorageError::NotFound(id.to_string()));
        }

        {
            let db = Self::open_db(&path, false)?;
            Self::check_key(id, &db, &WalletCipher::new(key))?;
        }

        DB::destroy(&Options::default(), &path)
            .map_err(|e| StorageError::Database(e.to_string()))?;
        if path.exists() {
            warn!("Removing leftover wallet files at {:?}", path);
            std::fs::remove_dir_all(&path)?;
        }

        info!("Deleted wallet {}", id);
        Ok(())
    }

    async fn add_record(&self, handle: WalletHandle, name: &str, value: &str) -> Result<()> {
        let open = self.open.lock();
        let wallet = open
            .get(&handle)
            .ok_or(StorageError::InvalidHandle(handle.0))?;

        let record_key = Self::record_key(name);
        let encrypted = wallet.cipher.encrypt(value.as_bytes(), &record_key)?;
        wallet
            .db
            .put(&record_key, encrypted)
            .map_err(|e| StorageError::Database(e.to_string()))
    }

    async fn get_record(&self, handle: WalletHandle, name: &str) -> Result<Option<String>> {
        let open = self.open.lock();
        let wallet = open
            .get(&handle)
            .ok_or(StorageError::InvalidHandle(handle.0))?;

        let record_key = Self::record_key(name);
        let encrypted = match wallet
            .db
            .get(&record_key)
            .map_err(|e| StorageError::Database(e.to_string()))?
        {
            Some(data) => data,
            None => return Ok(None),
        };

        let decrypted = wallet.cipher.decrypt(&encrypted, &record_key)?;
        let value = String::from_utf8(decrypted)
            .map_err(|e| StorageError::InvalidFormat(e.to_string()))?;

        Ok(Some(value))
    }
}
