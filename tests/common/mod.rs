// tests/common/mod.rs
use std::sync::Arc;

use verity_context::{
    provision_context, Context, InMemoryWalletStorage, RocksWalletStorage, WalletStorage,
};

pub const LOCAL_URL: &str = "http://localhost:3000";

pub struct TestContext {
    pub storage: Arc<InMemoryWalletStorage>,
    pub context: Context,
}

impl TestContext {
    pub async fn new() -> Self {
        let storage = Arc::new(InMemoryWalletStorage::new());
        let context = provision_context(storage.clone(), LOCAL_URL, LOCAL_URL)
            .await
            .expect("Failed to provision context");

        Self { storage, context }
    }
}

pub fn rocks_storage() -> (Arc<RocksWalletStorage>, tempfile::TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(RocksWalletStorage::new(temp_dir.path()).unwrap());
    (storage, temp_dir)
}

pub fn as_dyn<S: WalletStorage + 'static>(storage: &Arc<S>) -> Arc<dyn WalletStorage> {
    storage.clone()
}
