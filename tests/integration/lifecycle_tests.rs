// tests/integration/lifecycle_tests.rs
use std::sync::Arc;

use verity_context::{
    delete_storage, teardown, ContextBuilder, ContextError, InMemoryWalletStorage, StorageError,
    WalletConfig, WalletStorage,
};

use crate::common::{as_dyn, rocks_storage, TestContext, LOCAL_URL};

async fn run_end_to_end(storage: Arc<dyn WalletStorage>) {
    let mut context = ContextBuilder::blank()
        .wallet_config(WalletConfig::new("w1", "k1"))
        .endpoint_url(LOCAL_URL)
        .build(storage.clone())
        .await
        .unwrap();
    let did = context.create_and_store_did().await.unwrap();

    assert!(!context.wallet_is_closed());
    context.close_wallet().await.unwrap();
    assert!(context.wallet_is_closed());

    teardown(Some(&mut context)).await.unwrap();

    // a reopened wallet is a fresh one, never the deleted contents
    let handle = storage.open_wallet("w1", "k1").await.unwrap();
    let stale = storage
        .get_record(handle, &format!("did:{}", did.did))
        .await
        .unwrap();
    assert_eq!(stale, None);
    storage.close_wallet(handle).await.unwrap();
}

#[tokio::test]
async fn test_end_to_end_in_memory() {
    let storage = Arc::new(InMemoryWalletStorage::new());
    run_end_to_end(as_dyn(&storage)).await;
}

#[test_log::test(tokio::test)]
async fn test_end_to_end_rocks() {
    let (storage, _temp_dir) = rocks_storage();
    run_end_to_end(as_dyn(&storage)).await;
}

#[tokio::test]
async fn test_teardown_none_is_noop() {
    teardown(None).await.unwrap();
}

#[tokio::test]
async fn test_teardown_removes_open_wallet() {
    let mut ctx = TestContext::new().await;
    let wallet_id = ctx.context.wallet_config().id().to_string();

    teardown(Some(&mut ctx.context)).await.unwrap();

    assert!(ctx.context.wallet_is_closed());
    assert!(!ctx.storage.wallet_exists(&wallet_id));
}

#[tokio::test]
async fn test_forced_deletion_refuses_open_wallet() {
    let mut ctx = TestContext::new().await;

    let result = delete_storage(&ctx.context).await;
    assert!(matches!(
        result,
        Err(ContextError::WalletDeletion(StorageError::AlreadyOpen(_)))
    ));

    ctx.context.close_wallet().await.unwrap();
    delete_storage(&ctx.context).await.unwrap();
    assert!(!ctx.storage.wallet_exists(ctx.context.wallet_config().id()));
}
