// tests/integration/storage/rocks_wallet_tests.rs
use verity_context::{
    provision_context, teardown, ContextBuilder, ContextError, StorageError, WalletConfig,
};

use crate::common::{as_dyn, rocks_storage, LOCAL_URL};

#[tokio::test]
async fn test_concurrent_contexts() {
    let (storage, _temp_dir) = rocks_storage();

    let mut handles = Vec::new();
    for _ in 0..5 {
        let storage = as_dyn(&storage);
        handles.push(tokio::spawn(async move {
            let mut context = provision_context(storage, LOCAL_URL, LOCAL_URL).await.unwrap();
            let did = context.create_and_store_did().await.unwrap();
            assert_eq!(
                context.did_verkey(&did.did).await.unwrap(),
                Some(did.verkey.clone())
            );
            teardown(Some(&mut context)).await.unwrap();
            context.wallet_config().id().to_string()
        }));
    }

    for handle in handles {
        let wallet_id = handle.await.unwrap();
        assert!(!storage.wallet_exists(&wallet_id));
    }
}

#[tokio::test]
async fn test_records_survive_close_and_reopen() {
    let (storage, _temp_dir) = rocks_storage();
    let builder = ContextBuilder::blank()
        .wallet_config(WalletConfig::new("w1", "k1"))
        .endpoint_url(LOCAL_URL);

    let mut context = builder.clone().build(as_dyn(&storage)).await.unwrap();
    let did = context.create_and_store_did().await.unwrap();
    context.close_wallet().await.unwrap();

    let mut reopened = builder.build(as_dyn(&storage)).await.unwrap();
    assert_eq!(
        reopened.did_verkey(&did.did).await.unwrap(),
        Some(did.verkey.clone())
    );

    teardown(Some(&mut reopened)).await.unwrap();
    assert!(!storage.wallet_exists("w1"));
}

#[tokio::test]
async fn test_wrong_key_fails_build() {
    let (storage, _temp_dir) = rocks_storage();

    let mut context = ContextBuilder::blank()
        .wallet_config(WalletConfig::new("w1", "k1"))
        .endpoint_url(LOCAL_URL)
        .build(as_dyn(&storage))
        .await
        .unwrap();
    context.close_wallet().await.unwrap();

    let result = ContextBuilder::blank()
        .wallet_config(WalletConfig::new("w1", "not-k1"))
        .endpoint_url(LOCAL_URL)
        .build(as_dyn(&storage))
        .await;
    assert!(matches!(
        result,
        Err(ContextError::WalletOpen(StorageError::InvalidKey(_)))
    ));

    teardown(Some(&mut context)).await.unwrap();
}
