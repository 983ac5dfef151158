// tests/integration/context_tests.rs
use std::collections::HashSet;
use std::sync::Arc;

use verity_context::{
    provision_context, teardown, ContextBuilder, ContextError, InMemoryWalletStorage, WalletConfig,
    WalletState,
};

use crate::common::{TestContext, LOCAL_URL};

#[tokio::test]
async fn test_provisioned_context_starts_open() {
    let ctx = TestContext::new().await;

    assert_eq!(ctx.context.wallet_state(), WalletState::Open);
    assert!(ctx.storage.is_open(ctx.context.wallet_config().id()));
    assert_eq!(ctx.context.endpoint_url(), LOCAL_URL);
}

#[tokio::test]
async fn test_parallel_provisioning_never_shares_a_wallet() {
    let storage = Arc::new(InMemoryWalletStorage::new());

    let builds = (0..20).map(|_| provision_context(storage.clone(), LOCAL_URL, LOCAL_URL));
    let mut contexts: Vec<_> = futures::future::join_all(builds)
        .await
        .into_iter()
        .map(|result| result.expect("Failed to provision context"))
        .collect();

    let ids: HashSet<String> = contexts
        .iter()
        .map(|context| context.wallet_config().id().to_string())
        .collect();
    assert_eq!(ids.len(), contexts.len());
    assert_eq!(storage.wallet_count(), contexts.len());

    for context in contexts.iter_mut() {
        teardown(Some(context)).await.unwrap();
    }
    assert_eq!(storage.wallet_count(), 0);
}

#[tokio::test]
async fn test_second_context_on_open_wallet_is_refused() {
    let storage = Arc::new(InMemoryWalletStorage::new());
    let builder = ContextBuilder::blank()
        .wallet_config(WalletConfig::new("w1", "k1"))
        .endpoint_url(LOCAL_URL);

    let _first = builder.clone().build(storage.clone()).await.unwrap();
    let second = builder.build(storage.clone()).await;

    match second {
        Err(err @ ContextError::WalletOpen(_)) => assert!(err.is_retryable()),
        other => panic!("expected WalletOpen, got {:?}", other),
    }
}

#[tokio::test]
async fn test_persisted_context_can_be_rebuilt() {
    let mut ctx = TestContext::new().await;
    let did = ctx.context.create_and_store_did().await.unwrap();
    let json = ctx.context.to_json().unwrap();
    ctx.context.close_wallet().await.unwrap();

    let mut rebuilt = ContextBuilder::from_json(&json)
        .unwrap()
        .build(ctx.storage.clone())
        .await
        .unwrap();

    assert_eq!(rebuilt.wallet_config(), ctx.context.wallet_config());
    assert_eq!(rebuilt.sdk_verkey_id(), ctx.context.sdk_verkey_id());
    assert_eq!(
        rebuilt.did_verkey(&did.did).await.unwrap(),
        Some(did.verkey.clone())
    );

    teardown(Some(&mut rebuilt)).await.unwrap();
}
