// src/core/lifecycle.rs
//! Provisioning and teardown of throwaway test contexts.
//!
//! ```ignore
//! let mut context = provision_context(storage, "http://localhost:3000", "http://localhost:3000").await?;
//! // ... drive the SDK ...
//! teardown(Some(&mut context)).await?;
//! ```

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::{
    core::{
        context::{Context, ContextBuilder},
        identity::WalletCredential,
    },
    storage::WalletStorage,
    utils::error::{ContextError, Result},
};

/// Mints a fresh [`WalletCredential`] and builds a fully populated context
/// around it.
pub async fn provision_context(
    storage: Arc<dyn WalletStorage>,
    endpoint_url: &str,
    verity_url: &str,
) -> Result<Context> {
    let credential = WalletCredential::generate()?;
    info!("Provisioning test context for wallet {}", credential.wallet_id());

    ContextBuilder::blank()
        .with_credential(credential)
        .verity_url(verity_url)
        .endpoint_url(endpoint_url)
        .build(storage)
        .await
}

/// Closes the context's wallet if needed, then deletes its storage.
///
/// `None` is a no-op, so this can run unconditionally from test cleanup.
/// A close failure is returned as is and deletion is not attempted, since
/// the wallet may still be locked. Deletion runs whether the wallet was
/// closed here or earlier.
pub async fn teardown(context: Option<&mut Context>) -> Result<()> {
    let context = match context {
        Some(context) => context,
        None => return Ok(()),
    };

    if !context.wallet_is_closed() {
        context.close_wallet().await?;
    }

    delete_storage(context).await?;
    info!("Tore down context for wallet {}", context.wallet_config().id());
    Ok(())
}

/// Deletes the wallet storage behind a context without touching its state.
///
/// The storage refuses to delete a wallet that is still open.
pub async fn delete_storage(context: &Context) -> Result<()> {
    let config = context.wallet_config();
    debug!("Deleting wallet storage {}", config.config());

    context
        .storage()
        .delete_wallet(config.id(), config.key())
        .await
        .map_err(|e| {
            error!("Failed to delete wallet {}: {}", config.id(), e);
            ContextError::WalletDeletion(e)
        })
}
