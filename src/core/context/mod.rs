// src/core/context/mod.rs
mod builder;

pub use builder::ContextBuilder;

use std::fmt;
use std::sync::Arc;

use ring::rand::SystemRandom;
use tracing::{debug, info, warn};

use builder::ContextDocument;
use crate::{
    core::identity::{Did, WalletConfig},
    storage::{WalletHandle, WalletStorage},
    utils::error::{ContextError, Result},
};

const DID_RECORD_PREFIX: &str = "did:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletState {
    Open,
    Closed,
}

/// Identity and endpoint values fixed at build time.
struct ContextFields {
    wallet_config: WalletConfig,
    verity_url: Option<String>,
    verity_public_did: Option<String>,
    verity_public_verkey: Option<String>,
    domain_did: Option<String>,
    verity_agent_verkey: Option<String>,
    sdk_verkey_id: Option<String>,
    sdk_verkey: Option<String>,
    endpoint_url: String,
}

/// An open wallet plus the identities and endpoints an SDK session runs with.
///
/// Only the wallet state changes after construction, and only once, from
/// [`WalletState::Open`] to [`WalletState::Closed`]. A closed context cannot
/// be reopened; build a new one instead. `Context` is deliberately not
/// `Clone`: it is the sole owner of its wallet handle.
pub struct Context {
    storage: Arc<dyn WalletStorage>,
    wallet_handle: Option<WalletHandle>,
    state: WalletState,
    fields: ContextFields,
}

impl Context {
    fn open(storage: Arc<dyn WalletStorage>, handle: WalletHandle, fields: ContextFields) -> Self {
        Self {
            storage,
            wallet_handle: Some(handle),
            state: WalletState::Open,
            fields,
        }
    }

    pub fn wallet_state(&self) -> WalletState {
        self.state
    }

    pub fn wallet_is_closed(&self) -> bool {
        self.state == WalletState::Closed
    }

    /// `None` once the wallet has been closed.
    pub fn wallet_handle(&self) -> Option<WalletHandle> {
        self.wallet_handle
    }

    /// Closes the wallet. Calling it on a closed context does nothing.
    ///
    /// If the storage refuses to close, the context stays open with its
    /// handle intact, so the call can be retried.
    pub async fn close_wallet(&mut self) -> Result<()> {
        let handle = match (self.state, self.wallet_handle) {
            (WalletState::Open, Some(handle)) => handle,
            _ => {
                debug!("Wallet {} already closed", self.fields.wallet_config.id());
                return Ok(());
            }
        };

        self.storage.close_wallet(handle).await.map_err(|e| {
            warn!(
                "Failed to close wallet {} (handle {}): {}",
                self.fields.wallet_config.id(),
                handle,
                e
            );
            ContextError::WalletClose(e)
        })?;

        self.wallet_handle = None;
        self.state = WalletState::Closed;
        info!("Closed wallet {}", self.fields.wallet_config.id());
        Ok(())
    }

    /// Generates a new DID and stores its verkey in the open wallet.
    pub async fn create_and_store_did(&self) -> Result<Did> {
        let handle = self.open_handle()?;
        let did = Did::generate(&SystemRandom::new())?;

        self.storage
            .add_record(handle, &Self::did_record(&did.did), &did.verkey)
            .await
            .map_err(ContextError::Storage)?;

        debug!("Stored DID {} in wallet {}", did.did, self.fields.wallet_config.id());
        Ok(did)
    }

    /// Looks up the verkey of a DID previously stored in this wallet.
    pub async fn did_verkey(&self, did: &str) -> Result<Option<String>> {
        let handle = self.open_handle()?;

        self.storage
            .get_record(handle, &Self::did_record(did))
            .await
            .map_err(ContextError::Storage)
    }

    /// Renders the context document. Contains the wallet key.
    pub fn to_json(&self) -> Result<String> {
        let fields = &self.fields;
        let document = ContextDocument {
            wallet_name: Some(fields.wallet_config.id().to_string()),
            wallet_key: Some(fields.wallet_config.key().to_string()),
            verity_url: fields.verity_url.clone(),
            verity_public_did: fields.verity_public_did.clone(),
            verity_public_verkey: fields.verity_public_verkey.clone(),
            domain_did: fields.domain_did.clone(),
            verity_agent_verkey: fields.verity_agent_verkey.clone(),
            sdk_verkey_id: fields.sdk_verkey_id.clone(),
            sdk_verkey: fields.sdk_verkey.clone(),
            endpoint_url: Some(fields.endpoint_url.clone()),
        };

        Ok(serde_json::to_string(&document)?)
    }

    pub fn wallet_config(&self) -> &WalletConfig {
        &self.fields.wallet_config
    }

    pub fn verity_url(&self) -> Option<&str> {
        self.fields.verity_url.as_deref()
    }

    pub fn verity_public_did(&self) -> Option<&str> {
        self.fields.verity_public_did.as_deref()
    }

    pub fn verity_public_verkey(&self) -> Option<&str> {
        self.fields.verity_public_verkey.as_deref()
    }

    pub fn domain_did(&self) -> Option<&str> {
        self.fields.domain_did.as_deref()
    }

    pub fn verity_agent_verkey(&self) -> Option<&str> {
        self.fields.verity_agent_verkey.as_deref()
    }

    pub fn sdk_verkey_id(&self) -> Option<&str> {
        self.fields.sdk_verkey_id.as_deref()
    }

    pub fn sdk_verkey(&self) -> Option<&str> {
        self.fields.sdk_verkey.as_deref()
    }

    pub fn endpoint_url(&self) -> &str {
        &self.fields.endpoint_url
    }

    pub(crate) fn storage(&self) -> &Arc<dyn WalletStorage> {
        &self.storage
    }

    fn open_handle(&self) -> Result<WalletHandle> {
        match (self.state, self.wallet_handle) {
            (WalletState::Open, Some(handle)) => Ok(handle),
            _ => Err(ContextError::WalletClosed),
        }
    }

    fn did_record(did: &str) -> String {
        format!("{}{}", DID_RECORD_PREFIX, did)
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("wallet_config", &self.fields.wallet_config)
            .field("wallet_handle", &self.wallet_handle)
            .field("state", &self.state)
            .field("verity_url", &self.fields.verity_url)
            .field("domain_did", &self.fields.domain_did)
            .field("sdk_verkey_id", &self.fields.sdk_verkey_id)
            .field("endpoint_url", &self.fields.endpoint_url)
            .finish_non_exhaustive()
    }
}
