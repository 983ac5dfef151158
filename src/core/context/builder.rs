// src/core/context/builder.rs
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::{Context, ContextFields};
use crate::{
    core::identity::{WalletConfig, WalletCredential},
    storage::WalletStorage,
    utils::{
        config::ContextSettings,
        error::{ContextError, Result},
    },
};

/// Order-independent staging area for a [`Context`].
///
/// Nothing is validated or opened until [`ContextBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct ContextBuilder {
    wallet_config: Option<WalletConfig>,
    verity_url: Option<String>,
    verity_public_did: Option<String>,
    verity_public_verkey: Option<String>,
    domain_did: Option<String>,
    verity_agent_verkey: Option<String>,
    sdk_verkey_id: Option<String>,
    sdk_verkey: Option<String>,
    endpoint_url: Option<String>,
}

impl ContextBuilder {
    pub fn blank() -> Self {
        Self::default()
    }

    /// Seeds every field from the configuration surface.
    pub fn from_settings(settings: &ContextSettings) -> Self {
        Self::blank().overlay_settings(settings)
    }

    /// Replaces staged fields with the ones the settings actually carry.
    ///
    /// Absent or empty settings leave the staged value alone, and the wallet
    /// is only replaced when both id and key are configured.
    pub fn overlay_settings(mut self, settings: &ContextSettings) -> Self {
        fn pick(staged: &mut Option<String>, configured: &Option<String>) {
            if let Some(value) = configured.as_deref().filter(|v| !v.is_empty()) {
                *staged = Some(value.to_string());
            }
        }

        if let (Some(id), Some(key)) = (&settings.wallet_id, &settings.wallet_key) {
            let wallet_config = WalletConfig::new(id.clone(), key.clone());
            if !wallet_config.is_empty() {
                self.wallet_config = Some(wallet_config);
            }
        }

        pick(&mut self.verity_url, &settings.verity_url);
        pick(&mut self.verity_public_did, &settings.verity_public_did);
        pick(&mut self.verity_public_verkey, &settings.verity_public_verkey);
        pick(&mut self.domain_did, &settings.domain_did);
        pick(&mut self.verity_agent_verkey, &settings.verity_agent_verkey);
        pick(&mut self.sdk_verkey_id, &settings.sdk_verkey_id);
        pick(&mut self.sdk_verkey, &settings.sdk_verkey);
        pick(&mut self.endpoint_url, &settings.endpoint_url);
        self
    }

    /// Seeds every field from a context document produced by
    /// [`Context::to_json`].
    pub fn from_json(json: &str) -> Result<Self> {
        let document: ContextDocument = serde_json::from_str(json)?;

        let wallet_config = match (document.wallet_name, document.wallet_key) {
            (Some(id), Some(key)) => Some(WalletConfig::new(id, key)),
            _ => None,
        };

        Ok(Self {
            wallet_config,
            verity_url: document.verity_url,
            verity_public_did: document.verity_public_did,
            verity_public_verkey: document.verity_public_verkey,
            domain_did: document.domain_did,
            verity_agent_verkey: document.verity_agent_verkey,
            sdk_verkey_id: document.sdk_verkey_id,
            sdk_verkey: document.sdk_verkey,
            endpoint_url: document.endpoint_url,
        })
    }

    /// Takes the wallet and all three identities from a freshly minted
    /// credential: the verity pairwise identity becomes the domain DID and
    /// agent verkey, the SDK pairwise identity becomes the SDK verkey pair.
    pub fn with_credential(self, credential: WalletCredential) -> Self {
        let this = self
            .verity_public_did(credential.verity_public_did())
            .verity_public_verkey(credential.verity_public_verkey())
            .domain_did(credential.verity_pairwise_did())
            .verity_agent_verkey(credential.verity_pairwise_verkey())
            .sdk_verkey_id(credential.sdk_pairwise_did())
            .sdk_verkey(credential.sdk_pairwise_verkey());

        this.wallet_config(credential.into_wallet_config())
    }

    pub fn wallet_config(mut self, wallet_config: WalletConfig) -> Self {
        self.wallet_config = Some(wallet_config);
        self
    }

    pub fn verity_url(mut self, url: impl Into<String>) -> Self {
        self.verity_url = Some(url.into());
        self
    }

    pub fn verity_public_did(mut self, did: impl Into<String>) -> Self {
        self.verity_public_did = Some(did.into());
        self
    }

    pub fn verity_public_verkey(mut self, verkey: impl Into<String>) -> Self {
        self.verity_public_verkey = Some(verkey.into());
        self
    }

    pub fn domain_did(mut self, did: impl Into<String>) -> Self {
        self.domain_did = Some(did.into());
        self
    }

    pub fn verity_agent_verkey(mut self, verkey: impl Into<String>) -> Self {
        self.verity_agent_verkey = Some(verkey.into());
        self
    }

    pub fn sdk_verkey_id(mut self, id: impl Into<String>) -> Self {
        self.sdk_verkey_id = Some(id.into());
        self
    }

    pub fn sdk_verkey(mut self, verkey: impl Into<String>) -> Self {
        self.sdk_verkey = Some(verkey.into());
        self
    }

    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Validates the staged fields, opens the wallet and returns an open
    /// [`Context`].
    ///
    /// Required fields are checked in the order `wallet_config`,
    /// `endpoint_url`; an empty value counts as missing. Validation failures
    /// never touch the storage.
    pub async fn build(self, storage: Arc<dyn WalletStorage>) -> Result<Context> {
        let wallet_config = self
            .wallet_config
            .filter(|config| !config.is_empty())
            .ok_or(ContextError::IncompleteContext("wallet_config"))?;
        let endpoint_url = self
            .endpoint_url
            .filter(|url| !url.is_empty())
            .ok_or(ContextError::IncompleteContext("endpoint_url"))?;

        let handle = storage
            .open_wallet(wallet_config.id(), wallet_config.key())
            .await
            .map_err(|e| {
                error!("Failed to open wallet {}: {}", wallet_config.id(), e);
                ContextError::WalletOpen(e)
            })?;

        info!("Built context for wallet {} (handle {})", wallet_config.id(), handle);

        Ok(Context::open(
            storage,
            handle,
            ContextFields {
                wallet_config,
                verity_url: self.verity_url,
                verity_public_did: self.verity_public_did,
                verity_public_verkey: self.verity_public_verkey,
                domain_did: self.domain_did,
                verity_agent_verkey: self.verity_agent_verkey,
                sdk_verkey_id: self.sdk_verkey_id,
                sdk_verkey: self.sdk_verkey,
                endpoint_url,
            },
        ))
    }
}

/// JSON shape of a persisted context, as written to `verity-context.json`.
#[derive(Serialize, Deserialize)]
pub(super) struct ContextDocument {
    #[serde(rename = "walletName", skip_serializing_if = "Option::is_none")]
    pub wallet_name: Option<String>,
    #[serde(rename = "walletKey", skip_serializing_if = "Option::is_none")]
    pub wallet_key: Option<String>,
    #[serde(rename = "verityUrl", skip_serializing_if = "Option::is_none")]
    pub verity_url: Option<String>,
    #[serde(rename = "verityPublicDID", skip_serializing_if = "Option::is_none")]
    pub verity_public_did: Option<String>,
    #[serde(rename = "verityPublicVerkey", skip_serializing_if = "Option::is_none")]
    pub verity_public_verkey: Option<String>,
    #[serde(rename = "domainDID", skip_serializing_if = "Option::is_none")]
    pub domain_did: Option<String>,
    #[serde(rename = "verityAgentVerKey", skip_serializing_if = "Option::is_none")]
    pub verity_agent_verkey: Option<String>,
    #[serde(rename = "sdkVerKeyId", skip_serializing_if = "Option::is_none")]
    pub sdk_verkey_id: Option<String>,
    #[serde(rename = "sdkVerKey", skip_serializing_if = "Option::is_none")]
    pub sdk_verkey: Option<String>,
    #[serde(rename = "endpointUrl", skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}
