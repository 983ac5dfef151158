// src/core/identity/credential.rs
use ring::rand::{SecureRandom, SystemRandom};
use tracing::debug;
use uuid::Uuid;

use super::{did::Did, types::WalletConfig};
use crate::utils::error::{ContextError, Result};

const WALLET_KEY_BYTES: usize = 32;

/// Throwaway wallet identity for a single test run.
///
/// Holds a freshly minted wallet id/key and the three identities an SDK
/// relationship with a verity agent needs: the agent's public identity, the
/// agent side of the pairwise relationship, and the SDK side of it.
#[derive(Debug, Clone)]
pub struct WalletCredential {
    wallet: WalletConfig,
    verity_public: Did,
    verity_pairwise: Did,
    sdk_pairwise: Did,
}

impl WalletCredential {
    /// Random wallet id (UUID v4), random hex wallet key and fresh identities.
    pub fn generate() -> Result<Self> {
        let rng = SystemRandom::new();

        let mut key_bytes = [0u8; WALLET_KEY_BYTES];
        rng.fill(&mut key_bytes)
            .map_err(|_| ContextError::CredentialGeneration("system randomness unavailable".into()))?;

        Self::generate_with(&rng, Uuid::new_v4().to_string(), hex::encode(key_bytes))
    }

    /// Keeps the given wallet id/key and generates only the identities.
    pub fn with_wallet(wallet_id: impl Into<String>, wallet_key: impl Into<String>) -> Result<Self> {
        Self::generate_with(&SystemRandom::new(), wallet_id.into(), wallet_key.into())
    }

    fn generate_with(rng: &dyn SecureRandom, wallet_id: String, wallet_key: String) -> Result<Self> {
        let credential = Self {
            wallet: WalletConfig::new(wallet_id, wallet_key),
            verity_public: Did::generate(rng)?,
            verity_pairwise: Did::generate(rng)?,
            sdk_pairwise: Did::generate(rng)?,
        };

        debug!("Generated wallet credential for wallet {}", credential.wallet.id());
        Ok(credential)
    }

    pub fn wallet_config(&self) -> &WalletConfig {
        &self.wallet
    }

    pub fn wallet_id(&self) -> &str {
        self.wallet.id()
    }

    pub fn wallet_key(&self) -> &str {
        self.wallet.key()
    }

    pub fn verity_public_did(&self) -> &str {
        &self.verity_public.did
    }

    pub fn verity_public_verkey(&self) -> &str {
        &self.verity_public.verkey
    }

    pub fn verity_pairwise_did(&self) -> &str {
        &self.verity_pairwise.did
    }

    pub fn verity_pairwise_verkey(&self) -> &str {
        &self.verity_pairwise.verkey
    }

    pub fn sdk_pairwise_did(&self) -> &str {
        &self.sdk_pairwise.did
    }

    pub fn sdk_pairwise_verkey(&self) -> &str {
        &self.sdk_pairwise.verkey
    }

    pub fn into_wallet_config(self) -> WalletConfig {
        self.wallet
    }
}
