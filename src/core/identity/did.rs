// src/core/identity/did.rs
use ring::rand::SecureRandom;
use ring::signature::{Ed25519KeyPair, KeyPair};
use serde::{Deserialize, Serialize};

use crate::utils::error::{ContextError, Result};

/// Number of leading verkey bytes that form the unqualified DID.
const DID_BYTES: usize = 16;

/// A DID and the verkey it was derived from, both base58 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Did {
    pub did: String,
    pub verkey: String,
}

impl Did {
    /// Generates a fresh ed25519 identity. The private half is discarded.
    pub fn generate(rng: &dyn SecureRandom) -> Result<Self> {
        let pkcs8 = Ed25519KeyPair::generate_pkcs8(rng)
            .map_err(|_| ContextError::CredentialGeneration("ed25519 key generation failed".into()))?;
        let key_pair = Ed25519KeyPair::from_pkcs8(pkcs8.as_ref())
            .map_err(|e| ContextError::CredentialGeneration(format!("rejected ed25519 key: {}", e)))?;

        Ok(Self::from_public_key(key_pair.public_key().as_ref()))
    }

    pub fn from_public_key(public_key: &[u8]) -> Self {
        let did_len = public_key.len().min(DID_BYTES);
        Self {
            did: bs58::encode(&public_key[..did_len]).into_string(),
            verkey: bs58::encode(public_key).into_string(),
        }
    }
}
