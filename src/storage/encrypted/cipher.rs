// src/storage/encrypted/cipher.rs
use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Key, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use sha3::{Digest, Sha3_256};

use crate::storage::{Result, StorageError};

const NONCE_LEN: usize = 12;

/// AES-256-GCM keyed by the SHA3-256 digest of a wallet key.
///
/// Every value is sealed together with the storage key it lives under, so a
/// ciphertext moved to another record no longer authenticates.
pub struct WalletCipher {
    cipher: Aes256Gcm,
}

impl WalletCipher {
    pub fn new(wallet_key: &str) -> Self {
        let hash = Sha3_256::digest(wallet_key.as_bytes());
        let cipher_key = Key::<Aes256Gcm>::from_slice(hash.as_slice());

        Self {
            cipher: Aes256Gcm::new(cipher_key),
        }
    }

    /// Output layout is `nonce || ciphertext`.
    pub fn encrypt(&self, data: &[u8], record_key: &[u8]) -> Result<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, Payload { msg: data, aad: record_key })
            .map_err(|e| StorageError::EncryptionError(e.to_string()))?;

        let mut result = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        result.extend_from_slice(&nonce_bytes);
        result.extend_from_slice(&ciphertext);

        Ok(result)
    }

    pub fn decrypt(&self, encrypted_data: &[u8], record_key: &[u8]) -> Result<Vec<u8>> {
        if encrypted_data.len() < NONCE_LEN {
            return Err(StorageError::DecryptionError(
                "Invalid encrypted data length".to_string(),
            ));
        }

        let (nonce_bytes, ciphertext) = encrypted_data.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);

        self.cipher
            .decrypt(nonce, Payload { msg: ciphertext, aad: record_key })
            .map_err(|e| StorageError::DecryptionError(e.to_string()))
    }
}
