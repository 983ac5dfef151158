// src/core/identity/types.rs
use std::fmt;

use serde_json::{json, Value};

/// Wallet id and unlocking key as understood by the storage engine.
#[derive(Clone, PartialEq, Eq)]
pub struct WalletConfig {
    id: String,
    key: String,
}

impl WalletConfig {
    pub fn new(id: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            key: key.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Engine config document, `{"id": ...}`.
    pub fn config(&self) -> Value {
        json!({ "id": self.id })
    }

    /// Engine credential document, `{"key": ...}`.
    pub fn credential(&self) -> Value {
        json!({ "key": self.key })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.id.is_empty() || self.key.is_empty()
    }
}

impl fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletConfig")
            .field("id", &self.id)
            .field("key", &"<redacted>")
            .finish()
    }
}
