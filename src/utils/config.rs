// src/utils/config.rs
use std::fmt;
use std::path::PathBuf;

use config::{builder::DefaultState, Config as ConfigLib, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

use crate::utils::error::{ContextError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub context: ContextSettings,
    pub storage: StorageSettings,
    pub logging: LoggingSettings,
    pub keep_wallet: bool,
}

/// The context configuration surface. Every field is optional here; the
/// builder decides which ones are required.
#[derive(Clone, Default, Deserialize)]
pub struct ContextSettings {
    pub wallet_id: Option<String>,
    pub wallet_key: Option<String>,
    pub verity_url: Option<String>,
    pub verity_public_did: Option<String>,
    pub verity_public_verkey: Option<String>,
    pub domain_did: Option<String>,
    pub verity_agent_verkey: Option<String>,
    pub sdk_verkey_id: Option<String>,
    pub sdk_verkey: Option<String>,
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Rocks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub directory: Option<String>,
}

impl Settings {
    /// Defaults, then `config/default` and `config/local` if present, then
    /// `VERITY_`-prefixed environment variables (e.g.
    /// `VERITY_CONTEXT__ENDPOINT_URL`).
    pub fn new() -> Result<Self> {
        let config = Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("VERITY")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Self::finish(config)
    }

    /// Defaults overlaid with a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config = Self::defaults()?
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;

        Self::finish(config)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>> {
        Ok(ConfigLib::builder()
            .set_default("context.verity_url", "http://localhost:9000")?
            .set_default("context.endpoint_url", "http://localhost:4000")?
            .set_default("storage.backend", "rocks")?
            .set_default("storage.path", "wallets")?
            .set_default("logging.level", "info")?
            .set_default("keep_wallet", false)?)
    }

    fn finish(config: ConfigLib) -> Result<Self> {
        let settings: Self = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.storage.backend == StorageBackend::Rocks
            && self.storage.path.as_deref().map_or(true, str::is_empty)
        {
            return Err(ContextError::Config("storage.path must be set for the rocks backend".into()));
        }

        if self.logging.level.trim().is_empty() {
            return Err(ContextError::Config("logging.level must not be empty".into()));
        }

        if self.context.wallet_id.is_some() != self.context.wallet_key.is_some() {
            return Err(ContextError::Config(
                "context.wallet_id and context.wallet_key must be set together".into(),
            ));
        }

        Ok(())
    }

    pub fn storage_path(&self) -> Option<PathBuf> {
        self.storage.path.as_ref().map(PathBuf::from)
    }
}

impl fmt::Debug for ContextSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextSettings")
            .field("wallet_id", &self.wallet_id)
            .field("wallet_key", &self.wallet_key.as_ref().map(|_| "<redacted>"))
            .field("verity_url", &self.verity_url)
            .field("verity_public_did", &self.verity_public_did)
            .field("verity_public_verkey", &self.verity_public_verkey)
            .field("domain_did", &self.domain_did)
            .field("verity_agent_verkey", &self.verity_agent_verkey)
            .field("sdk_verkey_id", &self.sdk_verkey_id)
            .field("sdk_verkey", &self.sdk_verkey)
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

impl From<ConfigError> for ContextError {
    fn from(error: ConfigError) -> Self {
        ContextError::Config(error.to_string())
    }
}
