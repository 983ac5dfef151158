// src/core/identity/mod.rs
pub mod credential;
pub mod did;
pub mod types;

pub use credential::WalletCredential;
pub use did::Did;
pub use types::WalletConfig;
