//! Throwaway wallet and identity contexts for verifiable-credential SDK tests.
//!
//! A [`Context`] bundles an open wallet handle with the DIDs, verkeys and
//! endpoints an SDK session needs. Contexts are produced by a
//! [`ContextBuilder`], usually seeded from a freshly generated
//! [`WalletCredential`], and disposed of with [`teardown`], which closes the
//! wallet and deletes its storage.

pub mod core;
pub mod storage;
pub mod utils;

pub use crate::{
    core::{
        context::{Context, ContextBuilder, WalletState},
        identity::{Did, WalletConfig, WalletCredential},
        lifecycle::{delete_storage, provision_context, teardown},
    },
    storage::{InMemoryWalletStorage, RocksWalletStorage, StorageError, WalletHandle, WalletStorage},
    utils::{
        config::{ContextSettings, Settings, StorageBackend},
        error::{ContextError, Result},
    },
};
