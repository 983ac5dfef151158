// src/storage/encrypted/mod.rs
mod cipher;
mod store;

pub use cipher::WalletCipher;
pub use store::RocksWalletStorage;
