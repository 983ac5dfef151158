#[path = "../common/mod.rs"]
mod common;

mod context_tests;
mod lifecycle_tests;
mod storage;
