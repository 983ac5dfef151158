pub mod context;
pub mod identity;
pub mod lifecycle;
