//! Wallet loading and key derivation

pub mod derivation;
pub mod wallet;

pub use derivation::*;
pub use wallet::*;
