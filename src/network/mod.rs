//! Chain and balance-indexer clients

pub mod chain;
pub mod aptos;
pub mod balances;

pub use chain::*;
pub use aptos::*;
pub use balances::*;
