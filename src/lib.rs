//! Aptos warm-up bot - randomized Liquidswap swaps across a batch of wallets
//!
//! Each wallet in the run gets a random number of turns. A turn reads the
//! wallet's balances, picks a pool and amount, and pushes one swap through
//! simulation and then the chain, registering the destination coin first
//! when needed. Every transaction outcome lands in a CSV report.

pub mod config;
pub mod types;
pub mod errors;
pub mod network;
pub mod pools;
pub mod wallets;
pub mod swap;
pub mod execution;
pub mod scheduler;
pub mod storage;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use errors::{BotError, BotResult};
pub use types::*;
