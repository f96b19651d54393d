//! Swap pair, amount and payload selection

pub mod pair;
pub mod amount;
pub mod liquidswap;

pub use pair::*;
pub use amount::*;
pub use liquidswap::*;
