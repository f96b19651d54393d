//! Wallet turn scheduling

pub mod sequence;

pub use sequence::*;
