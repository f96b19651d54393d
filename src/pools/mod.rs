//! Liquidswap pool catalog

pub mod catalog;

pub use catalog::*;
