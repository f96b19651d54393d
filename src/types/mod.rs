//! Core data types and structures

pub mod addresses;
pub mod coins;
pub mod pools;
pub mod swap;
pub mod transactions;

pub use addresses::*;
pub use coins::*;
pub use pools::*;
pub use swap::*;
pub use transactions::*;
