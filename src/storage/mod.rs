//! Run artifacts written to the log directory

pub mod tx_log;

pub use tx_log::*;
