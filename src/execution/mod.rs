//! Swap execution: transaction sequencing and the turn loop

pub mod sequencer;
pub mod runner;

pub use sequencer::*;
pub use runner::*;
